//! Given-name candidate extraction strategies.

use super::suggestion::SuggestionField;

/// Pulls a candidate given name out of one CSV cell.
///
/// The generator resolves [`column`](Self::column) against the header once
/// and calls [`extract`](Self::extract) for every row.
pub trait CandidateExtractor {
    /// Field recorded on suggestions built from this extractor.
    fn field(&self) -> SuggestionField;

    /// Header of the column the candidate is read from.
    fn column(&self) -> &str;

    /// The candidate in `cell`, or `None` when there is nothing to look up.
    fn extract<'a>(&self, cell: &'a str) -> Option<&'a str>;
}

/// Heuristic for a single full-name column: assumes
/// "surname given-name patronymic" and takes the second whitespace token.
///
/// Fails for compound surnames, missing given names or reordered names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondToken {
    column: String,
}

impl SecondToken {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl CandidateExtractor for SecondToken {
    fn field(&self) -> SuggestionField {
        SuggestionField::FioFirstName
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn extract<'a>(&self, cell: &'a str) -> Option<&'a str> {
        cell.split_whitespace().nth(1)
    }
}

/// A dedicated given-name column: the trimmed cell is the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitColumn {
    column: String,
}

impl SplitColumn {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl CandidateExtractor for SplitColumn {
    fn field(&self) -> SuggestionField {
        SuggestionField::FirstName
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn extract<'a>(&self, cell: &'a str) -> Option<&'a str> {
        Some(cell.trim()).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_token() {
        let ex = SecondToken::new("ФИО");
        assert_eq!(ex.extract("  Иванов  Ваня Петрович "), Some("Ваня"));
        assert_eq!(ex.extract("Иванов Ваня"), Some("Ваня"));
        assert_eq!(ex.extract("Иванов"), None);
        assert_eq!(ex.extract("   "), None);
    }

    #[test]
    fn test_split_column() {
        let ex = SplitColumn::new("Имя");
        assert_eq!(ex.extract(" Ваня "), Some("Ваня"));
        assert_eq!(ex.extract("Анна Мария"), Some("Анна Мария"));
        assert_eq!(ex.extract(" "), None);
    }
}
