//! Which CSV columns hold the name.

use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};

use super::extract::{CandidateExtractor, SecondToken, SplitColumn};

/// Column selection for a CSV file.
///
/// Either one column holds the whole name (`single`), or the parts live in
/// separate columns (`split`). An empty column name means "unused".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Selection {
    /// One column with "surname given-name patronymic".
    Single {
        /// Header of the full-name column.
        fio_column: String,
    },
    /// Separate surname / given name / patronymic columns.
    Split {
        /// Header of the surname column.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last_name_column: Option<String>,
        /// Header of the given-name column.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        first_name_column: Option<String>,
        /// Header of the patronymic column.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        middle_name_column: Option<String>,
    },
}

/// A name part shown in previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePart {
    /// The whole name in one column.
    Fio,
    LastName,
    FirstName,
    MiddleName,
}

impl NamePart {
    /// Russian label used in previews.
    pub fn label_ru(&self) -> &'static str {
        match self {
            NamePart::Fio => "фио",
            NamePart::LastName => "фамилия",
            NamePart::FirstName => "имя",
            NamePart::MiddleName => "отчество",
        }
    }
}

impl Selection {
    /// Single-column selection.
    pub fn single(fio_column: impl Into<String>) -> Self {
        Selection::Single {
            fio_column: fio_column.into(),
        }
    }

    /// Split selection. Empty or blank names are treated as unused.
    pub fn split(
        last_name_column: Option<&str>,
        first_name_column: Option<&str>,
        middle_name_column: Option<&str>,
    ) -> Self {
        let keep = |c: Option<&str>| c.map(str::trim).filter(|c| !c.is_empty()).map(String::from);
        Selection::Split {
            last_name_column: keep(last_name_column),
            first_name_column: keep(first_name_column),
            middle_name_column: keep(middle_name_column),
        }
    }

    /// Mode tag (`single` or `split`).
    pub fn mode(&self) -> &'static str {
        match self {
            Selection::Single { .. } => "single",
            Selection::Split { .. } => "split",
        }
    }

    /// Check that at least one column is configured.
    pub fn validate(&self) -> Result<()> {
        match self {
            Selection::Single { fio_column } if used(Some(fio_column.as_str())).is_none() => Err(
                CurateError::Config("Single mode requires a non-empty fio_column".to_string()),
            ),
            Selection::Split { .. } if self.parts().is_empty() => Err(CurateError::Config(
                "Split mode requires at least one of last_name_column, first_name_column, middle_name_column"
                    .to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Configured name parts with their column headers, in surname /
    /// given-name / patronymic order.
    pub fn parts(&self) -> Vec<(NamePart, &str)> {
        match self {
            Selection::Single { fio_column } => used(Some(fio_column.as_str()))
                .map(|c| vec![(NamePart::Fio, c)])
                .unwrap_or_default(),
            Selection::Split {
                last_name_column,
                first_name_column,
                middle_name_column,
            } => [
                (NamePart::LastName, last_name_column.as_deref()),
                (NamePart::FirstName, first_name_column.as_deref()),
                (NamePart::MiddleName, middle_name_column.as_deref()),
            ]
            .into_iter()
            .filter_map(|(part, column)| used(column).map(|c| (part, c)))
            .collect(),
        }
    }

    /// Configured column headers.
    pub fn columns(&self) -> Vec<&str> {
        self.parts().into_iter().map(|(_, c)| c).collect()
    }

    /// The default given-name extraction strategy for this selection.
    ///
    /// `None` in split mode without a given-name column: such a selection
    /// yields no candidates.
    pub fn extractor(&self) -> Option<Box<dyn CandidateExtractor>> {
        match self {
            Selection::Single { fio_column } => used(Some(fio_column.as_str()))
                .map(|c| Box::new(SecondToken::new(c)) as Box<dyn CandidateExtractor>),
            Selection::Split {
                first_name_column, ..
            } => used(first_name_column.as_deref())
                .map(|c| Box::new(SplitColumn::new(c)) as Box<dyn CandidateExtractor>),
        }
    }
}

fn used(column: Option<&str>) -> Option<&str> {
    column.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SuggestionField;

    #[test]
    fn test_serde_single() {
        let sel: Selection = serde_json::from_str(r#"{"mode":"single","fio_column":"ФИО"}"#).unwrap();
        assert_eq!(sel, Selection::single("ФИО"));
        assert_eq!(
            serde_json::to_string(&sel).unwrap(),
            r#"{"mode":"single","fio_column":"ФИО"}"#
        );
    }

    #[test]
    fn test_serde_split_with_empty_columns() {
        let sel: Selection = serde_json::from_str(
            r#"{"mode":"split","last_name_column":"","first_name_column":"Имя"}"#,
        )
        .unwrap();

        assert_eq!(sel.mode(), "split");
        assert_eq!(sel.parts(), vec![(NamePart::FirstName, "Имя")]);
        assert!(sel.validate().is_ok());
    }

    #[test]
    fn test_split_constructor_drops_blank() {
        let sel = Selection::split(Some("Фамилия"), Some("  "), None);
        assert_eq!(
            sel,
            Selection::Split {
                last_name_column: Some("Фамилия".to_string()),
                first_name_column: None,
                middle_name_column: None,
            }
        );
    }

    #[test]
    fn test_validate() {
        assert!(Selection::single("ФИО").validate().is_ok());
        assert!(matches!(
            Selection::single(" ").validate(),
            Err(CurateError::Config(_))
        ));
        assert!(matches!(
            Selection::split(None, Some(""), None).validate(),
            Err(CurateError::Config(_))
        ));
    }

    #[test]
    fn test_parts_order() {
        let sel = Selection::split(Some("Ф"), Some("И"), Some("О"));
        let parts: Vec<_> = sel.parts().into_iter().map(|(p, _)| p.label_ru()).collect();
        assert_eq!(parts, vec!["фамилия", "имя", "отчество"]);
        assert_eq!(sel.columns(), vec!["Ф", "И", "О"]);
    }

    #[test]
    fn test_extractor_per_mode() {
        let single = Selection::single("ФИО").extractor().unwrap();
        assert_eq!(single.field(), SuggestionField::FioFirstName);
        assert_eq!(single.column(), "ФИО");

        let split = Selection::split(Some("Фамилия"), Some("Имя"), None)
            .extractor()
            .unwrap();
        assert_eq!(split.field(), SuggestionField::FirstName);
        assert_eq!(split.column(), "Имя");

        assert!(Selection::split(Some("Фамилия"), None, None).extractor().is_none());
    }
}
