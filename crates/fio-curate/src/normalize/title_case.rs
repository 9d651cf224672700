//! Parenthesis-aware title casing.

/// Title-case words outside parentheses.
///
/// A `(` opens a protected span that is copied verbatim up to its matching
/// `)`; nesting is tracked, and an unclosed span runs to the end of the
/// string. Outside spans, words are delimited by spaces and each
/// hyphen-separated part becomes first letter upper, rest lower. Spaces are
/// kept exactly as they are.
pub(crate) fn title_case_outside_parentheses(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();
    let mut depth = 0usize;

    for c in s.chars() {
        if depth > 0 {
            out.push(c);
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            continue;
        }

        match c {
            '(' => {
                flush_word(&mut word, &mut out);
                out.push(c);
                depth = 1;
            }
            ' ' => {
                flush_word(&mut word, &mut out);
                out.push(c);
            }
            _ => word.push(c),
        }
    }

    flush_word(&mut word, &mut out);
    out
}

fn flush_word(word: &mut String, out: &mut String) {
    if word.is_empty() {
        return;
    }
    for (i, part) in word.split('-').enumerate() {
        if i > 0 {
            out.push('-');
        }
        title_case_part(part, out);
    }
    word.clear();
}

/// Only the first char of a multi-char uppercase form stays upper
/// (`ß` -> `Ss`), so casing a cased part is a no-op.
fn title_case_part(part: &str, out: &mut String) {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let mut upper = first.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
    }
    let rest: String = upper.chain(chars).collect();
    out.push_str(&rest.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        assert_eq!(title_case_outside_parentheses("ИВАНОВ иВАН"), "Иванов Иван");
        assert_eq!(title_case_outside_parentheses("ivanov"), "Ivanov");
    }

    #[test]
    fn test_hyphenated_parts() {
        assert_eq!(
            title_case_outside_parentheses("петрова-сидорова"),
            "Петрова-Сидорова"
        );
        assert_eq!(title_case_outside_parentheses("а--б"), "А--Б");
        assert_eq!(title_case_outside_parentheses("-иван-"), "-Иван-");
    }

    #[test]
    fn test_parentheses_protected() {
        assert_eq!(
            title_case_outside_parentheses("ИВАНОВА (дЕвИчья ПЕТРОВА) мария"),
            "Иванова (дЕвИчья ПЕТРОВА) Мария"
        );
        assert_eq!(title_case_outside_parentheses("(вдова)"), "(вдова)");
    }

    #[test]
    fn test_nested_and_unclosed_parentheses() {
        assert_eq!(
            title_case_outside_parentheses("АННА (а (б) в) ПЕТРОВНА"),
            "Анна (а (б) в) Петровна"
        );
        assert_eq!(
            title_case_outside_parentheses("АННА (не закрыто ПЕТРОВНА"),
            "Анна (не закрыто ПЕТРОВНА"
        );
    }

    #[test]
    fn test_word_touching_parenthesis() {
        assert_eq!(title_case_outside_parentheses("ИВАНОВА(петрова)"), "Иванова(петрова)");
        assert_eq!(title_case_outside_parentheses("(x)ИВАН"), "(x)Иван");
    }

    #[test]
    fn test_multi_char_uppercase_is_stable() {
        assert_eq!(title_case_outside_parentheses("ßa"), "Ssa");
        assert_eq!(title_case_outside_parentheses("ﬁлиппов"), "Fiлиппов");
        for s in ["ßa", "ﬁлиппов", "ŉ-ǆ"] {
            let once = title_case_outside_parentheses(s);
            assert_eq!(title_case_outside_parentheses(&once), once);
        }
    }

    #[test]
    fn test_stray_closing_parenthesis_is_a_word_char() {
        assert_eq!(title_case_outside_parentheses("ИВАН) ПЕТР"), "Иван) Петр");
    }
}
