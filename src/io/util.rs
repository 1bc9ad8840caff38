use super::Format;
use super::error::Error;
use std::io::BufRead;

/// Reads the whole input as UTF-8 text.
///
/// Invalid UTF-8 is reported as a parse error at the line holding the first
/// bad byte.
pub fn read_text<R: BufRead>(mut reader: R, format: Format) -> Result<String, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        Error::parse(format, line, "text is not valid UTF-8")
    })
}

/// Splits a property line into `(value, label)`.
///
/// The component database writes the value first and the label after it, so
/// the first whitespace token is the value and the rest, joined by single
/// spaces, is the label. Returns `None` for a blank line.
pub fn split_value_label(line: &str) -> Option<(&str, String)> {
    let mut tokens = line.split_whitespace();
    let value = tokens.next()?;
    let label = tokens.collect::<Vec<_>>().join(" ");
    Some((value, label))
}

/// Returns `true` if the identifier's leading `-`-separated segment is a number.
///
/// Accepts CAS registry numbers such as `7732-18-5` and plain integers.
pub fn has_numeric_head(token: &str) -> bool {
    let head = token.split('-').next().unwrap_or_default();
    !head.is_empty() && head.chars().all(char::is_numeric)
}

pub fn starts_with_digit(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Cuts `s` to at most `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some(_) if max_len == 0 => String::new(),
        Some(_) => {
            let cut = s
                .char_indices()
                .nth(max_len - 1)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            format!("{}…", &s[..cut])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_text_accepts_utf8() {
        let text = read_text(Cursor::new("Méthane\nCH4\n"), Format::Pct).unwrap();
        assert_eq!(text, "Méthane\nCH4\n");
    }

    #[test]
    fn read_text_locates_invalid_utf8() {
        let bytes: &[u8] = b"74-82-8 124-38-9 0.09\nCASN1 \xff\n";
        let err = read_text(Cursor::new(bytes), Format::Ipd).unwrap_err();
        match err {
            Error::Parse { format, line, .. } => {
                assert_eq!(format, Format::Ipd);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn split_value_label_inverts_columns() {
        let (value, label) = split_value_label("  190.564   Critical temperature ").unwrap();
        assert_eq!(value, "190.564");
        assert_eq!(label, "Critical temperature");
    }

    #[test]
    fn split_value_label_single_token_has_empty_label() {
        let (value, label) = split_value_label("74-82-8").unwrap();
        assert_eq!(value, "74-82-8");
        assert_eq!(label, "");
    }

    #[test]
    fn split_value_label_blank_line() {
        assert!(split_value_label("   \t ").is_none());
    }

    #[test]
    fn numeric_head_accepts_cas_numbers() {
        assert!(has_numeric_head("7732-18-5"));
        assert!(has_numeric_head("124"));
        assert!(!has_numeric_head("CASN1"));
        assert!(!has_numeric_head("-18-5"));
        assert!(!has_numeric_head("1a-18-5"));
        assert!(!has_numeric_head(""));
    }

    #[test]
    fn starts_with_digit_checks_first_char() {
        assert!(starts_with_digit("74-82-8"));
        assert!(!starts_with_digit("CAS 74-82-8"));
        assert!(!starts_with_digit(""));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
        assert_eq!(truncate("abc", 0), "");
    }
}
