/// Swap non-breaking and narrow no-break spaces for plain spaces, then trim.
pub fn normalise_whitespace(raw: &str) -> String {
    raw.replace(['\u{00a0}', '\u{202f}'], " ").trim().to_string()
}

/// Cell at `index`, or `""` when the row is short.
pub fn value_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Normalised text, or `None` when nothing is left.
pub fn clean_text(raw: &str) -> Option<String> {
    let text = normalise_whitespace(raw);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_whitespace() {
        assert_eq!(normalise_whitespace("\u{00a0} АТБ\u{202f}"), "АТБ");
        assert_eq!(normalise_whitespace("1\u{00a0}234"), "1 234");
        assert_eq!(normalise_whitespace("   "), "");
    }

    #[test]
    fn test_value_at_short_row() {
        let row = vec!["label".to_string(), "a".to_string()];
        assert_eq!(value_at(&row, 1), "a");
        assert_eq!(value_at(&row, 5), "");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(" Сільпо "), Some("Сільпо".to_string()));
        assert_eq!(clean_text("\u{00a0}"), None);
    }
}
