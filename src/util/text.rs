// src/util/text.rs

/// Prefix every line of `text` with `prefix`, dropping trailing whitespace.
///
/// # Examples
///
/// ```
/// use notes_client::util::text::indent;
///
/// assert_eq!(indent("first\nsecond", "  "), "  first\n  second");
/// ```
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_line_when_indenting_then_prefixes_it() {
        assert_eq!(indent("hello", "> "), "> hello");
    }

    #[test]
    fn given_blank_lines_when_indenting_then_leaves_no_trailing_spaces() {
        assert_eq!(indent("a\n\nb", "    "), "    a\n\n    b");
    }

    #[test]
    fn given_empty_text_when_indenting_then_returns_empty_string() {
        assert_eq!(indent("", "    "), "");
    }

    #[test]
    fn given_crlf_line_endings_when_indenting_then_splits_lines() {
        assert_eq!(indent("a\r\nb", "-"), "-a\n-b");
    }
}
