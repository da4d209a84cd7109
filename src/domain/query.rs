//! Query derivation for the primary input.
//!
//! The query is the tail of the uncommitted text after the last delimiter.
//! It is recomputed from scratch on every keystroke.

/// Characters that end a query: arithmetic operators, parentheses and space.
pub const DELIMITERS: [char; 8] = ['+', '-', '*', '/', '^', '(', ')', ' '];

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// The substring after the last delimiter, or the whole string if there is none.
pub fn current_query(text: &str) -> &str {
    match text.rfind(is_delimiter) {
        // Every delimiter is a single byte
        Some(pos) => &text[pos + 1..],
        None => text,
    }
}

/// The part of `text` that precedes [`current_query`], delimiters included.
pub fn query_prefix(text: &str) -> &str {
    let query = current_query(text);
    &text[..text.len() - query.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_after_operator() {
        assert_eq!(current_query("12+ab"), "ab");
    }

    #[test]
    fn test_query_without_delimiter() {
        assert_eq!(current_query("hello"), "hello");
    }

    #[test]
    fn test_query_of_empty() {
        assert_eq!(current_query(""), "");
    }

    #[test]
    fn test_query_uses_last_delimiter() {
        assert_eq!(current_query("(a+b)*cost"), "cost");
        assert_eq!(current_query("a b"), "b");
        assert_eq!(current_query("2^x"), "x");
        assert_eq!(current_query("10/rev"), "rev");
        assert_eq!(current_query("x-y"), "y");
    }

    #[test]
    fn test_query_empty_after_trailing_delimiter() {
        assert_eq!(current_query("3+"), "");
        assert_eq!(current_query("rev "), "");
    }

    #[test]
    fn test_query_with_multibyte_text() {
        assert_eq!(current_query("größe+umsätze"), "umsätze");
    }

    #[test]
    fn test_every_delimiter_splits() {
        for d in DELIMITERS {
            let text = format!("a{}b", d);
            assert_eq!(current_query(&text), "b", "delimiter {:?}", d);
        }
    }

    #[test]
    fn test_prefix_keeps_delimiters() {
        assert_eq!(query_prefix("x+rev"), "x+");
        assert_eq!(query_prefix("rev"), "");
        assert_eq!(query_prefix("3+"), "3+");
    }
}
