//! Formula tokens.
//!
//! A formula is an ordered list of [`Token`]s. Plain text tokens carry exactly
//! what the user typed; tag tokens carry an opaque identifier taken from a
//! [`Suggestion`](super::Suggestion) plus an optional label for display.

use std::fmt;

/// The kind of a committed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text typed by the user (numbers, operators, anything).
    PlainText,
    /// A reference to an external entity picked from the suggestion list.
    Tag,
    /// Reserved for standalone numbers/operators. Nothing produces it yet; it is
    /// rendered like plain text but is not inline-editable.
    Operand,
}

impl TokenKind {
    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::PlainText => "text",
            TokenKind::Tag => "tag",
            TokenKind::Operand => "operand",
        }
    }
}

/// An immutable formula token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: String,
    display: Option<String>,
}

impl Token {
    /// Create a plain text token.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::PlainText,
            value: value.into(),
            display: None,
        }
    }

    /// Create a tag token with an optional human-readable label.
    pub fn tag(value: impl Into<String>, display: Option<String>) -> Self {
        Self {
            kind: TokenKind::Tag,
            value: value.into(),
            display,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal value used for evaluation.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The display label, if this is a labelled tag.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Text shown to the user: the label for tags when present, else the value.
    pub fn label(&self) -> &str {
        match self.display.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.value,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::PlainText
    }

    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::Tag
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_token_has_no_display() {
        let token = Token::text("3+4");
        assert_eq!(token.kind(), TokenKind::PlainText);
        assert_eq!(token.value(), "3+4");
        assert!(token.display().is_none());
        assert_eq!(token.label(), "3+4");
    }

    #[test]
    fn test_tag_label_prefers_display() {
        let token = Token::tag("rev", Some("Revenue".to_string()));
        assert!(token.is_tag());
        assert_eq!(token.value(), "rev");
        assert_eq!(token.label(), "Revenue");
        assert_eq!(token.to_string(), "Revenue");
    }

    #[test]
    fn test_tag_label_falls_back_to_value() {
        assert_eq!(Token::tag("rev", None).label(), "rev");
        assert_eq!(Token::tag("rev", Some(String::new())).label(), "rev");
    }
}
