use serde::{Deserialize, Serialize};

/// A slice of an expression between two separators.
///
/// `start` and `end` are 0-based character columns into the raw input, `end`
/// exclusive. An empty token has `start == end`, pointing at the separator
/// that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Non-empty and made only of whitespace.
    pub fn is_blank(&self) -> bool {
        !self.value.is_empty() && self.value.chars().all(char::is_whitespace)
    }

    /// Empty or blank: carries nothing that could match a term.
    pub fn is_void(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(v: &str) -> Token {
        Token {
            value: v.to_string(),
            start: 0,
            end: v.chars().count(),
        }
    }

    #[test]
    fn classification() {
        assert!(tok("").is_empty());
        assert!(!tok("").is_blank());
        assert!(tok(" \t").is_blank());
        assert!(tok(" \t").is_void());
        assert!(!tok(" a").is_blank());
        assert!(!tok("IPSL").is_void());
    }
}
