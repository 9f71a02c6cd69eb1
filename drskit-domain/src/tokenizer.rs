use drskit_types::Token;

/// Split `expression` on `separator`, keeping empty tokens.
///
/// Never fails. `n` separators always yield `n + 1` tokens, so doubled,
/// leading and trailing separators show up as empty tokens instead of being
/// collapsed. Columns are character offsets shifted by `offset`.
pub fn tokenize(expression: &str, separator: char) -> Vec<Token> {
    tokenize_at(expression, separator, 0)
}

pub fn tokenize_at(expression: &str, separator: char, offset: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut value = String::new();
    let mut start = offset;
    let mut column = offset;
    for ch in expression.chars() {
        if ch == separator {
            tokens.push(Token {
                value: std::mem::take(&mut value),
                start,
                end: column,
            });
            start = column + 1;
        } else {
            value.push(ch);
        }
        column += 1;
    }
    tokens.push(Token {
        value,
        start,
        end: column,
    });
    tokens
}
