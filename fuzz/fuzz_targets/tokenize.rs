#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    expression: String,
    separator: char,
    offset: u16,
}

fuzz_target!(|input: Input| {
    let offset = usize::from(input.offset);
    let tokens = drskit_domain::tokenize_at(&input.expression, input.separator, offset);
    let len = input.expression.chars().count();

    let separators = input
        .expression
        .chars()
        .filter(|c| *c == input.separator)
        .count();
    assert_eq!(tokens.len(), separators + 1);

    for token in &tokens {
        assert!(token.start <= token.end);
        assert!(token.start >= offset && token.end <= offset + len);
        assert_eq!(token.value.chars().count(), token.end - token.start);
    }

    let joined: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(joined.join(&input.separator.to_string()), input.expression);
});
