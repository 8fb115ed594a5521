use logos::Logos;

/// Lexical units of the part of a data URI that follows `data:`.
///
/// Every byte of the input belongs to exactly one token, so the lexer never
/// produces an error for well-formed UTF-8 input.
#[derive(Debug, Clone, Copy, Logos, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Token {
    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Equals,

    /// Any run of characters that are not delimiters.
    #[regex(r"[^,;=]+")]
    Text,
}
