//! Tokenizing the content markup.
//!
//! The lexer splits a markup string into tags, character entities and text
//! runs using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! The most important property of this lexer is that **every byte in the
//! input appears in exactly one token**. Nothing is skipped or discarded,
//! which is what makes lossless round-tripping possible:
//!
//! ```
//! use richpress_engine::markup::lexer::lex;
//!
//! let input = "Hello <strong>world</strong> &amp; more";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Tokens are minimal and context-free: the lexer does not know whether
//! `<strong>` opens a style wrapper or whether a tag is even recognized.
//! Classification is the parser's job. A `<` or `&` that does not form a
//! well-formed tag or entity becomes its own token and is treated as text
//! downstream.

use logos::Logos;

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A complete tag: `<name …>`, `</name>` or `<name … />`.
    #[regex(r"<[^<>]+>")]
    Tag,

    /// A named or numeric character entity, e.g. `&amp;` or `&#169;`.
    #[regex(r"&[a-zA-Z][a-zA-Z0-9]*;|&#[0-9]+;")]
    Entity,

    /// A run of plain text (anything that cannot start a tag or entity).
    #[regex(r"[^<&]+")]
    Text,

    /// A bare `<` that does not open a well-formed tag.
    #[token("<")]
    Lt,

    /// A bare `&` that does not start an entity.
    #[token("&")]
    Amp,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(kind) => kind,
            // Logos error means an unrecognized byte - treat as text
            Err(()) => TokenKind::Text,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}
