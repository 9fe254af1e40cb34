//! Typed tokens and their source positions.

use crate::atom::{Payload, Vec3Array};

/// A 1-based line and 0-based column in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

/// The byte range a token came from, for diagnostics. Consumers of the
/// parsed document never need it, error messages do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub(crate) fn line(line: usize, col: usize, end_col: usize) -> Span {
        Span {
            start: Pos { line, col },
            end: Pos { line, col: end_col },
        }
    }
}

/// One lexical unit of an Amira file.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A `#`-prefixed line, without its newline
    Comment(String),
    Newline,
    /// An identifier, possibly indexed (`Materials[0]`)
    Name(String),
    /// A numeric lexeme, kept textual until the tree builder types it
    Number(String),
    /// A quoted string literal, quotes included
    Str(String),
    OpenBrace,
    CloseBrace,
    Colon,
    Comma,
    Equals,
    /// An N×3 vertex or triangle table, HyperSurface only
    Vec3Array(Vec3Array),
    /// A `@<id>` declaration seen inside an attribute line
    BytedataInfo(String),
    /// A materialized binary or ASCII payload
    Bytedata(Payload),
    /// End of the token stream
    End,
}

/// A token plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span) -> Token {
        Token { kind, span }
    }
}
