//! Recursive assembly of tokens into atoms.
//!
//! The grammar is loose: a name is followed by a block, a counted array,
//! or whatever values fit on its line. [`atom`] pulls tokens from the
//! tokenizer one at a time and reports how each subtree ended so the
//! caller knows whether a newline or a `}` closed it.

use log::debug;

use crate::atom::{Atom, Block, Payload};
use crate::error::{Error, Result};
use crate::token::{Span, Token, TokenKind};
use crate::tokenizer::{self, Tokenizer};

/// Why an atom stopped consuming tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    /// The atom was self-contained
    None,
    /// A newline ended the enclosing sequence
    Newline,
    /// A `}` closed the enclosing block
    Block,
}

/// Builds one atom starting at `token`. With `block_descent` set, a name
/// is returned bare instead of pulling in the rest of its line. `label`
/// names the enclosing block in duplicate-key errors.
pub(crate) fn atom(
    src: &mut Tokenizer,
    token: Token,
    depth: usize,
    block_descent: bool,
    label: &str,
) -> Result<(Option<Atom>, Stop)> {
    if crate::debug_enabled() {
        debug!(
            "{:indent$}atom {}",
            "",
            kind_label(&token.kind),
            indent = depth * 2
        );
    }
    match token.kind {
        TokenKind::Name(name) => {
            if block_descent {
                return Ok((Some(Atom::Ident(name)), Stop::None));
            }
            let next = src.next_token()?;
            match next.kind {
                TokenKind::OpenBrace => {
                    // this name opens a `{` block
                    let (value, _) = atom(src, next, depth + 1, false, &name)?;
                    let inner = value.map(|inner| {
                        Atom::Block(Block::single(name, Some(inner)))
                    });
                    Ok((inner, Stop::None))
                }
                _ if tokenizer::is_array_field(&name) => {
                    let span = next.span;
                    let TokenKind::Number(lexeme) = next.kind else {
                        return Err(parse_error(
                            span,
                            format!("expected an element count after {}", name),
                        ));
                    };
                    let n: usize = lexeme.parse().map_err(|_| {
                        parse_error(span, format!("bad element count {:?} for {}", lexeme, name))
                    })?;
                    let newline = src.next_token()?;
                    if !matches!(newline.kind, TokenKind::Newline) {
                        return Err(parse_error(
                            newline.span,
                            format!("expected a newline after the {} count", name),
                        ));
                    }
                    let rows = src.next_token()?;
                    let span = rows.span;
                    let TokenKind::Vec3Array(array) = rows.kind else {
                        return Err(parse_error(span, format!("expected {} rows", name)));
                    };
                    if array.len() != n {
                        return Err(parse_error(
                            span,
                            format!("{} declares {} rows, found {}", name, n, array.len()),
                        ));
                    }
                    Ok((
                        Some(Atom::Block(Block::single(name, Some(Atom::Vec3(array))))),
                        Stop::None,
                    ))
                }
                _ => {
                    // gather the rest of the line
                    let mut elements = Vec::new();
                    let mut next = next;
                    let ended;
                    loop {
                        if matches!(next.kind, TokenKind::Newline) {
                            ended = Stop::Newline;
                            break;
                        }
                        let mut descend = false;
                        if matches!(next.kind, TokenKind::Colon) {
                            // a colon forces the next sub-atom to stay bare
                            descend = true;
                            next = src.next_token()?;
                        }
                        let (value, sub_stop) = atom(src, next, depth + 1, descend, &name)?;
                        if let Some(value) = value {
                            elements.push(value);
                        }
                        if sub_stop != Stop::None {
                            ended = sub_stop;
                            break;
                        }
                        next = src.next_token()?;
                    }
                    let result = if elements.is_empty() {
                        Atom::Ident(name)
                    } else if elements.len() == 1 {
                        let value = elements.remove(0);
                        Atom::Block(Block::single(name, Some(value)))
                    } else {
                        Atom::Block(Block::single(name, Some(Atom::List(elements))))
                    };
                    Ok((Some(result), ended))
                }
            }
        }
        TokenKind::OpenBrace => {
            if block_descent {
                return Err(parse_error(
                    token.span,
                    "a block cannot open after a colon".to_string(),
                ));
            }
            let mut block = Block::default();
            let mut next = src.next_token()?;
            loop {
                if matches!(next.kind, TokenKind::CloseBrace) {
                    break;
                }
                let span = next.span;
                let (value, sub_stop) = atom(src, next, depth + 1, false, label)?;
                if let Some(value) = value {
                    merge(&mut block, value, label, span)?;
                }
                if sub_stop == Stop::Block {
                    break;
                }
                next = src.next_token()?;
            }
            Ok((Some(Atom::Block(block)), Stop::Block))
        }
        TokenKind::CloseBrace => Ok((None, Stop::Block)),
        TokenKind::Newline => Ok((None, Stop::Newline)),
        TokenKind::Comment(_) | TokenKind::Comma => Ok((None, Stop::None)),
        TokenKind::Number(lexeme) => {
            let value = match lexeme.parse::<i64>() {
                Ok(int) => Atom::Int(int),
                Err(_) => {
                    let float: f64 = lexeme.parse().map_err(|_| {
                        parse_error(token.span, format!("bad number {:?}", lexeme))
                    })?;
                    Atom::Float(float)
                }
            };
            Ok((Some(value), Stop::None))
        }
        TokenKind::Str(text) => Ok((Some(Atom::Str(text)), Stop::None)),
        TokenKind::BytedataInfo(_) | TokenKind::Equals => Ok((None, Stop::None)),
        TokenKind::Bytedata(payload) => {
            let value = match payload {
                Payload::Lattice(lattice) => Atom::Lattice(lattice),
                Payload::Table(table) => Atom::Table(table),
            };
            Ok((
                Some(Atom::Block(Block::single("data".to_string(), Some(value)))),
                Stop::None,
            ))
        }
        TokenKind::Vec3Array(_) | TokenKind::End | TokenKind::Colon => Err(parse_error(
            token.span,
            format!("unexpected {} token", kind_label(&token.kind)),
        )),
    }
}

/// Folds one parsed element into a block under construction.
fn merge(block: &mut Block, value: Atom, label: &str, span: Span) -> Result<()> {
    match value {
        Atom::Block(inner) => {
            for (key, entry) in inner.0 {
                if !block.insert(key.clone(), entry) {
                    return Err(Error::DuplicateKey {
                        key,
                        block: label.to_string(),
                    });
                }
            }
            Ok(())
        }
        Atom::Ident(name) => {
            if !block.insert(name.clone(), None) {
                return Err(Error::DuplicateKey {
                    key: name,
                    block: label.to_string(),
                });
            }
            Ok(())
        }
        _ => Err(parse_error(
            span,
            "unexpected value inside a block".to_string(),
        )),
    }
}

fn parse_error(span: Span, msg: String) -> Error {
    Error::Parse {
        line: span.start.line,
        col: span.start.col,
        msg,
    }
}

fn kind_label(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Comment(_) => "comment",
        TokenKind::Newline => "newline",
        TokenKind::Name(_) => "name",
        TokenKind::Number(_) => "number",
        TokenKind::Str(_) => "string",
        TokenKind::OpenBrace => "{",
        TokenKind::CloseBrace => "}",
        TokenKind::Colon => "colon",
        TokenKind::Comma => "comma",
        TokenKind::Equals => "equals",
        TokenKind::Vec3Array(_) => "Vec3Array",
        TokenKind::BytedataInfo(_) => "bytedata info",
        TokenKind::Bytedata(_) => "bytedata",
        TokenKind::End => "endmarker",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &[u8]) -> Atom {
        let mut tokenizer = Tokenizer::new(input);
        let mut token = tokenizer.next_token().unwrap();
        loop {
            let (value, _) = atom(&mut tokenizer, token, 0, false, "{").unwrap();
            if let Some(value) = value {
                return value;
            }
            token = tokenizer.next_token().unwrap();
        }
    }

    #[test]
    fn a_name_with_one_value_keys_it() {
        let parsed = parse_one(b"# AmiraMesh 3D ASCII 2.0\nCoordType \"uniform\"\n");
        let block = parsed.as_block().unwrap();
        assert_eq!(
            block.get("CoordType").and_then(Atom::as_str),
            Some("\"uniform\"")
        );
    }

    #[test]
    fn a_colon_keeps_the_following_name_bare() {
        let parsed = parse_one(b"# AmiraMesh 3D ASCII 2.0\nInnerRegion: Inside\n");
        let block = parsed.as_block().unwrap();
        assert_eq!(
            block.get("InnerRegion"),
            Some(&Atom::Ident("Inside".to_string()))
        );
    }

    #[test]
    fn duplicate_keys_name_their_block() {
        let input = b"# AmiraMesh 3D ASCII 2.0\nMaterials {\n    Exterior { Id 1 }\n    Exterior { Id 2 }\n}\n";
        let mut tokenizer = Tokenizer::new(input);
        let mut token = tokenizer.next_token().unwrap();
        let err = loop {
            match atom(&mut tokenizer, token, 0, false, "{") {
                Ok((_, _)) => token = tokenizer.next_token().unwrap(),
                Err(err) => break err,
            }
        };
        match err {
            Error::DuplicateKey { key, block } => {
                assert_eq!(key, "Exterior");
                assert_eq!(block, "Materials");
            }
            other => panic!("expected a duplicate key error, got {:?}", other),
        }
    }
}
