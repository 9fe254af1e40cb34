//! The context-sensitive token stream over an Amira byte buffer.
//!
//! Most of the input is line-oriented text, but two declarations flip the
//! stream into sized binary extraction: a counted `Vertices`/`Triangles`
//! header in a HyperSurface file, and a column-0 `@<id>` key whose size
//! comes from an earlier annotation or from the `Lattice` define. The
//! tokenizer keeps a three-token lookback window to spot the first case
//! and a table of bytedata declarations plus the defines map for the
//! second. The defines map is fed back in by the reader as top-level
//! atoms are finalized; see [`Tokenizer::add_defines`].

use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;
use log::{debug, warn};
use scroll::Pread;

use crate::atom::{Lattice, Payload, Table, Vec3Array};
use crate::decode;
use crate::error::{Error, Result};
use crate::lex;
use crate::options::ParseOptions;
use crate::token::{Span, Token, TokenKind};

/// Which Amira container a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A volumetric lattice plus parameters
    AmiraMesh,
    /// A triangular mesh with vertex and triangle tables
    HyperSurface,
}

/// The file header descriptor, set exactly once from the first token and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// `None` when the header comment is unrecognized
    pub kind: Option<Kind>,
    pub version: Option<&'static str>,
    pub is_binary: bool,
}

/// The known first-line signatures.
const HEADERS: [(&str, Kind, &str, bool); 6] = [
    ("# HyperSurface 0.1 BINARY", Kind::HyperSurface, "0.1", true),
    ("# HyperSurface 0.1 ASCII", Kind::HyperSurface, "0.1", false),
    ("# AmiraMesh 3D BINARY 2.0", Kind::AmiraMesh, "2.0", true),
    (
        "# AmiraMesh 3D BINARY-LITTLE-ENDIAN 2.0",
        Kind::AmiraMesh,
        "2.0",
        true,
    ),
    ("# AmiraMesh 3D ASCII 2.0", Kind::AmiraMesh, "2.0", false),
    (
        "# AmiraMesh BINARY-LITTLE-ENDIAN 2.1",
        Kind::AmiraMesh,
        "2.1",
        true,
    ),
];

/// Field names that open a counted N×3 array.
pub(crate) fn is_array_field(name: &str) -> bool {
    matches!(name, "Vertices" | "Triangles")
}

/// A compressed view of an emitted token, kept in the lookback window.
#[derive(Debug, Clone)]
enum Seen {
    Name(String),
    Number(String),
    Newline,
    Other,
}

/// A parsed ASCII table cell before the int/float promotion decision.
enum Num {
    Int(i64),
    Float(f64),
}

/// A pull-based token stream over one whole input buffer.
pub struct Tokenizer<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Lines consumed so far; the next line is `line + 1`
    line: usize,
    pending: VecDeque<Token>,
    recent: VecDeque<Seen>,
    info: FileInfo,
    bytedata: HashMap<String, Option<(String, usize)>>,
    defines: IndexMap<String, Vec<i64>>,
    started: bool,
    done: bool,
    end_emitted: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buf: &'a [u8]) -> Tokenizer<'a> {
        Tokenizer::with_options(buf, ParseOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: ParseOptions) -> Tokenizer<'a> {
        Tokenizer {
            buf,
            pos: 0,
            line: 0,
            pending: VecDeque::new(),
            recent: VecDeque::new(),
            info: FileInfo {
                kind: None,
                version: None,
                is_binary: options.binary_default,
            },
            bytedata: HashMap::new(),
            defines: IndexMap::new(),
            started: false,
            done: false,
            end_emitted: false,
        }
    }

    /// The header descriptor. Defaults apply until the first token has been
    /// pulled.
    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    /// The `define` bindings seen so far.
    pub fn defines(&self) -> &IndexMap<String, Vec<i64>> {
        &self.defines
    }

    /// Merges freshly finalized `define` entries so that later bytedata
    /// references can size themselves. The reader calls this after each
    /// top-level atom; this is the feedback edge between the tree builder
    /// and the token stream.
    pub fn add_defines<I>(&mut self, defines: I)
    where
        I: IntoIterator<Item = (String, Vec<i64>)>,
    {
        for (name, dims) in defines {
            self.defines.insert(name, dims);
        }
    }

    /// The next token. After the end of input this keeps returning
    /// [`TokenKind::End`].
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                self.note(&token);
                return Ok(token);
            }
            if self.done {
                return Ok(Token::new(TokenKind::End, self.here()));
            }
            self.refill()?;
        }
    }

    /// Header detection, the lookback window, and gated tracing.
    fn note(&mut self, token: &Token) {
        if !self.started {
            self.started = true;
            let mut matched = false;
            if let TokenKind::Comment(text) = &token.kind {
                for (header, kind, version, is_binary) in HEADERS {
                    if text == header {
                        self.info = FileInfo {
                            kind: Some(kind),
                            version: Some(version),
                            is_binary,
                        };
                        matched = true;
                        break;
                    }
                }
            }
            if !matched {
                warn!("unknown file type; parsing may fail");
            }
        }
        self.recent.push_back(match &token.kind {
            TokenKind::Name(name) => Seen::Name(name.clone()),
            TokenKind::Number(lexeme) => Seen::Number(lexeme.clone()),
            TokenKind::Newline => Seen::Newline,
            _ => Seen::Other,
        });
        while self.recent.len() > 3 {
            self.recent.pop_front();
        }
        if crate::debug_enabled() {
            match &token.kind {
                TokenKind::Bytedata(Payload::Lattice(lattice)) => {
                    debug!("token bytedata: {} bytes", lattice.len())
                }
                TokenKind::Bytedata(Payload::Table(table)) => {
                    debug!("token bytedata: {} rows", table.len())
                }
                TokenKind::Vec3Array(array) => {
                    debug!("token Vec3Array: shape {:?}", array.shape())
                }
                kind => debug!("token {:?}", kind),
            }
        }
    }

    fn here(&self) -> Span {
        Span::line(self.line, 0, 0)
    }

    /// Lexes the next chunk of input into `pending`. Runs only when the
    /// queue is empty, so the lookback window is current.
    fn refill(&mut self) -> Result<()> {
        if self.pos >= self.buf.len() {
            self.done = true;
            self.pending
                .push_back(Token::new(TokenKind::End, self.here()));
            return Ok(());
        }
        if let Some((field, lexeme)) = self.vec3_trigger() {
            return self.read_vec3(&field, &lexeme);
        }
        self.read_line()
    }

    /// Did the last three tokens form `Name(Vertices|Triangles) Number
    /// Newline`?
    fn vec3_trigger(&self) -> Option<(String, String)> {
        if self.recent.len() < 3 {
            return None;
        }
        let mut window = self.recent.iter();
        match (window.next()?, window.next()?, window.next()?) {
            (Seen::Name(name), Seen::Number(lexeme), Seen::Newline) if is_array_field(name) => {
                Some((name.clone(), lexeme.clone()))
            }
            _ => None,
        }
    }

    /// Takes the next line, without its newline. Lines and positions
    /// advance; a final line without a newline still counts.
    fn take_line(&mut self) -> Option<(usize, &'a [u8])> {
        let buf = self.buf;
        if self.pos >= buf.len() {
            return None;
        }
        let rest = &buf[self.pos..];
        let (content, next_pos) = match rest.iter().position(|&b| b == b'\n') {
            Some(idx) => (&rest[..idx], self.pos + idx + 1),
            None => (rest, buf.len()),
        };
        self.pos = next_pos;
        self.line += 1;
        Some((self.line, content))
    }

    /// Consumes a counted `Vertices`/`Triangles` payload and queues the
    /// `Vec3Array` token.
    fn read_vec3(&mut self, field: &str, lexeme: &str) -> Result<()> {
        let lineno = self.line + 1;
        let n: usize = lexeme.parse().map_err(|_| Error::Parse {
            line: self.line,
            col: 0,
            msg: format!("bad element count {:?} for {}", lexeme, field),
        })?;
        match self.info.kind {
            Some(Kind::HyperSurface) => {}
            _ => {
                return Err(Error::Parse {
                    line: lineno,
                    col: 0,
                    msg: format!("counted {} array outside a HyperSurface file", field),
                });
            }
        }
        let array = if self.info.is_binary {
            // 3 elements per row, 4 bytes per element, big-endian
            let n_bytes = n.checked_mul(12).ok_or_else(|| {
                Error::Sizing(format!("{} element count {} overflows", field, n))
            })?;
            let end = self
                .pos
                .checked_add(n_bytes)
                .filter(|&end| end <= self.buf.len())
                .ok_or_else(|| {
                    Error::Sizing(format!(
                        "{} array wants {} bytes, {} remain",
                        field,
                        n_bytes,
                        self.buf.len() - self.pos
                    ))
                })?;
            let buf = self.buf;
            let chunk = &buf[self.pos..end];
            self.pos = end;
            self.line += 1;
            if field == "Vertices" {
                Vec3Array::Float(read_be_f32_rows(chunk)?)
            } else {
                Vec3Array::Int(read_be_i32_rows(chunk)?)
            }
        } else if field == "Vertices" {
            Vec3Array::Float(self.ascii_vec3_rows::<f32>(n, field)?)
        } else {
            Vec3Array::Int(self.ascii_vec3_rows::<i32>(n, field)?)
        };
        let span = Span::line(lineno, 0, 0);
        self.pending
            .push_back(Token::new(TokenKind::Vec3Array(array), span));
        Ok(())
    }

    /// Parses `n` whitespace-separated rows of 3 elements each.
    fn ascii_vec3_rows<T>(&mut self, n: usize, field: &str) -> Result<Vec<[T; 3]>>
    where
        T: std::str::FromStr + Copy,
    {
        let mut rows = Vec::with_capacity(n);
        for _ in 0..n {
            let (lineno, raw) = self.take_line().ok_or_else(|| Error::Parse {
                line: self.line,
                col: 0,
                msg: format!("{} array truncated: expected {} rows", field, n),
            })?;
            let text = std::str::from_utf8(raw).map_err(|_| Error::Parse {
                line: lineno,
                col: 0,
                msg: format!("{} row is not valid UTF-8", field),
            })?;
            let mut row = Vec::with_capacity(3);
            for lexeme in text.split_whitespace() {
                let value: T = lexeme.parse().map_err(|_| Error::Parse {
                    line: lineno,
                    col: 0,
                    msg: format!("bad {} element {:?}", field, lexeme),
                })?;
                row.push(value);
            }
            if row.len() != 3 {
                return Err(Error::Parse {
                    line: lineno,
                    col: 0,
                    msg: format!("{} row has {} elements, expected 3", field, row.len()),
                });
            }
            rows.push([row[0], row[1], row[2]]);
        }
        Ok(rows)
    }

    /// Lexes one text line into tokens, queueing a trailing `Newline`.
    fn read_line(&mut self) -> Result<()> {
        let (lineno, raw) = match self.take_line() {
            Some(line) => line,
            None => return Ok(()),
        };
        let content = if raw.ends_with(b"\r") {
            &raw[..raw.len() - 1]
        } else {
            raw
        };
        if content.trim_ascii_start().starts_with(b"#") {
            let text = String::from_utf8_lossy(content).into_owned();
            let len = text.len();
            self.pending.push_back(Token::new(
                TokenKind::Comment(text),
                Span::line(lineno, 0, len),
            ));
            self.pending
                .push_back(Token::new(TokenKind::Newline, Span::line(lineno, len, len)));
            return Ok(());
        }
        let parts = lex::split_line(content);
        let last = parts.len().wrapping_sub(1);
        for (idx, &(col, part)) in parts.iter().enumerate() {
            let mut part = part;
            let mut trailing_comma = false;
            if idx == last && part.len() > 1 && part.ends_with(b",") {
                part = &part[..part.len() - 1];
                trailing_comma = true;
            }
            self.lex_part(lineno, col, part)?;
            if trailing_comma {
                let comma_col = col + part.len();
                self.pending.push_back(Token::new(
                    TokenKind::Comma,
                    Span::line(lineno, comma_col, comma_col + 1),
                ));
            }
        }
        let end = content.len();
        self.pending
            .push_back(Token::new(TokenKind::Newline, Span::line(lineno, end, end)));
        Ok(())
    }

    /// Classifies one part of a line. Bytedata keys at column 0 consume
    /// their payload from the buffer as a side effect.
    fn lex_part(&mut self, lineno: usize, col: usize, part: &[u8]) -> Result<()> {
        let span = Span::line(lineno, col, col + part.len());
        let kind = match part {
            b"{" => TokenKind::OpenBrace,
            b"}" => TokenKind::CloseBrace,
            b":" => TokenKind::Colon,
            b"=" => TokenKind::Equals,
            b"," => TokenKind::Comma,
            _ => {
                if lex::is_number(part) {
                    TokenKind::Number(String::from_utf8_lossy(part).into_owned())
                } else if lex::is_name(part) {
                    TokenKind::Name(String::from_utf8_lossy(part).into_owned())
                } else if lex::is_string_literal(part) {
                    TokenKind::Str(String::from_utf8_lossy(part).into_owned())
                } else if let Some(section) = lex::parse_bytedata(part) {
                    if col != 0 {
                        // a declaration inside an attribute line
                        self.bytedata.insert(
                            section.id.to_string(),
                            section
                                .info
                                .map(|(encoding, size)| (encoding.to_string(), size)),
                        );
                        TokenKind::BytedataInfo(String::from_utf8_lossy(part).into_owned())
                    } else if section.info.is_none() {
                        return self.read_bytedata(section.id, lineno, col);
                    } else {
                        return Err(Error::Parse {
                            line: lineno,
                            col,
                            msg: format!("cannot tokenize part {}", lex::lim(part)),
                        });
                    }
                } else {
                    return Err(Error::Parse {
                        line: lineno,
                        col,
                        msg: format!("cannot tokenize part {}", lex::lim(part)),
                    });
                }
            }
        };
        self.pending.push_back(Token::new(kind, span));
        Ok(())
    }

    /// Materializes the payload keyed by a column-0 `@<id>` and queues the
    /// `Bytedata` token.
    fn read_bytedata(&mut self, id: &str, lineno: usize, col: usize) -> Result<()> {
        let span = Span::line(lineno, col, col + id.len() + 1);
        if self.info.kind.is_none() {
            return Err(Error::Sizing(format!(
                "section @{} follows an unrecognized header",
                id
            )));
        }
        let declared = self.bytedata.get(id).cloned().flatten();
        let payload = if self.info.is_binary {
            let (encoding, size) = match declared {
                Some((encoding, size)) => (encoding, size),
                None => {
                    let dims = self.single_define(id)?;
                    let size = lattice_volume(id, dims)?;
                    ("raw".to_string(), size)
                }
            };
            if size == 0 {
                Payload::Lattice(Lattice {
                    dims: [0, 0, 0],
                    data: Vec::new(),
                })
            } else {
                let end = self
                    .pos
                    .checked_add(size)
                    .filter(|&end| end <= self.buf.len())
                    .ok_or_else(|| {
                        Error::Sizing(format!(
                            "section @{} declares {} bytes, only {} remain",
                            id,
                            size,
                            self.buf.len() - self.pos
                        ))
                    })?;
                let buf = self.buf;
                let chunk = &buf[self.pos..end];
                self.pos = end;
                let decoded: Cow<[u8]> = match encoding.as_str() {
                    "raw" => Cow::Borrowed(decode::raw(chunk)),
                    "HxZip" => Cow::Owned(decode::zlib(chunk)?),
                    "HxByteRLE" => Cow::Owned(decode::rle(chunk)?),
                    other => {
                        return Err(Error::Decode {
                            encoding: other.to_string(),
                            msg: "unknown encoding".to_string(),
                        });
                    }
                };
                let dims = self.lattice_dims(id)?;
                let expected = lattice_volume(id, dims)?;
                if decoded.len() != expected {
                    return Err(Error::Sizing(format!(
                        "section @{} decoded to {} bytes, lattice {:?} wants {}",
                        id,
                        decoded.len(),
                        dims,
                        expected
                    )));
                }
                Payload::Lattice(Lattice::from_zyx(dims, &decoded))
            }
        } else {
            Payload::Table(self.read_ascii_table(id)?)
        };
        self.pending
            .push_back(Token::new(TokenKind::Bytedata(payload), span));
        Ok(())
    }

    /// Reads whitespace-separated rows up to a blank line (or end of
    /// input). A single float lexeme promotes the whole table.
    fn read_ascii_table(&mut self, id: &str) -> Result<Table> {
        let mut rows: Vec<Vec<Num>> = Vec::new();
        let mut promoted = false;
        while let Some((rowno, raw)) = self.take_line() {
            let text = std::str::from_utf8(raw).map_err(|_| Error::Parse {
                line: rowno,
                col: 0,
                msg: format!("section @{} row is not valid UTF-8", id),
            })?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                break;
            }
            let mut row = Vec::new();
            for lexeme in trimmed.split_whitespace() {
                let cell = match lexeme.parse::<i64>() {
                    Ok(value) => Num::Int(value),
                    Err(_) => {
                        let value: f64 = lexeme.parse().map_err(|_| Error::Parse {
                            line: rowno,
                            col: 0,
                            msg: format!("bad element {:?} in section @{}", lexeme, id),
                        })?;
                        promoted = true;
                        Num::Float(value)
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }
        if promoted {
            let rows = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| match cell {
                            Num::Int(value) => value as f64,
                            Num::Float(value) => value,
                        })
                        .collect()
                })
                .collect();
            Ok(Table::Float(rows))
        } else {
            let rows = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| match cell {
                            Num::Int(value) => value,
                            Num::Float(_) => unreachable!(),
                        })
                        .collect()
                })
                .collect();
            Ok(Table::Int(rows))
        }
    }

    /// The dimensions of the single define entry, for an unannotated
    /// bytedata reference.
    fn single_define(&self, id: &str) -> Result<[usize; 3]> {
        let mut values = self.defines.values();
        match (values.next(), values.next()) {
            (Some(dims), None) => triple(id, dims),
            _ => Err(Error::Sizing(format!(
                "section @{} has no declaration and {} defines to size against",
                id,
                self.defines.len()
            ))),
        }
    }

    /// The `Lattice` triple that shapes binary payloads.
    fn lattice_dims(&self, id: &str) -> Result<[usize; 3]> {
        let dims = self.defines.get("Lattice").ok_or_else(|| {
            Error::Sizing(format!("section @{} needs a Lattice define for its shape", id))
        })?;
        triple(id, dims)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end_emitted {
            return None;
        }
        match self.next_token() {
            Ok(token) => {
                if matches!(token.kind, TokenKind::End) {
                    self.end_emitted = true;
                }
                Some(Ok(token))
            }
            Err(err) => {
                self.end_emitted = true;
                Some(Err(err))
            }
        }
    }
}

fn triple(id: &str, dims: &[i64]) -> Result<[usize; 3]> {
    if dims.len() != 3 {
        return Err(Error::Sizing(format!(
            "section @{} needs a 3-D define, got {:?}",
            id, dims
        )));
    }
    let mut out = [0usize; 3];
    for (slot, &dim) in out.iter_mut().zip(dims) {
        *slot = usize::try_from(dim).map_err(|_| {
            Error::Sizing(format!("section @{} has a negative dimension in {:?}", id, dims))
        })?;
    }
    Ok(out)
}

fn lattice_volume(id: &str, dims: [usize; 3]) -> Result<usize> {
    dims[0]
        .checked_mul(dims[1])
        .and_then(|xy| xy.checked_mul(dims[2]))
        .ok_or_else(|| Error::Sizing(format!("section @{} lattice {:?} overflows", id, dims)))
}

fn read_be_f32_rows(chunk: &[u8]) -> Result<Vec<[f32; 3]>> {
    let mut offset = 0;
    let mut rows = Vec::with_capacity(chunk.len() / 12);
    while offset < chunk.len() {
        let x: f32 = chunk.gread_with(&mut offset, scroll::BE)?;
        let y: f32 = chunk.gread_with(&mut offset, scroll::BE)?;
        let z: f32 = chunk.gread_with(&mut offset, scroll::BE)?;
        rows.push([x, y, z]);
    }
    Ok(rows)
}

fn read_be_i32_rows(chunk: &[u8]) -> Result<Vec<[i32; 3]>> {
    let mut offset = 0;
    let mut rows = Vec::with_capacity(chunk.len() / 12);
    while offset < chunk.len() {
        let x: i32 = chunk.gread_with(&mut offset, scroll::BE)?;
        let y: i32 = chunk.gread_with(&mut offset, scroll::BE)?;
        let z: i32 = chunk.gread_with(&mut offset, scroll::BE)?;
        rows.push([x, y, z]);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        Tokenizer::new(input)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    #[test]
    fn header_detection() {
        let mut tokenizer = Tokenizer::new(b"# AmiraMesh BINARY-LITTLE-ENDIAN 2.1\n");
        tokenizer.next_token().unwrap();
        let info = tokenizer.info();
        assert_eq!(info.kind, Some(Kind::AmiraMesh));
        assert_eq!(info.version, Some("2.1"));
        assert!(info.is_binary);
    }

    #[test]
    fn unknown_header_keeps_defaults() {
        let mut tokenizer = Tokenizer::new(b"# FooMesh 9.9\n");
        tokenizer.next_token().unwrap();
        let info = tokenizer.info();
        assert_eq!(info.kind, None);
        assert_eq!(info.version, None);
        assert!(!info.is_binary);
    }

    #[test]
    fn line_tokens() {
        let toks = kinds(b"# AmiraMesh 3D ASCII 2.0\ndefine Lattice 2 3 4\n");
        assert_eq!(
            toks,
            [
                TokenKind::Comment("# AmiraMesh 3D ASCII 2.0".to_string()),
                TokenKind::Newline,
                TokenKind::Name("define".to_string()),
                TokenKind::Name("Lattice".to_string()),
                TokenKind::Number("2".to_string()),
                TokenKind::Number("3".to_string()),
                TokenKind::Number("4".to_string()),
                TokenKind::Newline,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn trailing_comma_splits_off_the_value() {
        let toks = kinds(b"# AmiraMesh 3D ASCII 2.0\nBoundingBox 0 1,\n");
        assert_eq!(
            toks[2..6],
            [
                TokenKind::Name("BoundingBox".to_string()),
                TokenKind::Number("0".to_string()),
                TokenKind::Number("1".to_string()),
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn bytedata_info_registers_off_column_zero() {
        let toks = kinds(b"# AmiraMesh 3D ASCII 2.0\nLattice { byte Labels } @1(HxZip,10)\n");
        assert!(toks.contains(&TokenKind::BytedataInfo("@1(HxZip,10)".to_string())));
    }

    #[test]
    fn unknown_header_refuses_payload_keys() {
        let mut tokenizer = Tokenizer::new(b"# FooMesh 9.9\n@1\n\x00\x01");
        let err = loop {
            match tokenizer.next_token() {
                Ok(token) if token.kind == TokenKind::End => panic!("expected a sizing error"),
                Ok(_) => continue,
                Err(err) => break err,
            }
        };
        assert!(matches!(err, Error::Sizing(_)));
    }

    #[test]
    fn binary_vertices_are_big_endian() {
        let mut input = b"# HyperSurface 0.1 BINARY\nVertices 1\n".to_vec();
        for value in [-1.0f32, 0.5, 2.0] {
            input.extend_from_slice(&value.to_be_bytes());
        }
        input.push(b'\n');
        let toks = kinds(&input);
        let array = toks
            .iter()
            .find_map(|kind| match kind {
                TokenKind::Vec3Array(array) => Some(array.clone()),
                _ => None,
            })
            .expect("a Vec3Array token");
        assert_eq!(array, Vec3Array::Float(vec![[-1.0, 0.5, 2.0]]));
    }

    #[test]
    fn counted_arrays_need_a_hypersurface() {
        let mut tokenizer = Tokenizer::new(b"# AmiraMesh 3D ASCII 2.0\nVertices 1\n1 2 3\n");
        let err = loop {
            match tokenizer.next_token() {
                Ok(token) if token.kind == TokenKind::End => panic!("expected a parse error"),
                Ok(_) => continue,
                Err(err) => break err,
            }
        };
        assert!(matches!(err, Error::Parse { .. }));
    }
}
