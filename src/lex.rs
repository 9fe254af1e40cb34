//! Lexical recognizers for the line-oriented layer of an Amira file.
//!
//! Each predicate classifies a whole byte slice; partial matches do not
//! count. The slices come out of [`split_line`], which cuts a line on
//! blanks while keeping a quoted span in one piece.

/// A parsed `@<id>` or `@<id>(<encoding>,<size>)` slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BytedataRef<'a> {
    /// The data section id, a run of digits
    pub id: &'a str,
    /// Declared encoding and byte size, when annotated
    pub info: Option<(&'a str, usize)>,
}

#[inline]
fn digits(part: &[u8]) -> usize {
    part.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Matches `"…"` (the quotes stay part of the lexeme).
pub fn is_string_literal(part: &[u8]) -> bool {
    part.len() >= 2 && part[0] == b'"' && part[part.len() - 1] == b'"'
}

/// Matches `[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?`.
pub fn is_number(part: &[u8]) -> bool {
    let n = part.len();
    let mut i = 0;
    if i < n && (part[i] == b'+' || part[i] == b'-') {
        i += 1;
    }
    let int_digits = digits(&part[i..]);
    i += int_digits;
    if int_digits > 0 {
        if i < n && part[i] == b'.' {
            i += 1;
            i += digits(&part[i..]);
        }
    } else {
        if i >= n || part[i] != b'.' {
            return false;
        }
        i += 1;
        let frac_digits = digits(&part[i..]);
        if frac_digits == 0 {
            return false;
        }
        i += frac_digits;
    }
    if i < n && (part[i] == b'e' || part[i] == b'E') {
        i += 1;
        if i < n && (part[i] == b'+' || part[i] == b'-') {
            i += 1;
        }
        let exp_digits = digits(&part[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }
    i == n
}

/// Matches `[A-Za-z0-9_]+(\[\d\])?`, an identifier with an optional
/// single-digit index.
pub fn is_name(part: &[u8]) -> bool {
    let n = part.len();
    let mut i = 0;
    while i < n && (part[i].is_ascii_alphanumeric() || part[i] == b'_') {
        i += 1;
    }
    if i == 0 {
        return false;
    }
    if i == n {
        return true;
    }
    i + 3 == n && part[i] == b'[' && part[i + 1].is_ascii_digit() && part[i + 2] == b']'
}

/// Matches `@<digits>`, the bare form that keys a payload at column 0.
pub fn is_bytedata_key(part: &[u8]) -> bool {
    part.len() >= 2 && part[0] == b'@' && digits(&part[1..]) == part.len() - 1
}

/// Matches `@<digits>` or `@<digits>(<word>,<digits>)` and pulls the pieces
/// apart. Returns `None` when the slice is anything else.
pub fn parse_bytedata(part: &[u8]) -> Option<BytedataRef<'_>> {
    let rest = part.strip_prefix(b"@")?;
    let id_len = digits(rest);
    if id_len == 0 {
        return None;
    }
    let id = std::str::from_utf8(&rest[..id_len]).ok()?;
    let rest = &rest[id_len..];
    if rest.is_empty() {
        return Some(BytedataRef { id, info: None });
    }
    let rest = rest.strip_prefix(b"(")?;
    let word_len = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if word_len == 0 {
        return None;
    }
    let encoding = std::str::from_utf8(&rest[..word_len]).ok()?;
    let rest = rest[word_len..].strip_prefix(b",")?;
    let size_len = digits(rest);
    if size_len == 0 || &rest[size_len..] != b")" {
        return None;
    }
    let size: usize = std::str::from_utf8(&rest[..size_len]).ok()?.parse().ok()?;
    Some(BytedataRef {
        id,
        info: Some((encoding, size)),
    })
}

/// Splits a line (already stripped of its newline) into `(column, part)`
/// pairs. A quoted span, from the first `"` on the line through the last,
/// is kept as a single part; everything around it is cut on blanks.
pub fn split_line(line: &[u8]) -> Vec<(usize, &[u8])> {
    let first_quote = line.iter().position(|&b| b == b'"');
    let last_quote = line.iter().rposition(|&b| b == b'"');
    if let (Some(q1), Some(q2)) = (first_quote, last_quote) {
        if q1 < q2 {
            let mut parts = split_plain(&line[..q1], 0);
            parts.push((q1, &line[q1..=q2]));
            parts.extend(split_plain(&line[q2 + 1..], q2 + 1));
            return parts;
        }
    }
    split_plain(line, 0)
}

fn split_plain(chunk: &[u8], base: usize) -> Vec<(usize, &[u8])> {
    let blank = |b: u8| matches!(b, b' ' | b'\t' | b'\r');
    let mut parts = Vec::new();
    let mut i = 0;
    while i < chunk.len() {
        if blank(chunk[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < chunk.len() && !blank(chunk[i]) {
            i += 1;
        }
        parts.push((base + start, &chunk[start..i]));
    }
    parts
}

/// Renders a byte slice for an error message, truncated past 100 characters.
pub(crate) fn lim(part: &[u8]) -> String {
    let full = format!("{:?}", String::from_utf8_lossy(part));
    if full.chars().count() > 100 {
        let head: String = full.chars().take(97).collect();
        format!("{}...", head)
    } else {
        full
    }
}
