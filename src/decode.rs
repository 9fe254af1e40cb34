//! Decoders for binary lattice payloads.
//!
//! AmiraMesh stores its lattice sections either verbatim (`raw`), deflated
//! with a zlib wrapper (`HxZip`), or run-length packed a byte at a time
//! (`HxByteRLE`). All three decoders map a byte slice to the uncompressed
//! bytes; the tokenizer picks one based on the bytedata declaration.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

/// Identity decode for `raw` payloads.
pub fn raw(buf: &[u8]) -> &[u8] {
    buf
}

/// Inflates an `HxZip` payload (DEFLATE with a zlib wrapper).
pub fn zlib(buf: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(buf)
        .read_to_end(&mut out)
        .map_err(|err| Error::Decode {
            encoding: "HxZip".to_string(),
            msg: err.to_string(),
        })?;
    Ok(out)
}

/// Decodes an `HxByteRLE` payload.
///
/// The stream is a sequence of runs, each led by a control byte `c`:
/// `c == 0` terminates the stream, `1..=127` repeats the following byte `c`
/// times, and `c > 127` copies the next `c - 128` bytes literally. A run
/// cut short by the end of the payload is an error.
pub fn rle(buf: &[u8]) -> Result<Vec<u8>> {
    let truncated = |idx: usize| Error::Decode {
        encoding: "HxByteRLE".to_string(),
        msg: format!("run truncated at byte {}", idx),
    };
    let mut out = Vec::new();
    let mut idx = 0;
    while idx < buf.len() {
        let control = buf[idx];
        idx += 1;
        if control == 0 {
            break;
        } else if control <= 127 {
            let byte = *buf.get(idx).ok_or_else(|| truncated(idx))?;
            idx += 1;
            out.extend(std::iter::repeat(byte).take(control as usize));
        } else {
            let count = (control - 128) as usize;
            let literal = buf
                .get(idx..idx + count)
                .ok_or_else(|| truncated(buf.len()))?;
            out.extend_from_slice(literal);
            idx += count;
        }
    }
    Ok(out)
}
