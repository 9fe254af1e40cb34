//! A custom Amira error and result type used by everything

use core::fmt;
use core::result;
use std::error;
use std::io;

#[derive(Debug)]
/// A custom Amira error
pub enum Error {
    /// The byte source could not be read
    Io(io::Error),
    /// A sized binary read failed
    Scroll(scroll::Error),
    /// An unrecognized token, or a token out of place
    Parse {
        /// 1-based line of the offending bytes
        line: usize,
        /// 0-based column of the offending bytes
        col: usize,
        /// What went wrong
        msg: String,
    },
    /// A binary payload failed to decode
    Decode {
        /// The payload encoding, as declared in the file
        encoding: String,
        /// What went wrong
        msg: String,
    },
    /// A bytedata reference could not be sized against its declaration or the defines
    Sizing(String),
    /// The same key appeared twice within a single block
    DuplicateKey {
        /// The repeated key
        key: String,
        /// The enclosing block
        block: String,
    },
    /// The entity is malformed in some way
    Malformed(String),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Scroll(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Error {
        Error::Scroll(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(fmt, "{}", err),
            Error::Scroll(err) => write!(fmt, "{}", err),
            Error::Parse { line, col, msg } => {
                write!(fmt, "parse error at line {}, column {}: {}", line, col, msg)
            }
            Error::Decode { encoding, msg } => {
                write!(fmt, "cannot decode {} payload: {}", encoding, msg)
            }
            Error::Sizing(msg) => write!(fmt, "cannot size bytedata section: {}", msg),
            Error::DuplicateKey { key, block } => {
                write!(fmt, "duplicate key {:?} in block {:?}", key, block)
            }
            Error::Malformed(msg) => write!(fmt, "malformed entity: {}", msg),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
