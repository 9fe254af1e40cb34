//! Parsing options for the Amira reader.
//!
//! There is exactly one knob: what to assume about a file whose header
//! comment is not one of the known Amira signatures.

/// If the header comment does not say, treat the file as binary?
pub const BINARY_DEFAULT: bool = false;

/// Common parsing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// The binary-mode assumption used when the header is unrecognized
    pub binary_default: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            binary_default: BINARY_DEFAULT,
        }
    }
}

impl ParseOptions {
    /// Set the fallback binary-mode assumption
    pub fn with_binary_default(mut self, binary_default: bool) -> Self {
        self.binary_default = binary_default;
        self
    }
}
