//! # amira
//!
//! An Amira scientific file parsing crate: `AmiraMesh` volumetric lattices
//! and `HyperSurface` triangular meshes, ASCII or little-endian binary.
//!
//! A file parses into a [`Document`]: the header descriptor plus the
//! ordered top-level declarations, i.e. parameter blocks, `define`
//! bindings, materials tables, vertex and triangle arrays, and decoded
//! lattice payloads.
//!
//! ```no_run
//! fn run() -> amira::Result<()> {
//!     let doc = amira::read("LHMask.am")?;
//!     if let Some(lattice) = doc.lattice() {
//!         println!("lattice: {:?}", lattice.dims);
//!     }
//!     for material in doc.materials()? {
//!         println!("{} -> {:?}", material.name, material.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Setting the environment variable `DEBUG_AMIRA` to a non-zero number
//! turns on verbose tokenizer and tree tracing through the [`log`] facade;
//! install a logger such as `stderrlog` to see it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::warn;

pub mod atom;
pub mod decode;
pub mod error;
pub mod lex;
pub mod options;
pub mod token;
pub mod tokenizer;
mod tree;

pub use crate::atom::{Atom, Block, Lattice, Payload, Table, Vec3Array};
pub use crate::error::{Error, Result};
pub use crate::options::ParseOptions;
pub use crate::tokenizer::{FileInfo, Kind, Tokenizer};

use crate::token::TokenKind;

/// Is `DEBUG_AMIRA` set to a truthy number? Evaluated once per process.
pub(crate) fn debug_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("DEBUG_AMIRA")
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(|value| value != 0)
            .unwrap_or(false)
    })
}

/// A parsed Amira file.
///
/// `data` holds the top-level atoms in file order; most are single-key
/// blocks such as `{Parameters: …}`, `{define: …}`, `{Vertices: …}` or
/// `{data: …}`. The locator methods below cover what downstream tools
/// actually look up.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub info: FileInfo,
    pub data: Vec<Atom>,
}

/// A named material and its id, explicit or guessed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub id: Option<i64>,
}

impl Document {
    pub fn is_hypersurface(&self) -> bool {
        self.info.kind == Some(Kind::HyperSurface)
    }

    /// Flattens the top-level blocks into one view, in order. Later keys
    /// overwrite earlier ones, keeping the earlier position.
    pub fn merged(&self) -> Block {
        let mut merged = Block::default();
        for atom in &self.data {
            if let Atom::Block(block) = atom {
                for (key, value) in block.iter() {
                    merged.0.insert(key.to_string(), value.cloned());
                }
            }
        }
        merged
    }

    fn top_level(&self, key: &str) -> Option<&Atom> {
        self.data
            .iter()
            .find_map(|atom| atom.as_block().and_then(|block| block.get(key)))
    }

    /// The decoded lattice payload of a binary AmiraMesh file.
    pub fn lattice(&self) -> Option<&Lattice> {
        self.top_level("data").and_then(Atom::as_lattice)
    }

    /// The vertex table of a HyperSurface file.
    pub fn vertices(&self) -> Option<&Vec3Array> {
        self.top_level("Vertices").and_then(Atom::as_vec3)
    }

    /// The triangle table of a HyperSurface file.
    pub fn triangles(&self) -> Option<&Vec3Array> {
        self.top_level("Triangles").and_then(Atom::as_vec3)
    }

    /// The `Parameters` block.
    pub fn parameters(&self) -> Option<&Block> {
        self.top_level("Parameters").and_then(Atom::as_block)
    }

    /// A `define NAME n1 n2 …` binding, as integers.
    pub fn define(&self, name: &str) -> Option<Vec<i64>> {
        self.data.iter().find_map(|atom| {
            atom.as_block()?
                .get("define")?
                .as_block()?
                .get(name)?
                .as_i64_seq()
        })
    }

    /// The ordered materials table.
    ///
    /// Materials without an explicit `Id` get positional ids (1-based)
    /// until the first material that declares one; from there on ids are
    /// no longer guessed. Ids, explicit or guessed, must be unique across
    /// the whole table.
    pub fn materials(&self) -> Result<Vec<Material>> {
        let table = match self
            .parameters()
            .and_then(|parameters| parameters.get("Materials"))
            .and_then(Atom::as_block)
        {
            Some(table) => table,
            None => return Ok(Vec::new()),
        };
        let mut materials = Vec::with_capacity(table.len());
        let mut ok_to_guess = true;
        for (index, (name, value)) in table.iter().enumerate() {
            let explicit = value
                .and_then(Atom::as_block)
                .and_then(|block| block.get("Id").or_else(|| block.get("id")))
                .and_then(Atom::as_int);
            let id = match explicit {
                Some(id) => {
                    ok_to_guess = false;
                    Some(id)
                }
                None if ok_to_guess => Some(index as i64 + 1),
                None => None,
            };
            materials.push(Material {
                name: name.to_string(),
                id,
            });
        }
        let mut seen = HashSet::new();
        for material in &materials {
            if let Some(id) = material.id {
                if !seen.insert(id) {
                    return Err(Error::DuplicateKey {
                        key: id.to_string(),
                        block: "Materials".to_string(),
                    });
                }
            }
        }
        Ok(materials)
    }
}

/// Is this document a HyperSurface mesh?
pub fn is_hypersurface(doc: &Document) -> bool {
    doc.is_hypersurface()
}

/// Reads and parses the Amira file at `path`.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Document> {
    let buf = fs::read(path)?;
    read_stream(&buf)
}

/// Reads a `.surf` HyperSurface file and returns its top-level data.
pub fn read_surf<P: AsRef<Path>>(path: P) -> Result<Vec<Atom>> {
    let doc = read(path)?;
    if !doc.is_hypersurface() {
        return Err(Error::Malformed("not a HyperSurface file".to_string()));
    }
    Ok(doc.data)
}

/// Parses a whole in-memory Amira byte stream.
pub fn read_stream(buf: &[u8]) -> Result<Document> {
    read_stream_with(buf, ParseOptions::default())
}

/// Parses with explicit options.
///
/// One call reads one file end to end; there is no streaming across
/// calls. Finalized `define` entries are fed back into the tokenizer so
/// later bytedata references can size themselves against the lattice.
pub fn read_stream_with(buf: &[u8], options: ParseOptions) -> Result<Document> {
    let mut tokenizer = Tokenizer::with_options(buf, options);
    let mut data = Vec::new();
    let mut token = tokenizer.next_token()?;
    while !matches!(token.kind, TokenKind::End) {
        let (value, _) = tree::atom(&mut tokenizer, token, 0, false, "{")?;
        if let Some(atom) = value {
            if let Atom::Block(ref block) = atom {
                if let Some(Atom::Block(defines)) = block.get("define") {
                    tokenizer.add_defines(collect_defines(defines));
                }
            }
            data.push(atom);
        }
        token = tokenizer.next_token()?;
    }
    Ok(Document {
        info: tokenizer.info().clone(),
        data,
    })
}

fn collect_defines(defines: &Block) -> Vec<(String, Vec<i64>)> {
    let mut out = Vec::with_capacity(defines.len());
    for (name, value) in defines.iter() {
        match value.and_then(Atom::as_i64_seq) {
            Some(dims) => out.push((name.to_string(), dims)),
            None => warn!("define {} does not bind integer dimensions; ignoring", name),
        }
    }
    out
}
