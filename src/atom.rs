//! The parsed building blocks of an Amira document.
//!
//! On disk the format is dynamically shaped: blocks of anything mapping
//! to anything. The reader models a parsed value as the [`Atom`] sum type
//! and lets consumers pattern-match or go through the `as_*` accessors.

use indexmap::IndexMap;

/// An N×3 table of vertex coordinates or triangle indices.
///
/// `Vertices` rows are `f32`, `Triangles` rows are `i32`, in the ASCII and
/// binary variants alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Vec3Array {
    Float(Vec<[f32; 3]>),
    Int(Vec<[i32; 3]>),
}

impl Vec3Array {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Vec3Array::Float(rows) => rows.len(),
            Vec3Array::Int(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `[rows, 3]`.
    pub fn shape(&self) -> [usize; 2] {
        [self.len(), 3]
    }
}

/// A 3-D `u8` lattice, indexed `[x, y, z]`.
///
/// On disk the payload is laid out `[nz, ny, nx]`; construction transposes
/// it so that `dims` reads `[nx, ny, nz]` and `get(x, y, z)` matches the
/// axis order every downstream tool expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// `[nx, ny, nz]`
    pub dims: [usize; 3],
    /// C-order over `dims`
    pub data: Vec<u8>,
}

impl Lattice {
    /// Builds the lattice from a decoded payload in the on-disk
    /// `[nz, ny, nx]` layout.
    pub(crate) fn from_zyx(dims: [usize; 3], raw: &[u8]) -> Lattice {
        let [nx, ny, nz] = dims;
        let mut data = vec![0u8; raw.len()];
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    data[(x * ny + y) * nz + z] = raw[(z * ny + y) * nx + x];
                }
            }
        }
        Lattice { dims, data }
    }

    /// The voxel at `[x, y, z]`, or `None` outside `dims`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        let [nx, ny, nz] = self.dims;
        if x >= nx || y >= ny || z >= nz {
            return None;
        }
        Some(self.data[(x * ny + y) * nz + z])
    }

    /// Total number of voxels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An ASCII lattice payload: one row of numbers per input line, shape left
/// to the consumer. A single float lexeme promotes the whole table to
/// floats.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Int(Vec<Vec<i64>>),
    Float(Vec<Vec<f64>>),
}

impl Table {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Table::Int(rows) => rows.len(),
            Table::Float(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a bytedata section materializes into.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded binary lattice
    Lattice(Lattice),
    /// Whitespace-separated ASCII rows
    Table(Table),
}

/// A parsed value: a scalar, an ordered block, a list, or one of the array
/// payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Int(i64),
    Float(f64),
    /// A string literal as it appeared in the file, quotes included
    Str(String),
    /// A bare identifier
    Ident(String),
    List(Vec<Atom>),
    Block(Block),
    Vec3(Vec3Array),
    Lattice(Lattice),
    Table(Table),
}

impl Atom {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Atom::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Atom::Float(value) => Some(*value),
            Atom::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Atom::Str(value) | Atom::Ident(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Atom::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Atom]> {
        match self {
            Atom::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<&Vec3Array> {
        match self {
            Atom::Vec3(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_lattice(&self) -> Option<&Lattice> {
        match self {
            Atom::Lattice(lattice) => Some(lattice),
            _ => None,
        }
    }

    /// The atom as a sequence of integers: a lone `Int` counts as a
    /// one-element sequence. This is the shape `define` entries take.
    pub fn as_i64_seq(&self) -> Option<Vec<i64>> {
        match self {
            Atom::Int(value) => Some(vec![*value]),
            Atom::List(items) => items.iter().map(Atom::as_int).collect(),
            _ => None,
        }
    }
}

/// An ordered mapping from identifiers to atoms.
///
/// Iteration follows insertion order; Materials ordering in particular is
/// observable downstream, where ids are guessed by position. A bare
/// identifier inside a block becomes a key with no value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(pub IndexMap<String, Option<Atom>>);

impl Block {
    /// The value under `key`, flattening the valueless-key case to `None`.
    pub fn get(&self, key: &str) -> Option<&Atom> {
        self.0.get(key).and_then(|value| value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Atom>)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Inserts unless the key is already present; reports whether it was
    /// inserted.
    pub(crate) fn insert(&mut self, key: String, value: Option<Atom>) -> bool {
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    /// Builds a single-entry block.
    pub(crate) fn single(key: String, value: Option<Atom>) -> Block {
        let mut entries = IndexMap::new();
        entries.insert(key, value);
        Block(entries)
    }
}
