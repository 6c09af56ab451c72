//! Dynamic value model for visualization records.
//!
//! Records arriving from a log provider are dynamically shaped trees: string
//! keys over numbers, strings, nested mappings, sequences, typed numeric
//! buffers and raw binary blobs. [`Value`] is the owned, tagged representation
//! of one node in such a tree.

use std::fmt;

/// A typed numeric buffer view (contiguous elements of one numeric type).
///
/// Sensor pipelines hand over point and color data as typed buffers rather
/// than element-wise sequences. Canonicalization materializes these into
/// plain number sequences before encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericBuffer {
    /// Unsigned 8-bit elements
    Uint8(Vec<u8>),
    /// Signed 8-bit elements
    Int8(Vec<i8>),
    /// Unsigned 16-bit elements
    Uint16(Vec<u16>),
    /// Signed 16-bit elements
    Int16(Vec<i16>),
    /// Unsigned 32-bit elements
    Uint32(Vec<u32>),
    /// Signed 32-bit elements
    Int32(Vec<i32>),
    /// 32-bit floating point elements
    Float32(Vec<f32>),
    /// 64-bit floating point elements
    Float64(Vec<f64>),
}

impl NumericBuffer {
    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Self::Uint8(v) => v.len(),
            Self::Int8(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Check if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the buffer into a plain sequence of number values.
    pub fn to_numbers(&self) -> Vec<Value> {
        match self {
            Self::Uint8(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Int8(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Uint16(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Int16(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Uint32(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Int32(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Float32(v) => v.iter().map(|n| Value::Number(f64::from(*n))).collect(),
            Self::Float64(v) => v.iter().map(|n| Value::Number(*n)).collect(),
        }
    }
}

/// Insertion-ordered string-keyed mapping.
///
/// Key order is preserved so the encoded output matches the record as built.
/// Lookups scan the entry list; record mappings are small enough that this
/// beats hashing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing an existing entry with the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        for (k, v) in &mut self.entries {
            if k == &key {
                *v = value;
                return;
            }
        }
        self.entries.push((key, value));
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One node of a record tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent / null value
    Null,
    /// Boolean
    Bool(bool),
    /// Numeric value (all numbers are carried as f64)
    Number(f64),
    /// UTF-8 text
    Text(String),
    /// Ordered sequence of values
    Sequence(Vec<Value>),
    /// String-keyed mapping
    Mapping(Mapping),
    /// Typed numeric buffer view
    Buffer(NumericBuffer),
    /// Raw binary payload (image data and other opaque bytes)
    Blob(Vec<u8>),
}

impl Value {
    /// Check if this is the null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text value, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the element slice, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the mapping, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Get the raw bytes, if this is a blob.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Look up a key, if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Create a blob value from raw bytes.
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Blob(bytes.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Sequence(items) => write!(f, "sequence[{}]", items.len()),
            Self::Mapping(map) => write!(f, "mapping[{}]", map.len()),
            Self::Buffer(buf) => write!(f, "buffer[{}]", buf.len()),
            Self::Blob(bytes) => write!(f, "blob[{}]", bytes.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<NumericBuffer> for Value {
    fn from(buf: NumericBuffer) -> Self {
        Self::Buffer(buf)
    }
}
