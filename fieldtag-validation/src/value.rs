// Runtime value model

use crate::Record;
use std::fmt;

/// Semantic kind of an inspected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No value at all (an absent or untyped field)
    Invalid,
    /// Boolean
    Bool,
    /// Signed integer family
    Int,
    /// Unsigned integer family
    Uint,
    /// Floating point family
    Float,
    /// UTF-8 text
    String,
    /// Sequences, sets and maps
    Collection,
    /// Nullable or owning indirection
    Pointer,
    /// A nested record
    Struct,
}

impl Kind {
    /// Get kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Collection => "collection",
            Kind::Pointer => "pointer",
            Kind::Struct => "struct",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value as seen by rule functions.
///
/// Numeric families are widened to 64 bits, collections are reduced to
/// their element count and pointers carry their pointee (or `None` when nil).
#[derive(Clone)]
pub enum Value<'a> {
    Invalid,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    Collection(usize),
    Pointer(Option<Box<Value<'a>>>),
    Struct(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Wrap an optional pointee into a pointer value.
    pub fn pointer(target: Option<Value<'a>>) -> Self {
        Value::Pointer(target.map(Box::new))
    }

    /// Nil pointer.
    pub fn nil() -> Self {
        Value::Pointer(None)
    }

    /// Get the semantic kind.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Invalid => Kind::Invalid,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Collection(_) => Kind::Collection,
            Value::Pointer(_) => Kind::Pointer,
            Value::Struct(_) => Kind::Struct,
        }
    }

    /// Check if this is a nil pointer.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Pointer(None))
    }

    /// Follow one level of pointer indirection.
    ///
    /// Returns `None` for a nil pointer and `self` for anything that is not
    /// a pointer.
    pub fn indirect(&self) -> Option<&Value<'a>> {
        match self {
            Value::Pointer(Some(inner)) => Some(inner.as_ref()),
            Value::Pointer(None) => None,
            other => Some(other),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Element count of a collection.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            Value::Collection(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Value::Struct(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => f.write_str("Invalid"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Collection(n) => f.debug_tuple("Collection").field(n).finish(),
            Value::Pointer(p) => f.debug_tuple("Pointer").field(p).finish(),
            Value::Struct(r) => f.debug_tuple("Struct").field(&r.record_name()).finish(),
        }
    }
}

/// A single declared field of a record.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Declared field name
    pub name: &'static str,

    /// Tag strings keyed by tag name, in declaration order
    pub tags: &'static [(&'static str, &'static str)],

    /// Current value
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    pub fn new(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        value: Value<'a>,
    ) -> Self {
        Self { name, tags, value }
    }

    /// Get the tag registered under `key`, first occurrence wins.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}
