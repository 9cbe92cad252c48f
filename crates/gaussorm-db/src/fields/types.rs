//! Field kinds and descriptors.
//!
//! [`FieldKind`] is the closed set of logical value kinds the reflection layer
//! can report. Only some kinds have a column type in a given dialect; the rest
//! exist so that an unsupported field is reported by name instead of being
//! silently mapped.

use serde::{Deserialize, Serialize};

use super::tags::{self, TagSettings};

/// The logical kind of a field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FieldKind {
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Pointer-sized signed integer.
    Int,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// Pointer-sized unsigned integer.
    Uint,
    /// Unsigned integer wide enough to hold an address.
    Uintptr,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    String,
    /// A point in time.
    Timestamp,
    /// Any other structured value.
    Struct {
        /// The host type name.
        type_name: String,
    },
    /// A key/value map.
    Map {
        /// The host type name, e.g. `Hstore`.
        type_name: String,
    },
    /// A byte sequence, fixed-length when `fixed_len` is set.
    Bytes {
        /// The host type name, e.g. `Uuid` or `RawValue`.
        type_name: Option<String>,
        /// The array length for fixed-size byte arrays.
        fixed_len: Option<usize>,
    },
    /// A sequence of non-byte elements.
    Sequence {
        /// The host type name.
        type_name: String,
    },
    /// Complex number made of two 32-bit floats.
    Complex64,
    /// Complex number made of two 64-bit floats.
    Complex128,
    /// A channel.
    Channel,
    /// A function value.
    Function,
    /// A dynamically-typed value.
    Interface,
}

impl FieldKind {
    /// Creates a variable-length byte kind.
    pub fn bytes() -> Self {
        Self::Bytes {
            type_name: None,
            fixed_len: None,
        }
    }

    /// Creates a named byte kind, e.g. a JSON raw value.
    pub fn named_bytes(type_name: impl Into<String>) -> Self {
        Self::Bytes {
            type_name: Some(type_name.into()),
            fixed_len: None,
        }
    }

    /// Creates a named fixed-length byte array kind, e.g. a 16-byte `Uuid`.
    pub fn byte_array(type_name: impl Into<String>, len: usize) -> Self {
        Self::Bytes {
            type_name: Some(type_name.into()),
            fixed_len: Some(len),
        }
    }

    /// Returns the short name of this kind as used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Int => "int",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uint => "uint",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Timestamp | Self::Struct { .. } => "struct",
            Self::Map { .. } => "map",
            Self::Bytes {
                fixed_len: Some(_), ..
            } => "array",
            Self::Bytes { .. } | Self::Sequence { .. } => "slice",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Channel => "chan",
            Self::Function => "func",
            Self::Interface => "interface",
        }
    }

    /// Returns the host type name, falling back to the kind name for unnamed kinds.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Timestamp => "Timestamp",
            Self::Struct { type_name }
            | Self::Map { type_name }
            | Self::Sequence { type_name }
            | Self::Bytes {
                type_name: Some(type_name),
                ..
            } => type_name,
            _ => self.kind_name(),
        }
    }
}

/// A change a dialect asks the caller to make to a [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAmendment {
    /// Set a tag on the field.
    SetTag {
        /// The tag key.
        key: String,
        /// The tag value.
        value: String,
    },
}

impl FieldAmendment {
    /// The amendment recording that the column was given an auto-incrementing type.
    pub fn auto_increment() -> Self {
        Self::SetTag {
            key: tags::AUTO_INCREMENT.to_string(),
            value: tags::AUTO_INCREMENT.to_string(),
        }
    }
}

/// Everything a dialect needs to know about one model field.
///
/// Descriptors are produced once by the schema-reflection layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The field name.
    pub name: String,
    /// The logical value kind.
    pub kind: FieldKind,
    /// Whether this field is the primary key.
    pub is_primary_key: bool,
    /// The field's tag settings.
    pub tag_settings: TagSettings,
}

impl FieldDescriptor {
    /// Creates a descriptor with no tags that is not a primary key.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_primary_key: false,
            tag_settings: TagSettings::new(),
        }
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Merges a tag string such as `"size:64;not null"` into the tag settings.
    #[must_use]
    pub fn tags(mut self, tag: &str) -> Self {
        self.tag_settings.merge_str(tag);
        self
    }

    /// Sets a single tag.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tag_settings.set(key, value);
        self
    }

    /// Sets an explicit SQL type that bypasses kind-based resolution.
    #[must_use]
    pub fn sql_type(self, sql_type: impl Into<String>) -> Self {
        self.tag(tags::TYPE, sql_type)
    }

    /// Declares the column size.
    #[must_use]
    pub fn size(self, size: i64) -> Self {
        self.tag(tags::SIZE, size.to_string())
    }

    /// Applies amendments returned by a dialect.
    pub fn apply(&mut self, amendments: &[FieldAmendment]) {
        for amendment in amendments {
            match amendment {
                FieldAmendment::SetTag { key, value } => {
                    self.tag_settings.set(key.clone(), value.clone());
                }
            }
        }
    }
}
