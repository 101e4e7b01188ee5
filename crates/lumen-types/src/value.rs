//! Tagged value storage
//!
//! A [`Value`] is the storage representation of one slot in a type-erased
//! parameter list: plain value types are stored inline, object references
//! are stored as opaque [`Handle`]s. Every value carries its [`TypeCode`]
//! and converts to and from the canonical textual form.

use std::fmt;

use crate::code::TypeCode;

/// Opaque reference to an engine-side object.
///
/// The runtime never dereferences handles; it only moves them through
/// parameter slots. `0` is the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Handle(pub u64);

impl Handle {
    /// The null handle
    pub const NULL: Handle = Handle(0);

    /// Whether this is the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tagged variant over the supported primitive set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / unit value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 8-bit integer
    Int8(i8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Heap-allocated string
    Str(String),
    /// Opaque object handle
    Handle(Handle),
}

impl Value {
    /// Type code of the stored value
    pub fn type_code(&self) -> TypeCode {
        match self {
            Value::Null => TypeCode::Null,
            Value::Bool(_) => TypeCode::Bool,
            Value::Int8(_) => TypeCode::Int8,
            Value::Int16(_) => TypeCode::Int16,
            Value::Int32(_) => TypeCode::Int32,
            Value::Int64(_) => TypeCode::Int64,
            Value::UInt8(_) => TypeCode::UInt8,
            Value::UInt16(_) => TypeCode::UInt16,
            Value::UInt32(_) => TypeCode::UInt32,
            Value::UInt64(_) => TypeCode::UInt64,
            Value::Float(_) => TypeCode::Float,
            Value::Double(_) => TypeCode::Double,
            Value::Str(_) => TypeCode::Str,
            Value::Handle(_) => TypeCode::Handle,
        }
    }

    /// Default value for a type code.
    ///
    /// `Invalid`, `Null` and `Void` all default to [`Value::Null`].
    pub fn default_of(code: TypeCode) -> Value {
        match code {
            TypeCode::Invalid | TypeCode::Null | TypeCode::Void => Value::Null,
            TypeCode::Bool => Value::Bool(false),
            TypeCode::Int8 => Value::Int8(0),
            TypeCode::Int16 => Value::Int16(0),
            TypeCode::Int32 => Value::Int32(0),
            TypeCode::Int64 => Value::Int64(0),
            TypeCode::UInt8 => Value::UInt8(0),
            TypeCode::UInt16 => Value::UInt16(0),
            TypeCode::UInt32 => Value::UInt32(0),
            TypeCode::UInt64 => Value::UInt64(0),
            TypeCode::Float => Value::Float(0.0),
            TypeCode::Double => Value::Double(0.0),
            TypeCode::Str => Value::Str(String::new()),
            TypeCode::Handle => Value::Handle(Handle::NULL),
        }
    }

    /// Canonical textual form.
    ///
    /// Numeric types print their shortest round-trippable representation,
    /// booleans print `true`/`false`, null prints as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int8(v) => v.to_string(),
            Value::Int16(v) => v.to_string(),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::UInt8(v) => v.to_string(),
            Value::UInt16(v) => v.to_string(),
            Value::UInt32(v) => v.to_string(),
            Value::UInt64(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Str(v) => v.clone(),
            Value::Handle(v) => v.to_string(),
        }
    }

    /// Convert a textual form back into a value of the given type.
    ///
    /// Unparsable input yields the type's default instead of an error;
    /// textual round-trips are lossless for every type with a textual form.
    pub fn from_text(code: TypeCode, text: &str) -> Value {
        fn num<T: std::str::FromStr + Default>(text: &str) -> T {
            text.trim().parse().unwrap_or_default()
        }
        match code {
            TypeCode::Invalid | TypeCode::Null | TypeCode::Void => Value::Null,
            TypeCode::Bool => Value::Bool(parse_bool(text)),
            TypeCode::Int8 => Value::Int8(num(text)),
            TypeCode::Int16 => Value::Int16(num(text)),
            TypeCode::Int32 => Value::Int32(num(text)),
            TypeCode::Int64 => Value::Int64(num(text)),
            TypeCode::UInt8 => Value::UInt8(num(text)),
            TypeCode::UInt16 => Value::UInt16(num(text)),
            TypeCode::UInt32 => Value::UInt32(num(text)),
            TypeCode::UInt64 => Value::UInt64(num(text)),
            TypeCode::Float => Value::Float(num(text)),
            TypeCode::Double => Value::Double(num(text)),
            TypeCode::Str => Value::Str(text.to_string()),
            TypeCode::Handle => Value::Handle(Handle(num(text))),
        }
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as i32 if this is an int32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as i64 if this is an int64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f32 if this is a float
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f64 if this is a double
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Get as handle if this is a handle
    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Handle(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

fn parse_bool(text: &str) -> bool {
    matches!(text.trim(), "true" | "True" | "TRUE" | "1")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
