//! Numeric type codes for the supported primitive set

use std::fmt;

use crate::error::TypeError;

/// Numeric identifier for every type the RTTI layer can carry.
///
/// The discriminants are part of the cross-module contract: two modules
/// compiled independently must agree on them byte-for-byte, so they are
/// fixed explicitly and never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum TypeCode {
    /// Sentinel for out-of-range or unknown type queries
    Invalid = -1,
    /// The null/unit type
    Null = 0,
    /// No value (return type of procedures)
    Void = 1,
    /// Boolean
    Bool = 2,
    /// Signed 8-bit integer
    Int8 = 3,
    /// Signed 16-bit integer
    Int16 = 4,
    /// Signed 32-bit integer
    Int32 = 5,
    /// Signed 64-bit integer
    Int64 = 6,
    /// Unsigned 8-bit integer
    UInt8 = 7,
    /// Unsigned 16-bit integer
    UInt16 = 8,
    /// Unsigned 32-bit integer
    UInt32 = 9,
    /// Unsigned 64-bit integer
    UInt64 = 10,
    /// 32-bit float
    Float = 11,
    /// 64-bit float
    Double = 12,
    /// Heap-allocated string
    Str = 13,
    /// Opaque handle to an engine object
    Handle = 14,
}

impl TypeCode {
    /// Numeric id of this code
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Canonical lowercase name, used verbatim in signature fingerprints
    pub const fn name(self) -> &'static str {
        match self {
            TypeCode::Invalid => "invalid",
            TypeCode::Null => "null",
            TypeCode::Void => "void",
            TypeCode::Bool => "bool",
            TypeCode::Int8 => "int8",
            TypeCode::Int16 => "int16",
            TypeCode::Int32 => "int32",
            TypeCode::Int64 => "int64",
            TypeCode::UInt8 => "uint8",
            TypeCode::UInt16 => "uint16",
            TypeCode::UInt32 => "uint32",
            TypeCode::UInt64 => "uint64",
            TypeCode::Float => "float",
            TypeCode::Double => "double",
            TypeCode::Str => "string",
            TypeCode::Handle => "handle",
        }
    }

    /// Look up a code by its canonical name
    pub fn from_name(name: &str) -> Option<TypeCode> {
        Some(match name {
            "null" => TypeCode::Null,
            "void" => TypeCode::Void,
            "bool" => TypeCode::Bool,
            "int8" => TypeCode::Int8,
            "int16" => TypeCode::Int16,
            "int32" => TypeCode::Int32,
            "int64" => TypeCode::Int64,
            "uint8" => TypeCode::UInt8,
            "uint16" => TypeCode::UInt16,
            "uint32" => TypeCode::UInt32,
            "uint64" => TypeCode::UInt64,
            "float" => TypeCode::Float,
            "double" => TypeCode::Double,
            "string" => TypeCode::Str,
            "handle" => TypeCode::Handle,
            _ => return None,
        })
    }

    /// Like [`from_name`](TypeCode::from_name), but a name outside the
    /// supported set is a typed error. For callers decoding external type
    /// descriptions, where a bad name must carry a diagnostic.
    pub fn try_from_name(name: &str) -> Result<TypeCode, TypeError> {
        TypeCode::from_name(name).ok_or_else(|| TypeError::UnknownTypeName {
            name: name.to_string(),
        })
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        let all = [
            TypeCode::Null,
            TypeCode::Void,
            TypeCode::Bool,
            TypeCode::Int8,
            TypeCode::Int16,
            TypeCode::Int32,
            TypeCode::Int64,
            TypeCode::UInt8,
            TypeCode::UInt16,
            TypeCode::UInt32,
            TypeCode::UInt64,
            TypeCode::Float,
            TypeCode::Double,
            TypeCode::Str,
            TypeCode::Handle,
        ];
        for code in all {
            assert_eq!(TypeCode::from_name(code.name()), Some(code));
        }
    }

    #[test]
    fn invalid_is_not_nameable() {
        assert_eq!(TypeCode::from_name("invalid"), None);
        assert_eq!(TypeCode::Invalid.id(), -1);
    }

    #[test]
    fn unknown_name_is_a_typed_error() {
        assert_eq!(TypeCode::try_from_name("float"), Ok(TypeCode::Float));
        assert_eq!(
            TypeCode::try_from_name("quaternion"),
            Err(TypeError::UnknownTypeName {
                name: "quaternion".to_string(),
            })
        );
    }

    #[test]
    fn ids_are_stable() {
        assert_eq!(TypeCode::Null.id(), 0);
        assert_eq!(TypeCode::Bool.id(), 2);
        assert_eq!(TypeCode::Int32.id(), 5);
        assert_eq!(TypeCode::Str.id(), 13);
    }
}
