//! Compile-time type adapters
//!
//! [`Reflected`] ties a native Rust type to its [`TypeCode`] and its
//! conversions into and out of the type-erased [`Value`] storage, one
//! macro-generated impl per supported type.

use crate::code::TypeCode;
use crate::value::{Handle, Value};

/// A native type the RTTI layer can pass through type-erased slots.
pub trait Reflected: Sized {
    /// Type code this native type maps to
    const TYPE_CODE: TypeCode;

    /// Move the native value into its storage representation
    fn into_value(self) -> Value;

    /// Extract the native value back out of storage.
    ///
    /// Returns `None` when the stored variant does not match; extraction is
    /// code-strict, no implicit numeric coercion.
    fn from_value(value: &Value) -> Option<Self>;

    /// The type's default value
    fn default_value() -> Self;
}

macro_rules! impl_reflected {
    ($ty:ty, $code:ident, $variant:ident) => {
        impl Reflected for $ty {
            const TYPE_CODE: TypeCode = TypeCode::$code;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn default_value() -> Self {
                Default::default()
            }
        }
    };
}

impl_reflected!(bool, Bool, Bool);
impl_reflected!(i8, Int8, Int8);
impl_reflected!(i16, Int16, Int16);
impl_reflected!(i32, Int32, Int32);
impl_reflected!(i64, Int64, Int64);
impl_reflected!(u8, UInt8, UInt8);
impl_reflected!(u16, UInt16, UInt16);
impl_reflected!(u32, UInt32, UInt32);
impl_reflected!(u64, UInt64, UInt64);
impl_reflected!(f32, Float, Float);
impl_reflected!(f64, Double, Double);
impl_reflected!(String, Str, Str);
impl_reflected!(Handle, Handle, Handle);

/// `()` is the return "type" of procedures; it never occupies a slot.
impl Reflected for () {
    const TYPE_CODE: TypeCode = TypeCode::Void;

    fn into_value(self) -> Value {
        Value::Null
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(()),
            _ => None,
        }
    }

    fn default_value() -> Self {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapters_round_trip_through_storage() {
        assert_eq!(i32::from_value(&42i32.into_value()), Some(42));
        assert_eq!(
            String::from_value(&"abc".to_string().into_value()),
            Some("abc".to_string())
        );
        assert_eq!(f32::from_value(&1.25f32.into_value()), Some(1.25));
        assert_eq!(Handle::from_value(&Handle(9).into_value()), Some(Handle(9)));
    }

    #[test]
    fn extraction_is_variant_strict() {
        assert_eq!(i64::from_value(&Value::Int32(1)), None);
        assert_eq!(bool::from_value(&Value::Str("true".into())), None);
    }

    #[test]
    fn codes_match_storage() {
        assert_eq!(u16::TYPE_CODE, TypeCode::UInt16);
        assert_eq!(Value::UInt16(3).type_code(), u16::TYPE_CODE);
        assert_eq!(<()>::TYPE_CODE, TypeCode::Void);
    }
}
