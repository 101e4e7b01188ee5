//! Call shapes and signature fingerprints
//!
//! A [`Shape`] is the fixed (return type, ordered parameter types) signature
//! a parameter list commits to at construction. Its [`fingerprint`] is the
//! canonical textual encoding used to verify, before a call crosses a
//! dynamic-module boundary, that caller and callee agree on the shape; it
//! substitutes for the compile-time type checking lost at that boundary.
//!
//! [`fingerprint`]: Shape::fingerprint

use std::fmt;

use crate::code::TypeCode;
use crate::error::TypeError;

/// Maximum number of parameters a shape may carry.
pub const MAX_ARITY: usize = 16;

/// Fixed (return type, ordered parameter types) signature.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    ret: TypeCode,
    params: Vec<TypeCode>,
}

impl Shape {
    /// Create a shape with a return type and up to [`MAX_ARITY`] parameters.
    pub fn new(ret: TypeCode, params: Vec<TypeCode>) -> Result<Shape, TypeError> {
        if params.len() > MAX_ARITY {
            return Err(TypeError::ArityOverflow {
                arity: params.len(),
            });
        }
        Ok(Shape { ret, params })
    }

    /// Create a shape without a return value.
    pub fn procedure(params: Vec<TypeCode>) -> Result<Shape, TypeError> {
        Shape::new(TypeCode::Void, params)
    }

    /// Return type code (`Void` when the shape has no return value)
    pub fn ret(&self) -> TypeCode {
        self.ret
    }

    /// Whether the shape carries a return value
    pub fn has_return(&self) -> bool {
        !matches!(self.ret, TypeCode::Void | TypeCode::Null | TypeCode::Invalid)
    }

    /// Ordered parameter type codes
    pub fn params(&self) -> &[TypeCode] {
        &self.params
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Type code of parameter `index`, or `TypeCode::Invalid` out of range.
    pub fn parameter(&self, index: usize) -> TypeCode {
        self.params.get(index).copied().unwrap_or(TypeCode::Invalid)
    }

    /// Canonical fingerprint, e.g. `"void(int32,string)"`.
    ///
    /// Identical shapes always produce identical strings, regardless of
    /// where they were instantiated.
    pub fn fingerprint(&self) -> String {
        let mut out = String::with_capacity(8 + 8 * self.params.len());
        out.push_str(self.ret.name());
        out.push('(');
        for (i, code) in self.params.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(code.name());
        }
        out.push(')');
        out
    }

    /// Whether two shapes agree byte-for-byte on their fingerprints.
    pub fn matches(&self, other: &Shape) -> bool {
        self == other
    }

    /// Typed pre-call check for crossing a module boundary.
    pub fn ensure_matches(&self, other: &Shape) -> Result<(), TypeError> {
        if self.matches(other) {
            Ok(())
        } else {
            Err(TypeError::SignatureMismatch {
                expected: self.fingerprint(),
                actual: other.fingerprint(),
            })
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Shape::new(TypeCode::Int32, vec![TypeCode::Float, TypeCode::Str]).unwrap();
        let b = Shape::new(TypeCode::Int32, vec![TypeCode::Float, TypeCode::Str]).unwrap();
        assert_eq!(a.fingerprint(), "int32(float,string)");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(a.matches(&b));
    }

    #[test]
    fn procedure_has_no_return() {
        let shape = Shape::procedure(vec![TypeCode::Bool]).unwrap();
        assert!(!shape.has_return());
        assert_eq!(shape.fingerprint(), "void(bool)");
    }

    #[test]
    fn parameter_out_of_range_is_invalid() {
        let shape = Shape::procedure(vec![TypeCode::Int32]).unwrap();
        assert_eq!(shape.parameter(0), TypeCode::Int32);
        assert_eq!(shape.parameter(1), TypeCode::Invalid);
        assert_eq!(shape.parameter(usize::MAX), TypeCode::Invalid);
    }

    #[test]
    fn arity_overflow_is_rejected() {
        let err = Shape::procedure(vec![TypeCode::Int32; MAX_ARITY + 1]).unwrap_err();
        assert_eq!(err, TypeError::ArityOverflow { arity: 17 });
        assert!(Shape::procedure(vec![TypeCode::Int32; MAX_ARITY]).is_ok());
    }

    #[test]
    fn mismatch_is_a_typed_error() {
        let a = Shape::procedure(vec![TypeCode::Int32]).unwrap();
        let b = Shape::procedure(vec![TypeCode::Int64]).unwrap();
        let err = a.ensure_matches(&b).unwrap_err();
        assert_eq!(
            err,
            TypeError::SignatureMismatch {
                expected: "void(int32)".to_string(),
                actual: "void(int64)".to_string(),
            }
        );
        assert!(a.ensure_matches(&a.clone()).is_ok());
    }
}
