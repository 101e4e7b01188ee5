//! Type layer errors

use thiserror::Error;

/// Errors surfaced by the type and signature layer.
///
/// Note that the positional/index-based accessors deliberately do NOT use
/// this type; they report misses through sentinels (`TypeCode::Invalid`,
/// `None`) per the runtime's failure policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Caller and callee disagree on a call shape
    #[error("signature mismatch: expected {expected}, got {actual}")]
    SignatureMismatch {
        /// Fingerprint the callee was compiled against
        expected: String,
        /// Fingerprint the caller supplied
        actual: String,
    },

    /// More parameters than the fixed maximum arity
    #[error("shape has {arity} parameters, the maximum is {max}", max = crate::MAX_ARITY)]
    ArityOverflow {
        /// Requested parameter count
        arity: usize,
    },

    /// A type name that is not part of the supported set
    #[error("unknown type name: {name}")]
    UnknownTypeName {
        /// The unrecognized name
        name: String,
    },
}
