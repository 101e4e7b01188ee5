//! Lumen type layer
//!
//! Per-native-type metadata for the RTTI runtime: numeric type codes, the
//! tagged [`Value`] storage representation, bidirectional string conversion,
//! default values and canonical call-shape fingerprints.

#![warn(missing_docs)]

pub mod code;
pub mod error;
pub mod reflect;
pub mod signature;
pub mod value;

pub use code::TypeCode;
pub use error::TypeError;
pub use reflect::Reflected;
pub use signature::{Shape, MAX_ARITY};
pub use value::{Handle, Value};
