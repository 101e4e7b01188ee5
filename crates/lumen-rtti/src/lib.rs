//! Lumen RTTI runtime
//!
//! Type-erased, fixed-arity parameter passing and name-based reflective
//! dispatch. Statically typed native methods become invocable, serializable
//! and introspectable without callers knowing the concrete types involved:
//!
//! - [`TextParamParser`] / [`XmlParamParser`]: lazy `name=value` pair
//!   sources over a string or an XML element's attribute list.
//! - [`ParamList`]: one generic, positionally addressed value container
//!   per call, committed to a [`Shape`](lumen_types::Shape) at construction.
//! - [`Reflectable`] / [`ObjectExt`]: per-class descriptor tables mapping
//!   names to attribute/method/signal/slot accessors, plus bulk attribute
//!   (de)serialization over both encodings.
//!
//! The runtime is single-threaded and value-oriented: a parameter list is
//! built, passed down one call stack and discarded. All failure is
//! representable as booleans, sentinels or default substitution; name-based
//! lookups silently no-op on a miss.

#![warn(missing_docs)]

pub mod class;
pub mod error;
pub mod object;
pub mod params;
pub mod parser;
pub mod signal;
pub mod xml;

pub use class::{
    AttributeDesc, ClassBuilder, ClassInfo, ClassRegistry, MethodDesc, SignalDesc, SlotDesc,
};
pub use error::RttiError;
pub use object::{ObjectExt, Reflectable, ValueMode};
pub use params::{ParamList, ParamPack};
pub use parser::TextParamParser;
pub use signal::{Signal, SlotFn};
pub use xml::{XmlElement, XmlParamParser};

pub use lumen_types::{Handle, Reflected, Shape, TypeCode, TypeError, Value, MAX_ARITY};
