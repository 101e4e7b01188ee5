//! Runtime errors
//!
//! Only constructive operations (XML decoding, shape building) produce
//! errors. The dispatch surface itself follows the two policy rules:
//! index-based access returns sentinels, name-based access no-ops on a miss.

use thiserror::Error;

use lumen_types::TypeError;

/// Errors surfaced by the RTTI runtime.
#[derive(Debug, Error)]
pub enum RttiError {
    /// XML input could not be decoded
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML input contained no element
    #[error("no element found in XML input")]
    NoElement,

    /// Type or signature layer error
    #[error(transparent)]
    Type(#[from] TypeError),
}
