//! Ordinals inscription envelope format.
//!
//! This crate decodes (and encodes) the inscription envelope convention
//! layered on top of Bitcoin script. An inscription lives in a tapscript
//! inside a no-op conditional and has the following shape on the wire:
//!
//! ```text
//! OP_FALSE OP_IF
//!   OP_PUSHBYTES_3 "ord"
//!   OP_PUSHBYTES_1 0x01            (content-type tag; OP_1 when the field is empty)
//!   OP_PUSHBYTES_n <content-type>
//!   OP_0
//!   <data push> ...
//! OP_ENDIF
//! ```
//!
//! The decoder operates on one raw witness stack element, already
//! hex-decoded by the caller. It locates the envelope marker with a plain
//! byte search, reads the content-type field, then concatenates every data
//! push until `OP_ENDIF`. It does not validate the surrounding script; a
//! marker occurring inside unrelated push data is matched like any other,
//! which is a property of the convention itself.
//!
//! # Examples
//!
//! ```
//! use ordx_envelope_fmt::builder::build_envelope_script;
//! use ordx_envelope_fmt::parse_envelope;
//!
//! let script = build_envelope_script(b"text/plain", b"hello").unwrap();
//! let envelope = parse_envelope(&script).unwrap();
//! assert_eq!(envelope.content_type(), b"text/plain");
//! assert_eq!(envelope.payload(), b"hello");
//! ```

/// Inscription envelope encoding utilities.
pub mod builder;

/// Bounds-checked byte cursor.
pub mod cursor;

/// The decoded envelope type.
pub mod envelope;

/// Error types for envelope operations.
pub mod errors;

/// Inscription envelope decoding.
pub mod parser;

#[cfg(feature = "serde")]
mod serde;

pub use envelope::InscriptionEnvelope;
pub use errors::{EnvelopeBuildError, EnvelopeParseError};
pub use parser::parse_envelope;

#[cfg(test)]
use serde_json as _;

/// Byte sequence opening an inscription envelope: `OP_FALSE OP_IF` followed
/// by a 3-byte push of the ASCII text "ord".
pub const ENVELOPE_MARKER: [u8; 6] = [0x00, 0x63, 0x03, 0x6f, 0x72, 0x64];

pub(crate) const OP_1: u8 = 0x51;
pub(crate) const OP_PUSHDATA1: u8 = 0x4c;
pub(crate) const OP_PUSHDATA2: u8 = 0x4d;
pub(crate) const OP_PUSHDATA4: u8 = 0x4e;
pub(crate) const OP_ENDIF: u8 = 0x68;

/// Largest length a direct push opcode can carry.
pub(crate) const MAX_DIRECT_PUSH: u8 = 0x4b;
