use thiserror::Error;

/// Errors that can occur while decoding an inscription envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeParseError {
    /// The envelope marker sequence does not occur in the buffer.
    #[error("no inscription envelope marker in buffer")]
    MarkerNotFound,

    /// A read would have consumed more bytes than remain.
    #[error("read of {need} bytes at offset {at} would pass the end of the buffer")]
    OutOfBounds {
        /// Offset the read started from.
        at: usize,

        /// Number of bytes the read asked for.
        need: usize,
    },

    /// The bytes introducing the content-type field match neither
    /// recognized encoding.
    #[error("invalid content-type prefix byte {0:#04x}")]
    InvalidContentTypePrefix(u8),

    /// The byte after the content-type field is not the zero separator.
    #[error("expected zero separator after content type (got {0:#04x})")]
    InvalidSeparator(u8),

    /// An opcode in the payload section is neither a data push nor the
    /// terminator.
    #[error("invalid push opcode {opcode:#04x} at offset {at}")]
    InvalidPushOpcode {
        /// The offending opcode byte.
        opcode: u8,

        /// Offset just past the opcode.
        at: usize,
    },

    /// A push declared a length larger than the remaining buffer.
    #[error("push of {declared} bytes at offset {at} exceeds remaining buffer")]
    TruncatedPushData {
        /// Length the push claimed to carry.
        declared: usize,

        /// Offset where the push data would have started.
        at: usize,
    },
}

/// Errors that can occur while building an inscription envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeBuildError {
    /// The content type does not fit in the single length byte the field
    /// encoding allows.
    #[error("content type of {0} bytes does not fit in one length byte")]
    ContentTypeTooLong(usize),

    /// The data is larger than the widest pushdata form can describe.
    #[error("push of {0} bytes exceeds the largest pushdata form")]
    PushTooLong(usize),
}
