use std::str;

/// A decoded inscription: a content type plus the reassembled payload.
///
/// Produced once per successful decode and immutable afterwards. The
/// content type is conventionally a UTF-8 MIME string but is carried
/// verbatim; malformed UTF-8 is not an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InscriptionEnvelope {
    content_type: Vec<u8>,
    payload: Vec<u8>,
}

impl InscriptionEnvelope {
    /// Constructs a new instance from a content type and payload.
    pub fn new(content_type: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            content_type,
            payload,
        }
    }

    /// Returns the raw content-type bytes.
    pub fn content_type(&self) -> &[u8] {
        &self.content_type
    }

    /// Returns the content type as a string slice if it is valid UTF-8.
    pub fn content_type_str(&self) -> Option<&str> {
        str::from_utf8(&self.content_type).ok()
    }

    /// Returns the payload bytes, in the order the pushes appeared.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Converts into the owned `(content_type, payload)` pair.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.content_type, self.payload)
    }
}
