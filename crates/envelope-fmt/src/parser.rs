//! Decoder for inscription envelopes embedded in script bytes.

use crate::cursor::ByteCursor;
use crate::envelope::InscriptionEnvelope;
use crate::errors::EnvelopeParseError;
use crate::{
    ENVELOPE_MARKER, MAX_DIRECT_PUSH, OP_1, OP_ENDIF, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4,
};

/// Finds the envelope marker in `buf` and returns the offset of the first
/// byte after it.
///
/// This is a plain byte-sequence search, not a script-aware scan, so a
/// marker occurring inside unrelated push data matches too. Only the first
/// occurrence is considered.
pub fn locate_envelope(buf: &[u8]) -> Result<usize, EnvelopeParseError> {
    buf.windows(ENVELOPE_MARKER.len())
        .position(|window| window == ENVELOPE_MARKER)
        .map(|pos| pos + ENVELOPE_MARKER.len())
        .ok_or(EnvelopeParseError::MarkerNotFound)
}

/// Reads the content-type field at the cursor.
///
/// `OP_1` marks an explicitly empty content type and consumes nothing
/// further. Otherwise the field must be introduced by the two bytes
/// `01 01`, followed by one length byte and that many bytes of content
/// type, returned verbatim.
pub fn read_content_type<'b>(cursor: &mut ByteCursor<'b>) -> Result<&'b [u8], EnvelopeParseError> {
    let tag = cursor.read_byte()?;
    if tag == OP_1 {
        return Ok(&[]);
    }
    if tag != 0x01 {
        return Err(EnvelopeParseError::InvalidContentTypePrefix(tag));
    }

    let value = cursor.read_byte()?;
    if value != 0x01 {
        return Err(EnvelopeParseError::InvalidContentTypePrefix(value));
    }

    let size = cursor.read_byte()? as usize;
    cursor.read(size)
}

/// Decodes one data push whose opcode byte has already been consumed.
///
/// Direct pushes carry their length in the opcode itself; the three
/// PUSHDATA forms read a 1, 2 or 4 byte little-endian length first. The
/// declared length is checked against the remaining buffer before any data
/// is read.
pub fn read_pushdata<'b>(
    cursor: &mut ByteCursor<'b>,
    opcode: u8,
) -> Result<&'b [u8], EnvelopeParseError> {
    let len = match opcode {
        0x01..=MAX_DIRECT_PUSH => opcode as usize,
        OP_PUSHDATA1 => cursor.read_byte()? as usize,
        OP_PUSHDATA2 => u16::from_le_bytes(cursor.read_arr()?) as usize,
        OP_PUSHDATA4 => u32::from_le_bytes(cursor.read_arr()?) as usize,
        _ => {
            return Err(EnvelopeParseError::InvalidPushOpcode {
                opcode,
                at: cursor.position(),
            });
        }
    };

    if len > cursor.remaining() {
        return Err(EnvelopeParseError::TruncatedPushData {
            declared: len,
            at: cursor.position(),
        });
    }

    cursor.read(len)
}

/// Decodes the first inscription envelope found in `buf`.
///
/// Locates the envelope marker, reads the content-type field and the zero
/// separator, then concatenates every data push until the `OP_ENDIF`
/// terminator. Any failure aborts the decode; no partial result is
/// returned.
pub fn parse_envelope(buf: &[u8]) -> Result<InscriptionEnvelope, EnvelopeParseError> {
    let start = locate_envelope(buf)?;
    let mut cursor = ByteCursor::starting_at(buf, start)?;

    let content_type = read_content_type(&mut cursor)?.to_vec();

    let sep = cursor.read_byte()?;
    if sep != 0x00 {
        return Err(EnvelopeParseError::InvalidSeparator(sep));
    }

    let mut payload = Vec::new();
    loop {
        let opcode = cursor.read_byte()?;
        if opcode == OP_ENDIF {
            break;
        }
        payload.extend_from_slice(read_pushdata(&mut cursor, opcode)?);
    }

    Ok(InscriptionEnvelope::new(content_type, payload))
}
