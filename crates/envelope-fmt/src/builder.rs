//! Encoder producing inscription envelopes in script push conventions.

use crate::errors::EnvelopeBuildError;
use crate::{
    ENVELOPE_MARKER, MAX_DIRECT_PUSH, OP_1, OP_ENDIF, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4,
};

/// Largest element a single script push may carry under consensus rules.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Appends one minimally-encoded data push to `script`.
///
/// Picks the narrowest push form that can carry the data: a direct push up
/// to 75 bytes, then PUSHDATA1/2/4. Empty data is encoded as PUSHDATA1
/// with a zero length, since `0x00` is not a push opcode in this protocol.
pub fn append_pushdata(script: &mut Vec<u8>, data: &[u8]) -> Result<(), EnvelopeBuildError> {
    match data.len() {
        0 => script.extend_from_slice(&[OP_PUSHDATA1, 0]),
        len if len <= MAX_DIRECT_PUSH as usize => script.push(len as u8),
        len if len <= u8::MAX as usize => {
            script.push(OP_PUSHDATA1);
            script.push(len as u8);
        }
        len if len <= u16::MAX as usize => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(len as u16).to_le_bytes());
        }
        len => {
            let len = u32::try_from(len).map_err(|_| EnvelopeBuildError::PushTooLong(len))?;
            script.push(OP_PUSHDATA4);
            script.extend_from_slice(&len.to_le_bytes());
        }
    }

    script.extend_from_slice(data);
    Ok(())
}

/// Builds a complete envelope from pre-chunked payload pieces.
///
/// Emits the marker, the content-type field (`OP_1` when empty), the zero
/// separator, one push per chunk and the terminator. Chunk sizes are not
/// capped here; use [`build_envelope_script`] for consensus-sized chunks.
pub fn build_envelope(
    content_type: &[u8],
    chunks: &[&[u8]],
) -> Result<Vec<u8>, EnvelopeBuildError> {
    let mut script = ENVELOPE_MARKER.to_vec();
    append_content_type(&mut script, content_type)?;
    script.push(0x00);

    for chunk in chunks {
        append_pushdata(&mut script, chunk)?;
    }

    script.push(OP_ENDIF);
    Ok(script)
}

/// Builds an envelope, splitting the payload into consensus-sized chunks.
pub fn build_envelope_script(
    content_type: &[u8],
    payload: &[u8],
) -> Result<Vec<u8>, EnvelopeBuildError> {
    let chunks: Vec<&[u8]> = payload.chunks(MAX_SCRIPT_ELEMENT_SIZE).collect();
    build_envelope(content_type, &chunks)
}

fn append_content_type(
    script: &mut Vec<u8>,
    content_type: &[u8],
) -> Result<(), EnvelopeBuildError> {
    if content_type.is_empty() {
        script.push(OP_1);
        return Ok(());
    }

    let len = content_type.len();
    if len > u8::MAX as usize {
        return Err(EnvelopeBuildError::ContentTypeTooLong(len));
    }

    script.extend_from_slice(&[0x01, 0x01, len as u8]);
    script.extend_from_slice(content_type);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_envelope;

    #[test]
    fn test_roundtrip_small() {
        let script = build_envelope_script(b"image/gif", b"Hello").unwrap();
        let envelope = parse_envelope(&script).unwrap();

        assert_eq!(envelope.content_type(), b"image/gif");
        assert_eq!(envelope.payload(), b"Hello");
    }

    #[test]
    fn test_roundtrip_every_push_tier() {
        // One uncapped push per tier: direct, PUSHDATA1, PUSHDATA2,
        // PUSHDATA4.
        for size in [75usize, 255, 65535, 70000] {
            let payload: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
            let script = build_envelope(b"application/octet-stream", &[&payload]).unwrap();

            let envelope = parse_envelope(&script).unwrap();
            assert_eq!(envelope.payload(), &payload[..], "bad round trip at {size}");
        }
    }

    #[test]
    fn test_payload_chunking() {
        // Push sizes for payloads around the consensus element size.
        let cases = [
            (0usize, vec![]),
            (1, vec![1usize]),
            (520, vec![520]),
            (521, vec![520, 1]),
            (1040, vec![520, 520]),
            (1041, vec![520, 520, 1]),
            (2000, vec![520, 520, 520, 440]),
        ];

        for (payload_size, expected_pushes) in cases {
            let payload: Vec<u8> = (0..payload_size).map(|i| (i % 256) as u8).collect();
            let script = build_envelope_script(b"text/plain", &payload).unwrap();

            assert_eq!(
                payload_push_sizes(&script),
                expected_pushes,
                "push layout mismatch at {payload_size}"
            );

            let envelope = parse_envelope(&script).unwrap();
            assert_eq!(
                envelope.payload(),
                &payload[..],
                "payload mismatch at {payload_size}"
            );
        }
    }

    /// Walks the pushes between the separator and the terminator,
    /// returning their sizes.
    fn payload_push_sizes(script: &[u8]) -> Vec<usize> {
        use crate::cursor::ByteCursor;
        use crate::parser::{locate_envelope, read_content_type, read_pushdata};

        let start = locate_envelope(script).unwrap();
        let mut cursor = ByteCursor::starting_at(script, start).unwrap();
        read_content_type(&mut cursor).unwrap();
        assert_eq!(cursor.read_byte().unwrap(), 0x00);

        let mut sizes = Vec::new();
        loop {
            let opcode = cursor.read_byte().unwrap();
            if opcode == OP_ENDIF {
                break;
            }
            sizes.push(read_pushdata(&mut cursor, opcode).unwrap().len());
        }
        sizes
    }

    #[test]
    fn test_empty_content_type_roundtrip() {
        let script = build_envelope_script(b"", b"data").unwrap();
        assert_eq!(script[ENVELOPE_MARKER.len()], OP_1);

        let envelope = parse_envelope(&script).unwrap();
        assert_eq!(envelope.content_type(), b"");
        assert_eq!(envelope.payload(), b"data");
    }

    #[test]
    fn test_content_type_too_long() {
        let long = vec![b'a'; 256];
        assert_eq!(
            build_envelope_script(&long, b""),
            Err(EnvelopeBuildError::ContentTypeTooLong(256))
        );
    }

    #[test]
    fn test_empty_chunk_encodes_as_pushdata1() {
        let mut script = Vec::new();
        append_pushdata(&mut script, b"").unwrap();
        assert_eq!(script, [OP_PUSHDATA1, 0x00]);
    }
}
