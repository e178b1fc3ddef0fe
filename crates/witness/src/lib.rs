//! Extraction of inscription envelopes from transaction witnesses.
//!
//! The envelope decoder works on one raw witness stack element; this crate
//! walks a whole [`Transaction`], trying every element of every input, and
//! collects whatever decodes. Elements without an envelope marker are the
//! overwhelmingly common case and are skipped silently; elements that carry
//! a marker but fail to decode are logged and skipped, so one malformed
//! input never hides inscriptions elsewhere in the transaction.

use bitcoin::Transaction;
use ordx_envelope_fmt::{EnvelopeParseError, InscriptionEnvelope, parse_envelope};
use tracing::warn;

/// An inscription recovered from one witness stack element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedInscription {
    input: u32,
    item: u32,
    envelope: InscriptionEnvelope,
}

impl ExtractedInscription {
    /// Index of the transaction input the inscription was found in.
    pub fn input(&self) -> u32 {
        self.input
    }

    /// Index of the witness stack element within that input.
    pub fn item(&self) -> u32 {
        self.item
    }

    /// The decoded envelope.
    pub fn envelope(&self) -> &InscriptionEnvelope {
        &self.envelope
    }

    /// Converts into the decoded envelope, dropping the location.
    pub fn into_envelope(self) -> InscriptionEnvelope {
        self.envelope
    }
}

/// Decodes a single witness stack element.
pub fn extract_from_witness_item(item: &[u8]) -> Result<InscriptionEnvelope, EnvelopeParseError> {
    parse_envelope(item)
}

/// Scans every witness element of every input for inscription envelopes.
pub fn scan_transaction(tx: &Transaction) -> Vec<ExtractedInscription> {
    let mut found = Vec::new();

    for (input, txin) in tx.input.iter().enumerate() {
        for (item, bytes) in txin.witness.iter().enumerate() {
            match parse_envelope(bytes) {
                Ok(envelope) => found.push(ExtractedInscription {
                    input: input as u32,
                    item: item as u32,
                    envelope,
                }),
                Err(EnvelopeParseError::MarkerNotFound) => {}
                Err(err) => {
                    warn!(input, item, %err, "skipping malformed inscription envelope");
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use bitcoin::absolute::LockTime;
    use bitcoin::transaction::Version;
    use bitcoin::{OutPoint, ScriptBuf, Sequence, Transaction, TxIn, Witness};
    use ordx_envelope_fmt::builder::build_envelope_script;

    use super::*;

    fn tx_with_witnesses(witnesses: Vec<Witness>) -> Transaction {
        Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: witnesses
                .into_iter()
                .map(|witness| TxIn {
                    previous_output: OutPoint::null(),
                    script_sig: ScriptBuf::new(),
                    sequence: Sequence::MAX,
                    witness,
                })
                .collect(),
            output: Vec::new(),
        }
    }

    /// Wraps an envelope the way a taproot script-path spend does: a
    /// signature, the tapscript (pubkey push + OP_CHECKSIG + envelope),
    /// and a control block.
    fn tapscript_witness(envelope: &[u8]) -> Witness {
        let mut tapscript = vec![0x20];
        tapscript.extend_from_slice(&[0xab; 32]);
        tapscript.push(0xac);
        tapscript.extend_from_slice(envelope);

        let signature = vec![0x01; 64];
        let control_block = vec![0xc0; 33];
        Witness::from_slice(&[signature, tapscript, control_block])
    }

    #[test]
    fn test_scan_finds_inscription() {
        let envelope = build_envelope_script(b"text/plain", b"hello").unwrap();
        let tx = tx_with_witnesses(vec![tapscript_witness(&envelope)]);

        let found = scan_transaction(&tx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].input(), 0);
        assert_eq!(found[0].item(), 1);
        assert_eq!(found[0].envelope().content_type_str(), Some("text/plain"));
        assert_eq!(found[0].envelope().payload(), b"hello");
    }

    #[test]
    fn test_scan_skips_inputs_without_envelopes() {
        let tx = tx_with_witnesses(vec![Witness::from_slice(&[vec![0x01; 64]])]);
        assert!(scan_transaction(&tx).is_empty());
    }

    #[test]
    fn test_malformed_envelope_does_not_hide_others() {
        let good = build_envelope_script(b"image/gif", b"Hello").unwrap();

        // Marker present but the content-type field is garbage.
        let mut bad = ordx_envelope_fmt::ENVELOPE_MARKER.to_vec();
        bad.push(0x42);

        let tx = tx_with_witnesses(vec![
            tapscript_witness(&bad),
            tapscript_witness(&good),
        ]);

        let found = scan_transaction(&tx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].input(), 1);
        assert_eq!(found[0].envelope().content_type_str(), Some("image/gif"));
    }

    #[test]
    fn test_extract_from_witness_item() {
        let raw = hex::decode(
            "202e821cbb64ff7b57064b5f1ab08049476064fe61397c0728185323962c8a847fac\
             0063036f7264010118746578742f706c61696e3b636861727365743d7574662d38\
             000568656c6c6f68",
        )
        .unwrap();

        let envelope = extract_from_witness_item(&raw).unwrap();
        assert_eq!(envelope.payload(), b"hello");
    }
}
