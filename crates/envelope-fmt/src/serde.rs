use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

use crate::InscriptionEnvelope;

impl Serialize for InscriptionEnvelope {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let human = s.is_human_readable();
        let mut st = s.serialize_struct("InscriptionEnvelope", 2)?;
        if human {
            st.serialize_field(
                "content_type",
                &String::from_utf8_lossy(self.content_type()),
            )?;
            st.serialize_field("payload", &hex::encode(self.payload()))?;
        } else {
            st.serialize_field("content_type", self.content_type())?;
            st.serialize_field("payload", self.payload())?;
        }
        st.end()
    }
}

impl<'de> Deserialize<'de> for InscriptionEnvelope {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            #[derive(Deserialize)]
            struct Repr {
                content_type: String,
                payload: String,
            }

            let repr = Repr::deserialize(d)?;
            let payload = hex::decode(&repr.payload).map_err(de::Error::custom)?;
            Ok(InscriptionEnvelope::new(
                repr.content_type.into_bytes(),
                payload,
            ))
        } else {
            #[derive(Deserialize)]
            struct Repr {
                content_type: Vec<u8>,
                payload: Vec<u8>,
            }

            let repr = Repr::deserialize(d)?;
            Ok(InscriptionEnvelope::new(repr.content_type, repr.payload))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_roundtrip() {
        let envelope = InscriptionEnvelope::new(b"text/plain".to_vec(), b"hello".to_vec());
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"content_type":"text/plain","payload":"68656c6c6f"}"#
        );

        let back: InscriptionEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, back);
    }

    #[test]
    fn test_invalid_payload_hex() {
        let result: Result<InscriptionEnvelope, _> =
            serde_json::from_str(r#"{"content_type":"text/plain","payload":"zz"}"#);
        assert!(result.is_err());
    }
}
