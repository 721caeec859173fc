//! Object-store notification decoding.
//!
//! Accepts the S3 event notification shape:
//! `{"Records":[{"s3":{"bucket":{"name":..},"object":{"key":..}}}]}`.
//! Only the first record is processed. Keys arrive form-encoded.

use serde::Deserialize;

use crate::IngestError;

#[derive(Debug, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// A decoded (bucket, key) pair naming one uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

/// Decode a form-encoded object key: `+` is a space, then `%XX` escapes.
///
/// # Errors
///
/// Returns `IngestError::InvalidEvent` if the escapes do not decode to UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String, IngestError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| IngestError::InvalidEvent(format!("object key '{raw}' is not UTF-8: {e}")))
}

impl StorageEvent {
    /// Parse an event body.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidEvent` if the body is not an event.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IngestError> {
        serde_json::from_slice(bytes).map_err(|e| IngestError::InvalidEvent(e.to_string()))
    }

    /// Location of the first record's object, with its key decoded.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidEvent` if the event has no records or its
    /// key cannot be decoded.
    pub fn first_location(&self) -> Result<ObjectLocation, IngestError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| IngestError::InvalidEvent("event has no records".into()))?;
        if self.records.len() > 1 {
            tracing::warn!(
                records = self.records.len(),
                "event carries several records; only the first is processed"
            );
        }
        Ok(ObjectLocation {
            bucket: record.s3.bucket.name.clone(),
            key: decode_object_key(&record.s3.object.key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("uploads/site-42.json", "uploads/site-42.json")]
    #[case::plus_is_space("my+site.csv", "my site.csv")]
    #[case::percent("caf%C3%A9.json", "café.json")]
    #[case::encoded_plus("a%2Bb.json", "a+b.json")]
    fn key_decoding(#[case] raw: &str, #[case] decoded: &str) {
        assert_eq!(decode_object_key(raw).unwrap(), decoded);
    }

    #[test]
    fn invalid_utf8_escape_is_rejected() {
        assert!(matches!(
            decode_object_key("%FF.json"),
            Err(IngestError::InvalidEvent(_))
        ));
    }

    #[test]
    fn s3_notification_is_decoded() {
        let event = StorageEvent::from_slice(
            br#"{"Records":[{"eventSource":"aws:s3","s3":{"bucket":{"name":"ccm-uploads","arn":"arn:aws:s3:::ccm-uploads"},"object":{"key":"2023/site+42.json","size":120}}}]}"#,
        )
        .unwrap();
        assert_eq!(
            event.first_location().unwrap(),
            ObjectLocation {
                bucket: "ccm-uploads".into(),
                key: "2023/site 42.json".into(),
            }
        );
    }

    #[test]
    fn empty_records_is_invalid() {
        let event = StorageEvent::from_slice(br#"{"Records":[]}"#).unwrap();
        assert!(matches!(event.first_location(), Err(IngestError::InvalidEvent(_))));
    }

    #[test]
    fn non_event_body_is_invalid() {
        assert!(matches!(
            StorageEvent::from_slice(br#"{"Records":[{"sqs":{}}]}"#),
            Err(IngestError::InvalidEvent(_))
        ));
    }
}
