//! Record-store contract: a key-value mapping from subject id to the persisted
//! registration key and ciphertext, both in codec byte form.

use crate::errors::SpadeError;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The persistence/transport record kept per subject.
///
/// `registration_key` and `ciphertext` hold the codec byte encodings; JSON
/// export carries them base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: u64,
    #[serde(rename = "registrationKey", with = "base64_bytes")]
    pub registration_key: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub ciphertext: Vec<u8>,
}

impl SubjectRecord {
    pub fn to_json(&self) -> Result<String, SpadeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SpadeError> {
        Ok(serde_json::from_str(json)?)
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Store contract consumed by the protocol layer.
///
/// Registration of an already-present id is rejected deterministically;
/// lookups of unknown ids return `None` rather than an error, so the engine
/// never branches on "not found".
pub trait RecordStore {
    fn insert(&mut self, record: SubjectRecord) -> Result<(), SpadeError>;
    fn get(&self, id: u64) -> Option<&SubjectRecord>;
}

/// In-memory store backing tests and single-process deployments.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<u64, SubjectRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: SubjectRecord) -> Result<(), SpadeError> {
        if self.records.contains_key(&record.id) {
            return Err(SpadeError::DuplicateSubject(record.id));
        }
        self.records.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: u64) -> Option<&SubjectRecord> {
        self.records.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> SubjectRecord {
        SubjectRecord {
            id,
            registration_key: vec![1, 2, 3],
            ciphertext: vec![4, 5, 6, 7],
        }
    }

    #[test]
    fn insert_then_get() {
        let mut store = MemoryStore::new();
        store.insert(record(7)).unwrap();

        assert_eq!(store.get(7), Some(&record(7)));
        assert_eq!(store.get(8), None);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut store = MemoryStore::new();
        store.insert(record(7)).unwrap();

        assert!(matches!(
            store.insert(record(7)),
            Err(SpadeError::DuplicateSubject(7))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn json_round_trip_uses_base64_fields() {
        let original = record(3);
        let json = original.to_json().unwrap();

        assert!(json.contains("registrationKey"));
        assert!(json.contains(r#""AQID""#)); // base64 of [1, 2, 3]

        assert_eq!(SubjectRecord::from_json(&json).unwrap(), original);
    }
}
