//! Registration and query orchestration over the engine, the codec and a
//! record store. Field names and shapes match the wire contract interoperating
//! service layers agree on.

use crate::codec::{decode_biguint, decode_ciphertext, encode_biguint, encode_ciphertext};
use crate::errors::SpadeError;
use crate::keys::MasterKeyPair;
use crate::params::GroupParams;
use crate::spade::{Spade, is_match};
use crate::store::{RecordStore, SubjectRecord};

use num_bigint::BigUint;

use rand::RngCore;

use serde::{Deserialize, Serialize};

/// A subject submitting its integer vector for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(rename = "subjectId")]
    pub subject_id: u64,
    pub data: Vec<u64>,
}

/// An analyst asking how many entries of a subject's vector equal a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "subjectId")]
    pub subject_id: u64,
    #[serde(rename = "queryValue")]
    pub query_value: u64,
}

/// Query outcome: on success, a 0/1 indicator vector with `1` at every
/// position whose plaintext equalled the query value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(rename = "decryptedResult", skip_serializing_if = "Option::is_none")]
    pub decrypted_result: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResponse {
    pub fn success(indicator: Vec<u64>) -> Self {
        Self {
            status: "success".to_string(),
            decrypted_result: Some(indicator),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            decrypted_result: None,
            message: Some(message.into()),
        }
    }
}

/// Runs the subject side of registration: draw a fresh `alpha`, compute the
/// registration key, encrypt the data vector and persist the encoded record.
///
/// The `alpha` is dropped on return; the scheme needs it only transiently.
///
/// # Errors
///
/// Propagates `LengthMismatch` from the engine, `DuplicateSubject` from the
/// store and `Serialization` from the codec.
pub fn register_subject<R, S>(
    params: &GroupParams,
    public_keys: &[BigUint],
    request: &RegistrationRequest,
    store: &mut S,
    rng: &mut R,
) -> Result<(), SpadeError>
where
    R: RngCore + ?Sized,
    S: RecordStore,
{
    let spade = Spade::new(params);

    let alpha = spade.random_alpha(rng);
    let registration_key = spade.register(&alpha);
    let ciphertext = spade.encrypt(public_keys, &alpha, &request.data, rng)?;

    store.insert(SubjectRecord {
        id: request.subject_id,
        registration_key: encode_biguint(&registration_key),
        ciphertext: encode_ciphertext(&ciphertext)?,
    })
}

/// Runs the curator/analyst side of a query against a stored record: derive a
/// fresh query key, decrypt and reduce to the 0/1 indicator vector.
///
/// Every failure, including an unregistered subject id, maps to an
/// error-status response rather than an `Err`; the wire contract has no other
/// failure channel.
pub fn handle_query<S: RecordStore>(
    params: &GroupParams,
    keys: &MasterKeyPair,
    request: &QueryRequest,
    store: &S,
) -> QueryResponse {
    let Some(record) = store.get(request.subject_id) else {
        return QueryResponse::error(SpadeError::RecordNotFound(request.subject_id).to_string());
    };

    match run_query(params, keys, request, record) {
        Ok(indicator) => QueryResponse::success(indicator),
        Err(e) => QueryResponse::error(e.to_string()),
    }
}

fn run_query(
    params: &GroupParams,
    keys: &MasterKeyPair,
    request: &QueryRequest,
    record: &SubjectRecord,
) -> Result<Vec<u64>, SpadeError> {
    let spade = Spade::new(params);

    let registration_key = decode_biguint(&record.registration_key);
    let ciphertext = decode_ciphertext(&record.ciphertext)?;

    let query_key =
        spade.derive_query_key(request.query_value, &keys.secret_keys, &registration_key)?;
    let decrypted = spade.decrypt(&query_key, request.query_value, &ciphertext)?;

    Ok(decrypted
        .iter()
        .map(|y| if is_match(y) { 1 } else { 0 })
        .collect())
}
