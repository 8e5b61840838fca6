#[derive(thiserror::Error, Debug)]
pub enum SpadeError {
    /// Error when constructing group parameters that do not form a usable group
    /// (even/tiny modulus, generator not coprime to the modulus, zero capacity).
    #[error("InvalidGroupParams: {0}")]
    InvalidGroupParams(String),
    /// Error when a modular inverse does not exist (gcd(base, modulus) != 1).
    #[error("NotInvertible: {0}")]
    NotInvertible(String),
    /// A vector argument does not have the length fixed by the group parameters.
    #[error("LengthMismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("RecordNotFound: no record for subject {0}")]
    RecordNotFound(u64),
    #[error("DuplicateSubject: subject {0} is already registered")]
    DuplicateSubject(u64),

    #[error("SerializationError: {0}")]
    Serialization(String),
    #[error("Data serialization: {0}")]
    Json(#[from] serde_json::Error),
}
