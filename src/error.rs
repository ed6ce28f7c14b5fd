use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("policy load failed: {0}")]
    PolicyLoad(String),

    #[error("invalid policy: {0}")]
    PolicyValidation(String),

    #[error("invalid session record: {0}")]
    SessionParse(String),
}
