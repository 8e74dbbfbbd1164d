use thiserror::Error;

/// Terminal access-control errors. Messages are the wire-level details the
/// gateway returns verbatim to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// Missing `Authorization` header or token absent from the directory.
    #[error("Token inválido o no proporcionado")]
    InvalidToken,
    /// Authenticated but the caller's role does not pass the gate.
    #[error("{0}")]
    Forbidden(String),
    /// Login with a username/password pair not in the credential records.
    #[error("Credenciales incorrectas")]
    InvalidCredentials,
}

impl AccessError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AccessError::InvalidToken => 1001,
            AccessError::Forbidden(_) => 1002,
            AccessError::InvalidCredentials => 1003,
        }
    }
}
