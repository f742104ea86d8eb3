use thiserror::Error;

use crate::address::AxolotlAddress;
use crate::ratchet::RatchetError;
pub use crate::store::StoreError;

/// Failure taxonomy of the session builder entry points.
///
/// `DuplicateMessage` and `NoSession` belong to the decrypt path layered
/// above; the builder itself reports duplicates by returning an absent
/// pre-key id instead of an error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("untrusted identity: {0}")]
    UntrustedIdentity(AxolotlAddress),
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
    #[error("invalid key id: {0}")]
    InvalidKeyId(String),
    #[error("invalid message: {0}")]
    InvalidMessage(String),
    #[error("stale key exchange")]
    StaleKeyExchange,
    #[error("duplicate message")]
    DuplicateMessage,
    #[error("no session with {0}")]
    NoSession(AxolotlAddress),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl From<RatchetError> for SessionError {
    fn from(_: RatchetError) -> Self {
        SessionError::InvalidKey("session key derivation failed")
    }
}
