//! Session establishment for the Axolotl ratcheted messaging protocol.
//!
//! Given long-term identity keys and a supply of pre-published ephemeral
//! key material, [`SessionBuilder`] negotiates a shared, forward-secure
//! session from one of three stimuli: a pre-key bundle pulled from a
//! directory, a received first message carrying an embedded pre-key, or an
//! interactive key-exchange frame. The resulting [`SessionRecord`] seeds
//! the message-encryption ratchet that runs above this crate.

pub mod address;
pub mod chain_key;
pub mod ecc;
pub mod error;
pub mod identity;
pub mod kdf;
pub mod protocol;
pub mod ratchet;
pub mod root_key;
pub mod session;
pub mod state;
pub mod store;
pub mod util;

pub use address::AxolotlAddress;
pub use error::SessionError;
pub use session::SessionBuilder;
pub use state::session_record::SessionRecord;
