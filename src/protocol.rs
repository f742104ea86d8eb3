use crate::ecc::keys::DjbEcPublicKey;
use crate::identity::IdentityKey;

/// Highest session version this library negotiates.
pub const CURRENT_VERSION: u32 = 3;

/// Wire sentinel for "no one-time pre-key". Pre-key ids are absent/present
/// `Option`s everywhere inside this crate; codecs layered above translate
/// the sentinel at the boundary.
pub const MEDIUM_MAX_VALUE: u32 = 0x00FF_FFFF;

/// The first inbound message of a session, carrying the initiator's
/// ephemeral base key alongside the ciphertext envelope.
///
/// Wire parsing happens a layer above; this is the already-decoded value.
#[derive(Clone, Debug)]
pub struct PreKeyWhisperMessage {
    pub message_version: u32,
    pub registration_id: u32,
    pub pre_key_id: Option<u32>,
    /// Present on version 3 messages only.
    pub signed_pre_key_id: Option<u32>,
    pub base_key: DjbEcPublicKey,
    pub identity_key: IdentityKey,
    /// The inner ciphertext, opaque to session establishment.
    pub message: Vec<u8>,
}

/// One frame of the interactive key exchange.
#[derive(Clone, Debug)]
pub struct KeyExchangeMessage {
    pub version: u32,
    pub max_version: u32,
    pub sequence: u32,
    pub flags: u32,
    pub base_key: DjbEcPublicKey,
    pub base_key_signature: [u8; 64],
    pub ratchet_key: DjbEcPublicKey,
    pub identity_key: IdentityKey,
}

impl KeyExchangeMessage {
    pub const INITIATE_FLAG: u32 = 0x01;
    pub const RESPONSE_FLAG: u32 = 0x02;
    pub const SIMULTANEOUS_INITIATE_FLAG: u32 = 0x04;

    pub fn new(
        version: u32,
        sequence: u32,
        flags: u32,
        base_key: DjbEcPublicKey,
        base_key_signature: [u8; 64],
        ratchet_key: DjbEcPublicKey,
        identity_key: IdentityKey,
    ) -> Self {
        Self {
            version,
            max_version: CURRENT_VERSION,
            sequence,
            flags,
            base_key,
            base_key_signature,
            ratchet_key,
            identity_key,
        }
    }

    pub fn is_initiate(&self) -> bool {
        self.flags & Self::INITIATE_FLAG != 0
    }

    pub fn is_response(&self) -> bool {
        self.flags & Self::RESPONSE_FLAG != 0
    }

    pub fn is_response_for_simultaneous_initiate(&self) -> bool {
        self.flags & Self::SIMULTANEOUS_INITIATE_FLAG != 0
    }
}
