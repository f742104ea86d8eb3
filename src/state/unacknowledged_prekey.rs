use serde::{Deserialize, Serialize};

use crate::ecc::keys::DjbEcPublicKey;

/// What an outbound session still has to say about itself: the pre-key ids
/// it consumed and the base key it introduced, repeated on every message
/// until the peer acknowledges the session.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UnacknowledgedPreKeyMessageItems {
    pre_key_id: Option<u32>,
    signed_pre_key_id: Option<u32>,
    base_key: DjbEcPublicKey,
}

impl UnacknowledgedPreKeyMessageItems {
    pub fn new(
        pre_key_id: Option<u32>,
        signed_pre_key_id: Option<u32>,
        base_key: DjbEcPublicKey,
    ) -> Self {
        Self {
            pre_key_id,
            signed_pre_key_id,
            base_key,
        }
    }

    pub fn pre_key_id(&self) -> Option<u32> {
        self.pre_key_id
    }

    pub fn signed_pre_key_id(&self) -> Option<u32> {
        self.signed_pre_key_id
    }

    pub fn base_key(&self) -> &DjbEcPublicKey {
        &self.base_key
    }
}
