use serde::{Deserialize, Serialize};

use crate::chain_key::ChainKey;
use crate::ecc::key_pair::EcKeyPair;
use crate::ecc::keys::DjbEcPublicKey;
use crate::identity::{IdentityKey, IdentityKeyPair};
use crate::protocol::CURRENT_VERSION;
use crate::root_key::RootKey;
use crate::state::pending_key_exchange::PendingKeyExchange;
use crate::state::unacknowledged_prekey::UnacknowledgedPreKeyMessageItems;

const MAX_RECEIVER_CHAINS: usize = 5;

#[derive(Serialize, Deserialize, Clone)]
pub struct SenderChain {
    pub ratchet_key_pair: EcKeyPair,
    pub chain_key: ChainKey,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ReceiverChain {
    pub ratchet_key: DjbEcPublicKey,
    pub chain_key: ChainKey,
}

/// The mutable record of one established (or pending) session.
///
/// Root and chain keys are installed by the ratchet initializer; the
/// surrounding bookkeeping (registration ids, the distinguishing Alice
/// base key, pending handshake material) is installed by the builder.
#[derive(Serialize, Deserialize, Clone)]
pub struct SessionState {
    session_version: u32,
    local_identity_public: IdentityKey,
    remote_identity_public: IdentityKey,
    root_key: RootKey,
    sender_chain: Option<SenderChain>,
    receiver_chains: Vec<ReceiverChain>,
    pending_pre_key: Option<UnacknowledgedPreKeyMessageItems>,
    pending_key_exchange: Option<PendingKeyExchange>,
    local_registration_id: u32,
    remote_registration_id: u32,
    alice_base_key: Vec<u8>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_version: CURRENT_VERSION,
            local_identity_public: IdentityKey::new(DjbEcPublicKey::new([0; 32])),
            remote_identity_public: IdentityKey::new(DjbEcPublicKey::new([0; 32])),
            root_key: RootKey::new([0; 32]),
            sender_chain: None,
            receiver_chains: Vec::new(),
            pending_pre_key: None,
            pending_key_exchange: None,
            local_registration_id: 0,
            remote_registration_id: 0,
            alice_base_key: Vec::new(),
        }
    }

    pub fn session_version(&self) -> u32 {
        self.session_version
    }

    pub fn set_session_version(&mut self, version: u32) {
        self.session_version = version;
    }

    pub fn local_identity_public(&self) -> &IdentityKey {
        &self.local_identity_public
    }

    pub fn set_local_identity_key(&mut self, identity_key: IdentityKey) {
        self.local_identity_public = identity_key;
    }

    pub fn remote_identity_public(&self) -> &IdentityKey {
        &self.remote_identity_public
    }

    pub fn set_remote_identity_key(&mut self, identity_key: IdentityKey) {
        self.remote_identity_public = identity_key;
    }

    pub fn root_key(&self) -> &RootKey {
        &self.root_key
    }

    pub fn set_root_key(&mut self, root_key: RootKey) {
        self.root_key = root_key;
    }

    pub fn sender_chain(&self) -> Option<&SenderChain> {
        self.sender_chain.as_ref()
    }

    pub fn set_sender_chain(&mut self, ratchet_key_pair: EcKeyPair, chain_key: ChainKey) {
        self.sender_chain = Some(SenderChain {
            ratchet_key_pair,
            chain_key,
        });
    }

    pub fn add_receiver_chain(&mut self, their_ratchet_key: DjbEcPublicKey, chain_key: ChainKey) {
        self.receiver_chains.push(ReceiverChain {
            ratchet_key: their_ratchet_key,
            chain_key,
        });
        if self.receiver_chains.len() > MAX_RECEIVER_CHAINS {
            self.receiver_chains.remove(0);
        }
    }

    pub fn find_receiver_chain(&self, their_ratchet_key: &DjbEcPublicKey) -> Option<&ReceiverChain> {
        self.receiver_chains
            .iter()
            .find(|chain| chain.ratchet_key == *their_ratchet_key)
    }

    pub fn local_registration_id(&self) -> u32 {
        self.local_registration_id
    }

    pub fn set_local_registration_id(&mut self, registration_id: u32) {
        self.local_registration_id = registration_id;
    }

    pub fn remote_registration_id(&self) -> u32 {
        self.remote_registration_id
    }

    pub fn set_remote_registration_id(&mut self, registration_id: u32) {
        self.remote_registration_id = registration_id;
    }

    /// The serialized base key the initiator introduced; it is what makes
    /// one establishment distinguishable from another.
    pub fn alice_base_key(&self) -> &[u8] {
        &self.alice_base_key
    }

    pub fn set_alice_base_key(&mut self, alice_base_key: Vec<u8>) {
        self.alice_base_key = alice_base_key;
    }

    pub fn set_unacknowledged_prekey_message(
        &mut self,
        pre_key_id: Option<u32>,
        signed_pre_key_id: Option<u32>,
        base_key: DjbEcPublicKey,
    ) {
        self.pending_pre_key = Some(UnacknowledgedPreKeyMessageItems::new(
            pre_key_id,
            signed_pre_key_id,
            base_key,
        ));
    }

    pub fn has_unacknowledged_prekey_message(&self) -> bool {
        self.pending_pre_key.is_some()
    }

    pub fn unacknowledged_prekey_message(&self) -> Option<&UnacknowledgedPreKeyMessageItems> {
        self.pending_pre_key.as_ref()
    }

    pub fn clear_unacknowledged_prekey_message(&mut self) {
        self.pending_pre_key = None;
    }

    pub fn set_pending_key_exchange(
        &mut self,
        sequence: u32,
        base_key_pair: EcKeyPair,
        ratchet_key_pair: EcKeyPair,
        identity_key_pair: IdentityKeyPair,
    ) {
        self.pending_key_exchange = Some(PendingKeyExchange::new(
            sequence,
            base_key_pair,
            ratchet_key_pair,
            identity_key_pair,
        ));
    }

    pub fn has_pending_key_exchange(&self) -> bool {
        self.pending_key_exchange.is_some()
    }

    pub fn pending_key_exchange(&self) -> Option<&PendingKeyExchange> {
        self.pending_key_exchange.as_ref()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
