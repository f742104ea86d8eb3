use crate::ecc::key_pair::EcKeyPair;
use crate::ecc::keys::DjbEcPublicKey;
use crate::identity::{IdentityKey, IdentityKeyPair};

/// Inputs when we initiated with the peer's published keys.
pub struct AliceParameters {
    pub our_identity_key_pair: IdentityKeyPair,
    pub our_base_key: EcKeyPair,
    pub their_identity_key: IdentityKey,
    pub their_signed_pre_key: DjbEcPublicKey,
    pub their_ratchet_key: DjbEcPublicKey,
    pub their_one_time_pre_key: Option<DjbEcPublicKey>,
}

/// Inputs when the peer initiated against keys we published.
pub struct BobParameters {
    pub our_identity_key_pair: IdentityKeyPair,
    pub our_signed_pre_key: EcKeyPair,
    pub our_one_time_pre_key: Option<EcKeyPair>,
    pub our_ratchet_key: EcKeyPair,
    pub their_identity_key: IdentityKey,
    pub their_base_key: DjbEcPublicKey,
}

/// Inputs for an interactive exchange where both sides contributed equal
/// material; role assignment happens inside the initializer.
pub struct SymmetricParameters {
    pub our_base_key: EcKeyPair,
    pub our_ratchet_key: EcKeyPair,
    pub our_identity_key_pair: IdentityKeyPair,
    pub their_base_key: DjbEcPublicKey,
    pub their_ratchet_key: DjbEcPublicKey,
    pub their_identity_key: IdentityKey,
}
