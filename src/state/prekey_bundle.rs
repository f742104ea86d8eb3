use crate::ecc::keys::DjbEcPublicKey;
use crate::identity::IdentityKey;

/// The signed pre-key advertised in a bundle, with the identity-key
/// signature over its serialized public key.
#[derive(Debug, Clone)]
pub struct SignedPreKeyPublic {
    pub id: u32,
    pub public_key: DjbEcPublicKey,
    pub signature: [u8; 64],
}

/// A directory-published advertisement of a remote device's key material.
///
/// At least one of `signed_pre_key` and `pre_key_public` must be present;
/// a bundle without a signed pre-key negotiates a version 2 session.
#[derive(Debug, Clone)]
pub struct PreKeyBundle {
    pub registration_id: u32,
    pub device_id: u32,
    pub pre_key_id: Option<u32>,
    pub pre_key_public: Option<DjbEcPublicKey>,
    pub signed_pre_key: Option<SignedPreKeyPublic>,
    pub identity_key: IdentityKey,
}
