use serde::{Deserialize, Serialize};

use crate::ecc::curve::{self, CurveError};
use crate::ecc::keys::{DjbEcPrivateKey, DjbEcPublicKey};

/// A long-lived Curve25519 identity public key.
///
/// Remote identities are pinned on the first trust-accepting operation;
/// equality against the pin is what [`crate::store::IdentityKeyStore`]
/// implementations compare.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentityKey {
    public_key: DjbEcPublicKey,
}

impl IdentityKey {
    pub fn new(public_key: DjbEcPublicKey) -> Self {
        Self { public_key }
    }

    pub fn public_key(&self) -> &DjbEcPublicKey {
        &self.public_key
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.public_key.serialize()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, CurveError> {
        Ok(IdentityKey::new(curve::decode_point(bytes)?))
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct IdentityKeyPair {
    pub public_key: IdentityKey,
    pub private_key: DjbEcPrivateKey,
}

impl IdentityKeyPair {
    pub fn new(public_key: IdentityKey, private_key: DjbEcPrivateKey) -> Self {
        Self {
            public_key,
            private_key,
        }
    }
}
