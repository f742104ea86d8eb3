use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain_key::ChainKey;
use crate::ecc::curve::calculate_shared_secret;
use crate::ecc::key_pair::EcKeyPair;
use crate::ecc::keys::DjbEcPublicKey;
use crate::kdf;

const DERIVED_SECRETS_SIZE: usize = 64;
const KDF_INFO: &[u8] = b"WhisperRatchet";

#[derive(Debug, Error)]
pub enum RootKeyError {
    #[error("KDF error: {0}")]
    Kdf(#[from] kdf::KdfError),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RootKey {
    key: [u8; 32],
}

pub struct SessionKeyPair {
    pub root_key: RootKey,
    pub chain_key: ChainKey,
}

impl RootKey {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    pub fn key(&self) -> [u8; 32] {
        self.key
    }

    /// One DH ratchet step: mixes a fresh shared secret into the root and
    /// yields the next (root, chain) pair.
    pub fn create_chain(
        &self,
        their_ratchet_key: &DjbEcPublicKey,
        our_ratchet_key: &EcKeyPair,
    ) -> Result<SessionKeyPair, RootKeyError> {
        let shared_secret = calculate_shared_secret(
            our_ratchet_key.private_key.serialize(),
            their_ratchet_key.public_key(),
        );

        let derived = kdf::derive_secrets(
            &shared_secret,
            Some(&self.key),
            KDF_INFO,
            DERIVED_SECRETS_SIZE,
        )?;

        Ok(SessionKeyPair {
            root_key: RootKey::new(derived[0..32].try_into().unwrap()),
            chain_key: ChainKey::new(derived[32..64].try_into().unwrap(), 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::curve::generate_key_pair;

    #[test]
    fn create_chain_agrees_for_both_ratchet_directions() {
        let root = RootKey::new([3u8; 32]);
        let ours = generate_key_pair();
        let theirs = generate_key_pair();

        let forward = root.create_chain(&theirs.public_key, &ours).unwrap();
        let mirrored = root.create_chain(&ours.public_key, &theirs).unwrap();

        assert_eq!(forward.root_key, mirrored.root_key);
        assert_eq!(forward.chain_key, mirrored.chain_key);
        assert_ne!(forward.root_key.key(), root.key());
    }
}
