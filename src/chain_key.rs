use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

const CHAIN_KEY_SEED: &[u8] = &[0x02];

/// A link in the sending or receiving hash-ratchet chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainKey {
    key: [u8; 32],
    index: u32,
}

impl ChainKey {
    pub fn new(key: [u8; 32], index: u32) -> Self {
        Self { key, index }
    }

    pub fn key(&self) -> [u8; 32] {
        self.key
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn next_key(&self) -> ChainKey {
        ChainKey::new(self.base_material(CHAIN_KEY_SEED), self.index + 1)
    }

    fn base_material(&self, seed: &[u8]) -> [u8; 32] {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key).unwrap();
        mac.update(seed);
        mac.finalize().into_bytes().into()
    }
}
