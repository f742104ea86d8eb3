use serde::{Deserialize, Serialize};

pub const DJB_TYPE: u8 = 0x05;

/// A Curve25519 public key. The serialized form is type-prefixed with
/// [`DJB_TYPE`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DjbEcPublicKey {
    public_key: [u8; 32],
}

impl DjbEcPublicKey {
    pub fn new(public_key: [u8; 32]) -> Self {
        Self { public_key }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(33);
        v.push(DJB_TYPE);
        v.extend_from_slice(&self.public_key);
        v
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct DjbEcPrivateKey {
    private_key: [u8; 32],
}

impl DjbEcPrivateKey {
    pub fn new(private_key: [u8; 32]) -> Self {
        Self { private_key }
    }

    pub fn serialize(&self) -> [u8; 32] {
        self.private_key
    }
}
