use serde::{Deserialize, Serialize};

use super::keys::{DjbEcPrivateKey, DjbEcPublicKey};

#[derive(Serialize, Deserialize, Clone)]
pub struct EcKeyPair {
    pub public_key: DjbEcPublicKey,
    pub private_key: DjbEcPrivateKey,
}

impl EcKeyPair {
    pub fn new(public_key: DjbEcPublicKey, private_key: DjbEcPrivateKey) -> Self {
        Self {
            public_key,
            private_key,
        }
    }
}
