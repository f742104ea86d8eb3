use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ecc::key_pair::EcKeyPair;

/// A published one-time pre-key, consumed exactly once on inbound session
/// establishment.
#[derive(Serialize, Deserialize, Clone)]
pub struct PreKeyRecord {
    id: u32,
    key_pair: EcKeyPair,
}

impl PreKeyRecord {
    pub fn new(id: u32, key_pair: EcKeyPair) -> Self {
        Self { id, key_pair }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn key_pair(&self) -> &EcKeyPair {
        &self.key_pair
    }
}

/// A medium-lived pre-key whose public half is signed by the identity key.
/// Rotated on a slow cadence; retained until no in-flight session still
/// references its id.
#[derive(Serialize, Deserialize, Clone)]
pub struct SignedPreKeyRecord {
    id: u32,
    key_pair: EcKeyPair,
    signature: Vec<u8>,
    timestamp: DateTime<Utc>,
}

impl SignedPreKeyRecord {
    pub fn new(id: u32, key_pair: EcKeyPair, signature: [u8; 64], timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            key_pair,
            signature: signature.to_vec(),
            timestamp,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn key_pair(&self) -> &EcKeyPair {
        &self.key_pair
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
