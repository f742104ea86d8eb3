use chrono::Utc;
use rand::{thread_rng, Rng};

use crate::ecc::curve;
use crate::identity::{IdentityKey, IdentityKeyPair};
use crate::state::prekey_record::{PreKeyRecord, SignedPreKeyRecord};

pub fn generate_identity_key_pair() -> IdentityKeyPair {
    let key_pair = curve::generate_key_pair();
    IdentityKeyPair::new(
        IdentityKey::new(key_pair.public_key),
        key_pair.private_key,
    )
}

pub fn generate_pre_keys(start: u32, count: u32) -> Vec<PreKeyRecord> {
    (start..start + count)
        .map(|id| PreKeyRecord::new(id, curve::generate_key_pair()))
        .collect()
}

pub fn generate_signed_pre_key(
    identity_key_pair: &IdentityKeyPair,
    signed_pre_key_id: u32,
) -> SignedPreKeyRecord {
    let key_pair = curve::generate_key_pair();
    let signature = curve::calculate_signature(
        &identity_key_pair.private_key,
        &key_pair.public_key.serialize(),
    );
    SignedPreKeyRecord::new(signed_pre_key_id, key_pair, signature, Utc::now())
}

/// Clients generate this once, at install time. The valid range is 1-16380.
pub fn generate_registration_id() -> u32 {
    thread_rng().gen_range(1..=16380)
}

/// Random 16-bit sequence tying an interactive initiate to its response.
pub fn generate_key_exchange_sequence() -> u32 {
    thread_rng().gen_range(0..=0xFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_pre_key_signature_verifies_under_identity_key() {
        let identity = generate_identity_key_pair();
        let record = generate_signed_pre_key(&identity, 7);

        let signature: [u8; 64] = record.signature().try_into().unwrap();
        assert!(curve::verify_signature(
            identity.public_key.public_key(),
            &record.key_pair().public_key.serialize(),
            &signature,
        ));
        assert_eq!(record.id(), 7);
    }

    #[test]
    fn pre_key_batches_use_sequential_ids() {
        let records = generate_pre_keys(100, 5);
        let ids: Vec<u32> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104]);
    }

    #[test]
    fn generated_values_stay_in_range() {
        for _ in 0..32 {
            let registration_id = generate_registration_id();
            assert!((1..=16380).contains(&registration_id));
            assert!(generate_key_exchange_sequence() <= 0xFFFF);
        }
    }
}
