use rand::rngs::OsRng;
use thiserror::Error;
use x25519_dalek::{x25519, PublicKey, StaticSecret};
use xeddsa::xed25519::{PrivateKey, PublicKey as XeddsaPublicKey};
use xeddsa::xeddsa::{Sign, Verify};

use super::key_pair::EcKeyPair;
use super::keys::{DjbEcPrivateKey, DjbEcPublicKey, DJB_TYPE};

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("bad key type: {0}")]
    BadKeyType(u8),
    #[error("bad key length: {0}")]
    BadKeyLength(usize),
}

pub fn generate_key_pair() -> EcKeyPair {
    let private = StaticSecret::random_from_rng(&mut OsRng);
    let public = PublicKey::from(&private);
    EcKeyPair::new(
        DjbEcPublicKey::new(*public.as_bytes()),
        DjbEcPrivateKey::new(private.to_bytes()),
    )
}

pub fn decode_point(bytes: &[u8]) -> Result<DjbEcPublicKey, CurveError> {
    if bytes.is_empty() {
        return Err(CurveError::BadKeyLength(0));
    }
    let key_type = bytes[0];
    if key_type != DJB_TYPE {
        return Err(CurveError::BadKeyType(key_type));
    }
    let key_bytes: [u8; 32] = bytes[1..]
        .try_into()
        .map_err(|_| CurveError::BadKeyLength(bytes.len()))?;
    Ok(DjbEcPublicKey::new(key_bytes))
}

/// XEdDSA signature with the Curve25519 private key acting as signer.
pub fn calculate_signature(signing_key: &DjbEcPrivateKey, message: &[u8]) -> [u8; 64] {
    let priv_key = PrivateKey(signing_key.serialize());
    let mut rng = OsRng;
    priv_key.sign(message, &mut rng)
}

pub fn verify_signature(signing_key: &DjbEcPublicKey, message: &[u8], signature: &[u8; 64]) -> bool {
    let pub_key = XeddsaPublicKey(signing_key.public_key());
    pub_key.verify(message, signature).is_ok()
}

pub fn calculate_shared_secret(our_private_key: [u8; 32], their_public_key: [u8; 32]) -> [u8; 32] {
    let secret = StaticSecret::from(our_private_key);
    x25519(secret.to_bytes(), their_public_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_secret_agrees() {
        let ours = generate_key_pair();
        let theirs = generate_key_pair();

        let a = calculate_shared_secret(ours.private_key.serialize(), theirs.public_key.public_key());
        let b = calculate_shared_secret(theirs.private_key.serialize(), ours.public_key.public_key());
        assert_eq!(a, b);
    }

    #[test]
    fn signature_round_trip() {
        let key_pair = generate_key_pair();
        let message = b"base key material";

        let signature = calculate_signature(&key_pair.private_key, message);
        assert!(verify_signature(&key_pair.public_key, message, &signature));

        let mut tampered = signature;
        tampered[0] ^= 0x01;
        assert!(!verify_signature(&key_pair.public_key, message, &tampered));
    }

    #[test]
    fn decode_point_rejects_bad_input() {
        let key_pair = generate_key_pair();
        let serialized = key_pair.public_key.serialize();

        assert_eq!(decode_point(&serialized).unwrap(), key_pair.public_key);
        assert!(decode_point(&[]).is_err());
        assert!(decode_point(&serialized[1..]).is_err());
        assert!(decode_point(&serialized[..20]).is_err());
    }
}
