pub mod parameters;

use thiserror::Error;

pub use parameters::{AliceParameters, BobParameters, SymmetricParameters};

use crate::chain_key::ChainKey;
use crate::ecc::curve;
use crate::ecc::keys::DjbEcPublicKey;
use crate::kdf::{self, KdfError};
use crate::root_key::{RootKey, RootKeyError};
use crate::state::session_state::SessionState;

const KDF_INFO: &[u8] = b"WhisperText";
const DISCONTINUITY_BYTES: [u8; 32] = [0xFF; 32];

#[derive(Debug, Error)]
pub enum RatchetError {
    #[error("KDF error: {0}")]
    Kdf(#[from] KdfError),
    #[error("root key error: {0}")]
    RootKey(#[from] RootKeyError),
}

/// Populates a fresh session state for the initiating side.
pub fn initialize_alice_session(
    session_state: &mut SessionState,
    session_version: u32,
    parameters: &AliceParameters,
) -> Result<(), RatchetError> {
    session_state.set_session_version(session_version);
    session_state.set_remote_identity_key(parameters.their_identity_key.clone());
    session_state.set_local_identity_key(parameters.our_identity_key_pair.public_key.clone());

    let sending_ratchet_key = curve::generate_key_pair();

    let mut secrets = Vec::with_capacity(32 * 5);
    if session_version >= 3 {
        secrets.extend_from_slice(&DISCONTINUITY_BYTES);
    }
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_identity_key_pair.private_key.serialize(),
        parameters.their_signed_pre_key.public_key(),
    ));
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_base_key.private_key.serialize(),
        parameters.their_identity_key.public_key().public_key(),
    ));
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_base_key.private_key.serialize(),
        parameters.their_signed_pre_key.public_key(),
    ));
    if session_version >= 3 {
        if let Some(their_one_time_pre_key) = &parameters.their_one_time_pre_key {
            secrets.extend_from_slice(&curve::calculate_shared_secret(
                parameters.our_base_key.private_key.serialize(),
                their_one_time_pre_key.public_key(),
            ));
        }
    }

    let (root_key, chain_key) = derive_initial_keys(&secrets)?;
    let sending_chain = root_key.create_chain(&parameters.their_ratchet_key, &sending_ratchet_key)?;

    session_state.add_receiver_chain(parameters.their_ratchet_key.clone(), chain_key);
    session_state.set_sender_chain(sending_ratchet_key, sending_chain.chain_key);
    session_state.set_root_key(sending_chain.root_key);

    Ok(())
}

/// Populates a fresh session state for the responding side.
pub fn initialize_bob_session(
    session_state: &mut SessionState,
    session_version: u32,
    parameters: &BobParameters,
) -> Result<(), RatchetError> {
    session_state.set_session_version(session_version);
    session_state.set_remote_identity_key(parameters.their_identity_key.clone());
    session_state.set_local_identity_key(parameters.our_identity_key_pair.public_key.clone());

    let mut secrets = Vec::with_capacity(32 * 5);
    if session_version >= 3 {
        secrets.extend_from_slice(&DISCONTINUITY_BYTES);
    }
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_signed_pre_key.private_key.serialize(),
        parameters.their_identity_key.public_key().public_key(),
    ));
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_identity_key_pair.private_key.serialize(),
        parameters.their_base_key.public_key(),
    ));
    secrets.extend_from_slice(&curve::calculate_shared_secret(
        parameters.our_signed_pre_key.private_key.serialize(),
        parameters.their_base_key.public_key(),
    ));
    if session_version >= 3 {
        if let Some(our_one_time_pre_key) = &parameters.our_one_time_pre_key {
            secrets.extend_from_slice(&curve::calculate_shared_secret(
                our_one_time_pre_key.private_key.serialize(),
                parameters.their_base_key.public_key(),
            ));
        }
    }

    let (root_key, chain_key) = derive_initial_keys(&secrets)?;

    session_state.set_sender_chain(parameters.our_ratchet_key.clone(), chain_key);
    session_state.set_root_key(root_key);

    Ok(())
}

/// Interactive exchange: the side with the lexicographically smaller base
/// key plays Alice, with the peer's base key standing in for the signed
/// pre-key and no one-time pre-key in the mix.
pub fn initialize_symmetric_session(
    session_state: &mut SessionState,
    session_version: u32,
    parameters: &SymmetricParameters,
) -> Result<(), RatchetError> {
    if is_alice(&parameters.our_base_key.public_key, &parameters.their_base_key) {
        let alice_parameters = AliceParameters {
            our_identity_key_pair: parameters.our_identity_key_pair.clone(),
            our_base_key: parameters.our_base_key.clone(),
            their_identity_key: parameters.their_identity_key.clone(),
            their_signed_pre_key: parameters.their_base_key.clone(),
            their_ratchet_key: parameters.their_ratchet_key.clone(),
            their_one_time_pre_key: None,
        };
        initialize_alice_session(session_state, session_version, &alice_parameters)
    } else {
        let bob_parameters = BobParameters {
            our_identity_key_pair: parameters.our_identity_key_pair.clone(),
            our_signed_pre_key: parameters.our_base_key.clone(),
            our_one_time_pre_key: None,
            our_ratchet_key: parameters.our_ratchet_key.clone(),
            their_identity_key: parameters.their_identity_key.clone(),
            their_base_key: parameters.their_base_key.clone(),
        };
        initialize_bob_session(session_state, session_version, &bob_parameters)
    }
}

fn is_alice(our_base_key: &DjbEcPublicKey, their_base_key: &DjbEcPublicKey) -> bool {
    our_base_key.serialize() < their_base_key.serialize()
}

fn derive_initial_keys(secrets: &[u8]) -> Result<(RootKey, ChainKey), KdfError> {
    let derived = kdf::derive_secrets(secrets, None, KDF_INFO, 64)?;
    Ok((
        RootKey::new(derived[0..32].try_into().unwrap()),
        ChainKey::new(derived[32..64].try_into().unwrap(), 0),
    ))
}
