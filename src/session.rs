use std::sync::Arc;

use crate::address::AxolotlAddress;
use crate::ecc::curve;
use crate::error::SessionError;
use crate::protocol::{KeyExchangeMessage, PreKeyWhisperMessage, CURRENT_VERSION};
use crate::ratchet::{self, AliceParameters, BobParameters, SymmetricParameters};
use crate::state::prekey_bundle::PreKeyBundle;
use crate::state::session_record::SessionRecord;
use crate::store::AxolotlStore;
use crate::util::keyhelper;

/// Negotiates sessions with one remote address.
///
/// The builder performs no internal locking; callers serialize operations
/// per remote address. Every entry point is a straight-line
/// compute-and-commit sequence whose only blocking is the stores.
pub struct SessionBuilder<S: AxolotlStore> {
    store: Arc<S>,
    remote_address: AxolotlAddress,
}

impl<S: AxolotlStore> SessionBuilder<S> {
    pub fn new(store: Arc<S>, remote_address: AxolotlAddress) -> Self {
        Self {
            store,
            remote_address,
        }
    }

    /// Builds an outbound session from a pre-key bundle fetched from the
    /// directory. Commits the session and pins the peer's identity.
    pub fn process_bundle(&self, bundle: &PreKeyBundle) -> Result<(), SessionError> {
        let their_identity_key = &bundle.identity_key;

        if !self
            .store
            .is_trusted_identity(self.remote_address.name(), their_identity_key)?
        {
            return Err(SessionError::UntrustedIdentity(self.remote_address.clone()));
        }

        if let Some(signed_pre_key) = &bundle.signed_pre_key {
            if !curve::verify_signature(
                their_identity_key.public_key(),
                &signed_pre_key.public_key.serialize(),
                &signed_pre_key.signature,
            ) {
                log::warn!(
                    "rejecting bundle from {}: bad signed pre-key signature",
                    self.remote_address
                );
                return Err(SessionError::InvalidKey("invalid signature on device key"));
            }
        }

        let supports_v3 = bundle.signed_pre_key.is_some();
        let their_signed_pre_key = match (&bundle.signed_pre_key, &bundle.pre_key_public) {
            (Some(signed_pre_key), _) => signed_pre_key.public_key.clone(),
            (None, Some(pre_key)) => pre_key.clone(),
            (None, None) => {
                return Err(SessionError::InvalidKey(
                    "both signed and unsigned pre-keys are absent",
                ))
            }
        };
        let their_one_time_pre_key_id = bundle.pre_key_public.as_ref().and(bundle.pre_key_id);

        let mut session_record = self.store.load_session(&self.remote_address)?;
        let our_base_key = curve::generate_key_pair();

        let parameters = AliceParameters {
            our_identity_key_pair: self.store.get_identity_key_pair()?,
            our_base_key: our_base_key.clone(),
            their_identity_key: bundle.identity_key.clone(),
            their_signed_pre_key: their_signed_pre_key.clone(),
            their_ratchet_key: their_signed_pre_key,
            their_one_time_pre_key: if supports_v3 {
                bundle.pre_key_public.clone()
            } else {
                None
            },
        };

        if !session_record.is_fresh() {
            session_record.archive_current_state();
        }

        ratchet::initialize_alice_session(
            session_record.session_state_mut(),
            if supports_v3 { 3 } else { 2 },
            &parameters,
        )?;

        let state = session_record.session_state_mut();
        state.set_unacknowledged_prekey_message(
            their_one_time_pre_key_id,
            bundle.signed_pre_key.as_ref().map(|spk| spk.id),
            our_base_key.public_key.clone(),
        );
        state.set_local_registration_id(self.store.get_local_registration_id()?);
        state.set_remote_registration_id(bundle.registration_id);
        state.set_alice_base_key(our_base_key.public_key.serialize());

        // Session first, pin second: a crash in between leaves a recoverable
        // session-less state rather than a pin with no session behind it.
        self.store
            .store_session(&self.remote_address, &session_record)?;
        self.store
            .save_identity(self.remote_address.name(), their_identity_key)?;

        Ok(())
    }

    /// Builds an inbound session from the first message of a conversation.
    ///
    /// Returns the id of the one-time pre-key the message consumed, if any;
    /// the caller deletes it and commits the session record, so both can
    /// join the surrounding decrypt transaction.
    pub fn process_prekey_message(
        &self,
        session_record: &mut SessionRecord,
        message: &PreKeyWhisperMessage,
    ) -> Result<Option<u32>, SessionError> {
        let their_identity_key = &message.identity_key;

        if !self
            .store
            .is_trusted_identity(self.remote_address.name(), their_identity_key)?
        {
            return Err(SessionError::UntrustedIdentity(self.remote_address.clone()));
        }

        let unsigned_pre_key_id = match message.message_version {
            2 => self.process_prekey_v2(session_record, message)?,
            3 => self.process_prekey_v3(session_record, message)?,
            version => {
                return Err(SessionError::InvalidMessage(format!(
                    "unknown version {version}"
                )))
            }
        };

        self.store
            .save_identity(self.remote_address.name(), their_identity_key)?;

        Ok(unsigned_pre_key_id)
    }

    fn process_prekey_v3(
        &self,
        session_record: &mut SessionRecord,
        message: &PreKeyWhisperMessage,
    ) -> Result<Option<u32>, SessionError> {
        if session_record.has_session_state(message.message_version, &message.base_key.serialize())
        {
            log::debug!(
                "session with {} already built for this base key, ignoring duplicate",
                self.remote_address
            );
            return Ok(None);
        }

        let signed_pre_key_id = message.signed_pre_key_id.ok_or_else(|| {
            SessionError::InvalidMessage("v3 message without a signed pre-key id".to_string())
        })?;
        let our_signed_pre_key = self
            .store
            .load_signed_prekey(signed_pre_key_id)?
            .ok_or_else(|| {
                SessionError::InvalidKeyId(format!("no such signed pre-key: {signed_pre_key_id}"))
            })?;

        let our_one_time_pre_key = match message.pre_key_id {
            Some(pre_key_id) => {
                log::debug!(
                    "processing pre-key message from {} with one-time pre-key {pre_key_id}",
                    self.remote_address
                );
                Some(self.store.load_prekey(pre_key_id)?.ok_or_else(|| {
                    SessionError::InvalidKeyId(format!("no such pre-key: {pre_key_id}"))
                })?)
            }
            None => None,
        };

        let parameters = BobParameters {
            our_identity_key_pair: self.store.get_identity_key_pair()?,
            our_signed_pre_key: our_signed_pre_key.key_pair().clone(),
            our_one_time_pre_key: our_one_time_pre_key.map(|record| record.key_pair().clone()),
            our_ratchet_key: our_signed_pre_key.key_pair().clone(),
            their_identity_key: message.identity_key.clone(),
            their_base_key: message.base_key.clone(),
        };

        if !session_record.is_fresh() {
            session_record.archive_current_state();
        }

        ratchet::initialize_bob_session(
            session_record.session_state_mut(),
            message.message_version,
            &parameters,
        )?;

        let state = session_record.session_state_mut();
        state.set_local_registration_id(self.store.get_local_registration_id()?);
        state.set_remote_registration_id(message.registration_id);
        state.set_alice_base_key(message.base_key.serialize());

        Ok(message.pre_key_id)
    }

    fn process_prekey_v2(
        &self,
        session_record: &mut SessionRecord,
        message: &PreKeyWhisperMessage,
    ) -> Result<Option<u32>, SessionError> {
        let pre_key_id = message.pre_key_id.ok_or_else(|| {
            SessionError::InvalidKeyId("v2 message requires a one-time pre-key id".to_string())
        })?;

        if !self.store.contains_prekey(pre_key_id)?
            && self.store.contains_session(&self.remote_address)?
        {
            log::debug!(
                "one-time pre-key {pre_key_id} already consumed and a session with {} exists, ignoring",
                self.remote_address
            );
            return Ok(None);
        }

        let our_pre_key = self
            .store
            .load_prekey(pre_key_id)?
            .ok_or_else(|| SessionError::InvalidKeyId(format!("no such pre-key: {pre_key_id}")))?;

        // Version 2 has no signed pre-key; the one-time key fills both roles.
        let parameters = BobParameters {
            our_identity_key_pair: self.store.get_identity_key_pair()?,
            our_signed_pre_key: our_pre_key.key_pair().clone(),
            our_one_time_pre_key: None,
            our_ratchet_key: our_pre_key.key_pair().clone(),
            their_identity_key: message.identity_key.clone(),
            their_base_key: message.base_key.clone(),
        };

        if !session_record.is_fresh() {
            session_record.archive_current_state();
        }

        ratchet::initialize_bob_session(
            session_record.session_state_mut(),
            message.message_version,
            &parameters,
        )?;

        let state = session_record.session_state_mut();
        state.set_local_registration_id(self.store.get_local_registration_id()?);
        state.set_remote_registration_id(message.registration_id);
        state.set_alice_base_key(message.base_key.serialize());

        Ok(Some(pre_key_id))
    }

    /// Starts an interactive key exchange; the returned message goes to the
    /// peer, and the material behind it is parked on the session record
    /// until the response arrives.
    pub fn initiate_key_exchange(&self) -> Result<KeyExchangeMessage, SessionError> {
        let sequence = keyhelper::generate_key_exchange_sequence();
        let base_key = curve::generate_key_pair();
        let ratchet_key = curve::generate_key_pair();
        let identity_key_pair = self.store.get_identity_key_pair()?;
        let base_key_signature = curve::calculate_signature(
            &identity_key_pair.private_key,
            &base_key.public_key.serialize(),
        );

        let mut session_record = self.store.load_session(&self.remote_address)?;
        session_record.session_state_mut().set_pending_key_exchange(
            sequence,
            base_key.clone(),
            ratchet_key.clone(),
            identity_key_pair.clone(),
        );
        self.store
            .store_session(&self.remote_address, &session_record)?;

        // Version 2 on the wire for interoperability; the peer upgrades
        // through max_version.
        Ok(KeyExchangeMessage::new(
            2,
            sequence,
            KeyExchangeMessage::INITIATE_FLAG,
            base_key.public_key,
            base_key_signature,
            ratchet_key.public_key,
            identity_key_pair.public_key,
        ))
    }

    /// Handles an inbound key-exchange frame. An initiate produces the
    /// response to send back; a response completes our own initiate and
    /// produces nothing.
    pub fn process_key_exchange(
        &self,
        message: &KeyExchangeMessage,
    ) -> Result<Option<KeyExchangeMessage>, SessionError> {
        if !self
            .store
            .is_trusted_identity(self.remote_address.name(), &message.identity_key)?
        {
            return Err(SessionError::UntrustedIdentity(self.remote_address.clone()));
        }

        if message.is_initiate() {
            Ok(Some(self.process_initiate(message)?))
        } else {
            self.process_response(message)?;
            Ok(None)
        }
    }

    fn process_initiate(
        &self,
        message: &KeyExchangeMessage,
    ) -> Result<KeyExchangeMessage, SessionError> {
        let mut flags = KeyExchangeMessage::RESPONSE_FLAG;
        let mut session_record = self.store.load_session(&self.remote_address)?;

        if message.version >= 3
            && !curve::verify_signature(
                message.identity_key.public_key(),
                &message.base_key.serialize(),
                &message.base_key_signature,
            )
        {
            return Err(SessionError::InvalidKey("bad signature"));
        }

        let parameters = match session_record.session_state().pending_key_exchange() {
            None => SymmetricParameters {
                our_identity_key_pair: self.store.get_identity_key_pair()?,
                our_base_key: curve::generate_key_pair(),
                our_ratchet_key: curve::generate_key_pair(),
                their_base_key: message.base_key.clone(),
                their_ratchet_key: message.ratchet_key.clone(),
                their_identity_key: message.identity_key.clone(),
            },
            // Both sides initiated at once; finish the handshake with the
            // material we already put on the wire.
            Some(pending) => {
                flags |= KeyExchangeMessage::SIMULTANEOUS_INITIATE_FLAG;
                SymmetricParameters {
                    our_identity_key_pair: pending.local_identity_key_pair().clone(),
                    our_base_key: pending.local_base_key_pair().clone(),
                    our_ratchet_key: pending.local_ratchet_key_pair().clone(),
                    their_base_key: message.base_key.clone(),
                    their_ratchet_key: message.ratchet_key.clone(),
                    their_identity_key: message.identity_key.clone(),
                }
            }
        };

        if !session_record.is_fresh() {
            session_record.archive_current_state();
        }

        ratchet::initialize_symmetric_session(
            session_record.session_state_mut(),
            message.max_version.min(CURRENT_VERSION),
            &parameters,
        )?;

        let session_version = session_record.session_state().session_version();
        self.store
            .store_session(&self.remote_address, &session_record)?;
        self.store
            .save_identity(self.remote_address.name(), &message.identity_key)?;

        let base_key_signature = curve::calculate_signature(
            &parameters.our_identity_key_pair.private_key,
            &parameters.our_base_key.public_key.serialize(),
        );

        Ok(KeyExchangeMessage::new(
            session_version,
            message.sequence,
            flags,
            parameters.our_base_key.public_key.clone(),
            base_key_signature,
            parameters.our_ratchet_key.public_key.clone(),
            parameters.our_identity_key_pair.public_key.clone(),
        ))
    }

    fn process_response(&self, message: &KeyExchangeMessage) -> Result<(), SessionError> {
        let mut session_record = self.store.load_session(&self.remote_address)?;

        let pending = match session_record.session_state().pending_key_exchange() {
            Some(pending) if pending.sequence() == message.sequence => pending.clone(),
            _ => {
                // No matching initiate of ours. If the peer flagged the
                // response as part of a simultaneous initiate, the exchange
                // already completed through the initiate path; otherwise the
                // response is stale.
                return if message.is_response_for_simultaneous_initiate() {
                    log::debug!(
                        "dropping key-exchange response from {} that lost a simultaneous initiate",
                        self.remote_address
                    );
                    Ok(())
                } else {
                    Err(SessionError::StaleKeyExchange)
                };
            }
        };

        let parameters = SymmetricParameters {
            our_base_key: pending.local_base_key_pair().clone(),
            our_ratchet_key: pending.local_ratchet_key_pair().clone(),
            our_identity_key_pair: pending.local_identity_key_pair().clone(),
            their_base_key: message.base_key.clone(),
            their_ratchet_key: message.ratchet_key.clone(),
            their_identity_key: message.identity_key.clone(),
        };

        if !session_record.is_fresh() {
            session_record.archive_current_state();
        }

        ratchet::initialize_symmetric_session(
            session_record.session_state_mut(),
            message.max_version.min(CURRENT_VERSION),
            &parameters,
        )?;

        // The negotiated version is only known after initialization; nothing
        // is persisted if the signature check fails here.
        if session_record.session_state().session_version() >= 3
            && !curve::verify_signature(
                message.identity_key.public_key(),
                &message.base_key.serialize(),
                &message.base_key_signature,
            )
        {
            return Err(SessionError::InvalidKey("base key signature doesn't match"));
        }

        self.store
            .store_session(&self.remote_address, &session_record)?;
        self.store
            .save_identity(self.remote_address.name(), &message.identity_key)?;

        Ok(())
    }
}
