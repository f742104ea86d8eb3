#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use axolotl::address::AxolotlAddress;
use axolotl::identity::{IdentityKey, IdentityKeyPair};
use axolotl::state::prekey_bundle::{PreKeyBundle, SignedPreKeyPublic};
use axolotl::state::prekey_record::{PreKeyRecord, SignedPreKeyRecord};
use axolotl::state::session_record::SessionRecord;
use axolotl::store::{
    IdentityKeyStore, PreKeyStore, SessionStore, SignedPreKeyStore, StoreError,
};
use axolotl::util::keyhelper;

/// In-memory store backing the integration tests, one per simulated device.
pub struct MemoryStore {
    identity_key_pair: IdentityKeyPair,
    registration_id: u32,
    identities: Mutex<HashMap<String, IdentityKey>>,
    prekeys: Mutex<HashMap<u32, PreKeyRecord>>,
    signed_prekeys: Mutex<HashMap<u32, SignedPreKeyRecord>>,
    sessions: Mutex<HashMap<AxolotlAddress, SessionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            identity_key_pair: keyhelper::generate_identity_key_pair(),
            registration_id: keyhelper::generate_registration_id(),
            identities: Mutex::new(HashMap::new()),
            prekeys: Mutex::new(HashMap::new()),
            signed_prekeys: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl IdentityKeyStore for MemoryStore {
    fn get_identity_key_pair(&self) -> Result<IdentityKeyPair, StoreError> {
        Ok(self.identity_key_pair.clone())
    }

    fn get_local_registration_id(&self) -> Result<u32, StoreError> {
        Ok(self.registration_id)
    }

    fn save_identity(&self, name: &str, identity_key: &IdentityKey) -> Result<(), StoreError> {
        self.identities
            .lock()
            .unwrap()
            .insert(name.to_string(), identity_key.clone());
        Ok(())
    }

    fn is_trusted_identity(
        &self,
        name: &str,
        identity_key: &IdentityKey,
    ) -> Result<bool, StoreError> {
        Ok(match self.identities.lock().unwrap().get(name) {
            Some(pinned) => pinned == identity_key,
            None => true,
        })
    }
}

impl PreKeyStore for MemoryStore {
    fn load_prekey(&self, prekey_id: u32) -> Result<Option<PreKeyRecord>, StoreError> {
        Ok(self.prekeys.lock().unwrap().get(&prekey_id).cloned())
    }

    fn store_prekey(&self, prekey_id: u32, record: PreKeyRecord) -> Result<(), StoreError> {
        self.prekeys.lock().unwrap().insert(prekey_id, record);
        Ok(())
    }

    fn contains_prekey(&self, prekey_id: u32) -> Result<bool, StoreError> {
        Ok(self.prekeys.lock().unwrap().contains_key(&prekey_id))
    }

    fn remove_prekey(&self, prekey_id: u32) -> Result<(), StoreError> {
        self.prekeys.lock().unwrap().remove(&prekey_id);
        Ok(())
    }
}

impl SignedPreKeyStore for MemoryStore {
    fn load_signed_prekey(
        &self,
        signed_prekey_id: u32,
    ) -> Result<Option<SignedPreKeyRecord>, StoreError> {
        Ok(self
            .signed_prekeys
            .lock()
            .unwrap()
            .get(&signed_prekey_id)
            .cloned())
    }

    fn store_signed_prekey(
        &self,
        signed_prekey_id: u32,
        record: SignedPreKeyRecord,
    ) -> Result<(), StoreError> {
        self.signed_prekeys
            .lock()
            .unwrap()
            .insert(signed_prekey_id, record);
        Ok(())
    }

    fn contains_signed_prekey(&self, signed_prekey_id: u32) -> Result<bool, StoreError> {
        Ok(self
            .signed_prekeys
            .lock()
            .unwrap()
            .contains_key(&signed_prekey_id))
    }

    fn remove_signed_prekey(&self, signed_prekey_id: u32) -> Result<(), StoreError> {
        self.signed_prekeys.lock().unwrap().remove(&signed_prekey_id);
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load_session(&self, address: &AxolotlAddress) -> Result<SessionRecord, StoreError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    fn store_session(
        &self,
        address: &AxolotlAddress,
        record: &SessionRecord,
    ) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(address.clone(), record.clone());
        Ok(())
    }

    fn contains_session(&self, address: &AxolotlAddress) -> Result<bool, StoreError> {
        Ok(self.sessions.lock().unwrap().contains_key(address))
    }

    fn delete_session(&self, address: &AxolotlAddress) -> Result<(), StoreError> {
        self.sessions.lock().unwrap().remove(address);
        Ok(())
    }
}

/// Publishes a signed pre-key (and optionally a one-time pre-key) on the
/// store and returns the bundle a directory would serve for it.
pub fn publish_bundle(
    store: &MemoryStore,
    signed_pre_key_id: u32,
    pre_key_id: Option<u32>,
) -> PreKeyBundle {
    let identity_key_pair = store.get_identity_key_pair().unwrap();

    let signed_pre_key = keyhelper::generate_signed_pre_key(&identity_key_pair, signed_pre_key_id);
    store
        .store_signed_prekey(signed_pre_key_id, signed_pre_key.clone())
        .unwrap();

    let pre_key = pre_key_id.map(|id| {
        let record = keyhelper::generate_pre_keys(id, 1).remove(0);
        store.store_prekey(id, record.clone()).unwrap();
        record
    });

    PreKeyBundle {
        registration_id: store.get_local_registration_id().unwrap(),
        device_id: 1,
        pre_key_id,
        pre_key_public: pre_key.map(|record| record.key_pair().public_key.clone()),
        signed_pre_key: Some(SignedPreKeyPublic {
            id: signed_pre_key_id,
            public_key: signed_pre_key.key_pair().public_key.clone(),
            signature: signed_pre_key.signature().try_into().unwrap(),
        }),
        identity_key: identity_key_pair.public_key,
    }
}

/// A version 2 bundle: a one-time pre-key only, no signed pre-key.
pub fn publish_v2_bundle(store: &MemoryStore, pre_key_id: u32) -> PreKeyBundle {
    let identity_key_pair = store.get_identity_key_pair().unwrap();

    let record = keyhelper::generate_pre_keys(pre_key_id, 1).remove(0);
    store.store_prekey(pre_key_id, record.clone()).unwrap();

    PreKeyBundle {
        registration_id: store.get_local_registration_id().unwrap(),
        device_id: 1,
        pre_key_id: Some(pre_key_id),
        pre_key_public: Some(record.key_pair().public_key.clone()),
        signed_pre_key: None,
        identity_key: identity_key_pair.public_key,
    }
}
