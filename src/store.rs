use crate::address::AxolotlAddress;
use crate::identity::{IdentityKey, IdentityKeyPair};
use crate::state::prekey_record::{PreKeyRecord, SignedPreKeyRecord};
use crate::state::session_record::SessionRecord;

/// Errors from persistence backends surface through the builder unchanged,
/// distinct from protocol failures.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Local identity material and the per-name trust pins.
///
/// `is_trusted_identity` returns true for a name that has never been pinned;
/// after `save_identity`, only the pinned key is trusted again.
pub trait IdentityKeyStore: Send + Sync {
    fn get_identity_key_pair(&self) -> Result<IdentityKeyPair, StoreError>;
    fn get_local_registration_id(&self) -> Result<u32, StoreError>;
    fn save_identity(&self, name: &str, identity_key: &IdentityKey) -> Result<(), StoreError>;
    fn is_trusted_identity(&self, name: &str, identity_key: &IdentityKey)
        -> Result<bool, StoreError>;
}

pub trait PreKeyStore: Send + Sync {
    fn load_prekey(&self, prekey_id: u32) -> Result<Option<PreKeyRecord>, StoreError>;
    fn store_prekey(&self, prekey_id: u32, record: PreKeyRecord) -> Result<(), StoreError>;
    fn contains_prekey(&self, prekey_id: u32) -> Result<bool, StoreError>;
    fn remove_prekey(&self, prekey_id: u32) -> Result<(), StoreError>;
}

pub trait SignedPreKeyStore: Send + Sync {
    fn load_signed_prekey(
        &self,
        signed_prekey_id: u32,
    ) -> Result<Option<SignedPreKeyRecord>, StoreError>;
    fn store_signed_prekey(
        &self,
        signed_prekey_id: u32,
        record: SignedPreKeyRecord,
    ) -> Result<(), StoreError>;
    fn contains_signed_prekey(&self, signed_prekey_id: u32) -> Result<bool, StoreError>;
    fn remove_signed_prekey(&self, signed_prekey_id: u32) -> Result<(), StoreError>;
}

pub trait SessionStore: Send + Sync {
    /// Returns the stored record, or a fresh blank one if none exists.
    fn load_session(&self, address: &AxolotlAddress) -> Result<SessionRecord, StoreError>;
    fn store_session(
        &self,
        address: &AxolotlAddress,
        record: &SessionRecord,
    ) -> Result<(), StoreError>;
    fn contains_session(&self, address: &AxolotlAddress) -> Result<bool, StoreError>;
    fn delete_session(&self, address: &AxolotlAddress) -> Result<(), StoreError>;
}

/// A single handle satisfying all four store interfaces.
pub trait AxolotlStore:
    IdentityKeyStore + PreKeyStore + SignedPreKeyStore + SessionStore
{
}

impl<T: IdentityKeyStore + PreKeyStore + SignedPreKeyStore + SessionStore> AxolotlStore for T {}
