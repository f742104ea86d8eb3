use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::session_state::SessionState;

const MAX_ARCHIVED_STATES: usize = 40;

/// The active session state for one remote address, plus a bounded archive
/// of superseded states kept around so in-flight messages can still be
/// decrypted after a re-establishment.
#[derive(Serialize, Deserialize, Clone)]
pub struct SessionRecord {
    session_state: SessionState,
    previous_states: VecDeque<SessionState>,
    // True until a state is installed. Never persisted: a record coming
    // back from a store has, by definition, held a state.
    #[serde(skip)]
    fresh: bool,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self {
            session_state: SessionState::new(),
            previous_states: VecDeque::with_capacity(MAX_ARCHIVED_STATES),
            fresh: true,
        }
    }

    pub fn from_state(session_state: SessionState) -> Self {
        Self {
            session_state,
            previous_states: VecDeque::with_capacity(MAX_ARCHIVED_STATES),
            fresh: false,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    pub fn session_state_mut(&mut self) -> &mut SessionState {
        self.fresh = false;
        &mut self.session_state
    }

    /// Moves the current state into the archive and installs a blank one.
    pub fn archive_current_state(&mut self) {
        self.promote_state(SessionState::new());
    }

    pub fn promote_state(&mut self, promoted_state: SessionState) {
        let old_state = std::mem::replace(&mut self.session_state, promoted_state);
        self.previous_states.push_front(old_state);
        self.previous_states.truncate(MAX_ARCHIVED_STATES);
        self.fresh = false;
    }

    /// The replay and duplicate-establishment guard: true iff the current
    /// state or any archived state matches both the session version and the
    /// initiator's serialized base key.
    pub fn has_session_state(&self, version: u32, alice_base_key: &[u8]) -> bool {
        std::iter::once(&self.session_state)
            .chain(self.previous_states.iter())
            .any(|state| {
                state.session_version() == version && state.alice_base_key() == alice_base_key
            })
    }

    pub fn previous_states(&self) -> impl Iterator<Item = &SessionState> {
        self.previous_states.iter()
    }

    pub fn archived_states_len(&self) -> usize {
        self.previous_states.len()
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_base_key(version: u32, base_key: &[u8]) -> SessionState {
        let mut state = SessionState::new();
        state.set_session_version(version);
        state.set_alice_base_key(base_key.to_vec());
        state
    }

    #[test]
    fn fresh_until_first_mutation() {
        let mut record = SessionRecord::new();
        assert!(record.is_fresh());

        record.session_state_mut().set_session_version(3);
        assert!(!record.is_fresh());
    }

    #[test]
    fn archive_installs_blank_state() {
        let mut record = SessionRecord::new();
        record
            .session_state_mut()
            .set_alice_base_key(vec![5; 33]);

        record.archive_current_state();

        assert!(record.session_state().alice_base_key().is_empty());
        assert_eq!(record.archived_states_len(), 1);
    }

    #[test]
    fn matches_session_states_across_current_and_archive() {
        let mut record = SessionRecord::new();
        *record.session_state_mut() = state_with_base_key(3, b"first");
        record.promote_state(state_with_base_key(3, b"second"));

        assert!(record.has_session_state(3, b"first"));
        assert!(record.has_session_state(3, b"second"));
        assert!(!record.has_session_state(2, b"first"));
        assert!(!record.has_session_state(3, b"third"));
    }

    #[test]
    fn archive_is_bounded_and_evicts_oldest() {
        let mut record = SessionRecord::new();
        for i in 0..50u32 {
            *record.session_state_mut() = state_with_base_key(3, &i.to_be_bytes());
            record.archive_current_state();
        }

        assert_eq!(record.archived_states_len(), 40);
        // The ten oldest establishments have been evicted.
        for i in 0..10u32 {
            assert!(!record.has_session_state(3, &i.to_be_bytes()));
        }
        for i in 10..50u32 {
            assert!(record.has_session_state(3, &i.to_be_bytes()));
        }
    }
}
