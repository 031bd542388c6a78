//! Authoritative in-memory collection of user records.

use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::model::{Role, UserDraft, UserId, UserRecord};
use crate::validate;

/// Ordered store of users, in insertion order.
///
/// Ids come from a counter owned by the store, so an id is never handed out
/// twice even after removals.
#[derive(Clone, Debug)]
pub struct UserStore {
    records: Vec<UserRecord>,
    next_id: u64,
}

impl UserStore {
    /// Empty store; the first id issued is `"1"`.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Store holding the two startup records.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for draft in [
            UserDraft::new("John Doe", "john@example.com", Role::Admin),
            UserDraft::new("Jane Smith", "jane@example.com", Role::User),
        ] {
            store.insert(draft);
        }
        store
    }

    /// Validate `candidate` against the current records and append it with a fresh id.
    pub fn add(&mut self, candidate: UserDraft) -> Result<UserRecord, ValidationError> {
        if let Err(e) = validate::validate(&candidate, &self.records) {
            warn!(name = %candidate.name, email = %candidate.email, "rejected duplicate user");
            return Err(e);
        }
        let record = self.insert(candidate);
        info!(id = %record.id, name = %record.name, "added user");
        Ok(record)
    }

    fn insert(&mut self, draft: UserDraft) -> UserRecord {
        let id = UserId::new(self.next_id.to_string());
        self.next_id += 1;
        let record = draft.into_record(id);
        self.records.push(record.clone());
        record
    }

    /// Replace the record with the same id. No uniqueness check.
    ///
    /// Returns `false` when no record has that id.
    pub fn update(&mut self, record: UserRecord) -> bool {
        match self.records.iter_mut().find(|u| u.id == record.id) {
            Some(slot) => {
                info!(id = %record.id, "updated user");
                *slot = record;
                true
            }
            None => {
                debug!(id = %record.id, "update for unknown user ignored");
                false
            }
        }
    }

    /// Remove the record with `id`; no-op if absent.
    pub fn remove(&mut self, id: &UserId) -> Option<UserRecord> {
        let pos = self.records.iter().position(|u| &u.id == id)?;
        let removed = self.records.remove(pos);
        info!(id = %id, name = %removed.name, "removed user");
        Some(removed)
    }

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.records.iter().find(|u| &u.id == id)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_two_records_with_sequential_ids() {
        let store = UserStore::seeded();
        let ids: Vec<&str> = store.records().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(store.records()[0].role, Role::Admin);
    }

    #[test]
    fn add_assigns_next_id_and_appends() {
        let mut store = UserStore::seeded();
        let amy = store.add(UserDraft::new("Amy Lee", "amy@example.com", Role::User)).unwrap();
        assert_eq!(amy.id.as_str(), "3");
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&amy.id), Some(&amy));
        assert_eq!(store.records().last(), Some(&amy));
    }

    #[test]
    fn duplicate_leaves_store_unchanged() {
        let mut store = UserStore::seeded();
        let before = store.records().to_vec();
        let err = store.add(UserDraft::new("Jane Smith", "x@example.com", Role::User));
        assert_eq!(err, Err(ValidationError::Duplicate));
        assert_eq!(store.records(), &before[..]);
    }

    #[test]
    fn ids_are_not_reused_after_remove() {
        let mut store = UserStore::seeded();
        let jane = store.remove(&UserId::new("2")).unwrap();
        let again = store.add(jane.to_draft()).unwrap();
        assert_ne!(again.id, jane.id);
        assert!(store.get(&jane.id).is_none());
        // one removal followed by one add would have collided under a length-based scheme
        let first = store.remove(&UserId::new("1")).unwrap();
        let next = store.add(first.to_draft()).unwrap();
        assert_ne!(next.id, again.id);
    }

    #[test]
    fn update_replaces_in_place_and_skips_unknown() {
        let mut store = UserStore::seeded();
        let mut john = store.get(&UserId::new("1")).cloned().unwrap();
        john.email = "jd@example.com".into();
        assert!(store.update(john.clone()));
        assert_eq!(store.records()[0], john);

        let ghost = UserDraft::new("Ghost", "g@example.com", Role::User).into_record(UserId::new("99"));
        assert!(!store.update(ghost));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = UserStore::seeded();
        assert!(store.remove(&UserId::new("42")).is_none());
        assert_eq!(store.len(), 2);
    }
}
