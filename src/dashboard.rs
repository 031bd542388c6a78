//! The call contract the UI drives: submit, delete, sort, page and inline edit.
//!
//! [`Dashboard`] owns the store plus the little bit of session state that goes
//! with it (sort column, active page, the single open edit). Views are
//! recomputed from the store on every request.

use tracing::{debug, info, warn};

use crate::error::{EditError, ValidationError};
use crate::model::{FormValues, UserId, UserRecord};
use crate::paginate;
use crate::sort::{SortKey, SortState};
use crate::store::UserStore;
use crate::validate;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Whether edits are checked for duplicate name/email like new users are.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditPolicy {
    /// Edits are committed without a duplicate check.
    #[default]
    Lenient,
    /// Edits are rejected when they collide with another record.
    Strict,
}

/// The one record currently being edited and its uncommitted copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub id: UserId,
    pub buffer: UserRecord,
}

/// Outcome of [`Dashboard::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    Added(UserRecord),
    Updated(UserRecord),
}

#[derive(Clone, Debug)]
pub struct Dashboard {
    store: UserStore,
    sort: SortState,
    page: usize,
    page_size: usize,
    edit: Option<EditSession>,
    policy: EditPolicy,
}

impl Dashboard {
    pub fn new(store: UserStore, page_size: usize) -> Self {
        Self {
            store,
            sort: SortState::default(),
            page: 1,
            page_size: page_size.max(1),
            edit: None,
            policy: EditPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Submit form values: updates the record under edit if there is one, otherwise adds.
    ///
    /// The store is untouched unless validation passes.
    pub fn submit(&mut self, values: FormValues) -> Result<Submitted, ValidationError> {
        let draft = validate::require_fields(&values).inspect_err(|e| {
            warn!(error = %e, "form submission rejected");
        })?;
        match self.edit.take() {
            Some(session) => {
                let record = draft.into_record(session.id.clone());
                if let Err(e) = self.check_edit(&record) {
                    self.edit = Some(session);
                    return Err(e);
                }
                self.store.update(record.clone());
                Ok(Submitted::Updated(record))
            }
            None => self.store.add(draft).map(Submitted::Added),
        }
    }

    /// Remove a user. Cancels the edit session if it was on that user.
    pub fn request_delete(&mut self, id: &UserId) {
        if self.edit.as_ref().is_some_and(|s| &s.id == id) {
            debug!(id = %id, "deleting the user under edit; edit cancelled");
            self.edit = None;
        }
        if self.store.remove(id).is_some() {
            self.clamp_page();
        }
    }

    /// Toggle the sort column and return the full ordered view.
    pub fn request_sort(&mut self, key: SortKey) -> Vec<UserRecord> {
        self.sort.toggle(key);
        debug!(key = ?self.sort.key, direction = ?self.sort.direction, "sort changed");
        self.sorted_view()
    }

    /// Make `page` active and return its rows. Pages past the end are empty.
    pub fn request_page(&mut self, page: usize) -> Vec<UserRecord> {
        self.page = page.max(1);
        self.page_view()
    }

    pub fn next_page(&mut self) -> Vec<UserRecord> {
        if self.page < self.total_pages() {
            self.page += 1;
        }
        self.page_view()
    }

    pub fn prev_page(&mut self) -> Vec<UserRecord> {
        if self.page > 1 {
            self.page -= 1;
        }
        self.page_view()
    }

    pub fn sorted_view(&self) -> Vec<UserRecord> {
        self.sort.apply(self.store.records())
    }

    /// Rows of the active page, in the active sort order.
    pub fn page_view(&self) -> Vec<UserRecord> {
        let sorted = self.sorted_view();
        let rows = paginate::paginate(&sorted, self.page_size, self.page).to_vec();
        debug!(page = self.page, rows = rows.len(), "page view");
        rows
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.store.len(), self.page_size)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self, id: &UserId) -> bool {
        self.edit.as_ref().is_some_and(|s| &s.id == id)
    }

    /// Open the edit session on `id` with a copy of the stored record.
    ///
    /// Fails without touching the open buffer if another edit is in progress.
    pub fn begin_edit(&mut self, id: &UserId) -> Result<(), EditError> {
        if let Some(open) = &self.edit {
            return Err(EditError::AlreadyEditing(open.id.clone()));
        }
        let record = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| EditError::UnknownUser(id.clone()))?;
        debug!(id = %id, "edit started");
        self.edit = Some(EditSession {
            id: id.clone(),
            buffer: record,
        });
        Ok(())
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut UserRecord> {
        self.edit.as_mut().map(|s| &mut s.buffer)
    }

    /// Commit the edit buffer. On a validation failure the session stays open.
    pub fn save_edit(&mut self) -> Result<UserRecord, EditError> {
        let session = self.edit.take().ok_or(EditError::NotEditing)?;
        let mut record = session.buffer.clone();
        record.id = session.id.clone();
        let checked = validate::require_fields(&FormValues::from(&record))
            .map(|_| ())
            .and_then(|()| self.check_edit(&record));
        if let Err(e) = checked {
            warn!(id = %session.id, error = %e, "edit rejected");
            self.edit = Some(session);
            return Err(e.into());
        }
        self.store.update(record.clone());
        info!(id = %record.id, "edit saved");
        Ok(record)
    }

    /// Drop the edit buffer without committing it.
    pub fn cancel_edit(&mut self) -> Option<EditSession> {
        let dropped = self.edit.take();
        if let Some(s) = &dropped {
            debug!(id = %s.id, "edit cancelled");
        }
        dropped
    }

    fn check_edit(&self, record: &UserRecord) -> Result<(), ValidationError> {
        match self.policy {
            EditPolicy::Lenient => Ok(()),
            EditPolicy::Strict => validate::validate_edit(record, self.store.records()),
        }
    }

    fn clamp_page(&mut self) {
        let last = self.total_pages().max(1);
        if self.page > last {
            self.page = last;
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(UserStore::seeded(), DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Role};
    use crate::sort::SortDirection;

    fn values(name: &str, email: &str, role: Role) -> FormValues {
        FormValues::new(name, email, Some(role))
    }

    #[test]
    fn seeded_scenario() {
        let mut d = Dashboard::default();
        assert_eq!(
            d.submit(values("John Doe", "new@example.com", Role::User)),
            Err(ValidationError::Duplicate)
        );
        assert_eq!(d.store().len(), 2);
        let out = d.submit(values("Amy Lee", "amy@example.com", Role::User)).unwrap();
        assert!(matches!(out, Submitted::Added(ref u) if u.name == "Amy Lee"));
        assert_eq!(d.store().len(), 3);
    }

    #[test]
    fn submit_with_open_edit_updates_that_record() {
        let mut d = Dashboard::default();
        d.begin_edit(&UserId::new("2")).unwrap();
        let out = d.submit(values("Jane Roe", "jane@example.com", Role::Admin)).unwrap();
        let Submitted::Updated(u) = out else { panic!("expected update") };
        assert_eq!(u.id.as_str(), "2");
        assert_eq!(d.store().get(&u.id).unwrap().name, "Jane Roe");
        assert!(d.edit_session().is_none());
        assert_eq!(d.store().len(), 2);
    }

    #[test]
    fn second_edit_leaves_first_buffer_alone() {
        let mut d = Dashboard::default();
        d.begin_edit(&UserId::new("1")).unwrap();
        d.edit_buffer_mut().unwrap().name = "Johnny".into();
        assert_eq!(
            d.begin_edit(&UserId::new("2")),
            Err(EditError::AlreadyEditing(UserId::new("1")))
        );
        let session = d.edit_session().unwrap();
        assert_eq!(session.id.as_str(), "1");
        assert_eq!(session.buffer.name, "Johnny");
    }

    #[test]
    fn cancel_discards_and_save_commits() {
        let mut d = Dashboard::default();
        let id = UserId::new("1");
        d.begin_edit(&id).unwrap();
        d.edit_buffer_mut().unwrap().email = "changed@example.com".into();
        d.cancel_edit();
        assert_eq!(d.store().get(&id).unwrap().email, "john@example.com");

        d.begin_edit(&id).unwrap();
        d.edit_buffer_mut().unwrap().role = Role::User;
        let saved = d.save_edit().unwrap();
        assert_eq!(d.store().get(&id), Some(&saved));
        assert_eq!(saved.role, Role::User);
        assert_eq!(d.save_edit(), Err(EditError::NotEditing));
    }

    #[test]
    fn blank_edit_keeps_session_open() {
        let mut d = Dashboard::default();
        d.begin_edit(&UserId::new("1")).unwrap();
        d.edit_buffer_mut().unwrap().name.clear();
        let err = d.save_edit().unwrap_err();
        assert_eq!(
            err,
            EditError::Invalid(ValidationError::RequiredFieldMissing { fields: vec![Field::Name] })
        );
        assert!(d.edit_session().is_some());
        assert_eq!(d.store().get(&UserId::new("1")).unwrap().name, "John Doe");
    }

    #[test]
    fn lenient_edit_allows_duplicates_strict_does_not() {
        let mut d = Dashboard::default();
        d.begin_edit(&UserId::new("2")).unwrap();
        d.edit_buffer_mut().unwrap().name = "John Doe".into();
        assert!(d.save_edit().is_ok());

        let mut strict = Dashboard::default().with_policy(EditPolicy::Strict);
        strict.begin_edit(&UserId::new("2")).unwrap();
        strict.edit_buffer_mut().unwrap().email = "john@example.com".into();
        assert_eq!(strict.save_edit(), Err(EditError::Invalid(ValidationError::Duplicate)));
        assert!(strict.edit_session().is_some());
    }

    #[test]
    fn deleting_edited_user_cancels_session() {
        let mut d = Dashboard::default();
        let id = UserId::new("2");
        d.begin_edit(&id).unwrap();
        d.request_delete(&id);
        assert!(d.edit_session().is_none());
        assert!(d.store().get(&id).is_none());
    }

    #[test]
    fn sort_then_page() {
        let mut d = Dashboard::new(UserStore::seeded(), 1);
        assert_eq!(d.page_view()[0].name, "Jane Smith");
        let view = d.request_sort(Field::Name);
        assert_eq!(d.sort_state().direction, SortDirection::Desc);
        assert_eq!(view[0].name, "John Doe");
        assert_eq!(d.request_page(2)[0].name, "Jane Smith");
        assert!(d.request_page(3).is_empty());
    }

    #[test]
    fn delete_clamps_active_page() {
        let mut d = Dashboard::new(UserStore::seeded(), 1);
        d.request_page(2);
        let last = d.page_view()[0].id.clone();
        d.request_delete(&last);
        assert_eq!(d.current_page(), 1);
        assert_eq!(d.page_view().len(), 1);
    }

    #[test]
    fn paging_stops_at_bounds() {
        let mut d = Dashboard::default();
        d.prev_page();
        assert_eq!(d.current_page(), 1);
        d.next_page();
        assert_eq!(d.current_page(), 1);
        assert_eq!(d.total_pages(), 1);
    }
}
