//! Application state types and entry glue.
//!
//! Defines the TUI state that sits on top of [`Dashboard`], and re-exports the
//! event loop as `run`.
//!
pub mod config;
pub mod keymap;
pub mod theme;
pub mod update;

use crate::dashboard::Dashboard;
use crate::error::ValidationError;
use crate::model::{Field, FormValues, UserId};
use crate::store::UserStore;

pub use config::Args;
pub use keymap::Keymap;
pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Browsing the table.
    Normal,
    /// Typing into the new-user form.
    Form,
    /// Editing one table row in place.
    RowEdit,
    Modal,
}

/// Overlay dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Help,
    Info { message: String },
}

/// New-user form: the values being typed and the result of the last submit.
#[derive(Clone, Debug)]
pub struct FormState {
    pub values: FormValues,
    pub field: Field,
    pub error: Option<ValidationError>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            values: FormValues::blank(),
            field: Field::Name,
            error: None,
        }
    }

    /// Clear values and errors after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// "Name is required" style message for `field`, if the last submit flagged it.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.error
            .as_ref()
            .filter(|e| e.is_missing(field))
            .map(|_| field.required_message())
    }

    /// Form-level duplicate message, if the last submit collided.
    pub fn duplicate_error(&self) -> Option<String> {
        match &self.error {
            Some(e @ ValidationError::Duplicate) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub dashboard: Dashboard,
    pub input_mode: InputMode,
    pub form: FormState,
    /// Selected row within the current page.
    pub selected_row: usize,
    /// Column receiving input during a row edit.
    pub edit_field: Field,
    /// Error from the last failed row save, shown under the table.
    pub row_error: Option<String>,
    pub status: Option<String>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
}

impl AppState {
    /// Build state from command-line options, loading theme and keybindings from disk.
    pub fn new(args: &Args) -> Self {
        let store = if args.empty { UserStore::new() } else { UserStore::seeded() };
        let dashboard = Dashboard::new(store, args.page_size).with_policy(args.edit_policy());
        let mut app = Self::with_dashboard(dashboard);
        app.theme = Theme::load_or_init(&args.theme_path());
        app.keymap = Keymap::load_or_init(&args.keybinds_path());
        app
    }

    /// State around `dashboard` with the default theme and keymap; nothing is read from disk.
    pub fn with_dashboard(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            input_mode: InputMode::Normal,
            form: FormState::new(),
            selected_row: 0,
            edit_field: Field::Name,
            row_error: None,
            status: None,
            theme: Theme::mocha(),
            keymap: Keymap::default(),
            modal: None,
        }
    }

    /// Id of the highlighted row on the current page.
    pub fn selected_id(&self) -> Option<UserId> {
        self.dashboard
            .page_view()
            .get(self.selected_row)
            .map(|u| u.id.clone())
    }

    /// Keep the selection inside the current page.
    pub fn clamp_selection(&mut self) {
        let rows = self.dashboard.page_view().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_dashboard(Dashboard::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
