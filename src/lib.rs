//! Library crate for user-dashboard.
//!
//! This crate exposes the building blocks of the dashboard:
//! - User record types (`model`)
//! - The in-memory collection and its validation (`store`, `validate`)
//! - Derived views: sorting and pagination (`sort`, `paginate`)
//! - The call contract the UI drives (`dashboard`)
//! - Application state, config and the event loop (`app`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-dashboard` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod paginate;
pub mod sort;
pub mod store;
pub mod ui;
pub mod validate;

// Re-export commonly used items at the crate root for convenience
pub use dashboard::{Dashboard, EditPolicy, Submitted};
pub use error::{EditError, Result, ValidationError};
pub use model::{FormValues, Role, UserDraft, UserId, UserRecord};
pub use store::UserStore;
