//! Types and loading logic shared by the repair calendar frontend.
//!
//! Nothing in this crate touches the browser: the HTTP call goes through the
//! [`loader::Transport`] trait so the whole fetch-and-map path runs natively
//! in tests.

pub mod api;
pub mod error;
pub mod loader;
pub mod models;

pub use api::{FetchInfo, FetchRange, RepairRecord};
pub use error::{LoadError, LoadResult};
pub use loader::{CalendarLoader, HttpResponse, Transport};
pub use models::{CalendarEvent, EventId, EventMapping};
