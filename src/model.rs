//! Core data model for pubdesk.
//!
//! These types carry the catalog between the store, the list view,
//! and the edit and delete workflows.

mod cover;
mod publication;
mod route;
mod view;

pub use cover::{ALLOWED_COVER_TYPES, CoverFile, MAX_COVER_BYTES};
pub use publication::{Publication, PublicationDraft, PublicationId, parse_release_date};
pub use route::Route;
pub use view::{SortKey, ViewState};
