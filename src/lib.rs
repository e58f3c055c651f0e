//! pubdesk: an administrative catalog of statistical publications.
//!
//! The catalog core is three pieces of logic over a [`workflow::PublicationStore`]:
//!
//! - [`listing`]: search, sort, and truncate records for display.
//! - [`deletion`]: confirmation-gated deletes with per-record in-flight state.
//! - [`edit`]: draft edits to one record, with optional cover replacement.
//!
//! [`storage`], [`upload`], and [`session`] provide the concrete `SQLite`
//! store, local cover hosting, and login session the `pubdesk` binary uses.

pub mod add;
pub mod cli;
pub mod config;
pub mod deletion;
pub mod edit;
pub mod listing;
pub mod logging;
pub mod model;
pub mod session;
pub mod storage;
pub mod upload;
pub mod workflow;
