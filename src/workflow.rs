//! Collaborator contracts and the shared error taxonomy for workflows.
//!
//! The edit and delete workflows never talk to SQLite or the filesystem
//! directly. They drive a [`PublicationStore`], an [`ImageUploader`], and a
//! [`Navigator`], and report failures as a [`WorkflowError`].

use crate::model::{Publication, PublicationDraft, PublicationId, Route};

/// Why a workflow step did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Detected locally; no I/O was attempted.
    #[error("{0}")]
    Validation(String),

    /// A store or upload call failed. The message is display-ready.
    #[error("{0}")]
    Transport(String),

    /// The referenced record is absent from a loaded collection.
    #[error("publication {0} not found")]
    NotFound(PublicationId),

    /// Triggered while an earlier step of the same workflow is pending.
    #[error("an earlier request is still in progress")]
    Busy,
}

impl WorkflowError {
    /// Wrap a collaborator failure, prefixing its message for display.
    pub fn transport(prefix: &str, cause: &impl std::error::Error) -> Self {
        Self::Transport(format!("{prefix}: {cause}"))
    }
}

/// The catalog's backing collection.
///
/// Each operation either fully applies or fails.
pub trait PublicationStore {
    type Error: std::error::Error;

    fn list(&self) -> Result<Vec<Publication>, Self::Error>;

    /// Insert a new record. The store assigns the id.
    fn create(&self, draft: &PublicationDraft) -> Result<Publication, Self::Error>;

    /// Replace every field of an existing record except its id.
    fn update(&self, record: &Publication) -> Result<Publication, Self::Error>;

    fn delete(&self, id: PublicationId) -> Result<(), Self::Error>;
}

/// Hosts cover images. One opaque call; any retry policy lives behind it.
pub trait ImageUploader {
    type Error: std::error::Error;

    /// Store the image and return the URL it is served from.
    fn upload(&self, bytes: &[u8], name: &str, mime: &str) -> Result<String, Self::Error>;
}

/// Fire-and-forget navigation.
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeError;
    use super::*;

    #[test]
    fn transport_error_keeps_cause_message() {
        let err = WorkflowError::transport(
            "failed to delete publication",
            &FakeError("timeout".into()),
        );
        assert_eq!(err.to_string(), "failed to delete publication: timeout");
    }
}
