//! Deletion workflow: destructive deletes gated behind explicit confirmation.
//!
//! ```text
//! Idle ──request──▶ ConfirmPending(record) ──confirm──▶ Deleting(record) ──settle──▶ Idle
//!                          │
//!                          └──cancel──▶ Idle
//! ```
//!
//! There is one confirmation slot for the whole list, and a per-record
//! in-flight flag. A row whose delete is in flight rejects new requests;
//! every other row stays interactive.
//!
//! The workflow does no I/O itself. [`DeletionWorkflow::confirm`] hands out
//! a [`DeleteTicket`]; the caller runs the store call and passes the result
//! to [`DeletionWorkflow::settle`]. [`DeletionWorkflow::confirm_with`] does
//! both against a [`PublicationStore`].

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::model::{Publication, PublicationId};
use crate::workflow::{PublicationStore, WorkflowError};

/// Prefix for delete failures shown to the user.
pub const DELETE_FAILED: &str = "failed to delete publication";

/// Where the confirmation slot stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionState<'a> {
    Idle,
    ConfirmPending(&'a Publication),
    Deleting(PublicationId),
}

/// Proof that a delete was confirmed. Redeemed with [`DeletionWorkflow::settle`].
#[derive(Debug)]
#[must_use = "a confirmed delete must be settled"]
pub struct DeleteTicket {
    id: PublicationId,
}

impl DeleteTicket {
    pub fn id(&self) -> PublicationId {
        self.id
    }
}

#[derive(Debug, Default)]
pub struct DeletionWorkflow {
    pending: Option<Publication>,
    in_flight: BTreeSet<PublicationId>,
    error: Option<String>,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeletionState<'_> {
        if let Some(record) = &self.pending {
            return DeletionState::ConfirmPending(record);
        }
        match self.in_flight.iter().next() {
            Some(id) => DeletionState::Deleting(*id),
            None => DeletionState::Idle,
        }
    }

    /// Ask to delete `record`. Replaces any target still awaiting
    /// confirmation. Ignored when `record` is already being deleted.
    ///
    /// Returns whether the request was taken.
    pub fn request_delete(&mut self, record: &Publication) -> bool {
        if self.in_flight.contains(&record.id) {
            return false;
        }
        self.pending = Some(record.clone());
        self.error = None;
        true
    }

    /// Drop the pending confirmation. No-op when nothing is pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Accept the pending confirmation and mark the record in flight.
    ///
    /// Returns `None`, changing nothing, when no confirmation is pending.
    pub fn confirm(&mut self) -> Option<DeleteTicket> {
        let record = self.pending.take()?;
        self.in_flight.insert(record.id);
        info!(id = %record.id, title = %record.title, "deleting publication");
        Some(DeleteTicket { id: record.id })
    }

    /// Record the outcome of a confirmed delete. The record is no longer
    /// in flight afterwards, whatever the outcome.
    ///
    /// A ticket whose record is not in flight is stale and ignored.
    pub fn settle<E: std::error::Error>(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), E>,
    ) -> Result<(), WorkflowError> {
        if !self.in_flight.remove(&ticket.id()) {
            return Ok(());
        }
        match result {
            Ok(()) => {
                info!(id = %ticket.id(), "publication deleted");
                Ok(())
            }
            Err(e) => {
                warn!(id = %ticket.id(), error = %e, "delete failed");
                let err = WorkflowError::transport(DELETE_FAILED, &e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Confirm and run the delete against `store`.
    ///
    /// Returns the deleted id, or `None` when nothing was pending.
    pub fn confirm_with<S: PublicationStore>(
        &mut self,
        store: &S,
    ) -> Result<Option<PublicationId>, WorkflowError> {
        let Some(ticket) = self.confirm() else {
            return Ok(None);
        };
        let id = ticket.id();
        let result = store.delete(id);
        self.settle(ticket, result).map(|()| Some(id))
    }

    /// Whether `id`'s row should have its controls disabled.
    pub fn is_deleting(&self, id: PublicationId) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn pending(&self) -> Option<&Publication> {
        self.pending.as_ref()
    }

    /// Message from the last failed delete, cleared by the next request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::workflow::fakes::{FakeError, FakeStore, publication};

    fn store() -> FakeStore {
        FakeStore::with(vec![
            publication(1, "Alpha", "2024-06-01"),
            publication(2, "Beta", "2024-01-01"),
        ])
    }

    fn ids(store: &FakeStore) -> Vec<i64> {
        store.list().unwrap().iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn starts_idle() {
        assert_eq!(DeletionWorkflow::new().state(), DeletionState::Idle);
    }

    #[test]
    fn request_then_cancel_returns_to_idle() {
        let store = store();
        let alpha = store.list().unwrap()[0].clone();
        let mut flow = DeletionWorkflow::new();

        assert!(flow.request_delete(&alpha));
        assert_eq!(flow.state(), DeletionState::ConfirmPending(&alpha));
        assert!(flow.cancel());
        assert_eq!(flow.state(), DeletionState::Idle);
        assert_eq!(store.deletes.get(), 0);
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut flow = DeletionWorkflow::new();
        assert!(!flow.cancel());
        assert_eq!(flow.state(), DeletionState::Idle);
    }

    #[test]
    fn confirm_without_pending_is_noop() {
        let store = store();
        let mut flow = DeletionWorkflow::new();

        assert!(flow.confirm().is_none());
        assert_eq!(flow.confirm_with(&store).unwrap(), None);
        assert_eq!(store.deletes.get(), 0);
        assert_eq!(flow.state(), DeletionState::Idle);
    }

    #[test]
    fn successful_delete_removes_record() {
        let store = store();
        let alpha = store.list().unwrap()[0].clone();
        let mut flow = DeletionWorkflow::new();

        flow.request_delete(&alpha);
        let deleted = flow.confirm_with(&store).unwrap();

        assert_eq!(deleted, Some(alpha.id));
        assert_eq!(ids(&store), [2]);
        assert_eq!(flow.state(), DeletionState::Idle);
        assert!(!flow.is_deleting(alpha.id));
    }

    #[test]
    fn failed_delete_keeps_record_and_reports() {
        let store = store();
        let alpha = store.list().unwrap()[0].clone();
        let mut flow = DeletionWorkflow::new();

        flow.request_delete(&alpha);
        store.fail_next("timeout");
        let err = flow.confirm_with(&store).unwrap_err();

        assert!(matches!(err, WorkflowError::Transport(_)));
        assert!(err.to_string().contains("timeout"));
        assert_eq!(flow.state(), DeletionState::Idle);
        assert!(flow.error().unwrap().contains("timeout"));
        assert_eq!(ids(&store), [1, 2]);
    }

    #[test]
    fn in_flight_record_rejects_new_requests_but_others_proceed() {
        let store = store();
        let records = store.list().unwrap();
        let mut flow = DeletionWorkflow::new();

        flow.request_delete(&records[0]);
        let ticket = flow.confirm().unwrap();
        assert_eq!(flow.state(), DeletionState::Deleting(records[0].id));
        assert!(flow.is_deleting(records[0].id));

        assert!(!flow.request_delete(&records[0]));
        assert!(flow.request_delete(&records[1]));
        assert!(!flow.is_deleting(records[1].id));

        flow.settle(ticket, store.delete(records[0].id)).unwrap();
        assert!(!flow.is_deleting(records[0].id));
        assert_eq!(flow.state(), DeletionState::ConfirmPending(&records[1]));
    }

    #[test]
    fn second_request_replaces_pending_target() {
        let store = store();
        let records = store.list().unwrap();
        let mut flow = DeletionWorkflow::new();

        flow.request_delete(&records[0]);
        flow.request_delete(&records[1]);

        assert_eq!(flow.pending(), Some(&records[1]));
        flow.confirm_with(&store).unwrap();
        assert_eq!(ids(&store), [1]);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let store = store();
        let alpha = store.list().unwrap()[0].clone();
        let mut flow = DeletionWorkflow::new();
        flow.request_delete(&alpha);
        let ticket = flow.confirm().unwrap();

        let mut fresh = DeletionWorkflow::new();
        let settled = fresh.settle(ticket, Err(FakeError("late".into())));

        assert!(settled.is_ok());
        assert_eq!(fresh.error(), None);
    }
}
