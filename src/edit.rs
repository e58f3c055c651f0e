//! Edit workflow: draft changes to one publication and commit them.
//!
//! ```text
//! Loading ──resolve──▶ Editing ──begin_submit──▶ Submitting ──complete(ok)──▶ Saved
//!                        ▲                            │
//!                        └────────complete(err)───────┘
//! ```
//!
//! Draft fields survive every failure untouched so the user can retry.
//! Like the deletion workflow, the I/O step is split out: [`Submission`]
//! carries everything needed to upload the cover and update the store, and
//! [`EditWorkflow::submit`] chains the three steps for synchronous callers.

use tracing::{debug, info, warn};

use crate::model::{CoverFile, Publication, PublicationId, Route, parse_release_date};
use crate::workflow::{ImageUploader, Navigator, PublicationStore, WorkflowError};

/// Prefix for update failures shown to the user.
pub const UPDATE_FAILED: &str = "failed to update publication";

/// Shown when title or release date is blank on submit.
pub const REQUIRED_FIELDS: &str = "title and release date are required";

/// Shown when the release date is not a calendar date.
pub const INVALID_RELEASE_DATE: &str = "release date must be a YYYY-MM-DD calendar date";

/// Shown after a successful save.
pub const SAVED_NOTICE: &str = "Publication updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// The collection has not loaded yet.
    Loading,
    Editing,
    Submitting,
    Saved,
}

/// Text fields the user edits directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub release_date: String,
    pub description: String,
}

#[derive(Debug)]
pub struct EditWorkflow {
    id: PublicationId,
    state: EditState,
    draft: EditDraft,
    cover_url: String,
    cover_file: Option<CoverFile>,
    max_cover_bytes: usize,
    error: Option<String>,
    notice: Option<&'static str>,
}

impl EditWorkflow {
    pub fn new(id: PublicationId, max_cover_bytes: usize) -> Self {
        Self {
            id,
            state: EditState::Loading,
            draft: EditDraft::default(),
            cover_url: String::new(),
            cover_file: None,
            max_cover_bytes,
            error: None,
            notice: None,
        }
    }

    /// Seed the draft from a snapshot of the collection.
    ///
    /// An empty snapshot counts as not loaded yet and leaves the workflow in
    /// [`EditState::Loading`]. A non-empty snapshot without the record is
    /// [`WorkflowError::NotFound`]. Only acts while loading.
    pub fn resolve(&mut self, records: &[Publication]) -> Result<(), WorkflowError> {
        if self.state != EditState::Loading || records.is_empty() {
            return Ok(());
        }
        let record = records
            .iter()
            .find(|p| p.id == self.id)
            .ok_or(WorkflowError::NotFound(self.id))?;

        self.draft = EditDraft {
            title: record.title.clone(),
            release_date: record.release_date.clone(),
            description: record.description.clone().unwrap_or_default(),
        };
        self.cover_url.clone_from(&record.cover_url);
        self.state = EditState::Editing;
        debug!(id = %self.id, "edit draft seeded");
        Ok(())
    }

    /// Load the collection from `store` and resolve against it.
    ///
    /// Sends the navigator back to the list when the record does not exist.
    pub fn load<S: PublicationStore>(
        &mut self,
        store: &S,
        nav: &mut impl Navigator,
    ) -> Result<(), WorkflowError> {
        let records = store
            .list()
            .map_err(|e| WorkflowError::transport("failed to load publications", &e))?;
        let resolved = self.resolve(&records);
        if let Err(WorkflowError::NotFound(id)) = &resolved {
            warn!(%id, "publication to edit does not exist");
            nav.navigate_to(Route::Publications);
        }
        resolved
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    /// Mutable draft, available only while editing.
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        (self.state == EditState::Editing).then_some(&mut self.draft)
    }

    /// URL of the current cover, kept when no new file is selected.
    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    pub fn cover_file(&self) -> Option<&CoverFile> {
        self.cover_file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success notice to show before leaving the form.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Pick a replacement cover. Rejected files leave the selection as it was.
    pub fn select_cover(&mut self, file: CoverFile) -> Result<(), WorkflowError> {
        if self.state != EditState::Editing {
            return Err(WorkflowError::Busy);
        }
        if let Err(msg) = file.check(self.max_cover_bytes) {
            debug!(name = %file.name, %msg, "cover rejected");
            self.error = Some(msg.clone());
            return Err(WorkflowError::Validation(msg));
        }
        self.cover_file = Some(file);
        self.error = None;
        Ok(())
    }

    /// Validate the draft and move to [`EditState::Submitting`].
    ///
    /// Fails with [`WorkflowError::Busy`] unless editing, and with
    /// [`WorkflowError::Validation`] when title or release date is blank or
    /// the release date is not a calendar date.
    pub fn begin_submit(&mut self) -> Result<Submission, WorkflowError> {
        if self.state != EditState::Editing {
            return Err(WorkflowError::Busy);
        }
        if self.draft.title.trim().is_empty() || self.draft.release_date.trim().is_empty() {
            self.error = Some(REQUIRED_FIELDS.to_string());
            return Err(WorkflowError::Validation(REQUIRED_FIELDS.to_string()));
        }
        if parse_release_date(&self.draft.release_date).is_none() {
            self.error = Some(INVALID_RELEASE_DATE.to_string());
            return Err(WorkflowError::Validation(INVALID_RELEASE_DATE.to_string()));
        }

        self.state = EditState::Submitting;
        self.error = None;
        Ok(Submission {
            id: self.id,
            draft: self.draft.clone(),
            cover_url: self.cover_url.clone(),
            cover_file: self.cover_file.clone(),
        })
    }

    /// Apply the outcome of a [`Submission`].
    ///
    /// Outcomes arriving when no submission is pending are passed through
    /// without touching state.
    pub fn complete(
        &mut self,
        outcome: Result<Publication, WorkflowError>,
    ) -> Result<Publication, WorkflowError> {
        if self.state != EditState::Submitting {
            return outcome;
        }
        match &outcome {
            Ok(saved) => {
                info!(id = %saved.id, "publication updated");
                self.cover_url.clone_from(&saved.cover_url);
                self.cover_file = None;
                self.notice = Some(SAVED_NOTICE);
                self.state = EditState::Saved;
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "update failed");
                self.error = Some(e.to_string());
                self.state = EditState::Editing;
            }
        }
        outcome
    }

    /// Validate, upload, and commit, then send the navigator to the list.
    pub fn submit<S, U>(
        &mut self,
        store: &S,
        uploader: &U,
        nav: &mut impl Navigator,
    ) -> Result<Publication, WorkflowError>
    where
        S: PublicationStore,
        U: ImageUploader,
    {
        let submission = self.begin_submit()?;
        let saved = self.complete(submission.run(store, uploader))?;
        nav.navigate_to(Route::Publications);
        Ok(saved)
    }

    /// Leave the form without saving.
    pub fn cancel(&self, nav: &mut impl Navigator) {
        nav.navigate_to(Route::Publications);
    }
}

/// A validated edit waiting for its I/O.
#[derive(Debug)]
#[must_use = "a submission must be run and completed"]
pub struct Submission {
    id: PublicationId,
    draft: EditDraft,
    cover_url: String,
    cover_file: Option<CoverFile>,
}

impl Submission {
    /// Upload the new cover, if any, then update the store.
    pub fn run<S, U>(self, store: &S, uploader: &U) -> Result<Publication, WorkflowError>
    where
        S: PublicationStore,
        U: ImageUploader,
    {
        let cover_url = match &self.cover_file {
            Some(file) => {
                debug!(name = %file.name, bytes = file.len(), "uploading replacement cover");
                uploader
                    .upload(&file.bytes, &file.name, &file.mime)
                    .map_err(|e| WorkflowError::transport(UPDATE_FAILED, &e))?
            }
            None => self.cover_url,
        };

        let record = Publication {
            id: self.id,
            title: self.draft.title,
            release_date: self.draft.release_date,
            description: Some(self.draft.description).filter(|d| !d.is_empty()),
            cover_url,
        };

        store
            .update(&record)
            .map_err(|e| WorkflowError::transport(UPDATE_FAILED, &e))
    }
}
