//! Adding a publication: validate, upload the cover, create.

use tracing::info;

use crate::edit::{INVALID_RELEASE_DATE, REQUIRED_FIELDS};
use crate::model::{CoverFile, Publication, PublicationDraft, parse_release_date};
use crate::workflow::{ImageUploader, PublicationStore, WorkflowError};

/// Prefix for create failures shown to the user.
pub const CREATE_FAILED: &str = "failed to add publication";

/// Form fields of a publication being added.
#[derive(Debug, Clone)]
pub struct NewPublication {
    pub title: String,
    pub release_date: String,
    pub description: Option<String>,
    pub cover: CoverFile,
}

/// Check the form without any I/O.
pub fn validate(new: &NewPublication, max_cover_bytes: usize) -> Result<(), WorkflowError> {
    if new.title.trim().is_empty() || new.release_date.trim().is_empty() {
        return Err(WorkflowError::Validation(REQUIRED_FIELDS.to_string()));
    }
    if parse_release_date(&new.release_date).is_none() {
        return Err(WorkflowError::Validation(INVALID_RELEASE_DATE.to_string()));
    }
    new.cover
        .check(max_cover_bytes)
        .map_err(WorkflowError::Validation)
}

/// Validate, upload the cover, and create the record.
pub fn add_publication<S, U>(
    store: &S,
    uploader: &U,
    new: NewPublication,
    max_cover_bytes: usize,
) -> Result<Publication, WorkflowError>
where
    S: PublicationStore,
    U: ImageUploader,
{
    validate(&new, max_cover_bytes)?;

    let cover_url = uploader
        .upload(&new.cover.bytes, &new.cover.name, &new.cover.mime)
        .map_err(|e| WorkflowError::transport(CREATE_FAILED, &e))?;

    let draft = PublicationDraft {
        title: new.title,
        release_date: new.release_date,
        description: new.description.filter(|d| !d.is_empty()),
        cover_url,
    };
    let created = store
        .create(&draft)
        .map_err(|e| WorkflowError::transport(CREATE_FAILED, &e))?;

    info!(id = %created.id, title = %created.title, "publication added");
    Ok(created)
}
