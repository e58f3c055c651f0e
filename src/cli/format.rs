//! Output formatting for CLI display.

use serde::Serialize;

use crate::listing::{NO_DESCRIPTION, description_preview};
use crate::model::{Publication, ViewState};

/// One list row as printed, numbered from 1 in view order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Row<'a> {
    pub number: usize,
    #[serde(flatten)]
    pub publication: &'a Publication,
}

/// Two-line text form of a list row.
pub(super) fn format_row(
    number: usize,
    p: &Publication,
    view: &ViewState,
    preview_chars: usize,
) -> String {
    let description = description_preview(p, view, preview_chars);
    format!(
        "{number:>3}. #{id:<4} {date:<10}  {title}\n      {description}",
        id = p.id,
        date = p.release_date,
        title = p.title,
    )
}

/// Full text form of one publication.
pub(super) fn format_detail(p: &Publication) -> String {
    format!(
        "#{id}  {title}\nReleased:    {date}\nCover:       {cover}\nDescription: {description}",
        id = p.id,
        title = p.title,
        date = p.release_date,
        cover = p.cover_url,
        description = p.description().unwrap_or(NO_DESCRIPTION),
    )
}
