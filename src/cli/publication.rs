//! Catalog commands: list, show, add, edit, delete.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::add::{self, NewPublication};
use crate::deletion::DeletionWorkflow;
use crate::edit::{EditState, EditWorkflow};
use crate::listing::ListView;
use crate::model::{CoverFile, Publication, PublicationId, SortKey, ViewState};
use crate::storage::StorageError;
use crate::upload::{self, CoverStore};
use crate::workflow::WorkflowError;

use super::format::{Row, format_detail, format_row};
use super::{Context, TerminalNavigator};

/// Field changes requested by `pubdesk edit`.
pub(super) struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub cover: Option<PathBuf>,
}

pub(super) fn cmd_list(
    ctx: &Context<'_>,
    search: String,
    sort: SortKey,
    expand: &[i64],
    json: bool,
) -> Result<(), String> {
    let records = ctx
        .storage
        .list_publications()
        .map_err(|e| format!("failed to list publications: {e}"))?;

    let mut view = ViewState::new(sort);
    view.search_term = search;
    for id in expand {
        view.toggle_description(PublicationId(*id));
    }

    let mut list = ListView::new();
    let rows = list.rows(&records, &view);

    if json {
        let rows: Vec<Row<'_>> = rows
            .iter()
            .enumerate()
            .map(|(i, publication)| Row {
                number: i + 1,
                publication,
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows)
            .map_err(|e| format!("failed to serialize publications: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if rows.is_empty() {
        if records.is_empty() {
            println!("No publications yet. Added publications will show up here.");
        } else {
            println!("No publications match '{}'", view.search_term);
        }
        return Ok(());
    }

    for (i, p) in rows.iter().enumerate() {
        println!(
            "{}",
            format_row(i + 1, p, &view, ctx.config.description_preview)
        );
    }
    Ok(())
}

pub(super) fn cmd_show(ctx: &Context<'_>, id: i64) -> Result<(), String> {
    let p = load(ctx, PublicationId(id))?;
    println!("{}", format_detail(&p));
    Ok(())
}

pub(super) fn cmd_add(
    ctx: &Context<'_>,
    title: String,
    date: String,
    description: Option<String>,
    cover: &Path,
) -> Result<(), String> {
    let cover = read_cover(cover)?;
    let covers = cover_store(ctx)?;

    let created = add::add_publication(
        ctx.storage,
        &covers,
        NewPublication {
            title,
            release_date: date,
            description,
            cover,
        },
        ctx.config.max_cover_bytes,
    )
    .map_err(|e| e.to_string())?;

    println!("{}", created.id);
    eprintln!("Added \"{}\"", created.title);
    Ok(())
}

pub(super) fn cmd_edit(ctx: &Context<'_>, id: i64, changes: EditArgs) -> Result<(), String> {
    let id = PublicationId(id);
    let mut nav = TerminalNavigator::default();
    let mut flow = EditWorkflow::new(id, ctx.config.max_cover_bytes);

    flow.load(ctx.storage, &mut nav).map_err(|e| e.to_string())?;
    // An empty catalog leaves the workflow waiting for records that will never come.
    if flow.state() == EditState::Loading {
        return Err(WorkflowError::NotFound(id).to_string());
    }

    if let Some(draft) = flow.draft_mut() {
        if let Some(title) = changes.title {
            draft.title = title;
        }
        if let Some(date) = changes.date {
            draft.release_date = date;
        }
        if let Some(description) = changes.description {
            draft.description = description;
        }
    }
    if let Some(path) = &changes.cover {
        let file = read_cover(path)?;
        flow.select_cover(file).map_err(|e| e.to_string())?;
    }

    let covers = cover_store(ctx)?;
    let saved = flow
        .submit(ctx.storage, &covers, &mut nav)
        .map_err(|e| e.to_string())?;

    if let Some(notice) = flow.notice() {
        eprintln!("{notice}: #{} \"{}\"", saved.id, saved.title);
    }
    if let Some(route) = nav.last {
        eprintln!("→ {route}");
    }
    Ok(())
}

pub(super) fn cmd_delete(ctx: &Context<'_>, id: i64, yes: bool) -> Result<(), String> {
    let record = load(ctx, PublicationId(id))?;
    let mut flow = DeletionWorkflow::new();
    flow.request_delete(&record);

    let confirmed = yes || prompt_confirm(&record)?;
    if !confirmed {
        flow.cancel();
        eprintln!("Cancelled");
        return Ok(());
    }

    flow.confirm_with(ctx.storage).map_err(|e| e.to_string())?;
    eprintln!("Deleted #{} \"{}\"", record.id, record.title);
    Ok(())
}

fn load(ctx: &Context<'_>, id: PublicationId) -> Result<Publication, String> {
    ctx.storage.load_publication(id).map_err(|e| match e {
        StorageError::PublicationNotFound(_) => WorkflowError::NotFound(id).to_string(),
        other => format!("failed to load publication: {other}"),
    })
}

fn read_cover(path: &Path) -> Result<CoverFile, String> {
    upload::read_cover(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

fn cover_store(ctx: &Context<'_>) -> Result<CoverStore, String> {
    CoverStore::new(&ctx.covers_dir).map_err(|e| {
        format!(
            "failed to open cover directory {}: {e}",
            ctx.covers_dir.display()
        )
    })
}

/// Ask on the terminal before deleting. Anything but `y`/`yes` declines.
fn prompt_confirm(record: &Publication) -> Result<bool, String> {
    eprint!(
        "Delete publication \"{}\"? This cannot be undone. [y/N] ",
        record.title
    );
    io::stderr()
        .flush()
        .map_err(|e| format!("failed to write prompt: {e}"))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| format!("failed to read answer: {e}"))?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
