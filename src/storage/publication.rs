//! Publication storage: list, create, update, and delete catalog records.

use jiff::Timestamp;
use rusqlite::{Row, params};
use tracing::debug;

use crate::model::{Publication, PublicationDraft, PublicationId, parse_release_date};
use crate::workflow::PublicationStore;

use super::{Result, Storage, StorageError};

impl Storage {
    /// All publications in insertion order.
    pub fn list_publications(&self) -> Result<Vec<Publication>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, release_date, description, cover_url
             FROM publication ORDER BY id",
        )?;
        let rows = stmt.query_map([], publication_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn load_publication(&self, id: PublicationId) -> Result<Publication> {
        self.conn
            .query_row(
                "SELECT id, title, release_date, description, cover_url
                 FROM publication WHERE id = ?1",
                [id.0],
                publication_from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::PublicationNotFound(id),
                other => other.into(),
            })
    }

    /// Inserts a new publication and returns it with its assigned id.
    ///
    /// Ids are never reused, even after deletes.
    pub fn create_publication(&self, draft: &PublicationDraft) -> Result<Publication> {
        check_draft(draft)?;
        self.conn.execute(
            "INSERT INTO publication (title, release_date, description, cover_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.title.trim(),
                draft.release_date.trim(),
                non_empty(draft.description.as_deref()),
                draft.cover_url.trim(),
                Timestamp::now().to_string(),
            ],
        )?;
        let id = PublicationId(self.conn.last_insert_rowid());
        debug!(%id, "publication row inserted");
        self.load_publication(id)
    }

    /// Replaces every field of an existing publication except its id.
    pub fn update_publication(&self, record: &Publication) -> Result<Publication> {
        check_draft(&PublicationDraft::from(record))?;
        let rows = self.conn.execute(
            "UPDATE publication
             SET title = ?1, release_date = ?2, description = ?3, cover_url = ?4
             WHERE id = ?5",
            params![
                record.title.trim(),
                record.release_date.trim(),
                non_empty(record.description.as_deref()),
                record.cover_url.trim(),
                record.id.0,
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::PublicationNotFound(record.id));
        }
        debug!(id = %record.id, "publication row updated");
        self.load_publication(record.id)
    }

    pub fn delete_publication(&self, id: PublicationId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM publication WHERE id = ?1", [id.0])?;
        if rows == 0 {
            return Err(StorageError::PublicationNotFound(id));
        }
        debug!(%id, "publication row deleted");
        Ok(())
    }
}

impl PublicationStore for Storage {
    type Error = StorageError;

    fn list(&self) -> Result<Vec<Publication>> {
        self.list_publications()
    }

    fn create(&self, draft: &PublicationDraft) -> Result<Publication> {
        self.create_publication(draft)
    }

    fn update(&self, record: &Publication) -> Result<Publication> {
        self.update_publication(record)
    }

    fn delete(&self, id: PublicationId) -> Result<()> {
        self.delete_publication(id)
    }
}

fn publication_from_row(row: &Row<'_>) -> rusqlite::Result<Publication> {
    Ok(Publication {
        id: PublicationId(row.get(0)?),
        title: row.get(1)?,
        release_date: row.get(2)?,
        description: row.get(3)?,
        cover_url: row.get(4)?,
    })
}

fn check_draft(draft: &PublicationDraft) -> Result<()> {
    if let Some(field) = draft.missing_fields().first().copied() {
        return Err(StorageError::MissingField(field));
    }
    if parse_release_date(&draft.release_date).is_none() {
        let date = draft.release_date.trim().to_string();
        return Err(StorageError::InvalidReleaseDate(date));
    }
    Ok(())
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_storage() -> Storage {
        Storage::in_memory().unwrap()
    }

    fn draft(title: &str, release_date: &str) -> PublicationDraft {
        PublicationDraft {
            title: title.into(),
            release_date: release_date.into(),
            description: Some("Annual report".into()),
            cover_url: "file:///covers/a.png".into(),
        }
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let storage = test_storage();

        let a = storage.create_publication(&draft("A", "2024-01-01")).unwrap();
        let b = storage.create_publication(&draft("B", "2024-02-01")).unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.title, "A");
        assert_eq!(a.description.as_deref(), Some("Annual report"));
    }

    #[test]
    fn create_rejects_missing_title() {
        let storage = test_storage();
        let err = storage
            .create_publication(&draft(" ", "2024-01-01"))
            .unwrap_err();

        assert!(matches!(err, StorageError::MissingField("title")));
        assert!(storage.list_publications().unwrap().is_empty());
    }

    #[test]
    fn empty_description_is_stored_as_absent() {
        let storage = test_storage();
        let mut d = draft("A", "2024-01-01");
        d.description = Some(String::new());

        let created = storage.create_publication(&d).unwrap();
        assert_eq!(created.description, None);
    }

    #[test]
    fn list_returns_insertion_order() {
        let storage = test_storage();
        storage.create_publication(&draft("Zeta", "2020-01-01")).unwrap();
        storage.create_publication(&draft("Alpha", "2025-01-01")).unwrap();

        let titles: Vec<String> = storage
            .list_publications()
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Zeta", "Alpha"]);
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let storage = test_storage();
        let mut p = storage.create_publication(&draft("A", "2024-01-01")).unwrap();

        p.title = "A (revised)".into();
        p.description = None;
        p.cover_url = "file:///covers/b.png".into();
        let saved = storage.update_publication(&p).unwrap();

        assert_eq!(saved, p);
        assert_eq!(storage.load_publication(p.id).unwrap(), p);
    }

    #[test]
    fn update_nonexistent_fails() {
        let storage = test_storage();
        let p = draft("A", "2024-01-01").with_id(PublicationId(42));

        let err = storage.update_publication(&p).unwrap_err();
        assert!(matches!(err, StorageError::PublicationNotFound(PublicationId(42))));
    }

    #[test]
    fn delete_removes_and_ids_are_not_reused() {
        let storage = test_storage();
        let a = storage.create_publication(&draft("A", "2024-01-01")).unwrap();
        storage.delete_publication(a.id).unwrap();

        assert!(matches!(
            storage.load_publication(a.id).unwrap_err(),
            StorageError::PublicationNotFound(_)
        ));
        let b = storage.create_publication(&draft("B", "2024-01-01")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn delete_nonexistent_fails() {
        let storage = test_storage();
        let err = storage.delete_publication(PublicationId(1)).unwrap_err();
        assert!(matches!(err, StorageError::PublicationNotFound(_)));
    }

    #[test]
    fn catalog_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id = {
            let storage = Storage::new(dir.path().join("home")).unwrap();
            storage.create_publication(&draft("Kept", "2024-01-01")).unwrap().id
        };

        let storage = Storage::new(dir.path().join("home")).unwrap();
        assert_eq!(storage.load_publication(id).unwrap().title, "Kept");
    }

    #[test]
    fn create_rejects_malformed_release_date() {
        let storage = test_storage();
        let err = storage
            .create_publication(&draft("Odd", "next tuesday"))
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidReleaseDate(ref d) if d == "next tuesday"));
        assert!(storage.list_publications().unwrap().is_empty());
    }

    #[test]
    fn update_rejects_malformed_release_date() {
        let storage = test_storage();
        let mut p = storage.create_publication(&draft("A", "2024-01-01")).unwrap();

        p.release_date = "28/02/2024".into();
        let err = storage.update_publication(&p).unwrap_err();

        assert!(matches!(err, StorageError::InvalidReleaseDate(_)));
        assert_eq!(
            storage.load_publication(p.id).unwrap().release_date,
            "2024-01-01"
        );
    }

    #[test]
    fn legacy_malformed_dates_load_as_text() {
        let storage = test_storage();
        storage
            .conn
            .execute(
                "INSERT INTO publication (title, release_date, description, cover_url, created_at)
                 VALUES ('Odd', 'sometime', NULL, 'file:///covers/a.png', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let loaded = storage.list_publications().unwrap().remove(0);
        assert_eq!(loaded.release_date, "sometime");
        assert_eq!(loaded.release_date(), None);
    }
}
