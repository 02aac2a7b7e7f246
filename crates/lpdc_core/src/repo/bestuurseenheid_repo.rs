//! Authority lookup.

use crate::model::authority::Bestuurseenheid;
use crate::model::iri::Iri;
use crate::repo::error::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait BestuurseenheidRepository {
    fn find_by_id(&self, id: &Iri) -> RepoResult<Bestuurseenheid>;

    fn save(&self, bestuurseenheid: &Bestuurseenheid) -> RepoResult<()>;
}

pub struct SqliteBestuurseenheidRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBestuurseenheidRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["bestuurseenheden"])?;
        Ok(Self { conn })
    }
}

impl BestuurseenheidRepository for SqliteBestuurseenheidRepository<'_> {
    fn find_by_id(&self, id: &Iri) -> RepoResult<Bestuurseenheid> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM bestuurseenheden WHERE id = ?1;",
                [id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let document = document.ok_or_else(|| RepoError::not_found("bestuurseenheid", id))?;
        let stored: Bestuurseenheid = serde_json::from_str(&document)?;
        // Re-run construction checks on stored documents.
        Ok(Bestuurseenheid::new(
            stored.id().clone(),
            stored.uuid(),
            stored.pref_label(),
            stored.classification(),
            stored.status(),
            stored.spatials().to_vec(),
        )?)
    }

    fn save(&self, bestuurseenheid: &Bestuurseenheid) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO bestuurseenheden (id, uuid, document)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                uuid = excluded.uuid,
                document = excluded.document;",
            params![
                bestuurseenheid.id().as_str(),
                bestuurseenheid.uuid(),
                serde_json::to_string(bestuurseenheid)?
            ],
        )?;
        Ok(())
    }
}
