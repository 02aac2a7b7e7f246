//! Upstream read models: concepts and their snapshots.
//!
//! Both are stored as serialized documents keyed by id. Writes are upserts,
//! used when upstream versions arrive.

use crate::model::concept::{Concept, ConceptSnapshot};
use crate::model::iri::Iri;
use crate::repo::error::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait ConceptRepository {
    fn find_by_id(&self, id: &Iri) -> RepoResult<Concept>;

    fn save(&self, concept: &Concept) -> RepoResult<()>;
}

pub trait ConceptSnapshotRepository {
    fn find_by_id(&self, id: &Iri) -> RepoResult<ConceptSnapshot>;

    fn save(&self, snapshot: &ConceptSnapshot) -> RepoResult<()>;
}

pub struct SqliteConceptRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConceptRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["concepts"])?;
        Ok(Self { conn })
    }
}

impl ConceptRepository for SqliteConceptRepository<'_> {
    fn find_by_id(&self, id: &Iri) -> RepoResult<Concept> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM concepts WHERE id = ?1;",
                [id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let document = document.ok_or_else(|| RepoError::not_found("concept", id))?;
        let concept: Concept = serde_json::from_str(&document)?;
        concept.validate()?;
        Ok(concept)
    }

    fn save(&self, concept: &Concept) -> RepoResult<()> {
        concept.validate()?;
        self.conn.execute(
            "INSERT INTO concepts (id, uuid, document)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                uuid = excluded.uuid,
                document = excluded.document;",
            params![
                concept.id.as_str(),
                concept.uuid.as_str(),
                serde_json::to_string(concept)?
            ],
        )?;
        Ok(())
    }
}

pub struct SqliteConceptSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConceptSnapshotRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["concept_snapshots"])?;
        Ok(Self { conn })
    }
}

impl ConceptSnapshotRepository for SqliteConceptSnapshotRepository<'_> {
    fn find_by_id(&self, id: &Iri) -> RepoResult<ConceptSnapshot> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM concept_snapshots WHERE id = ?1;",
                [id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let document = document.ok_or_else(|| RepoError::not_found("concept snapshot", id))?;
        let snapshot: ConceptSnapshot = serde_json::from_str(&document)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &ConceptSnapshot) -> RepoResult<()> {
        snapshot.validate()?;
        self.conn.execute(
            "INSERT INTO concept_snapshots (id, is_version_of_concept, generated_at_time, document)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                is_version_of_concept = excluded.is_version_of_concept,
                generated_at_time = excluded.generated_at_time,
                document = excluded.document;",
            params![
                snapshot.id.as_str(),
                snapshot.is_version_of_concept.as_str(),
                snapshot.generated_at_time.value(),
                serde_json::to_string(snapshot)?
            ],
        )?;
        Ok(())
    }
}
