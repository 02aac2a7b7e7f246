//! Per-authority display flags of concepts.
//!
//! # Invariants
//! - At most one configuration per (authority, concept).
//! - `concept_is_instantiated` mirrors whether the authority has an instance
//!   linked to the concept after every `sync_instantiated_flag`.

use crate::model::authority::Bestuurseenheid;
use crate::model::concept::ConceptDisplayConfiguration;
use crate::model::iri::Iri;
use crate::repo::error::{ensure_connection_ready, parse_iri, RepoError, RepoResult};
use crate::semantic::vocab::DCT_SOURCE;
use rusqlite::{params, Connection, OptionalExtension};

pub trait ConceptDisplayConfigurationRepository {
    fn find_by_concept_id(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<Option<ConceptDisplayConfiguration>>;

    fn save(&self, configuration: &ConceptDisplayConfiguration) -> RepoResult<()>;

    /// Concept is no longer new for the authority and has an instance.
    fn remove_concept_is_new_flag_and_set_instantiated_flag(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<()>;

    /// Recomputes `concept_is_instantiated` from the authority's instances.
    fn sync_instantiated_flag(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<()>;
}

pub struct SqliteConceptDisplayConfigurationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConceptDisplayConfigurationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["concept_display_configurations", "statements"])?;
        Ok(Self { conn })
    }
}

impl ConceptDisplayConfigurationRepository for SqliteConceptDisplayConfigurationRepository<'_> {
    fn find_by_concept_id(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<Option<ConceptDisplayConfiguration>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, uuid, concept_is_new, concept_is_instantiated
                 FROM concept_display_configurations
                 WHERE bestuurseenheid_id = ?1 AND concept_id = ?2;",
                params![bestuurseenheid.id().as_str(), concept_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                        row.get::<_, bool>(3)?,
                    ))
                },
            )
            .optional()?;
        row.map(|(id, uuid, concept_is_new, concept_is_instantiated)| {
            Ok(ConceptDisplayConfiguration {
                id: parse_iri(id, "concept_display_configurations.id")?,
                uuid,
                concept_is_new,
                concept_is_instantiated,
                bestuurseenheid_id: bestuurseenheid.id().clone(),
                concept_id: concept_id.clone(),
            })
        })
        .transpose()
    }

    fn save(&self, configuration: &ConceptDisplayConfiguration) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO concept_display_configurations (
                id, uuid, concept_is_new, concept_is_instantiated, bestuurseenheid_id, concept_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(bestuurseenheid_id, concept_id) DO UPDATE SET
                concept_is_new = excluded.concept_is_new,
                concept_is_instantiated = excluded.concept_is_instantiated;",
            params![
                configuration.id.as_str(),
                configuration.uuid.as_str(),
                configuration.concept_is_new,
                configuration.concept_is_instantiated,
                configuration.bestuurseenheid_id.as_str(),
                configuration.concept_id.as_str(),
            ],
        )?;
        Ok(())
    }

    fn remove_concept_is_new_flag_and_set_instantiated_flag(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE concept_display_configurations
             SET concept_is_new = 0, concept_is_instantiated = 1
             WHERE bestuurseenheid_id = ?1 AND concept_id = ?2;",
            params![bestuurseenheid.id().as_str(), concept_id.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(
                "concept display configuration",
                concept_id,
            ));
        }
        Ok(())
    }

    fn sync_instantiated_flag(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<()> {
        let graph = bestuurseenheid.user_graph()?;
        self.conn.execute(
            "UPDATE concept_display_configurations
             SET concept_is_instantiated = EXISTS(
                SELECT 1
                FROM statements
                WHERE graph = ?3
                  AND subject = root
                  AND predicate = ?4
                  AND object_kind = 'iri'
                  AND object_value = ?2
             )
             WHERE bestuurseenheid_id = ?1 AND concept_id = ?2;",
            params![
                bestuurseenheid.id().as_str(),
                concept_id.as_str(),
                graph.as_str(),
                DCT_SOURCE
            ],
        )?;
        Ok(())
    }
}
