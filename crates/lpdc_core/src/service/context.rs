//! Collaborators shared by every domain service.

use crate::model::authority::{Bestuurseenheid, FormalInformalChoice};
use crate::model::concept::ConceptDisplayConfiguration;
use crate::model::date::FormatPreservingDate;
use crate::model::identity::{EntityKind, IdentityGenerator};
use crate::model::instance::Instance;
use crate::model::iri::Iri;
use crate::repo::{
    AddressFetcher, BestuurseenheidRepository, ConceptDisplayConfigurationRepository,
    ConceptRepository, ConceptSnapshotRepository, FormalInformalChoiceRepository,
    InstanceRepository, RepoError, RepoResult, SqliteBestuurseenheidRepository,
    SqliteConceptDisplayConfigurationRepository, SqliteConceptRepository,
    SqliteConceptSnapshotRepository, SqliteFormalInformalChoiceRepository,
    SqliteInstanceRepository,
};
use crate::semantic::{InstanceStatementMapper, SemanticFormsMapper};
use crate::service::clock::Clock;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::Connection;

/// Borrowed collaborators; cheap to copy into each service.
#[derive(Clone, Copy)]
pub struct ServiceContext<'a> {
    pub instances: &'a dyn InstanceRepository,
    pub concepts: &'a dyn ConceptRepository,
    pub snapshots: &'a dyn ConceptSnapshotRepository,
    pub bestuurseenheden: &'a dyn BestuurseenheidRepository,
    pub choices: &'a dyn FormalInformalChoiceRepository,
    pub display_configurations: &'a dyn ConceptDisplayConfigurationRepository,
    pub addresses: &'a dyn AddressFetcher,
    pub mapper: &'a dyn SemanticFormsMapper,
    pub ids: &'a dyn IdentityGenerator,
    pub clock: &'a dyn Clock,
}

impl ServiceContext<'_> {
    pub(crate) fn choice_of(
        &self,
        bestuurseenheid: &Bestuurseenheid,
    ) -> ServiceResult<Option<FormalInformalChoice>> {
        Ok(self.choices.find_by_bestuurseenheid(bestuurseenheid)?)
    }

    /// Versioned update with conflict logging.
    pub(crate) fn update_instance(
        &self,
        event: &str,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<()> {
        match self
            .instances
            .update(bestuurseenheid, instance, expected_version)
        {
            Ok(()) => {
                info!(
                    "event={event} module=service status=ok instance_id={} bestuurseenheid_id={}",
                    instance.id,
                    bestuurseenheid.id()
                );
                Ok(())
            }
            Err(RepoError::ConcurrentUpdate(err)) => {
                warn!(
                    "event={event} module=service status=conflict instance_id={} expected={} stored={}",
                    instance.id, err.expected_version, err.stored_version
                );
                Err(ServiceError::ConcurrentUpdate(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Marks the concept as instantiated for the authority, creating its
    /// display configuration when missing.
    pub(crate) fn mark_concept_instantiated(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> ServiceResult<()> {
        if self
            .display_configurations
            .find_by_concept_id(bestuurseenheid, concept_id)?
            .is_none()
        {
            let (id, uuid) = self
                .ids
                .new_identity(EntityKind::ConceptDisplayConfiguration)?;
            self.display_configurations
                .save(&ConceptDisplayConfiguration {
                    id,
                    uuid,
                    concept_is_new: true,
                    concept_is_instantiated: false,
                    bestuurseenheid_id: bestuurseenheid.id().clone(),
                    concept_id: concept_id.clone(),
                })?;
        }
        Ok(self
            .display_configurations
            .remove_concept_is_new_flag_and_set_instantiated_flag(bestuurseenheid, concept_id)?)
    }

    pub(crate) fn sync_concept_instantiated(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> ServiceResult<()> {
        Ok(self
            .display_configurations
            .sync_instantiated_flag(bestuurseenheid, concept_id)?)
    }
}

/// SQLite-backed repositories over one connection.
pub struct SqliteRepositories<'conn> {
    pub instances: SqliteInstanceRepository<'conn>,
    pub concepts: SqliteConceptRepository<'conn>,
    pub snapshots: SqliteConceptSnapshotRepository<'conn>,
    pub bestuurseenheden: SqliteBestuurseenheidRepository<'conn>,
    pub choices: SqliteFormalInformalChoiceRepository<'conn>,
    pub display_configurations: SqliteConceptDisplayConfigurationRepository<'conn>,
    pub mapper: InstanceStatementMapper,
}

impl<'conn> SqliteRepositories<'conn> {
    /// # Errors
    /// - Any repository rejecting the connection (unmigrated or missing table).
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            instances: SqliteInstanceRepository::try_new(conn)?,
            concepts: SqliteConceptRepository::try_new(conn)?,
            snapshots: SqliteConceptSnapshotRepository::try_new(conn)?,
            bestuurseenheden: SqliteBestuurseenheidRepository::try_new(conn)?,
            choices: SqliteFormalInformalChoiceRepository::try_new(conn)?,
            display_configurations: SqliteConceptDisplayConfigurationRepository::try_new(conn)?,
            mapper: InstanceStatementMapper,
        })
    }

    pub fn context<'a>(
        &'a self,
        addresses: &'a dyn AddressFetcher,
        ids: &'a dyn IdentityGenerator,
        clock: &'a dyn Clock,
    ) -> ServiceContext<'a> {
        ServiceContext {
            instances: &self.instances,
            concepts: &self.concepts,
            snapshots: &self.snapshots,
            bestuurseenheden: &self.bestuurseenheden,
            choices: &self.choices,
            display_configurations: &self.display_configurations,
            addresses,
            mapper: &self.mapper,
            ids,
            clock,
        }
    }
}
