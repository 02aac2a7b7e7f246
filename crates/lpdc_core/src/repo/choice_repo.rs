//! Formal/informal register preferences.
//!
//! # Invariants
//! - Choices are append-only; the latest by `date_created` is authoritative.
//! - Ties on the creation instant resolve to the highest id.

use crate::model::authority::{Bestuurseenheid, ChosenForm, FormalInformalChoice};
use crate::model::date::FormatPreservingDate;
use crate::repo::error::{ensure_connection_ready, parse_iri, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait FormalInformalChoiceRepository {
    /// Authoritative choice of the authority, if it made one.
    fn find_by_bestuurseenheid(
        &self,
        bestuurseenheid: &Bestuurseenheid,
    ) -> RepoResult<Option<FormalInformalChoice>>;

    fn save(&self, choice: &FormalInformalChoice) -> RepoResult<()>;
}

pub struct SqliteFormalInformalChoiceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFormalInformalChoiceRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["formal_informal_choices"])?;
        Ok(Self { conn })
    }
}

impl FormalInformalChoiceRepository for SqliteFormalInformalChoiceRepository<'_> {
    fn find_by_bestuurseenheid(
        &self,
        bestuurseenheid: &Bestuurseenheid,
    ) -> RepoResult<Option<FormalInformalChoice>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, uuid, date_created, chosen_form, bestuurseenheid_id
                 FROM formal_informal_choices
                 WHERE bestuurseenheid_id = ?1
                 ORDER BY date_created_ms DESC, rowid DESC
                 LIMIT 1;",
                [bestuurseenheid.id().as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((id, uuid, date_created, chosen_form, bestuurseenheid_id)) = row else {
            return Ok(None);
        };

        let chosen_form = ChosenForm::parse(&chosen_form).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "unknown chosen form `{chosen_form}` in formal_informal_choices.chosen_form"
            ))
        })?;
        let date_created = FormatPreservingDate::of(date_created).map_err(|err| {
            RepoError::InvalidData(format!("formal_informal_choices.date_created: {err}"))
        })?;
        Ok(Some(FormalInformalChoice::new(
            parse_iri(id, "formal_informal_choices.id")?,
            uuid,
            date_created,
            chosen_form,
            parse_iri(bestuurseenheid_id, "formal_informal_choices.bestuurseenheid_id")?,
        )?))
    }

    fn save(&self, choice: &FormalInformalChoice) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO formal_informal_choices (
                id, uuid, date_created, date_created_ms, chosen_form, bestuurseenheid_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                choice.id.as_str(),
                choice.uuid.as_str(),
                choice.date_created.value(),
                choice.date_created.instant().timestamp_millis(),
                choice.chosen_form.as_str(),
                choice.bestuurseenheid_id.as_str(),
            ],
        )?;
        Ok(())
    }
}
