//! Schema migrations for the instance graph store and the upstream read models.
//!
//! # Responsibility
//! - Register schema steps in strictly increasing order.
//! - Apply every pending step in one transaction.
//!
//! # Invariants
//! - Step versions are monotonic and start at 1.
//! - The last applied version is mirrored to `PRAGMA user_version`.
//! - A failing step rolls back every step applied in the same call.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "instance_statements",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "upstream_read_models",
        sql: include_str!("0002_upstream.sql"),
    },
];

/// Latest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Refuses databases written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stored = stored_version(conn)?;
    let latest = latest_version();
    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > stored)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            })?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    Ok(())
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
