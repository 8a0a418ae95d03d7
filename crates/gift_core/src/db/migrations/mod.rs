//! Ordered schema steps for the gift store.
//!
//! `PRAGMA user_version` records the last applied step. Pending steps run in
//! one transaction, so a failing step leaves the schema at its old version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "catalog_users_wishes",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "option_name_unique",
        sql: include_str!("0002_option_name_unique.sql"),
    },
];

/// Schema version this build migrates databases to.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |step| step.version)
}

/// Brings `conn` to [`latest_version`] and returns the versions applied.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is ahead of this build.
/// - `Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<Vec<u32>> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|step| step.version > current)
        .collect();
    if pending.is_empty() {
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        run_step(&tx, step)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(pending.iter().map(|step| step.version).collect())
}

fn run_step(tx: &Transaction<'_>, step: &Migration) -> DbResult<()> {
    tx.execute_batch(step.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", step.version))
        .map_err(|source| DbError::Migration {
            version: step.version,
            name: step.name,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::MIGRATIONS;
    use std::collections::HashSet;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, step) in MIGRATIONS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
    }

    #[test]
    fn step_names_are_unique() {
        let names: HashSet<&str> = MIGRATIONS.iter().map(|step| step.name).collect();
        assert_eq!(names.len(), MIGRATIONS.len());
    }
}
