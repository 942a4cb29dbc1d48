// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module contains SQLite-specific initialization, migration, and
//! helper functions that cannot be expressed in Diesel DSL. All collection
//! queries and mutations live in `queries/` and `mutations/`.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

use crate::error::PersistenceError;

/// Embedded schema migrations, one per collection.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Every collection the store must carry, paired with the DDL that creates
/// it. The DDL is the same text the migrations run, and every statement is
/// `IF NOT EXISTS`, so re-executing it only creates what is missing.
const EXPECTED_COLLECTIONS: [(&str, &str); 4] = [
    (
        "raffles",
        include_str!("../../migrations/2026-01-10-000001_create_raffles/up.sql"),
    ),
    (
        "clients",
        include_str!("../../migrations/2026-01-10-000002_create_clients/up.sql"),
    ),
    (
        "access_codes",
        include_str!("../../migrations/2026-01-10-000003_create_access_codes/up.sql"),
    ),
    (
        "settings",
        include_str!("../../migrations/2026-01-10-000004_create_settings/up.sql"),
    ),
];

/// Helper row struct for raw catalog queries.
#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Run pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    verify_collections(&mut conn)?;

    Ok(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    conn.batch_execute("PRAGMA journal_mode = WAL")
        .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;
    Ok(())
}

/// Checks whether a table exists in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub fn table_exists(conn: &mut SqliteConnection, name: &str) -> Result<bool, PersistenceError> {
    let row: CountRow = diesel::sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(name)
    .get_result(conn)?;
    Ok(row.count > 0)
}

/// Verifies that every expected collection exists, recreating any that is
/// missing.
///
/// A database that went through a partial upgrade (or was tampered with) can
/// carry the migration bookkeeping while lacking a table. Each missing
/// collection is rebuilt empty from the same DDL the migrations use; existing
/// collections are never touched.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried or a rebuild fails.
pub fn verify_collections(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    for (table, ddl) in EXPECTED_COLLECTIONS {
        if table_exists(conn, table)? {
            continue;
        }
        warn!(collection = table, "Collection missing from store, recreating empty");
        conn.batch_execute(ddl)
            .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    }
    Ok(())
}
