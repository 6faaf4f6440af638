// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection bootstrap for the `SQLite` store.
//!
//! Everything `SQLite`-specific is concentrated here: establishing the
//! connection, PRAGMA setup, running the embedded migrations, and reading
//! `last_insert_rowid()`. The `queries/` and `mutations/` modules stay on
//! plain Diesel DSL.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::StoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row shape for `PRAGMA foreign_keys`. PRAGMAs have no Diesel DSL, so
/// the check goes through `sql_query`.
#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection at `database_url`, turns on foreign key enforcement,
/// and brings the schema up to date.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, the PRAGMA
/// fails, or a migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, StoreError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| StoreError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Applies any pending embedded migrations.
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

/// Confirms that `PRAGMA foreign_keys` is in effect on this connection.
///
/// Shift and unmatched rows hang off their roster by foreign key; a
/// connection without enforcement would let a delete orphan them.
///
/// # Errors
///
/// Returns [`StoreError::ForeignKeyEnforcementNotEnabled`] when the PRAGMA
/// reports enforcement off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysRow>(conn)?
        .foreign_keys;

    if enabled == 0 {
        return Err(StoreError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Switches a file-backed database to WAL journaling, which keeps readers
/// unblocked while the single writer holds its transaction.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Reads `last_insert_rowid()` for the generated id of the previous
/// insert. Not every insert shape Diesel produces for `SQLite` can carry a
/// `RETURNING` clause.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, StoreError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
