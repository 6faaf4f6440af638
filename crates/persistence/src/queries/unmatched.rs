// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unmatched entry queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_domain::UnmatchedEntry;

use crate::data_models::UnmatchedRow;
use crate::diesel_schema::unmatched_entries;
use crate::error::StoreError;

/// Lists a roster's unmatched entries, unresolved first, then by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_unmatched(
    conn: &mut SqliteConnection,
    roster_id: i64,
) -> Result<Vec<UnmatchedEntry>, StoreError> {
    let rows: Vec<UnmatchedRow> = unmatched_entries::table
        .filter(unmatched_entries::roster_id.eq(roster_id))
        .order((
            unmatched_entries::resolved.asc(),
            unmatched_entries::entry_id.asc(),
        ))
        .load::<UnmatchedRow>(conn)?;
    rows.into_iter().map(UnmatchedRow::into_entry).collect()
}

/// Retrieves an unmatched entry by id.
///
/// # Errors
///
/// Returns [`StoreError::EntryNotFound`] if no row matches.
pub fn get_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<UnmatchedEntry, StoreError> {
    let row: UnmatchedRow = unmatched_entries::table
        .filter(unmatched_entries::entry_id.eq(entry_id))
        .first::<UnmatchedRow>(conn)
        .optional()?
        .ok_or(StoreError::EntryNotFound(entry_id))?;
    row.into_entry()
}
