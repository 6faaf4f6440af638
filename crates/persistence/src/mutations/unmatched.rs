// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unmatched entry mutations. Entries are inserted during reconciliation
//! and updated exactly once, when a human resolves them.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_domain::UnmatchedEntry;

use crate::data_models::NewUnmatchedRow;
use crate::diesel_schema::unmatched_entries;
use crate::error::StoreError;

/// Inserts all unmatched entries of a draft plan under `roster_id`.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_entries(
    conn: &mut SqliteConnection,
    roster_id: i64,
    entries: &[UnmatchedEntry],
) -> Result<(), StoreError> {
    for entry in entries {
        let row: NewUnmatchedRow = NewUnmatchedRow::from_entry(entry, roster_id)?;
        diesel::insert_into(unmatched_entries::table)
            .values(&row)
            .execute(conn)?;
    }
    Ok(())
}

/// Marks an entry resolved with the assigned staff member.
///
/// # Errors
///
/// Returns [`StoreError::EntryNotFound`] if no row matches.
pub fn mark_resolved(conn: &mut SqliteConnection, entry: &UnmatchedEntry) -> Result<(), StoreError> {
    let resolved_user: Option<String> = entry
        .resolved_user_id
        .as_ref()
        .map(|id| id.value().to_string());

    let updated: usize = diesel::update(
        unmatched_entries::table.filter(unmatched_entries::entry_id.eq(entry.entry_id)),
    )
    .set((
        unmatched_entries::resolved.eq(i32::from(entry.resolved)),
        unmatched_entries::resolved_user_id.eq(resolved_user),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(StoreError::EntryNotFound(entry.entry_id));
    }
    Ok(())
}
