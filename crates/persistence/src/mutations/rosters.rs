// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster and shift row mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_domain::{Roster, RosterShift};

use crate::data_models::{NewRosterRow, NewShiftRow};
use crate::diesel_schema::{roster_shifts, rosters};
use crate::error::StoreError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a roster row and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails, including a violation of the
/// (chain, version) uniqueness constraint.
pub fn insert_roster(conn: &mut SqliteConnection, roster: &Roster) -> Result<i64, StoreError> {
    let row: NewRosterRow = NewRosterRow::from_roster(roster)?;
    diesel::insert_into(rosters::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites the mutable columns of an existing roster row.
///
/// Identity, chain and version columns never change after insert.
///
/// # Errors
///
/// Returns [`StoreError::RosterNotFound`] if no row matches.
pub fn update_roster_row(conn: &mut SqliteConnection, roster: &Roster) -> Result<(), StoreError> {
    let updated: usize = diesel::update(
        rosters::table.filter(rosters::roster_id.eq(roster.roster_id)),
    )
    .set((
        rosters::name.eq(&roster.name),
        rosters::description.eq(&roster.description),
        rosters::status.eq(roster.status.as_str()),
        rosters::revision.eq(roster.revision),
        rosters::is_active.eq(i32::from(roster.is_active)),
        rosters::published_at.eq(&roster.published_at),
        rosters::published_by.eq(&roster.published_by),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(StoreError::RosterNotFound(roster.roster_id));
    }
    Ok(())
}

/// Clears the active flag on every other roster in a chain.
///
/// Activation is last-writer-wins: publishing a version supersedes
/// whichever version was active before.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn deactivate_chain_except(
    conn: &mut SqliteConnection,
    chain_id: &str,
    roster_id: i64,
) -> Result<usize, StoreError> {
    Ok(diesel::update(
        rosters::table
            .filter(rosters::chain_id.eq(chain_id))
            .filter(rosters::roster_id.ne(roster_id)),
    )
    .set(rosters::is_active.eq(0))
    .execute(conn)?)
}

/// Inserts one shift owned by `roster_id` and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_shift(
    conn: &mut SqliteConnection,
    roster_id: i64,
    shift: &RosterShift,
) -> Result<i64, StoreError> {
    let row: NewShiftRow = NewShiftRow::from_shift(shift, roster_id)?;
    diesel::insert_into(roster_shifts::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts all shifts of a draft plan under `roster_id`.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_shifts(
    conn: &mut SqliteConnection,
    roster_id: i64,
    shifts: &[RosterShift],
) -> Result<(), StoreError> {
    for shift in shifts {
        insert_shift(conn, roster_id, shift)?;
    }
    Ok(())
}

/// Deletes a roster row. Owned shifts and unmatched entries cascade.
///
/// # Errors
///
/// Returns [`StoreError::RosterNotFound`] if no row matches.
pub fn delete_roster(conn: &mut SqliteConnection, roster_id: i64) -> Result<(), StoreError> {
    let deleted: usize =
        diesel::delete(rosters::table.filter(rosters::roster_id.eq(roster_id))).execute(conn)?;

    if deleted == 0 {
        return Err(StoreError::RosterNotFound(roster_id));
    }
    Ok(())
}
