// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster and chain queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_domain::{Roster, RosterStatus};

use crate::data_models::RosterRow;
use crate::diesel_schema::{history_events, rosters};
use crate::error::StoreError;

/// Retrieves a roster by id.
///
/// # Errors
///
/// Returns [`StoreError::RosterNotFound`] if no row matches.
pub fn get_roster(conn: &mut SqliteConnection, roster_id: i64) -> Result<Roster, StoreError> {
    let row: RosterRow = rosters::table
        .filter(rosters::roster_id.eq(roster_id))
        .first::<RosterRow>(conn)
        .optional()?
        .ok_or(StoreError::RosterNotFound(roster_id))?;
    row.into_roster()
}

/// Lists every version in a chain, ordered by version number.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_chain_versions(
    conn: &mut SqliteConnection,
    chain_id: &str,
) -> Result<Vec<Roster>, StoreError> {
    let rows: Vec<RosterRow> = rosters::table
        .filter(rosters::chain_id.eq(chain_id))
        .order(rosters::version_number.asc())
        .load::<RosterRow>(conn)?;
    rows.into_iter().map(RosterRow::into_roster).collect()
}

/// Finds the active version of a chain, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn find_active(
    conn: &mut SqliteConnection,
    chain_id: &str,
) -> Result<Option<Roster>, StoreError> {
    rosters::table
        .filter(rosters::chain_id.eq(chain_id))
        .filter(rosters::is_active.eq(1))
        .first::<RosterRow>(conn)
        .optional()?
        .map(RosterRow::into_roster)
        .transpose()
}

/// Finds a non-archived roster occupying a chain's venue-week, if any.
///
/// Used to gate different-week copies: the target week is free only when
/// every roster already in its chain is archived.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn find_week_occupant(
    conn: &mut SqliteConnection,
    chain_id: &str,
) -> Result<Option<Roster>, StoreError> {
    rosters::table
        .filter(rosters::chain_id.eq(chain_id))
        .filter(rosters::status.ne(RosterStatus::Archived.as_str()))
        .order(rosters::version_number.desc())
        .first::<RosterRow>(conn)
        .optional()?
        .map(RosterRow::into_roster)
        .transpose()
}

/// Returns the next version number for a chain: one past the high-water
/// mark, never reusing a number even after deletions.
///
/// The mark is taken from the history ledger rather than the rosters
/// table: creation events outlive deleted drafts, so a deleted version's
/// number is never handed out again.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn next_version_number(conn: &mut SqliteConnection, chain_id: &str) -> Result<i32, StoreError> {
    let max_version: Option<i32> = history_events::table
        .filter(history_events::chain_id.eq(chain_id))
        .select(diesel::dsl::max(history_events::version))
        .first::<Option<i32>>(conn)?;
    Ok(max_version.unwrap_or(0) + 1)
}

/// Derives the parent of a roster: the highest earlier version in its
/// chain. The first version of a chain has no parent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn parent_roster_id(
    conn: &mut SqliteConnection,
    roster: &Roster,
) -> Result<Option<i64>, StoreError> {
    let parent: Option<i64> = rosters::table
        .filter(rosters::chain_id.eq(roster.chain_id.value()))
        .filter(rosters::version_number.lt(roster.version_number))
        .order(rosters::version_number.desc())
        .select(rosters::roster_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(parent)
}
