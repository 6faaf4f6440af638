// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift queries, including the publish gate counts and the matching
//! engine's prior-shift statistics.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_domain::{PersonId, RosterShift};

use crate::data_models::ShiftRow;
use crate::diesel_schema::{roster_shifts, rosters};
use crate::error::StoreError;

/// Lists all shifts of a roster, ordered by date and start time.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_shifts(
    conn: &mut SqliteConnection,
    roster_id: i64,
) -> Result<Vec<RosterShift>, StoreError> {
    let rows: Vec<ShiftRow> = roster_shifts::table
        .filter(roster_shifts::roster_id.eq(roster_id))
        .order((roster_shifts::date.asc(), roster_shifts::start_time.asc()))
        .load::<ShiftRow>(conn)?;
    rows.into_iter().map(ShiftRow::into_shift).collect()
}

/// Counts a roster's shifts that have an assigned staff member.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_assigned_shifts(
    conn: &mut SqliteConnection,
    roster_id: i64,
) -> Result<i64, StoreError> {
    Ok(roster_shifts::table
        .filter(roster_shifts::roster_id.eq(roster_id))
        .filter(roster_shifts::user_id.is_not_null())
        .select(count_star())
        .first::<i64>(conn)?)
}

/// Lists the distinct staff members assigned on a roster.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn distinct_assigned_users(
    conn: &mut SqliteConnection,
    roster_id: i64,
) -> Result<Vec<PersonId>, StoreError> {
    let ids: Vec<Option<String>> = roster_shifts::table
        .filter(roster_shifts::roster_id.eq(roster_id))
        .filter(roster_shifts::user_id.is_not_null())
        .select(roster_shifts::user_id)
        .distinct()
        .order(roster_shifts::user_id.asc())
        .load::<Option<String>>(conn)?;
    Ok(ids
        .into_iter()
        .flatten()
        .map(|id| PersonId::new(&id))
        .collect())
}

/// Counts historical shifts per staff member across all of a venue's
/// rosters. Fed to the matching engine as its tie-break statistic.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn prior_shift_counts(
    conn: &mut SqliteConnection,
    venue_id: &str,
) -> Result<Vec<(PersonId, u32)>, StoreError> {
    let rows: Vec<(Option<String>, i64)> = roster_shifts::table
        .inner_join(rosters::table)
        .filter(rosters::venue_id.eq(venue_id))
        .filter(roster_shifts::user_id.is_not_null())
        .group_by(roster_shifts::user_id)
        .select((roster_shifts::user_id, count_star()))
        .load::<(Option<String>, i64)>(conn)?;

    Ok(rows
        .into_iter()
        .filter_map(|(id, count)| {
            id.map(|id| (PersonId::new(&id), u32::try_from(count).unwrap_or(u32::MAX)))
        })
        .collect())
}
