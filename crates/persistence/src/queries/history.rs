// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History ledger queries.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_ledger::{HistoryAction, HistoryEvent};

use crate::data_models::EventRow;
use crate::diesel_schema::history_events;
use crate::error::StoreError;

/// Returns the full ordered history of a chain: by version, then by
/// insertion order within a version.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn chain_history(
    conn: &mut SqliteConnection,
    chain_id: &str,
) -> Result<Vec<HistoryEvent>, StoreError> {
    let rows: Vec<EventRow> = history_events::table
        .filter(history_events::chain_id.eq(chain_id))
        .order((
            history_events::version.asc(),
            history_events::event_id.asc(),
        ))
        .load::<EventRow>(conn)?;
    rows.into_iter().map(EventRow::into_event).collect()
}

/// Returns true if a roster has any recorded event beyond its creation.
///
/// Gates hard deletion: a draft that has been edited or resolved keeps
/// its paper trail.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn history_beyond_creation(
    conn: &mut SqliteConnection,
    roster_id: i64,
) -> Result<bool, StoreError> {
    let count: i64 = history_events::table
        .filter(history_events::roster_id.eq(roster_id))
        .filter(history_events::action.ne(HistoryAction::Created.as_str()))
        .filter(history_events::action.ne(HistoryAction::VersionCreated.as_str()))
        .select(count_star())
        .first::<i64>(conn)?;
    Ok(count > 0)
}
