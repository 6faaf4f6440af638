// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History ledger mutations. Append-only: events are inserted and never
//! updated or deleted.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rostra_ledger::HistoryEvent;

use crate::data_models::NewEventRow;
use crate::diesel_schema::history_events;
use crate::error::StoreError;
use crate::sqlite::get_last_insert_rowid;

/// Appends a history event, stamping the given roster id, and returns the
/// assigned event id.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &HistoryEvent,
    roster_id: i64,
) -> Result<i64, StoreError> {
    let row: NewEventRow = NewEventRow::from_event(event, roster_id)?;
    diesel::insert_into(history_events::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
