// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Composite mutations.
//!
//! Each public function here applies one core outcome in a single immediate
//! transaction: the state change and its history event land together or not
//! at all.

pub mod history;
pub mod rosters;
pub mod unmatched;

use diesel::SqliteConnection;
use rostra_core::{DraftPlan, LifecycleOutcome, ResolutionOutcome};
use tracing::debug;

use crate::error::StoreError;

/// Identities assigned while persisting a draft plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateDraftResult {
    /// The assigned roster id.
    pub roster_id: i64,
    /// The id of the creation event.
    pub event_id: i64,
}

/// Identities assigned while persisting a manual resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The id of the materialized shift.
    pub shift_id: i64,
    /// The id of the resolution event.
    pub event_id: i64,
}

/// Persists a draft plan: roster, shifts, unmatched entries and the
/// creation event, atomically.
///
/// The generated roster id is stamped into the event row.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is persisted in that case.
pub fn create_draft(
    conn: &mut SqliteConnection,
    plan: &DraftPlan,
) -> Result<CreateDraftResult, StoreError> {
    conn.immediate_transaction(|conn| {
        let roster_id: i64 = rosters::insert_roster(conn, &plan.roster)?;
        rosters::insert_shifts(conn, roster_id, &plan.shifts)?;
        unmatched::insert_entries(conn, roster_id, &plan.unmatched)?;
        let event_id: i64 = history::insert_event(conn, &plan.event, roster_id)?;

        debug!(roster_id, event_id, "persisted draft plan");
        Ok(CreateDraftResult {
            roster_id,
            event_id,
        })
    })
}

/// Persists an update or archive outcome: the roster row and its event,
/// atomically.
///
/// # Errors
///
/// Returns an error if the write fails; nothing is persisted in that case.
pub fn apply_lifecycle(
    conn: &mut SqliteConnection,
    outcome: &LifecycleOutcome,
) -> Result<i64, StoreError> {
    conn.immediate_transaction(|conn| {
        rosters::update_roster_row(conn, &outcome.roster)?;
        history::insert_event(conn, &outcome.event, outcome.roster.roster_id)
    })
}

/// Persists a publish outcome: deactivates every other version in the
/// chain, updates the roster row, and appends the event, atomically.
///
/// # Errors
///
/// Returns an error if the write fails; nothing is persisted in that case.
pub fn apply_publish(
    conn: &mut SqliteConnection,
    outcome: &LifecycleOutcome,
) -> Result<i64, StoreError> {
    conn.immediate_transaction(|conn| {
        let deactivated: usize = rosters::deactivate_chain_except(
            conn,
            outcome.roster.chain_id.value(),
            outcome.roster.roster_id,
        )?;
        rosters::update_roster_row(conn, &outcome.roster)?;
        let event_id: i64 = history::insert_event(conn, &outcome.event, outcome.roster.roster_id)?;

        debug!(
            roster_id = outcome.roster.roster_id,
            deactivated, "published and activated roster"
        );
        Ok(event_id)
    })
}

/// Persists a manual resolution: the materialized shift, the resolved
/// entry, the advanced roster revision, and the event, atomically.
///
/// # Errors
///
/// Returns an error if the write fails; nothing is persisted in that case.
pub fn apply_resolution(
    conn: &mut SqliteConnection,
    outcome: &ResolutionOutcome,
) -> Result<ResolutionResult, StoreError> {
    conn.immediate_transaction(|conn| {
        let shift_id: i64 =
            rosters::insert_shift(conn, outcome.roster.roster_id, &outcome.shift)?;
        unmatched::mark_resolved(conn, &outcome.entry)?;
        rosters::update_roster_row(conn, &outcome.roster)?;
        let event_id: i64 = history::insert_event(conn, &outcome.event, outcome.roster.roster_id)?;

        Ok(ResolutionResult { shift_id, event_id })
    })
}

/// Hard-deletes a draft roster and everything it owns.
///
/// Shifts and unmatched entries go with the roster via cascade. History
/// events are append-only and stay: the creation event remains the record
/// that the draft ever existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_draft(conn: &mut SqliteConnection, roster_id: i64) -> Result<(), StoreError> {
    conn.immediate_transaction(|conn| rosters::delete_roster(conn, roster_id))
}
