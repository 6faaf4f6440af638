// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Rostra roster platform.
//!
//! This crate stores rosters, shifts, unmatched entries and the history
//! ledger in `SQLite` via Diesel. Core outcomes are applied in immediate
//! transactions: a lifecycle change and its event land together or not at
//! all.
//!
//! In-memory databases are used for tests; file-based databases run in WAL
//! mode. Foreign key enforcement is verified at startup because shifts and
//! unmatched entries must never outlive their roster.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use rostra_core::{DraftPlan, LifecycleOutcome, MatchCandidate, ResolutionOutcome};
use rostra_domain::{Person, PersonId, Roster, RosterShift, UnmatchedEntry, VenueId};
use rostra_ledger::HistoryEvent;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use mutations::{CreateDraftResult, ResolutionResult};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Storage adapter for rosters, shifts, unmatched entries and history.
pub struct Store {
    conn: SqliteConnection,
}

impl Store {
    /// Creates a store backed by an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("rostra_memdb_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path_str: &str = path
            .as_ref()
            .to_str()
            .ok_or_else(|| StoreError::InitializationError("Invalid database path".to_string()))?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), StoreError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Draft creation & lifecycle outcomes
    // ========================================================================

    /// Persists a draft plan atomically and returns the assigned ids.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted then.
    pub fn create_draft(&mut self, plan: &DraftPlan) -> Result<CreateDraftResult, StoreError> {
        mutations::create_draft(&mut self.conn, plan)
    }

    /// Persists an update or archive outcome atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is persisted then.
    pub fn apply_lifecycle(&mut self, outcome: &LifecycleOutcome) -> Result<i64, StoreError> {
        mutations::apply_lifecycle(&mut self.conn, outcome)
    }

    /// Persists a publish outcome atomically, deactivating every other
    /// version in the chain in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is persisted then.
    pub fn apply_publish(&mut self, outcome: &LifecycleOutcome) -> Result<i64, StoreError> {
        mutations::apply_publish(&mut self.conn, outcome)
    }

    /// Persists a manual resolution atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is persisted then.
    pub fn apply_resolution(
        &mut self,
        outcome: &ResolutionOutcome,
    ) -> Result<ResolutionResult, StoreError> {
        mutations::apply_resolution(&mut self.conn, outcome)
    }

    /// Hard-deletes a draft roster. Owned shifts and unmatched entries go
    /// with it; history events stay.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster does not exist or the delete fails.
    pub fn delete_draft(&mut self, roster_id: i64) -> Result<(), StoreError> {
        mutations::delete_draft(&mut self.conn, roster_id)
    }

    // ========================================================================
    // Roster & chain queries
    // ========================================================================

    /// Retrieves a roster by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RosterNotFound`] if no roster matches.
    pub fn get_roster(&mut self, roster_id: i64) -> Result<Roster, StoreError> {
        queries::rosters::get_roster(&mut self.conn, roster_id)
    }

    /// Lists every version in a chain, ordered by version number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_chain_versions(&mut self, chain_id: &str) -> Result<Vec<Roster>, StoreError> {
        queries::rosters::list_chain_versions(&mut self.conn, chain_id)
    }

    /// Finds the active version of a chain, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active(&mut self, chain_id: &str) -> Result<Option<Roster>, StoreError> {
        queries::rosters::find_active(&mut self.conn, chain_id)
    }

    /// Finds a non-archived roster occupying a chain's venue-week, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_week_occupant(&mut self, chain_id: &str) -> Result<Option<Roster>, StoreError> {
        queries::rosters::find_week_occupant(&mut self.conn, chain_id)
    }

    /// Returns the next version number for a chain from the ledger's
    /// high-water mark. Version numbers are never reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn next_version_number(&mut self, chain_id: &str) -> Result<i32, StoreError> {
        queries::rosters::next_version_number(&mut self.conn, chain_id)
    }

    /// Derives the parent of a roster: the highest earlier version in its
    /// chain, or `None` for the first version.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn parent_roster_id(&mut self, roster: &Roster) -> Result<Option<i64>, StoreError> {
        queries::rosters::parent_roster_id(&mut self.conn, roster)
    }

    // ========================================================================
    // Shift queries
    // ========================================================================

    /// Lists all shifts of a roster, ordered by date and start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts(&mut self, roster_id: i64) -> Result<Vec<RosterShift>, StoreError> {
        queries::shifts::list_shifts(&mut self.conn, roster_id)
    }

    /// Counts a roster's shifts with an assigned staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_assigned_shifts(&mut self, roster_id: i64) -> Result<i64, StoreError> {
        queries::shifts::count_assigned_shifts(&mut self.conn, roster_id)
    }

    /// Lists the distinct staff members assigned on a roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn distinct_assigned_users(&mut self, roster_id: i64) -> Result<Vec<PersonId>, StoreError> {
        queries::shifts::distinct_assigned_users(&mut self.conn, roster_id)
    }

    /// Builds matching candidates for a venue: each person paired with
    /// their historical shift count at that venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn matching_candidates(
        &mut self,
        venue_id: &VenueId,
        personnel: &[Person],
    ) -> Result<Vec<MatchCandidate>, StoreError> {
        let counts: Vec<(PersonId, u32)> =
            queries::shifts::prior_shift_counts(&mut self.conn, venue_id.value())?;
        Ok(personnel
            .iter()
            .map(|person| {
                let prior: u32 = counts
                    .iter()
                    .find(|(id, _)| *id == person.id)
                    .map_or(0, |(_, count)| *count);
                MatchCandidate::new(person.clone(), prior)
            })
            .collect())
    }

    // ========================================================================
    // Unmatched entry queries
    // ========================================================================

    /// Lists a roster's unmatched entries, unresolved first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_unmatched(&mut self, roster_id: i64) -> Result<Vec<UnmatchedEntry>, StoreError> {
        queries::unmatched::list_unmatched(&mut self.conn, roster_id)
    }

    /// Retrieves an unmatched entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if no entry matches.
    pub fn get_unmatched(&mut self, entry_id: i64) -> Result<UnmatchedEntry, StoreError> {
        queries::unmatched::get_entry(&mut self.conn, entry_id)
    }

    // ========================================================================
    // History ledger
    // ========================================================================

    /// Appends a standalone history event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_event(&mut self, event: &HistoryEvent) -> Result<i64, StoreError> {
        mutations::history::insert_event(&mut self.conn, event, event.roster_id)
    }

    /// Returns the full ordered history of a chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn chain_history(&mut self, chain_id: &str) -> Result<Vec<HistoryEvent>, StoreError> {
        queries::history::chain_history(&mut self.conn, chain_id)
    }

    /// Returns true if a roster has recorded history beyond its creation
    /// event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history_beyond_creation(&mut self, roster_id: i64) -> Result<bool, StoreError> {
        queries::history::history_beyond_creation(&mut self.conn, roster_id)
    }
}
