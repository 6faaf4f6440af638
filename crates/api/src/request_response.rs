// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests carry raw caller input; responses carry read views. Neither
//! side exposes domain types that the caller could mutate meaningfully.

use rostra_domain::{RawShift, Roster, RosterShift, RosterStatus, UnmatchedEntry};
use serde::{Deserialize, Serialize};
use time::Date;

/// Request to create a fresh draft roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRosterRequest {
    /// The venue to schedule.
    pub venue_id: String,
    /// Human-readable roster name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Any date inside the week to cover.
    pub week_date: Date,
}

/// Request to edit a draft roster in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRosterRequest {
    /// The roster to edit.
    pub roster_id: i64,
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// Clears the description. Ignored when `description` is set.
    #[serde(default)]
    pub clear_description: bool,
}

/// Request to publish a draft roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRosterRequest {
    /// The roster to publish.
    pub roster_id: i64,
}

/// Request to archive a published roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRosterRequest {
    /// The roster to archive.
    pub roster_id: i64,
}

/// Request to hard-delete a pristine draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRosterRequest {
    /// The roster to delete.
    pub roster_id: i64,
}

/// Request to create the next version within the same chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopySameWeekRequest {
    /// The published roster to copy.
    pub source_roster_id: i64,
}

/// Request to copy a roster into another week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyDifferentWeekRequest {
    /// The roster to copy.
    pub source_roster_id: i64,
    /// Any date inside the target week.
    pub target_week_date: Date,
}

/// Request to reconcile an extraction batch into a new draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileExtractionRequest {
    /// The venue the batch belongs to.
    pub venue_id: String,
    /// Name for the resulting draft.
    pub name: String,
    /// Optional description for the resulting draft.
    pub description: Option<String>,
    /// Any date inside the week the batch covers.
    pub week_date: Date,
    /// Provenance reference of the extracted document.
    pub source_file: Option<String>,
    /// The raw extracted shift records.
    pub shifts: Vec<RawShift>,
}

/// Request to manually resolve an unmatched entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveUnmatchedRequest {
    /// The entry to resolve.
    pub entry_id: i64,
    /// The staff member to assign.
    pub user_id: String,
}

/// Read view of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterInfo {
    /// Database identity.
    pub roster_id: i64,
    /// The venue this roster schedules.
    pub venue_id: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// First day of the covered week.
    pub week_start: Date,
    /// First covered date.
    pub start_date: Date,
    /// Last covered date.
    pub end_date: Date,
    /// Current lifecycle status.
    pub status: RosterStatus,
    /// The version chain this roster belongs to.
    pub chain_id: String,
    /// Version within the chain.
    pub version_number: i32,
    /// Edit counter.
    pub revision: i32,
    /// True for the version currently in effect.
    pub is_active: bool,
    /// The previous version in the chain, derived from chain history.
    pub parent_roster_id: Option<i64>,
    /// Actor identifier of the creator.
    pub created_by: String,
    /// Creation timestamp, ISO 8601.
    pub created_at: String,
    /// Publish timestamp, set once.
    pub published_at: Option<String>,
    /// Actor identifier of the publisher.
    pub published_by: Option<String>,
    /// Provenance reference when created via extraction.
    pub source_file: Option<String>,
}

impl RosterInfo {
    /// Builds the read view from a roster and its derived parent.
    #[must_use]
    pub fn from_roster(roster: &Roster, parent_roster_id: Option<i64>) -> Self {
        Self {
            roster_id: roster.roster_id,
            venue_id: roster.venue_id.value().to_string(),
            name: roster.name.clone(),
            description: roster.description.clone(),
            week_start: roster.week_start,
            start_date: roster.start_date,
            end_date: roster.end_date,
            status: roster.status,
            chain_id: roster.chain_id.value().to_string(),
            version_number: roster.version_number,
            revision: roster.revision,
            is_active: roster.is_active,
            parent_roster_id,
            created_by: roster.created_by.clone(),
            created_at: roster.created_at.clone(),
            published_at: roster.published_at.clone(),
            published_by: roster.published_by.clone(),
            source_file: roster.source_file.clone(),
        }
    }
}

/// Read view of a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInfo {
    /// Database identity.
    pub shift_id: i64,
    /// The owning roster.
    pub roster_id: i64,
    /// The assigned staff member, if resolved.
    pub user_id: Option<String>,
    /// The calendar date of the shift.
    pub date: Date,
    /// Shift start time, `HH:MM:SS`.
    pub start_time: String,
    /// Shift end time, `HH:MM:SS`.
    pub end_time: String,
    /// Break length in minutes.
    pub break_minutes: i32,
    /// Position or role label.
    pub position: Option<String>,
    /// The raw extracted staff name, preserved for audit.
    pub original_name: Option<String>,
    /// Conflict flag slot.
    pub has_conflict: bool,
    /// Conflict kind slot.
    pub conflict_kind: Option<String>,
}

impl ShiftInfo {
    /// Builds the read view from a shift.
    #[must_use]
    pub fn from_shift(shift: &RosterShift) -> Self {
        Self {
            shift_id: shift.shift_id,
            roster_id: shift.roster_id,
            user_id: shift.user_id.as_ref().map(|id| id.value().to_string()),
            date: shift.date,
            start_time: shift.start_time.to_string(),
            end_time: shift.end_time.to_string(),
            break_minutes: shift.break_minutes,
            position: shift.position.clone(),
            original_name: shift.original_name.clone(),
            has_conflict: shift.has_conflict,
            conflict_kind: shift.conflict_kind.clone(),
        }
    }
}

/// Read view of an unmatched entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedEntryInfo {
    /// Database identity.
    pub entry_id: i64,
    /// The owning roster.
    pub roster_id: i64,
    /// The raw extracted staff name.
    pub original_name: String,
    /// The calendar date of the shift.
    pub date: Date,
    /// Best guess below the commit threshold, if any.
    pub suggested_user_id: Option<String>,
    /// Match confidence, 0-100.
    pub confidence: u8,
    /// Whether a human has resolved this entry.
    pub resolved: bool,
    /// The staff member a human assigned, once resolved.
    pub resolved_user_id: Option<String>,
}

impl UnmatchedEntryInfo {
    /// Builds the read view from an entry.
    #[must_use]
    pub fn from_entry(entry: &UnmatchedEntry) -> Self {
        Self {
            entry_id: entry.entry_id,
            roster_id: entry.roster_id,
            original_name: entry.original_name.clone(),
            date: entry.date,
            suggested_user_id: entry
                .suggested_user_id
                .as_ref()
                .map(|id| id.value().to_string()),
            confidence: entry.confidence,
            resolved: entry.resolved,
            resolved_user_id: entry
                .resolved_user_id
                .as_ref()
                .map(|id| id.value().to_string()),
        }
    }
}

/// Response to a successful draft creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRosterResponse {
    /// The created draft.
    pub roster: RosterInfo,
}

/// Response to a successful in-place edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRosterResponse {
    /// The roster after the edit.
    pub roster: RosterInfo,
}

/// Response to a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRosterResponse {
    /// The roster after publication.
    pub roster: RosterInfo,
    /// Number of distinct staff members notified.
    pub notified_users: usize,
}

/// Response to a successful archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRosterResponse {
    /// The roster after archiving.
    pub roster: RosterInfo,
}

/// Response to a successful hard delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRosterResponse {
    /// The deleted roster id.
    pub roster_id: i64,
}

/// Response to a successful copy, same week or different.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRosterResponse {
    /// The new draft.
    pub roster: RosterInfo,
}

/// Response to a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileExtractionResponse {
    /// The created draft.
    pub roster: RosterInfo,
    /// Raw shifts matched at or above the commit threshold.
    pub auto_matched: usize,
    /// Raw shifts queued for manual resolution.
    pub unmatched: usize,
}

/// Response to a successful manual resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveUnmatchedResponse {
    /// The roster with its revision advanced.
    pub roster: RosterInfo,
    /// The entry, now marked resolved.
    pub entry: UnmatchedEntryInfo,
    /// The shift materialized from the entry.
    pub shift: ShiftInfo,
}

/// Full read view of one roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRosterResponse {
    /// The roster.
    pub roster: RosterInfo,
    /// Its shifts, ordered by date and start time.
    pub shifts: Vec<ShiftInfo>,
    /// Its unmatched entries, unresolved first.
    pub entries: Vec<UnmatchedEntryInfo>,
}

/// Response listing every version in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListChainVersionsResponse {
    /// All versions, ordered by version number.
    pub versions: Vec<RosterInfo>,
}

/// Response carrying the full ordered history of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainHistoryResponse {
    /// All events, ordered by (version, event id).
    pub events: Vec<rostra_ledger::HistoryEvent>,
}

/// Response listing a roster's shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftsResponse {
    /// All shifts, ordered by date and start time.
    pub shifts: Vec<ShiftInfo>,
}

/// Response listing a roster's unmatched entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUnmatchedResponse {
    /// All entries, unresolved first.
    pub entries: Vec<UnmatchedEntryInfo>,
}
