// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::RosterStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested operation is not permitted in the roster's current
    /// lifecycle status.
    OperationNotPermitted {
        /// The roster's current status.
        status: RosterStatus,
        /// The operation that was requested.
        operation: &'static str,
        /// Why the transition table denied it.
        reason: &'static str,
    },
    /// A roster cannot be published without at least one assigned shift.
    NoAssignedShifts {
        /// The roster that failed the publish gate.
        roster_id: i64,
    },
    /// Status string is not a valid lifecycle status.
    InvalidStatus(String),
    /// Matching thresholds are inconsistent.
    InvalidThresholds {
        /// The configured commit threshold.
        commit_threshold: u8,
        /// The configured suggestion floor.
        suggestion_floor: u8,
    },
    /// An extraction batch exceeds the boundary cap.
    BatchTooLarge {
        /// The submitted batch size.
        size: usize,
        /// The enforced cap.
        cap: usize,
    },
    /// Roster name is empty or invalid.
    InvalidName(String),
    /// The unmatched entry has already been resolved.
    EntryAlreadyResolved {
        /// The entry in question.
        entry_id: i64,
    },
    /// A draft with recorded history beyond its creation event cannot be
    /// hard-deleted.
    HistoryProtected {
        /// The roster in question.
        roster_id: i64,
    },
    /// A non-archived roster already occupies the target venue-week.
    WeekOccupied {
        /// The roster blocking the copy.
        conflicting_roster_id: i64,
        /// The target week start, ISO 8601.
        week_start: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OperationNotPermitted {
                status,
                operation,
                reason,
            } => {
                write!(f, "Cannot {operation} a {status} roster: {reason}")
            }
            Self::NoAssignedShifts { roster_id } => {
                write!(f, "Roster {roster_id} has no assigned shifts")
            }
            Self::InvalidStatus(s) => write!(f, "Invalid roster status: '{s}'"),
            Self::InvalidThresholds {
                commit_threshold,
                suggestion_floor,
            } => {
                write!(
                    f,
                    "Invalid matching thresholds: commit {commit_threshold} must be at most 100 and above suggestion floor {suggestion_floor}"
                )
            }
            Self::BatchTooLarge { size, cap } => {
                write!(f, "Extraction batch of {size} records exceeds the cap of {cap}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid roster name: {msg}"),
            Self::EntryAlreadyResolved { entry_id } => {
                write!(f, "Unmatched entry {entry_id} is already resolved")
            }
            Self::HistoryProtected { roster_id } => {
                write!(
                    f,
                    "Roster {roster_id} has recorded history beyond creation and cannot be deleted"
                )
            }
            Self::WeekOccupied {
                conflicting_roster_id,
                week_start,
            } => {
                write!(
                    f,
                    "A non-archived roster ({conflicting_roster_id}) already exists for the week of {week_start}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
