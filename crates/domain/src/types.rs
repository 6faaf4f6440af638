// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::chain::ChainId;
use crate::status::RosterStatus;

/// Identifier for a venue.
///
/// Venues are managed by an external directory; this core only references
/// them by their stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(String);

impl VenueId {
    /// Creates a new venue identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a staff member.
///
/// Staff identities are owned by the external venue directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Creates a new person identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A staff member as supplied by the venue directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The stable identifier for this person.
    pub id: PersonId,
    /// The display name used for matching against extracted text.
    pub display_name: String,
    /// Whether the person is currently active at the venue.
    pub active: bool,
}

impl Person {
    /// Creates a new person record.
    #[must_use]
    pub fn new(id: &str, display_name: &str, active: bool) -> Self {
        Self {
            id: PersonId::new(id),
            display_name: display_name.to_string(),
            active,
        }
    }
}

/// A raw shift record as returned by the external extraction service.
///
/// Fields are unvalidated beyond presence; the staff name is free text that
/// the matching engine reconciles against known personnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShift {
    /// The calendar date of the shift.
    pub date: Date,
    /// The day label as it appeared in the source document, if any.
    pub day_label: Option<String>,
    /// The position or role label, if any.
    pub role: Option<String>,
    /// The staff name exactly as extracted.
    pub staff_name: String,
    /// Shift start time.
    pub start_time: Time,
    /// Shift end time.
    pub end_time: Time,
    /// Whether the source indicated a break.
    pub has_break: bool,
}

/// One scheduling document for one venue covering one week.
///
/// Rosters are grouped into chains by `chain_id`; at most one roster per
/// chain is active at any moment. A roster is mutable only while in
/// [`RosterStatus::Draft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Database identity. Zero for rosters not yet persisted.
    pub roster_id: i64,
    /// The venue this roster schedules.
    pub venue_id: VenueId,
    /// Human-readable name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The configured start of the covered week.
    pub week_start: Date,
    /// First covered date (equals `week_start`).
    pub start_date: Date,
    /// Last covered date (six days after `week_start`).
    pub end_date: Date,
    /// Current lifecycle status.
    pub status: RosterStatus,
    /// Groups all versions of the same venue-week.
    pub chain_id: ChainId,
    /// Monotonic version within the chain, starting at 1. Never reused.
    pub version_number: i32,
    /// Monotonic edit counter for this roster, starting at 1.
    pub revision: i32,
    /// True only for the version currently in effect within its chain.
    pub is_active: bool,
    /// Actor identifier of the creator.
    pub created_by: String,
    /// Creation timestamp, ISO 8601.
    pub created_at: String,
    /// Set exactly once, on first publish. ISO 8601.
    pub published_at: Option<String>,
    /// Actor identifier of the publisher. Set with `published_at`.
    pub published_by: Option<String>,
    /// Provenance reference when created via extraction.
    pub source_file: Option<String>,
}

impl Roster {
    /// Returns true if the roster can still be edited in place.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.status, RosterStatus::Draft)
    }
}

/// One staff assignment within a roster.
///
/// Owned by its roster and deleted with it. A `user_id` of `None` means the
/// assignment is unresolved; `original_name` preserves the raw extracted
/// text even after matching, for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterShift {
    /// Database identity. Zero for shifts not yet persisted.
    pub shift_id: i64,
    /// The owning roster.
    pub roster_id: i64,
    /// The assigned staff member, if resolved.
    pub user_id: Option<PersonId>,
    /// The calendar date of the shift.
    pub date: Date,
    /// Shift start time.
    pub start_time: Time,
    /// Shift end time.
    pub end_time: Time,
    /// Break length in minutes.
    pub break_minutes: i32,
    /// Position or role label.
    pub position: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The raw extracted staff name, preserved for audit.
    pub original_name: Option<String>,
    /// Conflict flag slot. Detection policy is external to this core.
    pub has_conflict: bool,
    /// Conflict kind slot, opaque to this core.
    pub conflict_kind: Option<String>,
}

/// A raw shift record whose staff name could not be confidently resolved.
///
/// Entries are created during reconciliation and mutated only by manual
/// resolution. Resolved entries are kept, not deleted, as an audit trail of
/// ambiguous input. The shift context columns carry what is needed to
/// materialize a [`RosterShift`] once a human assigns the staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedEntry {
    /// Database identity. Zero for entries not yet persisted.
    pub entry_id: i64,
    /// The owning roster.
    pub roster_id: i64,
    /// The raw extracted staff name.
    pub original_name: String,
    /// The calendar date of the shift.
    pub date: Date,
    /// Shift start time.
    pub start_time: Time,
    /// Shift end time.
    pub end_time: Time,
    /// Break length in minutes.
    pub break_minutes: i32,
    /// Position or role label.
    pub position: Option<String>,
    /// Best guess below the commit threshold, if any.
    pub suggested_user_id: Option<PersonId>,
    /// Match confidence, 0–100.
    pub confidence: u8,
    /// Whether a human has resolved this entry.
    pub resolved: bool,
    /// The staff member a human assigned, once resolved.
    pub resolved_user_id: Option<PersonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_id_round_trip() {
        let venue: VenueId = VenueId::new("harbor-bar");
        assert_eq!(venue.value(), "harbor-bar");
        assert_eq!(venue.to_string(), "harbor-bar");
    }

    #[test]
    fn test_person_id_ordering_is_stable() {
        let a: PersonId = PersonId::new("p-001");
        let b: PersonId = PersonId::new("p-002");
        assert!(a < b);
    }

    #[test]
    fn test_person_creation() {
        let person: Person = Person::new("p-7", "John Doe", true);
        assert_eq!(person.id.value(), "p-7");
        assert_eq!(person.display_name, "John Doe");
        assert!(person.active);
    }
}
