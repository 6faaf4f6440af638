// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rostra_domain::{
    ChainId, Person, RawShift, Roster, RosterShift, RosterStatus, UnmatchedEntry, VenueId,
    WeekConfig,
};
use rostra_ledger::Actor;
use time::macros::{date, time};

use crate::matching::MatchCandidate;

pub fn test_actor() -> Actor {
    Actor::new(String::from("mgr-1"), String::from("user"))
}

/// A roster for venue "harbor" covering the Monday-aligned week of
/// 2025-01-06, in the given status.
pub fn test_roster(status: RosterStatus) -> Roster {
    let venue: VenueId = VenueId::new("harbor");
    let chain_id: ChainId = ChainId::derive(&venue, date!(2025 - 01 - 06), WeekConfig::default());
    Roster {
        roster_id: 11,
        venue_id: venue,
        name: String::from("Week 2"),
        description: None,
        week_start: date!(2025 - 01 - 06),
        start_date: date!(2025 - 01 - 06),
        end_date: date!(2025 - 01 - 12),
        status,
        chain_id,
        version_number: 1,
        revision: 1,
        is_active: status == RosterStatus::Published,
        created_by: String::from("mgr-1"),
        created_at: String::from("2025-01-02T09:00:00Z"),
        published_at: None,
        published_by: None,
        source_file: None,
    }
}

pub fn test_shift(roster_id: i64, user_id: Option<&str>) -> RosterShift {
    RosterShift {
        shift_id: 101,
        roster_id,
        user_id: user_id.map(rostra_domain::PersonId::new),
        date: date!(2025 - 01 - 07),
        start_time: time!(9:00),
        end_time: time!(17:00),
        break_minutes: 30,
        position: Some(String::from("Bar")),
        notes: None,
        original_name: None,
        has_conflict: true,
        conflict_kind: Some(String::from("overlap")),
    }
}

pub fn test_entry(roster_id: i64, resolved: bool) -> UnmatchedEntry {
    UnmatchedEntry {
        entry_id: 201,
        roster_id,
        original_name: String::from("J. Doe"),
        date: date!(2025 - 01 - 08),
        start_time: time!(12:00),
        end_time: time!(20:00),
        break_minutes: 30,
        position: Some(String::from("Floor")),
        suggested_user_id: None,
        confidence: 60,
        resolved,
        resolved_user_id: None,
    }
}

pub fn raw_shift(staff_name: &str) -> RawShift {
    RawShift {
        date: date!(2025 - 01 - 07),
        day_label: Some(String::from("Tue")),
        role: Some(String::from("Bar")),
        staff_name: staff_name.to_string(),
        start_time: time!(9:00),
        end_time: time!(17:00),
        has_break: true,
    }
}

pub fn candidate(id: &str, name: &str, active: bool, prior: u32) -> MatchCandidate {
    MatchCandidate::new(Person::new(id, name, active), prior)
}

/// The default matching roster: one John Doe.
pub fn john_only() -> Vec<MatchCandidate> {
    vec![candidate("p-john", "John Doe", true, 12)]
}

/// John Doe plus the near-miss Jane Doering.
pub fn john_and_jane() -> Vec<MatchCandidate> {
    vec![
        candidate("p-john", "John Doe", true, 12),
        candidate("p-jane", "Jane Doering", true, 8),
    ]
}
