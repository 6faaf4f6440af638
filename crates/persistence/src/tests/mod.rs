// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod chain_tests;
mod history_tests;

use rostra_core::{DraftPlan, NewDraftParams, plan_new_draft};
use rostra_domain::{PersonId, RosterShift, UnmatchedEntry, VenueId, WeekConfig};
use rostra_ledger::Actor;
use time::macros::{date, time};

use crate::Store;

pub const NOW: &str = "2025-01-03T10:00:00Z";

pub fn test_actor() -> Actor {
    Actor::new(String::from("mgr-1"), String::from("user"))
}

pub fn test_store() -> Store {
    Store::new_in_memory().expect("in-memory store")
}

pub fn draft_params(venue: &str, name: &str) -> NewDraftParams {
    NewDraftParams {
        venue_id: VenueId::new(venue),
        name: name.to_string(),
        description: None,
        week_date: date!(2025 - 01 - 06),
        week_config: WeekConfig::default(),
        source_file: None,
    }
}

pub fn unpersisted_shift(user_id: Option<&str>) -> RosterShift {
    RosterShift {
        shift_id: 0,
        roster_id: 0,
        user_id: user_id.map(PersonId::new),
        date: date!(2025 - 01 - 07),
        start_time: time!(9:00:00),
        end_time: time!(17:00:00),
        break_minutes: 30,
        position: Some(String::from("Bar")),
        notes: None,
        original_name: None,
        has_conflict: false,
        conflict_kind: None,
    }
}

pub fn unpersisted_entry(name: &str) -> UnmatchedEntry {
    UnmatchedEntry {
        entry_id: 0,
        roster_id: 0,
        original_name: name.to_string(),
        date: date!(2025 - 01 - 08),
        start_time: time!(12:00:00),
        end_time: time!(20:00:00),
        break_minutes: 30,
        position: Some(String::from("Floor")),
        suggested_user_id: None,
        confidence: 60,
        resolved: false,
        resolved_user_id: None,
    }
}

/// A draft plan for `venue` with one assigned shift and one unmatched
/// entry.
pub fn sample_plan(venue: &str, version: i32) -> DraftPlan {
    let mut plan: DraftPlan = plan_new_draft(draft_params(venue, "Week 2"), version, &test_actor(), NOW)
        .expect("valid plan");
    plan.shifts.push(unpersisted_shift(Some("p-john")));
    plan.unmatched.push(unpersisted_entry("J. Doe"));
    plan
}
