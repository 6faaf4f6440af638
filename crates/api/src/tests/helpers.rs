// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API tests: collaborator fakes, canned
//! requests and a reconciled draft ready to publish.

use std::cell::RefCell;

use rostra_domain::{Person, PersonId, RawShift, VenueId};
use rostra_ledger::Actor;
use rostra_persistence::Store;
use time::Date;
use time::macros::{date, time};

use crate::collaborators::{
    NotificationKind, NotificationSink, PermissionGate, RosterAction, VenueDirectory,
};
use crate::handlers::{ApiConfig, reconcile_extraction};
use crate::request_response::{
    CreateRosterRequest, ReconcileExtractionRequest, ReconcileExtractionResponse, RosterInfo,
};

pub const NOW: &str = "2025-01-03T10:00:00Z";

/// Gate that permits everything.
pub struct AllowAllGate;

impl PermissionGate for AllowAllGate {
    fn can_perform(&self, _actor: &Actor, _action: RosterAction) -> bool {
        true
    }
}

/// Gate that denies everything.
pub struct DenyAllGate;

impl PermissionGate for DenyAllGate {
    fn can_perform(&self, _actor: &Actor, _action: RosterAction) -> bool {
        false
    }
}

/// Sink that records every notification it receives.
pub struct RecordingSink {
    pub notices: RefCell<Vec<(PersonId, NotificationKind, i64)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, user_id: &PersonId, kind: NotificationKind, roster_id: i64) {
        self.notices
            .borrow_mut()
            .push((user_id.clone(), kind, roster_id));
    }
}

/// Directory that serves a fixed personnel list for any venue.
pub struct StaticDirectory {
    pub people: Vec<Person>,
}

impl VenueDirectory for StaticDirectory {
    fn active_personnel(&self, _venue_id: &VenueId) -> Vec<Person> {
        self.people.clone()
    }
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("mgr-1"), String::from("user"))
}

pub fn test_store() -> Store {
    Store::new_in_memory().expect("in-memory store")
}

pub fn test_config() -> ApiConfig {
    ApiConfig::default()
}

/// A directory holding exactly "John Doe".
pub fn john_only_directory() -> StaticDirectory {
    StaticDirectory {
        people: vec![Person::new("p-john", "John Doe", true)],
    }
}

/// A directory holding "John Doe" and the confusable "Jane Doering".
pub fn john_and_jane_directory() -> StaticDirectory {
    StaticDirectory {
        people: vec![
            Person::new("p-john", "John Doe", true),
            Person::new("p-jane", "Jane Doering", true),
        ],
    }
}

pub fn create_request(venue: &str, week_date: Date) -> CreateRosterRequest {
    CreateRosterRequest {
        venue_id: venue.to_string(),
        name: String::from("Week roster"),
        description: None,
        week_date,
    }
}

pub fn raw_shift(name: &str, shift_date: Date) -> RawShift {
    RawShift {
        date: shift_date,
        day_label: None,
        role: Some(String::from("Bar")),
        staff_name: name.to_string(),
        start_time: time!(9:00:00),
        end_time: time!(17:00:00),
        has_break: true,
    }
}

pub fn reconcile_request(
    venue: &str,
    week_date: Date,
    names: &[&str],
) -> ReconcileExtractionRequest {
    ReconcileExtractionRequest {
        venue_id: venue.to_string(),
        name: String::from("Week roster"),
        description: None,
        week_date,
        source_file: Some(String::from("rosters/week.pdf")),
        shifts: names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let day: Date = week_date.saturating_add(time::Duration::days(
                    i64::try_from(i % 7).unwrap_or(0),
                ));
                raw_shift(name, day)
            })
            .collect(),
    }
}

/// Reconciles a one-shift batch into a draft for `venue` in the week of
/// 2025-01-06, fully matched against "John Doe".
pub fn reconciled_draft(store: &mut Store) -> RosterInfo {
    reconciled_draft_at(store, "harbor", date!(2025 - 01 - 06))
}

pub fn reconciled_draft_at(store: &mut Store, venue: &str, week_date: Date) -> RosterInfo {
    let response: ReconcileExtractionResponse = reconcile_extraction(
        store,
        &test_config(),
        reconcile_request(venue, week_date, &["John Doe"]),
        &AllowAllGate,
        &john_only_directory(),
        &test_actor(),
        NOW,
    )
    .expect("reconcile");
    assert_eq!(response.auto_matched, 1);
    response.roster
}
