// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History ledger tests: ordering, payload round-trips and the
//! beyond-creation gate.

use rostra_core::{RosterChanges, plan_same_week_copy, publish, update};
use rostra_ledger::{EventPayload, HistoryAction};

use super::{NOW, sample_plan, test_actor, test_store};

const CHAIN: &str = "harbor:2025-01-06";

#[test]
fn test_chain_history_orders_by_version_then_insertion() {
    let mut store = test_store();
    let roster_id = store
        .create_draft(&sample_plan("harbor", 1))
        .expect("create")
        .roster_id;
    let roster = store.get_roster(roster_id).expect("roster");

    let publish_outcome = publish(&roster, 1, 1, &test_actor(), NOW).expect("publishable");
    store.apply_publish(&publish_outcome).expect("apply");

    let published = store.get_roster(roster_id).expect("roster");
    let shifts = store.list_shifts(roster_id).expect("shifts");
    let plan =
        plan_same_week_copy(&published, 2, &shifts, &[], &test_actor(), NOW).expect("copyable");
    store.create_draft(&plan).expect("create");

    let history = store.chain_history(CHAIN).expect("history");
    let actions: Vec<HistoryAction> = history.iter().map(|event| event.action).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Created,
            HistoryAction::Published,
            HistoryAction::VersionCreated,
        ]
    );
    assert_eq!(history[0].version, 1);
    assert_eq!(history[2].version, 2);
}

#[test]
fn test_event_payload_round_trips_through_storage() {
    let mut store = test_store();
    let roster_id = store
        .create_draft(&sample_plan("harbor", 1))
        .expect("create")
        .roster_id;
    let roster = store.get_roster(roster_id).expect("roster");

    let changes = RosterChanges {
        name: Some(String::from("renamed")),
        description: None,
    };
    let outcome = update(&roster, changes, &test_actor(), NOW).expect("updatable");
    store.apply_lifecycle(&outcome).expect("apply");

    let history = store.chain_history(CHAIN).expect("history");
    let updated = history
        .iter()
        .find(|event| event.action == HistoryAction::Updated)
        .expect("an update event");
    match &updated.payload {
        EventPayload::Updated { fields, revision } => {
            assert_eq!(fields, &vec![String::from("name")]);
            assert_eq!(*revision, 2);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
    assert_eq!(updated.actor.id, "mgr-1");
    assert_eq!(updated.recorded_at, NOW);
}

#[test]
fn test_version_copy_event_records_source() {
    let mut store = test_store();
    let roster_id = store
        .create_draft(&sample_plan("harbor", 1))
        .expect("create")
        .roster_id;
    let roster = store.get_roster(roster_id).expect("roster");
    let outcome = publish(&roster, 1, 1, &test_actor(), NOW).expect("publishable");
    store.apply_publish(&outcome).expect("apply");

    let published = store.get_roster(roster_id).expect("roster");
    let plan = plan_same_week_copy(&published, 2, &[], &[], &test_actor(), NOW).expect("copyable");
    store.create_draft(&plan).expect("create");

    let history = store.chain_history(CHAIN).expect("history");
    let copied = history
        .iter()
        .find(|event| event.action == HistoryAction::VersionCreated)
        .expect("a version event");
    match &copied.payload {
        EventPayload::VersionCreated { copied_from, .. } => {
            assert_eq!(*copied_from, Some(roster_id));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}
