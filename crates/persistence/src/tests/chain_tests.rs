// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chain queries: version numbering, occupancy and parent derivation.

use rostra_core::{plan_same_week_copy, publish};
use rostra_domain::RosterStatus;

use crate::Store;

use super::{NOW, sample_plan, test_actor, test_store};

const CHAIN: &str = "harbor:2025-01-06";

fn create_and_publish(store: &mut Store) -> i64 {
    let plan = sample_plan("harbor", 1);
    let roster_id = store.create_draft(&plan).expect("create").roster_id;
    let roster = store.get_roster(roster_id).expect("roster");
    let outcome = publish(&roster, 1, 1, &test_actor(), NOW).expect("publishable");
    store.apply_publish(&outcome).expect("apply");
    roster_id
}

#[test]
fn test_next_version_starts_at_one() {
    let mut store = test_store();

    assert_eq!(store.next_version_number(CHAIN).expect("next"), 1);
}

#[test]
fn test_next_version_advances_with_each_creation() {
    let mut store = test_store();
    let first_id = create_and_publish(&mut store);

    assert_eq!(store.next_version_number(CHAIN).expect("next"), 2);

    let first = store.get_roster(first_id).expect("roster");
    let shifts = store.list_shifts(first_id).expect("shifts");
    let plan =
        plan_same_week_copy(&first, 2, &shifts, &[], &test_actor(), NOW).expect("copyable");
    store.create_draft(&plan).expect("create");

    assert_eq!(store.next_version_number(CHAIN).expect("next"), 3);
}

#[test]
fn test_list_chain_versions_ordered_by_version() {
    let mut store = test_store();
    let first_id = create_and_publish(&mut store);
    let first = store.get_roster(first_id).expect("roster");
    let shifts = store.list_shifts(first_id).expect("shifts");
    let plan =
        plan_same_week_copy(&first, 2, &shifts, &[], &test_actor(), NOW).expect("copyable");
    store.create_draft(&plan).expect("create");

    let versions = store.list_chain_versions(CHAIN).expect("versions");
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version_number, 1);
    assert_eq!(versions[1].version_number, 2);
    assert_eq!(versions[1].status, RosterStatus::Draft);
}

#[test]
fn test_week_occupancy_follows_lifecycle() {
    let mut store = test_store();

    assert!(store.find_week_occupant(CHAIN).expect("query").is_none());

    let roster_id = store
        .create_draft(&sample_plan("harbor", 1))
        .expect("create")
        .roster_id;
    let occupant = store
        .find_week_occupant(CHAIN)
        .expect("query")
        .expect("occupied");
    assert_eq!(occupant.roster_id, roster_id);
}

#[test]
fn test_archived_rosters_do_not_occupy_their_week() {
    let mut store = test_store();
    let roster_id = create_and_publish(&mut store);
    let roster = store.get_roster(roster_id).expect("roster");

    let outcome = rostra_core::archive(&roster, &test_actor(), NOW).expect("archivable");
    store.apply_lifecycle(&outcome).expect("apply");

    assert!(store.find_week_occupant(CHAIN).expect("query").is_none());
}

#[test]
fn test_parent_is_previous_version_in_chain() {
    let mut store = test_store();
    let first_id = create_and_publish(&mut store);
    let first = store.get_roster(first_id).expect("roster");
    let shifts = store.list_shifts(first_id).expect("shifts");
    let plan =
        plan_same_week_copy(&first, 2, &shifts, &[], &test_actor(), NOW).expect("copyable");
    let second_id = store.create_draft(&plan).expect("create").roster_id;
    let second = store.get_roster(second_id).expect("roster");

    assert_eq!(store.parent_roster_id(&first).expect("query"), None);
    assert_eq!(
        store.parent_roster_id(&second).expect("query"),
        Some(first_id)
    );
}
