// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle operations exercised through the API boundary.

use rostra_domain::{PersonId, RosterStatus};
use rostra_ledger::HistoryAction;
use time::macros::date;

use crate::collaborators::NotificationKind;
use crate::error::ApiError;
use crate::handlers::{
    archive_roster, chain_history, copy_different_week, copy_same_week, create_roster,
    delete_roster, get_roster, list_chain_versions, publish_roster, update_roster,
};
use crate::request_response::{
    ArchiveRosterRequest, CopyDifferentWeekRequest, CopySameWeekRequest, CreateRosterRequest,
    DeleteRosterRequest, PublishRosterRequest, RosterInfo, UpdateRosterRequest,
};

use super::helpers::{
    AllowAllGate, NOW, RecordingSink, create_request, john_only_directory, reconcile_request,
    reconciled_draft, test_actor, test_config, test_store,
};

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_roster_starts_chain_at_version_one() {
    let mut store = test_store();

    let response = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 08)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");

    let roster: &RosterInfo = &response.roster;
    assert_eq!(roster.chain_id, "harbor:2025-01-06");
    assert_eq!(roster.week_start, date!(2025 - 01 - 06));
    assert_eq!(roster.version_number, 1);
    assert_eq!(roster.status, RosterStatus::Draft);
    assert_eq!(roster.parent_roster_id, None);
    assert!(!roster.is_active);
}

#[test]
fn test_create_into_occupied_week_conflicts() {
    let mut store = test_store();
    create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 06)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");

    let err = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 08)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("occupied week must conflict");

    assert!(matches!(err, ApiError::Conflict { .. }));
    let versions = list_chain_versions(&mut store, "harbor:2025-01-06").expect("versions");
    assert_eq!(versions.versions.len(), 1);
}

#[test]
fn test_create_with_blank_name_is_validation_error() {
    let mut store = test_store();
    let request = CreateRosterRequest {
        venue_id: String::from("harbor"),
        name: String::from("   "),
        description: None,
        week_date: date!(2025 - 01 - 06),
    };

    let err = create_roster(
        &mut store,
        &test_config(),
        request,
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("blank name must fail");

    assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "name"));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_roster_changes_fields_and_revision() {
    let mut store = test_store();
    let created = create_roster(
        &mut store,
        &test_config(),
        CreateRosterRequest {
            description: Some(String::from("first cut")),
            ..create_request("harbor", date!(2025 - 01 - 06))
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");

    let response = update_roster(
        &mut store,
        UpdateRosterRequest {
            roster_id: created.roster.roster_id,
            name: Some(String::from("Week 2 final")),
            description: None,
            clear_description: true,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("update");

    assert_eq!(response.roster.name, "Week 2 final");
    assert_eq!(response.roster.description, None);
    assert_eq!(response.roster.revision, 2);
}

#[test]
fn test_update_published_roster_is_invalid_state() {
    let mut store = test_store();
    let draft = reconciled_draft(&mut store);
    publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect("publish");

    let err = update_roster(
        &mut store,
        UpdateRosterRequest {
            roster_id: draft.roster_id,
            name: Some(String::from("too late")),
            description: None,
            clear_description: false,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("published rosters are immutable");

    assert!(matches!(err, ApiError::InvalidState { .. }));
}

// ============================================================================
// Publish
// ============================================================================

#[test]
fn test_publish_without_assigned_shifts_is_validation_error() {
    let mut store = test_store();
    let created = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 06)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");

    let err = publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: created.roster.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect_err("publish gate must hold");

    assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "shifts"));
    let reloaded = get_roster(&mut store, created.roster.roster_id).expect("roster");
    assert_eq!(reloaded.roster.status, RosterStatus::Draft);
}

#[test]
fn test_publish_notifies_each_assigned_user_once() {
    let mut store = test_store();
    let draft = reconciled_draft(&mut store);
    let sink = RecordingSink::new();

    let response = publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &sink,
        &test_actor(),
        NOW,
    )
    .expect("publish");

    assert!(response.roster.is_active);
    assert_eq!(response.notified_users, 1);
    let notices = sink.notices.borrow();
    assert_eq!(notices.len(), 1);
    assert_eq!(
        *notices.first().expect("one notice"),
        (
            PersonId::new("p-john"),
            NotificationKind::RosterPublished,
            draft.roster_id
        )
    );
}

#[test]
fn test_publish_supersedes_active_version() {
    let mut store = test_store();
    let first = reconciled_draft(&mut store);
    publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: first.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect("publish v1");

    let copy = copy_same_week(
        &mut store,
        CopySameWeekRequest {
            source_roster_id: first.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("copy");
    let sink = RecordingSink::new();
    let second = publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: copy.roster.roster_id,
        },
        &AllowAllGate,
        &sink,
        &test_actor(),
        NOW,
    )
    .expect("publish v2");

    assert!(second.roster.is_active);
    assert_eq!(second.roster.version_number, 2);

    // A later version going live demotes v1 without changing its status.
    let demoted = get_roster(&mut store, first.roster_id).expect("roster");
    assert!(!demoted.roster.is_active);
    assert_eq!(demoted.roster.status, RosterStatus::Published);

    // One notification per distinct assigned user, tagged as an update.
    let notices = sink.notices.borrow();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.first().expect("one notice").1, NotificationKind::RosterUpdated);

    // Exactly one Published event per publish.
    let history = chain_history(&mut store, "harbor:2025-01-06").expect("history");
    let published: usize = history
        .events
        .iter()
        .filter(|event| event.action == HistoryAction::Published)
        .count();
    assert_eq!(published, 2);
}

// ============================================================================
// Same-week copy
// ============================================================================

#[test]
fn test_copy_same_week_preserves_shifts_and_extends_chain() {
    let mut store = test_store();
    let response = crate::handlers::reconcile_extraction(
        &mut store,
        &test_config(),
        reconcile_request(
            "harbor",
            date!(2025 - 01 - 06),
            &["John Doe", "John Doe", "John Doe"],
        ),
        &AllowAllGate,
        &john_only_directory(),
        &test_actor(),
        NOW,
    )
    .expect("reconcile");
    assert_eq!(response.auto_matched, 3);
    publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: response.roster.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect("publish");

    let copy = copy_same_week(
        &mut store,
        CopySameWeekRequest {
            source_roster_id: response.roster.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("copy");

    assert_eq!(copy.roster.chain_id, response.roster.chain_id);
    assert_eq!(copy.roster.version_number, 2);
    assert_eq!(copy.roster.status, RosterStatus::Draft);
    assert_eq!(copy.roster.parent_roster_id, Some(response.roster.roster_id));

    let view = get_roster(&mut store, copy.roster.roster_id).expect("roster");
    assert_eq!(view.shifts.len(), 3);
    let source_view = get_roster(&mut store, response.roster.roster_id).expect("roster");
    for (copied, original) in view.shifts.iter().zip(source_view.shifts.iter()) {
        assert_eq!(copied.user_id.as_deref(), Some("p-john"));
        assert_eq!(copied.date, original.date);
        assert!(!copied.has_conflict);
    }
}

#[test]
fn test_copy_same_week_of_draft_is_invalid_state() {
    let mut store = test_store();
    let draft = reconciled_draft(&mut store);

    let err = copy_same_week(
        &mut store,
        CopySameWeekRequest {
            source_roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("draft sources cannot spawn same-week versions");

    assert!(matches!(err, ApiError::InvalidState { .. }));
}

// ============================================================================
// Different-week copy
// ============================================================================

#[test]
fn test_copy_different_week_shifts_dates_into_new_chain() {
    let mut store = test_store();
    let source = reconciled_draft(&mut store);

    let copy = copy_different_week(
        &mut store,
        &test_config(),
        CopyDifferentWeekRequest {
            source_roster_id: source.roster_id,
            target_week_date: date!(2025 - 01 - 21),
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("copy");

    assert_eq!(copy.roster.chain_id, "harbor:2025-01-20");
    assert_eq!(copy.roster.version_number, 1);
    assert_eq!(copy.roster.source_file, None);

    let view = get_roster(&mut store, copy.roster.roster_id).expect("roster");
    assert_eq!(view.shifts.len(), 1);
    assert_eq!(
        view.shifts.first().expect("one shift").date,
        date!(2025 - 01 - 20)
    );
}

#[test]
fn test_copy_different_week_into_occupied_week_conflicts() {
    let mut store = test_store();
    let source = reconciled_draft(&mut store);
    create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 13)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("occupy target week");

    let err = copy_different_week(
        &mut store,
        &test_config(),
        CopyDifferentWeekRequest {
            source_roster_id: source.roster_id,
            target_week_date: date!(2025 - 01 - 13),
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("occupied target week must conflict");

    assert!(matches!(err, ApiError::Conflict { .. }));

    // Nothing was created in the target chain.
    let versions = list_chain_versions(&mut store, "harbor:2025-01-13").expect("versions");
    assert_eq!(versions.versions.len(), 1);
    let history = chain_history(&mut store, "harbor:2025-01-13").expect("history");
    assert_eq!(history.events.len(), 1);
}

// ============================================================================
// Archive
// ============================================================================

#[test]
fn test_archive_deactivates_roster() {
    let mut store = test_store();
    let draft = reconciled_draft(&mut store);
    publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect("publish");

    let response = archive_roster(
        &mut store,
        ArchiveRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("archive");

    assert_eq!(response.roster.status, RosterStatus::Archived);
    assert!(!response.roster.is_active);
}

#[test]
fn test_archive_twice_is_invalid_state() {
    let mut store = test_store();
    let draft = reconciled_draft(&mut store);
    publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &RecordingSink::new(),
        &test_actor(),
        NOW,
    )
    .expect("publish");
    archive_roster(
        &mut store,
        ArchiveRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("first archive");

    let err = archive_roster(
        &mut store,
        ArchiveRosterRequest {
            roster_id: draft.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect_err("second archive must be rejected");

    assert!(matches!(err, ApiError::InvalidState { .. }));
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_pristine_draft_frees_week_but_not_version() {
    let mut store = test_store();
    let created = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 06)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");

    delete_roster(
        &mut store,
        DeleteRosterRequest {
            roster_id: created.roster.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
    )
    .expect("delete");

    let err = get_roster(&mut store, created.roster.roster_id).expect_err("gone");
    assert!(matches!(err, ApiError::NotFound { .. }));

    // The week is free again, but the deleted version number stays burned.
    let recreated = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 06)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("recreate");
    assert_eq!(recreated.roster.version_number, 2);
}

#[test]
fn test_delete_edited_draft_is_invalid_state() {
    let mut store = test_store();
    let created = create_roster(
        &mut store,
        &test_config(),
        create_request("harbor", date!(2025 - 01 - 06)),
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("create");
    update_roster(
        &mut store,
        UpdateRosterRequest {
            roster_id: created.roster.roster_id,
            name: Some(String::from("edited")),
            description: None,
            clear_description: false,
        },
        &AllowAllGate,
        &test_actor(),
        NOW,
    )
    .expect("update");

    let err = delete_roster(
        &mut store,
        DeleteRosterRequest {
            roster_id: created.roster.roster_id,
        },
        &AllowAllGate,
        &test_actor(),
    )
    .expect_err("edited drafts keep their paper trail");

    assert!(matches!(err, ApiError::InvalidState { .. }));
}
