// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutating handler follows the same shape: consult the permission
//! gate first (a denial touches no state), load current state, run the
//! pure core transition, apply the outcome through the store in one
//! transaction, and return a read view. Timestamps are supplied by the
//! caller so handlers stay deterministic.

use rostra_core::{
    DEFAULT_BATCH_CAP, ReconcilePlan, RosterChanges, archive, ensure_deletable, plan_new_draft,
    plan_reconciliation, plan_same_week_copy, plan_week_copy, publish, resolve_entry, update,
};
use rostra_domain::{
    ChainId, DomainError, MatchConfig, Person, PersonId, Roster, VenueId, WeekConfig,
    week_start_of,
};
use rostra_ledger::Actor;
use rostra_persistence::{CreateDraftResult, Store};
use time::Date;
use tracing::{debug, info};

use crate::collaborators::{
    NotificationKind, NotificationSink, PermissionGate, RosterAction, VenueDirectory,
};
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
use crate::request_response::{
    ArchiveRosterRequest, ArchiveRosterResponse, ChainHistoryResponse, CopyDifferentWeekRequest,
    CopyRosterResponse, CopySameWeekRequest, CreateRosterRequest, CreateRosterResponse,
    DeleteRosterRequest, DeleteRosterResponse, GetRosterResponse, ListChainVersionsResponse,
    ListShiftsResponse, ListUnmatchedResponse, PublishRosterRequest, PublishRosterResponse,
    ReconcileExtractionRequest, ReconcileExtractionResponse, ResolveUnmatchedRequest,
    ResolveUnmatchedResponse, RosterInfo, ShiftInfo, UnmatchedEntryInfo, UpdateRosterRequest,
    UpdateRosterResponse,
};

/// Tunable parameters shared by all handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    /// Week alignment for chain derivation.
    pub week_config: WeekConfig,
    /// Matching thresholds.
    pub match_config: MatchConfig,
    /// Upper bound on reconciliation batch size.
    pub batch_cap: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            week_config: WeekConfig::default(),
            match_config: MatchConfig::default(),
            batch_cap: DEFAULT_BATCH_CAP,
        }
    }
}

/// Checks the permission gate, translating a denial into an API error.
fn authorize(
    gate: &dyn PermissionGate,
    actor: &Actor,
    action: RosterAction,
) -> Result<(), ApiError> {
    if gate.can_perform(actor, action) {
        return Ok(());
    }
    Err(ApiError::Permission {
        action: action.as_str().to_string(),
    })
}

/// Builds the read view of a roster, deriving its parent from the chain.
fn roster_info(store: &mut Store, roster: &Roster) -> Result<RosterInfo, ApiError> {
    let parent: Option<i64> = store.parent_roster_id(roster).map_err(translate_store_error)?;
    Ok(RosterInfo::from_roster(roster, parent))
}

/// Rejects a draft creation when a non-archived roster already occupies
/// the target venue-week.
fn ensure_week_free(store: &mut Store, chain_id: &ChainId, week_start: Date) -> Result<(), ApiError> {
    if let Some(occupant) = store
        .find_week_occupant(chain_id.value())
        .map_err(translate_store_error)?
    {
        return Err(translate_domain_error(DomainError::WeekOccupied {
            conflicting_roster_id: occupant.roster_id,
            week_start: week_start.to_string(),
        }));
    }
    Ok(())
}

/// Creates a fresh draft roster with no shifts.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the name is blank, a
/// non-archived roster already occupies the venue-week, or the write
/// fails.
pub fn create_roster(
    store: &mut Store,
    config: &ApiConfig,
    request: CreateRosterRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<CreateRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::Create)?;

    let venue_id = VenueId::new(&request.venue_id);
    let week_start: Date = week_start_of(request.week_date, config.week_config);
    let chain_id: ChainId = ChainId::derive(&venue_id, week_start, config.week_config);
    ensure_week_free(store, &chain_id, week_start)?;

    let next_version: i32 = store
        .next_version_number(chain_id.value())
        .map_err(translate_store_error)?;
    let plan = plan_new_draft(
        rostra_core::NewDraftParams {
            venue_id,
            name: request.name,
            description: request.description,
            week_date: request.week_date,
            week_config: config.week_config,
            source_file: None,
        },
        next_version,
        actor,
        now,
    )
    .map_err(translate_core_error)?;

    let result: CreateDraftResult = store.create_draft(&plan).map_err(translate_store_error)?;
    let roster: Roster = store
        .get_roster(result.roster_id)
        .map_err(translate_store_error)?;
    info!(
        "Created draft roster {} (chain {}, version {})",
        roster.roster_id, roster.chain_id, roster.version_number
    );

    Ok(CreateRosterResponse {
        roster: roster_info(store, &roster)?,
    })
}

/// Edits a draft roster in place.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the roster does not
/// exist or is not a draft, or the write fails.
pub fn update_roster(
    store: &mut Store,
    request: UpdateRosterRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<UpdateRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::Update)?;

    let roster: Roster = store
        .get_roster(request.roster_id)
        .map_err(translate_store_error)?;

    let description: Option<Option<String>> = match (request.description, request.clear_description)
    {
        (Some(text), _) => Some(Some(text)),
        (None, true) => Some(None),
        (None, false) => None,
    };
    let changes = RosterChanges {
        name: request.name,
        description,
    };

    let outcome = update(&roster, changes, actor, now).map_err(translate_core_error)?;
    store
        .apply_lifecycle(&outcome)
        .map_err(translate_store_error)?;
    debug!("Updated roster {} to revision {}", roster.roster_id, outcome.roster.revision);

    Ok(UpdateRosterResponse {
        roster: roster_info(store, &outcome.roster)?,
    })
}

/// Publishes a draft roster, activating it within its chain.
///
/// Exactly one notification per distinct assigned staff member is sent
/// after the write commits: `RosterPublished` for a chain's first version,
/// `RosterUpdated` for later versions.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the roster does not
/// exist, is not a draft, has no assigned shifts, or the write fails.
pub fn publish_roster(
    store: &mut Store,
    request: PublishRosterRequest,
    gate: &dyn PermissionGate,
    sink: &dyn NotificationSink,
    actor: &Actor,
    now: &str,
) -> Result<PublishRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::Publish)?;

    let roster: Roster = store
        .get_roster(request.roster_id)
        .map_err(translate_store_error)?;
    let assigned: usize = usize::try_from(
        store
            .count_assigned_shifts(roster.roster_id)
            .map_err(translate_store_error)?,
    )
    .unwrap_or_default();
    let assigned_users: Vec<PersonId> = store
        .distinct_assigned_users(roster.roster_id)
        .map_err(translate_store_error)?;

    let outcome = publish(&roster, assigned, assigned_users.len(), actor, now)
        .map_err(translate_core_error)?;
    store
        .apply_publish(&outcome)
        .map_err(translate_store_error)?;

    let kind: NotificationKind = if outcome.roster.version_number == 1 {
        NotificationKind::RosterPublished
    } else {
        NotificationKind::RosterUpdated
    };
    for user_id in &assigned_users {
        sink.notify(user_id, kind, roster.roster_id);
    }
    info!(
        "Published roster {} (chain {}, version {}), notified {} staff",
        roster.roster_id,
        roster.chain_id,
        roster.version_number,
        assigned_users.len()
    );

    Ok(PublishRosterResponse {
        roster: roster_info(store, &outcome.roster)?,
        notified_users: assigned_users.len(),
    })
}

/// Archives a published roster.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the roster does not
/// exist or is not published, or the write fails. A second archive of the
/// same roster is rejected as an invalid state.
pub fn archive_roster(
    store: &mut Store,
    request: ArchiveRosterRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<ArchiveRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::Archive)?;

    let roster: Roster = store
        .get_roster(request.roster_id)
        .map_err(translate_store_error)?;
    let outcome = archive(&roster, actor, now).map_err(translate_core_error)?;
    store
        .apply_lifecycle(&outcome)
        .map_err(translate_store_error)?;
    info!("Archived roster {}", roster.roster_id);

    Ok(ArchiveRosterResponse {
        roster: roster_info(store, &outcome.roster)?,
    })
}

/// Hard-deletes a pristine draft roster.
///
/// Owned shifts and unmatched entries are deleted with it; history events
/// are kept, so the deleted version number is never reused.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the roster does not
/// exist, is not a draft, has history beyond its creation event, or the
/// write fails.
pub fn delete_roster(
    store: &mut Store,
    request: DeleteRosterRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
) -> Result<DeleteRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::Delete)?;

    let roster: Roster = store
        .get_roster(request.roster_id)
        .map_err(translate_store_error)?;
    let has_history: bool = store
        .history_beyond_creation(roster.roster_id)
        .map_err(translate_store_error)?;
    ensure_deletable(&roster, has_history).map_err(translate_core_error)?;

    store
        .delete_draft(roster.roster_id)
        .map_err(translate_store_error)?;
    info!("Deleted draft roster {}", roster.roster_id);

    Ok(DeleteRosterResponse {
        roster_id: roster.roster_id,
    })
}

/// Creates the next version of a published roster within the same chain.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the source does not
/// exist or is not published, or the write fails.
pub fn copy_same_week(
    store: &mut Store,
    request: CopySameWeekRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<CopyRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::CopySameWeek)?;

    let source: Roster = store
        .get_roster(request.source_roster_id)
        .map_err(translate_store_error)?;
    let shifts = store
        .list_shifts(source.roster_id)
        .map_err(translate_store_error)?;
    let unmatched = store
        .list_unmatched(source.roster_id)
        .map_err(translate_store_error)?;
    let next_version: i32 = store
        .next_version_number(source.chain_id.value())
        .map_err(translate_store_error)?;

    let plan = plan_same_week_copy(&source, next_version, &shifts, &unmatched, actor, now)
        .map_err(translate_core_error)?;
    let result: CreateDraftResult = store.create_draft(&plan).map_err(translate_store_error)?;
    let roster: Roster = store
        .get_roster(result.roster_id)
        .map_err(translate_store_error)?;
    info!(
        "Copied roster {} into same-week version {} ({})",
        source.roster_id, roster.version_number, roster.roster_id
    );

    Ok(CopyRosterResponse {
        roster: roster_info(store, &roster)?,
    })
}

/// Copies a roster into a different week, starting a new chain version
/// there.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the source does not
/// exist, a non-archived roster already occupies the target venue-week,
/// or the write fails.
pub fn copy_different_week(
    store: &mut Store,
    config: &ApiConfig,
    request: CopyDifferentWeekRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<CopyRosterResponse, ApiError> {
    authorize(gate, actor, RosterAction::CopyDifferentWeek)?;

    let source: Roster = store
        .get_roster(request.source_roster_id)
        .map_err(translate_store_error)?;
    let target_week_start: Date = week_start_of(request.target_week_date, config.week_config);
    let target_chain: ChainId =
        ChainId::derive(&source.venue_id, target_week_start, config.week_config);
    ensure_week_free(store, &target_chain, target_week_start)?;

    let shifts = store
        .list_shifts(source.roster_id)
        .map_err(translate_store_error)?;
    let next_version: i32 = store
        .next_version_number(target_chain.value())
        .map_err(translate_store_error)?;

    let plan = plan_week_copy(
        &source,
        request.target_week_date,
        config.week_config,
        next_version,
        &shifts,
        actor,
        now,
    )
    .map_err(translate_core_error)?;
    let result: CreateDraftResult = store.create_draft(&plan).map_err(translate_store_error)?;
    let roster: Roster = store
        .get_roster(result.roster_id)
        .map_err(translate_store_error)?;
    info!(
        "Copied roster {} into week {} as roster {}",
        source.roster_id, target_week_start, roster.roster_id
    );

    Ok(CopyRosterResponse {
        roster: roster_info(store, &roster)?,
    })
}

/// Reconciles an extraction batch into a new draft roster.
///
/// Matching candidates come from the venue directory paired with prior
/// shift counts at the venue. The whole batch lands atomically: the draft,
/// its committed shifts, its unmatched entries and exactly one creation
/// event, or nothing. Re-extracting a week that already has rosters is
/// allowed and lands as the chain's next draft version, so a corrected
/// document never requires archiving the version in effect.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the batch exceeds the
/// cap, the name is blank, or the write fails.
pub fn reconcile_extraction(
    store: &mut Store,
    config: &ApiConfig,
    request: ReconcileExtractionRequest,
    gate: &dyn PermissionGate,
    directory: &dyn VenueDirectory,
    actor: &Actor,
    now: &str,
) -> Result<ReconcileExtractionResponse, ApiError> {
    authorize(gate, actor, RosterAction::Reconcile)?;

    let venue_id = VenueId::new(&request.venue_id);
    let week_start: Date = week_start_of(request.week_date, config.week_config);
    let chain_id: ChainId = ChainId::derive(&venue_id, week_start, config.week_config);

    let personnel: Vec<Person> = directory.active_personnel(&venue_id);
    let candidates = store
        .matching_candidates(&venue_id, &personnel)
        .map_err(translate_store_error)?;
    let next_version: i32 = store
        .next_version_number(chain_id.value())
        .map_err(translate_store_error)?;

    let plan: ReconcilePlan = plan_reconciliation(
        rostra_core::NewDraftParams {
            venue_id,
            name: request.name,
            description: request.description,
            week_date: request.week_date,
            week_config: config.week_config,
            source_file: request.source_file,
        },
        &request.shifts,
        &candidates,
        &config.match_config,
        next_version,
        config.batch_cap,
        actor,
        now,
    )
    .map_err(translate_core_error)?;

    let result: CreateDraftResult = store
        .create_draft(&plan.draft)
        .map_err(translate_store_error)?;
    let roster: Roster = store
        .get_roster(result.roster_id)
        .map_err(translate_store_error)?;
    info!(
        "Reconciled {} raw shifts into roster {}: {} matched, {} unmatched",
        request.shifts.len(),
        roster.roster_id,
        plan.auto_matched,
        plan.unmatched
    );

    Ok(ReconcileExtractionResponse {
        roster: roster_info(store, &roster)?,
        auto_matched: plan.auto_matched,
        unmatched: plan.unmatched,
    })
}

/// Manually assigns a staff member to an unmatched entry.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, the entry or roster
/// does not exist, the roster is not a draft, the entry is already
/// resolved, or the write fails.
pub fn resolve_unmatched(
    store: &mut Store,
    request: ResolveUnmatchedRequest,
    gate: &dyn PermissionGate,
    actor: &Actor,
    now: &str,
) -> Result<ResolveUnmatchedResponse, ApiError> {
    authorize(gate, actor, RosterAction::ResolveUnmatched)?;

    let entry = store
        .get_unmatched(request.entry_id)
        .map_err(translate_store_error)?;
    let roster: Roster = store
        .get_roster(entry.roster_id)
        .map_err(translate_store_error)?;

    let outcome = resolve_entry(&roster, &entry, PersonId::new(&request.user_id), actor, now)
        .map_err(translate_core_error)?;
    let result = store
        .apply_resolution(&outcome)
        .map_err(translate_store_error)?;

    let mut shift = outcome.shift;
    shift.shift_id = result.shift_id;
    info!(
        "Resolved unmatched entry {} on roster {} to staff {}",
        entry.entry_id, roster.roster_id, request.user_id
    );

    Ok(ResolveUnmatchedResponse {
        roster: roster_info(store, &outcome.roster)?,
        entry: UnmatchedEntryInfo::from_entry(&outcome.entry),
        shift: ShiftInfo::from_shift(&shift),
    })
}

/// Retrieves one roster with its shifts and unmatched entries.
///
/// # Errors
///
/// Returns an error if the roster does not exist or the query fails.
pub fn get_roster(store: &mut Store, roster_id: i64) -> Result<GetRosterResponse, ApiError> {
    let roster: Roster = store.get_roster(roster_id).map_err(translate_store_error)?;
    let shifts = store.list_shifts(roster_id).map_err(translate_store_error)?;
    let entries = store
        .list_unmatched(roster_id)
        .map_err(translate_store_error)?;
    Ok(GetRosterResponse {
        roster: roster_info(store, &roster)?,
        shifts: shifts.iter().map(ShiftInfo::from_shift).collect(),
        entries: entries.iter().map(UnmatchedEntryInfo::from_entry).collect(),
    })
}

/// Lists every version in a chain, ordered by version number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_chain_versions(
    store: &mut Store,
    chain_id: &str,
) -> Result<ListChainVersionsResponse, ApiError> {
    let rosters = store
        .list_chain_versions(chain_id)
        .map_err(translate_store_error)?;
    let mut versions: Vec<RosterInfo> = Vec::with_capacity(rosters.len());
    for roster in &rosters {
        versions.push(roster_info(store, roster)?);
    }
    Ok(ListChainVersionsResponse { versions })
}

/// Returns the full ordered history of a chain.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn chain_history(store: &mut Store, chain_id: &str) -> Result<ChainHistoryResponse, ApiError> {
    let events = store.chain_history(chain_id).map_err(translate_store_error)?;
    Ok(ChainHistoryResponse { events })
}

/// Lists a roster's shifts, ordered by date and start time.
///
/// # Errors
///
/// Returns an error if the roster does not exist or the query fails.
pub fn list_shifts(store: &mut Store, roster_id: i64) -> Result<ListShiftsResponse, ApiError> {
    store.get_roster(roster_id).map_err(translate_store_error)?;
    let shifts = store.list_shifts(roster_id).map_err(translate_store_error)?;
    Ok(ListShiftsResponse {
        shifts: shifts.iter().map(ShiftInfo::from_shift).collect(),
    })
}

/// Lists a roster's unmatched entries, unresolved first.
///
/// # Errors
///
/// Returns an error if the roster does not exist or the query fails.
pub fn list_unmatched(
    store: &mut Store,
    roster_id: i64,
) -> Result<ListUnmatchedResponse, ApiError> {
    store.get_roster(roster_id).map_err(translate_store_error)?;
    let entries = store
        .list_unmatched(roster_id)
        .map_err(translate_store_error)?;
    Ok(ListUnmatchedResponse {
        entries: entries.iter().map(UnmatchedEntryInfo::from_entry).collect(),
    })
}
