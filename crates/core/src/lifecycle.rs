// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure lifecycle transitions for rosters.
//!
//! Each function validates the requested operation against the transition
//! table, then returns the updated state together with exactly one history
//! event. Nothing here touches storage; the persistence layer applies the
//! returned outcome in a single transaction.

use rostra_domain::{
    ChainId, DomainError, PersonId, Roster, RosterShift, RosterStatus, Transition, UnmatchedEntry,
    VenueId, WeekConfig, week_delta_days, week_start_of,
};
use rostra_ledger::{Actor, EventPayload, HistoryEvent};
use time::{Date, Duration};

use crate::error::CoreError;

/// The week length every roster covers.
const WEEK_DAYS: i64 = 7;

/// A lifecycle transition applied to an existing roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleOutcome {
    /// The roster after the transition.
    pub roster: Roster,
    /// The single event recording the transition.
    pub event: HistoryEvent,
}

/// A plan for a new draft roster, ready for atomic persistence.
///
/// All record identities are zero; the persistence layer assigns them and
/// stamps the generated roster id into the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPlan {
    /// The new draft.
    pub roster: Roster,
    /// Shifts the draft starts with.
    pub shifts: Vec<RosterShift>,
    /// Unmatched entries the draft starts with.
    pub unmatched: Vec<UnmatchedEntry>,
    /// The creation event.
    pub event: HistoryEvent,
}

/// The result of manually resolving an unmatched entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The roster with its revision advanced.
    pub roster: Roster,
    /// The shift materialized from the entry's context.
    pub shift: RosterShift,
    /// The entry, now marked resolved. Never deleted.
    pub entry: UnmatchedEntry,
    /// The resolution event.
    pub event: HistoryEvent,
}

/// Field changes for an in-place draft edit. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterChanges {
    /// New roster name, if changing.
    pub name: Option<String>,
    /// New description, if changing. `Some(None)` clears it.
    pub description: Option<Option<String>>,
}

/// Inputs for planning a fresh draft that is not copied from anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDraftParams {
    /// The venue to schedule.
    pub venue_id: VenueId,
    /// Human-readable roster name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Any date inside the week to cover.
    pub week_date: Date,
    /// Week alignment.
    pub week_config: WeekConfig,
    /// Provenance reference when the draft comes from an extraction.
    pub source_file: Option<String>,
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from("name must not be empty")).into());
    }
    Ok(())
}

/// The creation payload for a draft: `Created` opens a chain,
/// `VersionCreated` extends one.
pub(crate) fn creation_payload(
    next_version: i32,
    shift_count: usize,
    unmatched_count: usize,
    copied_from: Option<i64>,
) -> EventPayload {
    if next_version == 1 {
        EventPayload::Created {
            shift_count,
            unmatched_count,
        }
    } else {
        EventPayload::VersionCreated {
            shift_count,
            unmatched_count,
            copied_from,
        }
    }
}

/// Plans a fresh draft roster with no shifts.
///
/// The chain identifier is derived from the venue and week, so re-creating
/// the same venue-week always lands in the same chain. The caller supplies
/// the next version number from the chain's high-water mark.
///
/// # Errors
///
/// Returns [`DomainError::InvalidName`] wrapped in [`CoreError`] when the
/// name is blank.
pub fn plan_new_draft(
    params: NewDraftParams,
    next_version: i32,
    actor: &Actor,
    now: &str,
) -> Result<DraftPlan, CoreError> {
    validate_name(&params.name)?;

    let week_start: Date = week_start_of(params.week_date, params.week_config);
    let chain_id: ChainId = ChainId::derive(&params.venue_id, week_start, params.week_config);

    let roster = Roster {
        roster_id: 0,
        venue_id: params.venue_id,
        name: params.name,
        description: params.description,
        week_start,
        start_date: week_start,
        end_date: week_start.saturating_add(Duration::days(WEEK_DAYS - 1)),
        status: RosterStatus::Draft,
        chain_id: chain_id.clone(),
        version_number: next_version,
        revision: 1,
        is_active: false,
        created_by: actor.id.clone(),
        created_at: now.to_string(),
        published_at: None,
        published_by: None,
        source_file: params.source_file,
    };

    let event = HistoryEvent::new(
        0,
        chain_id.value().to_string(),
        next_version,
        creation_payload(next_version, 0, 0, None),
        actor.clone(),
        None,
        RosterStatus::Draft,
        now.to_string(),
    );

    Ok(DraftPlan {
        roster,
        shifts: Vec::new(),
        unmatched: Vec::new(),
        event,
    })
}

/// Edits a draft roster in place, advancing its revision.
///
/// # Errors
///
/// Returns a [`CoreError`] when the roster is not a draft or the new name
/// is blank.
pub fn update(
    roster: &Roster,
    changes: RosterChanges,
    actor: &Actor,
    now: &str,
) -> Result<LifecycleOutcome, CoreError> {
    roster.status.validate_transition(Transition::Update)?;

    let mut updated: Roster = roster.clone();
    let mut fields: Vec<String> = Vec::new();

    if let Some(name) = changes.name {
        validate_name(&name)?;
        if name != updated.name {
            updated.name = name;
            fields.push(String::from("name"));
        }
    }
    if let Some(description) = changes.description
        && description != updated.description
    {
        updated.description = description;
        fields.push(String::from("description"));
    }

    updated.revision += 1;

    let event = HistoryEvent::new(
        roster.roster_id,
        roster.chain_id.value().to_string(),
        roster.version_number,
        EventPayload::Updated {
            fields,
            revision: updated.revision,
        },
        actor.clone(),
        Some(roster.status),
        updated.status,
        now.to_string(),
    );

    Ok(LifecycleOutcome {
        roster: updated,
        event,
    })
}

/// Publishes a draft roster and marks it for activation within its chain.
///
/// Publishing stamps the publish fields, advances the revision, and is
/// gated on at least one assigned shift. The caller supplies
/// the assigned shift count and the number of staff members that will be
/// notified; the persistence layer deactivates any previously active
/// version in the same transaction that applies this outcome.
///
/// # Errors
///
/// Returns a [`CoreError`] when the roster is not a draft or has no
/// assigned shifts.
pub fn publish(
    roster: &Roster,
    assigned_shift_count: usize,
    notified_users: usize,
    actor: &Actor,
    now: &str,
) -> Result<LifecycleOutcome, CoreError> {
    roster.status.validate_transition(Transition::Publish)?;
    if assigned_shift_count == 0 {
        return Err(DomainError::NoAssignedShifts {
            roster_id: roster.roster_id,
        }
        .into());
    }

    let mut published: Roster = roster.clone();
    published.status = RosterStatus::Published;
    published.is_active = true;
    published.revision += 1;
    published.published_at = Some(now.to_string());
    published.published_by = Some(actor.id.clone());

    let event = HistoryEvent::new(
        roster.roster_id,
        roster.chain_id.value().to_string(),
        roster.version_number,
        EventPayload::Published {
            shift_count: assigned_shift_count,
            notified_users,
        },
        actor.clone(),
        Some(roster.status),
        RosterStatus::Published,
        now.to_string(),
    );

    Ok(LifecycleOutcome {
        roster: published,
        event,
    })
}

/// Archives a published roster, advancing its revision. Archived rosters
/// are terminal and never active.
///
/// # Errors
///
/// Returns a [`CoreError`] when the roster is not published.
pub fn archive(roster: &Roster, actor: &Actor, now: &str) -> Result<LifecycleOutcome, CoreError> {
    roster.status.validate_transition(Transition::Archive)?;

    let mut archived: Roster = roster.clone();
    archived.status = RosterStatus::Archived;
    archived.is_active = false;
    archived.revision += 1;

    let event = HistoryEvent::new(
        roster.roster_id,
        roster.chain_id.value().to_string(),
        roster.version_number,
        EventPayload::Archived {},
        actor.clone(),
        Some(roster.status),
        RosterStatus::Archived,
        now.to_string(),
    );

    Ok(LifecycleOutcome {
        roster: archived,
        event,
    })
}

/// Checks that a roster may be hard-deleted.
///
/// Only drafts can be deleted, and only while their recorded history is
/// limited to the creation event. A draft that has been edited, resolved,
/// or otherwise touched keeps its paper trail.
///
/// # Errors
///
/// Returns a [`CoreError`] when the roster is not a draft or has history
/// beyond creation.
pub fn ensure_deletable(
    roster: &Roster,
    has_history_beyond_creation: bool,
) -> Result<(), CoreError> {
    roster.status.validate_transition(Transition::Delete)?;
    if has_history_beyond_creation {
        return Err(DomainError::HistoryProtected {
            roster_id: roster.roster_id,
        }
        .into());
    }
    Ok(())
}

/// Copies a shift into a new draft, clearing identity and conflict state.
fn copy_shift(shift: &RosterShift) -> RosterShift {
    RosterShift {
        shift_id: 0,
        roster_id: 0,
        has_conflict: false,
        conflict_kind: None,
        ..shift.clone()
    }
}

/// Plans the next version of a published roster within the same chain.
///
/// The copy starts as a draft with the source's shifts (conflict flags
/// cleared, identities reset) and its unresolved unmatched entries. The
/// source roster is left untouched; the new version only takes effect if
/// it is later published.
///
/// # Errors
///
/// Returns a [`CoreError`] when the source roster is not published.
pub fn plan_same_week_copy(
    source: &Roster,
    next_version: i32,
    shifts: &[RosterShift],
    unmatched: &[UnmatchedEntry],
    actor: &Actor,
    now: &str,
) -> Result<DraftPlan, CoreError> {
    source.status.validate_transition(Transition::CopySameWeek)?;

    let copied_shifts: Vec<RosterShift> = shifts.iter().map(copy_shift).collect();
    let copied_unmatched: Vec<UnmatchedEntry> = unmatched
        .iter()
        .filter(|entry| !entry.resolved)
        .map(|entry| UnmatchedEntry {
            entry_id: 0,
            roster_id: 0,
            ..entry.clone()
        })
        .collect();

    let roster = Roster {
        roster_id: 0,
        venue_id: source.venue_id.clone(),
        name: source.name.clone(),
        description: source.description.clone(),
        week_start: source.week_start,
        start_date: source.start_date,
        end_date: source.end_date,
        status: RosterStatus::Draft,
        chain_id: source.chain_id.clone(),
        version_number: next_version,
        revision: 1,
        is_active: false,
        created_by: actor.id.clone(),
        created_at: now.to_string(),
        published_at: None,
        published_by: None,
        source_file: source.source_file.clone(),
    };

    let event = HistoryEvent::new(
        0,
        source.chain_id.value().to_string(),
        next_version,
        EventPayload::VersionCreated {
            shift_count: copied_shifts.len(),
            unmatched_count: copied_unmatched.len(),
            copied_from: Some(source.roster_id),
        },
        actor.clone(),
        None,
        RosterStatus::Draft,
        now.to_string(),
    );

    Ok(DraftPlan {
        roster,
        shifts: copied_shifts,
        unmatched: copied_unmatched,
        event,
    })
}

/// Plans a copy of a roster into a different week.
///
/// The copy lands in the chain derived for the target week, as the version
/// supplied by the caller from that chain's high-water mark. Shift dates
/// move by the whole-week delta; times, breaks and assignments carry over
/// with conflict flags cleared. Any lifecycle status may be copied this
/// way, archived rosters included.
///
/// # Errors
///
/// Returns a [`CoreError`] when the transition table denies the copy.
pub fn plan_week_copy(
    source: &Roster,
    target_week_date: Date,
    week_config: WeekConfig,
    next_version: i32,
    shifts: &[RosterShift],
    actor: &Actor,
    now: &str,
) -> Result<DraftPlan, CoreError> {
    source
        .status
        .validate_transition(Transition::CopyDifferentWeek)?;

    let target_week_start: Date = week_start_of(target_week_date, week_config);
    let delta: Duration = Duration::days(week_delta_days(source.week_start, target_week_start));
    let chain_id: ChainId = ChainId::derive(&source.venue_id, target_week_start, week_config);

    let copied_shifts: Vec<RosterShift> = shifts
        .iter()
        .map(|shift| {
            let mut copied: RosterShift = copy_shift(shift);
            copied.date = shift.date.saturating_add(delta);
            copied
        })
        .collect();

    let roster = Roster {
        roster_id: 0,
        venue_id: source.venue_id.clone(),
        name: source.name.clone(),
        description: source.description.clone(),
        week_start: target_week_start,
        start_date: target_week_start,
        end_date: target_week_start.saturating_add(Duration::days(WEEK_DAYS - 1)),
        status: RosterStatus::Draft,
        chain_id: chain_id.clone(),
        version_number: next_version,
        revision: 1,
        is_active: false,
        created_by: actor.id.clone(),
        created_at: now.to_string(),
        published_at: None,
        published_by: None,
        source_file: None,
    };

    let event = HistoryEvent::new(
        0,
        chain_id.value().to_string(),
        next_version,
        creation_payload(
            next_version,
            copied_shifts.len(),
            0,
            Some(source.roster_id),
        ),
        actor.clone(),
        None,
        RosterStatus::Draft,
        now.to_string(),
    );

    Ok(DraftPlan {
        roster,
        shifts: copied_shifts,
        unmatched: Vec::new(),
        event,
    })
}

/// Manually assigns a staff member to an unmatched entry.
///
/// The entry's stored shift context is materialized into a committed shift,
/// the entry is marked resolved (it is kept as an audit record, never
/// deleted), and the roster's revision advances.
///
/// # Errors
///
/// Returns a [`CoreError`] when the roster is not a draft or the entry has
/// already been resolved.
pub fn resolve_entry(
    roster: &Roster,
    entry: &UnmatchedEntry,
    user_id: PersonId,
    actor: &Actor,
    now: &str,
) -> Result<ResolutionOutcome, CoreError> {
    roster
        .status
        .validate_transition(Transition::ResolveUnmatched)?;
    if entry.resolved {
        return Err(DomainError::EntryAlreadyResolved {
            entry_id: entry.entry_id,
        }
        .into());
    }

    let shift = RosterShift {
        shift_id: 0,
        roster_id: entry.roster_id,
        user_id: Some(user_id.clone()),
        date: entry.date,
        start_time: entry.start_time,
        end_time: entry.end_time,
        break_minutes: entry.break_minutes,
        position: entry.position.clone(),
        notes: None,
        original_name: Some(entry.original_name.clone()),
        has_conflict: false,
        conflict_kind: None,
    };

    let mut resolved_entry: UnmatchedEntry = entry.clone();
    resolved_entry.resolved = true;
    resolved_entry.resolved_user_id = Some(user_id.clone());

    let mut updated: Roster = roster.clone();
    updated.revision += 1;

    let event = HistoryEvent::new(
        roster.roster_id,
        roster.chain_id.value().to_string(),
        roster.version_number,
        EventPayload::UnmatchedResolved {
            entry_id: entry.entry_id,
            user_id: user_id.value().to_string(),
        },
        actor.clone(),
        Some(roster.status),
        roster.status,
        now.to_string(),
    );

    Ok(ResolutionOutcome {
        roster: updated,
        shift,
        entry: resolved_entry,
        event,
    })
}
