// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation of extraction batches into draft rosters.
//!
//! One extraction batch becomes one new draft: every raw shift whose staff
//! name matches at or above the commit threshold lands as a committed,
//! assigned shift; everything else lands in the unmatched queue with the
//! best suggestion (if any) attached. The whole plan is applied atomically
//! by the persistence layer, so a batch never half-lands.

use rostra_domain::{DomainError, MatchConfig, RawShift, RosterShift, UnmatchedEntry};
use rostra_ledger::{Actor, HistoryEvent};

use crate::error::CoreError;
use crate::lifecycle::{DraftPlan, NewDraftParams, creation_payload, plan_new_draft};
use crate::matching::{MatchCandidate, MatchOutcome, match_name};

/// Upper bound on the number of raw shifts accepted in one batch.
pub const DEFAULT_BATCH_CAP: usize = 500;

/// Break length recorded when the source document indicates a break
/// without stating its length.
const DEFAULT_BREAK_MINUTES: i32 = 30;

/// A reconciled extraction batch, ready for atomic persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// The new draft with its committed shifts and unmatched entries.
    pub draft: DraftPlan,
    /// Raw shifts matched at or above the commit threshold.
    pub auto_matched: usize,
    /// Raw shifts queued for manual resolution.
    pub unmatched: usize,
}

/// Reconciles an extraction batch into a draft plan.
///
/// The caller supplies the matching candidates (active personnel plus their
/// prior shift counts), the configured thresholds, and the next version
/// number from the target chain's high-water mark.
///
/// # Errors
///
/// Returns a [`CoreError`] when the batch exceeds `batch_cap` or the roster
/// name is blank.
pub fn plan_reconciliation(
    params: NewDraftParams,
    raw_shifts: &[RawShift],
    candidates: &[MatchCandidate],
    config: &MatchConfig,
    next_version: i32,
    batch_cap: usize,
    actor: &Actor,
    now: &str,
) -> Result<ReconcilePlan, CoreError> {
    if raw_shifts.len() > batch_cap {
        return Err(DomainError::BatchTooLarge {
            size: raw_shifts.len(),
            cap: batch_cap,
        }
        .into());
    }

    let mut draft: DraftPlan = plan_new_draft(params, next_version, actor, now)?;

    for raw in raw_shifts {
        let break_minutes: i32 = if raw.has_break {
            DEFAULT_BREAK_MINUTES
        } else {
            0
        };
        let outcome: MatchOutcome = match_name(&raw.staff_name, candidates, config);

        if outcome.is_committable(config) {
            draft.shifts.push(RosterShift {
                shift_id: 0,
                roster_id: 0,
                user_id: outcome.person_id,
                date: raw.date,
                start_time: raw.start_time,
                end_time: raw.end_time,
                break_minutes,
                position: raw.role.clone(),
                notes: None,
                original_name: Some(raw.staff_name.clone()),
                has_conflict: false,
                conflict_kind: None,
            });
        } else {
            draft.unmatched.push(UnmatchedEntry {
                entry_id: 0,
                roster_id: 0,
                original_name: raw.staff_name.clone(),
                date: raw.date,
                start_time: raw.start_time,
                end_time: raw.end_time,
                break_minutes,
                position: raw.role.clone(),
                suggested_user_id: outcome.person_id,
                confidence: outcome.confidence,
                resolved: false,
                resolved_user_id: None,
            });
        }
    }

    let auto_matched: usize = draft.shifts.len();
    let unmatched: usize = draft.unmatched.len();

    // Rebuild the creation event so its counts reflect the batch.
    draft.event = HistoryEvent::new(
        0,
        draft.event.chain_id.clone(),
        next_version,
        creation_payload(next_version, auto_matched, unmatched, None),
        actor.clone(),
        None,
        draft.roster.status,
        now.to_string(),
    );

    Ok(ReconcilePlan {
        draft,
        auto_matched,
        unmatched,
    })
}
