// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure transition logic for the Rostra roster platform.
//!
//! Every operation in this crate takes the current state as input and
//! returns the updated state together with exactly one history event.
//! Transitions are atomic: they either succeed completely or fail without
//! side effects. No function here performs I/O; the persistence layer
//! applies outcomes atomically.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod lifecycle;
mod matching;
mod reconcile;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use lifecycle::{
    DraftPlan, LifecycleOutcome, NewDraftParams, ResolutionOutcome, RosterChanges, archive,
    ensure_deletable, plan_new_draft, plan_same_week_copy, plan_week_copy, publish, resolve_entry,
    update,
};
pub use matching::{MatchCandidate, MatchOutcome, match_name, normalize_name};
pub use reconcile::{DEFAULT_BATCH_CAP, ReconcilePlan, plan_reconciliation};
