// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and lifecycle rules for the Rostra roster platform.
//!
//! This crate holds the value types shared by every layer: roster and shift
//! records, venue and person identifiers, the roster lifecycle state machine,
//! chain identity derivation, and the matching threshold configuration.
//! It performs no I/O and has no knowledge of storage or transport.

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

mod chain;
mod error;
mod matching;
mod status;
mod types;

pub use chain::{ChainId, WeekConfig, week_delta_days, week_start_of};
pub use error::DomainError;
pub use matching::MatchConfig;
pub use status::{RosterStatus, Transition};
pub use types::{Person, PersonId, RawShift, Roster, RosterShift, UnmatchedEntry, VenueId};
