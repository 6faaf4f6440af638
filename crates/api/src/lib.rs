// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation boundary layer for the Rostra roster platform.
//!
//! Each public handler is one complete operation: permission check,
//! validation through the pure core, one atomic write through the store,
//! and a read view back to the caller. Lower-layer errors never cross this
//! boundary untranslated.
//!
//! The host application supplies the collaborators: a [`PermissionGate`]
//! consulted before any state is touched, a [`NotificationSink`] called
//! once per distinct assigned staff member on publish, and a
//! [`VenueDirectory`] providing matching candidates.

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
#![allow(clippy::multiple_crate_versions)]

mod collaborators;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use collaborators::{
    NotificationKind, NotificationSink, PermissionGate, RosterAction, VenueDirectory,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_store_error,
};
pub use handlers::{
    ApiConfig, archive_roster, chain_history, copy_different_week, copy_same_week, create_roster,
    delete_roster, get_roster, list_chain_versions, list_shifts, list_unmatched, publish_roster,
    reconcile_extraction, resolve_unmatched, update_roster,
};
pub use request_response::{
    ArchiveRosterRequest, ArchiveRosterResponse, ChainHistoryResponse, CopyDifferentWeekRequest,
    CopyRosterResponse, CopySameWeekRequest, CreateRosterRequest, CreateRosterResponse,
    DeleteRosterRequest, DeleteRosterResponse, GetRosterResponse, ListChainVersionsResponse,
    ListShiftsResponse, ListUnmatchedResponse, PublishRosterRequest, PublishRosterResponse,
    ReconcileExtractionRequest, ReconcileExtractionResponse, ResolveUnmatchedRequest,
    ResolveUnmatchedResponse, RosterInfo, ShiftInfo, UnmatchedEntryInfo, UpdateRosterRequest,
    UpdateRosterResponse,
};
