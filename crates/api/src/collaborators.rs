// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator traits at the API boundary.
//!
//! Permission checking, staff notification and the venue personnel
//! directory are owned by the host application; the API only depends on
//! these seams. Implementations must not panic.

use rostra_ledger::Actor;
use rostra_domain::{Person, PersonId, VenueId};

/// An action an actor may request against a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterAction {
    /// Create a fresh draft.
    Create,
    /// Edit a draft in place.
    Update,
    /// Publish a draft.
    Publish,
    /// Archive a published roster.
    Archive,
    /// Hard-delete a pristine draft.
    Delete,
    /// Create the next version within the same chain.
    CopySameWeek,
    /// Copy a roster into another week.
    CopyDifferentWeek,
    /// Reconcile an extraction batch into a draft.
    Reconcile,
    /// Manually resolve an unmatched entry.
    ResolveUnmatched,
}

impl RosterAction {
    /// Returns the action name used in permission denials.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Delete => "delete",
            Self::CopySameWeek => "copy_same_week",
            Self::CopyDifferentWeek => "copy_different_week",
            Self::Reconcile => "reconcile",
            Self::ResolveUnmatched => "resolve_unmatched",
        }
    }
}

impl std::fmt::Display for RosterAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides whether an actor may perform an action.
///
/// The gate is consulted before any other validation in every mutating
/// operation; a denial leaves all state untouched.
pub trait PermissionGate {
    /// Returns true if the actor may perform the action.
    fn can_perform(&self, actor: &Actor, action: RosterAction) -> bool;
}

/// The kind of a staff notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The first version of a chain went live.
    RosterPublished,
    /// A later version of a chain went live.
    RosterUpdated,
}

/// Delivers notifications to staff members.
///
/// Delivery mechanics are external; the API only promises to call this
/// once per distinct assigned staff member on a successful publish.
pub trait NotificationSink {
    /// Notifies one staff member about a roster.
    fn notify(&self, user_id: &PersonId, kind: NotificationKind, roster_id: i64);
}

/// Read-only source of venue personnel for matching.
pub trait VenueDirectory {
    /// Returns the active personnel of a venue.
    fn active_personnel(&self, venue_id: &VenueId) -> Vec<Person>;
}
