// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster lifecycle status and the transition table.
//!
//! All lifecycle guards live here as explicit transition-table lookups.
//! Call sites never compare statuses ad hoc; they ask the table whether an
//! operation is permitted in the current state.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a roster.
///
/// Transitions are monotonic forward: Draft → Published → Archived.
/// Archived is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    /// Mutable working state. Every roster is created in Draft.
    Draft,
    /// In effect (or superseded by a later activation). Immutable.
    Published,
    /// Terminal. Immutable and never active.
    Archived,
}

/// An operation requested against a roster, as seen by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Edit fields of the roster in place.
    Update,
    /// Draft → Published.
    Publish,
    /// Published → Archived.
    Archive,
    /// Hard delete of the roster and everything it owns.
    Delete,
    /// Manually assign a staff member to an unmatched entry.
    ResolveUnmatched,
    /// Create the next version in the same chain.
    CopySameWeek,
    /// Create a standalone roster in a new chain at another week.
    CopyDifferentWeek,
}

impl Transition {
    /// Returns the operation name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Delete => "delete",
            Self::ResolveUnmatched => "resolve_unmatched",
            Self::CopySameWeek => "copy_same_week",
            Self::CopyDifferentWeek => "copy_different_week",
        }
    }
}

impl RosterStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// The transition table: which operations each status permits.
    #[must_use]
    pub const fn permits(&self, transition: Transition) -> bool {
        match self {
            Self::Draft => matches!(
                transition,
                Transition::Update
                    | Transition::Publish
                    | Transition::Delete
                    | Transition::ResolveUnmatched
                    | Transition::CopyDifferentWeek
            ),
            Self::Published => matches!(
                transition,
                Transition::Archive | Transition::CopySameWeek | Transition::CopyDifferentWeek
            ),
            Self::Archived => matches!(transition, Transition::CopyDifferentWeek),
        }
    }

    /// Validates that an operation is permitted in this status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OperationNotPermitted`] when the transition
    /// table denies the operation, with a message naming the status.
    pub fn validate_transition(&self, transition: Transition) -> Result<(), DomainError> {
        if self.permits(transition) {
            return Ok(());
        }
        let reason: &'static str = match (self, transition) {
            (Self::Published | Self::Archived, Transition::Update) => {
                "only draft rosters are editable"
            }
            (Self::Published, Transition::Publish) => "roster is already published",
            (Self::Archived, Transition::Publish | Transition::Archive) => {
                "archived rosters are terminal"
            }
            (Self::Draft, Transition::Archive) => "only published rosters can be archived",
            (Self::Draft, Transition::CopySameWeek) => {
                "only published rosters can start a new same-week version"
            }
            (_, Transition::Delete) => "only draft rosters can be deleted",
            (_, Transition::ResolveUnmatched) => {
                "unmatched entries can only be resolved while the roster is a draft"
            }
            _ => "operation not permitted in the current status",
        };
        Err(DomainError::OperationNotPermitted {
            status: *self,
            operation: transition.as_str(),
            reason,
        })
    }
}

impl FromStr for RosterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
