// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History ledger types for the Rostra roster platform.
//!
//! Every successful state change to a roster produces exactly one
//! [`HistoryEvent`]. Events are immutable once created and append-only once
//! persisted: nothing in the system updates or deletes them. Ordering by
//! (chain, version, event id) reconstructs the full history of a chain.
//!
//! Event payloads are a closed set of strongly-typed variants selected by
//! the action tag, so every event kind has a known, checkable shape.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use rostra_domain::RosterStatus;
use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be a user, a system process, or an automated trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system", "extraction").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The action tag of a history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// First version of a chain was created.
    Created,
    /// A subsequent version of an existing chain was created.
    VersionCreated,
    /// A draft roster was edited in place.
    Updated,
    /// A roster was published and activated within its chain.
    Published,
    /// A roster was archived.
    Archived,
    /// A human resolved an unmatched extraction entry.
    UnmatchedResolved,
}

impl HistoryAction {
    /// Returns the string representation of the action tag.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::VersionCreated => "version_created",
            Self::Updated => "updated",
            Self::Published => "published",
            Self::Archived => "archived",
            Self::UnmatchedResolved => "unmatched_resolved",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The structured payload of a history event.
///
/// Each variant corresponds to exactly one [`HistoryAction`]; the mapping
/// is enforced by [`EventPayload::action`], which is the only way an event
/// acquires its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    /// First version of a chain.
    Created {
        /// Number of committed shifts in the new draft.
        shift_count: usize,
        /// Number of unmatched entries in the new draft.
        unmatched_count: usize,
    },
    /// Subsequent version of an existing chain.
    VersionCreated {
        /// Number of committed shifts in the new draft.
        shift_count: usize,
        /// Number of unmatched entries in the new draft.
        unmatched_count: usize,
        /// The roster this version was copied from, when applicable.
        copied_from: Option<i64>,
    },
    /// In-place edit of a draft.
    Updated {
        /// The fields that changed.
        fields: Vec<String>,
        /// The revision after the edit.
        revision: i32,
    },
    /// Publish and activation.
    Published {
        /// Number of assigned shifts at publish time.
        shift_count: usize,
        /// Number of distinct staff members notified.
        notified_users: usize,
    },
    /// Archive.
    Archived {},
    /// Manual resolution of an unmatched entry.
    UnmatchedResolved {
        /// The resolved entry.
        entry_id: i64,
        /// The staff member the human assigned.
        user_id: String,
    },
}

impl EventPayload {
    /// Returns the action tag this payload belongs to.
    #[must_use]
    pub const fn action(&self) -> HistoryAction {
        match self {
            Self::Created { .. } => HistoryAction::Created,
            Self::VersionCreated { .. } => HistoryAction::VersionCreated,
            Self::Updated { .. } => HistoryAction::Updated,
            Self::Published { .. } => HistoryAction::Published,
            Self::Archived {} => HistoryAction::Archived,
            Self::UnmatchedResolved { .. } => HistoryAction::UnmatchedResolved,
        }
    }
}

/// An immutable history event recording one state change.
///
/// Events capture who performed the action, what changed, the lifecycle
/// status before and after, and the version in effect when the event fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// The roster the event belongs to. Zero for creation events until the
    /// persistence layer stamps the generated roster id.
    pub roster_id: i64,
    /// The chain the roster belongs to.
    pub chain_id: String,
    /// The version number in effect when the event fired.
    pub version: i32,
    /// The action tag, derived from the payload.
    pub action: HistoryAction,
    /// The structured payload.
    pub payload: EventPayload,
    /// The actor who initiated the change.
    pub actor: Actor,
    /// The lifecycle status before the change. `None` for creation events.
    pub before_status: Option<RosterStatus>,
    /// The lifecycle status after the change.
    pub after_status: RosterStatus,
    /// When the event fired, ISO 8601.
    pub recorded_at: String,
}

impl HistoryEvent {
    /// Creates a new history event.
    ///
    /// The action tag is derived from the payload, so an event can never
    /// carry a payload shape that disagrees with its tag.
    #[must_use]
    pub fn new(
        roster_id: i64,
        chain_id: String,
        version: i32,
        payload: EventPayload,
        actor: Actor,
        before_status: Option<RosterStatus>,
        after_status: RosterStatus,
        recorded_at: String,
    ) -> Self {
        let action: HistoryAction = payload.action();
        Self {
            roster_id,
            chain_id,
            version,
            action,
            payload,
            actor,
            before_status,
            after_status,
            recorded_at,
        }
    }

    /// Returns true if this event records the creation of its roster.
    #[must_use]
    pub const fn is_creation(&self) -> bool {
        matches!(
            self.action,
            HistoryAction::Created | HistoryAction::VersionCreated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor() -> Actor {
        Actor::new(String::from("mgr-1"), String::from("user"))
    }

    #[test]
    fn test_action_tag_derived_from_payload() {
        let event = HistoryEvent::new(
            7,
            String::from("v-1:2025-01-06"),
            1,
            EventPayload::Created {
                shift_count: 3,
                unmatched_count: 1,
            },
            test_actor(),
            None,
            RosterStatus::Draft,
            String::from("2025-01-06T09:00:00Z"),
        );

        assert_eq!(event.action, HistoryAction::Created);
        assert!(event.is_creation());
    }

    #[test]
    fn test_published_payload_maps_to_published_action() {
        let payload = EventPayload::Published {
            shift_count: 5,
            notified_users: 4,
        };
        assert_eq!(payload.action(), HistoryAction::Published);
    }

    #[test]
    fn test_payload_serialization_is_tagged() {
        let payload = EventPayload::Updated {
            fields: vec![String::from("name")],
            revision: 2,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"kind\":\"updated\""));

        let back: EventPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_event_is_immutable_once_created() {
        let event = HistoryEvent::new(
            1,
            String::from("v-1:2025-01-06"),
            2,
            EventPayload::Archived {},
            test_actor(),
            Some(RosterStatus::Published),
            RosterStatus::Archived,
            String::from("2025-02-01T12:00:00Z"),
        );

        let cloned = event.clone();
        assert_eq!(event, cloned);
        assert_eq!(event.action, HistoryAction::Archived);
        assert!(!event.is_creation());
    }

    #[test]
    fn test_actor_equality() {
        let a = Actor::new(String::from("mgr-1"), String::from("user"));
        let b = Actor::new(String::from("mgr-1"), String::from("user"));
        let c = Actor::new(String::from("mgr-2"), String::from("user"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
