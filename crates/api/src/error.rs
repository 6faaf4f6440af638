// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rostra_core::CoreError;
use rostra_domain::DomainError;
use rostra_persistence::StoreError;

/// API-level errors.
///
/// These are distinct from domain/core/store errors and represent the API
/// contract: every lower-layer error is translated into exactly one of
/// these categories before it crosses the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation is not permitted in the roster's current lifecycle
    /// status.
    InvalidState {
        /// The operation that was attempted.
        operation: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The actor is not permitted to perform the action.
    Permission {
        /// The action that was denied.
        action: String,
    },
    /// The operation conflicts with existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A storage or internal error occurred.
    Storage {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState { operation, message } => {
                write!(f, "Invalid state for '{operation}': {message}")
            }
            Self::Permission { action } => {
                write!(f, "Permission denied for action '{action}'")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Storage { message } => write!(f, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::OperationNotPermitted {
            status,
            operation,
            reason,
        } => ApiError::InvalidState {
            operation: operation.to_string(),
            message: format!("Cannot {operation} a {status} roster: {reason}"),
        },
        DomainError::NoAssignedShifts { roster_id } => ApiError::Validation {
            field: String::from("shifts"),
            message: format!("Roster {roster_id} has no assigned shifts and cannot be published"),
        },
        DomainError::InvalidStatus(s) => ApiError::Validation {
            field: String::from("status"),
            message: format!("Invalid roster status: '{s}'"),
        },
        DomainError::InvalidThresholds {
            commit_threshold,
            suggestion_floor,
        } => ApiError::Validation {
            field: String::from("match_config"),
            message: format!(
                "Commit threshold {commit_threshold} must be at most 100 and above suggestion floor {suggestion_floor}"
            ),
        },
        DomainError::BatchTooLarge { size, cap } => ApiError::Validation {
            field: String::from("shifts"),
            message: format!("Extraction batch of {size} records exceeds the cap of {cap}"),
        },
        DomainError::InvalidName(msg) => ApiError::Validation {
            field: String::from("name"),
            message: msg,
        },
        DomainError::EntryAlreadyResolved { entry_id } => ApiError::Conflict {
            message: format!("Unmatched entry {entry_id} is already resolved"),
        },
        DomainError::HistoryProtected { roster_id } => ApiError::InvalidState {
            operation: String::from("delete"),
            message: format!(
                "Roster {roster_id} has recorded history beyond creation and cannot be deleted"
            ),
        },
        DomainError::WeekOccupied {
            conflicting_roster_id,
            week_start,
        } => ApiError::Conflict {
            message: format!(
                "A non-archived roster ({conflicting_roster_id}) already exists for the week of {week_start}"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Storage {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a store error into an API error.
///
/// Missing-record errors become [`ApiError::NotFound`]; everything else is
/// surfaced as a storage failure.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::RosterNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Roster"),
            message: format!("Roster {id} does not exist"),
        },
        StoreError::EntryNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Unmatched entry"),
            message: format!("Unmatched entry {id} does not exist"),
        },
        StoreError::NotFound(msg) => ApiError::NotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Storage {
            message: other.to_string(),
        },
    }
}
