// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Matching threshold configuration.
//!
//! Reasonable thresholds are domain-tunable, so they are explicit
//! configuration rather than constants buried in the matching engine.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Thresholds governing fuzzy name matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum confidence at which a match is auto-accepted without human
    /// confirmation.
    pub commit_threshold: u8,
    /// Below this confidence no suggestion is offered at all.
    pub suggestion_floor: u8,
    /// When the runner-up scores within this many points of the best
    /// candidate, the match is considered ambiguous and its confidence is
    /// capped below the commit threshold. Exact matches are exempt.
    pub ambiguity_margin: u8,
}

impl MatchConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidThresholds`] when the commit threshold
    /// exceeds 100 or does not lie above the suggestion floor.
    pub const fn new(
        commit_threshold: u8,
        suggestion_floor: u8,
        ambiguity_margin: u8,
    ) -> Result<Self, DomainError> {
        if commit_threshold > 100 || suggestion_floor >= commit_threshold {
            return Err(DomainError::InvalidThresholds {
                commit_threshold,
                suggestion_floor,
            });
        }
        Ok(Self {
            commit_threshold,
            suggestion_floor,
            ambiguity_margin,
        })
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 85,
            suggestion_floor: 40,
            ambiguity_margin: 15,
        }
    }
}
