// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Confidence-scored fuzzy matching of extracted staff names.
//!
//! The engine reconciles a free-text name against the venue's known
//! personnel in three stages: exact normalized equality, token-set
//! comparison with initial/prefix weighting, and a normalized-Levenshtein
//! fallback for typos. Ties are broken deterministically by prior shift
//! count at the venue, then by person id. The engine is total: empty or
//! garbage input yields the no-match outcome, never an error.

use rostra_domain::{MatchConfig, Person, PersonId};

/// Honorifics stripped during normalization.
const HONORIFICS: [&str; 7] = ["mr", "mrs", "ms", "miss", "dr", "prof", "sir"];

/// Token pair weights for the token-set comparison.
const WEIGHT_EQUAL: f64 = 1.0;
const WEIGHT_INITIAL: f64 = 0.9;
const WEIGHT_PREFIX: f64 = 0.8;

/// A matching candidate: a person plus the tie-break statistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// The person as supplied by the venue directory.
    pub person: Person,
    /// Historical shift count for this person at the venue. Used only to
    /// break ties between equally-scored candidates.
    pub prior_shift_count: u32,
}

impl MatchCandidate {
    /// Creates a new candidate.
    #[must_use]
    pub const fn new(person: Person, prior_shift_count: u32) -> Self {
        Self {
            person,
            prior_shift_count,
        }
    }
}

/// The result of matching one raw name against the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The best candidate, when confidence reaches the suggestion floor.
    pub person_id: Option<PersonId>,
    /// Match confidence, 0–100. Zero when no suggestion is offered.
    pub confidence: u8,
}

impl MatchOutcome {
    /// The outcome for input that matched nothing.
    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            person_id: None,
            confidence: 0,
        }
    }

    /// Returns true if the confidence reaches the auto-accept threshold.
    #[must_use]
    pub const fn is_committable(&self, config: &MatchConfig) -> bool {
        self.person_id.is_some() && self.confidence >= config.commit_threshold
    }
}

/// Normalizes a name for comparison: case-fold, strip punctuation, collapse
/// whitespace, drop honorifics.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded
        .split_whitespace()
        .filter(|token| !HONORIFICS.contains(token))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Weight for one token pair: exact, initial, or multi-letter prefix.
fn token_weight(a: &str, b: &str) -> f64 {
    if a == b {
        return WEIGHT_EQUAL;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if long.starts_with(short) {
        if short.chars().count() == 1 {
            return WEIGHT_INITIAL;
        }
        return WEIGHT_PREFIX;
    }
    0.0
}

/// Coverage of `covered` tokens by `covering` tokens: the mean of each
/// covered token's best pair weight.
fn coverage(covered: &[&str], covering: &[&str]) -> f64 {
    if covered.is_empty() {
        return 0.0;
    }
    let total: f64 = covered
        .iter()
        .map(|token| {
            covering
                .iter()
                .map(|other| token_weight(token, other))
                .fold(0.0, f64::max)
        })
        .sum();
    total / covered.len() as f64
}

/// Token-set score in [0, 100]: both directions of coverage averaged, so a
/// candidate is penalized both for tokens the raw text lacks and for raw
/// tokens the candidate cannot explain (length disparity).
fn token_score(raw_tokens: &[&str], candidate_tokens: &[&str]) -> f64 {
    let forward: f64 = coverage(candidate_tokens, raw_tokens);
    let backward: f64 = coverage(raw_tokens, candidate_tokens);
    100.0 * (forward + backward) / 2.0
}

/// Scores one candidate name against the normalized raw text.
fn score_candidate(raw_normalized: &str, candidate_name: &str) -> f64 {
    let candidate_normalized: String = normalize_name(candidate_name);
    if candidate_normalized.is_empty() {
        return 0.0;
    }
    if raw_normalized == candidate_normalized {
        return 100.0;
    }

    let raw_tokens: Vec<&str> = raw_normalized.split(' ').collect();
    let candidate_tokens: Vec<&str> = candidate_normalized.split(' ').collect();
    let tokens: f64 = token_score(&raw_tokens, &candidate_tokens);

    // Edit-distance fallback catches typos the token comparison cannot,
    // e.g. transposed letters within a token.
    let edit: f64 = 100.0 * strsim::normalized_levenshtein(raw_normalized, &candidate_normalized);

    tokens.max(edit)
}

/// Matches a raw staff name against the venue's personnel.
///
/// Returns the best candidate with a confidence in [0, 100]:
///
/// - exact normalized equality always yields 100;
/// - when the runner-up scores within the configured ambiguity margin of a
///   non-exact best candidate, confidence is capped below the commit
///   threshold so the match is queued for human confirmation;
/// - below the suggestion floor the no-match outcome is returned.
///
/// Inactive personnel are never matched. Empty or garbage input yields the
/// no-match outcome.
#[must_use]
pub fn match_name(raw: &str, candidates: &[MatchCandidate], config: &MatchConfig) -> MatchOutcome {
    let raw_normalized: String = normalize_name(raw);
    if raw_normalized.is_empty() {
        return MatchOutcome::no_match();
    }

    let mut scored: Vec<(f64, &MatchCandidate)> = candidates
        .iter()
        .filter(|candidate| candidate.person.active)
        .map(|candidate| {
            (
                score_candidate(&raw_normalized, &candidate.person.display_name),
                candidate,
            )
        })
        .collect();
    if scored.is_empty() {
        return MatchOutcome::no_match();
    }

    // Deterministic order: score, then prior shift count, then person id.
    scored.sort_by(|(score_a, cand_a), (score_b, cand_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| cand_b.prior_shift_count.cmp(&cand_a.prior_shift_count))
            .then_with(|| cand_a.person.id.cmp(&cand_b.person.id))
    });

    let (best_score, best) = scored[0];
    let runner_up_score: f64 = scored
        .get(1)
        .filter(|(_, other)| other.person.id != best.person.id)
        .map_or(0.0, |(score, _)| *score);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut confidence: u8 = best_score.round().clamp(0.0, 100.0) as u8;

    // Near-equal rivals make the match ambiguous; cap it below the commit
    // threshold so it lands in the manual-resolution queue. Exact matches
    // are exempt.
    if confidence < 100
        && best_score - runner_up_score < f64::from(config.ambiguity_margin)
        && runner_up_score > 0.0
    {
        confidence = confidence.min(config.commit_threshold.saturating_sub(1));
    }

    if confidence < config.suggestion_floor {
        return MatchOutcome::no_match();
    }

    MatchOutcome {
        person_id: Some(best.person.id.clone()),
        confidence,
    }
}
