// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the extraction-matching engine: normalization, scoring,
//! ambiguity capping, tie-breaking and the suggestion floor.

use rostra_domain::{MatchConfig, PersonId};

use crate::matching::{MatchOutcome, match_name, normalize_name};

use super::helpers::{candidate, john_and_jane, john_only};

#[test]
fn test_normalize_folds_case_and_punctuation() {
    assert_eq!(normalize_name("  J.  DOE "), "j doe");
    assert_eq!(normalize_name("O'Brien, Mary-Anne"), "o brien mary anne");
}

#[test]
fn test_normalize_strips_honorifics() {
    assert_eq!(normalize_name("Dr. John Doe"), "john doe");
    assert_eq!(normalize_name("Mrs Smith"), "smith");
}

#[test]
fn test_normalize_garbage_is_empty() {
    assert_eq!(normalize_name("!!! ---"), "");
}

#[test]
fn test_exact_match_scores_one_hundred() {
    let outcome = match_name("John Doe", &john_only(), &MatchConfig::default());

    assert_eq!(outcome.person_id, Some(PersonId::new("p-john")));
    assert_eq!(outcome.confidence, 100);
    assert!(outcome.is_committable(&MatchConfig::default()));
}

#[test]
fn test_exact_match_ignores_case_and_honorific() {
    let outcome = match_name("dr. JOHN doe", &john_only(), &MatchConfig::default());

    assert_eq!(outcome.confidence, 100);
}

#[test]
fn test_initial_plus_surname_auto_matches_sole_candidate() {
    // "J. Doe" against a roster whose only Doe is John: initial weight 0.9
    // and exact surname give 95, clear of the commit threshold.
    let outcome = match_name("J. Doe", &john_only(), &MatchConfig::default());

    assert_eq!(outcome.person_id, Some(PersonId::new("p-john")));
    assert_eq!(outcome.confidence, 95);
    assert!(outcome.is_committable(&MatchConfig::default()));
}

#[test]
fn test_near_miss_rival_caps_confidence_below_commit() {
    // With Jane Doering on the roster, "J. Doe" scores 95 vs 85. The gap
    // is inside the ambiguity margin, so the match is capped to 84 and
    // queued for human confirmation with John as the suggestion.
    let config = MatchConfig::default();
    let outcome = match_name("J. Doe", &john_and_jane(), &config);

    assert_eq!(outcome.person_id, Some(PersonId::new("p-john")));
    assert_eq!(outcome.confidence, config.commit_threshold - 1);
    assert!(!outcome.is_committable(&config));
}

#[test]
fn test_exact_match_is_exempt_from_ambiguity_cap() {
    let outcome = match_name("John Doe", &john_and_jane(), &MatchConfig::default());

    assert_eq!(outcome.confidence, 100);
}

#[test]
fn test_typo_caught_by_edit_distance() {
    // One transposition inside a token defeats token comparison but not
    // the Levenshtein fallback.
    let outcome = match_name("Jhon Doe", &john_only(), &MatchConfig::default());

    assert_eq!(outcome.person_id, Some(PersonId::new("p-john")));
    assert!(outcome.confidence >= 70);
}

#[test]
fn test_unrelated_name_yields_no_match() {
    let outcome = match_name("Xavier Quill", &john_only(), &MatchConfig::default());

    assert_eq!(outcome, MatchOutcome::no_match());
}

#[test]
fn test_empty_and_garbage_input_yield_no_match() {
    let config = MatchConfig::default();

    assert_eq!(match_name("", &john_only(), &config), MatchOutcome::no_match());
    assert_eq!(
        match_name("###", &john_only(), &config),
        MatchOutcome::no_match()
    );
}

#[test]
fn test_empty_candidate_set_yields_no_match() {
    let outcome = match_name("John Doe", &[], &MatchConfig::default());

    assert_eq!(outcome, MatchOutcome::no_match());
}

#[test]
fn test_inactive_personnel_are_never_matched() {
    let candidates = vec![candidate("p-john", "John Doe", false, 12)];
    let outcome = match_name("John Doe", &candidates, &MatchConfig::default());

    assert_eq!(outcome, MatchOutcome::no_match());
}

#[test]
fn test_tie_broken_by_prior_shift_count() {
    let candidates = vec![
        candidate("p-1", "Ann Lee", true, 2),
        candidate("p-2", "Ann Lee", true, 9),
    ];
    let outcome = match_name("Ann Lee", &candidates, &MatchConfig::default());

    assert_eq!(outcome.person_id, Some(PersonId::new("p-2")));
}

#[test]
fn test_tie_broken_by_person_id_when_priors_equal() {
    let candidates = vec![
        candidate("p-2", "Ann Lee", true, 5),
        candidate("p-1", "Ann Lee", true, 5),
    ];
    let outcome = match_name("Ann Lee", &candidates, &MatchConfig::default());

    assert_eq!(outcome.person_id, Some(PersonId::new("p-1")));
}

#[test]
fn test_determinism_across_candidate_order() {
    let forward = john_and_jane();
    let mut reversed = john_and_jane();
    reversed.reverse();
    let config = MatchConfig::default();

    assert_eq!(
        match_name("J. Doe", &forward, &config),
        match_name("J. Doe", &reversed, &config)
    );
}

#[test]
fn test_narrow_margin_lets_clear_winner_commit() {
    // With a one-point margin the 95-vs-85 gap is no longer ambiguous.
    let config = MatchConfig::new(85, 40, 1).unwrap();
    let outcome = match_name("J. Doe", &john_and_jane(), &config);

    assert_eq!(outcome.confidence, 95);
    assert!(outcome.is_committable(&config));
}

#[test]
fn test_raised_floor_suppresses_weak_suggestion() {
    // "Jhon Doe" scores 75 against the sole candidate; raising the floor
    // past that drops the suggestion entirely.
    let config = MatchConfig::new(85, 80, 15).unwrap();
    let outcome = match_name("Jhon Doe", &john_only(), &config);

    assert_eq!(outcome, MatchOutcome::no_match());
}
