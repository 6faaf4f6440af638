// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chain identity derivation.
//!
//! A chain groups all roster versions for one venue and one calendar week.
//! The identifier is a pure function of (venue, week start), so re-creating
//! the schedule for the same venue-week always lands in the same chain no
//! matter how many times it is re-created.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

use crate::types::VenueId;

/// Week alignment configuration.
///
/// The weekday a scheduling week starts on is domain-tunable, not a
/// universal constant. The default is Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekConfig {
    /// The weekday each scheduling week starts on.
    pub week_start: Weekday,
}

impl WeekConfig {
    /// Creates a configuration with the given week-start weekday.
    #[must_use]
    pub const fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }
}

impl Default for WeekConfig {
    fn default() -> Self {
        Self::new(Weekday::Monday)
    }
}

/// Returns the configured week start for any date within the week.
#[must_use]
pub fn week_start_of(date: Date, config: WeekConfig) -> Date {
    let offset: i64 = i64::from(
        (7 + date.weekday().number_days_from_monday()
            - config.week_start.number_days_from_monday())
            % 7,
    );
    date.saturating_sub(Duration::days(offset))
}

/// Returns the whole-day delta between two week starts.
///
/// Positive when `target` is later than `source`.
#[must_use]
pub fn week_delta_days(source_week_start: Date, target_week_start: Date) -> i64 {
    (target_week_start - source_week_start).whole_days()
}

/// Identifier grouping all versions of one venue-week schedule.
///
/// Derived, never assigned: two calls with dates in the same configured week
/// for the same venue yield the identical identifier, and distinct
/// (venue, week) pairs can never collide because the identifier embeds both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(String);

impl ChainId {
    /// Derives the chain identifier for a venue and any date in the week.
    #[must_use]
    pub fn derive(venue: &VenueId, any_date_in_week: Date, config: WeekConfig) -> Self {
        let week_start: Date = week_start_of(any_date_in_week, config);
        Self(format!("{}:{week_start}", venue.value()))
    }

    /// Reconstructs a chain identifier from its stored representation.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_same_week_dates_share_chain_id() {
        let venue = VenueId::new("v-1");
        let config = WeekConfig::default();

        // 2025-01-06 is a Monday; every day of that week must agree.
        let monday = ChainId::derive(&venue, date!(2025 - 01 - 06), config);
        let wednesday = ChainId::derive(&venue, date!(2025 - 01 - 08), config);
        let sunday = ChainId::derive(&venue, date!(2025 - 01 - 12), config);

        assert_eq!(monday, wednesday);
        assert_eq!(monday, sunday);
    }

    #[test]
    fn test_different_weeks_differ() {
        let venue = VenueId::new("v-1");
        let config = WeekConfig::default();

        let week_one = ChainId::derive(&venue, date!(2025 - 01 - 06), config);
        let week_two = ChainId::derive(&venue, date!(2025 - 01 - 13), config);

        assert_ne!(week_one, week_two);
    }

    #[test]
    fn test_different_venues_differ() {
        let config = WeekConfig::default();
        let day = date!(2025 - 01 - 06);

        let a = ChainId::derive(&VenueId::new("v-1"), day, config);
        let b = ChainId::derive(&VenueId::new("v-2"), day, config);

        assert_ne!(a, b);
    }

    #[test]
    fn test_week_start_of_monday_config() {
        let config = WeekConfig::default();

        assert_eq!(
            week_start_of(date!(2025 - 01 - 08), config),
            date!(2025 - 01 - 06)
        );
        assert_eq!(
            week_start_of(date!(2025 - 01 - 06), config),
            date!(2025 - 01 - 06)
        );
        assert_eq!(
            week_start_of(date!(2025 - 01 - 12), config),
            date!(2025 - 01 - 06)
        );
    }

    #[test]
    fn test_week_start_of_sunday_config() {
        let config = WeekConfig::new(Weekday::Sunday);

        // With Sunday-start weeks, Monday 2025-01-06 belongs to the week
        // beginning Sunday 2025-01-05.
        assert_eq!(
            week_start_of(date!(2025 - 01 - 06), config),
            date!(2025 - 01 - 05)
        );
        assert_eq!(
            week_start_of(date!(2025 - 01 - 05), config),
            date!(2025 - 01 - 05)
        );
    }

    #[test]
    fn test_week_delta_days() {
        assert_eq!(
            week_delta_days(date!(2025 - 01 - 06), date!(2025 - 01 - 20)),
            14
        );
        assert_eq!(
            week_delta_days(date!(2025 - 01 - 20), date!(2025 - 01 - 06)),
            -14
        );
    }

    #[test]
    fn test_chain_id_embeds_venue_and_week() {
        let venue = VenueId::new("harbor");
        let id = ChainId::derive(&venue, date!(2025 - 01 - 08), WeekConfig::default());
        assert_eq!(id.value(), "harbor:2025-01-06");
    }
}
