// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak engine.
//!
//! A streak counts consecutive calendar days with at least one completed
//! goal, ending on the profile's `last_completion_date`. It only ever moves
//! on a completion event; un-completing a goal leaves it alone.

use chrono::{NaiveDate, Utc};

use crate::models::{UserProfile, ANONYMOUS_NAME};
use crate::time_utils::days_between;

/// Next streak value for a completion on `completion_date`.
pub fn next_streak(
    streak: u32,
    last_completion_date: Option<NaiveDate>,
    completion_date: NaiveDate,
) -> u32 {
    let Some(last) = last_completion_date else {
        return 1;
    };

    match days_between(last, completion_date) {
        0 => streak,
        1 => streak.saturating_add(1),
        // A gap, or a completion dated before the last one, starts over.
        _ => 1,
    }
}

/// Advance `user_id`'s streak for a goal completed on `completion_date`.
///
/// A missing profile is a first completion: the result is a new profile with
/// a streak of 1. The caller persists the result with a single upsert.
pub fn advance_streak(
    user_id: &str,
    profile: Option<UserProfile>,
    completion_date: NaiveDate,
) -> UserProfile {
    let mut profile =
        profile.unwrap_or_else(|| UserProfile::new(user_id, ANONYMOUS_NAME, None));

    profile.streak = next_streak(
        profile.streak,
        profile.last_completion_date,
        completion_date,
    );
    profile.last_completion_date = Some(completion_date);
    profile.updated_at = Utc::now();
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn profile(streak: u32, last: Option<&str>) -> UserProfile {
        let mut p = UserProfile::new("u1", "Al", None);
        p.streak = streak;
        p.last_completion_date = last.map(date);
        p
    }

    #[test]
    fn test_first_completion_starts_at_one() {
        for streak in [0, 1, 7] {
            let p = advance_streak("u1", Some(profile(streak, None)), date("2024-03-01"));
            assert_eq!(p.streak, 1);
        }
    }

    #[test]
    fn test_absent_profile() {
        let p = advance_streak("u1", None, date("2024-03-01"));
        assert_eq!(p.user_id, "u1");
        assert_eq!(p.streak, 1);
        assert_eq!(p.last_completion_date, Some(date("2024-03-01")));
    }

    #[test]
    fn test_consecutive_day_increments() {
        let p = advance_streak(
            "u1",
            Some(profile(3, Some("2024-01-10"))),
            date("2024-01-11"),
        );
        assert_eq!(p.streak, 4);
        assert_eq!(p.last_completion_date, Some(date("2024-01-11")));
    }

    #[test]
    fn test_same_day_keeps_streak() {
        let p = advance_streak(
            "u1",
            Some(profile(5, Some("2024-01-10"))),
            date("2024-01-10"),
        );
        assert_eq!(p.streak, 5);
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(next_streak(5, Some(date("2024-01-10")), date("2024-01-12")), 1);
        assert_eq!(next_streak(5, Some(date("2024-01-10")), date("2024-02-10")), 1);
    }

    #[test]
    fn test_backdated_completion_resets() {
        let p = advance_streak(
            "u1",
            Some(profile(5, Some("2024-01-10"))),
            date("2024-01-09"),
        );
        assert_eq!(p.streak, 1);
        assert_eq!(p.last_completion_date, Some(date("2024-01-09")));
    }

    #[test]
    fn test_month_boundary_is_consecutive() {
        assert_eq!(next_streak(2, Some(date("2024-02-29")), date("2024-03-01")), 3);
    }

    #[test]
    fn test_display_fields_untouched() {
        let mut before = profile(1, Some("2024-01-10"));
        before.avatar_url = Some("https://example.com/a.png".to_string());

        let after = advance_streak("u1", Some(before.clone()), date("2024-01-11"));
        assert_eq!(after.display_name, before.display_name);
        assert_eq!(after.avatar_url, before.avatar_url);
        assert_eq!(after.created_at, before.created_at);
    }
}
