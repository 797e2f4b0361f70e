//! Completion summaries for the history and community views.
//!
//! These are computed on read from the goals themselves; nothing here is
//! persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Goal, PublicGoal};

/// Percentage of `part` in `total`, rounded to the nearest integer.
///
/// Zero when `total` is zero.
pub fn rounded_percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(part) * 100.0 / f64::from(total)).round() as u32
}

/// Goal counts for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DaySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub total_goals: u32,
    pub completed_goals: u32,
    /// Completed share in percent (0-100)
    pub completion_rate: u32,
}

/// Aggregate counts over all of a user's goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryStats {
    /// Days with at least one goal
    pub total_days: u32,
    pub total_goals: u32,
    pub completed_goals: u32,
    /// Completed share of all goals in percent (0-100)
    pub average_completion: u32,
}

impl HistoryStats {
    /// Summarize `goals`, returning overall stats and one summary per day,
    /// newest day first.
    pub fn from_goals(goals: &[Goal]) -> (Self, Vec<DaySummary>) {
        // (total, completed) per day
        let mut by_day: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
        for goal in goals {
            let entry = by_day.entry(goal.date).or_default();
            entry.0 += 1;
            if goal.completed {
                entry.1 += 1;
            }
        }

        let days: Vec<DaySummary> = by_day
            .into_iter()
            .rev()
            .map(|(date, (total, completed))| DaySummary {
                date,
                total_goals: total,
                completed_goals: completed,
                completion_rate: rounded_percent(completed, total),
            })
            .collect();

        let total_goals = days.iter().map(|d| d.total_goals).sum();
        let completed_goals = days.iter().map(|d| d.completed_goals).sum();

        let stats = Self {
            total_days: days.len() as u32,
            total_goals,
            completed_goals,
            average_completion: rounded_percent(completed_goals, total_goals),
        };

        (stats, days)
    }
}

/// Aggregate counts over one day's public feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommunityStats {
    pub total_goals: u32,
    pub completed_goals: u32,
    /// Distinct owners with a public goal
    pub active_users: u32,
    pub completion_rate: u32,
    pub goals_per_user: u32,
}

impl CommunityStats {
    pub fn from_feed(feed: &[PublicGoal]) -> Self {
        let total_goals = feed.len() as u32;
        let completed_goals = feed.iter().filter(|g| g.goal.completed).count() as u32;
        let active_users = feed
            .iter()
            .map(|g| g.goal.owner_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u32;

        let goals_per_user = if active_users == 0 {
            0
        } else {
            (f64::from(total_goals) / f64::from(active_users)).round() as u32
        };

        Self {
            total_goals,
            completed_goals,
            active_users,
            completion_rate: rounded_percent(completed_goals, total_goals),
            goals_per_user,
        }
    }
}
