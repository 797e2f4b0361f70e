// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public feed assembly.
//!
//! Collects one day's public goals and joins each to its owner's profile.
//! Owner lookups are isolated per item: a failed or missing lookup turns
//! that one entry anonymous instead of failing the feed.

use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};

use crate::db::GoalStore;
use crate::error::Result;
use crate::models::{CommunityStats, GoalFilter, PublicGoal};

const MAX_CONCURRENT_LOOKUPS: usize = 16;

pub struct FeedService<S> {
    db: Arc<S>,
}

impl<S> Clone for FeedService<S> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<S: GoalStore> FeedService<S> {
    pub fn new(db: Arc<S>) -> Self {
        Self { db }
    }

    /// Public goals on `date`, newest first.
    ///
    /// Only the goal query itself can fail the request.
    pub async fn public_feed(&self, date: NaiveDate) -> Result<Vec<PublicGoal>> {
        let goals = self.db.query_goals(&GoalFilter::public_on(date)).await?;
        let db = &self.db;

        let mut feed: Vec<PublicGoal> = stream::iter(goals)
            .map(|goal| async move {
                match db.get_profile(&goal.owner_id).await {
                    Ok(Some(owner)) => PublicGoal::from_owner(goal, &owner),
                    Ok(None) => PublicGoal::anonymous(goal),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            goal_id = %goal.id,
                            owner_id = %goal.owner_id,
                            "Owner lookup failed, showing goal as anonymous"
                        );
                        PublicGoal::anonymous(goal)
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await;

        feed.sort_by(|a, b| b.goal.created_at.cmp(&a.goal.created_at));

        tracing::debug!(%date, count = feed.len(), "Public feed assembled");
        Ok(feed)
    }

    /// Public feed for `date` together with its summary counts.
    pub async fn community(&self, date: NaiveDate) -> Result<(Vec<PublicGoal>, CommunityStats)> {
        let feed = self.public_feed(date).await?;
        let stats = CommunityStats::from_feed(&feed);
        Ok((feed, stats))
    }
}
