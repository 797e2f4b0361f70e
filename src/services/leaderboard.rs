// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking.

use crate::models::UserProfile;

/// Order profiles by streak (highest first), then display name.
///
/// Name comparison is case-sensitive. The sort is stable, so profiles with
/// equal streak and name keep their input order. The input is left as is.
pub fn rank(profiles: &[UserProfile]) -> Vec<UserProfile> {
    let mut ranked = profiles.to_vec();
    ranked.sort_by(|a, b| {
        b.streak
            .cmp(&a.streak)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    ranked
}
