//! Statistics calculation engine.
//!
//! Pure functions over player sequences:
//! - Average cashouts
//! - Most common rank (first-seen tie-break)
//! - Per-platform composition, both per endpoint and by linked account

use std::collections::HashMap;

use crate::models::{PerPlatform, Platform, Player, RankCatalog, Statistics};

/// Mean cashouts, or `None` for an empty sequence.
pub fn average_cashouts(players: &[Player]) -> Option<f64> {
    if players.is_empty() {
        return None;
    }

    let len = players.len() as f64;
    let total = compensated_sum(players.iter().map(|p| p.cashouts));
    if total.is_finite() {
        Some(total / len)
    } else {
        // Sum exceeds f64 range; average the scaled values instead
        Some(compensated_sum(players.iter().map(|p| p.cashouts / len)))
    }
}

/// Neumaier summation, so rounding error does not grow with the list.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;

    for value in values {
        let next = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - next) + value;
        } else {
            compensation += (value - next) + sum;
        }
        sum = next;
    }

    sum + compensation
}

/// Most frequent league number.
///
/// Ties go to the league number that appears first in `players`.
pub fn most_common_league(players: &[Player]) -> Option<i64> {
    // Counts kept in first-seen order
    let mut counts: Vec<(i64, usize)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for player in players {
        match index.get(&player.league_number) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(player.league_number, counts.len());
                counts.push((player.league_number, 1));
            }
        }
    }

    let mut best: Option<(i64, usize)> = None;
    for (league, count) in counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((league, count));
        }
    }

    best.map(|(league, _)| league)
}

/// Label of the most frequent league, or `None` when empty or unmapped.
pub fn most_common_rank(players: &[Player]) -> Option<&'static str> {
    most_common_league(players).and_then(RankCatalog::label_for)
}

/// Full summary for one platform's players.
pub fn compute_statistics(players: &[Player]) -> Statistics {
    Statistics {
        count: players.len(),
        average_cashouts: average_cashouts(players),
        most_common_rank: most_common_rank(players),
    }
}

/// Summaries for each platform's leaderboard, never mixing platforms.
pub fn compute_platform_statistics(players: &PerPlatform<Vec<Player>>) -> PerPlatform<Statistics> {
    players.map(|_, list| compute_statistics(list))
}

/// Bucket players by the platforms they have linked an account on.
///
/// A player linked on several platforms lands in each of their buckets.
/// The crossplay bucket is always empty.
pub fn separate_by_linked_account(players: &[Player]) -> PerPlatform<Vec<Player>> {
    let mut buckets: PerPlatform<Vec<Player>> = PerPlatform::default();

    for player in players {
        for platform in Platform::ALL {
            if player.accounts.is_linked(platform) {
                buckets.get_mut(platform).push(player.clone());
            }
        }
    }

    buckets
}

/// Summaries per linked-account platform over one combined sequence.
pub fn statistics_by_linked_account(players: &[Player]) -> PerPlatform<Statistics> {
    compute_platform_statistics(&separate_by_linked_account(players))
}
