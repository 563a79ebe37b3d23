//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use crate::models::{PerPlatform, Platform, Player, RankCatalog, Statistics};

use super::{DashboardSnapshot, LoadStatus};

/// One list row: `name - Rank: r, League: l, Cashouts: c`.
pub fn player_row(player: &Player) -> String {
    format!(
        "{} - Rank: {}, League: {}, Cashouts: {}",
        player.name, player.rank, player.league, player.cashouts
    )
}

/// Heading plus the three summary lines.
pub fn statistics_block(platform: Platform, stats: &Statistics) -> String {
    format!(
        "{}\n  Total Players Analyzed: {}\n  Average Cashouts: {}\n  Most Common Rank: {}\n",
        platform.label(),
        stats.count,
        stats.average_display(),
        stats.rank_display()
    )
}

/// Summary block followed by the given player rows.
pub fn platform_card(platform: Platform, stats: &Statistics, players: &[Player]) -> String {
    let mut out = statistics_block(platform, stats);
    for player in players {
        let _ = writeln!(out, "    {}", player_row(player));
    }
    out
}

/// Render every platform in `platforms`, or the loading/error message.
pub fn render_snapshot(snapshot: &DashboardSnapshot, platforms: &[Platform]) -> String {
    match snapshot.status {
        LoadStatus::Idle | LoadStatus::Loading => "Loading statistics...\n".to_string(),
        LoadStatus::Failed => format!(
            "Error: {}\n",
            snapshot.error.as_deref().unwrap_or("unknown error")
        ),
        LoadStatus::Ready => {
            let mut out = String::new();
            for &platform in platforms {
                let stats = snapshot.statistics(platform).cloned().unwrap_or_default();
                out.push_str(&platform_card(
                    platform,
                    &stats,
                    snapshot.visible_players(platform),
                ));
                out.push('\n');
            }
            out
        }
    }
}

/// Render summaries only, one block per platform.
pub fn render_statistics(statistics: &PerPlatform<Statistics>, platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|&p| statistics_block(p, statistics.get(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The rank catalog as a two-column table.
pub fn rank_table() -> String {
    let mut out = String::new();
    for (number, label) in RankCatalog::entries() {
        let _ = writeln!(out, "{:>2}  {}", number, label);
    }
    out
}
