//! Derived statistics models.

use serde::Serialize;

/// Summary of one platform's player sequence.
///
/// `None` means "unavailable" (no players), which is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of players analysed
    pub count: usize,

    /// Mean cashouts across the players
    pub average_cashouts: Option<f64>,

    /// Label of the most frequent league number
    pub most_common_rank: Option<&'static str>,
}

impl Statistics {
    /// Average cashouts with two decimals, or "N/A".
    pub fn average_display(&self) -> String {
        match self.average_cashouts {
            Some(avg) => format!("{:.2}", avg),
            None => "N/A".to_string(),
        }
    }

    /// Most common rank label, or "N/A".
    pub fn rank_display(&self) -> &'static str {
        self.most_common_rank.unwrap_or("N/A")
    }
}
