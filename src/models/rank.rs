//! Ranked league catalog.
//!
//! Leagues are numbered 1 (Bronze IV) through 20 (Diamond I). Each tier has
//! four divisions, IV being the lowest and I the highest.

use serde::{Deserialize, Serialize};

/// Lowest league number with a label.
pub const MIN_LEAGUE: i64 = 1;

/// Highest league number with a label.
pub const MAX_LEAGUE: i64 = 20;

static LEAGUE_LABELS: [&str; 20] = [
    "Bronze IV",
    "Bronze III",
    "Bronze II",
    "Bronze I",
    "Silver IV",
    "Silver III",
    "Silver II",
    "Silver I",
    "Gold IV",
    "Gold III",
    "Gold II",
    "Gold I",
    "Platinum IV",
    "Platinum III",
    "Platinum II",
    "Platinum I",
    "Diamond IV",
    "Diamond III",
    "Diamond II",
    "Diamond I",
];

/// Rank tier, ignoring the division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankTier::Bronze => write!(f, "Bronze"),
            RankTier::Silver => write!(f, "Silver"),
            RankTier::Gold => write!(f, "Gold"),
            RankTier::Platinum => write!(f, "Platinum"),
            RankTier::Diamond => write!(f, "Diamond"),
        }
    }
}

/// Static mapping from league number to display label.
pub struct RankCatalog;

impl RankCatalog {
    /// Label for a league number, or `None` outside 1..=20.
    pub fn label_for(league_number: i64) -> Option<&'static str> {
        Self::index(league_number).map(|i| LEAGUE_LABELS[i])
    }

    /// Tier for a league number, or `None` outside 1..=20.
    pub fn tier_for(league_number: i64) -> Option<RankTier> {
        let tier = match Self::index(league_number)? / 4 {
            0 => RankTier::Bronze,
            1 => RankTier::Silver,
            2 => RankTier::Gold,
            3 => RankTier::Platinum,
            _ => RankTier::Diamond,
        };
        Some(tier)
    }

    /// All `(league_number, label)` pairs, lowest first.
    pub fn entries() -> impl Iterator<Item = (i64, &'static str)> {
        (MIN_LEAGUE..=MAX_LEAGUE).zip(LEAGUE_LABELS.iter().copied())
    }

    fn index(league_number: i64) -> Option<usize> {
        if (MIN_LEAGUE..=MAX_LEAGUE).contains(&league_number) {
            Some((league_number - MIN_LEAGUE) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bounds() {
        assert_eq!(RankCatalog::label_for(1), Some("Bronze IV"));
        assert_eq!(RankCatalog::label_for(20), Some("Diamond I"));
        assert_eq!(RankCatalog::label_for(0), None);
        assert_eq!(RankCatalog::label_for(21), None);
        assert_eq!(RankCatalog::label_for(-3), None);
        assert_eq!(RankCatalog::label_for(i64::MAX), None);
    }

    #[test]
    fn test_label_divisions() {
        assert_eq!(RankCatalog::label_for(4), Some("Bronze I"));
        assert_eq!(RankCatalog::label_for(5), Some("Silver IV"));
        assert_eq!(RankCatalog::label_for(12), Some("Gold I"));
        assert_eq!(RankCatalog::label_for(13), Some("Platinum IV"));
        assert_eq!(RankCatalog::label_for(18), Some("Diamond III"));
    }

    #[test]
    fn test_tier_for() {
        assert_eq!(RankCatalog::tier_for(1), Some(RankTier::Bronze));
        assert_eq!(RankCatalog::tier_for(8), Some(RankTier::Silver));
        assert_eq!(RankCatalog::tier_for(9), Some(RankTier::Gold));
        assert_eq!(RankCatalog::tier_for(16), Some(RankTier::Platinum));
        assert_eq!(RankCatalog::tier_for(17), Some(RankTier::Diamond));
        assert_eq!(RankCatalog::tier_for(21), None);
    }

    #[test]
    fn test_entries_cover_catalog() {
        let entries: Vec<_> = RankCatalog::entries().collect();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0], (1, "Bronze IV"));
        assert_eq!(entries[19], (20, "Diamond I"));

        // Every label starts with its tier name
        for (number, label) in entries {
            let tier = RankCatalog::tier_for(number).unwrap();
            assert!(label.starts_with(&tier.to_string()), "{} / {}", number, label);
        }
    }
}
