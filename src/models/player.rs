//! Leaderboard player record.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Platform, RankCatalog};

/// Account names a player has linked on each console/PC platform.
///
/// The API sends an empty string for platforms the player has not linked;
/// those (and `null` or missing fields) decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccounts {
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub steam_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub xbox_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub psn_name: Option<String>,
}

impl LinkedAccounts {
    /// Account name on `platform`. Always `None` for crossplay.
    pub fn name_on(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Steam => self.steam_name.as_deref(),
            Platform::Xbox => self.xbox_name.as_deref(),
            Platform::Psn => self.psn_name.as_deref(),
            Platform::Crossplay => None,
        }
    }

    pub fn is_linked(&self, platform: Platform) -> bool {
        self.name_on(platform).is_some()
    }

    /// Platforms with a linked account, in display order.
    pub fn linked_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.is_linked(*p))
            .collect()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Any JSON value where a number is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Integer(i64),
    Float(f64),
    Other(serde::de::IgnoredAny),
}

/// League numbers that are not integers decode to 0, which has no label.
fn lenient_league<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let league = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Integer(n) => n,
        LooseNumber::Float(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => f as i64,
        _ => 0,
    };
    Ok(league)
}

/// Negative, non-numeric and `null` cashouts decode to 0.
fn lenient_cashouts<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let cashouts = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Integer(n) if n >= 0 => n as f64,
        LooseNumber::Float(f) if f.is_finite() && f >= 0.0 => f,
        _ => 0.0,
    };
    Ok(cashouts)
}

/// One leaderboard entry from a platform snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Leaderboard position (1 = top)
    pub rank: u32,

    /// Position delta since the previous snapshot
    #[serde(default)]
    pub change: i32,

    /// League number, expected in 1..=20
    #[serde(default, deserialize_with = "lenient_league")]
    pub league_number: i64,

    /// League label as published by the API
    #[serde(default)]
    pub league: String,

    /// Embark display name
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub accounts: LinkedAccounts,

    #[serde(default, deserialize_with = "lenient_cashouts")]
    pub cashouts: f64,
}

impl Player {
    /// Catalog label for this player's league number.
    pub fn rank_label(&self) -> Option<&'static str> {
        RankCatalog::label_for(self.league_number)
    }
}
