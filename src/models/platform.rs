//! Leaderboard platforms.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four published leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Cross-platform aggregate
    Crossplay,
    Steam,
    Psn,
    Xbox,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Crossplay,
        Platform::Steam,
        Platform::Psn,
        Platform::Xbox,
    ];

    /// Path segment used by the leaderboard API.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Crossplay => "crossplay",
            Platform::Steam => "steam",
            Platform::Psn => "psn",
            Platform::Xbox => "xbox",
        }
    }

    /// Heading used when rendering the platform.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Crossplay => "CROSSPLAY",
            Platform::Steam => "STEAM",
            Platform::Psn => "PSN",
            Platform::Xbox => "XBOX",
        }
    }

    /// Whether players carry an account name for this platform.
    pub fn has_account_names(&self) -> bool {
        !matches!(self, Platform::Crossplay)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crossplay" => Ok(Platform::Crossplay),
            "steam" => Ok(Platform::Steam),
            "psn" | "playstation" => Ok(Platform::Psn),
            "xbox" => Ok(Platform::Xbox),
            other => Err(format!(
                "unknown platform '{}' (expected crossplay, steam, psn or xbox)",
                other
            )),
        }
    }
}

/// Exactly one value per platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerPlatform<T> {
    pub crossplay: T,
    pub steam: T,
    pub psn: T,
    pub xbox: T,
}

impl<T> PerPlatform<T> {
    /// Build by calling `f` once per platform, in `Platform::ALL` order.
    pub fn from_fn(mut f: impl FnMut(Platform) -> T) -> Self {
        Self {
            crossplay: f(Platform::Crossplay),
            steam: f(Platform::Steam),
            psn: f(Platform::Psn),
            xbox: f(Platform::Xbox),
        }
    }

    pub fn get(&self, platform: Platform) -> &T {
        match platform {
            Platform::Crossplay => &self.crossplay,
            Platform::Steam => &self.steam,
            Platform::Psn => &self.psn,
            Platform::Xbox => &self.xbox,
        }
    }

    pub fn get_mut(&mut self, platform: Platform) -> &mut T {
        match platform {
            Platform::Crossplay => &mut self.crossplay,
            Platform::Steam => &mut self.steam,
            Platform::Psn => &mut self.psn,
            Platform::Xbox => &mut self.xbox,
        }
    }

    /// Apply `f` to every slot.
    pub fn map<U>(&self, mut f: impl FnMut(Platform, &T) -> U) -> PerPlatform<U> {
        PerPlatform::from_fn(|platform| f(platform, self.get(platform)))
    }

    /// Iterate `(platform, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &T)> {
        Platform::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("steam".parse::<Platform>(), Ok(Platform::Steam));
        assert_eq!("XBOX".parse::<Platform>(), Ok(Platform::Xbox));
        assert_eq!("playstation".parse::<Platform>(), Ok(Platform::Psn));
        assert_eq!(" crossplay ".parse::<Platform>(), Ok(Platform::Crossplay));
        assert!("switch".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serde_uses_slug() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.slug()));
        }
    }

    #[test]
    fn test_per_platform_from_fn_and_get() {
        let slots = PerPlatform::from_fn(|p| p.slug().len());
        assert_eq!(*slots.get(Platform::Crossplay), 9);
        assert_eq!(*slots.get(Platform::Psn), 3);

        let order: Vec<_> = slots.iter().map(|(p, _)| p).collect();
        assert_eq!(order, Platform::ALL.to_vec());
    }

    #[test]
    fn test_per_platform_map_and_get_mut() {
        let mut slots = PerPlatform::from_fn(|_| 1u32);
        *slots.get_mut(Platform::Xbox) += 4;

        let doubled = slots.map(|_, v| v * 2);
        assert_eq!(doubled.xbox, 10);
        assert_eq!(doubled.steam, 2);
    }

    #[test]
    fn test_account_names() {
        assert!(!Platform::Crossplay.has_account_names());
        assert!(Platform::Steam.has_account_names());
    }
}
