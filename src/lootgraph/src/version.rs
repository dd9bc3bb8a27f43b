//! Game release versions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Error parsing a version string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid game version '{0}': expected MAJOR.MINOR[.PATCH]")]
pub struct VersionError(pub String);

/// Dotted release version (`1.20`, `1.21.4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl GameVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Releases whose decorated pot table emits a bare `sherds` dynamic entry
    /// with no block condition
    pub const LEGACY_SHERDS: RangeInclusive<GameVersion> =
        GameVersion::new(1, 20, 0)..=GameVersion::new(1, 20, 4);

    /// First release using singular data directories (`loot_table`, `recipe`)
    pub const SINGULAR_DIRS: GameVersion = GameVersion::new(1, 21, 0);

    /// Whether the sherds dynamic entry resolves without an explicit condition
    pub fn has_legacy_sherds(&self) -> bool {
        Self::LEGACY_SHERDS.contains(self)
    }

    /// Whether data directories use the singular names
    pub fn uses_singular_dirs(&self) -> bool {
        *self >= Self::SINGULAR_DIRS
    }
}

impl FromStr for GameVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionError(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(err());
        }

        let num = |p: &str| p.parse::<u16>().map_err(|_| err());
        let major = num(parts[0])?;
        let minor = num(parts[1])?;
        let patch = match parts.get(2) {
            Some(p) => num(p)?,
            None => 0,
        };

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl Serialize for GameVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
