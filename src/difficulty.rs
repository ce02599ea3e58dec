//! Difficulty levels.
//!
//! | Level | Name | Bullets per burst | Enemy speed | Enemy hit points |
//! |-------|------|-------------------|-------------|------------------|
//! | 0 | easy | 10 | 0.05 | 300 |
//! | 1 | normal | 30 | 0.05 | 300 |
//! | 2 | hard | 60 | 0.05 | 600 |
//! | 3 | lunatic | 120 | 0.1 | 1200 |

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// One row of the difficulty table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Bullets in each enemy firework burst.
    pub max_bullets_per_frame: u32,
    /// Angular speed of the enemy's sideways oscillation.
    pub enemy_speed_factor: f32,
    /// Hits the enemy survives.
    pub enemy_hit_points: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
    Lunatic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Lunatic,
    ];

    /// Numeric level, 0-3.
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Lunatic => "lunatic",
        }
    }

    pub fn settings(self) -> DifficultySettings {
        let (max_bullets_per_frame, enemy_speed_factor, enemy_hit_points) = match self {
            Difficulty::Easy => (10, 0.05, 300),
            Difficulty::Normal => (30, 0.05, 300),
            Difficulty::Hard => (60, 0.05, 600),
            Difficulty::Lunatic => (120, 0.1, 1200),
        };
        DifficultySettings {
            max_bullets_per_frame,
            enemy_speed_factor,
            enemy_hit_points,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::ALL
            .get(level as usize)
            .copied()
            .ok_or(ConfigError::UnknownLevel(level))
    }
}

/// Accepts a level (`"2"`) or a name (`"hard"`, any case).
impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Difficulty::try_from(level);
        }
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.level())
    }
}
