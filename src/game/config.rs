use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Speed tier selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{name}")
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per axis of the square board
    pub grid_size: usize,
    /// Points awarded per food item
    pub food_score: u32,
    /// Speed tier a fresh session starts on
    pub difficulty: Difficulty,
    /// Tick interval in milliseconds per difficulty tier
    pub easy_tick_ms: u64,
    pub medium_tick_ms: u64,
    pub hard_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            food_score: 10,
            difficulty: Difficulty::default(),
            easy_tick_ms: 200,
            medium_tick_ms: 150,
            hard_tick_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// The tick interval for a difficulty tier
    pub fn tick_interval(&self, difficulty: Difficulty) -> Duration {
        let ms = match difficulty {
            Difficulty::Easy => self.easy_tick_ms,
            Difficulty::Medium => self.medium_tick_ms,
            Difficulty::Hard => self.hard_tick_ms,
        };
        Duration::from_millis(ms)
    }
}
