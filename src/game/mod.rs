//! Core game logic module for Snake
//!
//! Everything here is pure simulation: no terminals, no timers, no I/O
//! beyond the injected high-score store. Drivers own a `GameMachine`,
//! feed it ticks and direction requests, and read frames as snapshots.

pub mod collision;
pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod machine;
pub mod snake;

// Re-export commonly used types
pub use collision::CollisionType;
pub use config::{Difficulty, GameConfig};
pub use direction::Direction;
pub use grid::{Cell, Grid};
pub use machine::{GameMachine, GamePhase, Snapshot, TickOutcome};
pub use snake::Snake;
