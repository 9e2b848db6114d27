//! Snake Arcade - classic grid snake for the terminal
//!
//! This library provides:
//! - Core game logic: a tick-driven state machine (game module)
//! - Smooth rendering between ticks (render module)
//! - Keyboard mapping (input module)
//! - High-score persistence (storage module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod storage;
