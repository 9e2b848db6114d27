pub mod high_score;

pub use high_score::{FileStore, HighScoreStore, MemoryStore};
