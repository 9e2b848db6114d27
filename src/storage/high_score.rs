//! High-score persistence
//!
//! The game core only sees the `HighScoreStore` trait: load once at
//! session start, write through whenever the high score is beaten. The
//! file-backed implementation stores a small JSON document; anything
//! missing or unreadable loads as zero.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Persistence seam for the high score
pub trait HighScoreStore {
    /// The persisted high score; missing or corrupt data reads as 0
    fn load(&self) -> u32;

    /// Write-through save of a freshly beaten high score
    fn save(&mut self, value: u32) -> Result<()>;
}

/// On-disk payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SaveData {
    high_score: u32,
}

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str::<SaveData>(&text)
                .unwrap_or_default()
                .high_score,
            Err(_) => 0,
        }
    }

    fn save(&mut self, value: u32) -> Result<()> {
        // A bare file name has an empty parent; only create real directories
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let data = SaveData { high_score: value };
        let json =
            serde_json::to_string_pretty(&data).context("Failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store backed by a shared cell
///
/// Clones share the same value, so a test can keep one handle and hand the
/// other to the game; also used for `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    /// The currently stored value, visible across clones
    pub fn value(&self) -> u32 {
        self.value.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&mut self, value: u32) -> Result<()> {
        self.value.set(value);
        Ok(())
    }
}
