use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use snake_arcade::game::{Difficulty, GameConfig};
use snake_arcade::modes::PlayMode;
use snake_arcade::storage::{FileStore, HighScoreStore, MemoryStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic grid snake for the terminal")]
struct Cli {
    /// Starting speed tier (changeable in-game with 1-3)
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Cells per axis of the square board
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Where the high score is kept between sessions
    #[arg(long, default_value = "snake_high_score.json")]
    save_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,
}

#[derive(Clone, ValueEnum)]
enum DifficultyArg {
    /// 200ms per tick
    Easy,
    /// 150ms per tick
    Medium,
    /// 100ms per tick
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.grid_size < 4 {
        bail!("grid size must be at least 4");
    }

    // Create game configuration from CLI arguments
    let mut config = GameConfig::new(cli.grid_size);
    config.difficulty = cli.difficulty.into();

    let store: Box<dyn HighScoreStore> = if cli.no_save {
        Box::new(MemoryStore::default())
    } else {
        Box::new(FileStore::new(cli.save_file))
    };

    let mut play_mode = PlayMode::new(config, store);
    play_mode.run().await?;

    Ok(())
}
