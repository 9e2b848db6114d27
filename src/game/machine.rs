use super::{
    collision::{self, CollisionType},
    config::{Difficulty, GameConfig},
    direction::Direction,
    food,
    grid::{Cell, Grid},
    snake::Snake,
};
use crate::storage::HighScoreStore;
use std::time::Duration;

/// Phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to start a run
    Ready,
    /// Ticks advance the snake
    Playing,
    /// Run frozen mid-flight
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one ended the run
    pub collision: Option<CollisionType>,
}

/// Read-only view of the game for presentation
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    /// Cells per axis of the board
    pub grid_size: usize,
    /// Segments after the latest tick, head first
    pub cells: &'a [Cell],
    /// Segments as they were before the latest tick, for interpolation
    pub previous_cells: &'a [Cell],
    pub food: Option<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
}

/// The game state machine: every piece of mutable game data lives here.
///
/// Drivers call `tick` on a fixed cadence while the phase is `Playing`
/// and read frames through `snapshot`. All
/// transition methods are total: calling one in a phase where it does not
/// apply is a silent no-op, never an error.
pub struct GameMachine {
    config: GameConfig,
    grid: Grid,
    store: Box<dyn HighScoreStore>,
    rng: rand::rngs::ThreadRng,

    phase: GamePhase,
    snake: Snake,
    previous_cells: Vec<Cell>,
    food: Option<Cell>,
    direction: Option<Direction>,
    pending_direction: Option<Direction>,
    score: u32,
    high_score: u32,
    difficulty: Difficulty,
}

impl GameMachine {
    /// Create a machine in `Ready`, with the high score loaded from the store
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        let grid = Grid::new(config.grid_size);
        let high_score = store.load();
        let snake = Snake::new(grid.center());

        let mut machine = Self {
            grid,
            store,
            rng: rand::thread_rng(),
            phase: GamePhase::Ready,
            previous_cells: snake.cells().to_vec(),
            snake,
            food: None,
            direction: None,
            pending_direction: None,
            score: 0,
            high_score,
            difficulty: config.difficulty,
            config,
        };
        machine.restart();
        machine
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The tick interval for the current difficulty
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.difficulty)
    }

    /// Begin a run: `Ready` -> `Playing`, heading right
    pub fn start(&mut self) {
        if self.phase != GamePhase::Ready {
            return;
        }
        self.direction = Some(Direction::Right);
        self.phase = GamePhase::Playing;
    }

    /// Freeze or unfreeze a run; no-op outside `Playing`/`Paused`
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Back to `Ready` with a fresh board, from any phase.
    ///
    /// Score, snake, food and buffered input reset; the high score and the
    /// selected difficulty survive.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.previous_cells.clear();
        self.previous_cells.extend_from_slice(self.snake.cells());
        self.food = food::spawn(&mut self.rng, &self.grid, &self.snake);
        self.direction = None;
        self.pending_direction = None;
        self.score = 0;
        self.phase = GamePhase::Ready;
    }

    /// Select a speed tier; run data is untouched.
    ///
    /// The driving loop re-schedules its tick timer when this happens
    /// mid-run, the machine itself only records the choice.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Rejected while not `Playing` and for 180-degree turns, judged
    /// against the direction actually being travelled, not an earlier
    /// buffered request. The last accepted request in a tick wins.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(active) = self.direction {
            if active.is_opposite(direction) {
                return;
            }
        }
        self.pending_direction = Some(direction);
    }

    /// Advance the simulation by one step; no-op unless `Playing`.
    ///
    /// Order per tick: apply the buffered direction, move (growing on
    /// food), resolve collisions, then score and respawn food. Collisions
    /// are judged on the moved snake, so entering the cell the tail just
    /// vacated is legal.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::default();
        }

        if let Some(next) = self.pending_direction.take() {
            self.direction = Some(next);
        }
        let direction = match self.direction {
            Some(direction) => direction,
            None => return TickOutcome::default(),
        };

        // Capture the pre-move segments for interpolated rendering
        self.previous_cells.clear();
        self.previous_cells.extend_from_slice(self.snake.cells());

        let new_head = self.snake.head().moved_in_direction(direction);
        let ate_food = self.food == Some(new_head);
        self.snake.advance(direction, ate_food);

        if let Some(collision) = collision::detect(&self.snake, &self.grid) {
            self.phase = GamePhase::GameOver;
            return TickOutcome {
                ate_food: false,
                collision: Some(collision),
            };
        }

        if ate_food {
            self.score += self.config.food_score;
            if self.score > self.high_score {
                self.high_score = self.score;
                // A failed write must not end the run
                let _ = self.store.save(self.high_score);
            }
            self.food = food::spawn(&mut self.rng, &self.grid, &self.snake);
        }

        TickOutcome {
            ate_food,
            collision: None,
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            grid_size: self.grid.size(),
            cells: self.snake.cells(),
            previous_cells: &self.previous_cells,
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            difficulty: self.difficulty,
        }
    }

    /// Pin food to a known cell so growth scenarios are deterministic
    #[cfg(test)]
    fn place_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn machine_with_store(size: usize, store: MemoryStore) -> GameMachine {
        GameMachine::new(GameConfig::new(size), Box::new(store))
    }

    fn playing_machine(size: usize) -> GameMachine {
        let mut machine = machine_with_store(size, MemoryStore::default());
        machine.start();
        machine
    }

    #[test]
    fn test_new_machine_is_ready() {
        let machine = machine_with_store(20, MemoryStore::new(30));
        let snapshot = machine.snapshot();

        assert_eq!(snapshot.phase, GamePhase::Ready);
        assert_eq!(snapshot.cells, &[Cell::new(10, 10)]);
        assert_eq!(snapshot.previous_cells, snapshot.cells);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.high_score, 30);
        assert_eq!(snapshot.difficulty, Difficulty::Medium);

        let food = snapshot.food.unwrap();
        assert!(Grid::new(20).contains(food));
        assert_ne!(food, Cell::new(10, 10));
    }

    #[test]
    fn test_start_heads_right() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        let outcome = machine.tick();

        assert!(!outcome.ate_food);
        assert_eq!(outcome.collision, None);
        assert_eq!(machine.snapshot().cells, &[Cell::new(11, 10)]);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut machine = machine_with_store(20, MemoryStore::default());
        let before = machine.snapshot().cells.to_vec();

        // Ready
        assert_eq!(machine.tick(), TickOutcome::default());
        assert_eq!(machine.snapshot().cells, before.as_slice());

        // Paused
        machine.start();
        machine.toggle_pause();
        assert_eq!(machine.tick(), TickOutcome::default());
        assert_eq!(machine.snapshot().cells, before.as_slice());
        assert_eq!(machine.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_direction_requests_ignored_outside_playing() {
        let mut machine = machine_with_store(20, MemoryStore::default());
        machine.request_direction(Direction::Up);

        machine.start();
        machine.place_food(Cell::new(0, 0));
        machine.tick();

        // The pre-start request was dropped; the run heads right
        assert_eq!(machine.snapshot().cells, &[Cell::new(11, 10)]);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        machine.request_direction(Direction::Left);
        machine.tick();

        assert_eq!(machine.snapshot().cells, &[Cell::new(11, 10)]);
    }

    #[test]
    fn test_reversal_guard_uses_travelled_direction() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        // Buffer Up, then try Left: still judged against Right, so the
        // reversal is rejected and Up stays buffered
        machine.request_direction(Direction::Up);
        machine.request_direction(Direction::Left);
        machine.tick();

        assert_eq!(machine.snapshot().cells, &[Cell::new(10, 9)]);
    }

    #[test]
    fn test_last_accepted_request_wins() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        machine.request_direction(Direction::Up);
        machine.request_direction(Direction::Down);
        machine.tick();

        assert_eq!(machine.snapshot().cells, &[Cell::new(10, 11)]);
    }

    #[test]
    fn test_buffered_direction_persists_across_ticks() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        machine.request_direction(Direction::Down);
        machine.tick();
        machine.tick();

        // Applied once, then kept as the travelled direction
        assert_eq!(machine.snapshot().cells, &[Cell::new(10, 12)]);
    }

    #[test]
    fn test_growth_keeps_tail_and_plain_move_pops_it() {
        let mut machine = playing_machine(20);

        // Tick onto food: head advances, tail cell stays
        machine.place_food(Cell::new(11, 10));
        let outcome = machine.tick();
        assert!(outcome.ate_food);
        assert_eq!(
            machine.snapshot().cells,
            &[Cell::new(11, 10), Cell::new(10, 10)]
        );

        // Tick onto an empty cell: head advances, tail cell is vacated
        machine.place_food(Cell::new(0, 0));
        let outcome = machine.tick();
        assert!(!outcome.ate_food);
        assert_eq!(
            machine.snapshot().cells,
            &[Cell::new(12, 10), Cell::new(11, 10)]
        );
    }

    #[test]
    fn test_score_and_high_score_follow_eating() {
        let store = MemoryStore::new(25);
        let mut machine = machine_with_store(20, store.clone());
        machine.start();

        // First food: score 10, below the stored high score
        machine.place_food(Cell::new(11, 10));
        machine.tick();
        assert_eq!(machine.snapshot().score, 10);
        assert_eq!(machine.snapshot().high_score, 25);
        assert_eq!(store.value(), 25);

        // Second food: 20, still below
        machine.place_food(Cell::new(12, 10));
        machine.tick();
        assert_eq!(store.value(), 25);

        // Third food: 30 beats 25 and is written through
        machine.place_food(Cell::new(13, 10));
        machine.tick();
        assert_eq!(machine.snapshot().score, 30);
        assert_eq!(machine.snapshot().high_score, 30);
        assert_eq!(store.value(), 30);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let store = MemoryStore::default();
        let mut machine = machine_with_store(20, store.clone());
        machine.start();

        machine.place_food(Cell::new(11, 10));
        machine.tick();
        assert_eq!(store.value(), 10);

        machine.restart();
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Ready);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.high_score, 10);
        assert_eq!(snapshot.cells, &[Cell::new(10, 10)]);
    }

    #[test]
    fn test_wall_collision_ends_run() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));

        // Head starts at (10,10) heading right; nine ticks reach (19,10)
        for _ in 0..9 {
            let outcome = machine.tick();
            assert_eq!(outcome.collision, None);
        }
        assert_eq!(machine.snapshot().cells, &[Cell::new(19, 10)]);

        let outcome = machine.tick();
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(machine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_self_collision_ends_run() {
        let mut machine = playing_machine(20);

        // Grow to length five along a hook shape
        machine.place_food(Cell::new(11, 10));
        machine.tick();
        machine.place_food(Cell::new(12, 10));
        machine.tick();
        machine.request_direction(Direction::Down);
        machine.place_food(Cell::new(12, 11));
        machine.tick();
        machine.request_direction(Direction::Left);
        machine.place_food(Cell::new(11, 11));
        machine.tick();
        assert_eq!(machine.snapshot().cells.len(), 5);
        assert_eq!(machine.snapshot().score, 40);

        // Turning up walks the head into the body at (11,10)
        machine.request_direction(Direction::Up);
        machine.place_food(Cell::new(0, 0));
        let outcome = machine.tick();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert!(!outcome.ate_food);
        assert_eq!(machine.phase(), GamePhase::GameOver);
        assert_eq!(machine.snapshot().score, 40);
    }

    #[test]
    fn test_chasing_the_tail_is_legal() {
        let mut machine = playing_machine(20);

        // Grow to a 2x2 ring: (10,11) (11,11) (11,10) (10,10)
        machine.place_food(Cell::new(11, 10));
        machine.tick();
        machine.request_direction(Direction::Down);
        machine.place_food(Cell::new(11, 11));
        machine.tick();
        machine.request_direction(Direction::Left);
        machine.place_food(Cell::new(10, 11));
        machine.tick();
        assert_eq!(machine.snapshot().cells.len(), 4);

        // Each step enters the cell the tail vacates the same tick
        machine.place_food(Cell::new(0, 0));
        let turns = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];
        for turn in turns.iter().cycle().take(8) {
            machine.request_direction(*turn);
            let outcome = machine.tick();
            assert_eq!(outcome.collision, None);
            assert_eq!(machine.phase(), GamePhase::Playing);
            assert_eq!(machine.snapshot().cells.len(), 4);
        }
    }

    #[test]
    fn test_pause_roundtrip_changes_nothing() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(11, 10));
        machine.tick();

        let cells = machine.snapshot().cells.to_vec();
        let food = machine.snapshot().food;
        let score = machine.snapshot().score;

        machine.toggle_pause();
        assert_eq!(machine.phase(), GamePhase::Paused);
        machine.tick(); // stale tick while paused
        machine.toggle_pause();
        assert_eq!(machine.phase(), GamePhase::Playing);

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.cells, cells.as_slice());
        assert_eq!(snapshot.food, food);
        assert_eq!(snapshot.score, score);

        // The travelled direction also survived the round trip
        machine.place_food(Cell::new(0, 0));
        machine.tick();
        assert_eq!(machine.snapshot().cells[0], Cell::new(12, 10));
    }

    #[test]
    fn test_pause_is_noop_in_ready_and_game_over() {
        let mut machine = machine_with_store(20, MemoryStore::default());
        machine.toggle_pause();
        assert_eq!(machine.phase(), GamePhase::Ready);

        machine.start();
        machine.place_food(Cell::new(0, 0));
        for _ in 0..10 {
            machine.tick();
        }
        assert_eq!(machine.phase(), GamePhase::GameOver);
        machine.toggle_pause();
        assert_eq!(machine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_start_is_noop_outside_ready() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));
        machine.request_direction(Direction::Down);
        machine.tick();

        // Starting mid-run must not reset the heading to the default
        machine.start();
        machine.tick();
        assert_eq!(machine.snapshot().cells, &[Cell::new(10, 12)]);

        for _ in 0..20 {
            machine.tick();
        }
        assert_eq!(machine.phase(), GamePhase::GameOver);
        machine.start();
        assert_eq!(machine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_restart_works_from_any_phase() {
        // From Playing
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(0, 0));
        machine.tick();
        machine.restart();
        assert_eq!(machine.phase(), GamePhase::Ready);
        assert_eq!(machine.snapshot().cells, &[Cell::new(10, 10)]);

        // From Paused
        machine.start();
        machine.toggle_pause();
        machine.restart();
        assert_eq!(machine.phase(), GamePhase::Ready);

        // From GameOver
        machine.start();
        machine.place_food(Cell::new(0, 0));
        for _ in 0..10 {
            machine.tick();
        }
        assert_eq!(machine.phase(), GamePhase::GameOver);
        machine.restart();
        assert_eq!(machine.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_difficulty_change_keeps_run_data() {
        let mut machine = playing_machine(20);
        assert_eq!(machine.tick_interval(), Duration::from_millis(150));

        machine.place_food(Cell::new(11, 10));
        machine.tick();

        machine.set_difficulty(Difficulty::Hard);
        assert_eq!(machine.tick_interval(), Duration::from_millis(100));

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.score, 10);
        assert_eq!(snapshot.cells.len(), 2);
        assert_eq!(snapshot.difficulty, Difficulty::Hard);

        // Difficulty survives a restart
        machine.restart();
        assert_eq!(machine.snapshot().difficulty, Difficulty::Hard);
        assert_eq!(machine.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_previous_cells_track_the_last_tick() {
        let mut machine = playing_machine(20);
        machine.place_food(Cell::new(11, 10));

        let before = machine.snapshot().cells.to_vec();
        machine.tick();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.previous_cells, before.as_slice());
        assert_eq!(snapshot.cells, &[Cell::new(11, 10), Cell::new(10, 10)]);
    }
}
