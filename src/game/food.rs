use super::{
    grid::{Cell, Grid},
    snake::Snake,
};
use rand::Rng;

/// Random placements tried before falling back to scanning for free cells
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// Spawn food on a uniformly random free cell, `None` when the board is full.
///
/// Rejection sampling first; on a dense board the scan fallback keeps the
/// work bounded by the board size.
pub fn spawn(rng: &mut impl Rng, grid: &Grid, snake: &Snake) -> Option<Cell> {
    if snake.len() >= grid.capacity() {
        return None;
    }

    let size = grid.size() as i32;
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|&cell| !snake.occupies(cell)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.gen_range(0..free.len())])
}
