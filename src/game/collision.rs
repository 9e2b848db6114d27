use super::{
    grid::{Cell, Grid},
    snake::Snake,
};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Check if a head cell is outside the board
pub fn wall_collision(head: Cell, grid: &Grid) -> bool {
    !grid.contains(head)
}

/// Check if the head overlaps any later segment
pub fn self_collision(snake: &Snake) -> bool {
    snake.collides_with_body(snake.head())
}

/// Classify the collision of an already-moved snake, wall checked first.
///
/// Runs after the advance, so in the no-growth case the vacated tail cell
/// is already gone and moving into it is not a self collision.
pub fn detect(snake: &Snake, grid: &Grid) -> Option<CollisionType> {
    if wall_collision(snake.head(), grid) {
        return Some(CollisionType::Wall);
    }

    if self_collision(snake) {
        return Some(CollisionType::SelfCollision);
    }

    None
}
