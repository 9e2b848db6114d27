use super::direction::Direction;

/// A cell on the board. `x` is the column, `y` the row, growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The square board, `size` cells per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells on the board
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Check if a cell is within the board bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size as i32 && cell.y >= 0 && cell.y < self.size as i32
    }

    /// The starting cell for a fresh snake
    pub fn center(&self) -> Cell {
        let mid = (self.size / 2) as i32;
        Cell::new(mid, mid)
    }

    /// All cells of the board in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
    }
}
