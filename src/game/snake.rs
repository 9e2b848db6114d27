use super::{direction::Direction, grid::Cell};

/// The snake: ordered body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Create a single-segment snake at the given cell
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake of the given length, trailing away opposite to `direction`
    pub fn with_length(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Segments excluding the head
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if a cell collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().contains(&cell)
    }

    /// Check if any segment (head included) occupies a cell
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Advance one step in `direction`, keeping the tail if `grow` is true
    pub fn advance(&mut self, direction: Direction, grow: bool) {
        let new_head = self.head().moved_in_direction(direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
