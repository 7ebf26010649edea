use crate::cells::{Direction, Position};
use crate::grid::Grid;

/// Walks the grid's position marker through passages that already exist. Never carves.
#[derive(Debug)]
pub struct Mover<'a> {
    grid: &'a mut Grid,
}

impl<'a> Mover<'a> {
    pub fn new(grid: &'a mut Grid) -> Mover<'a> {
        Mover { grid }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.grid.current()
    }

    /// Step the marker one cell in `direction`.
    /// Returns false and stays put when the neighbour is outside the grid or a wall is in the way.
    pub fn go(&mut self, direction: Direction) -> bool {
        let from = self.grid.current();
        match self.grid.passage_neighbour(from, direction) {
            Some(to) => {
                self.grid.goto(to);
                true
            }
            None => false,
        }
    }

    pub fn go_bottom(&mut self) -> bool {
        self.go(Direction::Bottom)
    }

    pub fn go_top(&mut self) -> bool {
        self.go(Direction::Top)
    }

    pub fn go_right(&mut self) -> bool {
        self.go(Direction::Right)
    }

    pub fn go_left(&mut self) -> bool {
        self.go(Direction::Left)
    }
}
