use crate::cells::{Direction, Position};
use crate::grid::Grid;

/// Carves passages through a borrowed `Grid`.
///
/// The carving position is not kept inside the carver. Each call takes the position to carve from
/// and hands back where the cursor ends up, so a generator owns its own walk.
/// When either the position or the neighbour in the requested direction is outside the grid the
/// grid is left alone and the same position comes back.
#[derive(Debug)]
pub struct Carver<'a> {
    grid: &'a mut Grid,
}

impl<'a> Carver<'a> {
    pub fn new(grid: &'a mut Grid) -> Carver<'a> {
        Carver { grid }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// `to` if it lies inside the grid, otherwise stay at `from`.
    #[inline]
    pub fn goto(&self, from: Position, to: Position) -> Position {
        if self.grid.is_valid(to) {
            to
        } else {
            from
        }
    }

    /// Open the wall between `at` and its neighbour in `direction` and step into the neighbour.
    pub fn carve(&mut self, at: Position, direction: Direction) -> Position {
        match self.target(at, direction) {
            Some(next) => {
                self.carve_between(at, next, direction);
                next
            }
            None => at,
        }
    }

    /// Always step into the neighbour in `direction`, but only open the wall if the neighbour was
    /// still solid before the step.
    pub fn go_carve_if_solid(&mut self, at: Position, direction: Direction) -> Position {
        match self.target(at, direction) {
            Some(next) => {
                if self.grid.is_solid(next) {
                    self.carve_between(at, next, direction);
                }
                next
            }
            None => at,
        }
    }

    pub fn carve_bottom(&mut self, at: Position) -> Position {
        self.carve(at, Direction::Bottom)
    }

    pub fn carve_top(&mut self, at: Position) -> Position {
        self.carve(at, Direction::Top)
    }

    pub fn carve_right(&mut self, at: Position) -> Position {
        self.carve(at, Direction::Right)
    }

    pub fn carve_left(&mut self, at: Position) -> Position {
        self.carve(at, Direction::Left)
    }

    pub fn go_bottom_carve_if_solid(&mut self, at: Position) -> Position {
        self.go_carve_if_solid(at, Direction::Bottom)
    }

    pub fn go_top_carve_if_solid(&mut self, at: Position) -> Position {
        self.go_carve_if_solid(at, Direction::Top)
    }

    pub fn go_right_carve_if_solid(&mut self, at: Position) -> Position {
        self.go_carve_if_solid(at, Direction::Right)
    }

    pub fn go_left_carve_if_solid(&mut self, at: Position) -> Position {
        self.go_carve_if_solid(at, Direction::Left)
    }

    fn target(&self, at: Position, direction: Direction) -> Option<Position> {
        if self.grid.is_valid(at) {
            self.grid.neighbour(at, direction)
        } else {
            None
        }
    }

    fn carve_between(&mut self, at: Position, next: Position, direction: Direction) {
        self.grid.carve(at, direction);
        self.grid.carve(next, direction.opposite());
    }
}
