use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Per cell state. The four directional bits record carved passages, `VISITED` is only ever
    /// set by traversals and has no bearing on whether a cell is solid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const TOP     = 0b0000_0001;
        const BOTTOM  = 0b0000_0010;
        const RIGHT   = 0b0000_0100;
        const LEFT    = 0b0000_1000;
        const VISITED = 0b0001_0000;

        const PASSAGES = Self::TOP.bits() | Self::BOTTOM.bits() | Self::RIGHT.bits() | Self::LEFT.bits();
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Position {
        Position { row, column }
    }

    /// The position one step away in `direction`.
    /// Returns None if that would need a negative row or column. No upper bound is checked here,
    /// only the grid knows its own dimensions.
    #[inline]
    pub fn offset(self, direction: Direction) -> Option<Position> {
        let Position { row, column } = self;
        match direction {
            Direction::Top => row.checked_sub(1).map(|r| Position::new(r, column)),
            Direction::Bottom => Some(Position::new(row + 1, column)),
            Direction::Right => Some(Position::new(row, column + 1)),
            Direction::Left => column.checked_sub(1).map(|c| Position::new(row, c)),
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from(row_column_pair: (usize, usize)) -> Position {
        Position::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Right,
    Left,
}

impl Direction {
    /// Every direction, in the order traversals push neighbours and path marking prefers them.
    pub const ALL: [Direction; 4] = [Direction::Bottom, Direction::Top, Direction::Right, Direction::Left];

    #[inline]
    pub fn flag(self) -> CellFlags {
        match self {
            Direction::Top => CellFlags::TOP,
            Direction::Bottom => CellFlags::BOTTOM,
            Direction::Right => CellFlags::RIGHT,
            Direction::Left => CellFlags::LEFT,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}
