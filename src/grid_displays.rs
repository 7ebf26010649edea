use std::fmt;

use crate::cells::{Direction, Position};
use crate::grid::Grid;

// Each cell is three characters wide: its left wall, a body marker and its bottom wall.
// The top border is drawn once, the right border once per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_TOP: &str = " __";
        const OPEN_TOP: &str = "   ";
        const WALL_SIDE: char = '|';
        const WALL_BOTTOM: char = '_';
        const OPEN: char = ' ';
        const CURRENT: char = 'X';
        const VISITED: char = '*';

        let columns = self.columns().0;

        let mut output = String::new();
        for column in 0..columns {
            let top_open = self.has_passage(Position::new(0, column), Direction::Top);
            output.push_str(if top_open { OPEN_TOP } else { WALL_TOP });
        }
        output.push('\n');

        for row in self.iter_row() {
            for &pos in &row {
                let bottom = if self.has_passage(pos, Direction::Bottom) { OPEN } else { WALL_BOTTOM };
                output.push(if self.has_passage(pos, Direction::Left) { OPEN } else { WALL_SIDE });
                output.push(if pos == self.current() {
                    CURRENT
                } else if self.is_visited(pos) {
                    VISITED
                } else {
                    bottom
                });
                output.push(bottom);
            }
            let last = Position::new(row[0].row, columns - 1);
            output.push(if self.has_passage(last, Direction::Right) { OPEN } else { WALL_SIDE });
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::carver::Carver;
    use crate::pathing::Solver;
    use crate::units::{ColumnsCount, RowsCount};

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("invalid grid dimensions")
    }

    fn gp(row: usize, column: usize) -> Position {
        Position::new(row, column)
    }

    #[test]
    fn solid_grid() {
        let g = grid(2, 3);
        assert_eq!(g.to_string(),
                   concat!(" __ __ __\n",
                           "|X_|__|__|\n",
                           "|__|__|__|\n"));
    }

    #[test]
    fn passages_visits_and_marker() {
        let mut g = grid(2, 2);
        {
            let mut carver = Carver::new(&mut g);
            let at = carver.carve_bottom(gp(0, 0));
            carver.carve_right(at);
        }
        Solver::new(&mut g).distance(gp(0, 0), gp(1, 1)).expect("cells are connected");
        g.goto(gp(1, 1));

        assert_eq!(g.to_string(),
                   concat!(" __ __\n",
                           "|* |__|\n",
                           "|*_ X_|\n"));
    }

    #[test]
    fn open_outer_walls() {
        let mut g = grid(1, 2);
        g.carve(gp(0, 0), Direction::Top);
        g.carve(gp(0, 1), Direction::Right);
        g.goto(gp(0, 1));
        assert_eq!(g.to_string(),
                   concat!("    __\n",
                           "|__|X_ \n"));
    }
}
