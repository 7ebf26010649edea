use crate::cells::{CellFlags, Direction, Position};
use crate::units::{ColumnsCount, RowsCount};

use itertools::iproduct;
use log::warn;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// A rectangular maze. Every cell starts solid: no passages carved in any direction.
///
/// Passage symmetry is the caller's job. `carve` only touches the one cell it is given, so opening
/// a wall between two cells means carving both sides of it, which is what `Carver` does.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<CellFlags>,
    rows: usize,
    columns: usize,
    carved: usize,
    current: Position,
}

#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    #[error("grid dimensions must be positive with a cell count that fits in usize, got {rows} rows by {columns} columns")]
    InvalidDimension { rows: usize, columns: usize },
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, carved: {:?}, current: {:?}",
               self.rows, self.columns, self.carved, self.current)
    }
}

impl Grid {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid, GridError> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        let size = match rows.checked_mul(columns) {
            Some(size) if size > 0 => size,
            _ => return Err(GridError::InvalidDimension { rows, columns }),
        };

        Ok(Grid {
            cells: vec![CellFlags::empty(); size],
            rows,
            columns,
            carved: 0,
            current: Position::default(),
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells that have had at least one passage carved.
    #[inline]
    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Number of cells still without any passage.
    #[inline]
    pub fn solids(&self) -> usize {
        self.size() - self.carved
    }

    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Convert a position to a one dimensional index in the range 0..grid.size().
    /// Returns None if the position is outside the grid.
    #[inline]
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid(pos) {
            Some(pos.row * self.columns + pos.column)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> Option<CellFlags> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Open the wall of one cell in the given direction.
    /// Returns false, changing nothing, if the position is outside the grid.
    pub fn carve(&mut self, pos: Position, direction: Direction) -> bool {
        if let Some(i) = self.index(pos) {
            if !self.cells[i].intersects(CellFlags::PASSAGES) {
                self.carved += 1;
            }
            self.cells[i].insert(direction.flag());
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn has_passage(&self, pos: Position, direction: Direction) -> bool {
        self.cell(pos).map_or(false, |flags| flags.contains(direction.flag()))
    }

    /// Is the cell uncarved? Positions outside the grid are never solid.
    #[inline]
    pub fn is_solid(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, |flags| !flags.intersects(CellFlags::PASSAGES))
    }

    pub fn visit(&mut self, pos: Position) -> bool {
        if let Some(i) = self.index(pos) {
            self.cells[i].insert(CellFlags::VISITED);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, |flags| flags.contains(CellFlags::VISITED))
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|flags| flags.contains(CellFlags::VISITED)).count()
    }

    pub fn clear_visited(&mut self) {
        for flags in &mut self.cells {
            flags.remove(CellFlags::VISITED);
        }
    }

    /// The position marker shown when rendering.
    #[inline]
    pub fn current(&self) -> Position {
        self.current
    }

    /// Move the position marker. Ignored if the position is outside the grid.
    pub fn goto(&mut self, pos: Position) {
        if self.is_valid(pos) {
            self.current = pos;
        }
    }

    /// The adjacent position in `direction`, if it is inside the grid.
    #[inline]
    pub fn neighbour(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.offset(direction).filter(|&n| self.is_valid(n))
    }

    /// The adjacent position in `direction` if a passage leads there from `pos`.
    #[inline]
    pub fn passage_neighbour(&self, pos: Position, direction: Direction) -> Option<Position> {
        if self.has_passage(pos, direction) {
            self.neighbour(pos, direction)
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.columns))
    }

    /// Every position, row major.
    pub fn iter(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows, 0..self.columns).map(|(row, column)| Position::new(row, column))
    }

    pub fn iter_row(&self) -> impl Iterator<Item = Vec<Position>> {
        let columns = self.columns;
        (0..self.rows).map(move |row| (0..columns).map(|column| Position::new(row, column)).collect())
    }

    /// Each undirected passage once, as seen from its upper or left cell. A passage only counts when
    /// both sides of the wall are carved.
    pub fn passages<'a>(&'a self) -> impl Iterator<Item = (Position, Position)> + 'a {
        self.iter().flat_map(move |pos| {
            [Direction::Bottom, Direction::Right]
                .iter()
                .filter_map(move |&dir| {
                    self.passage_neighbour(pos, dir)
                        .filter(|&n| self.has_passage(n, dir.opposite()))
                        .map(|n| (pos, n))
                })
                .collect::<Vec<_>>()
        })
    }

    pub fn passages_count(&self) -> usize {
        self.passages().count()
    }

    /// Number of cells with exactly one way in or out.
    pub fn dead_ends(&self) -> usize {
        self.iter()
            .filter(|&pos| {
                Direction::ALL
                    .iter()
                    .filter(|&&dir| self.passage_neighbour(pos, dir).is_some())
                    .count() == 1
            })
            .count()
    }

    /// The passages as an undirected graph. Node indices are the row major cell indices.
    pub fn passage_graph(&self) -> Graph<(), (), Undirected, u32> {
        let mut graph = Graph::with_capacity(self.size(), self.size());
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for (a, b) in self.passages() {
            if let (Some(a_index), Some(b_index)) = (self.index(a), self.index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Generators expect a fresh grid.
    pub(crate) fn warn_if_carved(&self, generator: &str) {
        if self.carved > 0 {
            warn!("{} running on a grid with {} carved cells", generator, self.carved);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("invalid grid dimensions")
    }

    fn gp(row: usize, column: usize) -> Position {
        Position::new(row, column)
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert_eq!(Grid::new(RowsCount(0), ColumnsCount(5)).unwrap_err(),
                   GridError::InvalidDimension { rows: 0, columns: 5 });
        assert_eq!(Grid::new(RowsCount(5), ColumnsCount(0)).unwrap_err(),
                   GridError::InvalidDimension { rows: 5, columns: 0 });
        assert!(Grid::new(RowsCount(0), ColumnsCount(0)).is_err());
    }

    #[test]
    fn overflowing_cell_count_is_rejected() {
        assert_eq!(Grid::new(RowsCount(usize::MAX), ColumnsCount(2)).unwrap_err(),
                   GridError::InvalidDimension { rows: usize::MAX, columns: 2 });
        assert!(Grid::new(RowsCount(2), ColumnsCount(usize::MAX / 2 + 1)).is_err());
    }

    #[test]
    fn fresh_grid_is_solid() {
        for &(rows, columns) in &[(1, 1), (1, 7), (4, 3), (10, 10)] {
            let g = grid(rows, columns);
            assert_eq!(g.size(), rows * columns);
            assert_eq!(g.solids(), rows * columns);
            assert_eq!(g.carved(), 0);
            assert!(g.iter().all(|pos| g.is_solid(pos) && !g.is_visited(pos)));
            assert_eq!(g.current(), gp(0, 0));
        }
    }

    #[test]
    fn validity() {
        let g = grid(2, 3);
        assert!(g.is_valid(gp(0, 0)));
        assert!(g.is_valid(gp(1, 2)));
        assert!(!g.is_valid(gp(2, 0)));
        assert!(!g.is_valid(gp(0, 3)));
        assert!(!g.is_valid(gp(usize::MAX, usize::MAX)));
    }

    #[test]
    fn carving_counts_each_cell_once() {
        let mut g = grid(3, 3);
        assert!(g.carve(gp(1, 1), Direction::Top));
        assert!(g.carve(gp(1, 1), Direction::Top));
        assert_eq!(g.carved(), 1);
        assert!(g.carve(gp(1, 1), Direction::Left));
        assert_eq!(g.carved(), 1);
        assert_eq!(g.solids(), 8);

        assert!(g.has_passage(gp(1, 1), Direction::Top));
        assert!(g.has_passage(gp(1, 1), Direction::Left));
        assert!(!g.has_passage(gp(1, 1), Direction::Bottom));
        assert!(!g.is_solid(gp(1, 1)));

        // carve only touches one side of the wall
        assert!(g.is_solid(gp(0, 1)));
        assert!(!g.has_passage(gp(0, 1), Direction::Bottom));
    }

    #[test]
    fn out_of_bounds_access_is_a_no_op() {
        let mut g = grid(2, 2);
        assert!(!g.carve(gp(2, 0), Direction::Top));
        assert!(!g.visit(gp(0, 2)));
        assert!(!g.has_passage(gp(5, 5), Direction::Left));
        assert!(!g.is_solid(gp(5, 5)));
        assert!(!g.is_visited(gp(5, 5)));
        assert_eq!(g.carved(), 0);
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn visiting_does_not_affect_solidity() {
        let mut g = grid(2, 2);
        assert!(g.visit(gp(1, 0)));
        assert!(g.is_visited(gp(1, 0)));
        assert!(g.is_solid(gp(1, 0)));
        assert_eq!(g.solids(), 4);
        assert_eq!(g.visited_count(), 1);

        g.clear_visited();
        assert!(!g.is_visited(gp(1, 0)));
    }

    #[test]
    fn goto_ignores_invalid_positions() {
        let mut g = grid(2, 2);
        g.goto(gp(1, 1));
        assert_eq!(g.current(), gp(1, 1));
        g.goto(gp(2, 1));
        assert_eq!(g.current(), gp(1, 1));
    }

    #[test]
    fn neighbours() {
        let g = grid(2, 2);
        assert_eq!(g.neighbour(gp(0, 0), Direction::Top), None);
        assert_eq!(g.neighbour(gp(0, 0), Direction::Left), None);
        assert_eq!(g.neighbour(gp(0, 0), Direction::Bottom), Some(gp(1, 0)));
        assert_eq!(g.neighbour(gp(0, 0), Direction::Right), Some(gp(0, 1)));
        assert_eq!(g.neighbour(gp(1, 1), Direction::Bottom), None);
        assert_eq!(g.neighbour(gp(1, 1), Direction::Right), None);
    }

    #[test]
    fn cell_iter() {
        let g = grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<Position>>(),
                   &[gp(0, 0), gp(0, 1), gp(1, 0), gp(1, 1)]);
        assert_eq!(g.iter_row().collect::<Vec<Vec<Position>>>(),
                   &[&[gp(0, 0), gp(0, 1)], &[gp(1, 0), gp(1, 1)]]);
    }

    #[test]
    fn random_cell_is_valid() {
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        let g = grid(3, 5);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(g.is_valid(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn passages_need_both_sides() {
        let mut g = grid(2, 2);
        g.carve(gp(0, 0), Direction::Right);
        assert_eq!(g.passages_count(), 0);

        g.carve(gp(0, 1), Direction::Left);
        g.carve(gp(0, 0), Direction::Bottom);
        g.carve(gp(1, 0), Direction::Top);
        assert_eq!(g.passages().collect::<Vec<_>>(),
                   vec![(gp(0, 0), gp(1, 0)), (gp(0, 0), gp(0, 1))]);

        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn dead_end_count() {
        let mut g = grid(1, 3);
        g.carve(gp(0, 0), Direction::Right);
        g.carve(gp(0, 1), Direction::Left);
        g.carve(gp(0, 1), Direction::Right);
        g.carve(gp(0, 2), Direction::Left);
        assert_eq!(g.dead_ends(), 2);
    }
}
