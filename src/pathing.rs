use bit_set::BitSet;
use log::{debug, trace};
use smallvec::SmallVec;
use thiserror::Error;

use crate::cells::{Direction, Position};
use crate::grid::Grid;

#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum PathingError {
    #[error("no passage route connects the two positions")]
    Unreachable,
    /// Depth recording went wrong. Not expected outside of a bug in the search.
    #[error("no predecessor found while marking the path back through {at}")]
    BrokenTrail { at: Position },
}

/// Distances from one start cell to every cell reachable from it.
///
/// Stored as depths: 0 for a cell that was never reached, otherwise the distance from the start
/// plus one.
#[derive(Debug, Clone)]
pub struct Distances {
    start: Position,
    rows: usize,
    columns: usize,
    depths: Vec<usize>,
    max_distance: usize,
}

impl Distances {
    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    pub fn distance_to(&self, pos: Position) -> Option<usize> {
        match self.depth(pos) {
            0 => None,
            depth => Some(depth - 1),
        }
    }

    pub fn furthest_points(&self) -> SmallVec<[Position; 8]> {
        let furthest_depth = self.max_distance + 1;
        let columns = self.columns;
        self.depths
            .iter()
            .enumerate()
            .filter(|&(_, &depth)| depth == furthest_depth)
            .map(|(i, _)| Position::new(i / columns, i % columns))
            .collect()
    }

    #[inline]
    fn depth(&self, pos: Position) -> usize {
        if pos.row < self.rows && pos.column < self.columns {
            self.depths[pos.row * self.columns + pos.column]
        } else {
            0
        }
    }
}

/// Traversals over a borrowed grid. Anything the solver marks uses the grid's VISITED bits.
#[derive(Debug)]
pub struct Solver<'a> {
    grid: &'a mut Grid,
}

impl<'a> Solver<'a> {
    pub fn new(grid: &'a mut Grid) -> Solver<'a> {
        Solver { grid }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Mark every cell reachable from `start` as visited. Returns how many cells were reached.
    ///
    /// Depth first over an explicit stack. A cell can be pushed more than once, the seen check on
    /// pop discards the duplicates.
    pub fn flood_fill(&mut self, start: Position) -> usize {
        let mut seen = BitSet::with_capacity(self.grid.size());
        let mut stack = vec![start];

        while let Some(pos) = stack.pop() {
            if let Some(index) = self.grid.index(pos) {
                if seen.insert(index) {
                    self.grid.visit(pos);
                    for &dir in &Direction::ALL {
                        if let Some(next) = self.grid.passage_neighbour(pos, dir) {
                            stack.push(next);
                        }
                    }
                }
            }
        }

        debug!("flood fill from {} reached {} cells", start, seen.len());
        seen.len()
    }

    /// Frontier search from `from`, or None if `from` is outside the grid.
    pub fn distances(&self, from: Position) -> Option<Distances> {
        if self.grid.is_valid(from) {
            Some(frontier_search(self.grid, from, None))
        } else {
            None
        }
    }

    /// Length of the shortest passage route from `from` to `to`.
    ///
    /// On success one shortest route is marked visited, walking back from `to` and preferring the
    /// bottom, top, right and then left neighbour whenever more than one is a step closer.
    /// Each step back only goes to a neighbour joined to the current cell by a passage, a cell one
    /// step closer on the far side of a wall is never taken.
    pub fn distance(&mut self, from: Position, to: Position) -> Result<usize, PathingError> {
        if !self.grid.is_valid(from) || !self.grid.is_valid(to) {
            return Err(PathingError::Unreachable);
        }

        let distances = frontier_search(self.grid, from, Some(to));
        let distance = distances.distance_to(to).ok_or(PathingError::Unreachable)?;
        self.mark_trail(&distances, to)?;

        debug!("distance from {} to {} is {}", from, to, distance);
        Ok(distance)
    }

    /// Both ends of a longest route through the maze: the furthest cell from the origin, and then
    /// the furthest cell from that one.
    pub fn longest_path_endpoints(&self) -> (Position, Position) {
        let origin = Position::default();
        let from_origin = frontier_search(self.grid, origin, None);
        let start = from_origin.furthest_points().first().cloned().unwrap_or(origin);

        let from_start = frontier_search(self.grid, start, None);
        let end = from_start.furthest_points().first().cloned().unwrap_or(start);
        (start, end)
    }

    fn mark_trail(&mut self, distances: &Distances, end: Position) -> Result<(), PathingError> {
        let mut at = end;
        let mut depth = distances.depth(at);
        self.grid.visit(at);

        while depth > 1 {
            let grid = &*self.grid;
            let previous = Direction::ALL
                .iter()
                .filter_map(|&dir| {
                    grid.neighbour(at, dir).filter(|&n| {
                        distances.depth(n) == depth - 1 && grid.has_passage(n, dir.opposite())
                    })
                })
                .next()
                .ok_or(PathingError::BrokenTrail { at })?;

            trace!("path {} <- {}", at, previous);
            self.grid.visit(previous);
            at = previous;
            depth -= 1;
        }

        Ok(())
    }
}

/// Level by level search. Every cell in one frontier is at the same distance, so the first depth
/// written for a cell is already its shortest distance and is never overwritten.
/// Stops early once `stop_at` has a depth.
fn frontier_search(grid: &Grid, start: Position, stop_at: Option<Position>) -> Distances {
    let mut depths = vec![0; grid.size()];
    if let Some(start_index) = grid.index(start) {
        depths[start_index] = 1;
    }
    let stop_index = stop_at.and_then(|pos| grid.index(pos));

    let mut max_distance = 0;
    let mut depth = 1;
    let mut frontier = vec![start];
    while !frontier.is_empty() {
        if stop_index.map_or(false, |i| depths[i] != 0) {
            break;
        }

        let mut new_frontier = vec![];
        for &cell in &frontier {
            for &dir in &Direction::ALL {
                let next_index = grid.passage_neighbour(cell, dir)
                    .and_then(|next| grid.index(next).map(|i| (next, i)));
                if let Some((next, i)) = next_index {
                    if depths[i] == 0 {
                        depths[i] = depth + 1;
                        new_frontier.push(next);
                    }
                }
            }
        }
        if !new_frontier.is_empty() {
            max_distance = depth;
        }
        frontier = new_frontier;
        depth += 1;
    }

    let (rows, columns) = (grid.rows().0, grid.columns().0);
    Distances {
        start,
        rows,
        columns,
        depths,
        max_distance,
    }
}
