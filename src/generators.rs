use log::debug;
use rand::Rng;
use smallvec::SmallVec;

use crate::carver::Carver;
use crate::cells::Direction;
use crate::grid::Grid;

/// Apply the binary tree maze generation algorithm to a grid.
/// Every cell flips a coin: heads carves a passage to the cell below, tails to the cell on the
/// right. Cells on the bottom row or the rightmost column have only one way to go and take it
/// whatever the coin says. The bottom right corner carves nothing.
/// The result is a perfect maze with long open corridors along the bottom row and right column.
pub fn binary_tree<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.warn_if_carved("binary tree");

    let cells = grid.iter().collect::<Vec<_>>();
    let mut carver = Carver::new(grid);
    for pos in cells {
        let below = carver.grid().neighbour(pos, Direction::Bottom);
        let right = carver.grid().neighbour(pos, Direction::Right);
        let direction = match (below, right) {
            (Some(_), Some(_)) => {
                if rng.gen_bool(0.5) {
                    Direction::Bottom
                } else {
                    Direction::Right
                }
            }
            (Some(_), None) => Direction::Bottom,
            (None, Some(_)) => Direction::Right,
            (None, None) => continue,
        };
        carver.carve(pos, direction);
    }
}

/// Apply the Aldous-Broder maze generation algorithm to a grid.
/// A random walk from a random cell that only carves when it steps into a cell no walk has
/// reached yet. Every spanning tree of the grid is equally likely, at the cost of a walk that can
/// run many times longer than the number of cells: it ends once no solid cell is left.
pub fn aldous_broder<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.warn_if_carved("aldous-broder");

    // A lone cell has no neighbour to carve towards and so stays solid forever.
    if grid.size() < 2 {
        return;
    }

    let mut at = grid.random_cell(rng);
    let mut steps: u64 = 0;
    let mut carver = Carver::new(grid);
    while carver.grid().solids() > 0 {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        at = carver.go_carve_if_solid(at, direction);
        steps += 1;
    }

    debug!("aldous-broder took {} random steps", steps);
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
/// Carves a random walk into solid cells until it is boxed in, then backs up along its own trail
/// to the most recent cell that still has a solid neighbour and carries on from there.
/// Long winding corridors with few dead ends. The recursion is an explicit stack.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.warn_if_carved("recursive backtracker");

    let start = grid.random_cell(rng);
    let mut carved_steps = 0;
    let mut carver = Carver::new(grid);
    let mut stack = vec![start];

    // The top of the stack stays put until it has no solid neighbour left.
    while let Some(&at) = stack.last() {
        let choices = Direction::ALL
            .iter()
            .cloned()
            .filter(|&dir| {
                carver.grid()
                    .neighbour(at, dir)
                    .map_or(false, |next| carver.grid().is_solid(next))
            })
            .collect::<SmallVec<[Direction; 4]>>();
        if choices.is_empty() {
            stack.pop();
            continue;
        }

        let direction = choices[rng.gen_range(0..choices.len())];
        stack.push(carver.carve(at, direction));
        carved_steps += 1;
    }

    debug!("recursive backtracker carved {} passages", carved_steps);
}
