//! **bitmazes** is a maze generation and solving library over a grid of bitmask cells.
//!
//! A `Grid` starts out solid. Generators open passages through it with a `Carver`, a `Solver`
//! marks what is reachable and how far apart two cells are, and a `Mover` walks a position
//! marker along passages that already exist.

pub mod carver;
pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod mover;
pub mod pathing;
pub mod units;
