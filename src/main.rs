use bitmazes::{
    cells::{Direction, Position},
    generators,
    grid::Grid,
    mover::Mover,
    pathing::{PathingError, Solver},
    units::{ColumnsCount, RowsCount},
};
use docopt::Docopt;
use log::{info, warn};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Bitmazes

Usage:
    bitmazes_driver -h | --help
    bitmazes_driver (binary|aldous-broder|recursive-backtracker) [options]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of rows in the grid [default: 10].
    --columns=<c>          Number of columns in the grid [default: 10].
    --seed=<s>             Seed for the random number generator. Drawn at random and logged if not given.
    --solve                Mark a shortest path between the start and end point.
    --longest              Use the two ends of the longest path as the start and end point.
    --from-row=<fr>        Row of the path start, the first row if not given.
    --from-column=<fc>     Column of the path start, the first column if not given.
    --to-row=<tr>          Row of the path end, the last row if not given.
    --to-column=<tc>       Column of the path end, the last column if not given.
    --flood-fill           Mark every cell reachable from the top left corner.
    --walk=<moves>         Walk the position marker through passages, one of t b l r (top, bottom, left, right) per step.
    --text-out=<path>      Output file path for the text rendering of the maze. Printed to stdout if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_binary: bool,
    cmd_aldous_broder: bool,
    cmd_recursive_backtracker: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_solve: bool,
    flag_longest: bool,
    flag_from_row: Option<usize>,
    flag_from_column: Option<usize>,
    flag_to_row: Option<usize>,
    flag_to_column: Option<usize>,
    flag_flood_fill: bool,
    flag_walk: String,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            InvalidGrid(::bitmazes::grid::GridError);
            Pathing(::bitmazes::pathing::PathingError);
        }

        errors {
            InvalidMove(step: char) {
                description("invalid walk step")
                display("unknown walk step '{}', expected one of t b l r", step)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("maze seed {}", seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mut maze_grid = Grid::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))?;
    generate_maze_on_grid(&mut maze_grid, &args, &mut rng);
    info!("{} passages, {} dead ends", maze_grid.passages_count(), maze_grid.dead_ends());

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_solve {

        mark_path(&mut maze_grid, &args)?;
    }

    if args.flag_flood_fill {

        let reached = Solver::new(&mut maze_grid).flood_fill(Position::default());
        info!("{} of {} cells reachable from the top left corner", reached, maze_grid.size());
    }

    if !args.flag_walk.is_empty() {

        walk(&mut maze_grid, &args.flag_walk)?;
    }

    if args.flag_text_out.is_empty() {
        print!("{}", maze_grid);
    } else {
        write_text_to_file(&maze_grid.to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn generate_maze_on_grid(maze_grid: &mut Grid, maze_args: &MazeArgs, rng: &mut XorShiftRng) {

    if maze_args.cmd_binary {
        generators::binary_tree(maze_grid, rng);
    } else if maze_args.cmd_aldous_broder {
        generators::aldous_broder(maze_grid, rng);
    } else if maze_args.cmd_recursive_backtracker {
        generators::recursive_backtracker(maze_grid, rng);
    }
}

/// Pick the path ends from the arguments: the longest path if asked for, otherwise any given
/// coordinates with the top left and bottom right corners filling the gaps.
fn path_end_points(maze_grid: &mut Grid, maze_args: &MazeArgs) -> (Position, Position) {

    if maze_args.flag_longest {
        Solver::new(maze_grid).longest_path_endpoints()
    } else {
        let (RowsCount(rows), ColumnsCount(columns)) = (maze_grid.rows(), maze_grid.columns());
        let start = Position::new(maze_args.flag_from_row.unwrap_or(0),
                                  maze_args.flag_from_column.unwrap_or(0));
        let end = Position::new(maze_args.flag_to_row.unwrap_or(rows - 1),
                                maze_args.flag_to_column.unwrap_or(columns - 1));
        (start, end)
    }
}

fn mark_path(maze_grid: &mut Grid, maze_args: &MazeArgs) -> Result<()> {

    let (start, end) = path_end_points(maze_grid, maze_args);
    match Solver::new(maze_grid).distance(start, end) {
        Ok(distance) => info!("shortest path from {} to {} is {} steps", start, end, distance),
        // Out of grid end points, or a maze that is not fully connected
        Err(PathingError::Unreachable) => warn!("no path from {} to {}", start, end),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn walk(maze_grid: &mut Grid, moves: &str) -> Result<()> {

    let mut mover = Mover::new(maze_grid);
    for step in moves.chars() {
        let direction = match step {
            't' => Direction::Top,
            'b' => Direction::Bottom,
            'l' => Direction::Left,
            'r' => Direction::Right,
            other => return Err(ErrorKind::InvalidMove(other).into()),
        };
        if !mover.go(direction) {
            warn!("walk blocked going {:?} from {}", direction, mover.position());
        }
    }
    info!("walk ended at {}", mover.position());

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let graph = maze_grid.passage_graph();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
