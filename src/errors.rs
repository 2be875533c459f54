//! Crate wide error type, generated with `error_chain!`.
//!
//! Other modules `use errors::*` style imports to get `Error`, `ErrorKind`, `Result`
//! and the `chain_err` extension.

use error_chain::*;

use crate::cells::GridCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions: {} rows by {} columns", rows, columns)
        }
        NonAdjacentCells(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not adjacent")
            display("cells {} and {} are not adjacent within the grid", a, b)
        }
        InvalidCoordinate(coord: GridCoordinate) {
            description("coordinate outside of the grid")
            display("coordinate {} is outside of the grid", coord)
        }
        NoGoalSet {
            description("no goal set")
            display("path finding requested before a goal was set")
        }
        PathNotFound(start: GridCoordinate, goal: GridCoordinate) {
            description("no path found")
            display("no path exists from {} to {}", start, goal)
        }
        UnknownHeuristic(name: String) {
            description("unknown heuristic")
            display("unknown heuristic '{}', expected manhattan, euclidean or diagonal", name)
        }
    }
}
