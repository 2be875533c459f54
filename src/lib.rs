//! **mazes** generates perfect mazes on rectangular grids and finds routes through them.
//!
//! A `Grid` starts fully walled; `generators::recursive_backtracker` carves it into a spanning
//! tree, `pathing::find_path` runs A* with one of the `heuristics`, and an `agent::Agent`
//! wanders the maze from one random goal to the next.

pub mod agent;
pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod heuristics;
pub mod pathing;
pub mod units;
mod utils;
