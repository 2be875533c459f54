use bit_set::BitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, trace};

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;

/// Progress notifications emitted while a maze is carved, e.g. to animate generation.
///
/// Both callbacks default to doing nothing. Any `FnMut(GridCoordinate, usize)` closure is an
/// observer of visited cells.
pub trait GenerationObserver {
    /// `visit_index` counts visited cells from 0 (the start cell).
    fn on_cell_visited(&mut self, _coord: GridCoordinate, _visit_index: usize) {}

    fn on_passage_carved(&mut self, _from: GridCoordinate, _to: GridCoordinate) {}
}

/// Observer that ignores everything.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

impl<F: FnMut(GridCoordinate, usize)> GenerationObserver for F {
    fn on_cell_visited(&mut self, coord: GridCoordinate, visit_index: usize) {
        self(coord, visit_index)
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// Starting at `start` it walks randomly to unvisited neighbours, carving a passage on each
/// step. When the walk is boxed in by visited cells it backtracks to the most recent cell that
/// still has unvisited neighbours. The result is a perfect maze: a spanning tree over all
/// cells, with exactly one path between any two of them.
///
/// The backtracking is done with an explicit stack rather than recursion so large grids cannot
/// overflow the call stack.
pub fn recursive_backtracker<R>(grid: &mut Grid, start: GridCoordinate, rng: &mut R) -> Result<()>
    where R: Rng + ?Sized
{
    recursive_backtracker_observed(grid, start, rng, &mut NoopObserver)
}

/// `recursive_backtracker` reporting each visited cell and carved passage to `observer`.
pub fn recursive_backtracker_observed<R, O>(grid: &mut Grid,
                                            start: GridCoordinate,
                                            rng: &mut R,
                                            observer: &mut O)
                                            -> Result<()>
    where R: Rng + ?Sized,
          O: GenerationObserver + ?Sized
{
    let start_index = grid.coordinate_to_index(start)
                          .ok_or_else(|| ErrorKind::InvalidCoordinate(start))?;
    let cells_count = grid.size();

    let mut visited = BitSet::with_capacity(cells_count);
    let _ = visited.insert(start_index);
    let mut visited_count = 1;
    observer.on_cell_visited(start, 0);

    // Cells that had more than one way forward when we left them.
    let mut backtrack_stack: Vec<GridCoordinate> = Vec::new();
    let mut current = start;

    while visited_count < cells_count {

        let unvisited = unvisited_neighbours(grid, current, &visited);

        if let Some(&next) = unvisited.choose(rng) {

            if unvisited.len() > 1 {
                backtrack_stack.push(current);
            }
            grid.remove_wall_between(current, next)?;
            observer.on_passage_carved(current, next);
            trace!(from = %current, to = %next, "carved passage");

            if let Some(next_index) = grid.coordinate_to_index(next) {
                let _ = visited.insert(next_index);
            }
            observer.on_cell_visited(next, visited_count);
            visited_count += 1;
            current = next;

        } else {

            let resume_point = pop_until_unvisited_neighbour(grid, &mut backtrack_stack, &visited);
            match resume_point {
                Some(cell) => current = cell,
                None => {
                    // Every visited cell with unvisited neighbours is on the stack or current,
                    // so on a connected grid this is unreachable.
                    error!(visited = visited_count,
                           cells = cells_count,
                           "backtrack stack exhausted with unvisited cells remaining");
                    break;
                }
            }
        }
    }

    debug_assert_eq!(visited_count, cells_count, "maze generation left cells unvisited");
    debug!(cells = cells_count,
           passages = grid.passages_count(),
           start = %start,
           "generated recursive backtracker maze");
    Ok(())
}

fn unvisited_neighbours(grid: &Grid, coord: GridCoordinate, visited: &BitSet) -> CoordinateSmallVec {
    grid.neighbours(coord)
        .iter()
        .cloned()
        .filter(|neighbour| {
            grid.coordinate_to_index(*neighbour)
                .map_or(false, |index| !visited.contains(index))
        })
        .collect()
}

/// Pop cells off the stack, discarding those with nowhere left to go, until one with an
/// unvisited neighbour turns up.
fn pop_until_unvisited_neighbour(grid: &Grid,
                                 stack: &mut Vec<GridCoordinate>,
                                 visited: &BitSet)
                                 -> Option<GridCoordinate> {
    while let Some(cell) = stack.pop() {
        if !unvisited_neighbours(grid, cell, visited).is_empty() {
            return Some(cell);
        }
    }
    None
}
