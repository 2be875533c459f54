//! Route finding over a carved grid.
//!
//! `find_path` is an A* search guided by a `CostEstimate`. `Distances` is a breadth first
//! floodfill from one cell to every reachable cell, which on a unit cost maze gives exact
//! shortest path lengths; it backs `shortest_path` and `longest_path`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use error_chain::bail;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::heuristics::{CostEstimate, Heuristic};
use crate::utils::{self, FnvHashMap, FnvHashSet};

/// An ordered route from a start cell to a goal cell, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<GridCoordinate>,
}

impl Path {
    fn from_cells(cells: Vec<GridCoordinate>) -> Path {
        debug_assert!(!cells.is_empty());
        Path { cells }
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.cells[self.cells.len() - 1]
    }

    /// Number of steps taken walking the path, one per passage crossed.
    #[inline]
    pub fn cost(&self) -> usize {
        self.cells.len() - 1
    }

    /// Number of cells on the path, including start and goal.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A path always holds at least its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn cells(&self) -> &[GridCoordinate] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<GridCoordinate> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<GridCoordinate> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a GridCoordinate;
    type IntoIter = std::slice::Iter<'a, GridCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Open list entry. The heap is a max heap, so the ordering is reversed: lowest f first and,
/// among equal f, the earliest pushed first.
#[derive(Debug, Copy, Clone)]
struct SearchNode {
    coord: GridCoordinate,
    g: usize,
    f: f64,
    sequence: u64,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f
             .total_cmp(&self.f)
             .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Best known cost to reach a cell and the cell we came from to get it.
#[derive(Debug, Copy, Clone)]
struct Visit {
    g: usize,
    parent: Option<GridCoordinate>,
}

/// A* search from `start` to `goal` across the open passages of `grid`.
///
/// Only passable neighbours (no wall in between) are successors; every step costs 1. With an
/// admissible heuristic the returned path is a shortest one. Errors with `InvalidCoordinate`
/// for an endpoint outside the grid and `PathNotFound` if the goal cannot be reached.
pub fn find_path<H>(grid: &Grid,
                    start: GridCoordinate,
                    goal: GridCoordinate,
                    heuristic: &H)
                    -> Result<Path>
    where H: CostEstimate + ?Sized
{
    for coord in &[start, goal] {
        if !grid.is_valid_coordinate(*coord) {
            bail!(ErrorKind::InvalidCoordinate(*coord));
        }
    }

    let mut open = BinaryHeap::new();
    let mut closed: FnvHashSet<GridCoordinate> = utils::fnv_hashset(grid.size());
    let mut visits: FnvHashMap<GridCoordinate, Visit> = utils::fnv_hashmap(grid.size());
    let mut sequence = 0u64;

    let _ = visits.insert(start, Visit { g: 0, parent: None });
    open.push(SearchNode {
        coord: start,
        g: 0,
        f: heuristic.estimate(start, goal),
        sequence,
    });

    while let Some(current) = open.pop() {

        if current.coord == goal {
            let path = reconstruct_path(&visits, goal);
            debug!(start = %start,
                   goal = %goal,
                   cost = path.cost(),
                   expanded = closed.len(),
                   "found path");
            return Ok(path);
        }

        // Skip stale entries superseded by a cheaper route pushed later.
        if !closed.insert(current.coord) {
            continue;
        }

        for successor in grid.links(current.coord).iter().cloned() {
            if closed.contains(&successor) {
                continue;
            }

            let tentative_g = current.g + 1;
            let improves = visits.get(&successor)
                                 .map_or(true, |known| tentative_g < known.g);
            if improves {
                let _ = visits.insert(successor,
                                      Visit {
                                          g: tentative_g,
                                          parent: Some(current.coord),
                                      });
                sequence += 1;
                open.push(SearchNode {
                    coord: successor,
                    g: tentative_g,
                    f: tentative_g as f64 + heuristic.estimate(successor, goal),
                    sequence,
                });
            }
        }
    }

    warn!(start = %start, goal = %goal, expanded = closed.len(), "no path found");
    bail!(ErrorKind::PathNotFound(start, goal))
}

/// `find_path` with one of the built in heuristics chosen by name, e.g. "manhattan".
pub fn find_path_by_name(grid: &Grid,
                         start: GridCoordinate,
                         goal: GridCoordinate,
                         heuristic_name: &str)
                         -> Result<Path> {
    let heuristic: Heuristic = heuristic_name.parse()?;
    find_path(grid, start, goal, &heuristic)
}

fn reconstruct_path(visits: &FnvHashMap<GridCoordinate, Visit>, goal: GridCoordinate) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(parent) = visits.get(&current).and_then(|visit| visit.parent) {
        cells.push(parent);
        current = parent;
    }
    cells.reverse();
    Path::from_cells(cells)
}

/// Steps from a start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Floodfill the grid's passages from `start_coordinate`.
    ///
    /// Every step costs one, so the first time the frontier touches a cell its distance is
    /// final; the map doubles as the visited set.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Result<Distances> {
        if !grid.is_valid_coordinate(start_coordinate) {
            bail!(ErrorKind::InvalidCoordinate(start_coordinate));
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        let _ = distances.insert(start_coordinate, 0);

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coord in grid.links(*cell_coord).iter() {
                    if !distances.contains_key(link_coord) {
                        let _ = distances.insert(*link_coord, distance_to_cell + 1);
                        new_frontier.push(*link_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if the cell is unreachable (or not in the grid).
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// All cells at the maximum distance, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
                               .iter()
                               .filter(|&(_, distance)| *distance == furthest_distance)
                               .map(|(coord, _)| *coord)
                               .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` along ever decreasing distances to the floodfill start.
///
/// Returns None if the end point is unreachable from the start.
pub fn shortest_path(grid: &Grid, distances_from_start: &Distances, end_point: GridCoordinate) -> Option<Path> {
    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut cells = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.links(current_coord)
                         .iter()
                         .cloned()
                         .find(|linked| {
                             distances_from_start.distance_from_start_to(*linked) ==
                             Some(current_distance - 1)
                         })?;
        cells.push(closer);
        current_coord = closer;
        current_distance -= 1;
    }

    cells.reverse();
    Some(Path::from_cells(cells))
}

/// The longest path in a perfect maze: the cell furthest from an arbitrary cell starts it,
/// the cell furthest from that ends it.
///
/// On a maze with loops or disconnected areas this is just some long path.
pub fn longest_path(grid: &Grid) -> Result<Path> {
    let arbitrary_start = GridCoordinate::new(0, 0);
    let first_distances = Distances::new(grid, arbitrary_start)?;
    let long_path_start = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    shortest_path(grid, &distances_from_start, end_point)
        .ok_or_else(|| ErrorKind::PathNotFound(long_path_start, end_point).into())
}
