use std::fmt;
use std::io::Write;

use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;

use crate::cells::{CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec, GridCoordinate,
                   Walls};
use crate::errors::*;
use crate::grid_displays;
use crate::grid_iterators::{self, BatchIter, CellIter};
use crate::units::{ColumnsCount, RowsCount};

/// A fixed size rectangular grid of cells, each carrying its own four wall flags.
///
/// Walls are kept consistent between neighbours: a passage is only ever opened on both sides
/// at once, through `remove_wall_between`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    walls: Vec<Walls>,
    passages: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows,
               self.columns,
               self.passages)
    }
}

impl Grid {
    /// Create a grid with every cell fully walled in.
    ///
    /// Fails with `InvalidDimensions` if either dimension is zero or the cells cannot be
    /// addressed with `u32` coordinates.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        let representable = r <= u32::MAX as usize && c <= u32::MAX as usize;
        let cells_count = r.checked_mul(c).filter(|_| representable);

        match cells_count {
            Some(count) if count > 0 => {
                Ok(Grid {
                    rows,
                    columns,
                    walls: vec![Walls::default(); count],
                    passages: 0,
                })
            }
            _ => bail!(ErrorKind::InvalidDimensions(r, c)),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Number of walls knocked down so far. A perfect maze has `size() - 1` passages.
    #[inline]
    pub fn passages_count(&self) -> usize {
        self.passages
    }

    /// Is the grid coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0..size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<GridCoordinate> {
        if index < self.size() {
            Some(grid_iterators::index_to_coordinate(self.columns.0, index))
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        grid_iterators::index_to_coordinate(self.columns.0, index)
    }

    /// The wall flags of a cell, None if the coordinate is outside the grid.
    pub fn walls(&self, coord: GridCoordinate) -> Option<Walls> {
        self.coordinate_to_index(coord).map(|index| self.walls[index])
    }

    /// Knock down the wall shared by two adjacent cells, on both sides.
    ///
    /// Removing an already removed wall is a no-op. Errors with `NonAdjacentCells` unless both
    /// cells are in the grid and one step apart along one axis.
    pub fn remove_wall_between(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let direction = a.direction_to(b);
        let indices = (self.coordinate_to_index(a), self.coordinate_to_index(b));

        if let (Some(dir), (Some(a_index), Some(b_index))) = (direction, indices) {
            let a_was_walled = self.walls[a_index].remove(dir);
            let b_was_walled = self.walls[b_index].remove(dir.opposite());
            debug_assert_eq!(a_was_walled, b_was_walled, "one sided wall between {} and {}", a, b);
            if a_was_walled {
                self.passages += 1;
            }
            Ok(())
        } else {
            bail!(ErrorKind::NonAdjacentCells(a, b))
        }
    }

    /// Can the maze be walked directly from `a` to `b`? Only adjacent cells without a wall
    /// between them are passable.
    pub fn is_passable(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (a.direction_to(b), self.walls(a), self.is_valid_coordinate(b)) {
            (Some(dir), Some(walls), true) => !walls.has_wall(dir),
            _ => false,
        }
    }

    /// Is there an open passage from `coord` to its neighbour in `direction`?
    pub fn is_neighbour_passable(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| self.is_passable(coord, neighbour))
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily connected by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        coord.offset(direction)
             .filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells connected to a particular cell by an open passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        match self.walls(coord) {
            Some(walls) => {
                CompassPrimary::ALL
                    .iter()
                    .filter(|dir| !walls.has_wall(**dir))
                    .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                    .collect()
            }
            None => CoordinateSmallVec::new(),
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.rows, self.columns)
    }

    /// Every open passage exactly once, as (cell, eastern or southern neighbour) pairs in
    /// row-major order.
    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        let forward: &'static [CompassPrimary] = &[CompassPrimary::East, CompassPrimary::South];
        self.iter().flat_map(move |coord| {
            forward.iter().filter_map(move |dir| {
                self.neighbour_at_direction(coord, *dir)
                    .filter(|neighbour| self.is_passable(coord, *neighbour))
                    .map(|neighbour| (coord, neighbour))
            })
        })
    }

    /// The maze as an undirected graph: one node per cell (node index == row-major index,
    /// weight == coordinate) and one edge per open passage.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.passages);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_passages() {
            if let (Some(a_index), Some(b_index)) = (self.coordinate_to_index(a),
                                                     self.coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Serialize the maze passages as text. Line 1: n(#vertices) m(#edges).
    /// Line 2+: an edge between two vertices, using 1-based row-major vertex indices.
    pub fn write_passages<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "{} {}", self.size(), self.passages)?;
        for (a, b) in self.iter_passages() {
            let index_a = self.coordinate_to_index(a)
                              .ok_or_else(|| ErrorKind::InvalidCoordinate(a))?;
            let index_b = self.coordinate_to_index(b)
                              .ok_or_else(|| ErrorKind::InvalidCoordinate(b))?;
            writeln!(out, "{} {}", index_a + 1, index_b + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", grid_displays::render(self, None))
    }
}

// Converting a &Grid into an iterator over its cells
impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use petgraph::algo::connected_components;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(r, c) in &[(0, 0), (0, 5), (5, 0)] {
            let result = Grid::new(RowsCount(r), ColumnsCount(c));
            match result {
                Err(Error(ErrorKind::InvalidDimensions(rows, columns), _)) => {
                    assert_eq!((rows, columns), (r, c));
                }
                other => panic!("expected InvalidDimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn unrepresentable_dimensions_are_rejected() {
        let result = Grid::new(RowsCount(usize::MAX), ColumnsCount(2));
        assert!(result.is_err());
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let g = small_grid(3, 4);
        assert_eq!(g.size(), 12);
        assert_eq!(g.passages_count(), 0);
        for coord in g.iter() {
            assert_eq!(g.walls(coord), Some(Walls::default()));
            assert!(g.links(coord).is_empty());
        }
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let neighbours: Vec<GridCoordinate> = g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<GridCoordinate> = expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // outside the grid there are no neighbours at all
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small_grid(2, 2);
        let neighbours = g.neighbours_at_directions(gc(0, 0),
                                                    &[CompassPrimary::North,
                                                      CompassPrimary::East,
                                                      CompassPrimary::South,
                                                      CompassPrimary::West]);
        assert_eq!(&*neighbours, &[None, Some(gc(0, 1)), Some(gc(1, 0)), None]);

        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::South), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::North), Some(gc(0, 1)));
    }

    #[test]
    fn coordinate_index_conversions() {
        let g = small_grid(2, 3);
        let indices = g.iter().map(|c| g.coordinate_to_index(c)).collect::<Vec<_>>();
        assert_eq!(indices, (0..6).map(Some).collect::<Vec<_>>());
        assert_eq!(g.coordinate_to_index(gc(2, 0)), None);
        assert_eq!(g.coordinate_to_index(gc(0, 3)), None);
        assert_eq!(g.index_to_coordinate(4), Some(gc(1, 1)));
        assert_eq!(g.index_to_coordinate(6), None);
    }

    #[test]
    fn random_cell_is_in_grid() {
        let g = small_grid(4, 7);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(g.is_valid_coordinate(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn removing_walls() {
        let mut g = small_grid(3, 3);
        let (a, b, c) = (gc(0, 1), gc(1, 1), gc(2, 1));

        assert!(!g.is_passable(a, b));
        g.remove_wall_between(a, b).expect("adjacent cells");

        // both sides of the wall come down together
        assert!(g.is_passable(a, b));
        assert!(g.is_passable(b, a));
        assert!(!g.walls(a).unwrap().bottom);
        assert!(!g.walls(b).unwrap().top);
        assert!(g.walls(b).unwrap().bottom);
        assert!(!g.is_passable(b, c));
        assert_eq!(g.passages_count(), 1);

        assert_eq!(g.links(a).as_slice(), &[b]);
        assert_eq!(g.links(b).as_slice(), &[a]);
        assert!(g.is_neighbour_passable(a, CompassPrimary::South));
        assert!(g.is_neighbour_passable(b, CompassPrimary::North));
        assert!(!g.is_neighbour_passable(b, CompassPrimary::East));

        // removing again changes nothing
        g.remove_wall_between(b, a).expect("adjacent cells");
        assert_eq!(g.passages_count(), 1);

        g.remove_wall_between(b, c).expect("adjacent cells");
        let links_b: Vec<GridCoordinate> = g.links(b).iter().cloned().sorted().collect();
        assert_eq!(links_b, vec![a, c]);
        assert!(!g.is_passable(a, c));
    }

    #[test]
    fn horizontal_walls() {
        let mut g = small_grid(1, 2);
        g.remove_wall_between(gc(0, 1), gc(0, 0)).expect("adjacent cells");
        assert!(!g.walls(gc(0, 0)).unwrap().right);
        assert!(!g.walls(gc(0, 1)).unwrap().left);
        assert!(g.walls(gc(0, 0)).unwrap().left);
    }

    #[test]
    fn non_adjacent_wall_removal_fails() {
        let mut g = small_grid(3, 3);
        let attempts = [(gc(0, 0), gc(1, 1)),
                        (gc(0, 0), gc(0, 2)),
                        (gc(1, 1), gc(1, 1)),
                        (gc(2, 2), gc(2, 3)),
                        (gc(2, 2), gc(3, 2))];
        for &(a, b) in &attempts {
            match g.remove_wall_between(a, b) {
                Err(Error(ErrorKind::NonAdjacentCells(x, y), _)) => assert_eq!((x, y), (a, b)),
                other => panic!("expected NonAdjacentCells for {} {}, got {:?}", a, b, other),
            }
        }
        assert_eq!(g.passages_count(), 0);
        assert_eq!(g, small_grid(3, 3));
    }

    #[test]
    fn passable_is_idempotent() {
        let mut g = small_grid(2, 2);
        g.remove_wall_between(gc(0, 0), gc(0, 1)).unwrap();
        let first = g.is_passable(gc(0, 0), gc(0, 1));
        for _ in 0..10 {
            assert_eq!(g.is_passable(gc(0, 0), gc(0, 1)), first);
            assert!(!g.is_passable(gc(0, 0), gc(1, 0)));
        }
    }

    #[test]
    fn passages_and_graph() {
        let mut g = small_grid(2, 2);
        g.remove_wall_between(gc(0, 0), gc(0, 1)).unwrap();
        g.remove_wall_between(gc(0, 1), gc(1, 1)).unwrap();

        let passages = g.iter_passages().collect::<Vec<_>>();
        assert_eq!(passages, vec![(gc(0, 0), gc(0, 1)), (gc(0, 1), gc(1, 1))]);

        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph[NodeIndex::new(3)], gc(1, 1));
        // (1, 0) is still sealed off
        assert_eq!(connected_components(&graph), 2);
    }

    #[test]
    fn passages_serialization() {
        let mut g = small_grid(2, 2);
        g.remove_wall_between(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall_between(gc(1, 0), gc(1, 1)).unwrap();

        let mut out = Vec::new();
        g.write_passages(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4 2\n1 3\n3 4\n");
    }

    #[test]
    fn quickcheck_wall_removal_round_trip() {
        fn prop(rows: u8, columns: u8, index: usize, dir_choice: u8) -> bool {
            let rows = rows as usize % 8 + 1;
            let columns = columns as usize % 8 + 1;
            let mut g = small_grid(rows, columns);
            let a = g.index_to_coordinate(index % g.size()).unwrap();
            let dir = CompassPrimary::ALL[dir_choice as usize % 4];

            match g.neighbour_at_direction(a, dir) {
                Some(b) => {
                    g.remove_wall_between(a, b).is_ok() && g.is_passable(a, b) &&
                    g.is_passable(b, a) && g.passages_count() == 1
                }
                None => g.neighbours(a).len() < 4,
            }
        }
        quickcheck(prop as fn(u8, u8, usize, u8) -> bool);
    }
}
