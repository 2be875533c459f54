use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// A cell position in a grid, addressed by row (y, growing southwards) and column
/// (x, growing eastwards).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Every direction, in the order neighbours are reported by a grid.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    /// The coordinate one step away in `dir`.
    ///
    /// Returns None if the step would leave the representable coordinate space (north of row
    /// zero, west of column zero). Grid bounds are not checked here.
    pub fn offset(self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let GridCoordinate { row, column } = self;
        match dir {
            CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::South => row.checked_add(1).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::East => column.checked_add(1).map(|c| GridCoordinate::new(row, c)),
            CompassPrimary::West => column.checked_sub(1).map(|c| GridCoordinate::new(row, c)),
        }
    }

    /// The direction of travel from `self` to `other` if they differ by exactly one step
    /// along exactly one axis.
    pub fn direction_to(self, other: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }

    #[inline]
    pub fn is_adjacent(self, other: GridCoordinate) -> bool {
        self.direction_to(other).is_some()
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

/// The four wall flags of a single cell. A cell starts with every wall up.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Walls {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

impl Walls {
    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.top,
            CompassPrimary::South => self.bottom,
            CompassPrimary::East => self.right,
            CompassPrimary::West => self.left,
        }
    }

    /// Knock down the wall facing `dir`. Returns true if a wall was actually standing.
    pub fn remove(&mut self, dir: CompassPrimary) -> bool {
        let wall = match dir {
            CompassPrimary::North => &mut self.top,
            CompassPrimary::South => &mut self.bottom,
            CompassPrimary::East => &mut self.right,
            CompassPrimary::West => &mut self.left,
        };
        let was_standing = *wall;
        *wall = false;
        was_standing
    }

    pub fn standing_count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|dir| self.has_wall(**dir)).count()
    }
}
