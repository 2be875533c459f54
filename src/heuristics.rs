use std::fmt;
use std::str::FromStr;

use crate::cells::GridCoordinate;
use crate::errors::*;

/// Straight line step cost used by the distance heuristics.
const D1: f64 = 1.0;
/// Diagonal step cost used by the diagonal distance heuristic.
const D2: f64 = 2.0;

/// An estimate of the remaining cost from a cell to a goal, used to guide A*.
///
/// The estimate must never be negative. For A* to return shortest paths it must also never
/// overestimate (be admissible). Closures taking `(cell, goal)` are cost estimates too.
pub trait CostEstimate {
    fn estimate(&self, cell: GridCoordinate, goal: GridCoordinate) -> f64;
}

impl<F: Fn(GridCoordinate, GridCoordinate) -> f64> CostEstimate for F {
    fn estimate(&self, cell: GridCoordinate, goal: GridCoordinate) -> f64 {
        self(cell, goal)
    }
}

/// The built in distance heuristics, selectable by name.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Heuristic {
    /// `|dx| + |dy|`
    Manhattan,
    /// `sqrt(dx² + dy²)`
    Euclidean,
    /// `D1·(dx + dy) + (D2 − 2·D1)·min(dx, dy)`.
    ///
    /// With the unit costs used here (D1 = 1, D2 = 2) the diagonal term cancels and this matches
    /// Manhattan distance, which suits a grid without diagonal moves.
    Diagonal,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Euclidean
    }
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Diagonal];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Diagonal => "diagonal",
        }
    }
}

#[inline]
fn axis_deltas(cell: GridCoordinate, goal: GridCoordinate) -> (f64, f64) {
    let dx = (f64::from(cell.column) - f64::from(goal.column)).abs();
    let dy = (f64::from(cell.row) - f64::from(goal.row)).abs();
    (dx, dy)
}

impl CostEstimate for Heuristic {
    fn estimate(&self, cell: GridCoordinate, goal: GridCoordinate) -> f64 {
        let (dx, dy) = axis_deltas(cell, goal);
        match *self {
            Heuristic::Manhattan => D1 * (dx + dy),
            Heuristic::Euclidean => D1 * (dx * dx + dy * dy).sqrt(),
            Heuristic::Diagonal => D1 * (dx + dy) + (D2 - 2.0 * D1) * dx.min(dy),
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(name: &str) -> Result<Heuristic> {
        Heuristic::ALL
            .iter()
            .cloned()
            .find(|h| h.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ErrorKind::UnknownHeuristic(name.to_owned()).into())
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn distances() {
        let (a, b) = (gc(1, 1), gc(4, 5));
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Diagonal.estimate(a, b), 7.0);

        // symmetric, and zero at the goal
        for h in Heuristic::ALL.iter() {
            assert_eq!(h.estimate(a, b), h.estimate(b, a));
            assert_eq!(h.estimate(b, b), 0.0);
        }
    }

    #[test]
    fn never_overestimates_grid_steps() {
        // On a 4-connected grid no route is shorter than the manhattan distance.
        let goal = gc(3, 3);
        for row in 0..8 {
            for column in 0..8 {
                let cell = gc(row, column);
                let lower_bound = Heuristic::Manhattan.estimate(cell, goal);
                for h in Heuristic::ALL.iter() {
                    let estimate = h.estimate(cell, goal);
                    assert!(estimate >= 0.0);
                    assert!(estimate <= lower_bound);
                }
            }
        }
    }

    #[test]
    fn selectable_by_name() {
        assert_eq!("manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("Euclidean".parse::<Heuristic>().unwrap(), Heuristic::Euclidean);
        assert_eq!(" DIAGONAL ".parse::<Heuristic>().unwrap(), Heuristic::Diagonal);

        for h in Heuristic::ALL.iter() {
            assert_eq!(h.to_string().parse::<Heuristic>().unwrap(), *h);
        }

        match "chebyshev".parse::<Heuristic>() {
            Err(Error(ErrorKind::UnknownHeuristic(name), _)) => assert_eq!(name, "chebyshev"),
            other => panic!("expected UnknownHeuristic, got {:?}", other),
        }
    }

    #[test]
    fn default_is_euclidean() {
        assert_eq!(Heuristic::default(), Heuristic::Euclidean);
    }

    #[test]
    fn closures_estimate_costs() {
        let zero = |_: GridCoordinate, _: GridCoordinate| 0.0;
        assert_eq!(zero.estimate(gc(0, 0), gc(9, 9)), 0.0);
    }
}
