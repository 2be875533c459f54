//! Text rendering of a grid with box drawing glyphs, plus optional cell body overlays.

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks every cell on a path with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks an agent position with 'A' and a goal with 'G'.
#[derive(Debug)]
pub struct AgentGoalDisplay {
    agent: GridCoordinate,
    goal: Option<GridCoordinate>,
}

impl AgentGoalDisplay {
    pub fn new(agent: GridCoordinate, goal: Option<GridCoordinate>) -> Self {
        AgentGoalDisplay { agent, goal }
    }
}

impl GridDisplay for AgentGoalDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.agent {
            String::from(" A ")
        } else if Some(coord) == self.goal {
            String::from(" G ")
        } else {
            String::from("   ")
        }
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Render the grid as text. Each cell is a 3 glyph body; `display` decides what goes in it.
pub fn render(grid: &Grid, display: Option<&dyn GridDisplay>) -> String {
    let columns_count = grid.columns().0;
    let rows_count = grid.rows().0;
    let open = |coord, dir| grid.is_neighbour_passable(coord, dir);

    // The north most boundary is special cased, each row below renders its own southern side.
    let mut output = String::from(WALL_RD);
    for column in 0..columns_count {
        let coord = GridCoordinate::new(0, column as u32);
        output.push_str(WALL_LR_3);
        if open(coord, CompassPrimary::East) {
            output.push_str(WALL_LR);
        } else if column == columns_count - 1 {
            output.push_str(WALL_LD);
        } else {
            output.push_str(WALL_LRD);
        }
    }
    output.push('\n');

    for (row_index, row) in grid.iter_row().enumerate() {
        let is_last_row = row_index == rows_count - 1;

        let mut middle_section = String::from(WALL_UD);
        let mut bottom_section = String::new();

        for (column_index, coord) in row.into_iter().enumerate() {
            let is_last_column = column_index == columns_count - 1;
            let east_open = open(coord, CompassPrimary::East);
            let south_open = open(coord, CompassPrimary::South);

            let body = display.map_or_else(|| String::from("   "),
                                           |d| d.render_cell_body(coord));
            middle_section.push_str(&body);
            middle_section.push_str(if east_open { " " } else { WALL_UD });

            if column_index == 0 {
                bottom_section.push_str(if is_last_row {
                    WALL_RU
                } else if south_open {
                    WALL_UD
                } else {
                    WALL_RUD
                });
            }
            bottom_section.push_str(if south_open { "   " } else { WALL_LR_3 });

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => {
                    // The south east corner joins up to four wall segments.
                    let south_east_reached_from_east =
                        grid.neighbour_at_direction(coord, CompassPrimary::East)
                            .map_or(false, |c| open(c, CompassPrimary::South));
                    let south_east_reached_from_south =
                        grid.neighbour_at_direction(coord, CompassPrimary::South)
                            .map_or(false, |c| open(c, CompassPrimary::East));
                    corner_glyph(!south_open,
                                 !south_east_reached_from_east,
                                 !east_open,
                                 !south_east_reached_from_south)
                }
            };
            bottom_section.push_str(corner);
        }

        output.push_str(&middle_section);
        output.push('\n');
        output.push_str(&bottom_section);
        output.push('\n');
    }

    output
}

fn corner_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn walled_grid() {
        let g = Grid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        let expected = "┌───┬───┐\n\
                        │   │   │\n\
                        ├───┼───┤\n\
                        │   │   │\n\
                        └───┴───┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn carved_grid_with_path() {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        g.remove_wall_between(gc(0, 0), gc(0, 1)).unwrap();
        g.remove_wall_between(gc(0, 1), gc(1, 1)).unwrap();
        g.remove_wall_between(gc(1, 1), gc(1, 0)).unwrap();

        let path = PathDisplay::new(&[gc(0, 0), gc(0, 1), gc(1, 1)]);
        let expected = "┌───────┐\n\
                        │ .   . │\n\
                        ├───╴   │\n\
                        │     . │\n\
                        └───────┘\n";
        assert_eq!(render(&g, Some(&path)), expected);
    }

    #[test]
    fn agent_and_goal_markers() {
        let g = Grid::new(RowsCount(1), ColumnsCount(3)).unwrap();
        let markers = AgentGoalDisplay::new(gc(0, 0), Some(gc(0, 2)));
        let rendered = render(&g, Some(&markers));
        assert!(rendered.contains("│ A │   │ G │"));
    }
}
