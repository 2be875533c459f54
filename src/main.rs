use std::{fs::File, io::BufWriter};

use docopt::Docopt;
use rand::Rng;
use serde_derive::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mazes::{
    agent::{Agent, AgentEvent},
    cells::GridCoordinate,
    config::MazeConfig,
    generators,
    grid::Grid,
    grid_displays::{self, AgentGoalDisplay, PathDisplay},
    heuristics::Heuristic,
    units::{CellSize, Height, Width},
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w>] [--height=<h>] [--cell-size=<n>] [--seed=<s>] [--heuristic=<name>] [--goals=<n>] [--save-edges=<path>] [--quiet]

Options:
    -h --help              Show this screen.
    --width=<w>            Width of the maze area [default: 800].
    --height=<h>           Height of the maze area [default: 400].
    --cell-size=<n>        Side length of one square cell. The grid has height/n rows and width/n columns [default: 40].
    --seed=<s>             Seed for maze generation and goal picking. Random if not given.
    --heuristic=<name>     A* distance estimate: manhattan, euclidean or diagonal [default: euclidean].
    --goals=<n>            Number of random goals the agent walks to [default: 3].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --quiet                Only log warnings and errors.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_cell_size: usize,
    flag_seed: Option<u64>,
    flag_heuristic: String,
    flag_goals: usize,
    flag_save_edges: String,
    flag_quiet: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Mazes(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    init_logging(args.flag_quiet);

    let config = MazeConfig {
        width: Width(args.flag_width),
        height: Height(args.flag_height),
        cell_size: CellSize(args.flag_cell_size),
        heuristic: args.flag_heuristic.parse::<Heuristic>()?,
        seed: args.flag_seed,
    };

    let mut rng = config.rng();
    let mut maze_grid = config.grid()?;
    let origin = GridCoordinate::new(0, 0);
    generators::recursive_backtracker(&mut maze_grid, origin, &mut rng)?;
    info!(rows = maze_grid.rows().0,
          columns = maze_grid.columns().0,
          passages = maze_grid.passages_count(),
          "maze generated");

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    println!("{}", maze_grid);

    wander(&maze_grid, &config, args.flag_goals, &mut rng)
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Walk the agent from the maze origin to `goals_count` random goals, printing each route.
fn wander<R: Rng>(maze_grid: &Grid, config: &MazeConfig, goals_count: usize, rng: &mut R) -> Result<()> {

    let mut agent = Agent::new(GridCoordinate::new(0, 0));
    let mut goals_reached = 0;
    let mut steps_taken = 0;

    // A perfect maze never needs more than one plan and `size` steps per goal.
    let max_ticks = goals_count * (maze_grid.size() + 2);

    for _ in 0..max_ticks {
        if goals_reached == goals_count {
            break;
        }

        match agent.run(maze_grid, &config.heuristic, rng)? {
            AgentEvent::GoalChosen(goal) => {
                let markers = AgentGoalDisplay::new(agent.position(), Some(goal));
                println!("{}", grid_displays::render(maze_grid, Some(&markers)));
            }
            AgentEvent::PathPlanned(path) => {
                info!(from = %path.start(), to = %path.goal(), cost = path.cost(), "route planned");
                let route = PathDisplay::new(path.cells());
                println!("{}", grid_displays::render(maze_grid, Some(&route)));
            }
            AgentEvent::Moved { .. } => steps_taken += 1,
            AgentEvent::ReachedGoal(goal) => {
                if goal != agent.position() {
                    warn!(goal = %goal, position = %agent.position(), "goal and position disagree");
                }
                goals_reached += 1;
                steps_taken += 1;
            }
            AgentEvent::Idle => {}
        }
    }

    info!(goals = goals_reached, steps = steps_taken, "agent finished");
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {
    let file = File::create(file_path)
        .chain_err(|| format!("Failed to create maze graph file {}", file_path))?;
    maze_grid.write_passages(BufWriter::new(file))
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!(path = file_path, "saved maze graph");
    Ok(())
}
