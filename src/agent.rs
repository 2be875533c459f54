//! A walker that wanders a maze from goal to goal, one cell per `run` call.

use error_chain::bail;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::heuristics::CostEstimate;
use crate::pathing::{self, Path};

/// What happened during one `Agent::step` or `Agent::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// A new random goal was picked.
    GoalChosen(GridCoordinate),
    /// A route to the goal was found; the agent starts walking it on the next tick.
    PathPlanned(Path),
    /// Moved one cell, now facing the direction of travel.
    Moved {
        to: GridCoordinate,
        facing: CompassPrimary,
    },
    /// Arrived at the goal, which is now cleared.
    ReachedGoal(GridCoordinate),
    /// Nothing to walk: no goal, or no route planned yet.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Agent {
    position: GridCoordinate,
    facing: CompassPrimary,
    goal: Option<GridCoordinate>,
    // Steps still to walk, next step last.
    remaining_steps: Option<Vec<GridCoordinate>>,
}

impl Agent {
    /// An agent at `position`, facing east and without a goal.
    pub fn new(position: GridCoordinate) -> Agent {
        Agent {
            position,
            facing: CompassPrimary::East,
            goal: None,
            remaining_steps: None,
        }
    }

    #[inline]
    pub fn position(&self) -> GridCoordinate {
        self.position
    }

    #[inline]
    pub fn facing(&self) -> CompassPrimary {
        self.facing
    }

    #[inline]
    pub fn goal(&self) -> Option<GridCoordinate> {
        self.goal
    }

    /// Steps left on the current route, None if no route is planned.
    pub fn remaining_steps(&self) -> Option<usize> {
        self.remaining_steps.as_ref().map(|steps| steps.len())
    }

    /// Head for `goal`, dropping any route planned for a previous goal.
    pub fn set_goal(&mut self, grid: &Grid, goal: GridCoordinate) -> Result<()> {
        if !grid.is_valid_coordinate(goal) {
            bail!(ErrorKind::InvalidCoordinate(goal));
        }
        self.goal = Some(goal);
        self.remaining_steps = None;
        Ok(())
    }

    /// Head for a uniformly random cell of the grid.
    pub fn set_random_goal<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Result<GridCoordinate> {
        let goal = grid.random_cell(rng);
        self.set_goal(grid, goal)?;
        Ok(goal)
    }

    pub fn clear_goal(&mut self) {
        self.goal = None;
        self.remaining_steps = None;
    }

    /// Plan a route from the current position to the goal with A*.
    ///
    /// Errors with `NoGoalSet` if there is no goal. On `PathNotFound` the goal is kept so the
    /// caller can decide whether to pick another one.
    pub fn plan<H>(&mut self, grid: &Grid, heuristic: &H) -> Result<Path>
        where H: CostEstimate + ?Sized
    {
        let goal = self.goal.ok_or(ErrorKind::NoGoalSet)?;
        let path = pathing::find_path(grid, self.position, goal, heuristic)?;

        let mut steps = path.cells()[1..].to_vec();
        steps.reverse();
        self.remaining_steps = Some(steps);
        Ok(path)
    }

    /// Walk one cell along the planned route.
    pub fn step(&mut self) -> AgentEvent {
        let (goal, steps) = match (self.goal, self.remaining_steps.as_mut()) {
            (Some(goal), Some(steps)) => (goal, steps),
            _ => return AgentEvent::Idle,
        };
        let next = steps.pop();

        if let Some(next) = next {
            match self.position.direction_to(next) {
                Some(direction) => {
                    self.facing = direction;
                    self.position = next;
                }
                None => {
                    // Routes only hold adjacent cells; force a re-plan rather than teleporting.
                    warn!(from = %self.position, to = %next, "route step is not adjacent");
                    self.remaining_steps = None;
                    return AgentEvent::Idle;
                }
            }
        }

        if self.position == goal {
            info!(goal = %goal, "reached goal");
            self.clear_goal();
            AgentEvent::ReachedGoal(goal)
        } else {
            AgentEvent::Moved {
                to: self.position,
                facing: self.facing,
            }
        }
    }

    /// One tick of the wander loop: pick a goal if there is none, plan a route if there is
    /// none, otherwise take a step.
    pub fn run<H, R>(&mut self, grid: &Grid, heuristic: &H, rng: &mut R) -> Result<AgentEvent>
        where H: CostEstimate + ?Sized,
              R: Rng + ?Sized
    {
        if self.goal.is_none() {
            let goal = self.set_random_goal(grid, rng)?;
            debug!(goal = %goal, "chose new goal");
            return Ok(AgentEvent::GoalChosen(goal));
        }

        match self.step() {
            AgentEvent::Idle => self.plan(grid, heuristic).map(AgentEvent::PathPlanned),
            event => Ok(event),
        }
    }
}
