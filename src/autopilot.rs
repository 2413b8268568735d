use std::collections::{HashMap, HashSet, VecDeque};

use crate::engine::GameEngine;
use crate::maze::Maze;
use crate::types::{Cell, Direction, GhostMode};

/// Scripted input source: heads for the nearest pending item along the
/// shortest path, keeping clear of dangerous ghosts when it can.
#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    decisions: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Queues a direction when the player sits on a cell centre.
    pub fn drive(&mut self, engine: &mut GameEngine) {
        if engine.player_in_transit() {
            return;
        }
        if let Some(dir) = Self::choose_direction(engine) {
            self.decisions += 1;
            engine.queue_direction(dir);
        }
    }

    pub fn choose_direction(engine: &GameEngine) -> Option<Direction> {
        let maze = engine.maze();
        let start = engine.player_cell();
        let powered = engine.is_powered();

        let mut danger = HashSet::new();
        let mut prey = HashSet::new();
        for (cell, mode) in engine.ghost_cells() {
            if mode == GhostMode::Vulnerable {
                if powered {
                    prey.insert(cell);
                }
                continue;
            }
            danger.insert(cell);
            for dir in Direction::ALL {
                if let Some(next) = maze.resolve_move(cell, dir) {
                    danger.insert(next);
                }
            }
        }

        let ledger = engine.ledger();
        let is_goal = |cell: Cell| ledger.is_pending(cell) || prey.contains(&cell);

        first_step(maze, start, &danger, is_goal)
            .or_else(|| first_step(maze, start, &HashSet::new(), is_goal))
            .or_else(|| escape_step(maze, start, &danger))
    }
}

/// Breadth-first search from `start`; returns the first move on a shortest
/// path to any goal cell. Ties go to `Direction::ALL` order.
fn first_step(
    maze: &Maze,
    start: Cell,
    blocked: &HashSet<Cell>,
    is_goal: impl Fn(Cell) -> bool,
) -> Option<Direction> {
    let mut first_move: HashMap<Cell, Direction> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut seen = HashSet::from([start]);

    for dir in Direction::ALL {
        let Some(next) = maze.resolve_move(start, dir) else {
            continue;
        };
        if blocked.contains(&next) || !seen.insert(next) {
            continue;
        }
        first_move.insert(next, dir);
        queue.push_back(next);
    }

    while let Some(cell) = queue.pop_front() {
        let dir = first_move[&cell];
        if is_goal(cell) {
            return Some(dir);
        }
        for step in Direction::ALL {
            let Some(next) = maze.resolve_move(cell, step) else {
                continue;
            };
            if blocked.contains(&next) || !seen.insert(next) {
                continue;
            }
            first_move.insert(next, dir);
            queue.push_back(next);
        }
    }
    None
}

fn escape_step(maze: &Maze, start: Cell, danger: &HashSet<Cell>) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&dir| {
        maze.resolve_move(start, dir)
            .is_some_and(|next| !danger.contains(&next))
    })
}

#[cfg(test)]
mod tests {
    use super::{first_step, Autopilot};
    use crate::config::GameConfig;
    use crate::engine::GameEngine;
    use crate::maze::Maze;
    use crate::types::{Cell, Direction, GamePhase};
    use std::collections::HashSet;

    #[test]
    fn heads_for_the_nearest_item() {
        let maze = Maze::parse(&["#########", "#.  P ..#", "#########"]).expect("valid layout");
        let config = GameConfig {
            ghost_count: 0,
            ..GameConfig::default()
        };
        let engine = GameEngine::new(maze, config, 3);
        assert_eq!(
            Autopilot::choose_direction(&engine),
            Some(Direction::Right)
        );
    }

    #[test]
    fn search_uses_the_side_tunnel() {
        let maze = Maze::parse(&["#####", "P# . ", "#####"]).expect("valid layout");
        let found = first_step(&maze, Cell::new(0, 1), &HashSet::new(), |cell| {
            cell == Cell::new(3, 1)
        });
        assert_eq!(found, Some(Direction::Left));
    }

    #[test]
    fn blocked_cells_are_routed_around() {
        let maze = Maze::parse(&["#####", "#   #", "# # #", "#   #", "#####"]).expect("valid");
        let blocked = HashSet::from([Cell::new(2, 1)]);
        let found = first_step(&maze, Cell::new(1, 1), &blocked, |cell| {
            cell == Cell::new(3, 1)
        });
        assert_eq!(found, Some(Direction::Down));
    }

    #[test]
    fn autopilot_clears_a_small_board() {
        let maze = Maze::parse(&["#######", "#P...o#", "#.###.#", "#.....#", "#######"])
            .expect("valid layout");
        let config = GameConfig {
            ghost_count: 0,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(maze, config, 8);
        let mut pilot = Autopilot::new();
        for _ in 0..2_000 {
            pilot.drive(&mut engine);
            engine.step();
            if engine.is_ended() {
                break;
            }
        }
        assert_eq!(engine.phase(), GamePhase::Victory);
        assert!(pilot.decisions() > 0);
    }
}
