use super::*;

impl GameEngine {
    pub(super) fn resolve_player_spawn(maze: &Maze) -> Cell {
        let (player_spawn, _) = maze.spawn_positions();
        player_spawn.unwrap_or_else(|| maze.fallback_spawn())
    }

    /// Ghost `i` takes the i-th spawn tile; extra ghosts cycle back through
    /// the list, and a layout without any `G` tiles falls back to the centre.
    pub(super) fn spawn_ghosts(
        maze: &Maze,
        config: &GameConfig,
        rng: &mut Rng,
        player_spawn: Cell,
    ) -> Vec<Ghost> {
        let (_, ghost_spawns) = maze.spawn_positions();
        let timings = config.ghost_timings();
        (0..config.ghost_count)
            .map(|id| {
                let spawn = if ghost_spawns.is_empty() {
                    let centre = maze.fallback_spawn();
                    if centre == player_spawn {
                        Self::first_open_neighbour(maze, centre)
                    } else {
                        centre
                    }
                } else {
                    ghost_spawns[id % ghost_spawns.len()]
                };
                Ghost::new(id, maze, spawn, config.ghost_speed, timings, rng)
            })
            .collect()
    }

    fn first_open_neighbour(maze: &Maze, cell: Cell) -> Cell {
        Direction::ALL
            .into_iter()
            .find_map(|dir| maze.resolve_move(cell, dir))
            .unwrap_or(cell)
    }

    pub(super) fn reset_all_ghosts(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.reset_to_spawn(&self.maze, &mut self.rng);
        }
    }

    pub(super) fn respawn_player(&mut self) {
        self.player.respawn(&self.maze);
        self.cancel_power_mode();
        self.reset_all_ghosts();
    }
}
