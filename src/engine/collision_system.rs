use super::*;

impl GameEngine {
    pub(super) fn resolve_collectibles(&mut self) {
        let cell = self.player.cell();
        let pickup = self.ledger.resolve_at(cell);
        if pickup.is_empty() {
            return;
        }
        self.score = self.score.saturating_add(pickup.points);
        if pickup.dots > 0 {
            self.events.push(GameEvent::DotCollected {
                x: cell.x,
                y: cell.y,
            });
        }
        if pickup.power_pellet {
            self.events.push(GameEvent::PelletCollected {
                x: cell.x,
                y: cell.y,
            });
            self.begin_power_mode();
        }
    }

    fn begin_power_mode(&mut self) {
        self.power_active = true;
        self.power_timer = self.config.power_duration_secs;
        self.player.power = PowerState::Powered;
        for ghost in &mut self.ghosts {
            ghost.set_mode(&self.maze, GhostMode::Vulnerable);
        }
    }

    pub(super) fn cancel_power_mode(&mut self) {
        self.power_active = false;
        self.power_timer = 0.0;
        self.player.power = PowerState::Normal;
    }

    /// Power-mode expiry only stops the global window; each ghost leaves
    /// `Vulnerable` on its own timer.
    pub(super) fn update_power_mode(&mut self) {
        if !self.power_active {
            return;
        }
        self.power_timer -= self.tick_seconds;
        if self.power_timer <= 0.0 {
            self.cancel_power_mode();
        }
    }

    /// Skipped entirely while the player is invincible, vulnerable ghosts
    /// included.
    pub(super) fn resolve_ghost_collisions(&mut self) {
        if self.player.is_invincible() {
            return;
        }
        let player_cell = self.player.cell();
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].cell() != player_cell {
                continue;
            }
            if self.ghosts[idx].is_vulnerable() {
                self.score = self.score.saturating_add(GHOST_POINTS);
                self.ghosts[idx].reset_to_spawn(&self.maze, &mut self.rng);
                self.events.push(GameEvent::GhostEaten {
                    ghost_id: self.ghosts[idx].id(),
                    x: player_cell.x,
                    y: player_cell.y,
                });
                continue;
            }

            self.lives = self.lives.saturating_sub(1);
            self.events.push(GameEvent::PlayerCaught {
                lives_left: self.lives,
            });
            if self.lives == 0 {
                self.finish(GamePhase::GameOver);
            } else {
                self.respawn_player();
            }
            // Every ghost has been reset or the round is over.
            return;
        }
    }
}
