use crate::config::GhostTimings;
use crate::constants::{ANIMATION_FRAMES, GHOST_ANIMATION_SECS};
use crate::maze::Maze;
use crate::mover::Mover;
use crate::rng::Rng;
use crate::types::{Cell, Direction, GhostMode, GhostView};

#[derive(Clone, Debug)]
pub struct Ghost {
    id: usize,
    mover: Mover,
    spawn: Cell,
    mode: GhostMode,
    mode_timer: f32,
    direction_timer: f32,
    target: Cell,
    timings: GhostTimings,
    eyes: Direction,
    animation_frame: u8,
    animation_timer: f32,
}

impl Ghost {
    pub fn new(
        id: usize,
        maze: &Maze,
        spawn: Cell,
        speed: f32,
        timings: GhostTimings,
        rng: &mut Rng,
    ) -> Self {
        let mut mover = Mover::new(maze, spawn, speed);
        mover.set_direction(rng.pick(&Direction::ALL));
        let mut ghost = Self {
            id,
            mover,
            spawn,
            mode: GhostMode::Scatter,
            mode_timer: 0.0,
            direction_timer: 0.0,
            target: spawn,
            timings,
            eyes: Direction::Right,
            animation_frame: 0,
            animation_timer: 0.0,
        };
        ghost.target = ghost.scatter_corner(maze);
        ghost
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn cell(&self) -> Cell {
        self.mover.cell()
    }

    pub fn spawn(&self) -> Cell {
        self.spawn
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn direction(&self) -> Option<Direction> {
        self.mover.direction()
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn is_vulnerable(&self) -> bool {
        self.mode == GhostMode::Vulnerable
    }

    pub fn update(&mut self, maze: &Maze, player: Cell, rng: &mut Rng, dt: f32) {
        self.advance_timers(maze, dt);
        self.retarget(maze, player);
        self.steer(maze, rng);
        self.mover.advance();
        self.update_animation(player, dt);
    }

    fn advance_timers(&mut self, maze: &Maze, dt: f32) {
        self.mode_timer += dt;
        self.direction_timer += dt;
        let next = match self.mode {
            GhostMode::Scatter if self.mode_timer >= self.timings.scatter => GhostMode::Chase,
            GhostMode::Chase if self.mode_timer >= self.timings.chase => GhostMode::Scatter,
            GhostMode::Vulnerable if self.mode_timer >= self.timings.vulnerable => {
                GhostMode::Scatter
            }
            _ => return,
        };
        self.set_mode(maze, next);
    }

    /// No-op when already in `mode`, so a second pellet does not extend an
    /// ongoing vulnerable window.
    pub fn set_mode(&mut self, maze: &Maze, mode: GhostMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.mode_timer = 0.0;
        match mode {
            GhostMode::Scatter => self.target = self.scatter_corner(maze),
            GhostMode::Vulnerable => {
                let reversed = self.mover.direction().map(Direction::opposite);
                self.mover.set_direction(reversed);
            }
            GhostMode::Chase | GhostMode::Returning => {}
        }
    }

    fn scatter_corner(&self, maze: &Maze) -> Cell {
        let corners = [
            Cell::new(1, 1),
            Cell::new(maze.width() - 2, 1),
            Cell::new(1, maze.height() - 2),
            Cell::new(maze.width() - 2, maze.height() - 2),
        ];
        corners[self.id % corners.len()]
    }

    fn retarget(&mut self, maze: &Maze, player: Cell) {
        match self.mode {
            GhostMode::Chase => self.target = player,
            GhostMode::Vulnerable => {
                let x = maze.width() - 1 - player.x;
                let y = maze.height() - 1 - player.y;
                self.target = Cell::new(
                    x.clamp(1, (maze.width() - 2).max(1)),
                    y.clamp(1, (maze.height() - 2).max(1)),
                );
            }
            GhostMode::Returning => self.target = self.spawn,
            GhostMode::Scatter => {}
        }
    }

    fn steer(&mut self, maze: &Maze, rng: &mut Rng) {
        if self.mover.in_transit() {
            return;
        }
        if self.direction_timer >= self.timings.direction_change {
            // Nothing legal: hold this tick and retry on the next one.
            if let Some(dir) = self.choose_direction(maze, rng) {
                self.direction_timer = 0.0;
                self.mover.begin_transit(maze, dir);
            }
            return;
        }
        if let Some(current) = self.mover.direction() {
            if !self.mover.begin_transit(maze, current) {
                self.direction_timer = self.timings.direction_change;
            }
        }
    }

    fn choose_direction(&self, maze: &Maze, rng: &mut Rng) -> Option<Direction> {
        let legal: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| self.mover.can_move(maze, dir))
            .collect();
        if self.mode == GhostMode::Vulnerable {
            return rng.pick(&legal);
        }

        let reverse = self.mover.direction().map(Direction::opposite);
        let forward: Vec<Direction> = legal
            .iter()
            .copied()
            .filter(|&dir| Some(dir) != reverse)
            .collect();
        let candidates = if forward.is_empty() { legal } else { forward };

        let mut best: Option<(i64, Direction)> = None;
        for dir in candidates {
            let Some(next) = maze.resolve_move(self.mover.cell(), dir) else {
                continue;
            };
            let dist = next.distance_sq(self.target);
            if best.map(|(d, _)| dist < d).unwrap_or(true) {
                best = Some((dist, dir));
            }
        }
        best.map(|(_, dir)| dir)
    }

    fn update_animation(&mut self, player: Cell, dt: f32) {
        self.animation_timer += dt;
        if self.animation_timer >= GHOST_ANIMATION_SECS {
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
            self.animation_timer = 0.0;
        }
        let cell = self.mover.cell();
        if let Some(dir) = self.mover.direction() {
            self.eyes = dir;
        } else if self.mode == GhostMode::Chase {
            if player.x > cell.x {
                self.eyes = Direction::Right;
            } else if player.x < cell.x {
                self.eyes = Direction::Left;
            } else if player.y > cell.y {
                self.eyes = Direction::Down;
            } else if player.y < cell.y {
                self.eyes = Direction::Up;
            }
        }
    }

    pub fn reset_to_spawn(&mut self, maze: &Maze, rng: &mut Rng) {
        self.mover.teleport(maze, self.spawn);
        self.mover.set_direction(rng.pick(&Direction::ALL));
        self.mode = GhostMode::Scatter;
        self.mode_timer = 0.0;
        self.direction_timer = 0.0;
        self.target = self.scatter_corner(maze);
    }

    #[cfg(test)]
    pub(crate) fn teleport(&mut self, maze: &Maze, cell: Cell) {
        self.mover.teleport(maze, cell);
    }

    pub fn view(&self) -> GhostView {
        let cell = self.mover.cell();
        let world = self.mover.world();
        GhostView {
            id: self.id,
            x: cell.x,
            y: cell.y,
            world_x: world.x,
            world_y: world.y,
            dir: self.mover.direction(),
            eyes: self.eyes,
            mode: self.mode,
            mode_timer: self.mode_timer,
            target_x: self.target.x,
            target_y: self.target.y,
            animation_frame: self.animation_frame,
        }
    }
}
