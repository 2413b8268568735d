use crate::constants::{ANIMATION_FRAMES, PLAYER_ANIMATION_SECS};
use crate::maze::Maze;
use crate::mover::Mover;
use crate::types::{Cell, Direction, PlayerView, PowerState};

#[derive(Clone, Debug)]
pub struct Player {
    mover: Mover,
    spawn: Cell,
    facing: Direction,
    queued: Option<Direction>,
    pub power: PowerState,
    invincibility: f32,
    invincibility_secs: f32,
    animation_frame: u8,
    animation_timer: f32,
}

impl Player {
    pub fn new(maze: &Maze, spawn: Cell, speed: f32, invincibility_secs: f32) -> Self {
        Self {
            mover: Mover::new(maze, spawn, speed),
            spawn,
            facing: Direction::Right,
            queued: None,
            power: PowerState::Normal,
            invincibility: 0.0,
            invincibility_secs,
            animation_frame: 0,
            animation_timer: 0.0,
        }
    }

    pub fn cell(&self) -> Cell {
        self.mover.cell()
    }

    pub fn spawn(&self) -> Cell {
        self.spawn
    }

    pub fn direction(&self) -> Option<Direction> {
        self.mover.direction()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn queued(&self) -> Option<Direction> {
        self.queued
    }

    pub fn in_transit(&self) -> bool {
        self.mover.in_transit()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    /// Buffered: kept until a decision point where the maze allows it.
    pub fn queue_direction(&mut self, dir: Direction) {
        self.queued = Some(dir);
    }

    pub fn update(&mut self, maze: &Maze, dt: f32) {
        self.decide(maze);
        self.mover.advance();
        self.update_animation(dt);
        if self.invincibility > 0.0 {
            self.invincibility -= dt;
            if self.invincibility <= 0.0 {
                self.invincibility = 0.0;
            }
        }
    }

    fn decide(&mut self, maze: &Maze) {
        if self.mover.in_transit() {
            return;
        }
        if let Some(queued) = self.queued {
            if self.mover.begin_transit(maze, queued) {
                self.facing = queued;
                self.queued = None;
                return;
            }
        }
        if let Some(current) = self.mover.direction() {
            if !self.mover.begin_transit(maze, current) {
                self.mover.set_direction(None);
            }
        }
    }

    fn update_animation(&mut self, dt: f32) {
        if self.mover.in_transit() || self.mover.direction().is_some() {
            self.animation_timer += dt;
            if self.animation_timer >= PLAYER_ANIMATION_SECS {
                self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
                self.animation_timer = 0.0;
            }
        } else {
            self.animation_frame = 0;
        }
    }

    /// Back to spawn with every transient cleared, no grace window.
    pub fn reset(&mut self, maze: &Maze) {
        self.mover.teleport(maze, self.spawn);
        self.mover.set_direction(None);
        self.queued = None;
        self.facing = Direction::Right;
        self.power = PowerState::Normal;
        self.invincibility = 0.0;
        self.animation_frame = 0;
        self.animation_timer = 0.0;
    }

    pub fn respawn(&mut self, maze: &Maze) {
        self.reset(maze);
        self.invincibility = self.invincibility_secs;
    }

    #[cfg(test)]
    pub(crate) fn teleport(&mut self, maze: &Maze, cell: Cell) {
        self.mover.teleport(maze, cell);
    }

    pub fn view(&self) -> PlayerView {
        let world = self.mover.world();
        let cell = self.mover.cell();
        PlayerView {
            x: cell.x,
            y: cell.y,
            world_x: world.x,
            world_y: world.y,
            dir: self.mover.direction(),
            facing: self.facing,
            power: self.power,
            invincible_secs: self.invincibility,
            animation_frame: self.animation_frame,
            moving: self.mover.in_transit(),
        }
    }
}
