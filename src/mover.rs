use crate::constants::TILE_SIZE;
use crate::maze::Maze;
use crate::types::{Cell, Direction, WorldPos};

/// Grid-cell plus interpolated world position shared by the player and ghosts.
///
/// The grid cell switches to the destination the moment a transit begins, so
/// collision checks always see the cell the entity is moving into. The world
/// position then glides toward that cell's centre at `speed` units per tick.
#[derive(Clone, Debug)]
pub struct Mover {
    cell: Cell,
    world: WorldPos,
    target: WorldPos,
    direction: Option<Direction>,
    speed: f32,
    in_transit: bool,
}

impl Mover {
    pub fn new(maze: &Maze, cell: Cell, speed: f32) -> Self {
        let world = maze.grid_to_world(cell);
        Self {
            cell,
            world,
            target: world,
            direction: None,
            speed,
            in_transit: false,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn world(&self) -> WorldPos {
        self.world
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction;
    }

    pub fn in_transit(&self) -> bool {
        self.in_transit
    }

    pub fn can_move(&self, maze: &Maze, dir: Direction) -> bool {
        maze.resolve_move(self.cell, dir).is_some()
    }

    /// Starts a one-cell transit. Validity is checked here and never again
    /// mid-flight. Returns false (leaving state untouched) on a wall.
    pub fn begin_transit(&mut self, maze: &Maze, dir: Direction) -> bool {
        let Some(next) = maze.resolve_move(self.cell, dir) else {
            return false;
        };
        let target = maze.grid_to_world(next);
        if next != self.cell.offset(dir) {
            // Wrapped through a side tunnel: enter from just beyond the far edge.
            let (dx, dy) = dir.delta();
            self.world = WorldPos {
                x: target.x - (dx * TILE_SIZE) as f32,
                y: target.y - (dy * TILE_SIZE) as f32,
            };
        }
        self.cell = next;
        self.target = target;
        self.direction = Some(dir);
        self.in_transit = true;
        true
    }

    /// One tick of interpolation. Snaps onto the target once the remaining
    /// distance is within a single tick's travel.
    pub fn advance(&mut self) {
        if !self.in_transit {
            return;
        }
        let distance = self.world.distance(self.target);
        if distance <= self.speed {
            self.world = self.target;
            self.in_transit = false;
            return;
        }
        self.world.x += (self.target.x - self.world.x) / distance * self.speed;
        self.world.y += (self.target.y - self.world.y) / distance * self.speed;
    }

    pub fn teleport(&mut self, maze: &Maze, cell: Cell) {
        self.cell = cell;
        self.world = maze.grid_to_world(cell);
        self.target = self.world;
        self.in_transit = false;
    }
}
