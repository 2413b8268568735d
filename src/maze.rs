use std::path::Path;

use crate::constants::{CLASSIC_LAYOUT, TILE_SIZE};
use crate::error::MazeError;
use crate::types::{Cell, Direction, TileKind, WorldPos};

/// Static maze topology. Collection state lives in the ledger, so one maze
/// serves every round reset unchanged.
#[derive(Clone, Debug)]
pub struct Maze {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    player_spawn: Option<Cell>,
    ghost_spawns: Vec<Cell>,
}

impl Maze {
    pub fn classic() -> Self {
        Self::parse(&CLASSIC_LAYOUT).expect("classic layout is well-formed")
    }

    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let Some(first) = rows.first() else {
            return Err(MazeError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let actual = row.chars().count();
            if actual != width {
                return Err(MazeError::Ragged {
                    row: row_idx,
                    expected: width,
                    actual,
                });
            }
            for (col, found) in row.chars().enumerate() {
                let tile = TileKind::from_char(found).ok_or(MazeError::UnknownTile {
                    row: row_idx,
                    col,
                    found,
                })?;
                tiles.push(tile);
            }
        }

        let (player_spawn, ghost_spawns) = scan_spawns(&tiles, width);
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
            player_spawn,
            ghost_spawns,
        })
    }

    /// Reads a text layout; trailing blank lines are ignored.
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let text = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }
        Self::parse(&rows)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Out of bounds reads as `Wall`.
    pub fn tile_at(&self, x: i32, y: i32) -> TileKind {
        if !self.in_bounds(x, y) {
            return TileKind::Wall;
        }
        self.tiles
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(TileKind::Wall)
    }

    pub fn can_enter(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y) != TileKind::Wall
    }

    /// Player spawn (first found) and ghost spawns in row-major order.
    pub fn spawn_positions(&self) -> (Option<Cell>, &[Cell]) {
        (self.player_spawn, &self.ghost_spawns)
    }

    /// Horizontal edges wrap before the wall check; vertical edges never do.
    pub fn resolve_move(&self, from: Cell, dir: Direction) -> Option<Cell> {
        let next = from.offset(dir);
        if next.y < 0 || next.y >= self.height {
            return None;
        }
        let x = if next.x < 0 {
            self.width - 1
        } else if next.x >= self.width {
            0
        } else {
            next.x
        };
        if self.can_enter(x, next.y) {
            Some(Cell::new(x, next.y))
        } else {
            None
        }
    }

    pub fn grid_to_world(&self, cell: Cell) -> WorldPos {
        WorldPos {
            x: (cell.x * TILE_SIZE + TILE_SIZE / 2) as f32,
            y: (cell.y * TILE_SIZE + TILE_SIZE / 2) as f32,
        }
    }

    pub fn world_to_grid(&self, pos: WorldPos) -> Cell {
        let tile = TILE_SIZE as f32;
        Cell::new((pos.x / tile).floor() as i32, (pos.y / tile).floor() as i32)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.tile_at(x, y).to_char()).collect())
            .collect()
    }

    /// First enterable cell nearest the centre; used when a layout has no `P`.
    pub fn fallback_spawn(&self) -> Cell {
        let centre = Cell::new(self.width / 2, self.height / 2);
        self.cells()
            .filter(|cell| self.can_enter(cell.x, cell.y))
            .min_by_key(|cell| (cell.distance_sq(centre), cell.y, cell.x))
            .unwrap_or(centre)
    }
}

/// First player spawn and every ghost spawn, in row-major order.
fn scan_spawns(tiles: &[TileKind], width: usize) -> (Option<Cell>, Vec<Cell>) {
    let mut player_spawn = None;
    let mut ghost_spawns = Vec::new();
    for (idx, tile) in tiles.iter().enumerate() {
        let cell = Cell::new((idx % width) as i32, (idx / width) as i32);
        match tile {
            TileKind::PlayerSpawn if player_spawn.is_none() => player_spawn = Some(cell),
            TileKind::GhostSpawn => ghost_spawns.push(cell),
            _ => {}
        }
    }
    (player_spawn, ghost_spawns)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::Maze;
    use crate::constants::TILE_SIZE;
    use crate::error::MazeError;
    use crate::types::{Cell, Direction, TileKind, WorldPos};

    fn reachable_from(maze: &Maze, start: Cell) -> HashSet<Cell> {
        let mut out = HashSet::new();
        let mut queue = VecDeque::new();
        out.insert(start);
        queue.push_back(start);
        while let Some(cell) = queue.pop_front() {
            for dir in Direction::ALL {
                if let Some(next) = maze.resolve_move(cell, dir) {
                    if out.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn classic_layout_scans_spawns() {
        let maze = Maze::classic();
        assert_eq!(maze.width(), 25);
        assert_eq!(maze.height(), 25);
        let (player, ghosts) = maze.spawn_positions();
        assert_eq!(player, Some(Cell::new(12, 12)));
        assert!(ghosts.len() >= 4);
        assert_eq!(ghosts[0], Cell::new(10, 8));
        assert_eq!(ghosts[3], Cell::new(13, 8));
    }

    #[test]
    fn out_of_bounds_reads_as_wall_for_any_input() {
        let maze = Maze::classic();
        for (x, y) in [
            (-1, 0),
            (0, -1),
            (25, 3),
            (3, 25),
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MIN, 5),
            (5, i32::MAX),
        ] {
            assert_eq!(maze.tile_at(x, y), TileKind::Wall);
            assert!(!maze.can_enter(x, y));
        }
    }

    #[test]
    fn horizontal_edges_wrap_in_tunnels() {
        let maze = Maze::classic();
        for y in 1..maze.height() - 1 {
            let left_edge = Cell::new(0, y);
            let right_edge = Cell::new(maze.width() - 1, y);
            if maze.can_enter(right_edge.x, y) {
                assert_eq!(maze.resolve_move(left_edge, Direction::Left), Some(right_edge));
            }
            if maze.can_enter(0, y) {
                assert_eq!(maze.resolve_move(right_edge, Direction::Right), Some(left_edge));
            }
        }
        assert_eq!(
            maze.resolve_move(Cell::new(0, 9), Direction::Left),
            Some(Cell::new(24, 9))
        );
    }

    #[test]
    fn vertical_edges_never_wrap() {
        let maze = Maze::parse(&[" . ", " . ", " . "]).expect("valid layout");
        for x in 0..3 {
            assert_eq!(maze.resolve_move(Cell::new(x, 0), Direction::Up), None);
            assert_eq!(maze.resolve_move(Cell::new(x, 2), Direction::Down), None);
        }
        assert_eq!(
            maze.resolve_move(Cell::new(1, 0), Direction::Down),
            Some(Cell::new(1, 1))
        );
    }

    #[test]
    fn walls_block_moves() {
        let maze = Maze::parse(&["#####", "#.#.#", "#####"]).expect("valid layout");
        assert_eq!(maze.resolve_move(Cell::new(1, 1), Direction::Right), None);
        assert_eq!(maze.resolve_move(Cell::new(1, 1), Direction::Up), None);
    }

    #[test]
    fn coordinate_conversion_round_trips_cell_centres() {
        let maze = Maze::classic();
        let centre = maze.grid_to_world(Cell::new(3, 4));
        let half = (TILE_SIZE / 2) as f32;
        assert_eq!(
            centre,
            WorldPos {
                x: 3.0 * TILE_SIZE as f32 + half,
                y: 4.0 * TILE_SIZE as f32 + half,
            }
        );
        assert_eq!(maze.world_to_grid(centre), Cell::new(3, 4));
        assert_eq!(
            maze.world_to_grid(WorldPos { x: 59.9, y: 0.0 }),
            Cell::new(2, 0)
        );
    }

    #[test]
    fn parse_rejects_bad_layouts() {
        let empty: [&str; 0] = [];
        assert!(matches!(Maze::parse(&empty), Err(MazeError::Empty)));
        assert!(matches!(
            Maze::parse(&["###", "##"]),
            Err(MazeError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            Maze::parse(&["#x#"]),
            Err(MazeError::UnknownTile { found: 'x', .. })
        ));
    }

    #[test]
    fn first_player_spawn_wins() {
        let maze = Maze::parse(&["P..P", "G..G"]).expect("valid layout");
        let (player, ghosts) = maze.spawn_positions();
        assert_eq!(player, Some(Cell::new(0, 0)));
        assert_eq!(ghosts, &[Cell::new(0, 1), Cell::new(3, 1)]);
    }

    #[test]
    fn classic_collectibles_are_reachable_from_player_spawn() {
        let maze = Maze::classic();
        let (Some(spawn), _) = maze.spawn_positions() else {
            panic!("classic layout has a player spawn");
        };
        let reachable = reachable_from(&maze, spawn);
        for cell in maze.cells() {
            let tile = maze.tile_at(cell.x, cell.y);
            if matches!(tile, TileKind::Dot | TileKind::PowerPellet) {
                assert!(reachable.contains(&cell), "unreachable collectible at {cell:?}");
            }
        }
    }

    #[test]
    fn rows_render_back_to_layout() {
        let layout = ["#####", "#Po.#", "# G #", "#####"];
        let maze = Maze::parse(&layout).expect("valid layout");
        assert_eq!(maze.rows(), layout.iter().map(|r| r.to_string()).collect::<Vec<_>>());
    }
}
