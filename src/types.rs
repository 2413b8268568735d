use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Raw neighbour, no wrapping or bounds applied.
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_sq(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order doubles as the tie-break order for ghost steering.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Empty,
    Wall,
    Dot,
    PowerPellet,
    GhostSpawn,
    PlayerSpawn,
}

impl TileKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            '.' => Some(Self::Dot),
            'o' => Some(Self::PowerPellet),
            'G' => Some(Self::GhostSpawn),
            'P' => Some(Self::PlayerSpawn),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Dot => '.',
            Self::PowerPellet => 'o',
            Self::GhostSpawn => 'G',
            Self::PlayerSpawn => 'P',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    Scatter,
    Chase,
    Vulnerable,
    /// Signalling only: a captured ghost is teleported home, never walked back.
    Returning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    Normal,
    Powered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    GameOver,
    Victory,
    Paused,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted,
    DotCollected {
        x: i32,
        y: i32,
    },
    PelletCollected {
        x: i32,
        y: i32,
    },
    #[serde(rename = "adversary_eaten")]
    GhostEaten {
        #[serde(rename = "ghostId")]
        ghost_id: usize,
        x: i32,
        y: i32,
    },
    PlayerCaught {
        #[serde(rename = "livesLeft")]
        lives_left: u32,
    },
    Victory,
    GameOver,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GameStarted => "game_started",
            Self::DotCollected { .. } => "dot_collected",
            Self::PelletCollected { .. } => "pellet_collected",
            Self::GhostEaten { .. } => "adversary_eaten",
            Self::PlayerCaught { .. } => "player_caught",
            Self::Victory => "victory",
            Self::GameOver => "game_over",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "worldX")]
    pub world_x: f32,
    #[serde(rename = "worldY")]
    pub world_y: f32,
    pub dir: Option<Direction>,
    pub facing: Direction,
    pub power: PowerState,
    #[serde(rename = "invincibleSecs")]
    pub invincible_secs: f32,
    #[serde(rename = "animationFrame")]
    pub animation_frame: u8,
    pub moving: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub id: usize,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "worldX")]
    pub world_x: f32,
    #[serde(rename = "worldY")]
    pub world_y: f32,
    pub dir: Option<Direction>,
    pub eyes: Direction,
    pub mode: GhostMode,
    #[serde(rename = "modeTimer")]
    pub mode_timer: f32,
    #[serde(rename = "targetX")]
    pub target_x: i32,
    #[serde(rename = "targetY")]
    pub target_y: i32,
    #[serde(rename = "animationFrame")]
    pub animation_frame: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u32,
    #[serde(rename = "highScore")]
    pub high_score: u32,
    pub lives: u32,
    #[serde(rename = "powerActive")]
    pub power_active: bool,
    #[serde(rename = "powerTimeLeft")]
    pub power_time_left: f32,
    #[serde(rename = "remainingDots")]
    pub remaining_dots: usize,
    #[serde(rename = "totalDots")]
    pub total_dots: usize,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub events: Vec<GameEvent>,
}
