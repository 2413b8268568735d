pub const TICK_RATE: u32 = 60;

pub const TILE_SIZE: i32 = 20;

pub const INITIAL_LIVES: u32 = 3;
pub const GHOST_COUNT: usize = 4;

pub const DOT_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;
pub const GHOST_POINTS: u32 = 200;

pub const POWER_DURATION_SECS: f32 = 10.0;
pub const INVINCIBILITY_SECS: f32 = 3.0;

/// World units per tick.
pub const PLAYER_SPEED: f32 = 2.0;
pub const GHOST_SPEED: f32 = 1.5;

pub const SCATTER_SECS: f32 = 7.0;
pub const CHASE_SECS: f32 = 20.0;
pub const VULNERABLE_SECS: f32 = 10.0;
pub const DIRECTION_CHANGE_SECS: f32 = 0.5;

pub const PLAYER_ANIMATION_SECS: f32 = 0.2;
pub const GHOST_ANIMATION_SECS: f32 = 0.15;
pub const ANIMATION_FRAMES: u8 = 8;

/// `#` wall, `.` dot, `o` power pellet, `G` ghost spawn, `P` player spawn.
pub const CLASSIC_LAYOUT: [&str; 25] = [
    "#########################",
    "#...........#...........#",
    "#o###.#####.#.#####.###o#",
    "#.......................#",
    "#.###.#.#########.#.###.#",
    "#.....#.....#.....#.....#",
    "#####.##### # #####.#####",
    "    #.#           #.#    ",
    "#####.# ##GGGGG## #.#####",
    "     .  #GGGGGG#  .      ",
    "#####.# #GGGGGG# #.######",
    "    #.# ######## #.#     ",
    "#####.#     P    #.######",
    "    #.# ######## #.#     ",
    "#####.# #GGGGGG# #.######",
    "     .  #GGGGGG#  .      ",
    "#####.# ######## #.######",
    "    #.#           #.#    ",
    "#####.##### # #####.#####",
    "#.....#.....#.....#.....#",
    "#.###.#.#########.#.###.#",
    "#.......................#",
    "#o###.#####.#.#####.###o#",
    "#...........#...........#",
    "#########################",
];

pub fn tick_seconds(tick_rate: u32) -> f32 {
    1.0 / tick_rate.max(1) as f32
}
