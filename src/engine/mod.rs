use crate::config::GameConfig;
use crate::constants::GHOST_POINTS;
use crate::ghost::Ghost;
use crate::ledger::Ledger;
use crate::maze::Maze;
use crate::player::Player;
use crate::rng::Rng;
use crate::types::{Cell, Direction, GameEvent, GamePhase, GhostMode, PowerState, Snapshot};

mod collision_system;
mod spawn_system;

/// Round coordinator. Owns every piece of mutable session state; all of it
/// changes inside `step` or the input methods, never anywhere else.
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub config: GameConfig,
    pub seed: u32,

    maze: Maze,
    ledger: Ledger,
    player: Player,
    ghosts: Vec<Ghost>,
    rng: Rng,
    events: Vec<GameEvent>,
    tick_seconds: f32,

    score: u32,
    high_score: u32,
    lives: u32,
    phase: GamePhase,
    power_active: bool,
    power_timer: f32,
    tick_counter: u64,
}

impl GameEngine {
    pub fn new(maze: Maze, config: GameConfig, seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let player_spawn = Self::resolve_player_spawn(&maze);
        let player = Player::new(
            &maze,
            player_spawn,
            config.player_speed,
            config.invincibility_secs,
        );
        let ghosts = Self::spawn_ghosts(&maze, &config, &mut rng, player_spawn);
        let ledger = Ledger::new(&maze);

        Self {
            tick_seconds: config.tick_seconds(),
            lives: config.initial_lives,
            config,
            seed,
            maze,
            ledger,
            player,
            ghosts,
            rng,
            events: vec![GameEvent::GameStarted],
            score: 0,
            high_score: 0,
            phase: GamePhase::Playing,
            power_active: false,
            power_timer: 0.0,
            tick_counter: 0,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn tick(&self) -> u64 {
        self.tick_counter
    }

    pub fn player_cell(&self) -> Cell {
        self.player.cell()
    }

    pub fn player_in_transit(&self) -> bool {
        self.player.in_transit()
    }

    pub fn is_powered(&self) -> bool {
        self.power_active
    }

    pub fn ghost_cells(&self) -> impl Iterator<Item = (Cell, GhostMode)> + '_ {
        self.ghosts.iter().map(|ghost| (ghost.cell(), ghost.mode()))
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }

    /// One fixed-timestep tick. Does nothing outside `Playing`.
    pub fn step(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.tick_counter += 1;

        self.player.update(&self.maze, self.tick_seconds);
        let player_cell = self.player.cell();
        for ghost in &mut self.ghosts {
            ghost.update(&self.maze, player_cell, &mut self.rng, self.tick_seconds);
        }

        self.resolve_collectibles();
        self.resolve_ghost_collisions();
        self.update_power_mode();

        if self.phase == GamePhase::Playing && self.ledger.all_collected() {
            self.finish(GamePhase::Victory);
        }
    }

    pub fn queue_direction(&mut self, dir: Direction) {
        if self.phase == GamePhase::Playing {
            self.player.queue_direction(dir);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    pub fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.phase = GamePhase::Playing;
        self.ledger.reset();
        self.player.reset(&self.maze);
        self.cancel_power_mode();
        self.reset_all_ghosts();
        self.events.push(GameEvent::GameStarted);
    }

    fn finish(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.high_score = self.high_score.max(self.score);
        self.events.push(match phase {
            GamePhase::Victory => GameEvent::Victory,
            _ => GameEvent::GameOver,
        });
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let snapshot = Snapshot {
            tick: self.tick_counter,
            phase: self.phase,
            score: self.score,
            high_score: self.high_score.max(self.score),
            lives: self.lives,
            power_active: self.power_active,
            power_time_left: self.power_timer.max(0.0),
            remaining_dots: self.ledger.remaining_dots(),
            total_dots: self.ledger.total_dots(),
            player: self.player.view(),
            ghosts: self.ghosts.iter().map(|ghost| ghost.view()).collect(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    #[cfg(test)]
    fn player_teleport(&mut self, cell: Cell) {
        self.player.teleport(&self.maze, cell);
    }

    #[cfg(test)]
    fn ghost_teleport(&mut self, idx: usize, cell: Cell) {
        self.ghosts[idx].teleport(&self.maze, cell);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::constants::DOT_POINTS;
    use crate::engine::GameEngine;
    use crate::maze::Maze;
    use crate::types::{Cell, Direction, GameEvent, GamePhase, GhostMode};

    fn corridor_round() -> GameEngine {
        let maze = Maze::parse(&[
            "###########",
            "#P..     .#",
            "# ####### #",
            "#    G    #",
            "###########",
        ])
        .expect("valid layout");
        GameEngine::new(maze, GameConfig::default(), 2024)
    }

    fn drain(engine: &mut GameEngine) -> Vec<GameEvent> {
        engine.build_snapshot(true).events
    }

    #[test]
    fn fresh_round_state() {
        let mut engine = corridor_round();
        let snapshot = engine.build_snapshot(true);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.remaining_dots, 3);
        assert_eq!((snapshot.player.x, snapshot.player.y), (1, 1));
        assert_eq!(snapshot.events, vec![GameEvent::GameStarted]);
        assert!(engine.build_snapshot(true).events.is_empty());
    }

    #[test]
    fn eating_a_dot_then_getting_caught() {
        let mut engine = corridor_round();
        drain(&mut engine);

        engine.queue_direction(Direction::Right);
        engine.step();
        assert_eq!(engine.player_cell(), Cell::new(2, 1));
        assert_eq!(engine.score(), DOT_POINTS);
        assert_eq!(engine.ledger().remaining_dots(), 2);
        assert_eq!(engine.lives(), 3);
        assert!(drain(&mut engine).contains(&GameEvent::DotCollected { x: 2, y: 1 }));

        let player_cell = engine.player_cell();
        engine.ghost_teleport(0, player_cell);
        engine.resolve_ghost_collisions();

        assert_eq!(engine.lives(), 2);
        assert_eq!(engine.player_cell(), Cell::new(1, 1));
        assert!(engine.player.is_invincible());
        for ghost in &engine.ghosts {
            assert_eq!(ghost.cell(), ghost.spawn());
            assert_eq!(ghost.mode(), GhostMode::Scatter);
        }
        assert!(!engine.is_powered());
        assert!(drain(&mut engine).contains(&GameEvent::PlayerCaught { lives_left: 2 }));
    }

    #[test]
    fn ghost_walking_into_the_player_costs_a_life() {
        let maze = Maze::parse(&["########", "#.P   G#", "########"]).expect("valid layout");
        let config = GameConfig {
            ghost_count: 1,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(maze, config, 77);
        drain(&mut engine);

        engine.queue_direction(Direction::Left);
        let mut events = Vec::new();
        for _ in 0..300 {
            engine.step();
            events.extend(drain(&mut engine));
            if engine.lives() < 3 {
                break;
            }
        }

        assert_eq!(engine.score(), DOT_POINTS);
        assert!(events.contains(&GameEvent::DotCollected { x: 1, y: 1 }));
        assert!(events.contains(&GameEvent::PlayerCaught { lives_left: 2 }));
        assert_eq!(engine.lives(), 2);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.player_cell(), Cell::new(2, 1));
        assert!(engine.player.is_invincible());
        assert_eq!(engine.ghosts[0].cell(), Cell::new(6, 1));
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Scatter);
    }

    #[test]
    fn invincibility_shields_until_it_runs_out() {
        let mut engine = corridor_round();
        let spawn = engine.player_cell();
        engine.ghost_teleport(0, spawn);
        engine.resolve_ghost_collisions();
        assert_eq!(engine.lives(), 2);

        engine.ghost_teleport(0, spawn);
        engine.resolve_ghost_collisions();
        assert_eq!(engine.lives(), 2);

        while engine.player.is_invincible() {
            engine.player.update(&engine.maze, engine.tick_seconds);
        }
        engine.ghost_teleport(0, spawn);
        engine.resolve_ghost_collisions();
        assert_eq!(engine.lives(), 1);
    }

    #[test]
    fn collecting_every_dot_wins() {
        let mut engine = corridor_round();
        for x in [2, 3] {
            engine.player_teleport(Cell::new(x, 1));
            engine.resolve_collectibles();
        }
        engine.player_teleport(Cell::new(9, 1));
        engine.step();
        assert_eq!(engine.phase(), GamePhase::Victory);
        assert!(drain(&mut engine).contains(&GameEvent::Victory));
        assert_eq!(engine.high_score(), 3 * DOT_POINTS);

        let tick = engine.tick();
        engine.step();
        assert_eq!(engine.tick(), tick);
    }

    #[test]
    fn pause_freezes_and_resumes() {
        let mut engine = corridor_round();
        engine.queue_direction(Direction::Right);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Paused);
        let before = engine.build_snapshot(false);
        for _ in 0..30 {
            engine.step();
        }
        let after = engine.build_snapshot(false);
        assert_eq!(before.tick, after.tick);
        assert_eq!(before.player.world_x, after.player.world_x);

        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Playing);
        engine.step();
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn pause_is_ignored_once_the_round_ends() {
        let mut engine = corridor_round();
        engine.lives = 1;
        let spawn = engine.player_cell();
        engine.ghost_teleport(0, spawn);
        engine.resolve_ghost_collisions();
        assert_eq!(engine.phase(), GamePhase::GameOver);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn restart_restores_a_fresh_round_and_keeps_high_score() {
        let mut engine = corridor_round();
        engine.queue_direction(Direction::Right);
        for _ in 0..40 {
            engine.step();
        }
        let earned = engine.score();
        assert!(earned > 0);
        engine.lives = 1;
        let cell = engine.player_cell();
        engine.ghost_teleport(0, cell);
        engine.resolve_ghost_collisions();
        assert_eq!(engine.phase(), GamePhase::GameOver);

        engine.restart();
        let snapshot = engine.build_snapshot(true);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.high_score, earned);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.remaining_dots, 3);
        assert_eq!((snapshot.player.x, snapshot.player.y), (1, 1));
        assert!(snapshot.player.invincible_secs == 0.0);
        assert!(snapshot.events.contains(&GameEvent::GameStarted));
    }

    #[test]
    fn vulnerability_window_follows_pellet() {
        let mut engine = GameEngine::new(Maze::classic(), GameConfig::default(), 99);
        engine.player_teleport(Cell::new(1, 2));
        engine.resolve_collectibles();
        assert!(engine.ghosts.iter().all(|g| g.is_vulnerable()));

        let mut ticks: i32 = 0;
        while engine.ghosts.iter().any(|g| g.is_vulnerable()) {
            let cell = engine.player_cell();
            for ghost in &mut engine.ghosts {
                ghost.update(&engine.maze, cell, &mut engine.rng, engine.tick_seconds);
            }
            engine.update_power_mode();
            ticks += 1;
            assert!(ticks < 2_000);
        }
        assert!((ticks - 600).abs() <= 1, "ticks={ticks}");
        assert!(engine.ghosts.iter().all(|g| g.mode() == GhostMode::Scatter));
        assert!(!engine.is_powered());
    }

    #[test]
    fn same_seed_produces_same_progression() {
        let mut a = GameEngine::new(Maze::classic(), GameConfig::default(), 424_242);
        let mut b = GameEngine::new(Maze::classic(), GameConfig::default(), 424_242);
        let script = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        for tick in 0..3_000usize {
            if tick % 90 == 0 {
                let dir = script[(tick / 90) % script.len()];
                a.queue_direction(dir);
                b.queue_direction(dir);
            }
            a.step();
            b.step();
            let sa = a.build_snapshot(true);
            let sb = b.build_snapshot(true);
            assert_eq!(sa.score, sb.score);
            assert_eq!(sa.lives, sb.lives);
            assert_eq!(sa.phase, sb.phase);
            assert_eq!((sa.player.x, sa.player.y), (sb.player.x, sb.player.y));
            for (ga, gb) in sa.ghosts.iter().zip(sb.ghosts.iter()) {
                assert_eq!((ga.x, ga.y), (gb.x, gb.y));
                assert_eq!(ga.mode, gb.mode);
            }
            assert_eq!(sa.events, sb.events);
        }
    }

    #[test]
    fn snapshot_serializes_with_camel_case_fields() {
        let mut engine = corridor_round();
        let snapshot = engine.build_snapshot(true);
        let value = serde_json::to_value(&snapshot).expect("snapshot should serialize");
        assert_eq!(value["phase"], "playing");
        assert_eq!(value["remainingDots"], 3);
        assert_eq!(value["events"][0]["type"], "game_started");
        assert!(value["player"]["worldX"].is_number());
    }
}
