use clap::Parser;
use maze_chase::appearance::{render_ascii, resolve_entities};
use maze_chase::audio::{CueTally, SoundBoard};
use maze_chase::autopilot::Autopilot;
use maze_chase::config::GameConfig;
use maze_chase::engine::GameEngine;
use maze_chase::error::{ConfigError, MazeError};
use maze_chase::log::{emit_log, now_ms};
use maze_chase::maze::Maze;
use maze_chase::rng::Rng;
use maze_chase::types::{GameEvent, GamePhase};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u32>,
    /// Hard stop even if the round has not ended.
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,
    #[arg(long)]
    maze: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    lives: Option<u32>,
    #[arg(long)]
    ghosts: Option<usize>,
    /// Dump an ASCII frame to stderr every N ticks.
    #[arg(long)]
    frames: Option<u64>,
    /// Sprite asset the renderer has loaded; repeatable. Everything else
    /// falls back to a coloured shape in frame dumps.
    #[arg(long = "sprite")]
    sprites: Vec<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Clone, Debug, Default, Serialize)]
struct RunSummary {
    seed: u32,
    ticks: u64,
    phase: Option<GamePhase>,
    score: u32,
    #[serde(rename = "highScore")]
    high_score: u32,
    lives: u32,
    #[serde(rename = "dotsCollected")]
    dots_collected: usize,
    #[serde(rename = "totalDots")]
    total_dots: usize,
    #[serde(rename = "pelletsCollected")]
    pellets_collected: usize,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: usize,
    #[serde(rename = "timesCaught")]
    times_caught: usize,
    #[serde(rename = "autopilotDecisions")]
    autopilot_decisions: u64,
    #[serde(rename = "durationMs")]
    duration_ms: u64,
    cues: BTreeMap<String, usize>,
}

fn main() {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(Rng::entropy_seed);

    let engine = match build_engine(&cli, seed) {
        Ok(engine) => engine,
        Err(error) => {
            emit_log(
                "error",
                "setup_failed",
                Some(seed),
                None,
                json!({ "error": error.to_string() }),
            );
            std::process::exit(2);
        }
    };

    emit_log(
        "info",
        "run_started",
        Some(seed),
        None,
        json!({
            "ticks": cli.ticks,
            "ghosts": engine.config.ghost_count,
            "lives": engine.config.initial_lives,
            "totalDots": engine.ledger().total_dots(),
        }),
    );

    let sprites: HashSet<String> = cli.sprites.iter().cloned().collect();
    let summary = run(engine, cli.ticks, cli.frames, &sprites);

    println!(
        "{}",
        serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string())
    );

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                Some(seed),
                Some(summary.ticks),
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        Some(seed),
        Some(summary.ticks),
        json!({
            "phase": summary.phase,
            "score": summary.score,
            "lives": summary.lives,
            "durationMs": summary.duration_ms,
            "summaryOut": summary_out_written,
        }),
    );
}

fn build_engine(cli: &Cli, seed: u32) -> Result<GameEngine, SetupError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(lives) = cli.lives {
        config.initial_lives = lives;
    }
    if let Some(ghosts) = cli.ghosts {
        config.ghost_count = ghosts;
    }
    config.validate()?;

    let maze = match cli.maze.as_deref() {
        Some(path) => Maze::load(path)?,
        None => Maze::classic(),
    };
    Ok(GameEngine::new(maze, config, seed))
}

fn run(
    mut engine: GameEngine,
    max_ticks: u64,
    frames: Option<u64>,
    sprites: &HashSet<String>,
) -> RunSummary {
    let started_at_ms = now_ms();
    let seed = engine.seed;
    let mut pilot = Autopilot::new();
    let mut board = SoundBoard::new(CueTally::default());
    let mut summary = RunSummary {
        seed,
        total_dots: engine.ledger().total_dots(),
        ..RunSummary::default()
    };
    let mut last_phase = engine.phase();

    for _ in 0..max_ticks {
        pilot.drive(&mut engine);
        engine.step();
        let snapshot = engine.build_snapshot(true);
        board.dispatch(&snapshot.events);
        tally_events(&mut summary, &snapshot.events);

        if snapshot.phase != last_phase {
            emit_log(
                "info",
                "phase_changed",
                Some(seed),
                Some(snapshot.tick),
                json!({
                    "from": last_phase,
                    "to": snapshot.phase,
                    "score": snapshot.score,
                }),
            );
            last_phase = snapshot.phase;
        }

        if let Some(every) = frames.filter(|every| *every > 0) {
            if snapshot.tick % every == 0 {
                emit_log(
                    "info",
                    "frame",
                    Some(seed),
                    Some(snapshot.tick),
                    frame_details(&engine, sprites),
                );
            }
        }

        if engine.is_ended() {
            break;
        }
    }

    summary.ticks = engine.tick();
    summary.phase = Some(engine.phase());
    summary.score = engine.score();
    summary.high_score = engine.high_score().max(engine.score());
    summary.lives = engine.lives();
    summary.autopilot_decisions = pilot.decisions();
    summary.cues = board.sink().counts.clone();
    summary.duration_ms = now_ms().saturating_sub(started_at_ms);
    summary
}

fn frame_details(engine: &GameEngine, sprites: &HashSet<String>) -> serde_json::Value {
    json!({
        "rows": render_ascii(engine),
        "entities": resolve_entities(engine, sprites),
    })
}

fn tally_events(summary: &mut RunSummary, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::DotCollected { .. } => summary.dots_collected += 1,
            GameEvent::PelletCollected { .. } => summary.pellets_collected += 1,
            GameEvent::GhostEaten { .. } => summary.ghosts_eaten += 1,
            GameEvent::PlayerCaught { .. } => summary.times_caught += 1,
            _ => {}
        }
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    std::fs::write(path, summary_text)
}
