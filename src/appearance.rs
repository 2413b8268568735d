use std::collections::HashSet;

use serde::Serialize;

use crate::engine::GameEngine;
use crate::ledger::CollectibleKind;
use crate::types::{GhostMode, TileKind};

const GHOST_COLORS: [&str; 4] = ["#ff0000", "#ffb8ff", "#00ffff", "#ffb852"];
const VULNERABLE_COLOR: &str = "#2121de";
const PLAYER_COLOR: &str = "#ffff00";
const DOT_COLOR: &str = "#ffb8ae";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Ghost { id: usize, mode: GhostMode },
    Dot,
    PowerPellet,
}

impl EntityKind {
    pub fn asset_name(self) -> String {
        match self {
            Self::Player => "player".to_string(),
            Self::Ghost {
                mode: GhostMode::Vulnerable,
                ..
            } => "ghost_vulnerable".to_string(),
            Self::Ghost { id, .. } => format!("ghost_{}", id % GHOST_COLORS.len()),
            Self::Dot => "dot".to_string(),
            Self::PowerPellet => "power_pellet".to_string(),
        }
    }

    pub fn fallback_color(self) -> &'static str {
        match self {
            Self::Player => PLAYER_COLOR,
            Self::Ghost {
                mode: GhostMode::Vulnerable,
                ..
            } => VULNERABLE_COLOR,
            Self::Ghost { id, .. } => GHOST_COLORS[id % GHOST_COLORS.len()],
            Self::Dot | Self::PowerPellet => DOT_COLOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Appearance {
    Sprite { asset: String },
    Shape { color: &'static str },
}

impl Appearance {
    /// Sprite when the renderer has the asset loaded, coloured shape otherwise.
    pub fn resolve(kind: EntityKind, loaded: &HashSet<String>) -> Self {
        let asset = kind.asset_name();
        if loaded.contains(&asset) {
            Self::Sprite { asset }
        } else {
            Self::Shape {
                color: kind.fallback_color(),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityAppearance {
    pub x: i32,
    pub y: i32,
    pub appearance: Appearance,
}

/// Resolved look of every moving entity and pending item, player last.
pub fn resolve_entities(engine: &GameEngine, loaded: &HashSet<String>) -> Vec<EntityAppearance> {
    let mut out = Vec::new();
    for item in engine.ledger().items().iter().filter(|item| !item.collected) {
        let kind = match item.kind {
            CollectibleKind::Dot => EntityKind::Dot,
            CollectibleKind::PowerPellet => EntityKind::PowerPellet,
        };
        out.push(EntityAppearance {
            x: item.cell.x,
            y: item.cell.y,
            appearance: Appearance::resolve(kind, loaded),
        });
    }
    for (id, (cell, mode)) in engine.ghost_cells().enumerate() {
        out.push(EntityAppearance {
            x: cell.x,
            y: cell.y,
            appearance: Appearance::resolve(EntityKind::Ghost { id, mode }, loaded),
        });
    }
    let player = engine.player_cell();
    out.push(EntityAppearance {
        x: player.x,
        y: player.y,
        appearance: Appearance::resolve(EntityKind::Player, loaded),
    });
    out
}

/// Text frame of the current round: `#` wall, `.` dot, `o` pellet, `C`
/// player, `G` ghost, `w` vulnerable ghost.
pub fn render_ascii(engine: &GameEngine) -> Vec<String> {
    let maze = engine.maze();
    let width = maze.width().max(0) as usize;
    let mut grid: Vec<Vec<char>> = (0..maze.height())
        .map(|y| {
            (0..maze.width())
                .map(|x| match maze.tile_at(x, y) {
                    TileKind::Wall => '#',
                    _ => ' ',
                })
                .collect()
        })
        .collect();

    let mut put = |x: i32, y: i32, glyph: char| {
        if x < 0 || y < 0 || x as usize >= width {
            return;
        }
        if let Some(row) = grid.get_mut(y as usize) {
            row[x as usize] = glyph;
        }
    };

    for item in engine.ledger().items().iter().filter(|item| !item.collected) {
        let glyph = match item.kind {
            CollectibleKind::Dot => '.',
            CollectibleKind::PowerPellet => 'o',
        };
        put(item.cell.x, item.cell.y, glyph);
    }
    for (cell, mode) in engine.ghost_cells() {
        let glyph = if mode == GhostMode::Vulnerable { 'w' } else { 'G' };
        put(cell.x, cell.y, glyph);
    }
    let player = engine.player_cell();
    put(player.x, player.y, 'C');

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}
