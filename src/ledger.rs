use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{DOT_POINTS, POWER_PELLET_POINTS};
use crate::maze::Maze;
use crate::types::{Cell, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Dot,
    PowerPellet,
}

impl CollectibleKind {
    pub fn points(self) -> u32 {
        match self {
            Self::Dot => DOT_POINTS,
            Self::PowerPellet => POWER_PELLET_POINTS,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Collectible {
    pub cell: Cell,
    pub kind: CollectibleKind,
    pub points: u32,
    pub collected: bool,
}

/// What a single `resolve_at` call picked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pickup {
    pub points: u32,
    pub dots: u32,
    pub power_pellet: bool,
}

impl Pickup {
    pub fn is_empty(&self) -> bool {
        self.points == 0 && self.dots == 0 && !self.power_pellet
    }
}

#[derive(Clone, Debug)]
pub struct Ledger {
    items: Vec<Collectible>,
    by_cell: HashMap<Cell, Vec<usize>>,
    total_dots: usize,
    collected_dots: usize,
}

impl Ledger {
    pub fn new(maze: &Maze) -> Self {
        let mut items = Vec::new();
        let mut by_cell: HashMap<Cell, Vec<usize>> = HashMap::new();
        let mut total_dots = 0;
        for cell in maze.cells() {
            let kind = match maze.tile_at(cell.x, cell.y) {
                TileKind::Dot => {
                    total_dots += 1;
                    CollectibleKind::Dot
                }
                TileKind::PowerPellet => CollectibleKind::PowerPellet,
                _ => continue,
            };
            by_cell.entry(cell).or_default().push(items.len());
            items.push(Collectible {
                cell,
                kind,
                points: kind.points(),
                collected: false,
            });
        }
        Self {
            items,
            by_cell,
            total_dots,
            collected_dots: 0,
        }
    }

    /// Collects everything still uncollected at `cell`. Repeat calls award nothing.
    pub fn resolve_at(&mut self, cell: Cell) -> Pickup {
        let mut pickup = Pickup::default();
        let Some(indices) = self.by_cell.get(&cell) else {
            return pickup;
        };
        for &idx in indices {
            let Some(item) = self.items.get_mut(idx) else {
                continue;
            };
            if item.collected {
                continue;
            }
            item.collected = true;
            pickup.points += item.points;
            match item.kind {
                CollectibleKind::Dot => {
                    pickup.dots += 1;
                    self.collected_dots += 1;
                }
                CollectibleKind::PowerPellet => pickup.power_pellet = true,
            }
        }
        pickup
    }

    pub fn is_pending(&self, cell: Cell) -> bool {
        self.by_cell
            .get(&cell)
            .is_some_and(|indices| indices.iter().any(|&idx| !self.items[idx].collected))
    }

    pub fn total_dots(&self) -> usize {
        self.total_dots
    }

    pub fn remaining_dots(&self) -> usize {
        self.total_dots - self.collected_dots
    }

    pub fn all_collected(&self) -> bool {
        self.remaining_dots() == 0
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.collected = false;
        }
        self.collected_dots = 0;
    }
}
