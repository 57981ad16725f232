//! Uniform-grid broad phase.
//!
//! Bodies are bucketed by the cell containing their centre. With a cell
//! size of at least one maximum diameter, two touching bodies always sit
//! in the same or adjacent cells, so scanning the 3x3 neighbourhood of
//! each body finds every possible contact.
//!
//! Cells are hashed by integer key and only occupied cells exist, so a
//! rebuild costs O(n) regardless of viewport size. Indices are valid for
//! one tick only.

use std::collections::HashMap;

use crate::core::Vec2;
use crate::domain::Body;

/// Integer cell coordinate, `floor(position / cell_size)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    #[inline]
    pub fn of(pos: Vec2, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
        }
    }
}

pub struct SpatialGrid {
    cell_size: f32,
    /// Occupied cells only
    cells: HashMap<CellKey, Vec<usize>>,
    /// Cell of each body for the current tick
    keys: Vec<CellKey>,
    pairs: Vec<(usize, usize)>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: HashMap::new(),
            keys: Vec::new(),
            pairs: Vec::with_capacity(64),
        }
    }

    /// Change the cell size; contents are dropped until the next rebuild
    pub fn reshape(&mut self, cell_size: f32) {
        self.cell_size = cell_size.max(1.0);
        self.cells.clear();
        self.keys.clear();
        self.pairs.clear();
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Bucket every body by its centre, discarding last tick's contents
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.cells.clear();
        self.keys.clear();
        self.keys.reserve(bodies.len());

        for (i, body) in bodies.iter().enumerate() {
            let key = CellKey::of(body.pos, self.cell_size);
            self.cells.entry(key).or_default().push(i);
            self.keys.push(key);
        }
    }

    pub fn key_of(&self, body: usize) -> Option<CellKey> {
        self.keys.get(body).copied()
    }

    #[inline]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Candidate pairs `(i, j)` with `i < j`, each reported exactly once
    pub fn candidate_pairs(&mut self) -> &[(usize, usize)] {
        self.pairs.clear();

        for (i, &key) in self.keys.iter().enumerate() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbor = CellKey { x: key.x + dx, y: key.y + dy };
                    let Some(members) = self.cells.get(&neighbor) else { continue };
                    for &j in members {
                        if j > i {
                            self.pairs.push((i, j));
                        }
                    }
                }
            }
        }

        &self.pairs
    }

    /// Pairs from the last `candidate_pairs` call
    #[inline]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }
}
