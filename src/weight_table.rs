//! Learned action-pair weights
//!
//! A dense `ACTION_COUNT x ACTION_COUNT` matrix mapping
//! `(previous action, candidate action)` to a weight. The search raises
//! an edge's weight to the best rollout score seen across that
//! transition; the table can then drive rollouts instead of the manual
//! heuristic.
//!
//! The on-disk format is a headerless little-endian dump of the raw
//! `f32` values in row-major `(previous, candidate)` order.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::actions::{Action, ACTION_COUNT};

/// Dense `(previous action, candidate action) -> weight` matrix.
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: Vec<f32>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightTable {
    /// A table with all weights zero.
    pub fn new() -> Self {
        WeightTable {
            weights: vec![0.0; ACTION_COUNT * ACTION_COUNT],
        }
    }

    pub fn get(&self, prev: Action, candidate: Action) -> f32 {
        self.weights[prev.index() * ACTION_COUNT + candidate.index()]
    }

    pub fn set(&mut self, prev: Action, candidate: Action, weight: f32) {
        self.weights[prev.index() * ACTION_COUNT + candidate.index()] = weight;
    }

    /// Raises the edge weight to `weight` if it is higher than the
    /// stored value.
    pub fn raise(&mut self, prev: Action, candidate: Action, weight: f32) {
        let slot = &mut self.weights[prev.index() * ACTION_COUNT + candidate.index()];
        if weight > *slot {
            *slot = weight;
        }
    }

    /// Loads the table from `path`. A missing file is not an error:
    /// the table is left unchanged and `Ok(false)` is returned.
    pub fn load(&mut self, path: &Path) -> io::Result<bool> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err),
        };
        let mut reader = BufReader::new(file);
        reader.read_f32_into::<LittleEndian>(&mut self.weights)?;
        Ok(true)
    }

    /// Writes the raw table to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for &weight in &self.weights {
            writer.write_f32::<LittleEndian>(weight)?;
        }
        Ok(())
    }
}
