//! Note-link graph view model.
//!
//! One node per note, one edge per linked-note id. Edges whose target does
//! not exist are kept in the edge set; the renderer simply has no endpoint
//! to draw them to, matching the unvalidated link list contract.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use log::info;

use crate::models::Note;

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Normalized coordinates in [0, 1).
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub show_labels: bool,
    pub physics_enabled: bool,
    seed: u64,
}

impl GraphView {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            show_labels: true,
            physics_enabled: false,
            seed: 0,
        }
    }

    /// Rebuilds nodes and edges from the full note map. Placement is
    /// pseudo-random, derived from the note id and the current seed, so a
    /// rebuild without a reset keeps nodes where they were.
    pub fn build<'a>(&mut self, notes: impl Iterator<Item = &'a Note>) {
        self.nodes.clear();
        self.edges.clear();

        for note in notes {
            let (x, y) = scatter(&note.id, self.seed);
            self.nodes.push(GraphNode {
                id: note.id.clone(),
                label: note.title.clone(),
                x,
                y,
            });

            for target in &note.linked_notes {
                self.edges.push(GraphEdge {
                    source: note.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    /// Re-seeds the placement; the caller rebuilds afterwards.
    pub fn reset(&mut self) {
        self.seed = self.seed.wrapping_add(1);
    }

    pub fn toggle_labels(&mut self) {
        self.show_labels = !self.show_labels;
    }

    /// Flips the physics flag. Intentionally drives no simulation.
    pub fn toggle_physics(&mut self) {
        self.physics_enabled = !self.physics_enabled;
        info!(
            "graph physics toggled to {} (no simulation attached)",
            self.physics_enabled
        );
    }

    pub fn node_positions(&self) -> HashMap<&str, (f64, f64)> {
        self.nodes
            .iter()
            .map(|n| (n.id.as_str(), (n.x, n.y)))
            .collect()
    }
}

impl Default for GraphView {
    fn default() -> Self {
        Self::new()
    }
}

fn scatter(id: &str, seed: u64) -> (f64, f64) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    seed.hash(&mut hasher);
    let bits = hasher.finish();

    // Split the hash into two coordinates in [0, 1).
    let x = (bits >> 32) as f64 / u32::MAX as f64;
    let y = (bits & 0xFFFF_FFFF) as f64 / u32::MAX as f64;
    (x.min(0.999), y.min(0.999))
}
