use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Integer cell of the layout grid. Rows grow downward, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Placement {
    pub row: i32,
    pub column: i32,
}

impl Placement {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Canonical `row_column` key used by the occupancy index.
    pub fn key(&self) -> String {
        format!("{}_{}", self.row, self.column)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Bijection between node ids and grid cells.
///
/// Both directions are owned maps updated together; callers only ever get
/// copies of the stored placements.
#[derive(Debug, Default, Clone)]
pub struct PlacementGrid {
    id_to_placement: HashMap<String, Placement>,
    placement_to_id: HashMap<String, String>,
}

impl PlacementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.id_to_placement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_placement.is_empty()
    }

    pub fn set_placement(&mut self, id: &str, placement: Placement) {
        let key = placement.key();
        if let Some(previous_owner) = self.placement_to_id.remove(&key) {
            self.id_to_placement.remove(&previous_owner);
        }
        if let Some(previous) = self.id_to_placement.remove(id) {
            self.placement_to_id.remove(&previous.key());
        }
        self.id_to_placement.insert(id.to_string(), placement);
        self.placement_to_id.insert(key, id.to_string());
    }

    pub fn placement(&self, id: &str) -> Option<Placement> {
        self.id_to_placement.get(id).copied()
    }

    pub fn node_at(&self, placement: Placement) -> Option<&str> {
        self.placement_to_id
            .get(&placement.key())
            .map(String::as_str)
    }

    pub fn is_placement_taken(&self, placement: Placement) -> bool {
        self.placement_to_id.contains_key(&placement.key())
    }

    pub fn remove(&mut self, id: &str) -> Option<Placement> {
        let placement = self.id_to_placement.remove(id)?;
        self.placement_to_id.remove(&placement.key());
        Some(placement)
    }

    /// Moves every listed node by `delta` columns as a single step.
    ///
    /// All old cells are released before any new one is claimed, so nodes of
    /// the moved set never evict each other.
    pub fn shift_columns<'a, I>(&mut self, ids: I, delta: i32)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut moved = Vec::new();
        for id in ids {
            if let Some(old) = self.remove(id) {
                moved.push((id, Placement::new(old.row, old.column + delta)));
            }
        }
        for (id, placement) in moved {
            self.set_placement(id, placement);
        }
    }
}
