use crate::coords::DiagramPoint;
use crate::item::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireId(uuid::Uuid);

impl WireId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create a WireId from a u128 (useful for tests).
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }
}

impl Default for WireId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WireId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The cached visual line of a wire, between its endpoint positions.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WireSegment {
    pub start: DiagramPoint,
    pub end: DiagramPoint,
}

/// A connector between two diagram items.
///
/// A wire never owns its endpoints: it holds item ids into the scene's
/// collection. `connected` is derived state, true exactly when both
/// endpoints are present; a wire with either endpoint `None` is dangling
/// and must be excluded from connectivity-dependent computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    start: Option<ItemId>,
    end: Option<ItemId>,
    connected: bool,
    /// Refreshed by the scene whenever an endpoint item moves.
    pub segment: WireSegment,
}

impl Wire {
    pub fn new(start: Option<ItemId>, end: Option<ItemId>) -> Self {
        let mut wire = Self {
            id: WireId::new(),
            start,
            end,
            connected: false,
            segment: WireSegment::default(),
        };
        wire.recompute_connectivity();
        wire
    }

    /// A wire between two live items.
    pub fn between(start: ItemId, end: ItemId) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<ItemId> {
        self.start
    }

    pub fn end(&self) -> Option<ItemId> {
        self.end
    }

    /// Replace both endpoint references and recompute connectivity.
    pub fn set_endpoints(&mut self, start: Option<ItemId>, end: Option<ItemId>) {
        self.start = start;
        self.end = end;
        self.recompute_connectivity();
    }

    /// Recompute `connected` from the current endpoint references.
    /// Must be called after any endpoint replacement.
    pub fn recompute_connectivity(&mut self) {
        self.connected = self.start.is_some() && self.end.is_some();
    }

    /// True exactly when both endpoints are present.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Whether this wire references the given item at either end.
    pub fn touches(&self, item: ItemId) -> bool {
        self.start == Some(item) || self.end == Some(item)
    }
}
