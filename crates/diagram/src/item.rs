use crate::catalog::ComponentTypeId;
use crate::coords::DiagramPoint;
use crate::wire::WireId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Half the side length of an item's square bounds, in diagram units.
pub const ITEM_HALF_EXTENT: f32 = 25.0;

/// Unique identifier for a diagram item.
///
/// Ids are stable for the lifetime of the item, including across a
/// delete/undo cycle, so wires can reference items without owning them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(uuid::Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create an ItemId from a u128 (useful for tests).
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A placed instance of a catalog component type.
///
/// Items are squares of fixed half-extent centered on `position`.
/// The `wires` list is the set of wires incident to this item; it is
/// maintained by the scene whenever a wire is created, reconnected, or
/// removed, and must always match the wires whose start or end
/// references this item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagramItem {
    pub id: ItemId,
    pub component_type: ComponentTypeId,
    pub position: DiagramPoint,
    wires: SmallVec<[WireId; 4]>,
}

impl DiagramItem {
    pub fn new(component_type: ComponentTypeId, position: DiagramPoint) -> Self {
        Self {
            id: ItemId::new(),
            component_type,
            position,
            wires: SmallVec::new(),
        }
    }

    /// Returns the bounding box as (min, max) corners.
    pub fn bounds(&self) -> (DiagramPoint, DiagramPoint) {
        let min = DiagramPoint::new(
            self.position.x() - ITEM_HALF_EXTENT,
            self.position.y() - ITEM_HALF_EXTENT,
        );
        let max = DiagramPoint::new(
            self.position.x() + ITEM_HALF_EXTENT,
            self.position.y() + ITEM_HALF_EXTENT,
        );
        (min, max)
    }

    /// Check if a point is inside this item's bounding box.
    pub fn contains_point(&self, point: DiagramPoint) -> bool {
        let (min, max) = self.bounds();
        point.x() >= min.x() && point.x() <= max.x() && point.y() >= min.y() && point.y() <= max.y()
    }

    /// Check if this item's bounds intersect another item's bounds.
    pub fn overlaps(&self, other: &DiagramItem) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.x() <= b_max.x()
            && a_max.x() >= b_min.x()
            && a_min.y() <= b_max.y()
            && a_max.y() >= b_min.y()
    }

    /// Register an incident wire. Idempotent: re-adding a wire that is
    /// already registered is a no-op (a captured item reinserted on undo
    /// arrives with its wire list intact).
    pub fn add_wire(&mut self, wire: WireId) {
        if !self.wires.contains(&wire) {
            self.wires.push(wire);
        }
    }

    /// Unregister an incident wire.
    pub fn remove_wire(&mut self, wire: WireId) {
        self.wires.retain(|w| *w != wire);
    }

    /// The wires incident to this item.
    pub fn wires(&self) -> &[WireId] {
        &self.wires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(x: f32, y: f32) -> DiagramItem {
        DiagramItem::new("resistor".into(), DiagramPoint::new(x, y))
    }

    #[test]
    fn bounds_are_centered_on_position() {
        let item = item_at(100.0, 50.0);
        let (min, max) = item.bounds();
        assert_eq!(min, DiagramPoint::new(75.0, 25.0));
        assert_eq!(max, DiagramPoint::new(125.0, 75.0));
    }

    #[test]
    fn contains_point_includes_edges() {
        let item = item_at(0.0, 0.0);
        assert!(item.contains_point(DiagramPoint::new(0.0, 0.0)));
        assert!(item.contains_point(DiagramPoint::new(25.0, 25.0)));
        assert!(item.contains_point(DiagramPoint::new(-25.0, 25.0)));
        assert!(!item.contains_point(DiagramPoint::new(25.1, 0.0)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = item_at(0.0, 0.0);
        let b = item_at(40.0, 0.0);
        let c = item_at(100.0, 0.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn add_wire_is_idempotent() {
        let mut item = item_at(0.0, 0.0);
        let wire = WireId::from_u128(1);
        item.add_wire(wire);
        item.add_wire(wire);
        assert_eq!(item.wires(), [wire]);
        item.remove_wire(wire);
        assert!(item.wires().is_empty());
    }
}
