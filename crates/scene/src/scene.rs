use diagram::{DiagramItem, DiagramPoint, ItemId, Wire, WireId};
use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scene configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Extent of the scene rectangle, used for initial item placement.
    pub size: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(600.0, 400.0),
        }
    }
}

/// An in-progress drag gesture.
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    /// The item under the press point.
    pub item: ItemId,
    /// The item's position when the drag began.
    pub origin: DiagramPoint,
    /// The press point, so the grab offset is preserved while dragging.
    pub start_mouse: DiagramPoint,
}

/// The scene: single owner of the live item and wire collections.
///
/// All mutation of the collections goes through this type (called either
/// directly for gestures, or by command apply/revert); everything else
/// only queries. Items are stored in insertion order, which doubles as
/// z-order: `item_at` resolves overlaps last-inserted-wins. An item
/// reinserted by undo re-appends, so it returns on top.
#[derive(Debug, Default)]
pub struct DiagramScene {
    items: Vec<DiagramItem>,
    wires: Vec<Wire>,
    selection: HashSet<ItemId>,
    drag: Option<DragState>,
    config: SceneConfig,
}

impl DiagramScene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // === Items ===

    /// Add an item to the scene.
    pub fn insert_item(&mut self, item: DiagramItem) {
        debug_assert!(
            self.get_item(item.id).is_none(),
            "item {} inserted twice",
            item.id
        );
        debug!("scene: insert item {} at {}", item.id, item.position);
        self.items.push(item);
    }

    /// Remove an item from the scene and return it, dropping it from the
    /// selection and cancelling any drag gesture that targets it.
    /// Incident wires are left in place; callers that detach an item must
    /// capture and remove its wires as well (see [`take_incident_wires`]).
    ///
    /// [`take_incident_wires`]: Self::take_incident_wires
    pub fn take_item(&mut self, id: ItemId) -> Option<DiagramItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        self.selection.remove(&id);
        if self.drag.is_some_and(|d| d.item == id) {
            debug!("scene: dragged item {} removed, cancelling drag", id);
            self.drag = None;
        }
        debug!("scene: remove item {}", id);
        Some(self.items.remove(pos))
    }

    pub fn get_item(&self, id: ItemId) -> Option<&DiagramItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn get_item_mut(&mut self, id: ItemId) -> Option<&mut DiagramItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[DiagramItem] {
        &self.items
    }

    /// Find the topmost item whose bounds contain `point`.
    ///
    /// Z-order is insertion order, so overlapping items resolve
    /// last-inserted-wins.
    pub fn item_at(&self, point: DiagramPoint) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|i| i.contains_point(point))
            .map(|i| i.id)
    }

    /// Move an item and synchronously refresh the segment of every
    /// incident wire. The refresh is unconditional: it does not check
    /// whether the position actually changed.
    pub fn set_item_position(&mut self, id: ItemId, position: DiagramPoint) {
        let incident = match self.get_item_mut(id) {
            Some(item) => {
                item.position = position;
                item.wires().to_vec()
            }
            None => {
                debug_assert!(false, "set_item_position on missing item {}", id);
                return;
            }
        };
        for wire_id in incident {
            self.refresh_wire(wire_id);
        }
    }

    // === Wires ===

    /// Create a connected wire between two live items, registering it
    /// with both endpoints.
    pub fn connect(&mut self, start: ItemId, end: ItemId) -> WireId {
        let wire = Wire::between(start, end);
        let id = wire.id;
        debug!("scene: connect {} -> {} (wire {})", start, end, id);
        self.wires.push(wire);
        self.link_endpoints(id);
        self.refresh_wire(id);
        id
    }

    /// Reinsert a previously captured wire, relinking it to its
    /// endpoint items.
    pub fn insert_wire(&mut self, wire: Wire) {
        debug_assert!(
            self.get_wire(wire.id).is_none(),
            "wire {} inserted twice",
            wire.id
        );
        let id = wire.id;
        self.wires.push(wire);
        self.link_endpoints(id);
        self.refresh_wire(id);
    }

    /// Remove a wire from the scene and return it, unregistering it
    /// from both endpoint items.
    pub fn remove_wire(&mut self, id: WireId) -> Option<Wire> {
        let pos = self.wires.iter().position(|w| w.id == id)?;
        let wire = self.wires.remove(pos);
        for endpoint in [wire.start(), wire.end()].into_iter().flatten() {
            if let Some(item) = self.get_item_mut(endpoint) {
                item.remove_wire(id);
            }
        }
        debug!("scene: remove wire {}", id);
        Some(wire)
    }

    /// Remove and return every wire incident to an item, unregistering
    /// each from both of its endpoint items. Used by the command layer to
    /// capture an item's wires before detaching the item itself.
    pub fn take_incident_wires(&mut self, id: ItemId) -> Vec<Wire> {
        let incident: Vec<WireId> = self
            .wires
            .iter()
            .filter(|w| w.touches(id))
            .map(|w| w.id)
            .collect();
        incident
            .into_iter()
            .filter_map(|w| self.remove_wire(w))
            .collect()
    }

    pub fn get_wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// True when the two endpoint items of a wire spatially collide
    /// (degenerate, zero-length wire). The rendering layer decides what
    /// to do with this; the scene only reports it. Dangling wires never
    /// overlap.
    pub fn wire_endpoints_overlap(&self, id: WireId) -> bool {
        let Some(wire) = self.get_wire(id) else {
            return false;
        };
        let (Some(start), Some(end)) = (wire.start(), wire.end()) else {
            return false;
        };
        match (self.get_item(start), self.get_item(end)) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => false,
        }
    }

    fn link_endpoints(&mut self, id: WireId) {
        let Some(wire) = self.get_wire(id) else {
            return;
        };
        let endpoints = [wire.start(), wire.end()];
        for endpoint in endpoints.into_iter().flatten() {
            if let Some(item) = self.get_item_mut(endpoint) {
                item.add_wire(id);
            }
        }
    }

    /// Recompute a wire's cached segment from its endpoint positions.
    /// A referenced endpoint that is missing from the scene is an
    /// internal-invariant violation (fatal in debug builds).
    fn refresh_wire(&mut self, id: WireId) {
        let Some(wire) = self.get_wire(id) else {
            return;
        };
        let start = wire.start().map(|e| self.endpoint_position(id, e));
        let end = wire.end().map(|e| self.endpoint_position(id, e));
        let wire = self
            .wires
            .iter_mut()
            .find(|w| w.id == id)
            .expect("wire existed above");
        if let Some(Some(p)) = start {
            wire.segment.start = p;
        }
        if let Some(Some(p)) = end {
            wire.segment.end = p;
        }
    }

    fn endpoint_position(&self, wire: WireId, endpoint: ItemId) -> Option<DiagramPoint> {
        let position = self.get_item(endpoint).map(|i| i.position);
        debug_assert!(
            position.is_some(),
            "wire {} references destroyed item {}",
            wire,
            endpoint
        );
        if position.is_none() {
            log::error!("wire {} references destroyed item {}", wire, endpoint);
        }
        position
    }

    // === Selection ===

    /// Select an item, optionally adding to the current selection.
    pub fn select(&mut self, id: ItemId, add_to_selection: bool) {
        if !add_to_selection {
            self.selection.clear();
        }
        self.selection.insert(id);
    }

    /// Toggle an item in or out of the selection.
    pub fn toggle_select(&mut self, id: ItemId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Clear the selection. Returns true if it was non-empty.
    pub fn clear_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.clear();
        true
    }

    /// The current selection.
    pub fn selected_items(&self) -> &HashSet<ItemId> {
        &self.selection
    }

    // === Drag gesture ===
    //
    // Per gesture: Idle -> (press on item) -> Dragging -> (release) -> Idle,
    // with a release that missed all items going straight back to Idle.

    /// Record the item under `point` and its pre-drag position. A press
    /// that misses every item is a no-op. A press while a drag is
    /// already in progress is undefined in the gesture model; reset to
    /// idle first.
    pub fn begin_drag(&mut self, point: DiagramPoint) {
        if self.drag.is_some() {
            warn!("scene: press while dragging, resetting drag state");
            self.drag = None;
        }
        if let Some(id) = self.item_at(point) {
            let origin = self
                .get_item(id)
                .map(|i| i.position)
                .expect("item_at returned a live item");
            debug!("scene: begin drag of {} from {}", id, origin);
            self.drag = Some(DragState {
                item: id,
                origin,
                start_mouse: point,
            });
        }
    }

    /// Move the dragged item to follow the pointer, preserving the grab
    /// offset. No-op when no drag is in progress.
    pub fn update_drag(&mut self, point: DiagramPoint) {
        if let Some(drag) = self.drag {
            let position = drag.origin + (point - drag.start_mouse);
            self.set_item_position(drag.item, position);
        }
    }

    /// End the drag gesture. Returns the dragged item and its pre-drag
    /// position only when the position actually changed; a release with
    /// no net displacement reports nothing. Always clears the drag state
    /// and the selection.
    pub fn end_drag(&mut self, point: DiagramPoint) -> Option<(ItemId, DiagramPoint)> {
        let result = self.drag.take().and_then(|drag| {
            let position = drag.origin + (point - drag.start_mouse);
            self.set_item_position(drag.item, position);
            if position != drag.origin {
                debug!("scene: drag of {} moved {} -> {}", drag.item, drag.origin, position);
                Some((drag.item, drag.origin))
            } else {
                None
            }
        });
        self.clear_selection();
        result
    }

    /// The drag gesture in progress, if any.
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram::DiagramItem;

    fn place(scene: &mut DiagramScene, x: f32, y: f32) -> ItemId {
        let item = DiagramItem::new("resistor".into(), DiagramPoint::new(x, y));
        let id = item.id;
        scene.insert_item(item);
        id
    }

    #[test]
    fn item_at_resolves_last_inserted_on_overlap() {
        let mut scene = DiagramScene::default();
        let below = place(&mut scene, 0.0, 0.0);
        let above = place(&mut scene, 10.0, 0.0);

        // (5, 0) is inside both items' bounds
        assert_eq!(scene.item_at(DiagramPoint::new(5.0, 0.0)), Some(above));
        // (-20, 0) only hits the first
        assert_eq!(scene.item_at(DiagramPoint::new(-20.0, 0.0)), Some(below));
        assert_eq!(scene.item_at(DiagramPoint::new(500.0, 0.0)), None);
    }

    #[test]
    fn connect_registers_wire_with_both_items() {
        let mut scene = DiagramScene::default();
        let a = place(&mut scene, 0.0, 0.0);
        let b = place(&mut scene, 100.0, 0.0);

        let wire = scene.connect(a, b);

        assert_eq!(scene.get_item(a).unwrap().wires(), [wire]);
        assert_eq!(scene.get_item(b).unwrap().wires(), [wire]);
        assert!(scene.get_wire(wire).unwrap().connected());
    }

    #[test]
    fn remove_wire_unlinks_and_insert_relinks() {
        let mut scene = DiagramScene::default();
        let a = place(&mut scene, 0.0, 0.0);
        let b = place(&mut scene, 100.0, 0.0);
        let wire_id = scene.connect(a, b);

        let wire = scene.remove_wire(wire_id).unwrap();
        assert!(scene.get_item(a).unwrap().wires().is_empty());
        assert!(scene.get_item(b).unwrap().wires().is_empty());
        assert!(scene.get_wire(wire_id).is_none());

        scene.insert_wire(wire);
        assert_eq!(scene.get_item(a).unwrap().wires(), [wire_id]);
        assert_eq!(scene.get_item(b).unwrap().wires(), [wire_id]);
        assert!(scene.get_wire(wire_id).unwrap().connected());
    }

    #[test]
    fn take_incident_wires_detaches_every_wire_of_an_item() {
        let mut scene = DiagramScene::default();
        let a = place(&mut scene, 0.0, 0.0);
        let b = place(&mut scene, 100.0, 0.0);
        let c = place(&mut scene, 0.0, 100.0);
        let ab = scene.connect(a, b);
        let ac = scene.connect(a, c);
        let bc = scene.connect(b, c);

        let taken = scene.take_incident_wires(a);

        assert_eq!(taken.len(), 2);
        assert!(scene.get_wire(ab).is_none());
        assert!(scene.get_wire(ac).is_none());
        assert!(scene.get_wire(bc).is_some());
        // The untouched wire stays registered with both survivors
        assert_eq!(scene.get_item(b).unwrap().wires(), [bc]);
        assert_eq!(scene.get_item(c).unwrap().wires(), [bc]);
    }

    #[test]
    fn moving_an_item_refreshes_incident_wire_segments() {
        let mut scene = DiagramScene::default();
        let a = place(&mut scene, 0.0, 0.0);
        let b = place(&mut scene, 100.0, 0.0);
        let wire = scene.connect(a, b);

        scene.set_item_position(a, DiagramPoint::new(30.0, 40.0));

        let segment = scene.get_wire(wire).unwrap().segment;
        assert_eq!(segment.start, DiagramPoint::new(30.0, 40.0));
        assert_eq!(segment.end, DiagramPoint::new(100.0, 0.0));
    }

    #[test]
    fn wire_endpoints_overlap_tracks_item_bounds() {
        let mut scene = DiagramScene::default();
        let a = place(&mut scene, 0.0, 0.0);
        let b = place(&mut scene, 200.0, 0.0);
        let wire = scene.connect(a, b);

        assert!(!scene.wire_endpoints_overlap(wire));

        // Items are 50x50; at distance 40 their bounds collide
        scene.set_item_position(b, DiagramPoint::new(40.0, 0.0));
        assert!(scene.wire_endpoints_overlap(wire));
    }

    #[test]
    fn drag_reports_old_position_on_real_displacement() {
        let mut scene = DiagramScene::default();
        let id = place(&mut scene, 10.0, 10.0);

        scene.begin_drag(DiagramPoint::new(12.0, 10.0));
        scene.update_drag(DiagramPoint::new(52.0, 60.0));
        let moved = scene.end_drag(DiagramPoint::new(52.0, 60.0));

        assert_eq!(moved, Some((id, DiagramPoint::new(10.0, 10.0))));
        // Grab offset preserved: pressed 2 right of center
        assert_eq!(
            scene.get_item(id).unwrap().position,
            DiagramPoint::new(50.0, 60.0)
        );
        assert!(scene.drag_state().is_none());
    }

    #[test]
    fn drag_without_displacement_reports_nothing() {
        let mut scene = DiagramScene::default();
        let id = place(&mut scene, 10.0, 10.0);
        scene.select(id, false);

        scene.begin_drag(DiagramPoint::new(10.0, 10.0));
        let moved = scene.end_drag(DiagramPoint::new(10.0, 10.0));

        assert_eq!(moved, None);
        // Release still resets drag state and selection
        assert!(scene.drag_state().is_none());
        assert!(scene.selected_items().is_empty());
    }

    #[test]
    fn press_that_misses_all_items_is_a_no_op() {
        let mut scene = DiagramScene::default();
        place(&mut scene, 10.0, 10.0);

        scene.begin_drag(DiagramPoint::new(300.0, 300.0));
        assert!(scene.drag_state().is_none());
        assert_eq!(scene.end_drag(DiagramPoint::new(300.0, 300.0)), None);
    }

    #[test]
    fn removing_the_dragged_item_cancels_the_drag() {
        let mut scene = DiagramScene::default();
        let id = place(&mut scene, 10.0, 10.0);

        scene.begin_drag(DiagramPoint::new(10.0, 10.0));
        scene.take_item(id).unwrap();
        assert!(scene.drag_state().is_none());

        // The rest of the gesture degrades to a no-op
        scene.update_drag(DiagramPoint::new(60.0, 60.0));
        assert_eq!(scene.end_drag(DiagramPoint::new(60.0, 60.0)), None);
    }

    #[test]
    fn nested_press_resets_to_a_fresh_drag() {
        let mut scene = DiagramScene::default();
        let first = place(&mut scene, 10.0, 10.0);
        let second = place(&mut scene, 100.0, 100.0);

        scene.begin_drag(DiagramPoint::new(10.0, 10.0));
        assert_eq!(scene.drag_state().unwrap().item, first);

        // A second press without a release replaces the gesture
        scene.begin_drag(DiagramPoint::new(100.0, 100.0));
        assert_eq!(scene.drag_state().unwrap().item, second);
    }

    #[test]
    fn toggle_select_flips_membership() {
        let mut scene = DiagramScene::default();
        let id = place(&mut scene, 0.0, 0.0);

        scene.toggle_select(id);
        assert!(scene.selected_items().contains(&id));
        scene.toggle_select(id);
        assert!(scene.selected_items().is_empty());
    }

    #[test]
    fn take_item_drops_it_from_selection() {
        let mut scene = DiagramScene::default();
        let id = place(&mut scene, 0.0, 0.0);
        scene.select(id, false);

        let item = scene.take_item(id).unwrap();
        assert_eq!(item.id, id);
        assert!(scene.selected_items().is_empty());
        assert!(scene.get_item(id).is_none());
    }
}
