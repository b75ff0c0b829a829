//! The editor facade.
//!
//! Owns the scene, the history, and the catalog. The UI layer calls the
//! inbound gesture surface (`press`/`drag`/`release`, the `request_*`
//! methods, `undo`/`redo`) and drains [`EditorEvent`]s to re-render and
//! keep its menus in sync. All mutation of the scene happens here or in
//! command apply/revert; nothing else holds a mutable handle.

use crate::{Command, EditError, UndoStack};
use diagram::{Catalog, ComponentTypeId, DiagramItem, DiagramPoint, ItemId, Wire, WireId};
use log::debug;
use scene::{DiagramScene, SceneConfig};
use std::collections::HashSet;

/// Spacing of the initial-placement walk for newly added items.
const PLACEMENT_STEP: f32 = 15.0;

/// Notifications for the UI layer.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// A drag gesture completed with a real displacement.
    ItemMoved {
        item: ItemId,
        old_position: DiagramPoint,
    },
    /// The item/wire collections changed (fired after every command
    /// apply or revert, and after a connect).
    SceneChanged,
    /// The selection changed.
    SelectionChanged { selected: Vec<ItemId> },
    /// The undo/redo availability or labels changed.
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
        undo_label: Option<String>,
        redo_label: Option<String>,
    },
}

/// The editing engine behind the UI.
pub struct Editor {
    scene: DiagramScene,
    history: UndoStack,
    catalog: Catalog,
    /// Monotonic count of placed items, driving the initial-placement
    /// walk. Never decremented: undoing an add does not reuse its slot.
    placed: u32,
    events: Vec<EditorEvent>,
}

impl Editor {
    pub fn new(catalog: Catalog, config: SceneConfig) -> Self {
        Self {
            scene: DiagramScene::new(config),
            history: UndoStack::new(),
            catalog,
            placed: 0,
            events: Vec::new(),
        }
    }

    /// Read access for queries and rendering.
    pub fn scene(&self) -> &DiagramScene {
        &self.scene
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // === Gestures ===

    pub fn press(&mut self, point: DiagramPoint) {
        self.scene.begin_drag(point);
    }

    pub fn drag(&mut self, point: DiagramPoint) {
        self.scene.update_drag(point);
    }

    /// End the drag gesture. A release with real displacement becomes a
    /// move command (one history entry, coalesced with a directly
    /// preceding move of the same item); a release with none leaves the
    /// history untouched.
    pub fn release(&mut self, point: DiagramPoint) {
        let before = self.selection_snapshot();
        if let Some((item, old_position)) = self.scene.end_drag(point) {
            if let Some(new_position) = self.scene.get_item(item).map(|i| i.position) {
                self.events.push(EditorEvent::ItemMoved { item, old_position });
                self.history.push(
                    Command::MoveItem {
                        item,
                        old_position,
                        new_position,
                    },
                    &mut self.scene,
                );
                self.events.push(EditorEvent::SceneChanged);
                self.emit_history_changed();
            }
        }
        self.sync_selection(&before);
    }

    /// Toggle an item in or out of the selection. Unknown ids are
    /// ignored.
    pub fn select_toggle(&mut self, item: ItemId) {
        if self.scene.get_item(item).is_none() {
            debug!("editor: select_toggle on missing item {}, ignoring", item);
            return;
        }
        let before = self.selection_snapshot();
        self.scene.toggle_select(item);
        self.sync_selection(&before);
    }

    // === Requests ===

    /// Place a new component from the catalog. Successive adds walk the
    /// scene diagonally in fixed steps, wrapping at the scene bounds.
    pub fn request_add_component(&mut self, type_id: &ComponentTypeId) -> Result<ItemId, EditError> {
        let component = self
            .catalog
            .get(type_id)
            .ok_or_else(|| EditError::UnknownComponent(type_id.clone()))?;

        let size = self.scene.config().size;
        let offset = self.placed as f32 * PLACEMENT_STEP;
        let position = DiagramPoint::new(offset % size.x, offset % size.y);
        self.placed += 1;

        let item = DiagramItem::new(component.id.clone(), position);
        let id = item.id;
        debug!("editor: add {} ({}) at {}", id, component.id, position);
        self.push_command(Command::AddItem {
            initial_position: position,
            item,
            wires: Vec::new(),
        });
        Ok(id)
    }

    /// Delete every selected item, plus every wire incident to any of
    /// them, as one reversible history entry. Rejected before command
    /// construction when nothing is selected.
    pub fn request_delete_selection(&mut self) -> Result<(), EditError> {
        let selected = self.scene.selected_items().clone();
        if selected.is_empty() {
            return Err(EditError::EmptySelection);
        }

        // Capture in z-order for a deterministic label
        let items: Vec<DiagramItem> = self
            .scene
            .items()
            .iter()
            .filter(|i| selected.contains(&i.id))
            .cloned()
            .collect();
        let wires: Vec<Wire> = self
            .scene
            .wires()
            .iter()
            .filter(|w| selected.iter().any(|id| w.touches(*id)))
            .cloned()
            .collect();

        debug!(
            "editor: delete {} item(s), {} incident wire(s)",
            items.len(),
            wires.len()
        );
        self.push_command(Command::DeleteItems { items, wires });
        Ok(())
    }

    /// The external connect gesture: wire two items together. Wires are
    /// not history entries; they live until an endpoint item is
    /// permanently destroyed.
    pub fn connect(&mut self, start: ItemId, end: ItemId) -> Result<WireId, EditError> {
        if start == end {
            return Err(EditError::SelfConnection(start));
        }
        for id in [start, end] {
            if self.scene.get_item(id).is_none() {
                return Err(EditError::MissingItem(id));
            }
        }
        let wire = self.scene.connect(start, end);
        self.events.push(EditorEvent::SceneChanged);
        Ok(wire)
    }

    // === History traversal ===

    /// Revert the most recent command. Silent no-op when there is
    /// nothing to undo.
    pub fn undo(&mut self) {
        let before = self.selection_snapshot();
        if self.history.undo(&mut self.scene) {
            self.events.push(EditorEvent::SceneChanged);
            self.emit_history_changed();
            self.sync_selection(&before);
        }
    }

    /// Re-apply the next redoable command. Silent no-op when there is
    /// nothing to redo.
    pub fn redo(&mut self) {
        let before = self.selection_snapshot();
        if self.history.redo(&mut self.scene) {
            self.events.push(EditorEvent::SceneChanged);
            self.emit_history_changed();
            self.sync_selection(&before);
        }
    }

    // === Internal ===

    fn push_command(&mut self, command: Command) {
        let before = self.selection_snapshot();
        self.history.push(command, &mut self.scene);
        self.events.push(EditorEvent::SceneChanged);
        self.emit_history_changed();
        self.sync_selection(&before);
    }

    fn selection_snapshot(&self) -> HashSet<ItemId> {
        self.scene.selected_items().clone()
    }

    fn sync_selection(&mut self, before: &HashSet<ItemId>) {
        let now = self.scene.selected_items();
        if now != before {
            self.events.push(EditorEvent::SelectionChanged {
                selected: now.iter().copied().collect(),
            });
        }
    }

    fn emit_history_changed(&mut self) {
        self.events.push(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            undo_label: self.history.undo_label(),
            redo_label: self.history.redo_label(),
        });
    }
}
