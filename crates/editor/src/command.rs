//! Reversible scene mutations.
//!
//! Commands are a tagged enum with a uniform capability set: `apply`
//! (redo), `revert` (undo), `describe` (the human-readable history
//! label), and `try_merge_with` (move coalescing). They are serializable
//! so that recording, scripting, and external persistence can be layered
//! on top of the history.
//!
//! A command owns whatever state its revert needs: an add owns the item
//! it placed (and, once undone, any wires that had been connected to it),
//! a delete owns the items it removed plus every wire that was incident
//! to them. Detaching an item on either path takes its wires with it, so
//! no scene wire ever references a detached item. Dropping a command from
//! a truncated redo branch is the moment its captured state is
//! permanently destroyed.

use diagram::{DiagramItem, DiagramPoint, ItemId, Wire};
use scene::DiagramScene;
use serde::{Deserialize, Serialize};

/// A reversible unit of scene mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Place a new item.
    AddItem {
        item: DiagramItem,
        initial_position: DiagramPoint,
        /// Wires incident to the item at the moment it was undone,
        /// captured so redo can restore them. Empty until the first
        /// revert.
        #[serde(default)]
        wires: Vec<Wire>,
    },

    /// Reposition an existing item.
    MoveItem {
        item: ItemId,
        old_position: DiagramPoint,
        new_position: DiagramPoint,
    },

    /// Remove the selected items and every wire incident to them, as a
    /// single history entry.
    DeleteItems { items: Vec<DiagramItem>, wires: Vec<Wire> },
}

impl Command {
    /// Execute (or re-execute) the mutation.
    pub fn apply(&self, scene: &mut DiagramScene) {
        match self {
            Command::AddItem {
                item,
                initial_position,
                wires,
            } => {
                let mut item = item.clone();
                item.position = *initial_position;
                scene.insert_item(item);
                for wire in wires {
                    scene.insert_wire(wire.clone());
                }
                scene.clear_selection();
            }
            Command::MoveItem {
                item, new_position, ..
            } => {
                scene.set_item_position(*item, *new_position);
            }
            Command::DeleteItems { items, wires } => {
                for wire in wires {
                    scene.remove_wire(wire.id);
                }
                for item in items {
                    scene.take_item(item.id);
                }
            }
        }
    }

    /// Restore the state from before `apply`.
    ///
    /// Takes `&mut self` because undoing an add captures the item's
    /// incident wires into the command for the matching redo.
    pub fn revert(&mut self, scene: &mut DiagramScene) {
        match self {
            Command::AddItem { item, wires, .. } => {
                *wires = scene.take_incident_wires(item.id);
                scene.take_item(item.id);
            }
            Command::MoveItem {
                item, old_position, ..
            } => {
                scene.set_item_position(*item, *old_position);
            }
            Command::DeleteItems { items, wires } => {
                for item in items {
                    scene.insert_item(item.clone());
                }
                for wire in wires {
                    scene.insert_wire(wire.clone());
                }
            }
        }
    }

    /// Human-readable history label, e.g. `"Move 120,45"`. The position
    /// is the command's resulting position (first captured item for a
    /// batch delete).
    pub fn describe(&self) -> String {
        match self {
            Command::AddItem {
                initial_position, ..
            } => format!("Add {}", initial_position),
            Command::MoveItem { new_position, .. } => format!("Move {}", new_position),
            Command::DeleteItems { items, .. } => match items.first() {
                Some(item) => format!("Delete {}", item.position),
                None => "Delete".to_string(),
            },
        }
    }

    /// Coalesce a follow-up command into this one. Only two moves of the
    /// *same* item merge: the original `old_position` is kept and the
    /// newer `new_position` adopted. Every other pairing returns false;
    /// merging across different items would corrupt history.
    pub fn try_merge_with(&mut self, other: &Command) -> bool {
        match (self, other) {
            (
                Command::MoveItem {
                    item, new_position, ..
                },
                Command::MoveItem {
                    item: other_item,
                    new_position: other_new,
                    ..
                },
            ) if item == other_item => {
                *new_position = *other_new;
                true
            }
            _ => false,
        }
    }
}
