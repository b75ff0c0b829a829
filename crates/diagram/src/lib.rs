//! Data model for the schematic editor.
//!
//! This crate provides the flat item/wire model: placed component
//! instances, the wires connecting them, typed diagram coordinates, and
//! the read-only component catalog the palette is populated from.
//! Ownership of live items and wires belongs to the scene crate; the
//! types here are plain records with their local invariants.

pub mod catalog;
pub mod coords;
mod item;
mod wire;

pub use catalog::{Catalog, ComponentType, ComponentTypeId, Library, LibraryEntry};
pub use coords::{DiagramDelta, DiagramPoint};
pub use item::{DiagramItem, ItemId, ITEM_HALF_EXTENT};
pub use wire::{Wire, WireId, WireSegment};
