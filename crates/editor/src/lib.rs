//! Editing engine for the schematic editor.
//!
//! This crate defines the reversible command set, the linear undo stack
//! that applies and reverts commands, and the [`Editor`] facade the UI
//! layer drives: inbound gesture calls on one side, drained events for
//! re-rendering and history sync on the other.

mod command;
mod editor;
mod error;
mod undo;

pub use command::Command;
pub use editor::{Editor, EditorEvent};
pub use error::EditError;
pub use undo::UndoStack;
