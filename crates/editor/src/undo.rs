//! Linear command history.

use crate::Command;
use log::debug;
use scene::DiagramScene;

/// An ordered command history with a cursor separating applied commands
/// (left of the cursor) from redoable ones (right of it).
///
/// Standard linear-history discipline: pushing while the cursor is not
/// at the tail discards the redo branch. Dropping those commands drops
/// the item and wire state they captured, which is the point at which a
/// deleted item is permanently destroyed.
#[derive(Debug, Default)]
pub struct UndoStack {
    commands: Vec<Command>,
    cursor: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate the redo branch, apply the command, and record it.
    /// Consecutive moves of the same item coalesce into the previous
    /// entry instead of appending.
    pub fn push(&mut self, command: Command, scene: &mut DiagramScene) {
        if self.cursor < self.commands.len() {
            debug!(
                "history: truncating {} redoable command(s)",
                self.commands.len() - self.cursor
            );
            self.commands.truncate(self.cursor);
        }

        command.apply(scene);

        if let Some(last) = self.commands.last_mut() {
            if last.try_merge_with(&command) {
                debug!("history: merged into previous entry ({})", last.describe());
                return;
            }
        }

        debug!("history: push {}", command.describe());
        self.commands.push(command);
        self.cursor += 1;
    }

    /// Revert the command left of the cursor. A no-op at the bottom of
    /// the history; returns whether anything was reverted.
    pub fn undo(&mut self, scene: &mut DiagramScene) -> bool {
        if self.cursor == 0 {
            debug!("history: undo at bottom, no-op");
            return false;
        }
        self.cursor -= 1;
        let command = &mut self.commands[self.cursor];
        debug!("history: undo {}", command.describe());
        command.revert(scene);
        true
    }

    /// Re-apply the command at the cursor. A no-op at the top of the
    /// history; returns whether anything was applied.
    pub fn redo(&mut self, scene: &mut DiagramScene) -> bool {
        if self.cursor == self.commands.len() {
            debug!("history: redo at top, no-op");
            return false;
        }
        let command = &self.commands[self.cursor];
        debug!("history: redo {}", command.describe());
        command.apply(scene);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Label of the command `undo` would revert.
    pub fn undo_label(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .map(|i| self.commands[i].describe())
    }

    /// Label of the command `redo` would apply.
    pub fn redo_label(&self) -> Option<String> {
        self.commands.get(self.cursor).map(|c| c.describe())
    }

    /// Number of history entries (applied and redoable).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
