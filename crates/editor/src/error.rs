use diagram::{ComponentTypeId, ItemId};
use thiserror::Error;

/// Rejections surfaced by the editor facade.
///
/// These cover invalid requests caught before any command is
/// constructed. Undo/redo past the history boundary is deliberately not
/// an error: it is a silent no-op, matching a UI with disabled buttons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Delete was requested with nothing selected.
    #[error("delete requested with an empty selection")]
    EmptySelection,

    /// The catalog has no component type with this id.
    #[error("unknown component type `{0}`")]
    UnknownComponent(ComponentTypeId),

    /// A wire needs two distinct endpoints.
    #[error("cannot connect item {0} to itself")]
    SelfConnection(ItemId),

    /// The referenced item is not in the scene.
    #[error("no item {0} in the scene")]
    MissingItem(ItemId),
}
