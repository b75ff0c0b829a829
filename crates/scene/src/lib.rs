//! The diagram scene.
//!
//! Provides the single owner of the live item and wire collections,
//! spatial queries against them, selection state, and the drag gesture
//! state machine.

mod scene;

pub use scene::{DiagramScene, DragState, SceneConfig};

// Re-export coordinate types from diagram for convenience
pub use diagram::{DiagramDelta, DiagramPoint};
