//! The component catalog.
//!
//! A read-only registry of the component types the palette offers,
//! grouped into named libraries. Supplied once at startup by the UI
//! layer (typically deserialized from JSON) and never mutated after
//! load. Identity is by id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a component type, e.g. `"resistor"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentTypeId(pub String);

impl ComponentTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentTypeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable descriptor of a placeable component type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentType {
    pub id: ComponentTypeId,
    pub name: String,
    /// Name of the library this type was loaded from.
    pub library: String,
}

/// One entry of a library as supplied by the UI layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: ComponentTypeId,
    pub name: String,
}

/// An ordered group of component types under a single name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub entries: Vec<LibraryEntry>,
}

/// The full catalog: every component type, in library load order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    types: Vec<ComponentType>,
}

impl Catalog {
    /// Build a catalog by flattening libraries in the order given.
    pub fn from_libraries(libraries: impl IntoIterator<Item = Library>) -> Self {
        let mut types = Vec::new();
        for library in libraries {
            for entry in library.entries {
                types.push(ComponentType {
                    id: entry.id,
                    name: entry.name,
                    library: library.name.clone(),
                });
            }
        }
        Self { types }
    }

    /// Look up a component type by id.
    pub fn get(&self, id: &ComponentTypeId) -> Option<&ComponentType> {
        self.types.iter().find(|t| &t.id == id)
    }

    /// Iterate all component types in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
