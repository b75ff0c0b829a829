//! Typed coordinates for the diagram.
//!
//! Distinct types for positions and displacements prevent accidental
//! mixing at compile time.
//!
//! - **Diagram space**: the infinite plane items are placed on
//! - A point minus a point is a delta; a point plus a delta is a point

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Position in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramPoint(pub Vec2);

/// Displacement in diagram space (not a position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramDelta(pub Vec2);

impl DiagramPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for DiagramPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<DiagramPoint> for Vec2 {
    fn from(p: DiagramPoint) -> Self {
        p.0
    }
}

impl fmt::Display for DiagramPoint {
    /// Formats as `"x,y"`, the form used in command labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.x, self.0.y)
    }
}

impl Add<DiagramDelta> for DiagramPoint {
    type Output = DiagramPoint;

    fn add(self, delta: DiagramDelta) -> Self::Output {
        DiagramPoint(self.0 + delta.0)
    }
}

impl Sub for DiagramPoint {
    type Output = DiagramDelta;

    /// Subtracting two points gives a delta.
    fn sub(self, other: DiagramPoint) -> Self::Output {
        DiagramDelta(self.0 - other.0)
    }
}

impl DiagramDelta {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub const ZERO: Self = Self(Vec2::ZERO);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = DiagramPoint::new(10.0, 20.0);
        let b = DiagramPoint::new(4.0, 5.0);
        let delta = a - b;
        assert_eq!(delta, DiagramDelta::new(6.0, 15.0));
        assert_eq!(b + delta, a);
    }

    #[test]
    fn display_matches_label_form() {
        assert_eq!(DiagramPoint::new(120.0, 45.0).to_string(), "120,45");
        assert_eq!(DiagramPoint::new(0.0, 0.0).to_string(), "0,0");
        assert_eq!(DiagramPoint::new(12.5, 0.0).to_string(), "12.5,0");
    }
}
