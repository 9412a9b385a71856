//! WF3D Core Library - Wireframe rotation model
//!
//! This library holds the geometry and rotation math behind the interactive
//! wireframe viewer: validated vertex/edge topology, accumulated Euler-angle
//! rotation, and the cheap axis-dropping projection onto a grid.

pub mod error;
pub mod geometry;
pub mod projection;
pub mod shape;
pub mod transform;

// Re-export commonly used types
pub use error::{InvalidTopology, UnknownShape};
pub use geometry::{Edge, ShapeKind, Vertex, Wireframe};
pub use projection::Viewport;
pub use shape::ShapeState;
pub use transform::{edge_locations, Axis, EdgeLocations, RotationState, Transform};
