//! A wireframe together with its accumulated rotation

use crate::error::InvalidTopology;
use crate::geometry::{Edge, Vertex, Wireframe};
use crate::transform::{edge_locations, Axis, EdgeLocations, RotationState};

/// Fixed topology plus the mutable rotation the render loop drives
#[derive(Debug, Clone)]
pub struct ShapeState {
    wireframe: Wireframe,
    rotation: RotationState,
}

impl ShapeState {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, InvalidTopology> {
        Ok(Self::from_wireframe(Wireframe::new(vertices, edges)?))
    }

    pub fn from_wireframe(wireframe: Wireframe) -> Self {
        Self {
            wireframe,
            rotation: RotationState::zero(),
        }
    }

    /// Add `degrees` of rotation around `axis`; the sign picks the direction
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.rotation.rotate(axis, degrees);
        log::trace!("rotate {axis} by {degrees}, now {:?}", self.rotation.angles());
    }

    /// Drop all accumulated rotation
    pub fn reset(&mut self) {
        self.rotation = RotationState::zero();
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    /// Endpoint locations of every edge under the current rotation.
    ///
    /// Recomputed on every call; consume it before rotating again.
    pub fn edge_locations(&self) -> EdgeLocations<'_> {
        edge_locations(&self.wireframe, &self.rotation)
    }
}
