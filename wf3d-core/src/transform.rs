//! Rotation matrices and accumulated rotation state

use std::fmt;

use nalgebra::Matrix3;

use crate::geometry::{Edge, Vertex, Wireframe};

/// One of the three principal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Slot of this axis in an `[x, y, z]` triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Accumulated rotation around each axis, in degrees.
///
/// Angles are never wrapped; sine and cosine take care of periodicity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    angles: [f64; 3],
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { angles: [x, y, z] }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Add `degrees` to the angle of `axis`
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.angles[axis.index()] += degrees;
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        self.angles[axis.index()]
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        let [alpha, beta, gamma] = self.angles;
        Transform::rotation_matrix(alpha, beta, gamma)
    }
}

/// Transform builder for wireframe rotation
pub struct Transform;

impl Transform {
    /// Rotation of `alpha`, `beta`, `gamma` degrees around the x, y and z axes.
    ///
    /// The closed form is `Rx(alpha) · Ry(beta) · Rz(gamma)`, meant to be applied
    /// to row vectors from the right (see [`Transform::apply`]).
    pub fn rotation_matrix(alpha: f64, beta: f64, gamma: f64) -> Matrix3<f64> {
        let (s_alpha, c_alpha) = alpha.to_radians().sin_cos();
        let (s_beta, c_beta) = beta.to_radians().sin_cos();
        let (s_gamma, c_gamma) = gamma.to_radians().sin_cos();

        Matrix3::new(
            c_beta * c_gamma,
            -c_beta * s_gamma,
            s_beta,
            c_alpha * s_gamma + s_alpha * s_beta * c_gamma,
            c_alpha * c_gamma - s_gamma * s_alpha * s_beta,
            -c_beta * s_alpha,
            s_gamma * s_alpha - c_alpha * s_beta * c_gamma,
            c_alpha * s_gamma * s_beta + s_alpha * c_gamma,
            c_alpha * c_beta,
        )
    }

    /// Row-vector product `vertex · matrix`
    pub fn apply(vertex: &Vertex, matrix: &Matrix3<f64>) -> Vertex {
        // (v · M)ᵀ = Mᵀ · vᵀ
        Vertex::from(nalgebra::Point3::from(matrix.tr_mul(&vertex.position.coords)))
    }

    /// Apply `matrix` to every vertex, keeping index order
    pub fn transform_vertices(vertices: &[Vertex], matrix: &Matrix3<f64>) -> Vec<Vertex> {
        vertices.iter().map(|v| Self::apply(v, matrix)).collect()
    }
}

/// Transformed endpoint pairs, one per edge in declaration order.
///
/// The vertex locations are computed once, when the iterator is created.
#[derive(Debug, Clone)]
pub struct EdgeLocations<'a> {
    locations: Vec<Vertex>,
    edges: std::slice::Iter<'a, Edge>,
}

impl EdgeLocations<'_> {
    /// Current location of every vertex, by index
    pub fn locations(&self) -> &[Vertex] {
        &self.locations
    }
}

impl Iterator for EdgeLocations<'_> {
    type Item = (Vertex, Vertex);

    fn next(&mut self) -> Option<Self::Item> {
        self.edges
            .next()
            .map(|edge| (self.locations[edge.a], self.locations[edge.b]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl ExactSizeIterator for EdgeLocations<'_> {}

/// Rotate `wireframe` by `rotation` and pair up the edge endpoints
pub fn edge_locations<'a>(wireframe: &'a Wireframe, rotation: &RotationState) -> EdgeLocations<'a> {
    let matrix = rotation.matrix();
    EdgeLocations {
        locations: Transform::transform_vertices(wireframe.vertices(), &matrix),
        edges: wireframe.edges().iter(),
    }
}
