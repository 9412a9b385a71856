//! Error types for wf3d-core.

use thiserror::Error;

/// A wireframe whose edges do not describe a valid graph over its vertices.
///
/// Raised by [`Wireframe::new`](crate::Wireframe::new) for the first offending
/// edge, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTopology {
    /// An edge references a vertex index past the end of the vertex list.
    #[error("invalid topology: edge {edge} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Position of the edge in the edge list.
        edge: usize,
        /// The out-of-range vertex index.
        index: usize,
        /// Number of vertices in the shape.
        vertex_count: usize,
    },

    /// An edge connects a vertex to itself.
    #[error("invalid topology: edge {edge} connects vertex {index} to itself")]
    SelfLoop {
        /// Position of the edge in the edge list.
        edge: usize,
        /// The repeated vertex index.
        index: usize,
    },
}

/// A shape name that does not match any built-in polyhedron.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape `{0}` (expected one of: cube, tetrahedron, octahedron)")]
pub struct UnknownShape(pub String);
