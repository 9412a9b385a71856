//! Geometry primitives for wireframe shapes

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use crate::error::{InvalidTopology, UnknownShape};

/// A 3D point in the shape's local (unrotated) frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Euclidean distance to another vertex
    pub fn distance(&self, other: &Vertex) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self { position }
    }
}

/// An undirected connection between two vertex indices
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

const CUBE_EDGES: [Edge; 12] = [
    Edge::new(0, 1),
    Edge::new(0, 2),
    Edge::new(2, 3),
    Edge::new(1, 3),
    Edge::new(4, 5),
    Edge::new(4, 6),
    Edge::new(6, 7),
    Edge::new(5, 7),
    Edge::new(0, 4),
    Edge::new(1, 5),
    Edge::new(2, 6),
    Edge::new(3, 7),
];

const TETRAHEDRON_EDGES: [Edge; 6] = [
    Edge::new(0, 1),
    Edge::new(0, 2),
    Edge::new(0, 3),
    Edge::new(1, 2),
    Edge::new(1, 3),
    Edge::new(2, 3),
];

// Opposite corners (0/1, 2/3, 4/5) are the only unconnected pairs.
const OCTAHEDRON_EDGES: [Edge; 12] = [
    Edge::new(0, 2),
    Edge::new(0, 3),
    Edge::new(0, 4),
    Edge::new(0, 5),
    Edge::new(1, 2),
    Edge::new(1, 3),
    Edge::new(1, 4),
    Edge::new(1, 5),
    Edge::new(2, 4),
    Edge::new(2, 5),
    Edge::new(3, 4),
    Edge::new(3, 5),
];

/// Built-in polyhedra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Cube,
    Tetrahedron,
    Octahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Tetrahedron, ShapeKind::Octahedron];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Octahedron => "octahedron",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

/// Immutable vertex/edge topology of a wireframe shape
#[derive(Debug, Clone)]
pub struct Wireframe {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Wireframe {
    /// Build a wireframe, rejecting edges that leave the vertex range or loop
    /// back onto their own vertex.
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, InvalidTopology> {
        let vertex_count = vertices.len();
        for (position, edge) in edges.iter().enumerate() {
            for index in [edge.a, edge.b] {
                if index >= vertex_count {
                    return Err(InvalidTopology::IndexOutOfRange {
                        edge: position,
                        index,
                        vertex_count,
                    });
                }
            }
            if edge.a == edge.b {
                return Err(InvalidTopology::SelfLoop {
                    edge: position,
                    index: edge.a,
                });
            }
        }

        log::debug!(
            "built wireframe with {} vertices and {} edges",
            vertex_count,
            edges.len()
        );
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Largest distance from the local origin to any vertex
    pub fn bounding_radius(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.position.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Create one of the built-in polyhedra with the given edge length scale
    pub fn build(kind: ShapeKind, size: f64) -> Self {
        match kind {
            ShapeKind::Cube => Self::cube(size),
            ShapeKind::Tetrahedron => Self::tetrahedron(size),
            ShapeKind::Octahedron => Self::octahedron(size),
        }
    }

    /// Axis-aligned cube centered at the origin, corners at `±size/2`
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut vertices = Vec::with_capacity(8);
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    vertices.push(Vertex::new(half * x, half * y, half * z));
                }
            }
        }

        Self {
            vertices,
            edges: CUBE_EDGES.to_vec(),
        }
    }

    /// Regular tetrahedron inscribed in the cube of the same size
    pub fn tetrahedron(size: f64) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(half, half, half),
            Vertex::new(half, -half, -half),
            Vertex::new(-half, half, -half),
            Vertex::new(-half, -half, half),
        ];

        Self {
            vertices,
            edges: TETRAHEDRON_EDGES.to_vec(),
        }
    }

    /// Regular octahedron with its corners on the axes at `±size/2`
    pub fn octahedron(size: f64) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(half, 0.0, 0.0),
            Vertex::new(-half, 0.0, 0.0),
            Vertex::new(0.0, half, 0.0),
            Vertex::new(0.0, -half, 0.0),
            Vertex::new(0.0, 0.0, half),
            Vertex::new(0.0, 0.0, -half),
        ];

        Self {
            vertices,
            edges: OCTAHEDRON_EDGES.to_vec(),
        }
    }
}
