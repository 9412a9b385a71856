//! Example: Spin a hand-built triangular prism in the terminal
//!
//! Usage: cargo run --example custom_shape

use std::io;
use wf3d_core::{Edge, ShapeState, Vertex};
use wf3d_terminal::{Controls, Settings, TerminalApp};

fn main() -> io::Result<()> {
    let h = 0.1;
    let vertices = vec![
        Vertex::new(-h, -h, -h),
        Vertex::new(h, -h, -h),
        Vertex::new(0.0, h, -h),
        Vertex::new(-h, -h, h),
        Vertex::new(h, -h, h),
        Vertex::new(0.0, h, h),
    ];
    let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (0, 3), (1, 4), (2, 5)]
        .into_iter()
        .map(Edge::from)
        .collect();

    let shape = ShapeState::new(vertices, edges)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!("Starting terminal renderer (press Esc to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(shape, Controls::default(), Settings::default())?;
    app.run()
}
