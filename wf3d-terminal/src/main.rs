//! WF3D Terminal Viewer - Rotating wireframe polyhedron
//!
//! Controls:
//!   - q/w: Rotate around X
//!   - a/s: Rotate around Y
//!   - z/x: Rotate around Z
//!   - Backspace: Reset rotation
//!   - Esc / Ctrl+C: Quit

use anyhow::{bail, Context};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use wf3d_terminal::{Cli, TerminalApp};

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        bail!(message);
    }
    init_logging(cli.log_file.as_deref())?;

    let shape = cli.shape_state();
    let controls = cli.controls();
    log::info!(
        "showing {} (size {}) with {} key bindings",
        cli.shape,
        cli.size,
        controls.bindings().len()
    );

    let mut app = TerminalApp::new(shape, controls, cli.settings())
        .context("failed to query terminal size")?;
    app.run().context("terminal rendering failed")?;

    Ok(())
}
