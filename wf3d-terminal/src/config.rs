//! Command line configuration for the terminal viewer

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wf3d_core::projection::DEFAULT_ASPECT;
use wf3d_core::{ShapeKind, ShapeState, Viewport, Wireframe};

use crate::controls::{Controls, KeyBinding, DEFAULT_STEP};

pub const DEFAULT_FPS: u32 = 40;
pub const DEFAULT_SIZE: f64 = 0.2;

#[derive(Parser, Debug)]
#[command(name = "wf3d")]
#[command(about = "Rotate a wireframe polyhedron in the terminal")]
#[command(
    after_help = "Default controls:  q,w : X    a,s : Y    z,x : Z    Backspace : reset    Esc : quit"
)]
pub struct Cli {
    /// Polyhedron to display (cube, tetrahedron, octahedron)
    #[arg(long, default_value = "cube")]
    pub shape: ShapeKind,

    /// Edge scale of the polyhedron in world units
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: f64,

    /// Degrees turned per frame while a rotation key is held
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: f64,

    /// Frame rate cap
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Grid rows per world unit (fitted to the terminal when omitted)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Horizontal stretch compensating for non-square terminal cells
    #[arg(long, default_value_t = DEFAULT_ASPECT)]
    pub aspect: f64,

    /// Extra or replacement key binding, e.g. `e=z+2.5` (repeatable)
    #[arg(long = "bind", value_name = "KEY=AXIS[+-]DEGREES")]
    pub bindings: Vec<KeyBinding>,

    /// Write logs to this file (the terminal itself is used for drawing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Reject values that parse but cannot produce a sensible picture
    pub fn validate(&self) -> Result<(), String> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(format!("--size must be a positive number, got {}", self.size));
        }
        if !self.step.is_finite() {
            return Err(format!("--step must be a finite number, got {}", self.step));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(format!("--aspect must be a positive number, got {}", self.aspect));
        }
        if let Some(scale) = self.scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(format!("--scale must be a positive number, got {scale}"));
            }
        }
        Ok(())
    }

    pub fn shape_state(&self) -> ShapeState {
        ShapeState::from_wireframe(Wireframe::build(self.shape, self.size))
    }

    pub fn controls(&self) -> Controls {
        Controls::default_with_step(self.step).with_overrides(self.bindings.iter().copied())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            fps: self.fps,
            scale: self.scale,
            aspect: self.aspect,
        }
    }
}

/// Render loop settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub fps: u32,
    pub scale: Option<f64>,
    pub aspect: f64,
}

impl Settings {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Viewport for a grid of the given size, auto-fitted unless a scale is set
    pub fn viewport(&self, width: u32, height: u32, radius: f64) -> Viewport {
        match self.scale {
            Some(scale) => Viewport::new(width, height, scale, self.aspect),
            None => Viewport::fitting(width, height, radius, self.aspect),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            scale: None,
            aspect: DEFAULT_ASPECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf3d_core::Axis;

    #[test]
    fn test_defaults_match_original_viewer() {
        let cli = Cli::try_parse_from(["wf3d"]).unwrap();
        assert!(cli.validate().is_ok());
        assert_eq!(cli.shape, ShapeKind::Cube);
        assert_eq!(cli.fps, 40);
        assert_eq!(cli.settings().frame_time(), Duration::from_millis(25));
        assert_eq!(cli.controls(), Controls::default());
        assert_eq!(cli.shape_state().wireframe().edges().len(), 12);
    }

    #[test]
    fn test_bindings_and_shape_from_args() {
        let cli = Cli::try_parse_from([
            "wf3d", "--shape", "octahedron", "--step", "2", "--bind", "q=x-9", "--bind", "e=y+1",
        ])
        .unwrap();
        let controls = cli.controls();
        assert_eq!(controls.bindings()[0], KeyBinding::new('q', Axis::X, -9.0));
        assert_eq!(controls.bindings()[1], KeyBinding::new('w', Axis::X, 2.0));
        assert_eq!(controls.bindings()[6], KeyBinding::new('e', Axis::Y, 1.0));
        assert_eq!(cli.shape_state().wireframe().vertices().len(), 6);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["wf3d", "--bind", "q=v5"]).is_err());
        assert!(Cli::try_parse_from(["wf3d", "--shape", "torus"]).is_err());
        assert!(Cli::try_parse_from(["wf3d", "--fps", "0"]).is_err());

        let cli = Cli::try_parse_from(["wf3d", "--size=-1"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_fixed_scale_viewport() {
        let settings = Settings {
            scale: Some(70.0),
            aspect: 1.0,
            ..Settings::default()
        };
        let viewport = settings.viewport(1000, 1000, 0.5);
        assert_eq!(viewport.scale, 70.0);
    }
}
