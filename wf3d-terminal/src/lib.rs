//! Terminal front end for the interactive wireframe viewer

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::collections::HashSet;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{ShapeState, Viewport};

pub mod config;
pub mod controls;
pub mod renderer;

pub use config::{Cli, Settings};
pub use controls::{Controls, KeyBinding};
pub use renderer::LineRenderer;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    shape: ShapeState,
    controls: Controls,
    settings: Settings,
    viewport: Viewport,
    renderer: LineRenderer,
    held: HashSet<char>,
    release_events: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(shape: ShapeState, controls: Controls, settings: Settings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(shape, controls, settings, width, height))
    }

    /// Build the app for a grid of the given size without touching the terminal
    pub fn with_size(
        shape: ShapeState,
        controls: Controls,
        settings: Settings,
        width: u16,
        height: u16,
    ) -> Self {
        let viewport = settings.viewport(width as u32, height as u32, shape.wireframe().bounding_radius());
        Self {
            shape,
            controls,
            settings,
            viewport,
            renderer: LineRenderer::new(width as usize, height as usize),
            held: HashSet::new(),
            release_events: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn shape(&self) -> &ShapeState {
        &self.shape
    }

    pub fn renderer(&self) -> &LineRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the loop to exit after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        // Release events let a key stay held across frames
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            log::info!("terminal does not report key releases; keys count as held for one frame");
        }

        let result = self.main_loop();
        let restored = restore_terminal(&mut stdout(), self.release_events);
        result.and(restored)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = self.settings.frame_time();
        log::info!(
            "render loop started: {} fps target, {} edges",
            self.settings.fps,
            self.shape.wireframe().edges().len()
        );

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(event);
            }

            // Update
            self.update();

            // Render
            self.draw_frame();
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        log::info!("render loop stopped at angles {:?}", self.shape.rotation().angles());
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => match code {
                KeyCode::Esc => self.stop(),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.stop(),
                KeyCode::Backspace if kind != KeyEventKind::Release => self.shape.reset(),
                KeyCode::Char(c) => {
                    let key = c.to_ascii_lowercase();
                    if kind == KeyEventKind::Release {
                        self.held.remove(&key);
                    } else {
                        self.held.insert(key);
                    }
                }
                _ => {}
            },
            Event::Resize(width, height) => self.resize(width, height),
            Event::FocusLost => self.held.clear(),
            _ => {}
        }
    }

    /// Apply the rotation of every held key once
    pub fn update(&mut self) {
        self.controls.apply(&self.held, &mut self.shape);
        if !self.release_events {
            self.held.clear();
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        log::debug!("terminal resized to {width}x{height}");
        self.renderer.resize(width as usize, height as usize);
        self.viewport = self.settings.viewport(
            width as u32,
            height as u32,
            self.shape.wireframe().bounding_radius(),
        );
    }

    /// Rasterize the current edge locations into the character buffer
    pub fn draw_frame(&mut self) {
        let radius = self.shape.wireframe().bounding_radius();
        self.renderer.clear();
        self.renderer.set_depth_range(-radius, radius);

        for (start, end) in self.shape.edge_locations() {
            self.renderer.draw_line(
                self.viewport.fit(&start),
                self.viewport.fit(&end),
                (start.z(), end.z()),
            );
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let [x, y, z] = self.shape.rotation().angles();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | X {:.0} Y {:.0} Z {:.0} | FPS: {:.1} | Esc=Quit Backspace=Reset",
                self.controls.caption(),
                x,
                y,
                z,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Undo every terminal mode change made by [`TerminalApp::run`].
///
/// Each step runs even if an earlier one fails; the first error is returned.
fn restore_terminal<W: Write>(out: &mut W, release_events: bool) -> io::Result<()> {
    let pop = if release_events {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = terminal::disable_raw_mode();
    let leave = execute!(out, terminal::LeaveAlternateScreen, cursor::Show);
    pop.and(raw).and(leave)
}
