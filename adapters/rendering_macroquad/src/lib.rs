#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Grid Serpent.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use anyhow::Result;
use grid_serpent_core::{CellCoord, Direction};
use grid_serpent_rendering::{
    BoardPresentation, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_pressed, KeyCode};
use std::time::Duration;

const CELL_BORDER_THICKNESS: f32 = 1.0;

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardState {
    /// `Escape` or `Q` to quit the game loop.
    quit_requested: bool,
    /// Most recent directional key pressed this frame, if any.
    direction: Option<Direction>,
}

impl KeyboardState {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let direction = if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            Some(Direction::North)
        } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
            Some(Direction::South)
        } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            Some(Direction::West)
        } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            Some(Direction::East)
        } else {
            None
        };

        Self {
            quit_requested,
            direction,
        }
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            None
        } else {
            Some(self.frames as f32 / seconds)
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        per_second
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.board.width().round() as i32,
            window_height: scene.board.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardState::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    direction: keyboard.direction,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(to_macroquad_color(scene.board.background));
                draw_bordered_cell(
                    &scene.board,
                    scene.food_cell,
                    scene.food_color,
                    scene.board.border_color,
                );
                for cell in &scene.serpent_cells {
                    draw_bordered_cell(
                        &scene.board,
                        *cell,
                        scene.serpent_color,
                        scene.board.border_color,
                    );
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Draws a single occupied cell as a filled square with a one-pixel border.
fn draw_bordered_cell(board: &BoardPresentation, cell: CellCoord, fill: Color, border: Color) {
    let (x, y) = board.cell_origin(cell);
    let side = board.cell_length;
    macroquad::shapes::draw_rectangle(x, y, side, side, to_macroquad_color(fill));
    macroquad::shapes::draw_rectangle_lines(
        x,
        y,
        side,
        side,
        CELL_BORDER_THICKNESS,
        to_macroquad_color(border),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::FpsCounter;
    use std::time::Duration;

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        for _ in 0..59 {
            assert_eq!(counter.record_frame(Duration::from_millis(16)), None);
        }
        let per_second = counter
            .record_frame(Duration::from_millis(64))
            .expect("one second elapsed");
        assert!(per_second > 0.0);

        // The window restarts after each report.
        assert_eq!(counter.record_frame(Duration::from_millis(16)), None);
    }
}
