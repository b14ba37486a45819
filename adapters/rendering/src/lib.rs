#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Serpent adapters.
//!
//! Backends receive a [`Presentation`] describing the board and its
//! inhabitants, and render whatever the per-frame `update_scene` callback
//! leaves in the [`Scene`]. The simulation never appears here: adapters only
//! see cells and colors.

use anyhow::Result as AnyResult;
use grid_serpent_core::{CellCoord, Direction, GridSize};
use std::time::Duration;
use thiserror::Error;

/// Background color of the play field, matching the original black board.
pub const BOARD_BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);

/// Pale cyan border drawn around every occupied cell.
pub const CELL_BORDER: Color = Color::from_rgb_u8(93, 216, 228);

/// Fill color of the food cell.
pub const FOOD_FILL: Color = Color::from_rgb_u8(255, 0, 0);

/// Fill color of the serpent cells.
pub const SERPENT_FILL: Color = Color::from_rgb_u8(0, 255, 0);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Most recent directional key observed on this frame, if any.
    pub direction: Option<Direction>,
}

/// Describes a square cell board that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of cell columns contained in the board.
    pub columns: u32,
    /// Number of cell rows contained in the board.
    pub rows: u32,
    /// Side length of a single cell expressed in pixels.
    pub cell_length: f32,
    /// Solid color used to clear the board each frame.
    pub background: Color,
    /// Border drawn around every occupied cell.
    pub border_color: Color,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when `cell_length` is not strictly positive.
    pub fn new(
        grid: &GridSize,
        background: Color,
        border_color: Color,
    ) -> Result<Self, RenderingError> {
        if grid.cell_length() <= 0.0 {
            return Err(RenderingError::InvalidCellLength {
                cell_length: grid.cell_length(),
            });
        }

        Ok(Self {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_length: grid.cell_length(),
            background,
            border_color,
        })
    }

    /// Calculates the total width of the board in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the board in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Top-left pixel corner of the provided cell.
    #[must_use]
    pub const fn cell_origin(&self, cell: CellCoord) -> (f32, f32) {
        (
            cell.column() as f32 * self.cell_length,
            cell.row() as f32 * self.cell_length,
        )
    }
}

/// Scene description combining the board and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board that composes the play area.
    pub board: BoardPresentation,
    /// Serpent cells ordered head first.
    pub serpent_cells: Vec<CellCoord>,
    /// Fill color of the serpent cells.
    pub serpent_color: Color,
    /// Cell occupied by the food.
    pub food_cell: CellCoord,
    /// Fill color of the food cell.
    pub food_color: Color,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        board: BoardPresentation,
        serpent_cells: Vec<CellCoord>,
        serpent_color: Color,
        food_cell: CellCoord,
        food_color: Color,
    ) -> Self {
        Self {
            board,
            serpent_cells,
            serpent_color,
            food_cell,
            food_color,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Serpent scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered. The closure owns the tick pacing; the backend
    /// merely invokes it once per frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive to avoid a zero-sized board.
    #[error("cell_length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_creation_accepts_positive_cell_length() {
        let board = BoardPresentation::new(
            &GridSize::new(32, 24, 20.0),
            BOARD_BACKGROUND,
            CELL_BORDER,
        )
        .expect("positive cell_length should succeed");

        assert_eq!(board.columns, 32);
        assert_eq!(board.rows, 24);
        assert!((board.width() - 640.0).abs() < f32::EPSILON);
        assert!((board.height() - 480.0).abs() < f32::EPSILON);
    }

    #[test]
    fn board_creation_rejects_zero_cell_length_without_panicking() {
        let error =
            BoardPresentation::new(&GridSize::new(32, 24, 0.0), BOARD_BACKGROUND, CELL_BORDER)
                .expect_err("zero cell_length must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidCellLength { .. }
        ));
    }

    #[test]
    fn cell_origin_scales_with_cell_length() {
        let board =
            BoardPresentation::new(&GridSize::new(8, 6, 10.0), BOARD_BACKGROUND, CELL_BORDER)
                .expect("valid board");

        assert_eq!(board.cell_origin(CellCoord::new(3, 2)), (30.0, 20.0));
    }

    #[test]
    fn palette_matches_the_original_game() {
        assert_eq!(CELL_BORDER, Color::from_rgb_u8(93, 216, 228));
        assert_eq!(FOOD_FILL, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(SERPENT_FILL, Color::new(0.0, 1.0, 0.0, 1.0));
    }
}
