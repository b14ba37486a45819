#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Serpent engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the tick director. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that the
//! director folds into per-tick outcomes. The world is the only owner of
//! mutable state; everything in this crate is a plain value.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Serpent.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's cell grid using the provided dimensions.
    ConfigureGrid {
        /// Number of cell columns laid out in the grid.
        columns: u32,
        /// Number of cell rows laid out in the grid.
        rows: u32,
        /// Length of each square cell measured in pixels.
        cell_length: f32,
    },
    /// Buffers a heading change to be adopted on the next advance.
    QueueHeading {
        /// Heading the serpent should adopt.
        direction: Direction,
    },
    /// Advances the serpent by exactly one cell.
    Advance,
    /// Restores the serpent to its initial state and replaces the food.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the cell grid was reconfigured.
    GridConfigured {
        /// Number of cell columns laid out in the grid.
        columns: u32,
        /// Number of cell rows laid out in the grid.
        rows: u32,
    },
    /// Confirms that a heading change was buffered for the next advance.
    HeadingQueued {
        /// Heading that will be adopted on the next advance.
        direction: Direction,
    },
    /// Confirms that the serpent moved one cell forward.
    SerpentAdvanced {
        /// Cell newly occupied by the serpent's head.
        head: CellCoord,
        /// Tail cell released by the move, absent while the serpent grows.
        vacated: Option<CellCoord>,
    },
    /// Reports that the serpent ran into its own body.
    SerpentCollided {
        /// Cell where the head met the body.
        at: CellCoord,
    },
    /// Confirms that the serpent was restored to its initial state.
    SerpentReset {
        /// Cell occupied by the serpent after the reset.
        head: CellCoord,
    },
    /// Confirms that the serpent's head reached the food.
    FoodEaten {
        /// Cell where the food was consumed.
        cell: CellCoord,
        /// Length the serpent now grows toward.
        target_length: u32,
    },
    /// Confirms that the food occupies a new cell.
    FoodPlaced {
        /// Cell assigned to the food.
        cell: CellCoord,
    },
    /// Reports that no free cell remained for the food.
    BoardFilled,
}

/// Headings available to the serpent, one per grid axis sense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Returns the heading pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Reports whether `other` points the opposite way.
    #[must_use]
    pub fn is_opposite_of(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Describes the discrete toroidal cell grid the serpent inhabits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
    cell_length: f32,
}

impl GridSize {
    /// Creates a new grid description. Zero dimensions are clamped to one so
    /// the wraparound arithmetic stays total.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_length: f32) -> Self {
        let columns = if columns == 0 { 1 } else { columns };
        let rows = if rows == 0 { 1 } else { rows };
        Self {
            columns,
            rows,
            cell_length,
        }
    }

    /// Number of cell columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in pixels.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Total width of the grid measured in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the grid measured in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Cell at the center of the grid where each round begins.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Computes the cell adjacent to `cell` in the given heading, wrapping
    /// each coordinate around the grid edge. Total for every input.
    #[must_use]
    pub const fn neighbor(&self, cell: CellCoord, direction: Direction) -> CellCoord {
        let column = cell.column() % self.columns;
        let row = cell.row() % self.rows;
        match direction {
            Direction::North => CellCoord::new(column, (row + self.rows - 1) % self.rows),
            Direction::East => CellCoord::new((column + 1) % self.columns, row),
            Direction::South => CellCoord::new(column, (row + 1) % self.rows),
            Direction::West => CellCoord::new((column + self.columns - 1) % self.columns, row),
        }
    }
}

impl Default for GridSize {
    /// Mirrors the original 640x480 playfield divided into 20px cells.
    fn default() -> Self {
        Self::new(32, 24, 20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GridSize};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn opposite_is_an_involution() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_eq!(direction.opposite().opposite(), direction);
            assert!(direction.is_opposite_of(direction.opposite()));
            assert!(!direction.is_opposite_of(direction));
        }
    }

    #[test]
    fn neighbor_moves_one_cell_per_heading() {
        let grid = GridSize::new(32, 24, 20.0);
        let origin = CellCoord::new(16, 12);
        assert_eq!(
            grid.neighbor(origin, Direction::North),
            CellCoord::new(16, 11)
        );
        assert_eq!(
            grid.neighbor(origin, Direction::East),
            CellCoord::new(17, 12)
        );
        assert_eq!(
            grid.neighbor(origin, Direction::South),
            CellCoord::new(16, 13)
        );
        assert_eq!(
            grid.neighbor(origin, Direction::West),
            CellCoord::new(15, 12)
        );
    }

    #[test]
    fn neighbor_wraps_around_every_edge() {
        let grid = GridSize::new(8, 6, 10.0);
        assert_eq!(
            grid.neighbor(CellCoord::new(0, 0), Direction::North),
            CellCoord::new(0, 5)
        );
        assert_eq!(
            grid.neighbor(CellCoord::new(7, 3), Direction::East),
            CellCoord::new(0, 3)
        );
        assert_eq!(
            grid.neighbor(CellCoord::new(4, 5), Direction::South),
            CellCoord::new(4, 0)
        );
        assert_eq!(
            grid.neighbor(CellCoord::new(0, 2), Direction::West),
            CellCoord::new(7, 2)
        );
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let grid = GridSize::new(0, 0, 20.0);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 1);
        assert_eq!(
            grid.neighbor(CellCoord::new(0, 0), Direction::East),
            CellCoord::new(0, 0)
        );
    }

    #[test]
    fn default_grid_matches_original_playfield() {
        let grid = GridSize::default();
        assert_eq!(grid.columns(), 32);
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.center(), CellCoord::new(16, 12));
        assert!((grid.width() - 640.0).abs() < f32::EPSILON);
        assert!((grid.height() - 480.0).abs() < f32::EPSILON);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::West);
    }

    #[test]
    fn grid_size_round_trips_through_bincode() {
        assert_round_trip(&GridSize::new(32, 24, 20.0));
    }
}
