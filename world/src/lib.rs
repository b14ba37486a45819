#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Serpent.
//!
//! The world owns the serpent, the food, and the seeded random number
//! generator used for food placement. Adapters never touch this state
//! directly: they submit [`Command`] values through [`apply`], observe the
//! broadcast [`Event`] values, and read immutable snapshots through the
//! [`query`] module.

use std::collections::VecDeque;

use grid_serpent_core::{CellCoord, Command, Direction, Event, GridSize, WELCOME_BANNER};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FOOD_PLACEMENT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

const INITIAL_HEADING: Direction = Direction::East;
const INITIAL_TARGET_LENGTH: u32 = 1;

/// Configuration parameters required to construct a world.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    grid: GridSize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided grid and seed.
    #[must_use]
    pub const fn new(grid: GridSize, rng_seed: u64) -> Self {
        Self { grid, rng_seed }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(GridSize::default(), FOOD_PLACEMENT_SEED)
    }
}

/// Represents the authoritative Grid Serpent world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridSize,
    serpent: Serpent,
    food: Food,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world using the default grid and placement seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new world from an explicit configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let serpent = Serpent::at_center(&config.grid);
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let mut food = Food::outside_grid();
        let _ = food.relocate(&config.grid, serpent.cells(), &mut rng);
        Self {
            banner: WELCOME_BANNER,
            grid: config.grid,
            serpent,
            food,
            rng,
        }
    }

    fn replace_food(&mut self, out_events: &mut Vec<Event>) {
        match self
            .food
            .relocate(&self.grid, self.serpent.cells(), &mut self.rng)
        {
            PlacementOutcome::Placed(cell) => out_events.push(Event::FoodPlaced { cell }),
            PlacementOutcome::BoardFilled => out_events.push(Event::BoardFilled),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            columns,
            rows,
            cell_length,
        } => {
            world.grid = GridSize::new(columns, rows, cell_length);
            world.serpent = Serpent::at_center(&world.grid);
            out_events.push(Event::GridConfigured {
                columns: world.grid.columns(),
                rows: world.grid.rows(),
            });
            world.replace_food(out_events);
        }
        Command::QueueHeading { direction } => {
            if world.serpent.queue_heading(direction) {
                out_events.push(Event::HeadingQueued { direction });
            }
        }
        Command::Advance => match world.serpent.advance(&world.grid) {
            AdvanceResult::Advanced { head, vacated } => {
                out_events.push(Event::SerpentAdvanced { head, vacated });
                if head == world.food.position() {
                    world.serpent.grow();
                    out_events.push(Event::FoodEaten {
                        cell: head,
                        target_length: world.serpent.target_length(),
                    });
                    world.replace_food(out_events);
                }
            }
            AdvanceResult::Collided { at } => {
                out_events.push(Event::SerpentCollided { at });
                world.serpent.reset(&world.grid);
                out_events.push(Event::SerpentReset {
                    head: world.serpent.head(),
                });
                world.replace_food(out_events);
            }
        },
        Command::Reset => {
            world.serpent.reset(&world.grid);
            out_events.push(Event::SerpentReset {
                head: world.serpent.head(),
            });
            world.replace_food(out_events);
        }
    }
}

/// Outcome of a single serpent advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceResult {
    /// The serpent moved one cell forward without touching itself.
    Advanced {
        /// Cell newly occupied by the head.
        head: CellCoord,
        /// Tail cell released by the move, absent while the serpent grows.
        vacated: Option<CellCoord>,
    },
    /// The serpent ran into its own body.
    Collided {
        /// Cell where the head met the body.
        at: CellCoord,
    },
}

/// Ordered segment chain controlled by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Serpent {
    cells: VecDeque<CellCoord>,
    direction: Direction,
    pending: Option<Direction>,
    target_length: u32,
}

impl Serpent {
    /// Creates a single-cell serpent at the grid center, heading east.
    #[must_use]
    pub fn at_center(grid: &GridSize) -> Self {
        let mut cells = VecDeque::with_capacity(16);
        cells.push_back(grid.center());
        Self {
            cells,
            direction: INITIAL_HEADING,
            pending: None,
            target_length: INITIAL_TARGET_LENGTH,
        }
    }

    /// Buffers a heading change for the next advance, rejecting an exact
    /// reversal of the current heading. The last accepted change wins.
    /// Returns whether the change was accepted.
    pub fn queue_heading(&mut self, direction: Direction) -> bool {
        if direction.is_opposite_of(self.direction) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Moves the serpent one cell forward along its heading.
    ///
    /// The self-collision scan excludes exactly the cell this advance is
    /// about to drop: the current tail is safe to enter while the serpent is
    /// at its target length (the tail moves away this tick), but fatal while
    /// the serpent still grows (nothing is dropped).
    pub fn advance(&mut self, grid: &GridSize) -> AdvanceResult {
        if let Some(pending) = self.pending.take() {
            self.direction = pending;
        }

        let head = self.head();
        let new_head = grid.neighbor(head, self.direction);
        let growing = (self.cells.len() as u32) < self.target_length;
        let scanned = if growing {
            self.cells.len()
        } else {
            self.cells.len().saturating_sub(1)
        };
        if self.cells.iter().take(scanned).any(|cell| *cell == new_head) {
            return AdvanceResult::Collided { at: new_head };
        }

        self.cells.push_front(new_head);
        let vacated = if (self.cells.len() as u32) > self.target_length {
            self.cells.pop_back()
        } else {
            None
        };

        AdvanceResult::Advanced {
            head: new_head,
            vacated,
        }
    }

    /// Raises the length the serpent grows toward by one cell. Growth is
    /// never deduplicated: each call adds one unit.
    pub fn grow(&mut self) {
        self.target_length = self.target_length.saturating_add(1);
    }

    /// Restores the serpent to its initial single-cell state.
    pub fn reset(&mut self, grid: &GridSize) {
        self.cells.clear();
        self.cells.push_back(grid.center());
        self.direction = INITIAL_HEADING;
        self.pending = None;
        self.target_length = INITIAL_TARGET_LENGTH;
    }

    /// Cell currently occupied by the serpent's head.
    #[must_use]
    pub fn head(&self) -> CellCoord {
        *self.cells.front().expect("serpent is never empty")
    }

    /// Occupied cells ordered head first.
    #[must_use]
    pub fn cells(&self) -> &VecDeque<CellCoord> {
        &self.cells
    }

    /// Heading applied on the next advance unless a buffered change replaces it.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.direction
    }

    /// Length the serpent currently grows toward.
    #[must_use]
    pub const fn target_length(&self) -> u32 {
        self.target_length
    }
}

/// Outcome of a food placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The food was assigned the contained free cell.
    Placed(CellCoord),
    /// Every cell was occupied; the food kept its previous position.
    BoardFilled,
}

/// Single consumable item placed on an unoccupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    cell: CellCoord,
}

impl Food {
    /// Creates a food placeholder that no in-bounds head can match until the
    /// first relocation assigns a real cell.
    #[must_use]
    const fn outside_grid() -> Self {
        Self {
            cell: CellCoord::new(u32::MAX, u32::MAX),
        }
    }

    /// Moves the food to a uniformly random cell outside the occupied set.
    ///
    /// Sampling retries until a free cell turns up, which terminates because
    /// a full board is rejected up front with [`PlacementOutcome::BoardFilled`]
    /// instead of spinning forever.
    pub fn relocate(
        &mut self,
        grid: &GridSize,
        occupied: &VecDeque<CellCoord>,
        rng: &mut ChaCha8Rng,
    ) -> PlacementOutcome {
        if occupied.len() as u64 >= grid.capacity() {
            return PlacementOutcome::BoardFilled;
        }

        loop {
            let cell = CellCoord::new(
                rng.gen_range(0..grid.columns()),
                rng.gen_range(0..grid.rows()),
            );
            if !occupied.contains(&cell) {
                self.cell = cell;
                return PlacementOutcome::Placed(cell);
            }
        }
    }

    /// Cell currently occupied by the food.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.cell
    }
}

/// Test scaffolding that assembles worlds in explicitly prepared states.
#[cfg(feature = "serpent_scaffolding")]
pub mod scaffolding {
    use grid_serpent_core::{CellCoord, Direction, GridSize, WELCOME_BANNER};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{Food, Serpent, World};

    /// Builds a world whose serpent occupies `cells` (head first) with the
    /// provided heading, a target length equal to the cell count, and the
    /// food pinned to `food`.
    #[must_use]
    pub fn world_with(
        grid: GridSize,
        cells: &[CellCoord],
        heading: Direction,
        food: CellCoord,
        rng_seed: u64,
    ) -> World {
        assert!(!cells.is_empty(), "scaffolded serpent requires cells");
        let serpent = Serpent {
            cells: cells.iter().copied().collect(),
            direction: heading,
            pending: None,
            target_length: cells.len() as u32,
        };
        World {
            banner: WELCOME_BANNER,
            grid,
            serpent,
            food: Food { cell: food },
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_serpent_core::{CellCoord, Direction, GridSize};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's grid definition.
    #[must_use]
    pub fn grid(world: &World) -> &GridSize {
        &world.grid
    }

    /// Captures a read-only snapshot of the serpent.
    #[must_use]
    pub fn serpent_view(world: &World) -> SerpentView {
        SerpentView {
            cells: world.serpent.cells().iter().copied().collect(),
            heading: world.serpent.heading(),
            target_length: world.serpent.target_length(),
        }
    }

    /// Cell currently occupied by the food.
    #[must_use]
    pub fn food_position(world: &World) -> CellCoord {
        world.food.position()
    }

    /// Read-only snapshot describing the serpent, head first.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SerpentView {
        cells: Vec<CellCoord>,
        heading: Direction,
        target_length: u32,
    }

    impl SerpentView {
        /// Cell occupied by the serpent's head.
        #[must_use]
        pub fn head(&self) -> CellCoord {
            self.cells[0]
        }

        /// Occupied cells ordered head first.
        #[must_use]
        pub fn cells(&self) -> &[CellCoord] {
            &self.cells
        }

        /// Heading applied on the next advance.
        #[must_use]
        pub const fn heading(&self) -> Direction {
            self.heading
        }

        /// Length the serpent currently grows toward.
        #[must_use]
        pub const fn target_length(&self) -> u32 {
            self.target_length
        }

        /// Consumes the view, yielding the underlying cells.
        #[must_use]
        pub fn into_cells(self) -> Vec<CellCoord> {
            self.cells
        }
    }
}
