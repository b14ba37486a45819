#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Serpent experience.

mod settings;

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use grid_serpent_core::{Direction, Event, GridSize};
use grid_serpent_rendering::{
    BoardPresentation, Presentation, RenderingBackend, Scene, BOARD_BACKGROUND, CELL_BORDER,
    FOOD_FILL, SERPENT_FILL,
};
use grid_serpent_rendering_macroquad::MacroquadBackend;
use grid_serpent_system_director::Director;
use grid_serpent_world::{query, Config, World};

use crate::settings::{Settings, SettingsOverrides};

/// Command-line arguments accepted by the Grid Serpent binary.
#[derive(Debug, Parser)]
#[command(name = "grid-serpent", about = "Grid-based serpent game on a toroidal board")]
struct Args {
    /// Number of cell columns on the board.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of cell rows on the board.
    #[arg(long)]
    rows: Option<u32>,
    /// Side length of a single cell in pixels.
    #[arg(long)]
    cell_length: Option<f32>,
    /// Simulation steps per second.
    #[arg(long)]
    tick_rate: Option<u32>,
    /// Seed for the food placement RNG.
    #[arg(long)]
    seed: Option<u64>,
    /// Path to a TOML settings file; explicit flags win over its contents.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            columns: self.columns,
            rows: self.rows,
            cell_length: self.cell_length,
            tick_rate: self.tick_rate,
            seed: self.seed,
        }
    }
}

/// Entry point for the Grid Serpent command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file_overrides = match &args.config {
        Some(path) => SettingsOverrides::load(path)?,
        None => SettingsOverrides::default(),
    };
    let settings = Settings::default()
        .apply(&file_overrides)
        .apply(&args.overrides());
    ensure!(settings.tick_rate > 0, "tick-rate must be positive");

    let grid = GridSize::new(settings.columns, settings.rows, settings.cell_length);
    let mut world = World::with_config(Config::new(grid, settings.seed));
    let mut director = Director::new();

    log::info!("{}", query::welcome_banner(&world));
    log::info!(
        "board {}x{} cells, {} steps/s, seed {:#x}",
        grid.columns(),
        grid.rows(),
        settings.tick_rate,
        settings.seed,
    );

    let board = BoardPresentation::new(query::grid(&world), BOARD_BACKGROUND, CELL_BORDER)
        .context("invalid board presentation")?;
    let scene = Scene::new(
        board,
        query::serpent_view(&world).into_cells(),
        SERPENT_FILL,
        query::food_position(&world),
        FOOD_FILL,
    );
    let presentation = Presentation::new("Grid Serpent", scene);

    let tick_interval = Duration::from_secs_f64(1.0 / f64::from(settings.tick_rate));
    let mut accumulator = Duration::ZERO;
    let mut buffered_input: Option<Direction> = None;

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, frame_input, scene| {
        if let Some(direction) = frame_input.direction {
            buffered_input = Some(direction);
        }

        accumulator += frame_dt;
        while accumulator >= tick_interval {
            accumulator -= tick_interval;
            let outcome = director.step(&mut world, buffered_input.take());
            log_step_events(director.events());
            scene.serpent_cells.clear();
            scene.serpent_cells.extend_from_slice(&outcome.cells);
            scene.food_cell = outcome.food_position;
        }
    })
}

fn log_step_events(events: &[Event]) {
    for event in events {
        match event {
            Event::FoodEaten { target_length, .. } => {
                log::info!("food eaten; serpent grows toward {target_length} cells");
            }
            Event::SerpentCollided { .. } => log::info!("self-collision; round reset"),
            Event::BoardFilled => log::warn!("board filled; no free cell left for food"),
            _ => {}
        }
    }
}
