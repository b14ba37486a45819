#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick director that drives the simulation one step at a time.
//!
//! The render shell calls [`Director::step`] once per tick, handing over the
//! most recent directional input it observed. The director turns that input
//! into a command batch, applies it to the world, and folds the broadcast
//! events into a [`StepOutcome`] the shell redraws from. Self-collision is a
//! normal transition here, surfaced through [`StepOutcome::did_reset`]
//! rather than an error path.

use grid_serpent_core::{CellCoord, Command, Direction, Event};
use grid_serpent_world::{self as world, query, World};

/// Everything the render shell needs to know after one simulation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Serpent cells after the step, ordered head first.
    pub cells: Vec<CellCoord>,
    /// Tail cell released during the step, if any, for footprint erasure.
    pub vacated_cell: Option<CellCoord>,
    /// Cell occupied by the food after the step.
    pub food_position: CellCoord,
    /// Whether the serpent collided with itself and the round restarted.
    pub did_reset: bool,
}

/// Orchestrates one simulation step per invocation.
#[derive(Debug, Default)]
pub struct Director {
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Director {
    /// Creates a director with empty command and event buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes one simulation step against the world.
    ///
    /// The buffered `input` is queued before the advance so the reversal
    /// rule applies against the heading the serpent actually travels.
    pub fn step(&mut self, world: &mut World, input: Option<Direction>) -> StepOutcome {
        self.commands.clear();
        self.events.clear();

        if let Some(direction) = input {
            self.commands.push(Command::QueueHeading { direction });
        }
        self.commands.push(Command::Advance);

        for command in self.commands.drain(..) {
            world::apply(world, command, &mut self.events);
        }

        let mut vacated_cell = None;
        let mut did_reset = false;
        for event in &self.events {
            match event {
                Event::SerpentAdvanced { vacated, .. } => vacated_cell = *vacated,
                Event::SerpentReset { .. } => {
                    vacated_cell = None;
                    did_reset = true;
                }
                _ => {}
            }
        }

        StepOutcome {
            cells: query::serpent_view(world).into_cells(),
            vacated_cell,
            food_position: query::food_position(world),
            did_reset,
        }
    }

    /// Events broadcast during the most recent step, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
