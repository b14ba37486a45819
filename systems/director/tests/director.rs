use grid_serpent_core::{CellCoord, Direction, Event, GridSize};
use grid_serpent_system_director::Director;
use grid_serpent_world::{query, scaffolding, Config, World};

fn standard_grid() -> GridSize {
    GridSize::new(32, 24, 20.0)
}

#[test]
fn first_step_moves_center_serpent_east() {
    let grid = standard_grid();
    let mut world = scaffolding::world_with(
        grid,
        &[grid.center()],
        Direction::East,
        CellCoord::new(0, 0),
        11,
    );
    let mut director = Director::new();

    let outcome = director.step(&mut world, None);

    assert_eq!(outcome.cells, vec![CellCoord::new(17, 12)]);
    assert_eq!(outcome.vacated_cell, Some(CellCoord::new(16, 12)));
    assert!(!outcome.did_reset);
    assert_eq!(outcome.food_position, CellCoord::new(0, 0));
}

#[test]
fn buffered_input_turns_the_serpent() {
    let grid = standard_grid();
    let mut world = scaffolding::world_with(
        grid,
        &[grid.center()],
        Direction::East,
        CellCoord::new(0, 0),
        11,
    );
    let mut director = Director::new();

    let outcome = director.step(&mut world, Some(Direction::North));

    assert_eq!(outcome.cells, vec![CellCoord::new(16, 11)]);
    assert!(director
        .events()
        .contains(&Event::HeadingQueued {
            direction: Direction::North
        }));
}

#[test]
fn reversal_input_is_silently_ignored() {
    let grid = standard_grid();
    let mut world = scaffolding::world_with(
        grid,
        &[grid.center()],
        Direction::East,
        CellCoord::new(0, 0),
        11,
    );
    let mut director = Director::new();

    let outcome = director.step(&mut world, Some(Direction::West));

    assert_eq!(outcome.cells, vec![CellCoord::new(17, 12)]);
    assert!(director
        .events()
        .iter()
        .all(|event| !matches!(event, Event::HeadingQueued { .. })));
}

#[test]
fn eating_food_grows_and_relocates_it() {
    let grid = standard_grid();
    let body = [
        CellCoord::new(5, 5),
        CellCoord::new(4, 5),
        CellCoord::new(3, 5),
    ];
    let mut world = scaffolding::world_with(grid, &body, Direction::East, CellCoord::new(6, 5), 11);
    let mut director = Director::new();

    let outcome = director.step(&mut world, None);

    assert_eq!(
        outcome.cells,
        vec![
            CellCoord::new(6, 5),
            CellCoord::new(5, 5),
            CellCoord::new(4, 5),
        ]
    );
    assert_eq!(outcome.vacated_cell, Some(CellCoord::new(3, 5)));
    assert_eq!(query::serpent_view(&world).target_length(), 4);
    assert!(director.events().contains(&Event::FoodEaten {
        cell: CellCoord::new(6, 5),
        target_length: 4,
    }));
    assert!(!outcome.cells.contains(&outcome.food_position));
    assert!(grid.contains(outcome.food_position));

    // The next advance retains the tail, finishing the growth cycle.
    let grown = director.step(&mut world, None);
    assert_eq!(grown.cells.len(), 4);
    assert_eq!(grown.vacated_cell, None);
}

#[test]
fn self_collision_resets_the_round() {
    let grid = standard_grid();
    // Head at (4, 6) travelling south; turning east runs into the body at
    // (5, 6), which is not the tail.
    let body = [
        CellCoord::new(4, 6),
        CellCoord::new(4, 5),
        CellCoord::new(5, 5),
        CellCoord::new(5, 6),
        CellCoord::new(6, 6),
    ];
    let mut world =
        scaffolding::world_with(grid, &body, Direction::South, CellCoord::new(0, 0), 11);
    let mut director = Director::new();

    let outcome = director.step(&mut world, Some(Direction::East));

    assert!(outcome.did_reset);
    assert_eq!(outcome.cells, vec![grid.center()]);
    assert_eq!(outcome.vacated_cell, None);
    assert!(director.events().contains(&Event::SerpentCollided {
        at: CellCoord::new(5, 6)
    }));

    let view = query::serpent_view(&world);
    assert_eq!(view.heading(), Direction::East);
    assert_eq!(view.target_length(), 1);
    assert_ne!(outcome.food_position, grid.center());
}

#[test]
fn collision_skips_growth_and_food_checks_that_tick() {
    let grid = standard_grid();
    // The food sits on the colliding cell; the reset must win and no
    // growth may be recorded.
    let body = [
        CellCoord::new(4, 6),
        CellCoord::new(4, 5),
        CellCoord::new(5, 5),
        CellCoord::new(5, 6),
        CellCoord::new(6, 6),
    ];
    let mut world =
        scaffolding::world_with(grid, &body, Direction::South, CellCoord::new(5, 6), 11);
    let mut director = Director::new();

    let outcome = director.step(&mut world, Some(Direction::East));

    assert!(outcome.did_reset);
    assert_eq!(query::serpent_view(&world).target_length(), 1);
    assert!(director
        .events()
        .iter()
        .all(|event| !matches!(event, Event::FoodEaten { .. })));
}

#[test]
fn wraparound_keeps_the_serpent_on_the_grid() {
    let grid = standard_grid();
    let mut world = scaffolding::world_with(
        grid,
        &[CellCoord::new(31, 12)],
        Direction::East,
        CellCoord::new(0, 0),
        11,
    );
    let mut director = Director::new();

    let outcome = director.step(&mut world, None);

    assert_eq!(outcome.cells, vec![CellCoord::new(0, 12)]);
}

#[test]
fn filling_the_board_is_reported_instead_of_spinning() {
    let grid = GridSize::new(2, 1, 20.0);
    let mut world = scaffolding::world_with(
        grid,
        &[CellCoord::new(1, 0)],
        Direction::East,
        CellCoord::new(0, 0),
        11,
    );
    let mut director = Director::new();

    // Eat at (0, 0): one free cell remains, so the food lands there.
    let first = director.step(&mut world, None);
    assert_eq!(first.food_position, CellCoord::new(1, 0));

    // Eat at (1, 0): the grown serpent now covers the whole grid.
    let second = director.step(&mut world, None);
    assert_eq!(second.cells.len(), 2);
    assert!(director.events().contains(&Event::BoardFilled));
    // The food keeps its previous position underneath the serpent.
    assert_eq!(second.food_position, CellCoord::new(1, 0));
}

#[test]
fn long_runs_preserve_the_step_invariants() {
    let grid = standard_grid();
    let mut world = World::with_config(Config::new(grid, 23));
    let mut director = Director::new();

    let mut previous_length = 1;
    for tick in 0..500 {
        // Sweep through every heading so the run covers turns, wraparound
        // and the occasional self-collision reset.
        let input = match tick % 13 {
            0 => Some(Direction::North),
            4 => Some(Direction::East),
            7 => Some(Direction::South),
            10 => Some(Direction::West),
            _ => None,
        };
        let outcome = director.step(&mut world, input);

        let length = outcome.cells.len();
        if outcome.did_reset {
            assert_eq!(outcome.cells, vec![grid.center()]);
            assert_eq!(outcome.vacated_cell, None);
        } else {
            // Length moves by at most one cell per step, and only grows on
            // the ticks that retain the tail.
            assert!(length <= previous_length + 1);
            assert_eq!(outcome.vacated_cell.is_none(), length > previous_length);
        }

        for cell in &outcome.cells {
            assert!(grid.contains(*cell));
        }
        let mut sorted = outcome.cells.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), length, "serpent cells must stay distinct");
        assert!(!outcome.cells.contains(&outcome.food_position));

        previous_length = length;
    }
}
