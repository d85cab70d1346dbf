//! Full game sessions driven through pointer events and frame steps.

use cubemath::prelude::*;
use cubeprefs::Preferences;
use cubepuzzle::{CubeletId, DEFAULT_CUBELET_SIZE, Lattice, LatticeCoord, RotationGroup, is_solved};
use cubepuzzle_log::{GameInfo, GameStore, KeyValueStore, MemoryStore, lattice_from_json};
use cubepuzzle_view::*;
use pretty_assertions::assert_eq;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(50);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_sim(store: &MemoryStore) -> PuzzleSimulation {
    PuzzleSimulation::new(Preferences::default(), GameStore::new(store.clone()))
}

fn ray_at(x: Float, y: Float) -> Ray {
    Ray::new(Point3::new(x, y, 100.0), -Vec3::unit_z())
}

fn tap(sim: &mut PuzzleSimulation, ms: u64) {
    sim.pointer_down(PointerDown {
        screen: Point2::new(0.0, 0.0),
        ray: ray_at(0.0, 0.0),
        hit: None,
        time: Duration::from_millis(ms),
    });
}

fn double_tap(sim: &mut PuzzleSimulation) {
    tap(sim, 0);
    tap(sim, 100);
}

fn run_until_watching(sim: &mut PuzzleSimulation) {
    for _ in 0..1000 {
        if sim.state() == GameState::Watching {
            return;
        }
        sim.step(FRAME);
    }
    panic!("still {} after 1000 frames", sim.state());
}

fn cubelet_at(lattice: &Lattice, coord: [u8; 3]) -> CubeletId {
    lattice
        .iter()
        .find(|(_, c)| c.coord == LatticeCoord(coord))
        .map(|(id, _)| id)
        .unwrap()
}

/// Drags horizontally on the +z face of the cubelet at `[1, 1, 1]` of a 2×2×2
/// cube, which turns the top layer about -y. Each screen unit of `dx` moves
/// the pointer ray by one tenth of a world unit.
fn drag_top_layer(sim: &mut PuzzleSimulation, dx: Float) {
    let cubelet = cubelet_at(sim.lattice(), [1, 1, 1]);
    sim.pointer_down(PointerDown {
        screen: Point2::new(0.0, 0.0),
        ray: ray_at(5.0, 5.0),
        hit: Some(CubeletHit {
            cubelet,
            distance: 92.0,
        }),
        time: Duration::from_secs(10),
    });
    sim.pointer_move(PointerMove {
        screen: Point2::new(-40.0, 2.0),
        ray: ray_at(1.0, 5.0),
    });
    sim.pointer_move(PointerMove {
        screen: Point2::new(dx, 2.0),
        ray: ray_at(5.0 + dx / 10.0, 5.0),
    });
    sim.pointer_up();
}

#[test]
fn test_fresh_session() {
    init_logging();

    let store = MemoryStore::new();
    let sim = new_sim(&store);
    assert_eq!(sim.state(), GameState::Idle);
    assert_eq!(sim.lattice().size(), 2);
    assert!(is_solved(sim.lattice()));
    assert_eq!(
        sim.game_info(),
        &GameInfo {
            game_time: 0.0,
            cube_size: 2,
        },
    );
    assert!(sim.rank().entries().is_empty());
    assert_eq!(sim.render_data().len(), 8);
}

#[test]
fn test_double_tap_shuffles() {
    init_logging();

    let store = MemoryStore::new();
    let mut a = new_sim(&store);
    let mut b = new_sim(&store);
    a.set_rng_seed(7);
    b.set_rng_seed(7);

    double_tap(&mut a);
    assert_eq!(a.state(), GameState::Shuffling);

    // The turning slice is shown mid-turn, but the lattice is not touched
    // until the turn completes.
    a.step(FRAME);
    let moved = a
        .render_data()
        .iter()
        .filter(|r| r.transform != a.lattice()[r.id].transform)
        .count();
    assert_eq!(moved, 4);

    // Drags are ignored while shuffling.
    drag_top_layer(&mut a, -180.0);
    assert_eq!(a.drag_phase(), &DragPhase::Idle);

    run_until_watching(&mut a);
    assert!(!is_solved(a.lattice()));
    assert_eq!(a.game_info().game_time, 0.0);

    double_tap(&mut b);
    run_until_watching(&mut b);
    assert_eq!(a.lattice(), b.lattice());
}

#[test]
fn test_progress_is_saved_after_each_turn() {
    init_logging();

    let store = MemoryStore::new();
    let mut sim = new_sim(&store);
    double_tap(&mut sim);
    run_until_watching(&mut sim);
    assert_eq!(store.get("cubeArr"), None);

    // A short drag settles back where it started.
    drag_top_layer(&mut sim, -40.0);
    assert_eq!(sim.state(), GameState::Playing);
    assert!(sim.is_correcting());
    sim.step(Duration::from_millis(100));
    assert!(!sim.is_correcting());

    let saved = store.get("cubeArr").unwrap();
    let mut restored = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
    lattice_from_json(&saved, &mut restored).unwrap();
    for (id, c) in sim.lattice().iter() {
        assert_eq!(restored[id].coord, c.coord);
    }

    let reloaded = new_sim(&store);
    assert_eq!(reloaded.game_info(), sim.game_info());
    assert!(reloaded.game_info().game_time > 0.0);
}

#[test]
fn test_resume_and_solve() {
    init_logging();

    // Save a game one turn away from solved.
    let store = MemoryStore::new();
    let mut lattice = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
    let mut group = RotationGroup::new(&lattice, Axis::Y.into(), 1);
    group.set_angle(QUARTER_TURN);
    group.dissolve(&mut lattice);
    let games = GameStore::new(store.clone());
    games.save_cubelets(&lattice);
    games.save_game_info(&GameInfo {
        game_time: 5.0,
        cube_size: 2,
    });

    let mut sim = new_sim(&store);
    assert!(!is_solved(sim.lattice()));
    assert_eq!(sim.game_info().game_time, 5.0);

    // Resuming spins the puzzle once instead of shuffling.
    double_tap(&mut sim);
    assert_eq!(sim.state(), GameState::Shuffling);
    sim.step(Duration::from_millis(1100));
    assert_eq!(sim.state(), GameState::Watching);
    assert_eq!(sim.lattice().len(), lattice.len());
    for (id, c) in sim.lattice().iter() {
        assert_eq!(c.coord, lattice[id].coord);
    }

    drag_top_layer(&mut sim, -180.0);
    sim.step(FRAME);

    assert_eq!(sim.state(), GameState::Solved);
    assert!(is_solved(sim.lattice()));
    let [entry] = sim.rank().entries() else {
        panic!("expected one rank entry");
    };
    assert_eq!(entry.cube_size, 2);
    assert!(entry.game_time > 5.0);
    assert_eq!(store.get("cubeArr").as_deref(), Some(""));
    assert_eq!(sim.game_info().game_time, 0.0);
    assert_eq!(games.load_game_info(), Some(sim.game_info().clone()));
    assert_eq!(games.load_rank(), sim.rank().clone());

    sim.dismiss_solved();
    assert_eq!(sim.state(), GameState::Idle);
}

#[test]
fn test_bad_saved_data_is_ignored() {
    init_logging();

    let store = MemoryStore::new();
    store.set("gameInfo", r#"{"gameTime":3.0,"cubeSize":3}"#.to_owned());
    store.set("cubeArr", "[1,2".to_owned());
    let sim = new_sim(&store);
    assert_eq!(sim.lattice().size(), 3);
    assert!(is_solved(sim.lattice()));
    assert_eq!(sim.game_info().game_time, 3.0);

    let store = MemoryStore::new();
    store.set("gameInfo", r#"{"gameTime":0.0,"cubeSize":40}"#.to_owned());
    let sim = new_sim(&store);
    assert_eq!(sim.lattice().size(), 2);
    assert_eq!(sim.game_info().cube_size, 2);
}

#[test]
fn test_size_change_discards_game() {
    init_logging();

    let store = MemoryStore::new();
    let mut sim = new_sim(&store);
    double_tap(&mut sim);
    run_until_watching(&mut sim);

    assert_eq!(sim.set_cube_size(4), Ok(true));
    assert_eq!(sim.state(), GameState::Idle);
    assert_eq!(sim.lattice().len(), 64);
    assert!(is_solved(sim.lattice()));
    assert_eq!(store.get("cubeArr").as_deref(), Some(""));
    assert_eq!(
        GameStore::new(store.clone()).load_game_info(),
        Some(GameInfo {
            game_time: 0.0,
            cube_size: 4,
        }),
    );
}
