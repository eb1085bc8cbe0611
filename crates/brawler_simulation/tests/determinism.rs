//! Determinism tests
//!
//! Same seed and same input script must give byte-identical worlds.

mod common;

use bevy::prelude::*;
use brawler_simulation::*;
use common::*;

/// Runs a scripted round and returns snapshots of transforms and camera shake
fn run_round(seed: u64, ticks: usize) -> (Vec<u8>, Vec<u8>) {
    let mut app = sim_app(seed);
    let (player, _) = spawn_round(&mut app, Some(Vec3::new(-5.0, 0.0, 0.0)));
    app.world_mut().spawn(CameraShaker::default());
    run(&mut app, 2);

    for tick in 0..ticks {
        match tick {
            5 => {
                app.world_mut().send_event(DirectionInput::new(1.0, 0.3));
            }
            40 => {
                app.world_mut().send_event(CombatInput::new(InputAction::Jump));
            }
            80 => send_keyframe(&mut app, player, KeyframeCallback::CamShake(0.8)),
            120 => {
                app.world_mut().send_event(DirectionInput::new(-1.0, 0.0));
            }
            150 => send_keyframe(
                &mut app,
                player,
                KeyframeCallback::SpawnProjectile("Knife".to_string()),
            ),
            _ => {}
        }
        app.update();
    }

    let world = app.world_mut();
    (
        world_snapshot::<Transform>(world),
        world_snapshot::<CameraShaker>(world),
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_round(SEED, 300);
    let second = run_round(SEED, 300);

    assert_eq!(
        first, second,
        "Two runs with seed {} produced different worlds",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_round(SEED, 200)).collect();
    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Run {} differs from run 0",
            i
        );
    }
}

#[test]
fn test_camera_shake_follows_seed() {
    // The shake is the only consumer of the RNG; stop mid-shake
    let (_, first) = run_round(1, 85);
    let (_, second) = run_round(2, 85);
    assert_ne!(first, second);
}
