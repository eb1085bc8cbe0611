//! Headless brawler simulation
//!
//! Runs a scripted round without rendering: the player walks, jumps, lands and
//! throws a knife at an enemy. Useful for checking config files and logs.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use brawler_simulation::*;

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/config/brawler.ron");

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

fn setup_round(mut commands: Commands, settings: Res<MovementSettings>) {
    spawn_demo_stage(&mut commands);
    spawn_player(&mut commands, &UnitBlueprint::new("Player", Vec3::ZERO, &settings));
    spawn_enemy(
        &mut commands,
        &UnitBlueprint::new("Enemy", Vec3::new(-4.0, 0.0, 0.0), &settings)
            .facing(Direction::Left)
            .with_health(10),
    );
}

/// Input script, indexed by tick
fn scripted_input(tick: u32, app: &mut App) {
    let world = app.world_mut();
    match tick {
        10 => {
            world.send_event(DirectionInput::new(1.0, 0.0));
        }
        70 => {
            world.send_event(DirectionInput::new(0.0, 0.0));
            world.send_event(CombatInput::new(InputAction::Jump));
        }
        160 => {
            let mut animators = world.query::<(Entity, &UnitAnimator)>();
            let candidates: Vec<(Entity, Option<Entity>)> = animators
                .iter(world)
                .map(|(entity, animator)| (entity, animator.unit))
                .collect();
            let player_animator = candidates
                .into_iter()
                .find(|(_, unit)| unit.is_some_and(|unit| world.get::<Player>(unit).is_some()))
                .map(|(entity, _)| entity);

            if let Some(animator) = player_animator {
                world.send_event(AnimationKeyframe::new(
                    animator,
                    KeyframeCallback::SpawnProjectile("Knife".to_string()),
                ));
            }
        }
        _ => {}
    }
}

fn main() {
    init_logger();
    let path = config_path();
    let config_plugin = ConfigPlugin::from_path(path);
    let config = config_plugin.resolve();
    let seed = config.seed;

    log_info(&format!("Starting brawler headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins((
        TransformPlugin,
        SimulationPlugin,
        RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule(),
    ));
    config::apply_config(&mut app, config);

    // One fixed step per update
    let step = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.add_systems(Startup, setup_round);

    for tick in 0..400 {
        scripted_input(tick, &mut app);
        app.update();

        if tick % 50 == 0 {
            let world = app.world_mut();
            let mut units = world.query::<(&Name, &Transform, &UnitState, &Health)>();
            for (name, transform, state, health) in units.iter(world) {
                log(&format!(
                    "Tick {}: {} at {:.2?} {:?} hp {}",
                    tick,
                    name,
                    transform.translation,
                    state.current(),
                    health.current
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
