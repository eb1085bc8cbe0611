//! Shared helpers for the integration suites
//!
//! Apps advance exactly one fixed step per `app.update()`. Rapier is not
//! loaded; `integrate_bodies` moves unit roots by their velocity with gravity
//! and a flat floor at y = 0, which is all the movement probes need.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Velocity;
use brawler_simulation::*;

pub const GRAVITY: f32 = -9.81;

pub fn sim_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins((TransformPlugin, SimulationPlugin));

    let step = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.add_systems(FixedUpdate, integrate_bodies.after(MovementSet::Step));

    // Startup; the first frame has zero delta so no fixed step runs
    app.update();
    app
}

fn integrate_bodies(
    time: Res<Time<Fixed>>,
    mut bodies: Query<(&mut Velocity, &mut Transform), With<MovementController>>,
) {
    let dt = time.delta_secs();
    for (mut velocity, mut transform) in bodies.iter_mut() {
        velocity.linvel.y += GRAVITY * dt;
        transform.translation += velocity.linvel * dt;
        if transform.translation.y < 0.0 {
            transform.translation.y = 0.0;
            velocity.linvel.y = velocity.linvel.y.max(0.0);
        }
    }
}

pub fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Floor (top at y = 0) plus a player at the origin and optionally an enemy
pub fn spawn_round(app: &mut App, enemy_at: Option<Vec3>) -> (Entity, Option<Entity>) {
    let settings = MovementSettings::default();
    let world = app.world_mut();
    let mut commands = world.commands();

    spawn_level_box(
        &mut commands,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(20.0, 0.5, 4.0),
        physics::layers::ENVIRONMENT,
    );
    let player = spawn_player(&mut commands, &UnitBlueprint::new("Player", Vec3::ZERO, &settings));
    let enemy = enemy_at.map(|position| {
        spawn_enemy(
            &mut commands,
            &UnitBlueprint::new("Enemy", position, &settings).facing(Direction::Left),
        )
    });
    world.flush();

    (player, enemy)
}

pub fn animator_of(app: &mut App, root: Entity) -> Entity {
    let world = app.world_mut();
    let mut animators = world.query::<(Entity, &UnitAnimator)>();
    animators
        .iter(world)
        .find(|(_, animator)| animator.unit == Some(root))
        .map(|(entity, _)| entity)
        .expect("unit has an animator")
}

pub fn send_keyframe(app: &mut App, root: Entity, callback: KeyframeCallback) {
    let animator = animator_of(app, root);
    app.world_mut()
        .send_event(AnimationKeyframe::new(animator, callback));
}

pub fn state_of(app: &App, entity: Entity) -> UnitStateKind {
    app.world()
        .get::<UnitState>(entity)
        .expect("unit has a state")
        .current()
}

pub fn position_of(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("unit has a transform")
        .translation
}

pub fn velocity_of(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Velocity>(entity)
        .expect("unit has a velocity")
        .linvel
}

pub fn controller_of(app: &App, entity: Entity) -> &MovementController {
    app.world()
        .get::<MovementController>(entity)
        .expect("unit has a movement controller")
}
