use bevy::prelude::*;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use brawler_simulation::{
    spawn_demo_stage, spawn_enemy, spawn_player, ConfigPlugin, Direction, MovementSettings,
    SimulationPlugin, UnitBlueprint,
};

mod camera;
mod controls;
mod rendering;

use camera::{CameraPlugin, FollowCamera};
use controls::ControlsPlugin;
use rendering::RenderingSyncPlugin;

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/config/brawler.ron");
const ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");

fn main() {
    App::new()
        // Bevy defaults (rendering, input, audio, etc.)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Brawler".to_string(),
                        resolution: (1280., 720.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: ASSET_DIR.to_string(),
                    ..default()
                }),
        )
        // Simulation (headless ECS logic), then the config on top of its defaults
        .add_plugins(SimulationPlugin)
        .add_plugins(ConfigPlugin::from_path(CONFIG_PATH))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        // Visuals, camera, keyboard
        .add_plugins((RenderingSyncPlugin, CameraPlugin, ControlsPlugin))
        .add_systems(Startup, setup_scene)
        .run();
}

/// Lights, camera, stage, one player and two enemies
fn setup_scene(mut commands: Commands, settings: Res<MovementSettings>) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    commands.spawn(FollowCamera::bundle());

    spawn_demo_stage(&mut commands);
    spawn_player(&mut commands, &UnitBlueprint::new("Player", Vec3::ZERO, &settings));
    spawn_enemy(
        &mut commands,
        &UnitBlueprint::new("Enemy A", Vec3::new(-4.0, 0.0, 0.0), &settings)
            .facing(Direction::Left)
            .with_health(30),
    );
    spawn_enemy(
        &mut commands,
        &UnitBlueprint::new("Enemy B", Vec3::new(5.0, 0.0, 1.0), &settings).with_health(30),
    );
}
