//! Combat integration tests
//!
//! Knife throw end to end: keyframe -> projectile -> damage -> death ->
//! flicker -> despawn, plus a long scripted round checking invariants.

mod common;

use bevy::prelude::*;
use brawler_simulation::*;
use common::*;

fn projectile_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Projectile>().iter(world).count()
}

fn set_enemy_health(app: &mut App, enemy: Entity, health: u32) {
    *app.world_mut().get_mut::<Health>(enemy).unwrap() = Health::new(health);
}

#[test]
fn test_knife_kills_enemy_and_body_despawns() {
    let mut app = sim_app(42);
    let (player, enemy) = spawn_round(&mut app, Some(Vec3::new(-3.0, 0.0, 0.0)));
    let enemy = enemy.unwrap();
    run(&mut app, 2);
    set_enemy_health(&mut app, enemy, 10);

    send_keyframe(
        &mut app,
        player,
        KeyframeCallback::SpawnProjectile("Knife".to_string()),
    );
    run(&mut app, 1);
    assert_eq!(projectile_count(&mut app), 1);

    // 3m at 10 m/s
    run(&mut app, 30);
    assert_eq!(projectile_count(&mut app), 0, "knife should be consumed by the hit");
    assert_eq!(state_of(&app, enemy), UnitStateKind::Death);
    assert!(app.world().get::<Dead>(enemy).is_some());
    assert!(app.world().get::<DeathFlicker>(enemy).is_some());

    // Flicker delay plus two seconds of blinking
    run(&mut app, 240);
    assert!(app.world().get_entity(enemy).is_err());
    assert!(app.world().get_entity(player).is_ok());
}

#[test]
fn test_knife_passes_player_and_expires() {
    let mut app = sim_app(42);
    let (player, _) = spawn_round(&mut app, None);
    run(&mut app, 2);

    send_keyframe(
        &mut app,
        player,
        KeyframeCallback::SpawnProjectile("Knife".to_string()),
    );
    run(&mut app, 1);
    assert_eq!(projectile_count(&mut app), 1);

    let lifetime = app
        .world()
        .resource::<ProjectileRegistry>()
        .get("Knife")
        .unwrap()
        .lifetime;
    run(&mut app, (lifetime * 60.0) as usize + 5);

    assert_eq!(projectile_count(&mut app), 0);
    let health = app.world().get::<Health>(player).unwrap();
    assert_eq!(health.current, health.max);
}

#[test]
fn test_dead_enemy_takes_no_more_hits() {
    let mut app = sim_app(42);
    let (player, enemy) = spawn_round(&mut app, Some(Vec3::new(-1.0, 0.0, 0.0)));
    let enemy = enemy.unwrap();
    run(&mut app, 2);
    set_enemy_health(&mut app, enemy, 1);

    send_keyframe(&mut app, player, KeyframeCallback::CheckForHit);
    run(&mut app, 3);
    assert!(app.world().get::<Dead>(enemy).is_some());
    let flicker_t = app.world().get::<DeathFlicker>(enemy).unwrap().t;

    for _ in 0..2 {
        send_keyframe(&mut app, player, KeyframeCallback::CheckForHit);
        run(&mut app, 3);
    }

    // No second death: the flicker was not restarted
    let flicker = app.world().get::<DeathFlicker>(enemy).unwrap();
    assert!(flicker.t >= flicker_t);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    assert_eq!(state_of(&app, enemy), UnitStateKind::Death);
}

/// Scripted round: walk, jump, throw, punch. Checks invariants every tick.
#[test]
fn test_scripted_round_keeps_invariants() {
    let mut app = sim_app(42);
    let (player, enemy) = spawn_round(&mut app, Some(Vec3::new(-6.0, 0.0, 0.0)));
    let enemy = enemy.unwrap();
    run(&mut app, 2);

    for tick in 0..600 {
        match tick {
            10 => {
                app.world_mut().send_event(DirectionInput::new(1.0, 0.0));
            }
            60 => {
                app.world_mut().send_event(CombatInput::new(InputAction::Jump));
            }
            200 => {
                app.world_mut().send_event(DirectionInput::new(0.0, 0.0));
            }
            220 => send_keyframe(
                &mut app,
                player,
                KeyframeCallback::SpawnProjectile("Knife".to_string()),
            ),
            260 => send_keyframe(&mut app, player, KeyframeCallback::CheckForHit),
            _ => {}
        }
        app.update();

        let health = app.world().get::<Health>(player).unwrap();
        assert!(health.current <= health.max);
        let position = position_of(&app, player);
        assert!(position.y >= 0.0 && position.y < 5.0, "tick {}: {:?}", tick, position);
        assert!(position.is_finite());

        if let Ok(entity) = app.world().get_entity(enemy) {
            let health = entity.get::<Health>().unwrap();
            assert!(health.current <= health.max);
        }
    }

    logger::log("Scripted round: 600 ticks completed");
}
