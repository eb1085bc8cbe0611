//! Tests for damage and death handling.

#[cfg(test)]
mod tests {
    use crate::animation::DeathFlicker;
    use crate::combat::{CombatPlugin, DamageDealt, UnitDied};
    use crate::components::{Dead, Health, Player, UnitState, UnitStateKind};
    use bevy::prelude::*;

    fn combat_app() -> App {
        let mut app = App::new();
        app.add_plugins(CombatPlugin);
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        app
    }

    fn hit(app: &mut App, target: Entity, damage: u32) {
        app.world_mut().send_event(DamageDealt {
            attacker: Entity::PLACEHOLDER,
            target,
            damage,
        });
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn died_count(app: &App) -> usize {
        app.world().resource::<Events<UnitDied>>().len()
    }

    #[test]
    fn test_damage_reduces_health() {
        let mut app = combat_app();
        let enemy = app
            .world_mut()
            .spawn((Health::new(30), UnitState::default()))
            .id();

        hit(&mut app, enemy, 10);

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 20);
        assert_eq!(died_count(&app), 0);
        assert!(app.world().get::<Dead>(enemy).is_none());
    }

    #[test]
    fn test_lethal_hit_kills_enemy_once() {
        let mut app = combat_app();
        let enemy = app
            .world_mut()
            .spawn((Health::new(10), UnitState::default()))
            .id();

        hit(&mut app, enemy, 25);
        hit(&mut app, enemy, 25);

        assert_eq!(died_count(&app), 1);
        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
        assert!(app.world().get::<Dead>(enemy).is_some());
        assert_eq!(
            app.world().get::<UnitState>(enemy).unwrap().current(),
            UnitStateKind::Death
        );
        assert!(app.world().get::<DeathFlicker>(enemy).is_some());
    }

    #[test]
    fn test_dead_player_does_not_flicker() {
        let mut app = combat_app();
        let player = app
            .world_mut()
            .spawn((Player, Health::new(5), UnitState::default()))
            .id();

        hit(&mut app, player, 5);

        assert!(app.world().get::<Dead>(player).is_some());
        assert!(app.world().get::<DeathFlicker>(player).is_none());
    }
}
