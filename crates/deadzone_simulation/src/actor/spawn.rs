//! Spawn helpers для бойцов
//!
//! Работают напрямую с `&mut World` (host владеет миром между tick).
//! Все обязательные компоненты приходят через `#[require]` у Combatant/Enemy,
//! здесь только переопределяются статы.

use bevy::prelude::*;
use rand::Rng;
use crate::ai::{AiBrain, Archetype, Enemy};
use crate::combat::Weapon;
use crate::components::{Armor, Combatant, CombatantKind, Health, MovementSpeed, Player, Position};
use crate::DeterministicRng;

/// HP игрока
pub const PLAYER_MAX_HP: f32 = 100.0;

/// Стартовое оружие архетипа
pub fn default_loadout(archetype: Archetype, rng: &mut impl Rng) -> Weapon {
    match archetype {
        Archetype::Junkie => Weapon::needle(),
        Archetype::Police => Weapon::glock(),
        Archetype::Swat => {
            if rng.gen_bool(0.5) {
                Weapon::ak47()
            } else {
                Weapon::shotgun()
            }
        }
    }
}

/// Spawn игрока. Без оружия: `FireCommand` для него no-op.
pub fn spawn_player(world: &mut World, position: Vec2, weapon: Option<Weapon>) -> Entity {
    let mut entity = world.spawn((
        Combatant {
            kind: CombatantKind::Player,
        },
        Player,
        Position(position),
        Health::new(PLAYER_MAX_HP),
    ));

    if let Some(weapon) = weapon {
        entity.insert(weapon);
    }

    let id = entity.id();
    crate::log(&format!("Spawned player {:?} at {:?}", id, position));
    id
}

/// Spawn врага со статами и loadout архетипа
pub fn spawn_enemy(world: &mut World, archetype: Archetype, position: Vec2) -> Entity {
    let weapon = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        default_loadout(archetype, &mut rng.rng)
    };

    spawn_enemy_with_weapon(world, archetype, position, weapon)
}

/// Spawn врага с явно заданным оружием
pub fn spawn_enemy_with_weapon(
    world: &mut World,
    archetype: Archetype,
    position: Vec2,
    weapon: Weapon,
) -> Entity {
    let profile = archetype.profile();
    let weapon_name = weapon.name().to_string();

    let id = world
        .spawn((
            Combatant {
                kind: CombatantKind::Enemy(archetype),
            },
            Enemy { archetype },
            AiBrain::for_profile(&profile),
            Position(position),
            Health::new(profile.max_hp),
            Armor::new(profile.armor),
            MovementSpeed {
                speed: profile.speed,
            },
            weapon,
        ))
        .id();

    crate::log(&format!(
        "Spawned {:?} {:?} at {:?} with {}",
        archetype, id, position, weapon_name
    ));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiState, AiTarget};
    use crate::combat::PoisonStatus;
    use crate::components::{Heading, Hitbox, Velocity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(DeterministicRng::new(42));
        world
    }

    #[test]
    fn test_spawn_player_has_required_components() {
        let mut world = world();
        let player = spawn_player(&mut world, Vec2::new(10.0, 20.0), Some(Weapon::glock()));

        assert!(world.get::<Player>(player).is_some());
        assert_eq!(world.get::<Health>(player).map(|h| h.max), Some(100.0));
        assert_eq!(world.get::<Position>(player).map(|p| p.0), Some(Vec2::new(10.0, 20.0)));
        assert!(world.get::<Velocity>(player).is_some());
        assert!(world.get::<Heading>(player).is_some());
        assert!(world.get::<Hitbox>(player).is_some());
        assert!(world.get::<PoisonStatus>(player).is_some());
        assert_eq!(world.get::<Weapon>(player).map(|w| w.name().to_string()), Some("Glock".to_string()));
    }

    #[test]
    fn test_spawn_unarmed_player() {
        let mut world = world();
        let player = spawn_player(&mut world, Vec2::ZERO, None);
        assert!(world.get::<Weapon>(player).is_none());
    }

    #[test]
    fn test_spawn_enemy_uses_profile() {
        let mut world = world();
        let police = spawn_enemy(&mut world, Archetype::Police, Vec2::ZERO);

        assert_eq!(world.get::<Health>(police).map(|h| h.current), Some(100.0));
        assert_eq!(world.get::<Armor>(police).map(|a| a.value), Some(50.0));
        assert_eq!(world.get::<MovementSpeed>(police).map(|s| s.speed), Some(400.0));
        assert_eq!(world.get::<AiBrain>(police).map(|b| b.state), Some(AiState::Wander));
        assert_eq!(world.get::<AiTarget>(police), Some(&AiTarget(None)));
        assert_eq!(
            world.get::<Combatant>(police).map(|c| c.kind),
            Some(CombatantKind::Enemy(Archetype::Police))
        );
    }

    #[test]
    fn test_swat_loadout_is_seeded() {
        let pick = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..8)
                .map(|_| default_loadout(Archetype::Swat, &mut rng).name().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(pick(7), pick(7));
        let names = pick(7);
        assert!(names.iter().all(|n| n == "AK-47" || n == "Shotgun"));
    }

    #[test]
    fn test_fixed_loadouts() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(default_loadout(Archetype::Junkie, &mut rng).name(), "Needle");
        assert_eq!(default_loadout(Archetype::Police, &mut rng).name(), "Glock");
    }
}
