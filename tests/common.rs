#![allow(dead_code)]

use bevy_ecs::event::Events;
use bevy_ecs::world::World;
use glam::Vec2;
use nightswarm::config::{CharacterId, EnemyId};
use nightswarm::events::GameEvent;
use nightswarm::pool::SlotId;
use nightswarm::store::{MetaStore, PowerupModifiers};
use nightswarm::systems::{
    Coins, DeltaTime, Enemies, Enemy, Gems, GlobalState, InputDirection, PauseState, Pickup, PickupKind, PlayerState,
    Progress, Projectile, ProjectileMotion, Projectiles, SessionRng, SpawnState, UpgradeOffer, Viewport, WavePhase,
    WaveState,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Creates a world carrying every resource the simulation systems expect,
/// with a deterministic RNG and a default player.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(MetaStore::default());
    world.insert_resource(test_player());
    world.insert_resource(SessionRng(SmallRng::seed_from_u64(0x5eed)));
    world.insert_resource(DeltaTime {
        seconds: 1.0 / 60.0,
        ticks: 1,
    });
    world.insert_resource(InputDirection::default());
    world.insert_resource(Viewport::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(WavePhase::default());
    world.insert_resource(WaveState::default());
    world.insert_resource(SpawnState::default());
    world.insert_resource(Progress::default());
    world.insert_resource(UpgradeOffer::default());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(Enemies::default());
    world.insert_resource(Projectiles::default());
    world.insert_resource(Coins::default());
    world.insert_resource(Gems::default());

    world
}

/// A default player built the same way a run start builds one.
pub fn test_player() -> PlayerState {
    PlayerState::from_archetype(
        nightswarm::config::character(CharacterId::Bill),
        &PowerupModifiers::default(),
    )
}

/// Spawns an enemy record directly into the pool.
pub fn spawn_test_enemy(world: &mut World, enemy: Enemy) -> SlotId {
    world
        .resource_mut::<Enemies>()
        .0
        .acquire(enemy)
        .expect("enemy pool full in test")
}

/// A plain contact enemy at `position` with the given damage.
pub fn contact_enemy(position: Vec2, damage: f32) -> Enemy {
    Enemy {
        archetype: EnemyId::Grunt,
        position,
        velocity: Vec2::ZERO,
        health: 50.0,
        max_health: 50.0,
        damage,
        speed: 100.0,
        score: 10,
        experience: 7,
        coin_value: None,
        boss: false,
        summoner: false,
        ranged: None,
    }
}

/// A stationary projectile at `position` carrying `damage`.
pub fn test_projectile(position: Vec2, damage: f32) -> Projectile {
    Projectile {
        weapon: nightswarm::config::WeaponId::Bolt,
        position,
        origin: position,
        motion: ProjectileMotion::Linear { velocity: Vec2::ZERO },
        damage,
        critical: false,
        range: 300.0,
        hit_radius: 6.0,
    }
}

/// A coin or gem lying at `position`.
pub fn test_pickup(kind: PickupKind, position: Vec2, value: u32) -> Pickup {
    Pickup { kind, position, value }
}

/// Drains and returns every notification event accumulated so far.
pub fn drain_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

/// Overwrites the frame delta used by time-driven systems.
pub fn set_delta(world: &mut World, seconds: f32) {
    world.insert_resource(DeltaTime { seconds, ticks: 1 });
}
