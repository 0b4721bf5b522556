//! The simulation systems and the resources they operate on.
//!
//! Gameplay is expressed as plain system functions scheduled by the run
//! session; shared state lives in resources, and transient entities live in
//! fixed-capacity pools rather than in ECS entities.

pub mod combat;
pub mod components;
pub mod movement;
pub mod player;
pub mod progress;
pub mod snapshot;
pub mod spawn;
pub mod wave;

pub use combat::{auto_fire_system, pickup_collect_system, player_hit_system, projectile_hit_system};
pub use components::{
    Coins, DeltaTime, Enemies, Enemy, GlobalState, Gems, InputDirection, PauseState, Pickup, PickupKind, PlayerState,
    Progress, Projectile, ProjectileMotion, Projectiles, SessionRng, SpawnState, UpgradeOffer, Viewport, WavePhase,
    WaveState,
};
pub use movement::{enemy_seek_system, player_movement_system, projectile_motion_system, projectile_range_system};
pub use player::{invincibility_system, player_facing_system, recovery_system};
pub use progress::{add_experience, apply_upgrade, generate_offer, upgrade_level, UpgradeChoice};
pub use snapshot::publish_system;
pub use spawn::spawn_director_system;
pub use wave::wave_phase_system;
