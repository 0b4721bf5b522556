//! This module contains all the numeric policy used by the simulation.

use std::time::Duration;

use glam::Vec2;

/// Fixed simulation step at 60 ticks per second.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Seconds advanced per fixed tick.
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

/// The camera viewport, in world units. The camera is centered on the player.
pub mod viewport {
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(800.0, 600.0);
    /// Extra margin outside the viewport edges where enemies appear.
    pub const SPAWN_PADDING: f32 = 50.0;
}

/// Fixed pool capacities. Spawn requests beyond capacity are dropped.
pub mod pools {
    pub const MAX_ENEMIES: usize = 100;
    pub const MAX_PROJECTILES: usize = 100;
    pub const MAX_COINS: usize = 64;
    pub const MAX_GEMS: usize = 128;
}

pub mod combat {
    /// Invincibility window granted after a damaging hit, in seconds.
    pub const INVINCIBILITY_SECONDS: f32 = 0.5;
    /// Knockback speed applied to the player along the enemy->player angle.
    pub const KNOCKBACK_SPEED: f32 = 300.0;
    /// Armor can reduce contact damage to this floor, never below it.
    pub const MIN_CONTACT_DAMAGE: f32 = 1.0;
    /// Critical hits multiply projectile damage by this factor.
    pub const CRIT_MULTIPLIER: f32 = 2.0;
    /// Radius within which the player scoops up coins and gems.
    pub const PICKUP_RADIUS: f32 = 24.0;
    /// Collision radius of the player body.
    pub const PLAYER_RADIUS: f32 = 14.0;
    /// Collision radius of a regular enemy body.
    pub const ENEMY_RADIUS: f32 = 14.0;
    /// Base collision radius of a projectile, before area modifiers.
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    /// Lifetime of an orbiting projectile, in seconds, before duration modifiers.
    pub const ORBIT_LIFETIME_SECONDS: f32 = 3.0;
}

pub mod spawning {
    /// Per-wave stat multiplier: `1 + STEP * (wave - 1)`.
    pub const DIFFICULTY_STEP: f32 = 0.2;
    /// Experience carried by an enemy: `XP_BASE + XP_PER_WAVE * wave`.
    pub const XP_BASE: u32 = 5;
    pub const XP_PER_WAVE: u32 = 2;
    /// Chance that a slain enemy drops a coin.
    pub const COIN_DROP_CHANCE: f64 = 0.2;
    /// Coin value for regular enemies and bosses.
    pub const COIN_VALUE: u32 = 1;
    pub const BOSS_COIN_VALUE: u32 = 5;
    /// The boss appears once kills reach this fraction of the wave quota.
    pub const BOSS_KILL_FRACTION: f32 = 0.75;
    /// Distance from the player at which a boss materializes.
    pub const BOSS_RING_RADIUS: f32 = 420.0;
    /// Per-tick chance that a live summoner calls minions.
    pub const MINION_SUMMON_CHANCE: f64 = 0.01;
    /// Minions per summon and their placement radius around the summoner.
    pub const MINIONS_PER_SUMMON: u32 = 3;
    pub const MINION_SCATTER_RADIUS: f32 = 60.0;
    /// Minions keep this fraction of the base archetype's health/damage/score.
    pub const MINION_STAT_FRACTION: f32 = 0.5;
    /// Minions move this much faster than the base archetype.
    pub const MINION_SPEED_FACTOR: f32 = 1.5;
    /// Non-boss enemies this far from the player are returned to the pool.
    pub const DESPAWN_RANGE: f32 = 1200.0;
}

pub mod progression {
    /// Experience required to reach level 2.
    pub const FIRST_LEVEL_THRESHOLD: f32 = 100.0;
    /// The threshold grows by this ratio on every level-up.
    pub const THRESHOLD_GROWTH: f32 = 1.2;
    /// Upgrade choices surfaced per checkpoint.
    pub const OFFER_SIZE: usize = 3;
    /// Power granted by the fallback boost when no upgrades remain.
    pub const GENERIC_BOOST_POWER: f32 = 1.0;
    /// Coin multiplier per gemstone powerup level: `1 + STEP * level`.
    pub const GEMSTONE_STEP: f32 = 0.1;
    /// High-score entries retained by the meta store.
    pub const HIGH_SCORE_CAP: usize = 10;
}

/// Initial facing for a freshly spawned player, pointing right.
pub const INITIAL_FACING: Vec2 = Vec2::new(1.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
        assert!((TICK_SECONDS - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invincibility_window() {
        assert_eq!(combat::INVINCIBILITY_SECONDS, 0.5);
    }

    #[test]
    fn test_difficulty_curve_anchors() {
        // Wave 1 is unscaled, wave 5 is +80%.
        assert_eq!(1.0 + spawning::DIFFICULTY_STEP * 0.0, 1.0);
        assert_eq!(1.0 + spawning::DIFFICULTY_STEP * 4.0, 1.8);
    }

    #[test]
    fn test_pool_capacities_nonzero() {
        assert!(pools::MAX_ENEMIES > 0);
        assert!(pools::MAX_PROJECTILES > 0);
        assert!(pools::MAX_COINS > 0);
        assert!(pools::MAX_GEMS > 0);
    }

    #[test]
    fn test_threshold_growth() {
        let next = progression::FIRST_LEVEL_THRESHOLD * progression::THRESHOLD_GROWTH;
        assert_eq!(next, 120.0);
    }

    #[test]
    fn test_minion_fractions() {
        assert!(spawning::MINION_STAT_FRACTION < 1.0);
        assert!(spawning::MINION_SPEED_FACTOR > 1.0);
    }
}
