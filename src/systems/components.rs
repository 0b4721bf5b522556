//! Resources and pooled record types shared by the simulation systems.

use bevy_ecs::resource::Resource;
use glam::Vec2;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::config::{BaseStats, CharacterArchetype, CharacterId, EnemyId, RangedAttack, UpgradeId, WeaponId};
use crate::constants::{self, pools};
use crate::pool::Pool;
use crate::store::PowerupModifiers;
use crate::systems::progress::UpgradeChoice;

/// Frame delta handed to the schedule each tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    pub seconds: f32,
    pub ticks: u32,
}

/// Session-owned RNG; seedable so tests can replay combat rolls.
#[derive(Resource)]
pub struct SessionRng(pub SmallRng);

/// Raw movement input from the host, one axis each in `[-1, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputDirection(pub Vec2);

/// Camera viewport; follows the player and defines the spawn edges.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub center: Vec2,
}

/// Whether the session should be torn down by the host.
#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

/// External pause toggle. Pausing freezes every gameplay timer because the
/// gameplay sets simply do not run; resuming never replays elapsed time.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }

    /// Idempotent: pausing an already-paused session changes nothing.
    pub fn set(&mut self, paused: bool) {
        *self = if paused { PauseState::Active } else { PauseState::Inactive };
    }
}

/// The run's temporal structure, owned by the wave state machine.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum WavePhase {
    /// Normal combat; the wave timer is running.
    #[default]
    Spawning,
    /// The wave ended this tick; transitions on immediately.
    Completed,
    /// Simulation paused awaiting an external upgrade choice.
    AwaitingUpgrade,
    /// Terminal. The run summary has been published.
    GameOver,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct WaveState {
    /// 1-based wave number; monotonically non-decreasing within a run.
    pub number: u32,
    /// Seconds elapsed in the current wave.
    pub timer: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self { number: 1, timer: 0.0 }
    }
}

/// Per-wave bookkeeping owned by the spawn director; reset on each wave.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnState {
    /// Seconds since the last regular spawn.
    pub spawn_timer: f32,
    pub spawned: u32,
    pub killed: u32,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
}

impl SpawnState {
    pub fn reset_for_wave(&mut self) {
        *self = SpawnState::default();
    }
}

/// Score, kills and coin totals for the run in progress.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Progress {
    pub score: u32,
    pub kills: u32,
    pub coins_collected: u32,
    pub elapsed_seconds: f32,
}

/// The upgrade choices surfaced at the active checkpoint, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct UpgradeOffer(pub Option<SmallVec<[UpgradeChoice; 3]>>);

/// The player's mutable run state. Exactly one per run, owned by the
/// session; created from a character archetype plus powerup modifiers.
#[derive(Resource, Debug, Clone)]
pub struct PlayerState {
    pub character: CharacterId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Vec2,

    pub health: f32,
    pub max_health: f32,
    pub recovery: f32,
    pub evasion: f32,
    pub armor: f32,
    pub power: f32,
    pub crit_chance: f32,
    pub speed: f32,
    pub projectile_count: u32,
    pub attack_speed: f32,
    pub area_mult: f32,
    pub duration_mult: f32,
    pub xp_mult: f32,

    pub level: u32,
    pub experience: f32,
    pub experience_to_next: f32,

    pub weapons: SmallVec<[WeaponId; 4]>,
    /// Acquired upgrade ids in pick order; duplicates up to max level.
    pub upgrades: Vec<UpgradeId>,

    pub invincibility_remaining: f32,
    pub fire_cooldown: f32,
    /// Impulse applied for exactly one physics step after a hit.
    pub knockback: Option<Vec2>,
    /// Render alpha; pulses while invincible.
    pub alpha: f32,
}

impl PlayerState {
    /// Builds run-start state from a character archetype and the modifiers
    /// earned through persisted powerups.
    pub fn from_archetype(archetype: &CharacterArchetype, modifiers: &PowerupModifiers) -> Self {
        let BaseStats {
            health,
            recovery,
            evasion,
            armor,
            power,
            critical,
            speed,
            projectiles,
        } = archetype.base_stats;

        let max_health = health + modifiers.bonus_health;
        Self {
            character: archetype.id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            facing: constants::INITIAL_FACING,
            health: max_health,
            max_health,
            recovery: recovery + modifiers.bonus_recovery,
            evasion,
            armor,
            power: power * modifiers.damage_mult,
            crit_chance: critical + modifiers.bonus_crit,
            speed,
            projectile_count: projectiles,
            attack_speed: modifiers.attack_speed_mult,
            area_mult: modifiers.area_mult,
            duration_mult: modifiers.duration_mult,
            xp_mult: modifiers.xp_mult,
            level: 1,
            experience: 0.0,
            experience_to_next: constants::progression::FIRST_LEVEL_THRESHOLD,
            weapons: SmallVec::from_slice(&[archetype.starting_weapon]),
            upgrades: Vec::new(),
            invincibility_remaining: 0.0,
            fire_cooldown: 0.0,
            knockback: None,
            alpha: 1.0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_remaining > 0.0
    }

    pub fn primary_weapon(&self) -> WeaponId {
        self.weapons[0]
    }
}

/// A pooled enemy record. Stats are stamped at spawn (difficulty scaling
/// and drop values included) so death resolution reads no globals.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub archetype: EnemyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub score: u32,
    pub experience: u32,
    /// Coin dropped on death; `None` = no drop.
    pub coin_value: Option<u32>,
    pub boss: bool,
    /// Carries the summon behavior tag from its archetype.
    pub summoner: bool,
    pub ranged: Option<RangedAttack>,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            archetype: EnemyId::Grunt,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            health: 0.0,
            max_health: 0.0,
            damage: 0.0,
            speed: 0.0,
            score: 0,
            experience: 0,
            coin_value: None,
            boss: false,
            summoner: false,
            ranged: None,
        }
    }
}

/// How a pooled projectile moves.
#[derive(Debug, Clone, Copy)]
pub enum ProjectileMotion {
    Linear { velocity: Vec2 },
    /// Circles the player; expires on a lifetime instead of a range.
    Orbit {
        angular_speed: f32,
        radius: f32,
        phase: f32,
        remaining: f32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub weapon: WeaponId,
    pub position: Vec2,
    pub origin: Vec2,
    pub motion: ProjectileMotion,
    pub damage: f32,
    pub critical: bool,
    pub range: f32,
    pub hit_radius: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            weapon: WeaponId::Bolt,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            motion: ProjectileMotion::Linear { velocity: Vec2::ZERO },
            damage: 0.0,
            critical: false,
            range: 0.0,
            hit_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupKind {
    #[default]
    Coin,
    ExperienceGem,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec2,
    pub value: u32,
}

#[derive(Resource)]
pub struct Enemies(pub Pool<Enemy>);

#[derive(Resource)]
pub struct Projectiles(pub Pool<Projectile>);

#[derive(Resource)]
pub struct Coins(pub Pool<Pickup>);

#[derive(Resource)]
pub struct Gems(pub Pool<Pickup>);

impl Default for Enemies {
    fn default() -> Self {
        Self(Pool::new(pools::MAX_ENEMIES))
    }
}

impl Default for Projectiles {
    fn default() -> Self {
        Self(Pool::new(pools::MAX_PROJECTILES))
    }
}

impl Default for Coins {
    fn default() -> Self {
        Self(Pool::new(pools::MAX_COINS))
    }
}

impl Default for Gems {
    fn default() -> Self {
        Self(Pool::new(pools::MAX_GEMS))
    }
}
