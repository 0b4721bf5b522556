//! Static archetype tables: characters, enemies, weapons, upgrades,
//! powerups and the wave schedule.
//!
//! Pure build-time data with no runtime mutation. Lookups that miss are a
//! logic error: fatal in development builds, substituted with a safe
//! fallback archetype in release builds (see the non-`try_` accessors).

use strum_macros::{Display, EnumIter};

use crate::error::{ConfigError, GameResult};

/// Identifier for a playable character archetype.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterId {
    Bill,
    Vex,
    Brom,
}

/// Identifier for an enemy archetype.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyId {
    Grunt,
    Darter,
    Bulwark,
    Spitter,
    Behemoth,
}

/// Identifier for a weapon archetype.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponId {
    Bolt,
    Scatter,
    Orbit,
}

/// Identifier for an in-run upgrade.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeId {
    Swiftness,
    Might,
    Frenzy,
    DeadEye,
    Vigor,
    Mending,
    Plating,
    SplitShot,
}

/// Identifier for a persistent (meta-progression) powerup.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupId {
    Might,
    Gemstone,
    Vitality,
    Precision,
    Regrowth,
    Haste,
    Reach,
    Lingering,
    Insight,
}

/// Base stat block shared by character archetypes.
///
/// `power` is a flat damage multiplier applied to weapon base damage;
/// `evasion` and `critical` are percentages in `[0, 100)`; `speed` is in
/// world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub health: f32,
    pub recovery: f32,
    pub evasion: f32,
    pub armor: f32,
    pub power: f32,
    pub critical: f32,
    pub speed: f32,
    pub projectiles: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterArchetype {
    pub id: CharacterId,
    pub name: &'static str,
    pub base_stats: BaseStats,
    pub starting_weapon: WeaponId,
    /// Opaque predicate evaluated by the outer layer; `None` = always unlocked.
    pub unlock_condition: Option<&'static str>,
}

/// Parameters for enemies that prefer to attack from a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedAttack {
    pub range: f32,
    pub interval_seconds: f32,
}

/// Scripted behaviors an archetype can carry beyond chasing the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialBehavior {
    /// Periodically calls reduced-stat minions while alive.
    Summon,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    pub id: EnemyId,
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub score: u32,
    pub scale: f32,
    pub tint: u32,
    pub ranged: Option<RangedAttack>,
    pub special: Option<SpecialBehavior>,
}

/// Projectiles that circle the player instead of flying outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub count: u32,
    /// Angular speed in radians per second.
    pub angular_speed: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct WeaponArchetype {
    pub id: WeaponId,
    /// Multiplied by the wielder's power to produce projectile damage.
    pub damage: f32,
    /// Seconds between volleys, before attack-speed modifiers.
    pub fire_interval: f32,
    pub range: f32,
    pub projectile_speed: f32,
    pub projectile_count: u32,
    /// Half-arc in radians over which extra projectiles fan out.
    pub spread: f32,
    pub orbit: Option<OrbitParams>,
    pub unlock_condition: Option<&'static str>,
}

/// The stat a single upgrade level changes, and by how much.
///
/// Percent variants apply multiplicatively to the current value; point
/// variants are additive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatEffect {
    MoveSpeedPercent(f32),
    PowerPercent(f32),
    AttackSpeedPercent(f32),
    CritChance(f32),
    MaxHealth(f32),
    Recovery(f32),
    Armor(f32),
    Evasion(f32),
    Projectiles(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct UpgradeDefinition {
    pub id: UpgradeId,
    pub name: &'static str,
    /// 1 = one-time pickup, >1 = stackable.
    pub max_level: u32,
    pub effect: StatEffect,
}

/// The run-start modifier a powerup level grants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerupEffect {
    DamagePercent(f32),
    CoinPercent(f32),
    Health(f32),
    CritChance(f32),
    Recovery(f32),
    AttackSpeedPercent(f32),
    AreaPercent(f32),
    DurationPercent(f32),
    XpPercent(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct PowerupDefinition {
    pub id: PowerupId,
    pub name: &'static str,
    pub max_level: u32,
    pub base_cost: u32,
    pub cost_growth: f32,
    pub effect: PowerupEffect,
}

impl PowerupDefinition {
    /// Coin cost of the next level given the current one.
    pub fn cost_at(&self, current_level: u32) -> u32 {
        (self.base_cost as f32 * self.cost_growth.powi(current_level as i32)).floor() as u32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WaveScheduleEntry {
    pub total_enemies: u32,
    /// Seconds between regular spawns.
    pub spawn_interval: f32,
    pub eligible: &'static [EnemyId],
    pub boss: Option<EnemyId>,
    /// Seconds the wave lasts before completing.
    pub duration: f32,
}

pub static CHARACTERS: &[CharacterArchetype] = &[
    CharacterArchetype {
        id: CharacterId::Bill,
        name: "Bill",
        base_stats: BaseStats {
            health: 100.0,
            recovery: 0.3,
            evasion: 5.0,
            armor: 0.0,
            power: 10.0,
            critical: 5.0,
            speed: 200.0,
            projectiles: 1,
        },
        starting_weapon: WeaponId::Bolt,
        unlock_condition: None,
    },
    CharacterArchetype {
        id: CharacterId::Vex,
        name: "Vex",
        base_stats: BaseStats {
            health: 80.0,
            recovery: 0.1,
            evasion: 15.0,
            armor: 0.0,
            power: 9.0,
            critical: 12.0,
            speed: 240.0,
            projectiles: 1,
        },
        starting_weapon: WeaponId::Scatter,
        unlock_condition: Some("Reach wave 5"),
    },
    CharacterArchetype {
        id: CharacterId::Brom,
        name: "Brom",
        base_stats: BaseStats {
            health: 150.0,
            recovery: 0.5,
            evasion: 0.0,
            armor: 10.0,
            power: 11.0,
            critical: 2.0,
            speed: 160.0,
            projectiles: 1,
        },
        starting_weapon: WeaponId::Orbit,
        unlock_condition: Some("Defeat the Behemoth"),
    },
];

pub static ENEMIES: &[EnemyArchetype] = &[
    EnemyArchetype {
        id: EnemyId::Grunt,
        health: 50.0,
        speed: 100.0,
        damage: 10.0,
        score: 10,
        scale: 1.0,
        tint: 0xffffff,
        ranged: None,
        special: None,
    },
    EnemyArchetype {
        id: EnemyId::Darter,
        health: 30.0,
        speed: 180.0,
        damage: 8.0,
        score: 15,
        scale: 0.8,
        tint: 0x00ff00,
        ranged: None,
        special: None,
    },
    EnemyArchetype {
        id: EnemyId::Bulwark,
        health: 120.0,
        speed: 60.0,
        damage: 15.0,
        score: 20,
        scale: 1.3,
        tint: 0xff0000,
        ranged: None,
        special: None,
    },
    EnemyArchetype {
        id: EnemyId::Spitter,
        health: 40.0,
        speed: 80.0,
        damage: 12.0,
        score: 25,
        scale: 1.0,
        tint: 0x0000ff,
        ranged: Some(RangedAttack {
            range: 200.0,
            interval_seconds: 2.0,
        }),
        special: None,
    },
    EnemyArchetype {
        id: EnemyId::Behemoth,
        health: 500.0,
        speed: 70.0,
        damage: 25.0,
        score: 250,
        scale: 2.0,
        tint: 0x9900ff,
        ranged: None,
        special: Some(SpecialBehavior::Summon),
    },
];

pub static WEAPONS: &[WeaponArchetype] = &[
    WeaponArchetype {
        id: WeaponId::Bolt,
        damage: 10.0,
        fire_interval: 0.5,
        range: 300.0,
        projectile_speed: 400.0,
        projectile_count: 1,
        spread: 0.0,
        orbit: None,
        unlock_condition: None,
    },
    WeaponArchetype {
        id: WeaponId::Scatter,
        damage: 8.0,
        fire_interval: 1.2,
        range: 250.0,
        projectile_speed: 450.0,
        projectile_count: 5,
        spread: 0.3,
        orbit: None,
        unlock_condition: Some("Reach wave 3"),
    },
    WeaponArchetype {
        id: WeaponId::Orbit,
        damage: 15.0,
        fire_interval: 3.0,
        range: 150.0,
        projectile_speed: 0.0,
        projectile_count: 8,
        spread: 0.0,
        orbit: Some(OrbitParams {
            count: 8,
            angular_speed: 3.0,
            radius: 100.0,
        }),
        unlock_condition: Some("Collect 500 coins"),
    },
];

pub static UPGRADES: &[UpgradeDefinition] = &[
    UpgradeDefinition {
        id: UpgradeId::Swiftness,
        name: "Movement Speed",
        max_level: 5,
        effect: StatEffect::MoveSpeedPercent(10.0),
    },
    UpgradeDefinition {
        id: UpgradeId::Might,
        name: "Damage",
        max_level: 5,
        effect: StatEffect::PowerPercent(20.0),
    },
    UpgradeDefinition {
        id: UpgradeId::Frenzy,
        name: "Attack Speed",
        max_level: 5,
        effect: StatEffect::AttackSpeedPercent(10.0),
    },
    UpgradeDefinition {
        id: UpgradeId::DeadEye,
        name: "Critical Hit",
        max_level: 5,
        effect: StatEffect::CritChance(2.0),
    },
    UpgradeDefinition {
        id: UpgradeId::Vigor,
        name: "Max Health",
        max_level: 5,
        effect: StatEffect::MaxHealth(20.0),
    },
    UpgradeDefinition {
        id: UpgradeId::Mending,
        name: "Recovery",
        max_level: 3,
        effect: StatEffect::Recovery(0.5),
    },
    UpgradeDefinition {
        id: UpgradeId::Plating,
        name: "Armour",
        max_level: 3,
        effect: StatEffect::Armor(3.0),
    },
    UpgradeDefinition {
        id: UpgradeId::SplitShot,
        name: "Split Shot",
        max_level: 1,
        effect: StatEffect::Projectiles(1),
    },
];

pub static POWERUPS: &[PowerupDefinition] = &[
    PowerupDefinition {
        id: PowerupId::Might,
        name: "Might",
        max_level: 5,
        base_cost: 100,
        cost_growth: 1.5,
        effect: PowerupEffect::DamagePercent(5.0),
    },
    PowerupDefinition {
        id: PowerupId::Gemstone,
        name: "Gemstone",
        max_level: 5,
        base_cost: 50,
        cost_growth: 1.5,
        effect: PowerupEffect::CoinPercent(10.0),
    },
    PowerupDefinition {
        id: PowerupId::Vitality,
        name: "Vitality",
        max_level: 5,
        base_cost: 80,
        cost_growth: 1.5,
        effect: PowerupEffect::Health(10.0),
    },
    PowerupDefinition {
        id: PowerupId::Precision,
        name: "Precision",
        max_level: 5,
        base_cost: 120,
        cost_growth: 1.5,
        effect: PowerupEffect::CritChance(1.0),
    },
    PowerupDefinition {
        id: PowerupId::Regrowth,
        name: "Regrowth",
        max_level: 5,
        base_cost: 90,
        cost_growth: 1.5,
        effect: PowerupEffect::Recovery(0.2),
    },
    PowerupDefinition {
        id: PowerupId::Haste,
        name: "Haste",
        max_level: 5,
        base_cost: 110,
        cost_growth: 1.5,
        effect: PowerupEffect::AttackSpeedPercent(5.0),
    },
    PowerupDefinition {
        id: PowerupId::Reach,
        name: "Reach",
        max_level: 5,
        base_cost: 70,
        cost_growth: 1.5,
        effect: PowerupEffect::AreaPercent(5.0),
    },
    PowerupDefinition {
        id: PowerupId::Lingering,
        name: "Lingering",
        max_level: 5,
        base_cost: 70,
        cost_growth: 1.5,
        effect: PowerupEffect::DurationPercent(5.0),
    },
    PowerupDefinition {
        id: PowerupId::Insight,
        name: "Insight",
        max_level: 5,
        base_cost: 100,
        cost_growth: 1.5,
        effect: PowerupEffect::XpPercent(5.0),
    },
];

pub static WAVE_SCHEDULE: &[WaveScheduleEntry] = &[
    WaveScheduleEntry {
        total_enemies: 20,
        spawn_interval: 2.0,
        eligible: &[EnemyId::Grunt],
        boss: None,
        duration: 60.0,
    },
    WaveScheduleEntry {
        total_enemies: 25,
        spawn_interval: 1.8,
        eligible: &[EnemyId::Grunt, EnemyId::Darter],
        boss: None,
        duration: 60.0,
    },
    WaveScheduleEntry {
        total_enemies: 30,
        spawn_interval: 1.6,
        eligible: &[EnemyId::Grunt, EnemyId::Darter, EnemyId::Bulwark],
        boss: None,
        duration: 60.0,
    },
    WaveScheduleEntry {
        total_enemies: 35,
        spawn_interval: 1.4,
        eligible: &[EnemyId::Grunt, EnemyId::Darter, EnemyId::Bulwark, EnemyId::Spitter],
        boss: None,
        duration: 60.0,
    },
    WaveScheduleEntry {
        total_enemies: 25,
        spawn_interval: 2.0,
        eligible: &[EnemyId::Grunt, EnemyId::Darter, EnemyId::Bulwark, EnemyId::Spitter],
        boss: Some(EnemyId::Behemoth),
        duration: 60.0,
    },
];

macro_rules! table_accessors {
    ($strict:ident, $lenient:ident, $table:ident, $archetype:ty, $id:ty, $missing:ident) => {
        /// Strict lookup; callers that can propagate errors should prefer this.
        pub fn $strict(id: $id) -> GameResult<&'static $archetype> {
            $table
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| ConfigError::$missing(id).into())
        }

        /// Lenient lookup: substitutes the first table entry on a miss.
        pub fn $lenient(id: $id) -> &'static $archetype {
            match $table.iter().find(|a| a.id == id) {
                Some(archetype) => archetype,
                None => {
                    debug_assert!(false, "archetype table miss: {id}");
                    tracing::warn!(%id, "archetype not found, substituting fallback");
                    &$table[0]
                }
            }
        }
    };
}

table_accessors!(try_character, character, CHARACTERS, CharacterArchetype, CharacterId, CharacterNotFound);
table_accessors!(try_enemy, enemy, ENEMIES, EnemyArchetype, EnemyId, EnemyNotFound);
table_accessors!(try_weapon, weapon, WEAPONS, WeaponArchetype, WeaponId, WeaponNotFound);
table_accessors!(try_upgrade, upgrade, UPGRADES, UpgradeDefinition, UpgradeId, UpgradeNotFound);
table_accessors!(try_powerup, powerup, POWERUPS, PowerupDefinition, PowerupId, PowerupNotFound);

/// The schedule entry for a 1-based wave number.
///
/// Waves past the end of the schedule repeat the final entry.
pub fn wave_entry(wave_number: u32) -> &'static WaveScheduleEntry {
    let index = (wave_number.max(1) as usize - 1).min(WAVE_SCHEDULE.len() - 1);
    &WAVE_SCHEDULE[index]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_character_id_has_an_entry() {
        for id in CharacterId::iter() {
            assert!(try_character(id).is_ok(), "missing character {id}");
        }
    }

    #[test]
    fn test_every_enemy_id_has_an_entry() {
        for id in EnemyId::iter() {
            assert!(try_enemy(id).is_ok(), "missing enemy {id}");
        }
    }

    #[test]
    fn test_every_weapon_id_has_an_entry() {
        for id in WeaponId::iter() {
            assert!(try_weapon(id).is_ok(), "missing weapon {id}");
        }
    }

    #[test]
    fn test_every_upgrade_id_has_an_entry() {
        for id in UpgradeId::iter() {
            assert!(try_upgrade(id).is_ok(), "missing upgrade {id}");
        }
    }

    #[test]
    fn test_every_powerup_id_has_an_entry() {
        for id in PowerupId::iter() {
            assert!(try_powerup(id).is_ok(), "missing powerup {id}");
        }
    }

    #[test]
    fn test_wave_schedule_shape() {
        assert_eq!(WAVE_SCHEDULE.len(), 5);
        assert_eq!(WAVE_SCHEDULE[0].total_enemies, 20);
        assert_eq!(WAVE_SCHEDULE[0].spawn_interval, 2.0);
        assert_eq!(WAVE_SCHEDULE[0].duration, 60.0);
        assert!(WAVE_SCHEDULE[4].boss.is_some());
    }

    #[test]
    fn test_wave_entry_clamps_to_last() {
        assert_eq!(wave_entry(5).total_enemies, wave_entry(99).total_enemies);
        // Wave 0 is not a real wave; treat it as wave 1 rather than panic.
        assert_eq!(wave_entry(0).total_enemies, wave_entry(1).total_enemies);
    }

    #[test]
    fn test_eligible_sets_grow_with_waves() {
        for pair in WAVE_SCHEDULE.windows(2) {
            assert!(pair[0].eligible.len() <= pair[1].eligible.len());
        }
    }

    #[test]
    fn test_boss_carries_summon_behavior() {
        let boss = enemy(EnemyId::Behemoth);
        assert_eq!(boss.special, Some(SpecialBehavior::Summon));
    }

    #[test]
    fn test_powerup_cost_curve() {
        let gemstone = powerup(PowerupId::Gemstone);
        assert_eq!(gemstone.cost_at(0), 50);
        assert_eq!(gemstone.cost_at(1), 75);
        assert_eq!(gemstone.cost_at(2), 112);
    }

    #[test]
    fn test_one_time_upgrades_have_max_level_one() {
        let split = upgrade(UpgradeId::SplitShot);
        assert_eq!(split.max_level, 1);
        assert_eq!(split.effect, StatEffect::Projectiles(1));
    }
}
