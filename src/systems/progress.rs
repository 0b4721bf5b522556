//! Progression: experience, level-ups, and upgrade selection.
//!
//! Score and kill accounting happens inline with enemy death in the combat
//! resolver; this module owns the leveling math and the table-driven
//! upgrade machinery shared by the checkpoint flow.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::config::{self, StatEffect, UpgradeId, UPGRADES};
use crate::constants::progression::{GENERIC_BOOST_POWER, OFFER_SIZE, THRESHOLD_GROWTH};
use crate::systems::components::PlayerState;

/// One entry of an upgrade-selection checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeChoice {
    Upgrade(UpgradeId),
    /// Fallback when every upgrade is maxed: a small flat power boost.
    GenericBoost,
}

/// Times `id` appears in the player's acquired list.
pub fn upgrade_level(player: &PlayerState, id: UpgradeId) -> u32 {
    player.upgrades.iter().filter(|picked| **picked == id).count() as u32
}

/// Adds experience, carrying any remainder across level-ups.
///
/// Returns the number of levels gained. Each crossing grows the next
/// threshold by the fixed ratio; excess experience is never discarded.
pub fn add_experience(player: &mut PlayerState, amount: f32) -> u32 {
    let mut levels = 0;
    player.experience += amount;
    while player.experience >= player.experience_to_next {
        player.experience -= player.experience_to_next;
        player.experience_to_next *= THRESHOLD_GROWTH;
        player.level += 1;
        levels += 1;
    }
    if levels > 0 {
        debug!(
            level = player.level,
            experience = player.experience,
            next = player.experience_to_next,
            "Level up"
        );
    }
    levels
}

/// Builds an upgrade offer: eligible upgrades shuffled, up to three taken.
///
/// Upgrades already at max level are excluded (one-time pickups disappear
/// after a single take). When nothing is eligible the offer degrades to a
/// single generic boost rather than stalling the checkpoint.
pub fn generate_offer(player: &PlayerState, rng: &mut SmallRng) -> SmallVec<[UpgradeChoice; 3]> {
    let mut eligible: Vec<UpgradeId> = UPGRADES
        .iter()
        .filter(|definition| upgrade_level(player, definition.id) < definition.max_level)
        .map(|definition| definition.id)
        .collect();

    if eligible.is_empty() {
        warn!("No upgrades available, offering generic boost");
        return SmallVec::from_slice(&[UpgradeChoice::GenericBoost]);
    }

    eligible.shuffle(rng);
    eligible
        .into_iter()
        .take(OFFER_SIZE)
        .map(UpgradeChoice::Upgrade)
        .collect()
}

/// Applies a chosen upgrade to the player's stats.
///
/// The stat-delta mapping is table-driven; a pick past the archetype's max
/// level is rejected as a no-op. Returns whether the choice took effect.
pub fn apply_upgrade(player: &mut PlayerState, choice: UpgradeChoice) -> bool {
    let id = match choice {
        UpgradeChoice::GenericBoost => {
            player.power += GENERIC_BOOST_POWER;
            return true;
        }
        UpgradeChoice::Upgrade(id) => id,
    };

    let definition = config::upgrade(id);
    if upgrade_level(player, id) >= definition.max_level {
        warn!(upgrade = %id, "Upgrade already at max level, selection ignored");
        return false;
    }

    match definition.effect {
        StatEffect::MoveSpeedPercent(percent) => player.speed *= 1.0 + percent / 100.0,
        StatEffect::PowerPercent(percent) => player.power *= 1.0 + percent / 100.0,
        StatEffect::AttackSpeedPercent(percent) => player.attack_speed += percent / 100.0,
        StatEffect::CritChance(points) => player.crit_chance += points,
        StatEffect::MaxHealth(points) => {
            player.max_health += points;
            player.health += points;
        }
        StatEffect::Recovery(points) => player.recovery += points,
        StatEffect::Armor(points) => player.armor += points,
        StatEffect::Evasion(points) => player.evasion += points,
        StatEffect::Projectiles(count) => player.projectile_count += count,
    }

    player.upgrades.push(id);
    debug!(upgrade = %id, level = upgrade_level(player, id), "Upgrade applied");
    true
}
