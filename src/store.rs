//! The meta-progression store boundary.
//!
//! One instance survives across runs: the simulation reads starting data
//! from it at run start and writes run results back at checkpoints. It is
//! a write-mostly sink; the persistence format itself (key-value snapshot)
//! is an external concern.

use bevy_ecs::resource::Resource;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::config::{self, CharacterId, PowerupEffect, PowerupId, WeaponId};
use crate::constants::progression::{GEMSTONE_STEP, HIGH_SCORE_CAP};
use crate::error::{GameResult, StoreError};

/// Settings flags owned by the options screen; the simulation reads them
/// fresh every tick rather than caching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub auto_attack: bool,
    pub auto_face_closest_enemy: bool,
    pub show_damage_numbers: bool,
    pub sound_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_attack: true,
            auto_face_closest_enemy: true,
            show_damage_numbers: true,
            sound_volume: 0.7,
        }
    }
}

/// One finished run, appended to the high-score list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub character: CharacterId,
    pub score: u32,
    pub wave: u32,
    pub kills: u32,
    pub elapsed_seconds: f32,
    pub coins_collected: u32,
}

/// Per-tick HUD snapshot of the run in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSnapshot {
    pub score: u32,
    pub wave: u32,
    pub health: f32,
    pub max_health: f32,
    pub kills: u32,
    pub level: u32,
    pub experience: f32,
    pub experience_to_next: f32,
    pub coins: u32,
    pub wave_time_remaining: f32,
    pub elapsed_seconds: f32,
    pub weapons: SmallVec<[WeaponId; 4]>,
    /// Render alpha for the player sprite; pulses during invincibility.
    pub player_alpha: f32,
}

/// Multipliers and bonuses derived from purchased powerup levels, applied
/// once when the player run state is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerupModifiers {
    pub damage_mult: f32,
    pub coin_mult: f32,
    pub bonus_health: f32,
    pub bonus_crit: f32,
    pub bonus_recovery: f32,
    pub attack_speed_mult: f32,
    pub area_mult: f32,
    pub duration_mult: f32,
    pub xp_mult: f32,
}

impl Default for PowerupModifiers {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            coin_mult: 1.0,
            bonus_health: 0.0,
            bonus_crit: 0.0,
            bonus_recovery: 0.0,
            attack_speed_mult: 1.0,
            area_mult: 1.0,
            duration_mult: 1.0,
            xp_mult: 1.0,
        }
    }
}

/// The persistent store shared with the menu/HUD layer.
#[derive(Resource, Debug, Clone)]
pub struct MetaStore {
    pub selected_character: CharacterId,
    pub coins: u32,
    pub powerup_levels: SmallVec<[(PowerupId, u32); 9]>,
    pub settings: Settings,
    pub high_scores: Vec<RunSummary>,
    pub current_run: RunSnapshot,
}

impl Default for MetaStore {
    fn default() -> Self {
        Self {
            selected_character: CharacterId::Bill,
            coins: 0,
            powerup_levels: SmallVec::new(),
            settings: Settings::default(),
            high_scores: Vec::new(),
            current_run: RunSnapshot::default(),
        }
    }
}

impl MetaStore {
    pub fn powerup_level(&self, id: PowerupId) -> u32 {
        self.powerup_levels
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    /// Coin multiplier from the gemstone powerup: `1 + 0.1 x level`.
    pub fn coin_multiplier(&self) -> f32 {
        1.0 + GEMSTONE_STEP * self.powerup_level(PowerupId::Gemstone) as f32
    }

    /// Spends coins on the next level of `id`.
    ///
    /// Rejects the purchase (mutating nothing) when the powerup is maxed or
    /// the balance does not cover the cost.
    pub fn purchase_powerup(&mut self, id: PowerupId) -> GameResult<u32> {
        let definition = config::powerup(id);
        let level = self.powerup_level(id);
        if level >= definition.max_level {
            return Err(StoreError::PowerupMaxed(id).into());
        }

        let cost = definition.cost_at(level);
        if self.coins < cost {
            return Err(StoreError::InsufficientCoins {
                have: self.coins,
                need: cost,
            }
            .into());
        }

        self.coins -= cost;
        match self.powerup_levels.iter_mut().find(|(slot, _)| *slot == id) {
            Some((_, stored)) => *stored += 1,
            None => self.powerup_levels.push((id, 1)),
        }
        info!(powerup = %id, new_level = level + 1, cost, balance = self.coins, "Powerup purchased");
        Ok(cost)
    }

    /// Credits coins collected during a run into the persistent balance.
    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    /// Restores a powerup level directly, bypassing the cost curve. For the
    /// persistence layer when rehydrating a saved snapshot.
    pub fn set_powerup_level(&mut self, id: PowerupId, level: u32) {
        match self.powerup_levels.iter_mut().find(|(slot, _)| *slot == id) {
            Some((_, stored)) => *stored = level,
            None => self.powerup_levels.push((id, level)),
        }
    }

    /// Folds every purchased powerup level into run-start modifiers.
    pub fn powerup_modifiers(&self) -> PowerupModifiers {
        let mut modifiers = PowerupModifiers::default();
        for id in PowerupId::iter() {
            let level = self.powerup_level(id);
            if level == 0 {
                continue;
            }
            let level = level as f32;
            match config::powerup(id).effect {
                PowerupEffect::DamagePercent(step) => modifiers.damage_mult += step / 100.0 * level,
                PowerupEffect::CoinPercent(step) => modifiers.coin_mult += step / 100.0 * level,
                PowerupEffect::Health(step) => modifiers.bonus_health += step * level,
                PowerupEffect::CritChance(step) => modifiers.bonus_crit += step * level,
                PowerupEffect::Recovery(step) => modifiers.bonus_recovery += step * level,
                PowerupEffect::AttackSpeedPercent(step) => modifiers.attack_speed_mult += step / 100.0 * level,
                PowerupEffect::AreaPercent(step) => modifiers.area_mult += step / 100.0 * level,
                PowerupEffect::DurationPercent(step) => modifiers.duration_mult += step / 100.0 * level,
                PowerupEffect::XpPercent(step) => modifiers.xp_mult += step / 100.0 * level,
            }
        }
        modifiers
    }

    /// Appends a finished run to the high-score list, keeping the top
    /// entries sorted descending by score.
    pub fn record_run(&mut self, summary: RunSummary) {
        debug!(score = summary.score, wave = summary.wave, kills = summary.kills, "Recording run summary");
        self.high_scores.push(summary);
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(HIGH_SCORE_CAP);
    }
}
