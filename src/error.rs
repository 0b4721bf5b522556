//! Centralized error types for the Nightswarm core.
//!
//! This module defines all error types used throughout the simulation,
//! providing a consistent error handling approach.

use crate::config::{CharacterId, EnemyId, PowerupId, UpgradeId, WeaponId};

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised by archetype table lookups.
///
/// In production paths these are logged and a safe fallback archetype is
/// substituted; the error type exists for the strict `try_*` accessors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Character archetype not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Enemy archetype not found: {0}")]
    EnemyNotFound(EnemyId),

    #[error("Weapon archetype not found: {0}")]
    WeaponNotFound(WeaponId),

    #[error("Upgrade definition not found: {0}")]
    UpgradeNotFound(UpgradeId),

    #[error("Powerup definition not found: {0}")]
    PowerupNotFound(PowerupId),

    #[error("Wave schedule is empty")]
    EmptyWaveSchedule,
}

/// Errors raised by meta-progression store operations.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Insufficient coins: have {have}, need {need}")]
    InsufficientCoins { have: u32, need: u32 },

    #[error("Powerup already at max level: {0}")]
    PowerupMaxed(PowerupId),
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
