//! Commands accepted from the UI layer and discrete events published to it.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::config::{CharacterId, EnemyId, PowerupId};
use crate::systems::UpgradeChoice;

/// A request from the embedding layer. Commands are validated against the
/// current phase; invalid ones are rejected as no-ops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    SelectCharacter(CharacterId),
    StartRun,
    SelectUpgrade(UpgradeChoice),
    PurchasePowerup(PowerupId),
    ReturnToMenu,
    Pause,
    Resume,
}

/// A discrete, simulation-complete notification.
///
/// Events are sound/visual cues only: consuming, dropping or delaying them
/// must never change simulation state. The embedding layer drains them once
/// per frame via [`crate::session::Session::drain_events`].
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// A projectile connected with an enemy that survived.
    EnemyHit { enemy: EnemyId, position: Vec2, damage: f32 },
    EnemyKilled { enemy: EnemyId, position: Vec2 },
    ProjectileFired,
    PlayerHit { damage: f32 },
    PlayerDodged,
    CoinCollected { amount: u32 },
    BossSpawned { enemy: EnemyId },
    BossKilled { enemy: EnemyId },
    LevelUp { level: u32 },
    /// The wave timer expired (or the boss fell); `next_wave` is about to begin.
    WaveComplete { next_wave: u32 },
    GameOver { score: u32 },
    /// An upgrade was applied and the simulation resumed.
    UpgradeApplied { choice: UpgradeChoice },
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

impl GameEvent {
    /// Whether this is a UI notification, as opposed to a command echo.
    pub fn is_notification(&self) -> bool {
        !matches!(self, GameEvent::Command(_))
    }
}
