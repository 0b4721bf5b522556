//! Publishes the per-tick HUD snapshot into the meta store.

use bevy_ecs::system::{Res, ResMut};

use crate::config;
use crate::store::MetaStore;
use crate::systems::components::{PlayerState, Progress, WaveState};

/// Writes the run-in-progress snapshot the HUD renders from. Runs every
/// tick, paused or not, so the overlay never shows stale values.
pub fn publish_system(
    player: Res<PlayerState>,
    progress: Res<Progress>,
    wave: Res<WaveState>,
    mut store: ResMut<MetaStore>,
) {
    let entry = config::wave_entry(wave.number);
    let snapshot = &mut store.current_run;
    snapshot.score = progress.score;
    snapshot.wave = wave.number;
    snapshot.health = player.health.max(0.0);
    snapshot.max_health = player.max_health;
    snapshot.kills = progress.kills;
    snapshot.level = player.level;
    snapshot.experience = player.experience;
    snapshot.experience_to_next = player.experience_to_next;
    snapshot.coins = progress.coins_collected;
    snapshot.wave_time_remaining = (entry.duration - wave.timer).max(0.0);
    snapshot.elapsed_seconds = progress.elapsed_seconds;
    snapshot.weapons = player.weapons.clone();
    snapshot.player_alpha = player.alpha;
}
