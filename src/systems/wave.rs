//! The wave state machine: the run's temporal structure.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use tracing::{debug, info};

use crate::config;
use crate::events::GameEvent;
use crate::store::{MetaStore, RunSummary};
use crate::systems::components::{
    DeltaTime, PlayerState, Progress, SessionRng, SpawnState, UpgradeOffer, WavePhase, WaveState,
};
use crate::systems::progress::generate_offer;

/// Advances the wave timer and drives the phase transitions:
/// `Spawning -> Completed -> AwaitingUpgrade -> Spawning | GameOver`.
///
/// `Completed` is transient: the same tick that ends a wave also raises the
/// upgrade checkpoint, increments the wave number and resets the per-wave
/// spawn counters. `GameOver` is terminal and publishes the run summary.
#[allow(clippy::too_many_arguments)]
pub fn wave_phase_system(
    dt: Res<DeltaTime>,
    player: Res<PlayerState>,
    mut phase: ResMut<WavePhase>,
    mut wave: ResMut<WaveState>,
    mut spawn: ResMut<SpawnState>,
    mut progress: ResMut<Progress>,
    mut store: ResMut<MetaStore>,
    mut offer: ResMut<UpgradeOffer>,
    mut rng: ResMut<SessionRng>,
    mut events: EventWriter<GameEvent>,
) {
    let mut next = match *phase {
        WavePhase::Spawning => {
            wave.timer += dt.seconds;
            progress.elapsed_seconds += dt.seconds;

            let entry = config::wave_entry(wave.number);
            if player.health <= 0.0 {
                WavePhase::GameOver
            } else if wave.timer >= entry.duration || (entry.boss.is_some() && spawn.boss_defeated) {
                WavePhase::Completed
            } else {
                WavePhase::Spawning
            }
        }
        other => other,
    };

    if next == WavePhase::Completed {
        // Completed transitions onward immediately.
        let completed = wave.number;
        wave.number += 1;
        wave.timer = 0.0;
        spawn.reset_for_wave();
        offer.0 = Some(generate_offer(&player, &mut rng.0));

        info!(completed, next_wave = wave.number, "Wave complete");
        events.write(GameEvent::WaveComplete { next_wave: wave.number });
        next = WavePhase::AwaitingUpgrade;
    }

    if next == WavePhase::GameOver && *phase != WavePhase::GameOver {
        let summary = RunSummary {
            character: player.character,
            score: progress.score,
            wave: wave.number,
            kills: progress.kills,
            elapsed_seconds: progress.elapsed_seconds,
            coins_collected: progress.coins_collected,
        };
        store.record_run(summary);
        debug!(score = summary.score, wave = summary.wave, "Run over");
        events.write(GameEvent::GameOver { score: summary.score });
    }

    *phase = next;
}
