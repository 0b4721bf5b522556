//! Headless demo runner: drives a scripted run through the simulation and
//! logs what happens. Useful for profiling and for exercising the loop
//! without a rendering host.

use anyhow::Context;
use glam::Vec2;
use nightswarm::constants::TICK_SECONDS;
use nightswarm::events::GameCommand;
use nightswarm::session::Session;
use nightswarm::store::MetaStore;
use nightswarm::systems::WavePhase;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut session = Session::new(MetaStore::default()).context("failed to create session")?;

    // Ten simulated minutes, tops; the run usually ends well before that.
    let max_ticks = 10 * 60 * 60;
    for tick in 0..max_ticks {
        // Wander in a slow circle so enemies don't pile onto a stationary
        // target instantly.
        let angle = tick as f32 * TICK_SECONDS * 0.4;
        session.set_move_input(Vec2::from_angle(angle));

        session.tick(TICK_SECONDS);

        for event in session.drain_events() {
            if event.is_notification() {
                info!(?event, "event");
            }
        }

        match session.phase() {
            WavePhase::AwaitingUpgrade => {
                let choice = session
                    .current_offer()
                    .and_then(|offer| offer.first().copied())
                    .context("checkpoint raised without an offer")?;
                session.handle_command(GameCommand::SelectUpgrade(choice))?;
            }
            WavePhase::GameOver => break,
            _ => {}
        }
    }

    let snapshot = session.snapshot();
    info!(
        score = snapshot.score,
        wave = snapshot.wave,
        kills = snapshot.kills,
        coins = snapshot.coins,
        elapsed = snapshot.elapsed_seconds,
        "Run finished"
    );

    let store = session.into_store();
    for (rank, entry) in store.high_scores.iter().enumerate() {
        info!(rank = rank + 1, score = entry.score, wave = entry.wave, character = %entry.character, "High score");
    }

    Ok(())
}
