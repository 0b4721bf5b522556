use glam::Vec2;
use nightswarm::config::{CharacterId, PowerupId};
use nightswarm::constants::TICK_SECONDS;
use nightswarm::events::{GameCommand, GameEvent};
use nightswarm::session::Session;
use nightswarm::store::MetaStore;
use nightswarm::systems::{PlayerState, UpgradeChoice, WavePhase};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn new_session() -> Session {
    Session::with_seed(MetaStore::default(), 42).expect("session should build")
}

/// Makes the player effectively unkillable so wave progression can be
/// observed without the swarm ending the run.
fn buff_player(session: &mut Session) {
    let mut player = session.world.resource_mut::<PlayerState>();
    player.max_health = 1_000_000.0;
    player.health = 1_000_000.0;
}

/// Ticks at one-second steps until wave 2 loads, resolving any level-up
/// checkpoints raised along the way.
fn run_until_wave_two(session: &mut Session) {
    let mut guard = 0;
    while session.snapshot().wave <= 1 && guard < 1000 {
        session.tick(1.0);
        if session.phase() == WavePhase::AwaitingUpgrade && session.snapshot().wave <= 1 {
            let offer = session.current_offer().expect("checkpoint must carry an offer");
            session
                .handle_command(GameCommand::SelectUpgrade(offer[0]))
                .expect("selection should be accepted");
        }
        guard += 1;
    }
    assert!(guard < 1000, "wave 1 never completed");
}

#[test]
fn test_run_starts_in_wave_one_spawning() {
    let mut session = new_session();
    session.tick(TICK_SECONDS);

    assert_that(&session.phase()).is_equal_to(WavePhase::Spawning);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.wave, 1);
    assert_eq!(snapshot.health, 100.0);
    assert_eq!(snapshot.level, 1);
}

#[test]
fn test_pause_freezes_timers_and_is_idempotent() {
    let mut session = new_session();
    session.tick(1.0);
    let before = session.snapshot().wave_time_remaining;

    // Pausing twice is the same as pausing once.
    session.handle_command(GameCommand::Pause).unwrap();
    session.handle_command(GameCommand::Pause).unwrap();
    for _ in 0..30 {
        session.tick(1.0);
    }
    // The snapshot still publishes while paused, but no timer advanced.
    assert_eq!(session.snapshot().wave_time_remaining, before);

    session.handle_command(GameCommand::Resume).unwrap();
    session.tick(1.0);
    assert_that(&(session.snapshot().wave_time_remaining < before)).is_true();
}

#[test]
fn test_movement_normalizes_diagonals() {
    let mut session = new_session();
    session.set_move_input(Vec2::new(1.0, 1.0));
    session.tick(1.0);

    // Bill moves at 200 u/s; one diagonal second must not exceed that.
    let player = session.world.resource::<PlayerState>();
    let distance = player.position.length();
    assert_that(&(distance <= 200.0 + 1e-3)).is_true();
    assert_that(&(distance >= 199.0)).is_true();
}

#[test]
fn test_wave_completion_raises_checkpoint_and_selection_resumes() {
    let mut session = new_session();
    buff_player(&mut session);
    run_until_wave_two(&mut session);

    assert_that(&session.phase()).is_equal_to(WavePhase::AwaitingUpgrade);
    assert_eq!(session.snapshot().wave, 2);

    let offer = session.current_offer().expect("checkpoint must carry an offer");
    assert_that(&offer.is_empty()).is_false();

    // Simulation is frozen while the choice is pending.
    let frozen = session.snapshot().wave_time_remaining;
    session.tick(1.0);
    assert_eq!(session.snapshot().wave_time_remaining, frozen);

    session
        .handle_command(GameCommand::SelectUpgrade(offer[0]))
        .expect("selection should be accepted");
    assert_that(&session.phase()).is_equal_to(WavePhase::Spawning);
    assert_that(&session.current_offer().is_none()).is_true();

    session.tick(1.0);
    assert_that(&(session.snapshot().wave_time_remaining < frozen)).is_true();
}

#[test]
fn test_select_upgrade_outside_checkpoint_is_rejected() {
    let mut session = new_session();
    session.tick(TICK_SECONDS);

    let result = session.handle_command(GameCommand::SelectUpgrade(UpgradeChoice::GenericBoost));
    assert_that(&result.is_err()).is_true();
    assert_that(&session.phase()).is_equal_to(WavePhase::Spawning);
}

#[test]
fn test_purchase_powerup_updates_store() {
    let mut session = Session::with_seed(
        MetaStore {
            coins: 60,
            ..MetaStore::default()
        },
        42,
    )
    .unwrap();

    session
        .handle_command(GameCommand::PurchasePowerup(PowerupId::Gemstone))
        .expect("purchase should succeed");
    assert_eq!(session.store().powerup_level(PowerupId::Gemstone), 1);
    assert_eq!(session.store().coins, 10);

    // An unaffordable purchase is rejected without side effects.
    let result = session.handle_command(GameCommand::PurchasePowerup(PowerupId::Precision));
    assert_that(&result.is_err()).is_true();
    assert_eq!(session.store().powerup_level(PowerupId::Precision), 0);
    assert_eq!(session.store().coins, 10);
}

#[test]
fn test_select_character_applies_on_next_run() {
    let mut session = new_session();
    session
        .handle_command(GameCommand::SelectCharacter(CharacterId::Brom))
        .unwrap();
    // The in-flight run is untouched.
    assert_eq!(session.world.resource::<PlayerState>().character, CharacterId::Bill);

    session.handle_command(GameCommand::StartRun).unwrap();
    let player = session.world.resource::<PlayerState>();
    assert_eq!(player.character, CharacterId::Brom);
    assert_eq!(player.max_health, 150.0);
}

#[test]
fn test_start_run_resets_run_state() {
    let mut session = new_session();
    buff_player(&mut session);
    run_until_wave_two(&mut session);
    assert_eq!(session.snapshot().wave, 2);

    session.handle_command(GameCommand::StartRun).unwrap();
    session.tick(TICK_SECONDS);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.wave, 1);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.level, 1);
    assert_that(&session.phase()).is_equal_to(WavePhase::Spawning);
}

#[test]
fn test_return_to_menu_tears_down_pools() {
    let mut session = new_session();
    // Let some combat happen first.
    for _ in 0..(10 * 60) {
        session.tick(TICK_SECONDS);
    }

    session.handle_command(GameCommand::ReturnToMenu).unwrap();
    let exited = session.tick(TICK_SECONDS);
    assert_that(&exited).is_true();

    assert_eq!(session.world.resource::<nightswarm::systems::Enemies>().0.active_count(), 0);
    assert_eq!(
        session
            .world
            .resource::<nightswarm::systems::Projectiles>()
            .0
            .active_count(),
        0
    );

    // The store survives teardown for persistence.
    let store = session.into_store();
    assert_eq!(store.selected_character, CharacterId::Bill);
}

#[test]
fn test_events_are_drained_not_replayed() {
    let mut session = new_session();
    for _ in 0..(5 * 60) {
        session.tick(TICK_SECONDS);
    }

    let first = session.drain_events();
    assert_that(&first.is_empty()).is_false();
    let second = session.drain_events();
    assert_that(&second.is_empty()).is_true();
}

#[test]
fn test_full_run_reaches_game_over_and_records_score() {
    // Sit still with auto-attack off: the swarm wins well before the
    // first wave would complete.
    let mut session = new_session();
    {
        let mut store = session.world.resource_mut::<MetaStore>();
        store.settings.auto_attack = false;
    }

    let mut ticks = 0;
    while session.phase() != WavePhase::GameOver && ticks < 60 * 60 * 10 {
        session.tick(TICK_SECONDS);
        ticks += 1;
    }

    assert_that(&session.phase()).is_equal_to(WavePhase::GameOver);
    let events = session.drain_events();
    assert_that(
        &events
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver { .. })),
    )
    .is_true();
    assert_eq!(session.store().high_scores.len(), 1);
}
