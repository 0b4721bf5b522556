//! The run session: tick orchestration, player ownership, and the command
//! surface exposed to the embedding layer.

use bevy_ecs::event::Events;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::store::{MetaStore, RunSnapshot};
use crate::systems::{
    self, Coins, DeltaTime, Enemies, Gems, GlobalState, InputDirection, PauseState, PlayerState, Progress,
    Projectiles, SessionRng, SpawnState, UpgradeChoice, UpgradeOffer, Viewport, WavePhase, WaveState,
};

/// System sets ordering one simulation tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Combat and movement; only runs mid-wave and unpaused.
    Update,
    /// Wave progression, range expiry and spawning.
    Respond,
    /// HUD snapshot; runs unconditionally.
    Publish,
}

/// One complete play session from start-run to game-over.
///
/// Owns the ECS world and the schedule that orders the per-tick systems.
/// The host drives it with [`Session::tick`] once per rendered frame,
/// feeds input through [`Session::set_move_input`] and
/// [`Session::handle_command`], and drains [`GameEvent`]s for sound and
/// visual reactions after each tick.
pub struct Session {
    pub world: World,
    pub schedule: Schedule,
}

impl Session {
    /// Creates a session and starts a run for the store's selected
    /// character, with combat rolls seeded from the OS.
    pub fn new(store: MetaStore) -> GameResult<Session> {
        Self::build(store, SmallRng::from_os_rng())
    }

    /// Like [`Session::new`] but with a fixed RNG seed, for deterministic
    /// replays and tests.
    pub fn with_seed(store: MetaStore, seed: u64) -> GameResult<Session> {
        Self::build(store, SmallRng::seed_from_u64(seed))
    }

    fn build(store: MetaStore, rng: SmallRng) -> GameResult<Session> {
        // Validate up front; a bad character id is a constructor error, not
        // something to paper over mid-run.
        let archetype = config::try_character(store.selected_character)?;
        info!(character = %archetype.id, "Starting run session");

        let player = PlayerState::from_archetype(archetype, &store.powerup_modifiers());

        let mut world = World::default();
        world.insert_resource(Events::<GameEvent>::default());
        world.insert_resource(store);
        world.insert_resource(player);
        world.insert_resource(SessionRng(rng));
        world.insert_resource(DeltaTime { seconds: 0.0, ticks: 0 });
        world.insert_resource(InputDirection::default());
        world.insert_resource(Viewport::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(WavePhase::default());
        world.insert_resource(WaveState::default());
        world.insert_resource(SpawnState::default());
        world.insert_resource(Progress::default());
        world.insert_resource(UpgradeOffer::default());
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(Enemies::default());
        world.insert_resource(Projectiles::default());
        world.insert_resource(Coins::default());
        world.insert_resource(Gems::default());

        let mut schedule = Schedule::default();
        Self::configure_schedule(&mut schedule);

        Ok(Session { world, schedule })
    }

    /// Tick ordering matters: input/movement and invincibility upkeep run
    /// first, then auto-fire, then overlap resolution, then wave
    /// bookkeeping, range expiry and spawning, and finally the HUD
    /// snapshot.
    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (
                    systems::player_movement_system,
                    systems::invincibility_system,
                    systems::recovery_system,
                    systems::player_facing_system,
                    systems::auto_fire_system,
                    systems::enemy_seek_system,
                    systems::projectile_motion_system,
                    systems::projectile_hit_system,
                    systems::player_hit_system,
                    systems::pickup_collect_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (
                    systems::wave_phase_system,
                    systems::projectile_range_system.run_if(phase_is_spawning),
                    systems::spawn_director_system.run_if(phase_is_spawning),
                )
                    .chain()
                    .in_set(GameplaySet::Respond),
                systems::publish_system.in_set(GameplaySet::Publish),
            ))
            .configure_sets((
                GameplaySet::Update.run_if(simulation_running),
                GameplaySet::Respond
                    .after(GameplaySet::Update)
                    .run_if(|paused: Res<PauseState>| !paused.active()),
                GameplaySet::Publish.after(GameplaySet::Respond),
            ));
    }

    /// Advances the simulation by one frame.
    ///
    /// Returns `true` once the session has been torn down (return-to-menu);
    /// the host should drop it and keep the store from [`Session::into_store`].
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt, ticks: 1 });
        self.schedule.run(&mut self.world);
        self.world.resource::<GlobalState>().exit
    }

    /// Raw movement input from the host, components clamped to `[-1, 1]`.
    pub fn set_move_input(&mut self, direction: Vec2) {
        self.world.resource_mut::<InputDirection>().0 = direction.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Applies a UI command. Commands invalid for the current phase are
    /// rejected as no-ops with an error describing why.
    pub fn handle_command(&mut self, command: GameCommand) -> GameResult<()> {
        self.send_event(GameEvent::Command(command));

        match command {
            GameCommand::SelectCharacter(id) => {
                config::try_character(id)?;
                self.world.resource_mut::<MetaStore>().selected_character = id;
                debug!(character = %id, "Character selected");
                Ok(())
            }
            GameCommand::StartRun => self.begin_run(),
            GameCommand::SelectUpgrade(choice) => self.select_upgrade(choice),
            GameCommand::PurchasePowerup(id) => {
                self.world.resource_mut::<MetaStore>().purchase_powerup(id)?;
                Ok(())
            }
            GameCommand::Pause => {
                self.world.resource_mut::<PauseState>().set(true);
                Ok(())
            }
            GameCommand::Resume => {
                self.world.resource_mut::<PauseState>().set(false);
                Ok(())
            }
            GameCommand::ReturnToMenu => {
                self.teardown();
                Ok(())
            }
        }
    }

    /// Resets all run state and begins a fresh run for the currently
    /// selected character. Wave numbers, pools and progression all reset;
    /// only the meta store carries over.
    fn begin_run(&mut self) -> GameResult<()> {
        let (archetype, modifiers) = {
            let store = self.world.resource::<MetaStore>();
            (config::try_character(store.selected_character)?, store.powerup_modifiers())
        };
        info!(character = %archetype.id, "Run started");

        self.world.insert_resource(PlayerState::from_archetype(archetype, &modifiers));
        self.world.insert_resource(WavePhase::Spawning);
        self.world.insert_resource(WaveState::default());
        self.world.insert_resource(SpawnState::default());
        self.world.insert_resource(Progress::default());
        self.world.insert_resource(UpgradeOffer::default());
        self.world.insert_resource(InputDirection::default());
        self.world.insert_resource(Viewport::default());
        self.world.resource_mut::<PauseState>().set(false);
        self.world.resource_mut::<Enemies>().0.clear();
        self.world.resource_mut::<Projectiles>().0.clear();
        self.world.resource_mut::<Coins>().0.clear();
        self.world.resource_mut::<Gems>().0.clear();
        Ok(())
    }

    fn select_upgrade(&mut self, choice: UpgradeChoice) -> GameResult<()> {
        if *self.world.resource::<WavePhase>() != WavePhase::AwaitingUpgrade {
            warn!(?choice, "Upgrade selected outside a checkpoint, ignoring");
            return Err(GameError::InvalidState(
                "select-upgrade is only valid while awaiting an upgrade".into(),
            ));
        }

        {
            let mut player = self.world.resource_mut::<PlayerState>();
            systems::apply_upgrade(&mut player, choice);
        }
        self.world.resource_mut::<UpgradeOffer>().0 = None;
        self.world.insert_resource(WavePhase::Spawning);
        self.send_event(GameEvent::UpgradeApplied { choice });
        Ok(())
    }

    /// Tears the session down: every pool slot is released and nothing of
    /// the run survives except what was already published to the store.
    fn teardown(&mut self) {
        info!("Returning to menu, tearing down run session");
        self.world.resource_mut::<Enemies>().0.clear();
        self.world.resource_mut::<Projectiles>().0.clear();
        self.world.resource_mut::<Coins>().0.clear();
        self.world.resource_mut::<Gems>().0.clear();
        self.world.resource_mut::<GlobalState>().exit = true;
    }

    fn send_event(&mut self, event: GameEvent) {
        self.world.resource_mut::<Events<GameEvent>>().send(event);
    }

    /// Drains the discrete events accumulated since the last call. The
    /// host should call this once per frame; events are cues only and
    /// dropping them never affects the simulation.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.resource_mut::<Events<GameEvent>>().drain().collect()
    }

    pub fn phase(&self) -> WavePhase {
        *self.world.resource::<WavePhase>()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.world.resource::<MetaStore>().current_run.clone()
    }

    /// The upgrade choices currently on offer, if a checkpoint is active.
    pub fn current_offer(&self) -> Option<SmallVec<[UpgradeChoice; 3]>> {
        self.world.resource::<UpgradeOffer>().0.clone()
    }

    pub fn store(&self) -> &MetaStore {
        self.world.resource::<MetaStore>()
    }

    /// Consumes the session, handing the meta store back for persistence.
    pub fn into_store(mut self) -> MetaStore {
        self.world.remove_resource::<MetaStore>().expect("store always present")
    }
}

fn simulation_running(paused: Res<PauseState>, phase: Res<WavePhase>) -> bool {
    !paused.active() && *phase == WavePhase::Spawning
}

fn phase_is_spawning(phase: Res<WavePhase>) -> bool {
    *phase == WavePhase::Spawning
}
