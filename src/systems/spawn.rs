//! The spawn director: enemy creation timing and composition for the
//! active wave, plus boss and minion-summon triggers.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::{self, EnemyArchetype, EnemyId, SpecialBehavior};
use crate::constants::spawning::{
    BOSS_COIN_VALUE, BOSS_KILL_FRACTION, BOSS_RING_RADIUS, COIN_DROP_CHANCE, COIN_VALUE, DIFFICULTY_STEP,
    MINIONS_PER_SUMMON, MINION_SCATTER_RADIUS, MINION_SPEED_FACTOR, MINION_STAT_FRACTION, MINION_SUMMON_CHANCE,
    XP_BASE, XP_PER_WAVE,
};
use crate::constants::viewport::{SIZE, SPAWN_PADDING};
use crate::events::GameEvent;
use crate::systems::components::{DeltaTime, Enemies, Enemy, PlayerState, SessionRng, SpawnState, Viewport, WaveState};

/// Per-wave stat multiplier applied to spawned enemies.
pub fn difficulty_multiplier(wave_number: u32) -> f32 {
    1.0 + DIFFICULTY_STEP * (wave_number.saturating_sub(1)) as f32
}

/// A point chosen uniformly at random along one of the four edges of the
/// camera viewport, expanded by a fixed padding.
pub fn random_edge_position(rng: &mut SmallRng, center: Vec2) -> Vec2 {
    let half = SIZE / 2.0 + Vec2::splat(SPAWN_PADDING);
    let (left, right) = (center.x - half.x, center.x + half.x);
    let (top, bottom) = (center.y - half.y, center.y + half.y);

    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(left..right), top),
        1 => Vec2::new(right, rng.random_range(top..bottom)),
        2 => Vec2::new(rng.random_range(left..right), bottom),
        _ => Vec2::new(left, rng.random_range(top..bottom)),
    }
}

/// Builds a pooled enemy record from an archetype, applying the wave's
/// difficulty scaling and stamping drop values.
fn scaled_enemy(archetype: &EnemyArchetype, wave_number: u32, position: Vec2, coin_value: Option<u32>) -> Enemy {
    let multiplier = difficulty_multiplier(wave_number);
    Enemy {
        archetype: archetype.id,
        position,
        velocity: Vec2::ZERO,
        health: archetype.health * multiplier,
        max_health: archetype.health * multiplier,
        damage: archetype.damage * multiplier,
        speed: archetype.speed,
        score: (archetype.score as f32 * multiplier) as u32,
        experience: XP_BASE + XP_PER_WAVE * wave_number,
        coin_value,
        boss: false,
        summoner: archetype.special == Some(SpecialBehavior::Summon),
        ranged: archetype.ranged,
    }
}

/// Decides enemy creation for the active wave.
///
/// Pool exhaustion is never an error here: a failed acquire skips the
/// spawn and the attempt recurs naturally on the next eligible tick.
pub fn spawn_director_system(
    dt: Res<DeltaTime>,
    wave: Res<WaveState>,
    viewport: Res<Viewport>,
    player: Res<PlayerState>,
    mut spawn: ResMut<SpawnState>,
    mut enemies: ResMut<Enemies>,
    mut rng: ResMut<SessionRng>,
    mut events: EventWriter<GameEvent>,
) {
    let entry = config::wave_entry(wave.number);
    let rng = &mut rng.0;

    // Regular spawns, paced by the wave's interval up to its quota.
    spawn.spawn_timer += dt.seconds;
    if spawn.spawn_timer >= entry.spawn_interval && spawn.spawned < entry.total_enemies && !entry.eligible.is_empty() {
        let id = entry.eligible[rng.random_range(0..entry.eligible.len())];
        let position = random_edge_position(rng, viewport.center);
        let coin = rng.random_bool(COIN_DROP_CHANCE).then_some(COIN_VALUE);
        let enemy = scaled_enemy(config::enemy(id), wave.number, position, coin);

        match enemies.0.acquire(enemy) {
            Some(slot) => {
                spawn.spawned += 1;
                spawn.spawn_timer = 0.0;
                trace!(enemy = %id, slot, wave = wave.number, spawned = spawn.spawned, "Enemy spawned");
            }
            None => {
                debug!(enemy = %id, "Enemy pool saturated, spawn skipped");
            }
        }
    }

    // Boss trigger: once per boss wave, after 75% of the quota is down.
    if let Some(boss_id) = entry.boss {
        let threshold = (entry.total_enemies as f32 * BOSS_KILL_FRACTION).ceil() as u32;
        if !spawn.boss_spawned && spawn.killed >= threshold {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let position = player.position + Vec2::from_angle(angle) * BOSS_RING_RADIUS;
            let mut boss = scaled_enemy(config::enemy(boss_id), wave.number, position, Some(BOSS_COIN_VALUE));
            boss.boss = true;

            match enemies.0.acquire(boss) {
                Some(_) => {
                    spawn.boss_spawned = true;
                    debug!(boss = %boss_id, wave = wave.number, "Boss spawned");
                    events.write(GameEvent::BossSpawned { enemy: boss_id });
                }
                None => {
                    debug!(boss = %boss_id, "Enemy pool saturated, boss spawn deferred");
                }
            }
        }
    }

    // Minion summons: each live summoner rolls a small per-tick chance.
    // The roll is deliberately per-tick, not time-scaled; the loop runs at
    // a fixed step.
    let summoners: Vec<Vec2> = enemies
        .0
        .iter_active()
        .filter(|(_, enemy)| enemy.summoner)
        .map(|(_, enemy)| enemy.position)
        .collect();

    for origin in summoners {
        if !rng.random_bool(MINION_SUMMON_CHANCE) {
            continue;
        }

        let base_id = entry.eligible.first().copied().unwrap_or(EnemyId::Grunt);
        let base = config::enemy(base_id);
        for _ in 0..MINIONS_PER_SUMMON {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let offset = Vec2::from_angle(angle) * (rng.random::<f32>() * MINION_SCATTER_RADIUS);
            let mut minion = scaled_enemy(base, wave.number, origin + offset, None);
            minion.health *= MINION_STAT_FRACTION;
            minion.max_health = minion.health;
            minion.damage *= MINION_STAT_FRACTION;
            minion.score = (minion.score as f32 * MINION_STAT_FRACTION) as u32;
            minion.speed *= MINION_SPEED_FACTOR;
            minion.summoner = false;

            if enemies.0.acquire(minion).is_none() {
                debug!("Enemy pool saturated, minion summon truncated");
                break;
            }
        }
        trace!(wave = wave.number, "Summoner called minions");
    }
}
