//! The combat resolver: auto-fire, projectile and contact damage, and
//! pickup collection.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use rand::Rng;
use tracing::{trace, warn};

use crate::config::{self, OrbitParams, WeaponArchetype};
use crate::constants::combat::{
    CRIT_MULTIPLIER, ENEMY_RADIUS, INVINCIBILITY_SECONDS, KNOCKBACK_SPEED, MIN_CONTACT_DAMAGE, ORBIT_LIFETIME_SECONDS,
    PICKUP_RADIUS, PLAYER_RADIUS, PROJECTILE_RADIUS,
};
use crate::events::GameEvent;
use crate::store::MetaStore;
use crate::systems::components::{
    Coins, DeltaTime, Enemies, Gems, Pickup, PickupKind, PlayerState, Progress, Projectile, ProjectileMotion,
    Projectiles, SessionRng, SpawnState, UpgradeOffer, WavePhase,
};
use crate::systems::progress::{add_experience, generate_offer};

/// Fires the player's primary weapon whenever its cooldown has elapsed.
///
/// Aimed weapons target the N nearest active enemies (N = the player's
/// projectile count), one volley per target fanned by the weapon's spread.
/// Orbit weapons ignore targeting and ring the player instead. Criticals
/// are rolled independently per projectile.
pub fn auto_fire_system(
    dt: Res<DeltaTime>,
    store: Res<MetaStore>,
    enemies: Res<Enemies>,
    mut player: ResMut<PlayerState>,
    mut projectiles: ResMut<Projectiles>,
    mut rng: ResMut<SessionRng>,
    mut events: EventWriter<GameEvent>,
) {
    player.fire_cooldown = (player.fire_cooldown - dt.seconds).max(0.0);
    if player.fire_cooldown > 0.0 || !store.settings.auto_attack {
        return;
    }

    // A missing weapon archetype downgrades the attack to a no-op rather
    // than poisoning the tick.
    let weapon = match config::try_weapon(player.primary_weapon()) {
        Ok(weapon) => weapon,
        Err(error) => {
            warn!(%error, "Weapon lookup failed, skipping fire");
            return;
        }
    };

    let fired = match weapon.orbit.as_ref() {
        Some(orbit) => fire_orbit(&player, weapon, orbit, &mut projectiles, &mut rng),
        None => fire_at_nearest(&player, weapon, &enemies, &mut projectiles, &mut rng),
    };

    if fired {
        player.fire_cooldown = weapon.fire_interval / player.attack_speed;
        events.write(GameEvent::ProjectileFired);
    }
}

fn roll_projectile(player: &PlayerState, weapon: &WeaponArchetype, rng: &mut SessionRng) -> (f32, bool) {
    let critical = rng.0.random_bool((player.crit_chance as f64 / 100.0).clamp(0.0, 1.0));
    let damage = player.power * weapon.damage * if critical { CRIT_MULTIPLIER } else { 1.0 };
    (damage, critical)
}

fn fire_orbit(
    player: &PlayerState,
    weapon: &WeaponArchetype,
    orbit: &OrbitParams,
    projectiles: &mut Projectiles,
    rng: &mut SessionRng,
) -> bool {
    let mut fired = false;
    for index in 0..orbit.count {
        let phase = std::f32::consts::TAU * index as f32 / orbit.count as f32;
        let (damage, critical) = roll_projectile(player, weapon, rng);
        let projectile = Projectile {
            weapon: weapon.id,
            position: player.position + Vec2::from_angle(phase) * orbit.radius,
            origin: player.position,
            motion: ProjectileMotion::Orbit {
                angular_speed: orbit.angular_speed,
                radius: orbit.radius,
                phase,
                remaining: ORBIT_LIFETIME_SECONDS * player.duration_mult,
            },
            damage,
            critical,
            range: weapon.range,
            hit_radius: PROJECTILE_RADIUS * player.area_mult,
        };
        if projectiles.0.acquire(projectile).is_none() {
            break;
        }
        fired = true;
    }
    fired
}

fn fire_at_nearest(
    player: &PlayerState,
    weapon: &WeaponArchetype,
    enemies: &Enemies,
    projectiles: &mut Projectiles,
    rng: &mut SessionRng,
) -> bool {
    let mut targets: Vec<(f32, Vec2)> = enemies
        .0
        .iter_active()
        .map(|(_, enemy)| (enemy.position.distance_squared(player.position), enemy.position))
        .collect();
    if targets.is_empty() {
        return false;
    }
    targets.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut fired = false;
    for (_, target) in targets.into_iter().take(player.projectile_count as usize) {
        let aim = target - player.position;
        let base_angle = aim.y.atan2(aim.x);

        for index in 0..weapon.projectile_count {
            // Fan extra projectiles evenly across the spread arc.
            let offset = if weapon.projectile_count > 1 {
                weapon.spread * (index as f32 / (weapon.projectile_count - 1) as f32 - 0.5) * 2.0
            } else {
                0.0
            };
            let angle = base_angle + offset;
            let (damage, critical) = roll_projectile(player, weapon, rng);
            let projectile = Projectile {
                weapon: weapon.id,
                position: player.position,
                origin: player.position,
                motion: ProjectileMotion::Linear {
                    velocity: Vec2::from_angle(angle) * weapon.projectile_speed,
                },
                damage,
                critical,
                range: weapon.range,
                hit_radius: PROJECTILE_RADIUS * player.area_mult,
            };
            if projectiles.0.acquire(projectile).is_none() {
                return fired;
            }
            fired = true;
        }
    }
    fired
}

/// Resolves projectile-enemy overlaps: damage, deaths, drops and scoring.
#[allow(clippy::too_many_arguments)]
pub fn projectile_hit_system(
    mut projectiles: ResMut<Projectiles>,
    mut enemies: ResMut<Enemies>,
    mut spawn: ResMut<SpawnState>,
    mut progress: ResMut<Progress>,
    mut coins: ResMut<Coins>,
    mut gems: ResMut<Gems>,
    mut events: EventWriter<GameEvent>,
) {
    let projectile_ids = projectiles.0.active_ids_where(|_| true);

    for projectile_id in projectile_ids {
        let Some(projectile) = projectiles.0.get(projectile_id).copied() else {
            continue;
        };

        let hit = enemies.0.iter_active().find(|(_, enemy)| {
            enemy.position.distance(projectile.position) <= projectile.hit_radius + ENEMY_RADIUS
        });
        let Some((enemy_id, _)) = hit else { continue };

        projectiles.0.release(projectile_id);

        let Some(enemy) = enemies.0.get_mut(enemy_id) else { continue };
        enemy.health -= projectile.damage;
        trace!(
            enemy = %enemy.archetype,
            damage = projectile.damage,
            critical = projectile.critical,
            remaining = enemy.health,
            "Projectile hit"
        );

        if enemy.health > 0.0 {
            // Survivors get a damage flash on the render side.
            events.write(GameEvent::EnemyHit {
                enemy: enemy.archetype,
                position: enemy.position,
                damage: projectile.damage,
            });
            continue;
        }

        let dead = *enemy;
        enemies.0.release(enemy_id);

        progress.score += dead.score;
        progress.kills += 1;
        spawn.killed += 1;

        if gems
            .0
            .acquire(Pickup {
                kind: PickupKind::ExperienceGem,
                position: dead.position,
                value: dead.experience,
            })
            .is_none()
        {
            trace!("Gem pool saturated, experience drop skipped");
        }

        if let Some(value) = dead.coin_value {
            if coins
                .0
                .acquire(Pickup {
                    kind: PickupKind::Coin,
                    position: dead.position,
                    value,
                })
                .is_none()
            {
                trace!("Coin pool saturated, coin drop skipped");
            }
        }

        if dead.boss {
            spawn.boss_defeated = true;
            events.write(GameEvent::BossKilled { enemy: dead.archetype });
        } else {
            events.write(GameEvent::EnemyKilled {
                enemy: dead.archetype,
                position: dead.position,
            });
        }
    }
}

/// Resolves the player-enemy contact for this tick.
///
/// An active invincibility window ignores the collision entirely, evasion
/// roll included. Otherwise: evasion negates the hit without granting
/// i-frames; armor mitigates down to a floor of 1; the survivor is knocked
/// back along the enemy-to-player angle for one physics step.
pub fn player_hit_system(
    enemies: Res<Enemies>,
    mut player: ResMut<PlayerState>,
    mut rng: ResMut<SessionRng>,
    mut events: EventWriter<GameEvent>,
) {
    if player.is_invincible() {
        return;
    }

    let contact = enemies
        .0
        .iter_active()
        .find(|(_, enemy)| enemy.position.distance(player.position) <= PLAYER_RADIUS + ENEMY_RADIUS)
        .map(|(_, enemy)| (enemy.position, enemy.damage));
    let Some((enemy_position, damage)) = contact else {
        return;
    };

    let evasion_roll: f32 = rng.0.random_range(0.0..100.0);
    if evasion_roll < player.evasion {
        events.write(GameEvent::PlayerDodged);
        return;
    }

    let armor_reduction = damage * (player.armor / 100.0);
    let actual = (damage - armor_reduction).max(MIN_CONTACT_DAMAGE);
    player.health -= actual;
    player.invincibility_remaining = INVINCIBILITY_SECONDS;

    let away = player.position - enemy_position;
    let direction = if away.length_squared() > 0.0 {
        away.normalize()
    } else {
        Vec2::new(1.0, 0.0)
    };
    player.knockback = Some(direction * KNOCKBACK_SPEED);

    trace!(damage = actual, health = player.health, "Player hit");
    events.write(GameEvent::PlayerHit { damage: actual });
}

/// Scoops up coins and experience gems within reach of the player.
///
/// Coin credit applies the persisted gemstone multiplier and floors to an
/// integer; experience applies the insight multiplier, and a level crossing
/// raises an upgrade checkpoint.
#[allow(clippy::too_many_arguments)]
pub fn pickup_collect_system(
    mut player: ResMut<PlayerState>,
    mut coins: ResMut<Coins>,
    mut gems: ResMut<Gems>,
    mut store: ResMut<MetaStore>,
    mut progress: ResMut<Progress>,
    mut phase: ResMut<WavePhase>,
    mut offer: ResMut<UpgradeOffer>,
    mut rng: ResMut<SessionRng>,
    mut events: EventWriter<GameEvent>,
) {
    let reach = |pickup: &Pickup, position: Vec2| pickup.position.distance(position) <= PICKUP_RADIUS;

    let collected_coins = coins.0.active_ids_where(|coin| reach(coin, player.position));
    for id in collected_coins {
        let Some(coin) = coins.0.get(id).copied() else { continue };
        coins.0.release(id);

        let amount = (coin.value as f32 * store.coin_multiplier()).floor() as u32;
        progress.coins_collected += amount;
        store.add_coins(amount);
        events.write(GameEvent::CoinCollected { amount });
    }

    let collected_gems = gems.0.active_ids_where(|gem| reach(gem, player.position));
    if collected_gems.is_empty() {
        return;
    }

    let mut gained = 0.0;
    for id in collected_gems {
        let Some(gem) = gems.0.get(id).copied() else { continue };
        gems.0.release(id);
        gained += gem.value as f32 * player.xp_mult;
    }

    if add_experience(&mut player, gained) > 0 {
        events.write(GameEvent::LevelUp { level: player.level });
        offer.0 = Some(generate_offer(&player, &mut rng.0));
        *phase = WavePhase::AwaitingUpgrade;
    }
}
