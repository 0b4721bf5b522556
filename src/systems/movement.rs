//! Movement integration for the player, enemies and projectiles.

use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;

use crate::systems::components::{
    DeltaTime, Enemies, InputDirection, PlayerState, Projectiles, ProjectileMotion, Viewport,
};

/// Applies movement input to the player and advances its position.
///
/// Diagonal input is normalized so the player never exceeds its speed
/// magnitude. A pending knockback impulse overrides input for exactly one
/// physics step.
pub fn player_movement_system(
    dt: Res<DeltaTime>,
    input: Res<InputDirection>,
    mut player: ResMut<PlayerState>,
    mut viewport: ResMut<Viewport>,
) {
    let velocity = match player.knockback.take() {
        Some(impulse) => impulse,
        None => {
            let direction = input.0;
            if direction.length_squared() > 0.0 {
                direction.normalize() * player.speed
            } else {
                Vec2::ZERO
            }
        }
    };

    player.velocity = velocity;
    player.position += velocity * dt.seconds;

    // Camera follows the player; the spawn director reads the viewport.
    viewport.center = player.position;
}

/// Steers every active enemy toward the player and integrates positions.
///
/// Ranged archetypes hold position once inside their preferred range
/// instead of closing to melee. Non-boss enemies that end up far outside
/// the play area are recycled rather than chased forever.
pub fn enemy_seek_system(dt: Res<DeltaTime>, player: Res<PlayerState>, mut enemies: ResMut<Enemies>) {
    let mut strays = Vec::new();
    for (id, enemy) in enemies.0.iter_active_mut() {
        let to_player = player.position - enemy.position;
        let distance = to_player.length();

        if distance > crate::constants::spawning::DESPAWN_RANGE && !enemy.boss {
            strays.push(id);
            continue;
        }

        let holding = enemy
            .ranged
            .map(|ranged| distance <= ranged.range)
            .unwrap_or(false);

        enemy.velocity = if holding || distance <= f32::EPSILON {
            Vec2::ZERO
        } else {
            to_player / distance * enemy.speed
        };
        enemy.position += enemy.velocity * dt.seconds;
    }
    for id in strays {
        enemies.0.release(id);
    }
}

/// Integrates projectile positions. Orbiting projectiles are re-anchored to
/// the player every tick.
pub fn projectile_motion_system(dt: Res<DeltaTime>, player: Res<PlayerState>, mut projectiles: ResMut<Projectiles>) {
    for (_, projectile) in projectiles.0.iter_active_mut() {
        match projectile.motion {
            ProjectileMotion::Linear { velocity } => {
                projectile.position += velocity * dt.seconds;
            }
            ProjectileMotion::Orbit {
                angular_speed,
                radius,
                ref mut phase,
                ..
            } => {
                *phase += angular_speed * dt.seconds;
                projectile.position = player.position + Vec2::from_angle(*phase) * radius;
            }
        }
    }
}

/// Deactivates projectiles past their weapon's range (linear) or lifetime
/// (orbiting).
pub fn projectile_range_system(dt: Res<DeltaTime>, mut projectiles: ResMut<Projectiles>) {
    let mut expired = Vec::new();
    for (id, projectile) in projectiles.0.iter_active_mut() {
        match projectile.motion {
            ProjectileMotion::Linear { .. } => {
                if projectile.position.distance(projectile.origin) > projectile.range {
                    expired.push(id);
                }
            }
            ProjectileMotion::Orbit { ref mut remaining, .. } => {
                *remaining -= dt.seconds;
                if *remaining <= 0.0 {
                    expired.push(id);
                }
            }
        }
    }
    for id in expired {
        projectiles.0.release(id);
    }
}
