//! Player-only upkeep: invincibility frames, health recovery and facing.

use bevy_ecs::system::{Res, ResMut};

use crate::constants::INITIAL_FACING;
use crate::store::MetaStore;
use crate::systems::components::{DeltaTime, Enemies, PlayerState};

/// Counts down the post-hit invincibility window and pulses the player's
/// render alpha while it is active.
pub fn invincibility_system(dt: Res<DeltaTime>, mut player: ResMut<PlayerState>) {
    if player.invincibility_remaining > 0.0 {
        player.invincibility_remaining = (player.invincibility_remaining - dt.seconds).max(0.0);
        let pulse = (player.invincibility_remaining * std::f32::consts::TAU * 4.0).sin().abs();
        player.alpha = 0.5 + 0.5 * pulse;
    } else if player.alpha != 1.0 {
        player.alpha = 1.0;
    }
}

/// Regenerates health at the player's recovery rate, capped at max.
pub fn recovery_system(dt: Res<DeltaTime>, mut player: ResMut<PlayerState>) {
    if player.recovery > 0.0 && player.health < player.max_health {
        player.health = (player.health + player.recovery * dt.seconds).min(player.max_health);
    }
}

/// Points the player at the nearest enemy when the setting is on, falling
/// back to the movement direction. The setting is read fresh each tick.
pub fn player_facing_system(store: Res<MetaStore>, enemies: Res<Enemies>, mut player: ResMut<PlayerState>) {
    if store.settings.auto_face_closest_enemy {
        let nearest = enemies
            .0
            .iter_active()
            .map(|(_, enemy)| enemy.position)
            .min_by(|a, b| {
                a.distance_squared(player.position)
                    .total_cmp(&b.distance_squared(player.position))
            });
        if let Some(target) = nearest {
            let to_target = target - player.position;
            if to_target.length_squared() > 0.0 {
                player.facing = to_target.normalize();
            }
            return;
        }
    }

    if player.velocity.length_squared() > 0.0 {
        player.facing = player.velocity.normalize();
    } else if player.facing.length_squared() == 0.0 {
        player.facing = INITIAL_FACING;
    }
}
