use nightswarm::config::{self, UpgradeId, UPGRADES};
use nightswarm::systems::{add_experience, apply_upgrade, generate_offer, upgrade_level, UpgradeChoice};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

#[test]
fn test_experience_rollover_carries_remainder() {
    // 90/100 + 30 -> exactly one level, 20 carried, threshold grows 20%.
    let mut player = common::test_player();
    player.experience = 90.0;

    let levels = add_experience(&mut player, 30.0);

    assert_that(&levels).is_equal_to(1);
    assert_that(&player.level).is_equal_to(2);
    assert_that(&player.experience).is_equal_to(20.0);
    assert_that(&player.experience_to_next).is_close_to(120.0, 1e-3);
}

#[test]
fn test_experience_can_cross_multiple_levels() {
    let mut player = common::test_player();

    // 100 + 120 + 30 = 250 spent across two crossings.
    let levels = add_experience(&mut player, 250.0);

    assert_that(&levels).is_equal_to(2);
    assert_that(&player.level).is_equal_to(3);
    assert_that(&player.experience).is_close_to(30.0, 1e-3);
    assert_that(&player.experience_to_next).is_close_to(144.0, 1e-3);
}

#[test]
fn test_experience_below_threshold_no_level() {
    let mut player = common::test_player();
    let levels = add_experience(&mut player, 99.0);
    assert_that(&levels).is_equal_to(0);
    assert_that(&player.level).is_equal_to(1);
    assert_that(&player.experience).is_equal_to(99.0);
}

#[test]
fn test_upgrade_cap_is_enforced() {
    let mut player = common::test_player();
    let definition = config::upgrade(UpgradeId::Might);

    for _ in 0..definition.max_level + 3 {
        apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::Might));
    }

    assert_that(&upgrade_level(&player, UpgradeId::Might)).is_equal_to(definition.max_level);
}

#[test]
fn test_one_time_upgrade_applies_once() {
    let mut player = common::test_player();
    let before = player.projectile_count;

    assert_that(&apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::SplitShot))).is_true();
    assert_that(&apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::SplitShot))).is_false();

    assert_that(&player.projectile_count).is_equal_to(before + 1);
}

#[test]
fn test_upgrade_effects_are_table_driven() {
    let mut player = common::test_player();
    let base_speed = player.speed;
    let base_power = player.power;
    let base_max = player.max_health;

    apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::Swiftness));
    apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::Might));
    apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::Vigor));

    assert_that(&player.speed).is_equal_to(base_speed * 1.1);
    assert_that(&player.power).is_equal_to(base_power * 1.2);
    assert_that(&player.max_health).is_equal_to(base_max + 20.0);
    // Max-health upgrades heal what they add.
    assert_that(&player.health).is_equal_to(base_max + 20.0);
    assert_that(&player.upgrades.len()).is_equal_to(3);
}

#[test]
fn test_offer_excludes_maxed_upgrades() {
    let mut player = common::test_player();
    let mut rng = SmallRng::seed_from_u64(3);

    let definition = config::upgrade(UpgradeId::Might);
    for _ in 0..definition.max_level {
        apply_upgrade(&mut player, UpgradeChoice::Upgrade(UpgradeId::Might));
    }

    for _ in 0..50 {
        let offer = generate_offer(&player, &mut rng);
        assert_that(&offer.len()).is_equal_to(3);
        assert_that(&offer.contains(&UpgradeChoice::Upgrade(UpgradeId::Might))).is_false();
    }
}

#[test]
fn test_offer_degrades_to_generic_boost_when_exhausted() {
    let mut player = common::test_player();
    let mut rng = SmallRng::seed_from_u64(3);

    for definition in UPGRADES {
        for _ in 0..definition.max_level {
            apply_upgrade(&mut player, UpgradeChoice::Upgrade(definition.id));
        }
    }

    let offer = generate_offer(&player, &mut rng);
    assert_that(&offer.len()).is_equal_to(1);
    assert_that(&offer[0]).is_equal_to(UpgradeChoice::GenericBoost);

    // The fallback still does something useful.
    let power = player.power;
    assert_that(&apply_upgrade(&mut player, UpgradeChoice::GenericBoost)).is_true();
    assert_that(&(player.power > power)).is_true();
}

#[test]
fn test_offer_is_at_most_three_distinct_choices() {
    let player = common::test_player();
    let mut rng = SmallRng::seed_from_u64(11);

    for _ in 0..50 {
        let offer = generate_offer(&player, &mut rng);
        assert_that(&offer.len()).is_equal_to(3);
        let mut seen = offer.to_vec();
        seen.dedup_by(|a, b| a == b);
        assert_that(&seen.len()).is_equal_to(3);
    }
}
