//! Fixed seed dataset. Every call builds fresh values; nothing is shared
//! between the canonical seed and live state.

use super::state::{LeaderboardEntry, Player, Pose, Upgrade, UpgradeEffect};
use crate::host::PlayerIdentity;

pub const SEED_PLAYER_ID: u64 = 1;
pub const SEED_PLAYER_NAME: &str = "Yogini";

fn pose(id: u32, name: &str, description: &str, energy_per_click: u64, price: u64) -> Pose {
    Pose {
        id,
        name: name.into(),
        description: description.into(),
        energy_per_click,
        price,
        level: id,
        unlocked: id == 1,
    }
}

fn upgrade(
    id: u32,
    name: &str,
    description: &str,
    effect: UpgradeEffect,
    price: u64,
    required_energy: u64,
) -> Upgrade {
    Upgrade {
        id,
        name: name.into(),
        description: description.into(),
        effect,
        price,
        purchased: false,
        required_energy,
    }
}

pub fn seed_poses() -> Vec<Pose> {
    vec![
        pose(
            1,
            "Mountain Pose",
            "The foundation of all standing poses, mountain pose teaches the basics of alignment and posture.",
            1,
            0,
        ),
        pose(
            2,
            "Downward Dog",
            "An active stretch that strengthens and restores your body.",
            2,
            50,
        ),
        pose(
            3,
            "Warrior I",
            "A powerful standing pose that builds strength and confidence.",
            5,
            200,
        ),
        pose(
            4,
            "Tree Pose",
            "Improves balance, focus, and mental clarity while strengthening your legs.",
            10,
            500,
        ),
        pose(
            5,
            "Crow Pose",
            "An arm balance that builds core strength and improves focus.",
            25,
            1000,
        ),
    ]
}

pub fn seed_upgrades() -> Vec<Upgrade> {
    vec![
        upgrade(
            1,
            "Yoga Mat",
            "A basic yoga mat increases your click power by 2x.",
            UpgradeEffect::Multiplier(2.0),
            100,
            50,
        ),
        upgrade(
            2,
            "Meditation Cushion",
            "Generates 1 energy per second passively.",
            UpgradeEffect::AutoClick(1),
            250,
            200,
        ),
        upgrade(
            3,
            "Yoga Blocks",
            "Support for advanced poses. Increases click power by 3x.",
            UpgradeEffect::Multiplier(3.0),
            500,
            400,
        ),
        upgrade(
            4,
            "Zen Garden",
            "A peaceful sanctuary that generates 5 energy per second.",
            UpgradeEffect::AutoClick(5),
            1000,
            800,
        ),
        upgrade(
            5,
            "Enlightenment",
            "Achieve spiritual enlightenment. All energy gains are multiplied by 10x.",
            UpgradeEffect::Multiplier(10.0),
            5000,
            4000,
        ),
    ]
}

pub fn seed_player() -> Player {
    Player {
        id: SEED_PLAYER_ID,
        name: SEED_PLAYER_NAME.into(),
        energy: 0,
        total_energy: 0,
        click_power: 1.0,
        auto_click_power: 0,
        level: 1,
        experience: 0,
        poses: seed_poses(),
        upgrades: seed_upgrades(),
        joined_at_ms: 0.0,
        last_active_ms: 0.0,
    }
}

pub fn seed_leaderboard() -> Vec<LeaderboardEntry> {
    [
        (2, "ZenMaster", 9876, 10),
        (3, "NamastePro", 8765, 9),
        (4, "OmShanti", 7654, 8),
        (5, "YogaGuru", 6543, 7),
        (6, "FlexibleFriend", 5432, 6),
        (7, "PeacefulWarrior", 4321, 5),
        (8, "BreatheMaster", 3210, 4),
        (9, "BalanceQueen", 2109, 3),
        (10, "MindfulMover", 1098, 2),
        (SEED_PLAYER_ID, SEED_PLAYER_NAME, 0, 1),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, energy, level))| LeaderboardEntry {
        id,
        name: name.into(),
        energy,
        level,
        rank: i as u32 + 1,
    })
    .collect()
}

/// The canonical reset target held by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Seed {
    pub player: Player,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Default for Seed {
    fn default() -> Self {
        Self::new()
    }
}

impl Seed {
    pub fn new() -> Self {
        Self {
            player: seed_player(),
            leaderboard: seed_leaderboard(),
        }
    }

    /// Seed for a host-supplied identity: the player and the player's own
    /// leaderboard row take the host's name, and its id unless another row
    /// already uses it. Board ids stay unique either way.
    pub fn for_identity(identity: &PlayerIdentity) -> Self {
        let mut seed = Self::new();
        let seed_id = seed.player.id;
        let taken = seed
            .leaderboard
            .iter()
            .any(|e| e.id == identity.id && e.id != seed_id);
        let id = if taken {
            log::warn!("host id {} collides with a leaderboard row; keeping id {}", identity.id, seed_id);
            seed_id
        } else {
            identity.id
        };
        if let Some(entry) = seed.leaderboard.iter_mut().find(|e| e.id == seed_id) {
            entry.id = id;
            entry.name = identity.name.clone();
        }
        seed.player.id = id;
        seed.player.name = identity.name.clone();
        seed
    }
}
