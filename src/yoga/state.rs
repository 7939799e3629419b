//! Kombat Yoga game state definitions.

use serde::Serialize;

/// A tap-multiplier tier. Exactly one pose is active at a time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub energy_per_click: u64,
    /// Energy cost to unlock.
    pub price: u64,
    /// Ordering hint for display.
    pub level: u32,
    pub unlocked: bool,
}

/// What an upgrade does once purchased.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum UpgradeEffect {
    /// Multiplies click power.
    Multiplier(f64),
    /// Adds flat energy per second.
    AutoClick(u64),
    /// Reserved; not wired to any state change.
    Passive(f64),
}

impl UpgradeEffect {
    /// Short label for the shop list.
    pub fn label(&self) -> String {
        match self {
            UpgradeEffect::Multiplier(v) => format!("x{} per tap", v),
            UpgradeEffect::AutoClick(v) => format!("+{}/s", v),
            UpgradeEffect::Passive(_) => "passive".to_string(),
        }
    }
}

/// A one-time permanent purchase.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub effect: UpgradeEffect,
    pub price: u64,
    pub purchased: bool,
    /// Display hint only; purchases are gated on `price` alone.
    pub required_energy: u64,
}

/// The player aggregate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u64,
    pub name: String,
    /// Spendable energy.
    pub energy: u64,
    /// Lifetime energy earned; never decreases.
    pub total_energy: u64,
    /// Multiplier applied to tap gains.
    pub click_power: f64,
    /// Flat energy per auto-generation tick.
    pub auto_click_power: u64,
    pub level: u32,
    /// Experience toward the next level; reset on level-up.
    pub experience: u64,
    pub poses: Vec<Pose>,
    pub upgrades: Vec<Upgrade>,
    pub joined_at_ms: f64,
    pub last_active_ms: f64,
}

impl Player {
    /// The first unlocked pose in catalog order, falling back to the first pose.
    pub fn active_pose(&self) -> Option<&Pose> {
        self.poses
            .iter()
            .find(|p| p.unlocked)
            .or_else(|| self.poses.first())
    }

    /// Experience needed to leave the current level.
    pub fn required_exp(&self, exp_per_level: u64) -> u64 {
        self.level as u64 * exp_per_level
    }

    /// Fraction of the way to the next level, in `0.0..=1.0`.
    pub fn exp_progress(&self, exp_per_level: u64) -> f64 {
        let required = self.required_exp(exp_per_level);
        if required == 0 {
            return 0.0;
        }
        (self.experience as f64 / required as f64).min(1.0)
    }

    pub fn pose(&self, id: u32) -> Option<&Pose> {
        self.poses.iter().find(|p| p.id == id)
    }

    pub fn upgrade(&self, id: u32) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }
}

/// A leaderboard row. `rank` is always recomputed, never assigned by hand.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: u64,
    pub name: String,
    pub energy: u64,
    pub level: u32,
    pub rank: u32,
}

/// Everything the presentation layer reads back after a mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: Player,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub is_initialized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yoga::seed;

    #[test]
    fn seed_active_pose_is_mountain() {
        let player = seed::seed_player();
        assert_eq!(player.active_pose().map(|p| p.id), Some(1));
    }

    #[test]
    fn active_pose_falls_back_to_first() {
        let mut player = seed::seed_player();
        for p in &mut player.poses {
            p.unlocked = false;
        }
        assert_eq!(player.active_pose().map(|p| p.id), Some(1));
    }

    #[test]
    fn active_pose_is_first_unlocked() {
        let mut player = seed::seed_player();
        player.poses[0].unlocked = false;
        player.poses[3].unlocked = true;
        assert_eq!(player.active_pose().map(|p| p.id), Some(4));
    }

    #[test]
    fn required_exp_scales_with_level() {
        let mut player = seed::seed_player();
        assert_eq!(player.required_exp(100), 100);
        player.level = 7;
        assert_eq!(player.required_exp(100), 700);
    }

    #[test]
    fn exp_progress_fraction() {
        let mut player = seed::seed_player();
        player.level = 2;
        player.experience = 50;
        assert!((player.exp_progress(100) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn lookup_by_id() {
        let player = seed::seed_player();
        assert_eq!(player.pose(3).map(|p| p.name.as_str()), Some("Warrior I"));
        assert_eq!(player.upgrade(5).map(|u| u.price), Some(5000));
        assert!(player.pose(99).is_none());
        assert!(player.upgrade(0).is_none());
    }

    #[test]
    fn effect_serializes_as_tagged_object() {
        let json = serde_json::to_string(&UpgradeEffect::AutoClick(5)).unwrap();
        assert_eq!(json, r#"{"type":"autoClick","value":5}"#);
        let json = serde_json::to_string(&UpgradeEffect::Multiplier(2.0)).unwrap();
        assert_eq!(json, r#"{"type":"multiplier","value":2.0}"#);
    }

    #[test]
    fn effect_labels() {
        assert_eq!(UpgradeEffect::Multiplier(3.0).label(), "x3 per tap");
        assert_eq!(UpgradeEffect::AutoClick(5).label(), "+5/s");
    }
}
