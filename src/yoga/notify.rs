//! Toast-style notifications emitted by the engine.

use serde::Serialize;

use super::error::{ItemKind, PurchaseError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Normal,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NotificationKind {
    LevelUp { level: u32 },
    PoseUnlocked,
    PoseAlreadyUnlocked,
    PoseInsufficientFunds,
    UpgradePurchased,
    UpgradeAlreadyPurchased,
    UpgradeInsufficientFunds,
    GameReset,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notification {
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    fn normal(kind: NotificationKind, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            severity: Severity::Normal,
        }
    }

    pub fn level_up(level: u32) -> Self {
        Self::normal(
            NotificationKind::LevelUp { level },
            "Level Up!",
            format!("You've reached level {}!", level),
        )
    }

    pub fn pose_unlocked(name: &str) -> Self {
        Self::normal(
            NotificationKind::PoseUnlocked,
            "Pose Unlocked!",
            format!("You've unlocked {}!", name),
        )
    }

    pub fn upgrade_purchased(name: &str) -> Self {
        Self::normal(
            NotificationKind::UpgradePurchased,
            "Upgrade Purchased!",
            format!("You've purchased {}!", name),
        )
    }

    pub fn game_reset() -> Self {
        Self::normal(
            NotificationKind::GameReset,
            "Game Reset",
            "Your progress has been reset.".to_string(),
        )
    }

    pub fn rejected(err: &PurchaseError) -> Self {
        let (kind, title) = match (err, err.kind()) {
            (PurchaseError::AlreadyOwned { .. }, ItemKind::Pose) => {
                (NotificationKind::PoseAlreadyUnlocked, "Already Unlocked")
            }
            (PurchaseError::AlreadyOwned { .. }, ItemKind::Upgrade) => {
                (NotificationKind::UpgradeAlreadyPurchased, "Already Purchased")
            }
            (PurchaseError::InsufficientEnergy { .. }, ItemKind::Pose) => {
                (NotificationKind::PoseInsufficientFunds, "Not Enough Energy")
            }
            (PurchaseError::InsufficientEnergy { .. }, ItemKind::Upgrade) => {
                (NotificationKind::UpgradeInsufficientFunds, "Not Enough Energy")
            }
        };
        Self {
            kind,
            title: title.to_string(),
            description: err.to_string(),
            severity: Severity::Destructive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_text() {
        let n = Notification::level_up(3);
        assert_eq!(n.title, "Level Up!");
        assert_eq!(n.description, "You've reached level 3!");
        assert_eq!(n.severity, Severity::Normal);
        assert_eq!(n.kind, NotificationKind::LevelUp { level: 3 });
    }

    #[test]
    fn rejections_are_destructive() {
        let err = PurchaseError::InsufficientEnergy {
            kind: ItemKind::Upgrade,
            name: "Zen Garden".into(),
            shortfall: 400,
        };
        let n = Notification::rejected(&err);
        assert_eq!(n.kind, NotificationKind::UpgradeInsufficientFunds);
        assert_eq!(n.title, "Not Enough Energy");
        assert_eq!(n.description, "You need 400 more energy to purchase Zen Garden!");
        assert_eq!(n.severity, Severity::Destructive);
    }

    #[test]
    fn already_owned_pose_maps_to_pose_kind() {
        let err = PurchaseError::AlreadyOwned {
            kind: ItemKind::Pose,
            name: "Mountain Pose".into(),
        };
        let n = Notification::rejected(&err);
        assert_eq!(n.kind, NotificationKind::PoseAlreadyUnlocked);
        assert_eq!(n.title, "Already Unlocked");
    }

    #[test]
    fn serializes_flat_for_the_host() {
        let json = serde_json::to_value(Notification::level_up(2)).unwrap();
        assert_eq!(json["kind"], "levelUp");
        assert_eq!(json["level"], 2);
        assert_eq!(json["severity"], "normal");
    }
}
