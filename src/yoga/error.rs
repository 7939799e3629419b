//! Purchase rejections. Both kinds are advisory: state is left untouched and
//! the player sees a notification built from the `Display` text.

use thiserror::Error;

/// Which catalog a purchase targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Pose,
    Upgrade,
}

impl ItemKind {
    fn owned_verb(self) -> &'static str {
        match self {
            ItemKind::Pose => "unlocked",
            ItemKind::Upgrade => "purchased",
        }
    }

    fn buy_verb(self) -> &'static str {
        match self {
            ItemKind::Pose => "unlock",
            ItemKind::Upgrade => "purchase",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("You've already {} {}!", .kind.owned_verb(), .name)]
    AlreadyOwned { kind: ItemKind, name: String },
    #[error("You need {} more energy to {} {}!", .shortfall, .kind.buy_verb(), .name)]
    InsufficientEnergy {
        kind: ItemKind,
        name: String,
        /// `price - energy` at the time of the attempt.
        shortfall: u64,
    },
}

impl PurchaseError {
    pub fn kind(&self) -> ItemKind {
        match self {
            PurchaseError::AlreadyOwned { kind, .. } => *kind,
            PurchaseError::InsufficientEnergy { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_owned_messages() {
        let pose = PurchaseError::AlreadyOwned {
            kind: ItemKind::Pose,
            name: "Tree Pose".into(),
        };
        assert_eq!(pose.to_string(), "You've already unlocked Tree Pose!");
        let upgrade = PurchaseError::AlreadyOwned {
            kind: ItemKind::Upgrade,
            name: "Yoga Mat".into(),
        };
        assert_eq!(upgrade.to_string(), "You've already purchased Yoga Mat!");
    }

    #[test]
    fn insufficient_energy_reports_shortfall() {
        let err = PurchaseError::InsufficientEnergy {
            kind: ItemKind::Pose,
            name: "Downward Dog".into(),
            shortfall: 1,
        };
        assert_eq!(
            err.to_string(),
            "You need 1 more energy to unlock Downward Dog!"
        );
        assert_eq!(err.kind(), ItemKind::Pose);
    }
}
