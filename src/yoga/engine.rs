//! The progression engine: owns the game state and applies the four player
//! actions plus the passive generation tick.
//!
//! Every public operation is one synchronous transition. After each one the
//! engine settles derived state (levels, leaderboard) before returning, so a
//! caller never observes a half-applied change.

use super::error::{ItemKind, PurchaseError};
use super::logic;
use super::notify::Notification;
use super::seed::Seed;
use super::state::{GameState, LeaderboardEntry, Player};
use crate::config::EngineConfig;
use crate::host::PlayerIdentity;
use crate::time::AutoGenTimer;

pub struct ProgressionEngine {
    state: GameState,
    /// Reset target. Only ever cloned from, never handed out mutably.
    seed: Seed,
    config: EngineConfig,
    timer: AutoGenTimer,
    last_tap_ms: Option<f64>,
    notifications: Vec<Notification>,
}

impl ProgressionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_seed(config, Seed::new())
    }

    /// Engine whose player is the host-supplied user.
    pub fn with_identity(config: EngineConfig, identity: &PlayerIdentity) -> Self {
        Self::from_seed(config, Seed::for_identity(identity))
    }

    fn from_seed(config: EngineConfig, seed: Seed) -> Self {
        let timer = AutoGenTimer::new(config.auto_gen_interval_ms);
        Self {
            state: GameState {
                player: seed.player.clone(),
                leaderboard: seed.leaderboard.clone(),
                is_initialized: false,
            },
            seed,
            config,
            timer,
            last_tap_ms: None,
            notifications: Vec::new(),
        }
    }

    /// Activate the engine and start passive generation. Until this runs,
    /// every player action is ignored.
    pub fn initialize(&mut self, now_ms: f64) {
        if !self.state.is_initialized {
            self.seed.player.joined_at_ms = now_ms;
            self.seed.player.last_active_ms = now_ms;
            self.state.player.joined_at_ms = now_ms;
            self.state.player.last_active_ms = now_ms;
            self.state.is_initialized = true;
            logic::rerank(&mut self.state.leaderboard, &self.state.player);
            log::info!(
                "engine initialized for player {} ({})",
                self.state.player.name,
                self.state.player.id
            );
        }
        if !self.timer.is_running() {
            self.timer.start(now_ms);
        }
    }

    /// Stop passive generation. No tick fires until `initialize` runs again.
    pub fn shutdown(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            log::info!("auto-generation stopped");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized
    }

    pub fn is_generating(&self) -> bool {
        self.timer.is_running()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only snapshot for the presentation layer.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.state.leaderboard
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Tap for energy. Returns the energy gained (0 before initialization).
    pub fn tap(&mut self, now_ms: f64) -> u64 {
        if !self.state.is_initialized {
            return 0;
        }
        let burst = logic::burst_multiplier(
            self.last_tap_ms,
            now_ms,
            self.config.burst_window_ms,
            self.config.burst_multiplier,
        );
        self.last_tap_ms = Some(now_ms);

        let player = &mut self.state.player;
        let gain = logic::tap_gain(player, burst);
        logic::apply_gain(player, gain);
        player.last_active_ms = now_ms;
        self.settle();
        gain
    }

    /// One passive-generation interval.
    pub fn auto_generation_tick(&mut self) {
        if !self.state.is_initialized {
            return;
        }
        let amount = self.state.player.auto_click_power;
        if amount == 0 {
            return;
        }
        logic::apply_gain(&mut self.state.player, amount);
        self.settle();
    }

    /// Feed the frame clock; runs one tick per elapsed interval.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let ticks = self.timer.update(now_ms);
        for _ in 0..ticks {
            self.auto_generation_tick();
        }
        ticks
    }

    /// Unlock a pose, making it the only active one.
    ///
    /// `Ok(false)` means the call was ignored (not initialized, unknown id).
    pub fn buy_pose(&mut self, pose_id: u32) -> Result<bool, PurchaseError> {
        if !self.state.is_initialized {
            return Ok(false);
        }
        let Some(pose) = self.state.player.pose(pose_id) else {
            return Ok(false);
        };
        let name = pose.name.clone();
        let price = pose.price;
        if pose.unlocked {
            return self.reject(PurchaseError::AlreadyOwned {
                kind: ItemKind::Pose,
                name,
            });
        }
        let energy = self.state.player.energy;
        if energy < price {
            return self.reject(PurchaseError::InsufficientEnergy {
                kind: ItemKind::Pose,
                name,
                shortfall: price - energy,
            });
        }

        let player = &mut self.state.player;
        player.energy -= price;
        logic::activate_pose(player, pose_id);
        log::info!("pose unlocked: {} for {} energy", name, price);
        self.notify(Notification::pose_unlocked(&name));
        self.settle();
        Ok(true)
    }

    /// Purchase an upgrade and apply its effect.
    ///
    /// `Ok(false)` means the call was ignored (not initialized, unknown id).
    pub fn buy_upgrade(&mut self, upgrade_id: u32) -> Result<bool, PurchaseError> {
        if !self.state.is_initialized {
            return Ok(false);
        }
        let Some(upgrade) = self.state.player.upgrade(upgrade_id) else {
            return Ok(false);
        };
        let name = upgrade.name.clone();
        let price = upgrade.price;
        if upgrade.purchased {
            return self.reject(PurchaseError::AlreadyOwned {
                kind: ItemKind::Upgrade,
                name,
            });
        }
        let energy = self.state.player.energy;
        if energy < price {
            return self.reject(PurchaseError::InsufficientEnergy {
                kind: ItemKind::Upgrade,
                name,
                shortfall: price - energy,
            });
        }

        let player = &mut self.state.player;
        player.energy -= price;
        let effect = logic::mark_purchased(player, upgrade_id);
        if let Some(effect) = &effect {
            logic::apply_effect(player, effect);
        }
        let effect = effect.map(|e| e.label()).unwrap_or_default();
        log::info!("upgrade purchased: {} ({})", name, effect);
        self.notify(Notification::upgrade_purchased(&name));
        self.settle();
        Ok(true)
    }

    /// Restore the seed. Always succeeds, initialized or not.
    pub fn reset(&mut self) {
        self.state.player = self.seed.player.clone();
        self.state.leaderboard = self.seed.leaderboard.clone();
        self.last_tap_ms = None;
        log::info!("game reset");
        self.notify(Notification::game_reset());
    }

    fn reject(&mut self, err: PurchaseError) -> Result<bool, PurchaseError> {
        log::debug!("purchase rejected: {}", err);
        self.notify(Notification::rejected(&err));
        Err(err)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
        let limit = self.config.notification_limit.max(1);
        if self.notifications.len() > limit {
            let excess = self.notifications.len() - limit;
            self.notifications.drain(..excess);
        }
    }

    /// Bring derived state in line with the player: levels first, then the
    /// player's leaderboard row and ranks.
    fn settle(&mut self) {
        let reached = logic::apply_level_ups(&mut self.state.player, self.config.exp_per_level);
        for level in reached {
            log::info!("level up: {} reached level {}", self.state.player.name, level);
            self.notify(Notification::level_up(level));
        }
        logic::rerank(&mut self.state.leaderboard, &self.state.player);
    }
}
