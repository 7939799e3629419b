//! Semantic action IDs for Kombat Yoga click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const TAP: u16 = 0;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_PRACTICE: u16 = 10;
pub const TAB_POSES: u16 = 11;
pub const TAB_UPGRADES: u16 = 12;
pub const TAB_LEADERBOARD: u16 = 13;
pub const TAB_SETTINGS: u16 = 14;

// ── Pose purchase (base + pose id) ──────────────────────────────
pub const BUY_POSE_BASE: u16 = 100;

// ── Upgrade purchase (base + upgrade id) ────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 200;
/// Show the next upgrade's description.
pub const CYCLE_UPGRADE_INFO: u16 = 300;

// ── Settings ────────────────────────────────────────────────────
pub const REQUEST_RESET: u16 = 500;
pub const CONFIRM_RESET: u16 = 501;
pub const CANCEL_RESET: u16 = 502;
