//! Kombat Yoga: tap for energy, unlock poses, buy upgrades, climb the board.

pub mod actions;
pub mod engine;
pub mod error;
pub mod logic;
pub mod notify;
pub mod render;
pub mod seed;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::EngineConfig;
use crate::host::PlayerIdentity;
use crate::input::{ClickState, InputEvent};

use engine::ProgressionEngine;

/// Screens of the mini-app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Practice,
    Poses,
    Upgrades,
    Leaderboard,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Practice,
            Tab::Poses,
            Tab::Upgrades,
            Tab::Leaderboard,
            Tab::Settings,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Practice => "Practice",
            Tab::Poses => "Poses",
            Tab::Upgrades => "Shop",
            Tab::Leaderboard => "Ranks",
            Tab::Settings => "Settings",
        }
    }

    pub fn action(self) -> u16 {
        match self {
            Tab::Practice => actions::TAB_PRACTICE,
            Tab::Poses => actions::TAB_POSES,
            Tab::Upgrades => actions::TAB_UPGRADES,
            Tab::Leaderboard => actions::TAB_LEADERBOARD,
            Tab::Settings => actions::TAB_SETTINGS,
        }
    }

    fn next(self) -> Tab {
        let all = Tab::all();
        let i = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}

/// Presentation adapter: screen state plus the engine it drives.
pub struct YogaGame {
    pub engine: ProgressionEngine,
    pub tab: Tab,
    /// Reset asks for confirmation before wiping progress.
    pub confirm_reset: bool,
    /// Frames left on the tap highlight.
    pub tap_flash: u32,
    /// Upgrade whose description the shop shows.
    pub info_upgrade: Option<u32>,
}

impl YogaGame {
    pub fn new(config: EngineConfig, identity: Option<&PlayerIdentity>) -> Self {
        let engine = match identity {
            Some(identity) => ProgressionEngine::with_identity(config, identity),
            None => ProgressionEngine::new(config),
        };
        Self {
            engine,
            tab: Tab::Practice,
            confirm_reset: false,
            tap_flash: 0,
            info_upgrade: None,
        }
    }

    /// Dispatch an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, now_ms),
            InputEvent::Click(id) => self.handle_click(*id, now_ms),
        }
    }

    fn handle_key(&mut self, key: char, now_ms: f64) -> bool {
        if self.confirm_reset {
            return match key {
                'y' => self.handle_click(actions::CONFIRM_RESET, now_ms),
                'n' => self.handle_click(actions::CANCEL_RESET, now_ms),
                _ => false,
            };
        }
        match key {
            // Letters buy upgrades on the shop tab, so 'c' is a tap everywhere else
            'i' if self.tab == Tab::Upgrades => self.handle_click(actions::CYCLE_UPGRADE_INFO, now_ms),
            'a'..='e' if self.tab == Tab::Upgrades => {
                let id = key as u16 - 'a' as u16 + 1;
                self.handle_click(actions::BUY_UPGRADE_BASE + id, now_ms)
            }
            ' ' | 'c' => self.handle_click(actions::TAP, now_ms),
            't' => {
                self.tab = self.tab.next();
                true
            }
            'r' => self.handle_click(actions::REQUEST_RESET, now_ms),
            '1'..='5' if self.tab == Tab::Poses => {
                let id = key as u16 - '0' as u16;
                self.handle_click(actions::BUY_POSE_BASE + id, now_ms)
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16, now_ms: f64) -> bool {
        match action_id {
            actions::TAP => {
                self.engine.tap(now_ms);
                self.tap_flash = 6;
                true
            }
            actions::TAB_PRACTICE..=actions::TAB_SETTINGS => {
                if let Some(tab) = Tab::all().iter().find(|t| t.action() == action_id) {
                    self.tab = *tab;
                    self.confirm_reset = false;
                }
                true
            }
            id if (actions::BUY_POSE_BASE..actions::BUY_UPGRADE_BASE).contains(&id) => {
                // Rejections surface as notifications; nothing else to do here.
                let _ = self.engine.buy_pose((id - actions::BUY_POSE_BASE) as u32);
                true
            }
            id if (actions::BUY_UPGRADE_BASE..actions::CYCLE_UPGRADE_INFO).contains(&id) => {
                let upgrade_id = (id - actions::BUY_UPGRADE_BASE) as u32;
                if self.engine.player().upgrade(upgrade_id).is_some() {
                    self.info_upgrade = Some(upgrade_id);
                }
                let _ = self.engine.buy_upgrade(upgrade_id);
                true
            }
            actions::CYCLE_UPGRADE_INFO => {
                self.info_upgrade = self.next_info_upgrade();
                true
            }
            actions::REQUEST_RESET => {
                self.tab = Tab::Settings;
                self.confirm_reset = true;
                true
            }
            actions::CONFIRM_RESET if self.confirm_reset => {
                self.engine.reset();
                self.confirm_reset = false;
                true
            }
            actions::CANCEL_RESET => {
                self.confirm_reset = false;
                true
            }
            _ => false,
        }
    }

    /// Next upgrade in catalog order after the one shown; wraps to none.
    fn next_info_upgrade(&self) -> Option<u32> {
        let upgrades = &self.engine.player().upgrades;
        match self.info_upgrade {
            None => upgrades.first().map(|u| u.id),
            Some(current) => {
                let i = upgrades.iter().position(|u| u.id == current)?;
                upgrades.get(i + 1).map(|u| u.id)
            }
        }
    }

    /// Per-frame update: passive generation and animation counters.
    pub fn tick(&mut self, now_ms: f64) {
        self.engine.advance(now_ms);
        self.tap_flash = self.tap_flash.saturating_sub(1);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
