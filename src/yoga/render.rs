//! Kombat Yoga rendering.
//!
//! Layout: status header + tab bar + tab content + notification log.
//! Every `[X]` hint is registered as a click target so mobile taps work
//! the same as the keyboard.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::format_number;
use super::notify::Severity;
use super::state::{Player, UpgradeEffect};
use super::{Tab, YogaGame};

/// Figure for the tap zone; the second frame shows while a tap is fresh.
const FIGURE: [&str; 3] = ["  o  ", " /|\\ ", " / \\ "];
const FIGURE_TAP: [&str; 3] = [" \\o/ ", "  |  ", " / \\ "];

pub fn render(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let narrow = is_narrow_layout(area.width);
    let log_height = if narrow { 4 } else { 5 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // header
            Constraint::Length(3),          // tabs
            Constraint::Min(8),             // content
            Constraint::Length(log_height), // notifications
            Constraint::Length(1),          // help
        ])
        .split(area);

    render_header(game.engine.player(), f, chunks[0], narrow);
    render_tab_bar(game, f, chunks[1], click_state);
    match game.tab {
        Tab::Practice => render_practice(game, f, chunks[2], click_state),
        Tab::Poses => render_poses(game, f, chunks[2], click_state),
        Tab::Upgrades => render_upgrades(game, f, chunks[2], click_state),
        Tab::Leaderboard => render_leaderboard(game, f, chunks[2]),
        Tab::Settings => render_settings(game, f, chunks[2], click_state),
    }
    render_notifications(game, f, chunks[3]);
    render_help(game, f, chunks[4]);
}

// ── Helpers ─────────────────────────────────────────────────

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) { Borders::TOP | Borders::BOTTOM } else { Borders::ALL }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    "█".repeat(filled) + &"░".repeat(empty)
}

/// Keyboard letter for an upgrade id (1 → 'a').
fn upgrade_key(id: u32) -> Option<char> {
    (1..=5).contains(&id).then(|| (b'a' + (id - 1) as u8) as char)
}

fn pose_key(id: u32) -> Option<char> {
    (1..=5).contains(&id).then(|| (b'0' + id as u8) as char)
}

fn key_hint(key: Option<char>) -> String {
    match key {
        Some(c) => format!(" [{}] ", c),
        None => "     ".to_string(),
    }
}

// ── Header ──────────────────────────────────────────────────

fn render_header(player: &Player, f: &mut Frame, area: Rect, narrow: bool) {
    let mut spans = vec![
        Span::styled(
            format!(" ⚡ {}", format_number(player.energy)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  Lv.{}", player.level), Style::default().fg(Color::Cyan)),
    ];
    if !narrow {
        spans.push(Span::styled(
            format!("  total {}", format_number(player.total_energy)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            format!(" Kombat Yoga · {} ", player.name),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

// ── Tabs ────────────────────────────────────────────────────

fn render_tab_bar(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut bar = TabBar::new("│");
    for tab in Tab::all() {
        let style = if *tab == game.tab {
            Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        bar = bar.tab(tab.name(), style, tab.action());
    }
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray));

    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

// ── Practice ────────────────────────────────────────────────

fn render_practice(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let player = game.engine.player();
    let per_level = game.engine.config().exp_per_level;
    let flashing = game.tap_flash > 0;

    let pose_name = player.active_pose().map(|p| p.name.as_str()).unwrap_or("-");
    let per_tap = player
        .active_pose()
        .map(|p| (p.energy_per_click as f64 * player.click_power).round() as u64)
        .unwrap_or(0);

    let figure = if flashing { FIGURE_TAP } else { FIGURE };
    let figure_style = if flashing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let mut lines = vec![Line::from("")];
    for row in figure {
        lines.push(Line::from(Span::styled(format!("      {}", row), figure_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Pose: ", Style::default().fg(Color::Gray)),
        Span::styled(pose_name.to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!(" +{} per tap", format_number(per_tap)), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  ×{}", player.click_power), Style::default().fg(Color::DarkGray)),
    ]));
    if player.auto_click_power > 0 {
        lines.push(Line::from(Span::styled(
            format!(" +{} per second", format_number(player.auto_click_power)),
            Style::default().fg(Color::Green),
        )));
    }

    let bar_width = if is_narrow_layout(area.width) { 14 } else { 24 };
    lines.push(Line::from(vec![
        Span::styled(" Lv ", Style::default().fg(Color::Gray)),
        Span::styled(progress_bar(player.exp_progress(per_level), bar_width), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {}/{}", player.experience, player.required_exp(per_level)),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " [c] Tap to breathe in energy",
        Style::default().fg(Color::DarkGray),
    )));

    let border_color = if flashing { Color::Yellow } else { Color::Magenta };
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(border_color))
        .title(" Practice ");
    f.render_widget(Paragraph::new(lines).block(block), area);

    // The whole panel is the tap zone
    click_state.borrow_mut().add_click_target(area, TAP);
}

// ── Poses ───────────────────────────────────────────────────

fn render_poses(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let player = game.engine.player();
    let narrow = is_narrow_layout(area.width);

    let mut cl = ClickableList::new();
    for pose in &player.poses {
        let affordable = player.energy >= pose.price;
        let (status, status_style) = if pose.unlocked {
            ("active".to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else if affordable {
            (format!("{} ⚡", format_number(pose.price)), Style::default().fg(Color::Yellow))
        } else {
            (format!("{} ⚡", format_number(pose.price)), Style::default().fg(Color::DarkGray))
        };
        let name_style = if pose.unlocked || affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(key_hint(pose_key(pose.id)), Style::default().fg(Color::Magenta)),
            Span::styled(pose.name.clone(), name_style),
            Span::styled(format!("  +{}/tap  ", pose.energy_per_click), Style::default().fg(Color::Cyan)),
            Span::styled(status, status_style),
        ];
        if !narrow {
            spans.push(Span::styled(format!("  Lv.{}", pose.level), Style::default().fg(Color::DarkGray)));
        }
        cl.push_clickable(Line::from(spans), BUY_POSE_BASE + pose.id as u16);
    }

    // Description of the active pose under the list
    if let Some(active) = player.active_pose() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!(" {}", active.description),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Poses ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Upgrades ────────────────────────────────────────────────

fn render_upgrades(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let player = game.engine.player();
    let narrow = is_narrow_layout(area.width);

    let mut cl = ClickableList::new();
    for upgrade in &player.upgrades {
        let affordable = player.energy >= upgrade.price;
        let (status, status_style) = if upgrade.purchased {
            ("owned".to_string(), Style::default().fg(Color::Green))
        } else if affordable {
            (format!("{} ⚡", format_number(upgrade.price)), Style::default().fg(Color::Yellow))
        } else {
            (format!("{} ⚡", format_number(upgrade.price)), Style::default().fg(Color::DarkGray))
        };
        let effect_color = match upgrade.effect {
            UpgradeEffect::Multiplier(_) => Color::Magenta,
            UpgradeEffect::AutoClick(_) => Color::Green,
            UpgradeEffect::Passive(_) => Color::Blue,
        };

        let mut spans = vec![
            Span::styled(key_hint(upgrade_key(upgrade.id)), Style::default().fg(Color::Magenta)),
            Span::styled(
                upgrade.name.clone(),
                if upgrade.purchased {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
            Span::styled(format!("  {}  ", upgrade.effect.label()), Style::default().fg(effect_color)),
            Span::styled(status, status_style),
        ];
        if !narrow && !upgrade.purchased {
            spans.push(Span::styled(
                format!("  needs {}", format_number(upgrade.required_energy)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        cl.push_clickable(Line::from(spans), BUY_UPGRADE_BASE + upgrade.id as u16);
        if game.info_upgrade == Some(upgrade.id) {
            cl.push(Line::from(Span::styled(
                format!("      {}", upgrade.description),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [i] Details", Style::default().fg(Color::DarkGray))),
        CYCLE_UPGRADE_INFO,
    );

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Shop ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Leaderboard ─────────────────────────────────────────────

fn render_leaderboard(game: &YogaGame, f: &mut Frame, area: Rect) {
    let me = game.engine.player().id;
    let name_width = if is_narrow_layout(area.width) { 12 } else { 18 };

    let lines: Vec<Line> = game
        .engine
        .leaderboard()
        .iter()
        .map(|entry| {
            let medal = match entry.rank {
                1 => "🥇",
                2 => "🥈",
                3 => "🥉",
                _ => "  ",
            };
            let style = if entry.id == me {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let name: String = entry.name.chars().take(name_width).collect();
            Line::from(Span::styled(
                format!(
                    " {:>2} {} {:<width$} {:>8}  Lv.{}",
                    entry.rank,
                    medal,
                    name,
                    format_number(entry.energy),
                    entry.level,
                    width = name_width
                ),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Green))
        .title(" Leaderboard ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Settings ────────────────────────────────────────────────

fn render_settings(game: &YogaGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let player = game.engine.player();

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(" Player  ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{} (#{})", player.name, player.id), Style::default().fg(Color::White)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Session ", Style::default().fg(Color::Gray)),
        Span::styled(
            if game.engine.state().is_initialized { "active" } else { "starting" },
            Style::default().fg(Color::White),
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Passive ", Style::default().fg(Color::Gray)),
        Span::styled(
            if game.engine.is_generating() { "running" } else { "stopped" },
            Style::default().fg(Color::Green),
        ),
    ]));
    cl.push(Line::from(""));

    if game.confirm_reset {
        cl.push(Line::from(Span::styled(
            " Reset all progress? This cannot be undone.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        cl.push_clickable(
            Line::from(Span::styled(" [y] Yes, start over", Style::default().fg(Color::Red))),
            CONFIRM_RESET,
        );
        cl.push_clickable(
            Line::from(Span::styled(" [n] Keep my progress", Style::default().fg(Color::Green))),
            CANCEL_RESET,
        );
    } else {
        cl.push_clickable(
            Line::from(Span::styled(" [r] Reset progress", Style::default().fg(Color::Red))),
            REQUEST_RESET,
        );
    }

    let border_color = if game.confirm_reset { Color::Red } else { Color::DarkGray };
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(border_color))
        .title(" Settings ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Notifications ───────────────────────────────────────────

fn render_notifications(game: &YogaGame, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let notifications = game.engine.notifications();
    let start = notifications.len().saturating_sub(visible);

    let lines: Vec<Line> = notifications[start..]
        .iter()
        .rev()
        .map(|n| {
            let color = match n.severity {
                Severity::Normal => Color::Green,
                Severity::Destructive => Color::Red,
            };
            Line::from(vec![
                Span::styled(format!(" {} ", n.title), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(n.description.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_help(game: &YogaGame, f: &mut Frame, area: Rect) {
    let text = match game.tab {
        _ if game.confirm_reset => " y confirm · n cancel",
        Tab::Poses => " space tap · 1-5 unlock · t next tab",
        Tab::Upgrades => " space tap · a-e buy · i details · t next tab",
        _ => " space tap · t next tab · r reset",
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))),
        area,
    );
}
