mod config;
mod host;
mod input;
mod time;
mod widgets;
mod yoga;

use std::{cell::RefCell, io, rc::Rc};

use config::EngineConfig;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use web_sys::wasm_bindgen::{closure::Closure, JsCast};
use yoga::YogaGame;

/// Global the embedding page may set to a JSON object of engine overrides.
const CONFIG_GLOBAL: &str = "KOMBAT_YOGA_CONFIG";
/// Global the game writes its JSON snapshot to after each player action.
const STATE_GLOBAL: &str = "KOMBAT_YOGA_STATE";

/// Milliseconds from the page's monotonic clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Engine settings from the page, falling back to defaults on any problem.
fn load_config() -> EngineConfig {
    let Some(window) = web_sys::window() else {
        return EngineConfig::default();
    };
    let raw = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into())
        .ok()
        .and_then(|v| v.as_string());
    let Some(raw) = raw else {
        return EngineConfig::default();
    };
    match EngineConfig::from_json(&raw) {
        Ok(config) => {
            log::info!("loaded engine config from {}", CONFIG_GLOBAL);
            config
        }
        Err(e) => {
            log::warn!("ignoring {}: {}", CONFIG_GLOBAL, e);
            EngineConfig::default()
        }
    }
}

/// Expose the current state to the embedding page as a JSON string.
fn publish_snapshot(game: &YogaGame) {
    let Some(window) = web_sys::window() else {
        return;
    };
    match game.engine.snapshot_json() {
        Ok(json) => {
            if js_sys::Reflect::set(&window, &STATE_GLOBAL.into(), &json.into()).is_err() {
                log::warn!("could not publish {}", STATE_GLOBAL);
            }
        }
        Err(e) => log::warn!("snapshot serialization failed: {}", e),
    }
}

/// Stop passive generation while the page is hidden or unloading, and
/// resume it when a cached page is shown again.
fn register_page_lifecycle(game: &Rc<RefCell<YogaGame>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let on_hide = Closure::<dyn FnMut()>::new({
        let game = game.clone();
        move || {
            let mut game = game.borrow_mut();
            game.engine.shutdown();
            publish_snapshot(&game);
        }
    });
    let on_show = Closure::<dyn FnMut()>::new({
        let game = game.clone();
        move || game.borrow_mut().engine.initialize(now_ms())
    });

    for (event, handler) in [("pagehide", on_hide), ("pageshow", on_show)] {
        if window
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("could not listen for {}", event);
        }
        // Listeners live as long as the page.
        handler.forget();
    }
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {}", e).into());
        }
    }
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    log::debug!("click: col={}, row={}, targets={}", col, row, cs.targets.len());
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let identity = host::current_identity();
    let mut game = YogaGame::new(load_config(), identity.as_ref());
    game.engine.initialize(now_ms());

    let game = Rc::new(RefCell::new(game));
    register_page_lifecycle(&game);
    publish_snapshot(&game.borrow());
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch tap handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = action {
                let mut game = game.borrow_mut();
                if game.handle_input(&InputEvent::Click(action_id), now_ms()) {
                    publish_snapshot(&game);
                }
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c.to_ascii_lowercase(),
                KeyCode::Enter => ' ',
                KeyCode::Tab => 't',
                KeyCode::Esc => 'n',
                _ => return,
            };
            let mut game = game.borrow_mut();
            if game.handle_input(&InputEvent::Key(key), now_ms()) {
                publish_snapshot(&game);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let mut game = game.borrow_mut();
            game.tick(now_ms());
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
