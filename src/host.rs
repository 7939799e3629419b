//! Host environment collaborator: who is playing.
//!
//! Inside the chat app the mini-app bridge exposes the signed-in user on
//! `window.Telegram.WebApp.initDataUnsafe.user`. Outside it (local browser,
//! tests) there is no bridge and the seed identity is kept.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerIdentity {
    pub id: u64,
    pub name: String,
}

pub trait HostIdentity {
    /// The current user, or `None` when the host cannot say.
    fn identity(&self) -> Option<PlayerIdentity>;
}

/// Fixed identity for local development and tests.
pub struct MockHost {
    identity: Option<PlayerIdentity>,
}

impl MockHost {
    #[cfg(test)]
    pub fn new() -> Self {
        Self {
            identity: Some(PlayerIdentity {
                id: 123_456_789,
                name: display_name("Mock", Some("User"), Some("mockuser")),
            }),
        }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl HostIdentity for MockHost {
    fn identity(&self) -> Option<PlayerIdentity> {
        self.identity.clone()
    }
}

/// Build a display name from the chat user's profile fields.
pub fn display_name(first: &str, last: Option<&str>, username: Option<&str>) -> String {
    let full = match last.map(str::trim).filter(|l| !l.is_empty()) {
        Some(last) => format!("{} {}", first.trim(), last),
        None => first.trim().to_string(),
    };
    if !full.is_empty() {
        return full;
    }
    username
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| u.to_string())
        .unwrap_or_else(|| "Player".to_string())
}

// The chat-app bridge, read through JS reflection.
#[cfg(target_arch = "wasm32")]
use web_sys::wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
pub struct ChatAppHost {
    web_app: js_sys::Object,
}

#[cfg(target_arch = "wasm32")]
impl ChatAppHost {
    /// Locate `window.Telegram.WebApp`; `None` outside the chat app.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let telegram = get(&window, "Telegram")?;
        let web_app = get(&telegram, "WebApp")?;
        Some(Self {
            web_app: web_app.into(),
        })
    }

    /// Tell the host the mini-app has finished loading.
    pub fn ready(&self) {
        if let Some(ready) = get(&self.web_app, "ready") {
            let f: js_sys::Function = ready.into();
            if let Err(e) = f.call0(&self.web_app) {
                log::warn!("host ready() failed: {:?}", e);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl HostIdentity for ChatAppHost {
    fn identity(&self) -> Option<PlayerIdentity> {
        let unsafe_data = get(&self.web_app, "initDataUnsafe")?;
        let user = get(&unsafe_data, "user")?;
        let id = get(&user, "id")?.as_f64()?;
        let first = get(&user, "first_name")
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let last = get(&user, "last_name").and_then(|v| v.as_string());
        let username = get(&user, "username").and_then(|v| v.as_string());
        Some(PlayerIdentity {
            id: id as u64,
            name: display_name(&first, last.as_deref(), username.as_deref()),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = js_sys::Reflect::get(target, &key.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Identity from the chat app when present, otherwise none.
pub fn current_identity() -> Option<PlayerIdentity> {
    #[cfg(target_arch = "wasm32")]
    {
        let host = ChatAppHost::detect()?;
        host.ready();
        host.identity()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        MockHost::anonymous().identity()
    }
}
