//! Shared test harness: a scripted in-memory host standing in for the
//! editor plus bridge.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::sync::Once;
use vim_popup::Session;

/// Initialize the global tracing subscriber once (used by tests that run
/// with `RUST_LOG`).
#[allow(dead_code)]
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stdout);
        let _ = subscriber.try_init();
    });
}

struct HostPopup {
    bufnr: i64,
    row: i64,
    col: i64,
    width: i64,
    height: i64,
    topline: i64,
    close_token: String,
}

struct HostState {
    popups: BTreeMap<i64, HostPopup>,
    /// Handles the host has recycled into ordinary (non-popup) windows.
    /// Visible, but not popups.
    regular_windows: BTreeSet<i64>,
    next_winid: i64,
}

/// In-memory fake of the host editor's popup subsystem, reachable through
/// the same seven remote procedures the companion script defines. Closing
/// a popup (locally or via [`MockSession::host_close`]) takes the same
/// reverse-call path as the real host: `vim_popup::dispatch_close`.
pub struct MockSession {
    state: Mutex<HostState>,
    pub loads: AtomicUsize,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HostState {
                popups: BTreeMap::new(),
                regular_windows: BTreeSet::new(),
                next_winid: 1000,
            }),
            loads: AtomicUsize::new(0),
        }
    }

    /// Simulate the host tearing a popup down and immediately reusing its
    /// handle for a regular window, as happens when a popup buffer gets
    /// promoted to a split.
    #[allow(dead_code)]
    pub fn recycle_into_regular_window(&self, winid: i64) {
        let removed = {
            let mut state = self.state.lock().unwrap();
            let removed = state.popups.remove(&winid);
            state.regular_windows.insert(winid);
            removed
        };
        if let Some(popup) = removed {
            vim_popup::dispatch_close(&popup.close_token);
        }
    }

    /// Simulate the host closing a popup on its own (user interaction,
    /// layout change). Returns true when the handle was a live popup.
    #[allow(dead_code)]
    pub fn host_close(&self, winid: i64) -> bool {
        let removed = {
            let mut state = self.state.lock().unwrap();
            state.popups.remove(&winid)
        };
        match removed {
            Some(popup) => {
                vim_popup::dispatch_close(&popup.close_token);
                true
            }
            None => false,
        }
    }

    fn apply_style(popup: &mut HostPopup, style: &Value) {
        popup.row = style["row"].as_i64().unwrap();
        popup.col = style["col"].as_i64().unwrap();
        popup.width = style["width"].as_i64().unwrap();
        popup.height = style["height"].as_i64().unwrap();
        if let Some(topline) = style.get("topline").and_then(Value::as_i64) {
            popup.topline = topline;
        }
    }
}

#[async_trait]
impl Session for MockSession {
    fn name(&self) -> &str {
        "vim-popup-test"
    }

    async fn call(&self, func: &str, args: Vec<Value>) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        match func {
            "Denops_popup_window_open" => {
                let bufnr = args[0].as_i64().expect("bufnr must be an integer");
                let on_close = &args[2]["on_close"];
                assert_eq!(on_close[0].as_str().unwrap(), self.name());
                let close_token = on_close[1].as_str().expect("token must be a string");

                state.next_winid += 1;
                let winid = state.next_winid;
                let mut popup = HostPopup {
                    bufnr,
                    row: 0,
                    col: 0,
                    width: 0,
                    height: 0,
                    topline: 1,
                    close_token: close_token.to_string(),
                };
                MockSession::apply_style(&mut popup, &args[1]);
                state.popups.insert(winid, popup);
                Ok(json!(winid))
            }
            "Denops_popup_window_move" => {
                let winid = args[0].as_i64().unwrap();
                let popup = state
                    .popups
                    .get_mut(&winid)
                    .ok_or_else(|| anyhow!("E957: invalid window number"))?;
                MockSession::apply_style(popup, &args[1]);
                Ok(Value::Null)
            }
            "Denops_popup_window_close" => {
                let winid = args[0].as_i64().unwrap();
                let popup = state
                    .popups
                    .remove(&winid)
                    .ok_or_else(|| anyhow!("E957: invalid window number"))?;
                drop(state);
                vim_popup::dispatch_close(&popup.close_token);
                Ok(Value::Null)
            }
            "Denops_popup_window_info" => {
                let winid = args[0].as_i64().unwrap();
                let popup = state
                    .popups
                    .get(&winid)
                    .ok_or_else(|| anyhow!("E957: invalid window number"))?;
                Ok(json!({
                    "row": popup.row,
                    "col": popup.col,
                    "width": popup.width,
                    "height": popup.height,
                    "topline": popup.topline,
                }))
            }
            "Denops_popup_window_is_visible" => {
                let winid = args[0].as_i64().unwrap();
                let visible =
                    state.popups.contains_key(&winid) || state.regular_windows.contains(&winid);
                Ok(json!(i64::from(visible)))
            }
            "Denops_popup_window_is_popup_window" => {
                let winid = args[0].as_i64().unwrap();
                Ok(json!(i64::from(state.popups.contains_key(&winid))))
            }
            "Denops_popup_window_list" => {
                Ok(json!(state.popups.keys().copied().collect::<Vec<i64>>()))
            }
            other => Err(anyhow!("unknown function: {}", other)),
        }
    }

    async fn load(&self, script: &str) -> Result<()> {
        assert!(
            script.contains("Denops_popup_window_open"),
            "companion script should define the remote procedures"
        );
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fetch the buffer a popup is bound to, for assertions.
#[allow(dead_code)]
pub fn popup_bufnr(session: &MockSession, winid: i64) -> Option<i64> {
    let state = session.state.lock().unwrap();
    state.popups.get(&winid).map(|popup| popup.bufnr)
}
