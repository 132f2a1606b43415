//! Close-callback registry.
//!
//! The host editor closes popups on its own (user interaction, layout
//! changes), not only when this library asks it to. To observe that, `open`
//! registers a handler under a generated token and sends the
//! `(plugin name, token)` pair along with the open request; when the host
//! closes the popup it issues a reverse call through the bridge, which
//! lands in [`dispatch_close`].
//!
//! At-most-once delivery: the registry entry is removed before the handler
//! runs, so a host that double-fires hits an empty slot the second time.
//! Removal on fire also bounds registry memory to the number of popups
//! currently open.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

type CloseHandler = Box<dyn FnOnce() + Send>;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

static REGISTRY: Lazy<Mutex<HashMap<String, CloseHandler>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Register a close handler and return the token the host will use to
/// address it.
pub(crate) fn register(handler: CloseHandler) -> String {
    let token = format!("close:{}", NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
    REGISTRY
        .lock()
        .expect("close-callback registry poisoned")
        .insert(token.clone(), handler);
    token
}

/// Drop a registered handler without firing it. Used when the open request
/// that registered it never produced a popup.
pub(crate) fn unregister(token: &str) {
    REGISTRY
        .lock()
        .expect("close-callback registry poisoned")
        .remove(token);
}

/// Entry point for the bridge's reverse-call path: the host closed a popup
/// whose open request carried `token`.
///
/// Invokes the registered handler at most once. Unknown or already-fired
/// tokens are logged and ignored, since the host may emit more than one
/// close notification for the same popup.
pub fn dispatch_close(token: &str) {
    let handler = REGISTRY
        .lock()
        .expect("close-callback registry poisoned")
        .remove(token);
    match handler {
        Some(handler) => {
            tracing::debug!(token, "popup closed by host, firing close callback");
            handler();
        }
        None => {
            tracing::trace!(token, "close notification for unknown or fired token");
        }
    }
}
