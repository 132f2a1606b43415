//! One-time companion-script load.
//!
//! The remote `Denops_popup_window_*` procedures only exist after the
//! companion script has been sourced into the session. That load happens
//! lazily on the first facade call and is memoized process-wide: the key is
//! "has this process ever initialized", not session identity, because the
//! plugin lives for exactly one host connection.
//!
//! Lifecycle: `Uninitialized -> InFlight -> Ready`. The whole transition
//! runs under one async mutex, so under the host's single-threaded
//! cooperative scheduling a second task entering the facade while a load is
//! in flight parks on the lock and observes `Ready` when it wakes. A failed
//! load reverts to `Uninitialized` and the error propagates to whichever
//! facade call triggered it; the initializer itself never retries.
//!
//! Tests that tear down and recreate sessions within one process call
//! [`reset_initializer`] between them.

use crate::session::Session;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

/// The host-side definitions of the remote popup procedures, shipped with
/// the crate and sourced verbatim.
const COMPANION_SCRIPT: &str = include_str!("../runtime/popup.vim");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitState {
    Uninitialized,
    InFlight,
    Ready,
}

static STATE: Lazy<Mutex<InitState>> = Lazy::new(|| Mutex::new(InitState::Uninitialized));

/// Make sure the companion script has been loaded into the session.
///
/// No-op after the first successful load. Safe to call on every facade
/// entry point.
pub(crate) async fn ensure_initialized<S: Session + ?Sized>(
    session: &S,
) -> Result<(), crate::PopupError> {
    let mut state = STATE.lock().await;
    if *state == InitState::Ready {
        return Ok(());
    }
    *state = InitState::InFlight;
    tracing::debug!("loading popup companion script into session");
    match session.load(COMPANION_SCRIPT).await {
        Ok(()) => {
            *state = InitState::Ready;
            Ok(())
        }
        Err(err) => {
            *state = InitState::Uninitialized;
            Err(err.into())
        }
    }
}

/// Forget that initialization ever happened, forcing a fresh script load on
/// the next operation. Intended for test harnesses that simulate multiple
/// independent sessions within one process.
pub async fn reset_initializer() {
    let mut state = STATE.lock().await;
    *state = InitState::Uninitialized;
}
