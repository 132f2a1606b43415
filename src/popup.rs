//! The call facade: one thin, validated forward per remote procedure.
//!
//! Every function (a) makes sure the companion script is loaded, (b) for
//! mutate/query operations, checks the handle still denotes a live popup,
//! (c) issues the remote call, (d) decodes the reply before returning it.
//! No operation retries; transport failures propagate unchanged.

use crate::callback;
use crate::error::PopupError;
use crate::init::ensure_initialized;
use crate::session::Session;
use crate::types::{
    decode_flag, decode_info, decode_unit, decode_winid, decode_winid_list, PopupWindowInfo,
    PopupWindowStyle,
};
use serde_json::json;

/// Caller-supplied notification fired once when a popup's lifetime ends,
/// whether it was closed through [`close`] or by the host itself.
pub type OnClose = Box<dyn FnOnce() + Send>;

/// Open a popup window showing the given buffer.
///
/// Returns the host-assigned window handle. The handle stays valid until
/// the popup is closed, by [`close`] or by the host; after that every
/// mutate/query operation on it fails with
/// [`PopupError::InvalidHandle`].
pub async fn open<S: Session + ?Sized>(
    session: &S,
    bufnr: i64,
    style: PopupWindowStyle,
    on_close: Option<OnClose>,
) -> Result<i64, PopupError> {
    ensure_initialized(session).await?;

    // Register unconditionally so the open payload has a uniform shape;
    // a no-op stands in when the caller does not care.
    let token = callback::register(on_close.unwrap_or_else(|| Box::new(|| {})));
    let style = serde_json::to_value(&style).map_err(anyhow::Error::from)?;
    let events = json!({ "on_close": [session.name(), token] });

    tracing::debug!(bufnr, %token, "opening popup window");
    let reply = match session
        .call("Denops_popup_window_open", vec![json!(bufnr), style, events])
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            // No popup was created, so no close notification will ever
            // arrive for this token.
            callback::unregister(&token);
            return Err(err.into());
        }
    };
    decode_winid(&reply)
}

/// Reposition or resize an existing popup window.
pub async fn move_to<S: Session + ?Sized>(
    session: &S,
    winid: i64,
    style: PopupWindowStyle,
) -> Result<(), PopupError> {
    ensure_initialized(session).await?;
    assert_popup(session, winid).await?;

    let style = serde_json::to_value(&style).map_err(anyhow::Error::from)?;
    tracing::debug!(winid, "moving popup window");
    let reply = session
        .call("Denops_popup_window_move", vec![json!(winid), style])
        .await?;
    decode_unit(&reply)
}

/// Close a popup window.
///
/// The host fires the close callback registered on [`open`] as part of
/// tearing the popup down, so an explicit close and a host-initiated close
/// are observationally identical to the callback.
pub async fn close<S: Session + ?Sized>(session: &S, winid: i64) -> Result<(), PopupError> {
    ensure_initialized(session).await?;
    assert_popup(session, winid).await?;

    tracing::debug!(winid, "closing popup window");
    let reply = session
        .call("Denops_popup_window_close", vec![json!(winid)])
        .await?;
    decode_unit(&reply)
}

/// Snapshot the current geometry of a popup window.
pub async fn info<S: Session + ?Sized>(
    session: &S,
    winid: i64,
) -> Result<PopupWindowInfo, PopupError> {
    ensure_initialized(session).await?;
    assert_popup(session, winid).await?;

    let reply = session
        .call("Denops_popup_window_info", vec![json!(winid)])
        .await?;
    decode_info(&reply)
}

/// Whether `winid` denotes a currently visible popup window.
///
/// Total over handle values: nonexistent and foreign handles report
/// `false`, never an error, so this can be polled after a popup may have
/// already been closed externally. The host's visibility flag alone is not
/// enough: a stale handle can be recycled into a regular window that is
/// visible, so a positive flag is confirmed with [`is_popup_window`].
pub async fn is_visible<S: Session + ?Sized>(session: &S, winid: i64) -> Result<bool, PopupError> {
    ensure_initialized(session).await?;
    let reply = session
        .call("Denops_popup_window_is_visible", vec![json!(winid)])
        .await?;
    if !decode_flag(&reply)? {
        return Ok(false);
    }
    is_popup_window(session, winid).await
}

/// Whether `winid` denotes a popup window at all.
///
/// Total over handle values, like [`is_visible`].
pub async fn is_popup_window<S: Session + ?Sized>(
    session: &S,
    winid: i64,
) -> Result<bool, PopupError> {
    ensure_initialized(session).await?;
    let reply = session
        .call("Denops_popup_window_is_popup_window", vec![json!(winid)])
        .await?;
    decode_flag(&reply)
}

/// Handles of all popup windows opened through this library that are still
/// alive in the host.
pub async fn list<S: Session + ?Sized>(session: &S) -> Result<Vec<i64>, PopupError> {
    ensure_initialized(session).await?;
    let reply = session.call("Denops_popup_window_list", vec![]).await?;
    decode_winid_list(&reply)
}

/// Guard for mutate/query operations: reject when the handle does NOT
/// denote a live popup. Conservative on purpose, since driving the popup
/// procedures against a non-popup window is undefined.
async fn assert_popup<S: Session + ?Sized>(session: &S, winid: i64) -> Result<(), PopupError> {
    if is_popup_window(session, winid).await? {
        Ok(())
    } else {
        Err(PopupError::InvalidHandle(winid))
    }
}
