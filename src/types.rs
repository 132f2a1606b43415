//! Popup value objects and per-procedure reply decoders.
//!
//! The bridge channel is untyped (`serde_json::Value` both ways). Styles
//! are serialized with unset optionals omitted so the host script sees the
//! same sparse dictionaries the editor's native API takes. Replies are
//! never trusted: each remote procedure has a decoder that produces a
//! typed value or a [`PopupError::TypeMismatch`].

use crate::error::PopupError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anchor origin for popup placement: which corner/center of the popup the
/// row/col coordinates pin down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterCenter,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Desired popup placement. A value object: passed by value on open/move,
/// no identity, every field freely mutable between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupWindowStyle {
    pub row: i64,
    pub col: i64,
    pub width: i64,
    pub height: i64,
    /// Draw a border around the popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<bool>,
    /// First buffer line visible in the popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topline: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

impl PopupWindowStyle {
    pub fn new(row: i64, col: i64, width: i64, height: i64) -> Self {
        Self {
            row,
            col,
            width,
            height,
            border: None,
            topline: None,
            origin: None,
        }
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_topline(mut self, topline: i64) -> Self {
        self.topline = Some(topline);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Snapshot of a popup's current geometry, as reported by the host. Not a
/// live handle: it does not track later moves or closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupWindowInfo {
    pub row: i64,
    pub col: i64,
    pub width: i64,
    pub height: i64,
    pub topline: i64,
}

/// Decode the reply of `Denops_popup_window_open`: an integer winid.
pub(crate) fn decode_winid(value: &Value) -> Result<i64, PopupError> {
    value
        .as_i64()
        .ok_or_else(|| PopupError::type_mismatch("integer winid", value))
}

/// Decode a host boolean. Vim script has no boolean in this reply path;
/// the companion script answers 0 or 1.
pub(crate) fn decode_flag(value: &Value) -> Result<bool, PopupError> {
    match value.as_i64() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(PopupError::type_mismatch("0/1 flag", value)),
    }
}

/// Decode the reply of `Denops_popup_window_info`.
pub(crate) fn decode_info(value: &Value) -> Result<PopupWindowInfo, PopupError> {
    serde_json::from_value(value.clone())
        .map_err(|_| PopupError::type_mismatch("popup geometry dictionary", value))
}

/// Decode the reply of `Denops_popup_window_list`: an array of winids.
pub(crate) fn decode_winid_list(value: &Value) -> Result<Vec<i64>, PopupError> {
    let items = value
        .as_array()
        .ok_or_else(|| PopupError::type_mismatch("winid list", value))?;
    items
        .iter()
        .map(|item| {
            item.as_i64()
                .ok_or_else(|| PopupError::type_mismatch("winid list", value))
        })
        .collect()
}

/// Decode a reply from a procedure that returns nothing. The host answers
/// null (or 0, Vim's default function return) on success.
pub(crate) fn decode_unit(value: &Value) -> Result<(), PopupError> {
    match value {
        Value::Null => Ok(()),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(()),
        other => Err(PopupError::type_mismatch("no return value", other)),
    }
}
