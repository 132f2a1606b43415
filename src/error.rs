//! Error taxonomy for popup operations.

use thiserror::Error;

/// Failures surfaced by the popup facade.
///
/// None of these are retried locally. Transport failures pass through
/// unwrapped so callers see exactly what the bridge reported.
#[derive(Debug, Error)]
pub enum PopupError {
    /// The handle does not currently denote a live popup window. Mutating
    /// or querying a non-popup window through the host procedures is
    /// undefined, so the guard rejects instead of silently no-opping.
    #[error("invalid winid: {0} is not a popup window")]
    InvalidHandle(i64),

    /// A remote reply did not have the shape the host script contract
    /// promises. Indicates a broken or mismatched companion script.
    #[error("host returned an unexpected reply: expected {expected}, found {found}")]
    TypeMismatch {
        /// What the procedure's contract expects, e.g. `"integer winid"`.
        expected: &'static str,
        /// Short rendering of the offending value.
        found: String,
    },

    /// Failure from the underlying bridge call/load primitives, propagated
    /// unchanged.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl PopupError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &serde_json::Value) -> Self {
        PopupError::TypeMismatch {
            expected,
            found: summarize(found),
        }
    }
}

/// Render a reply value compactly for an error message, truncating large
/// payloads so a misbehaving host cannot bloat the error.
fn summarize(value: &serde_json::Value) -> String {
    let mut text = value.to_string();
    if text.len() > 120 {
        text.truncate(117);
        text.push_str("...");
    }
    text
}
