//! Client library for a host editor's popup-window subsystem.
//!
//! Every operation here is a thin, validated forward to a remote procedure
//! implemented by a companion script (`runtime/popup.vim`) running inside
//! the host editor, reached over an existing plugin RPC bridge. The bridge
//! is abstracted behind the [`Session`] trait; this crate owns only the
//! one-time script load, the handle-validation guard, reply decoding, and
//! the close-callback registration protocol.
//!
//! ```no_run
//! # use vim_popup::{open, info, close, PopupWindowStyle, Session};
//! # async fn demo<S: Session>(session: &S) -> Result<(), vim_popup::PopupError> {
//! let style = PopupWindowStyle::new(3, 3, 10, 10).with_topline(1);
//! let winid = open(session, 2, style, None).await?;
//! let geometry = info(session, winid).await?;
//! close(session, winid).await?;
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod error;
pub mod init;
pub mod popup;
pub mod session;
pub mod types;

pub use callback::dispatch_close;
pub use error::PopupError;
pub use init::reset_initializer;
pub use popup::{close, info, is_popup_window, is_visible, list, move_to, open, OnClose};
pub use session::Session;
pub use types::{Origin, PopupWindowInfo, PopupWindowStyle};
