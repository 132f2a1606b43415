//! Session: the boundary between this library and the plugin RPC bridge.
//!
//! The bridge runtime (transport framing, event loop, reverse-call routing)
//! is an external collaborator. This trait is the seam: one request/response
//! primitive and one script-load primitive, both asynchronous round-trips
//! against a single connected host editor instance.
//!
//! Calls issued sequentially against the same session are assumed to reach
//! the host in issuance order; the bridge serializes requests and this
//! library does not add its own ordering layer. There is no timeout here;
//! a hung remote call suspends its caller until the bridge gives up.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A live connection to one running host editor instance.
///
/// Implementations wrap whatever bridge runtime hosts the plugin. Failures
/// from the underlying transport should surface as plain `anyhow` errors;
/// the facade propagates them unchanged as
/// [`PopupError::Transport`](crate::PopupError::Transport).
#[async_trait]
pub trait Session: Send + Sync {
    /// Plugin identity the host uses to address reverse calls back into
    /// this process.
    fn name(&self) -> &str;

    /// Invoke a host-side function by name and return its raw reply.
    ///
    /// The reply is untyped; callers must not trust its shape. The facade
    /// runs every reply through a per-procedure decoder.
    async fn call(&self, func: &str, args: Vec<Value>) -> Result<Value>;

    /// Source a script into the host so its function definitions become
    /// callable through [`call`](Session::call).
    async fn load(&self, script: &str) -> Result<()>;
}
