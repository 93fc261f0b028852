//! Device configuration sessions.
//!
//! [`ConfigSession`] is the seam between the apply pipeline and the
//! device dialect: the pipeline only speaks in semantic verbs (enter,
//! push, diff, discard, commit, save, exit, close) and the session
//! implementation maps them to the platform's command strings and
//! prompt patterns. Swapping the dialect never touches pipeline logic.

mod ssh;

pub use ssh::SshSession;

use std::future::Future;

use crate::error::SessionResult;

/// One interactive configuration session against a device.
///
/// `close()` consumes the session — teardown is single-use by
/// construction. Every other method returns the raw text the device
/// printed for that step (empty when the device printed nothing
/// worth keeping).
pub trait ConfigSession: Send {
    /// Enter configuration mode. Does not exit afterwards.
    fn enter_config_mode(&mut self) -> impl Future<Output = SessionResult<()>> + Send;

    /// Push a batch of configuration lines, returning the combined output.
    fn send_config_batch(
        &mut self,
        lines: &[String],
    ) -> impl Future<Output = SessionResult<String>> + Send;

    /// Show the candidate-vs-active diff.
    fn diff(&mut self) -> impl Future<Output = SessionResult<String>> + Send;

    /// Discard the candidate configuration.
    fn discard(&mut self) -> impl Future<Output = SessionResult<String>> + Send;

    /// Commit the candidate configuration.
    fn commit(&mut self) -> impl Future<Output = SessionResult<String>> + Send;

    /// Persist the running configuration.
    fn save(&mut self) -> impl Future<Output = SessionResult<String>> + Send;

    /// Leave configuration mode, back to the operational prompt.
    fn exit_config_mode(&mut self) -> impl Future<Output = SessionResult<()>> + Send;

    /// Close the session. Consumes it — it cannot be used after this.
    fn close(self) -> impl Future<Output = SessionResult<()>> + Send;
}
