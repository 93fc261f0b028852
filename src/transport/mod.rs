//! SSH transport layer.
//!
//! Wraps the russh client and exposes an interactive channel with
//! prompt-pattern reads for the session layer above.

mod config;
mod ssh;

pub use config::{AuthMethod, SshConfig};
pub use ssh::SshTransport;
