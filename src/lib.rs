//! # vypush
//!
//! Push a block of VyOS `set`/`delete` configuration lines to a router
//! over an interactive SSH session, with commit, save and dry-run
//! support.
//!
//! The binary reads one JSON request from stdin and writes one JSON
//! report to stdout (exit code 0 on success, 1 on any failure):
//!
//! ```text
//! echo '{"host":"10.0.0.1","username":"vyos","password":"vyos",
//!        "configuration":"set system host-name gw-01"}' | vypush
//! ```
//!
//! Internally the crate is a small scrapli-style stack:
//! - [`transport`] — russh client with an interactive PTY channel and
//!   prompt-pattern reads
//! - [`platform`] — the VyOS dialect (prompt regexes, command verbs)
//! - [`session`] — the [`ConfigSession`](session::ConfigSession) seam the
//!   pipeline is written against
//! - [`pipeline`] — the linear apply pass: filter, push, then dry-run or
//!   commit/save, with unconditional teardown

pub mod channel;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod request;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use error::Error;
pub use report::Report;
pub use request::ApplyRequest;
pub use session::{ConfigSession, SshSession};
pub use transport::SshConfig;
