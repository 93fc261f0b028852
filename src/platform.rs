//! VyOS platform dialect.
//!
//! VyOS presents two modes over the interactive CLI:
//! - operational mode with a `$` prompt
//! - configuration mode with a `#` prompt
//!
//! Prompt patterns follow the scrapli/netmiko conventions for the
//! platform. Uses `(?m)` so `^` matches line starts inside buffered
//! output.
//!
//! # Prompt Examples
//!
//! ```text
//! vyos@vyos:~$              # operational mode
//! vyos@vyos#                # configuration mode
//! admin@gw-01:~$            # operational, custom hostname
//! [edit]                    # config context line (separate line)
//! vyos@vyos#                # config prompt on next line
//! ```

use regex::bytes::Regex;

/// Platform name for VyOS.
pub const PLATFORM_NAME: &str = "vyos";

/// Dialect of the target CLI: prompt patterns and command verbs.
///
/// The session layer is written against this profile so the pipeline
/// never embeds device-specific strings.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Platform name (e.g. "vyos").
    pub name: &'static str,

    /// Operational-mode prompt pattern.
    pub exec_prompt: Regex,

    /// Configuration-mode prompt pattern.
    pub config_prompt: Regex,

    /// Pattern matching either prompt, for generic reads.
    pub any_prompt: Regex,

    /// Command entering configuration mode.
    pub enter_config: &'static str,

    /// Command leaving configuration mode.
    pub exit_config: &'static str,

    /// Command committing the candidate configuration.
    pub commit: &'static str,

    /// Command persisting the running configuration.
    pub save: &'static str,

    /// Command showing the candidate-vs-active diff.
    pub compare: &'static str,

    /// Command discarding the candidate configuration.
    pub discard: &'static str,

    /// Commands run right after connecting (paging off).
    pub on_open_commands: &'static [&'static str],
}

/// Create the VyOS platform dialect.
pub fn vyos() -> Platform {
    Platform {
        name: PLATFORM_NAME,
        exec_prompt: Regex::new(r"(?m)^[\w\-@()/:\.~]{1,63}\$\s?$").unwrap(),
        config_prompt: Regex::new(r"(?m)^[\w\-@()/:\.~]{1,63}#\s?$").unwrap(),
        any_prompt: Regex::new(r"(?m)^[\w\-@()/:\.~]{1,63}[$#]\s?$").unwrap(),
        enter_config: "configure",
        exit_config: "exit",
        commit: "commit",
        save: "save",
        compare: "compare",
        discard: "discard",
        on_open_commands: &["set terminal length 0", "set terminal width 512"],
    }
}
