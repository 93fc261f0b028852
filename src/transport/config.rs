//! SSH connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// SSH connection configuration.
///
/// The three stage timeouts mirror the fixed values the tool has always
/// used: 20 seconds each for TCP/handshake, authentication and the
/// post-login banner prompt.
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// SSH port (default: 22).
    pub port: u16,

    /// Username for authentication.
    pub username: String,

    /// Authentication method.
    pub auth: AuthMethod,

    /// Timeout for TCP connect and SSH handshake.
    pub connect_timeout: Duration,

    /// Timeout for authentication.
    pub auth_timeout: Duration,

    /// Timeout for the first prompt after login.
    pub banner_timeout: Duration,

    /// Timeout for reading command output.
    pub read_timeout: Duration,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,
}

impl SshConfig {
    /// Password-authenticated config with the fixed stage timeouts.
    pub fn with_password(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            auth: AuthMethod::Password(password),
            connect_timeout: Duration::from_secs(20),
            auth_timeout: Duration::from_secs(20),
            banner_timeout: Duration::from_secs(20),
            read_timeout: Duration::from_secs(30),
            terminal_width: 512,
            terminal_height: 24,
        }
    }
}

/// Authentication method for SSH connections.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// No authentication (for testing only).
    None,

    /// Password authentication.
    Password(SecretString),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_stage_timeouts() {
        let config = SshConfig::with_password("r1", 22, "admin", SecretString::from("pw"));
        assert_eq!(config.connect_timeout, Duration::from_secs(20));
        assert_eq!(config.auth_timeout, Duration::from_secs(20));
        assert_eq!(config.banner_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let config = SshConfig::with_password("r1", 22, "admin", SecretString::from("hunter2"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }
}
