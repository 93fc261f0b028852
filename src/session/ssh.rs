//! SSH-backed configuration session.

use log::debug;
use regex::bytes::Regex;

use super::ConfigSession;
use crate::error::SessionResult;
use crate::platform::Platform;
use crate::transport::{SshConfig, SshTransport};

/// A live interactive session to a device, driven by its [`Platform`]
/// dialect.
pub struct SshSession {
    transport: SshTransport,
    platform: Platform,
    read_timeout: std::time::Duration,
}

impl SshSession {
    /// Connect, wait for the login banner prompt and disable paging.
    pub async fn open(config: &SshConfig, platform: Platform) -> SessionResult<Self> {
        let mut transport = SshTransport::connect(config).await?;

        // First prompt after login, under the banner timeout
        transport
            .read_until_pattern(&platform.any_prompt, config.banner_timeout)
            .await?;

        let mut session = Self {
            transport,
            platform,
            read_timeout: config.read_timeout,
        };

        let on_open = session.platform.on_open_commands;
        for cmd in on_open {
            let expect = session.platform.exec_prompt.clone();
            session.command(cmd, &expect).await?;
        }

        Ok(session)
    }

    /// Send one command and wait for the expected prompt.
    async fn command(&mut self, cmd: &str, expect: &Regex) -> SessionResult<String> {
        debug!("sending: {}", cmd);
        self.transport.send_line(cmd).await?;
        let raw = self
            .transport
            .read_until_pattern(expect, self.read_timeout)
            .await?;
        Ok(normalize_output(&raw, cmd))
    }
}

impl ConfigSession for SshSession {
    async fn enter_config_mode(&mut self) -> SessionResult<()> {
        let expect = self.platform.config_prompt.clone();
        self.command(self.platform.enter_config, &expect).await?;
        Ok(())
    }

    async fn send_config_batch(&mut self, lines: &[String]) -> SessionResult<String> {
        let expect = self.platform.config_prompt.clone();
        let mut combined = Vec::new();
        for line in lines {
            let out = self.command(line, &expect).await?;
            if !out.is_empty() {
                combined.push(out);
            }
        }
        Ok(combined.join("\n"))
    }

    async fn diff(&mut self) -> SessionResult<String> {
        let expect = self.platform.config_prompt.clone();
        self.command(self.platform.compare, &expect).await
    }

    async fn discard(&mut self) -> SessionResult<String> {
        let expect = self.platform.config_prompt.clone();
        self.command(self.platform.discard, &expect).await
    }

    async fn commit(&mut self) -> SessionResult<String> {
        // Commit keeps the session in configuration mode; the device
        // confirms with the config prompt.
        let expect = self.platform.config_prompt.clone();
        self.command(self.platform.commit, &expect).await
    }

    async fn save(&mut self) -> SessionResult<String> {
        let expect = self.platform.config_prompt.clone();
        self.command(self.platform.save, &expect).await
    }

    async fn exit_config_mode(&mut self) -> SessionResult<()> {
        let expect = self.platform.exec_prompt.clone();
        self.command(self.platform.exit_config, &expect).await?;
        Ok(())
    }

    async fn close(self) -> SessionResult<()> {
        self.transport.close().await
    }
}

/// Strip the command echo and the trailing prompt line from raw output.
fn normalize_output(raw: &str, command: &str) -> String {
    let output = raw
        .strip_prefix(command)
        .unwrap_or(raw)
        .trim_start_matches(['\r', '\n']);

    match output.rfind('\n') {
        Some(pos) => output[..pos].trim_end_matches('\r').to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_echo_and_prompt() {
        let raw = "commit\r\n[edit]\r\nvyos@vyos# ";
        assert_eq!(normalize_output(raw, "commit"), "[edit]");
    }

    #[test]
    fn test_normalize_prompt_only() {
        // Command produced no output: echo then prompt
        let raw = "discard\r\nvyos@vyos# ";
        assert_eq!(normalize_output(raw, "discard"), "");
    }

    #[test]
    fn test_normalize_multiline_output() {
        let raw = "compare\n+set interfaces eth0\n-delete system ntp\nvyos@vyos# ";
        assert_eq!(
            normalize_output(raw, "compare"),
            "+set interfaces eth0\n-delete system ntp"
        );
    }

    #[test]
    fn test_normalize_without_echo() {
        let raw = "Warning: config changed\nvyos@vyos# ";
        assert_eq!(normalize_output(raw, "commit"), "Warning: config changed");
    }
}
