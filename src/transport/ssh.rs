//! SSH transport implementation using russh.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use regex::bytes::Regex;
use russh::client::{self, Handle, Msg};
use russh::keys::PublicKey;
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use super::config::{AuthMethod, SshConfig};
use crate::channel::PatternBuffer;
use crate::error::{ChannelError, SessionResult, TransportError};

/// SSH transport wrapping a russh client with an interactive PTY channel.
pub struct SshTransport {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// The interactive shell channel.
    channel: Channel<Msg>,

    /// Accumulated channel output, searched for prompts.
    buffer: PatternBuffer,
}

impl SshTransport {
    /// Connect, authenticate and open an interactive shell channel.
    ///
    /// Each stage runs under its own timeout from the config: TCP and
    /// handshake under `connect_timeout`, authentication under
    /// `auth_timeout`. The caller waits for the banner prompt itself via
    /// [`read_until_pattern`](Self::read_until_pattern).
    pub async fn connect(config: &SshConfig) -> SessionResult<Self> {
        let ssh_config = Arc::new(client::Config::default());

        debug!("connecting to {}:{}", config.host, config.port);

        let mut session = tokio::time::timeout(
            config.connect_timeout,
            client::connect(
                ssh_config,
                (config.host.as_str(), config.port),
                SshHandler,
            ),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.connect_timeout))?
        .map_err(|e| match e {
            russh::Error::IO(source) => TransportError::ConnectionFailed {
                host: config.host.clone(),
                port: config.port,
                source,
            },
            e => TransportError::Ssh(e),
        })?;

        tokio::time::timeout(config.auth_timeout, Self::authenticate(&mut session, config))
            .await
            .map_err(|_| TransportError::Timeout(config.auth_timeout))??;

        let channel = Self::open_shell(&session, config).await?;

        Ok(Self {
            session,
            channel,
            buffer: PatternBuffer::default(),
        })
    }

    /// Authenticate with the server.
    async fn authenticate(
        session: &mut Handle<SshHandler>,
        config: &SshConfig,
    ) -> SessionResult<()> {
        let success = match &config.auth {
            AuthMethod::None => session
                .authenticate_none(&config.username)
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::Password(password) => session
                .authenticate_password(&config.username, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Open a PTY channel and request a shell on it.
    async fn open_shell(
        session: &Handle<SshHandler>,
        config: &SshConfig,
    ) -> SessionResult<Channel<Msg>> {
        let channel = session
            .channel_open_session()
            .await
            .map_err(ChannelError::Ssh)?;

        channel
            .request_pty(
                true,
                "xterm",
                config.terminal_width,
                config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(|_| ChannelError::PtyOpenFailed)?;

        channel
            .request_shell(true)
            .await
            .map_err(|_| ChannelError::ShellRequestFailed)?;

        Ok(channel)
    }

    /// Send a line of input, terminated with a newline.
    pub async fn send_line(&mut self, line: &str) -> SessionResult<()> {
        let mut payload = Vec::with_capacity(line.len() + 1);
        payload.extend_from_slice(line.as_bytes());
        payload.push(b'\n');
        self.channel
            .data(&payload[..])
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read channel output until `pattern` matches the buffer tail.
    ///
    /// Returns everything accumulated since the previous read, prompt
    /// included, and resets the buffer.
    pub async fn read_until_pattern(
        &mut self,
        pattern: &Regex,
        timeout: Duration,
    ) -> SessionResult<String> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.buffer.tail_contains(pattern) {
                return Ok(self.buffer.take_string());
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| ChannelError::PatternTimeout(timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) => self.buffer.extend(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Close the connection.
    pub async fn close(self) -> SessionResult<()> {
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// SSH client handler for russh.
///
/// Host keys are accepted without verification, matching the behavior of
/// the automation stacks this tool replaces; the credential comes from
/// the caller per invocation and no known_hosts state is kept.
struct SshHandler;

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(true)
    }
}
