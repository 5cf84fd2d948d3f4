//! Harness Connection
//!
//! One connection-oriented session to the remote UI test harness.
//! Every command is answered by two payloads which are read with one
//! `read` call each. There is no framing: a short read is taken as a
//! complete response, so responses larger than the receive buffer or
//! coalesced by the network stack are not detected.

use std::fmt;

use log::{info, debug};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::command::UiCommand;
use crate::error::{DriverError, Result};

/// Default receive cap per response
pub const DEFAULT_RECV_BUFFER: usize = 1024;

/// Remote harness address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Maximum bytes taken by a single response read
    pub recv_buffer: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            recv_buffer: DEFAULT_RECV_BUFFER,
        }
    }
}

/// The two ordered payloads the harness returns per command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePair {
    pub acknowledgment: String,
    pub result: String,
}

/// A session with the harness
pub struct Connection<S = TcpStream> {
    stream: S,
    config: ConnectionConfig,
    buffer: Vec<u8>,
    commands_sent: u64,
}

impl Connection<TcpStream> {
    /// Open a TCP connection to the harness
    pub async fn connect(endpoint: &Endpoint, config: ConnectionConfig) -> Result<Self> {
        let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await?;
        info!("🔗 Connected to harness at {}", endpoint);
        Ok(Self::from_stream(stream, config))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already established stream
    pub fn from_stream(stream: S, config: ConnectionConfig) -> Self {
        Self {
            buffer: vec![0u8; config.recv_buffer.max(1)],
            stream,
            config,
            commands_sent: 0,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Number of commands written so far
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }

    /// Write a command as one whole write
    pub async fn send_command(&mut self, cmd: &UiCommand) -> Result<()> {
        let data = cmd.encode()?;
        debug!("📤 Sending {} bytes: {}", data.len(), cmd);
        self.stream.write_all(&data).await?;
        self.stream.flush().await?;
        self.commands_sent += 1;
        Ok(())
    }

    /// Read one response with a single read call
    ///
    /// `label` names the expected payload for logs and errors.
    pub async fn recv_response(&mut self, label: &'static str) -> Result<String> {
        let n = self.stream.read(&mut self.buffer).await?;
        if n == 0 {
            return Err(DriverError::ConnectionClosed(label));
        }
        debug!("📥 Received {} bytes ({})", n, label);

        String::from_utf8(self.buffer[..n].to_vec())
            .map_err(|e| DriverError::InvalidResponse(format!("{} is not UTF-8: {}", label, e)))
    }

    /// Send a command and read its acknowledgment and result
    pub async fn exchange(&mut self, cmd: &UiCommand) -> Result<ResponsePair> {
        self.send_command(cmd).await?;
        let acknowledgment = self.recv_response("acknowledgment").await?;
        info!("{}", acknowledgment);
        let result = self.recv_response("result").await?;
        info!("{}", result);
        Ok(ResponsePair {
            acknowledgment,
            result,
        })
    }

    /// Shut down the write half and release the stream
    pub async fn close(mut self) -> Result<()> {
        self.stream.shutdown().await?;
        info!("🔌 Connection closed after {} commands", self.commands_sent);
        Ok(())
    }
}
