//! Test helpers for integration tests
//!
//! Provides utilities for spawning a gateway on an ephemeral port and
//! driving it with WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use futures_util::{SinkExt, StreamExt};
use relay_common::AppConfig;
use relay_gateway::protocol::OutboundEnvelope;
use relay_gateway::{create_app, create_gateway_state, run_server, RelayStats};
use reqwest::Client;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long a client waits for an expected frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a client listens before concluding nothing was sent
pub const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with default config
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::default()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let app = create_app(create_gateway_state(config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            run_server(listener, app, std::future::pending()).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Open a WebSocket session on `/ws`
    pub async fn connect(&self) -> Result<WsClient> {
        let (stream, _) = connect_async(format!("ws://{}/ws", self.addr)).await?;
        Ok(WsClient { stream })
    }

    /// Fetch the relay counters
    pub async fn stats(&self) -> Result<RelayStats> {
        let body: Value = self
            .client
            .get(format!("{}/stats", self.base_url()))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(RelayStats {
            connections: usize::try_from(body["connections"].as_u64().unwrap_or_default())?,
            rooms: usize::try_from(body["rooms"].as_u64().unwrap_or_default())?,
        })
    }

    /// Poll the counters until `check` holds or the receive timeout passes
    pub async fn wait_for_stats(&self, check: impl Fn(&RelayStats) -> bool) -> Result<RelayStats> {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let stats = self.stats().await?;
            if check(&stats) {
                return Ok(stats);
            }
            if tokio::time::Instant::now() >= deadline {
                bail!("stats never reached the expected state: {stats:?}");
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One WebSocket client session
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send a JSON frame
    pub async fn send(&mut self, frame: &Value) -> Result<()> {
        self.send_text(&frame.to_string()).await
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a raw binary frame
    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        self.stream.send(Message::Binary(data)).await?;
        Ok(())
    }

    /// Next envelope from the server
    pub async fn recv(&mut self) -> Result<OutboundEnvelope> {
        loop {
            match timeout(RECV_TIMEOUT, self.stream.next()).await? {
                Some(Ok(Message::Text(text))) => return Ok(OutboundEnvelope::from_json(&text)?),
                Some(Ok(Message::Close(_))) | None => bail!("connection closed"),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Collect the next `n` envelopes
    pub async fn recv_n(&mut self, n: usize) -> Result<Vec<OutboundEnvelope>> {
        let mut envelopes = Vec::with_capacity(n);
        for _ in 0..n {
            envelopes.push(self.recv().await?);
        }
        Ok(envelopes)
    }

    /// Join a room and consume the join notice plus user list it triggers
    pub async fn join(&mut self, username: &str, room_id: &str) -> Result<Vec<String>> {
        self.send(&crate::fixtures::join(username, room_id)).await?;
        self.recv_system().await?;
        self.recv_user_list().await
    }

    /// Next `system` notice text
    pub async fn recv_system(&mut self) -> Result<String> {
        match self.recv().await? {
            OutboundEnvelope::System { content, .. } => Ok(content),
            other => bail!("expected system, got {other:?}"),
        }
    }

    /// Next `userList` names
    pub async fn recv_user_list(&mut self) -> Result<Vec<String>> {
        match self.recv().await? {
            OutboundEnvelope::UserList { users } => Ok(users),
            other => bail!("expected userList, got {other:?}"),
        }
    }

    /// Next `error` text
    pub async fn recv_error(&mut self) -> Result<String> {
        match self.recv().await? {
            OutboundEnvelope::Error { content, .. } => Ok(content),
            other => bail!("expected error, got {other:?}"),
        }
    }

    /// Fail if any text frame arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        loop {
            match timeout(SILENCE_WINDOW, self.stream.next()).await {
                Err(_) => return Ok(()),
                Ok(Some(Ok(Message::Text(text)))) => bail!("unexpected frame: {text}"),
                Ok(Some(Ok(Message::Close(_))) | None) => bail!("connection closed"),
                Ok(Some(Ok(_))) => {}
                Ok(Some(Err(e))) => return Err(e.into()),
            }
        }
    }

    /// Close the session
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
