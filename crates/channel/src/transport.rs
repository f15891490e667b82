//! Transport seam
//!
//! The channel never talks to the network directly; it dials through a
//! [`Connector`] and drives a pair of frame halves. Production uses
//! tokio-tungstenite; tests inject scripted connections so reconnect
//! behavior is verifiable without a gateway.

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to dial gateway: {0}")]
    Dial(String),

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("transport closed")]
    Closed,
}

/// Writing half of an established connection.
#[async_trait]
pub trait FrameSink: Send {
    async fn send(&mut self, text: String) -> Result<(), TransportError>;
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Reading half of an established connection.
#[async_trait]
pub trait FrameStream: Send {
    /// Next inbound text frame. `None` means the transport closed.
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>>;
}

/// One established duplex connection.
pub struct Connection {
    pub sink: Box<dyn FrameSink>,
    pub stream: Box<dyn FrameStream>,
}

/// Dials the gateway. One call per (re)connection attempt.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, url: &str) -> Result<Connection, TransportError>;
}

// ---------------------------------------------------------------------------
// tokio-tungstenite implementation
// ---------------------------------------------------------------------------

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Production connector backed by tokio-tungstenite.
#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Connection, TransportError> {
        let (socket, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Dial(e.to_string()))?;
        let (sink, stream) = socket.split();
        Ok(Connection {
            sink: Box::new(WsSink(sink)),
            stream: Box::new(WsFrameStream(stream)),
        })
    }
}

struct WsSink(SplitSink<WsStream, Message>);

#[async_trait]
impl FrameSink for WsSink {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.0
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| TransportError::WebSocket(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.0
            .close()
            .await
            .map_err(|e| TransportError::WebSocket(e.to_string()))
    }
}

struct WsFrameStream(SplitStream<WsStream>);

#[async_trait]
impl FrameStream for WsFrameStream {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.0.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
                Ok(Message::Close(frame)) => {
                    debug!(
                        component = "transport",
                        event = "transport.close_frame",
                        frame = ?frame,
                        "Gateway sent close frame"
                    );
                    return None;
                }
                // Control frames and binary payloads carry nothing for us.
                Ok(_) => continue,
                Err(e) => return Some(Err(TransportError::WebSocket(e.to_string()))),
            }
        }
    }
}
