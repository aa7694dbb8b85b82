//! One live room socket and its two loops.
//!
//! The write loop drains the mailbox to the socket and pings the peer; the
//! read loop decodes inbound text and binary frames and feeds them to the
//! send use case. Both are generic over the socket halves so they run without
//! a network in tests.

use std::{fmt, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::ws::{Message, WebSocket},
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use thiserror::Error;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at, timeout},
};

use crate::{
    config::ConnectionConfig,
    domain::{ChatMessage, ConnectionId, RoomId, UserId},
    hub::{HubHandle, MailboxReceiver},
    infrastructure::dto::websocket::{InboundMessage, OutboundMessage},
    usecase::SendMessageUseCase,
};

/// Why the read loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReadEnd {
    PeerClosed,
    DeadlineExceeded,
    Transport(String),
    HubUnavailable,
    WriterStopped,
}

#[derive(Debug, Error)]
enum WriteError {
    #[error("write timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Transport(String),
}

/// A registered member of a room with an open socket
pub struct Connection {
    id: ConnectionId,
    room_id: RoomId,
    user_id: UserId,
    hub: HubHandle,
    send_message: Arc<SendMessageUseCase>,
    config: ConnectionConfig,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        room_id: RoomId,
        user_id: UserId,
        hub: HubHandle,
        send_message: Arc<SendMessageUseCase>,
        config: ConnectionConfig,
    ) -> Self {
        Self {
            id,
            room_id,
            user_id,
            hub,
            send_message,
            config,
        }
    }

    /// Run both loops on an upgraded socket until the connection ends
    pub async fn run(self, socket: WebSocket, outbox: MailboxReceiver) {
        let (sink, stream) = socket.split();
        self.serve(sink, stream, outbox).await;
    }

    /// Run both loops on the given socket halves.
    ///
    /// Whichever loop ends first ends the connection. A frame already being
    /// sent is finished before the read loop notices a dead writer. On every
    /// exit path the connection is unregistered from the hub, which closes
    /// the mailbox and lets the write loop flush, send a Close frame and shut
    /// the sink.
    pub async fn serve<S, R, E>(self, sink: S, stream: R, outbox: MailboxReceiver)
    where
        S: Sink<Message> + Unpin + Send + 'static,
        S::Error: fmt::Display + Send,
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: fmt::Display,
    {
        let mut writer = tokio::spawn(write_loop(sink, outbox, self.config, self.id));

        let end = self.read_loop(stream, &mut writer).await;
        tracing::info!(
            "Connection {} ({}) in room '{}' closed: {:?}",
            self.id,
            self.user_id,
            self.room_id,
            end
        );

        if let Err(e) = self.hub.unregister(self.room_id.clone(), self.id).await {
            tracing::warn!("Failed to unregister connection {}: {}", self.id, e);
        }

        if end != ReadEnd::WriterStopped
            && let Err(e) = writer.await
        {
            tracing::error!("Write loop of connection {} failed: {}", self.id, e);
        }
    }

    async fn read_loop<R, E>(&self, mut stream: R, writer: &mut JoinHandle<()>) -> ReadEnd
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: fmt::Display,
    {
        loop {
            let next = tokio::select! {
                next = timeout(self.config.pong_wait, stream.next()) => next,
                result = &mut *writer => {
                    if let Err(e) = result {
                        tracing::error!("Write loop of connection {} failed: {}", self.id, e);
                    }
                    return ReadEnd::WriterStopped;
                }
            };
            let frame = match next {
                Err(_) => return ReadEnd::DeadlineExceeded,
                Ok(None) => return ReadEnd::PeerClosed,
                Ok(Some(Err(e))) => return ReadEnd::Transport(e.to_string()),
                Ok(Some(Ok(frame))) => frame,
            };

            let payload = match &frame {
                Message::Text(text) => text.as_str().as_bytes(),
                Message::Binary(data) => &data[..],
                Message::Close(_) => return ReadEnd::PeerClosed,
                Message::Pong(_) => {
                    tracing::trace!("Pong from connection {}", self.id);
                    continue;
                }
                Message::Ping(_) => {
                    tracing::trace!("Ping from connection {}", self.id);
                    continue;
                }
            };
            if let Err(end) = self.handle_payload(payload).await {
                return end;
            }
        }
    }

    /// Decode one data frame and send it. Malformed frames are skipped.
    async fn handle_payload(&self, payload: &[u8]) -> Result<(), ReadEnd> {
        let inbound = match serde_json::from_slice::<InboundMessage>(payload) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(
                    "Failed to decode frame from '{}' in room '{}': {}",
                    self.user_id,
                    self.room_id,
                    e
                );
                return Ok(());
            }
        };
        if let Some(file) = &inbound.file {
            tracing::debug!("Attachment reference '{}' is not forwarded", file);
        }

        self.send_message
            .execute(self.room_id.clone(), self.user_id.clone(), inbound.content)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::warn!("Dropping message from '{}': {}", self.user_id, e);
                ReadEnd::HubUnavailable
            })
    }
}

/// Drain the mailbox to the socket, pinging the peer when idle.
async fn write_loop<S>(
    mut sink: S,
    mut outbox: MailboxReceiver,
    config: ConnectionConfig,
    id: ConnectionId,
) where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    let ping_period = config.ping_period();
    let mut ping = interval_at(Instant::now() + ping_period, ping_period);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            next = outbox.recv() => {
                let Some(message) = next else {
                    // mailbox closed by the hub
                    let _ = send_frame(&mut sink, Message::Close(None), config.write_wait).await;
                    break;
                };
                let frame = match encode(&message) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!("Failed to encode message for connection {}: {}", id, e);
                        continue;
                    }
                };
                if let Err(e) = send_frame(&mut sink, frame, config.write_wait).await {
                    tracing::warn!("Write to connection {} failed: {}", id, e);
                    break;
                }
            }
            _ = ping.tick() => {
                let frame = Message::Ping(Bytes::new());
                if let Err(e) = send_frame(&mut sink, frame, config.write_wait).await {
                    tracing::warn!("Ping to connection {} failed: {}", id, e);
                    break;
                }
            }
        }
    }

    if let Ok(Err(e)) = timeout(config.write_wait, sink.close()).await {
        tracing::debug!("Closing connection {} failed: {}", id, e);
    }
    tracing::debug!("Write loop of connection {} finished", id);
}

async fn send_frame<S>(
    sink: &mut S,
    frame: Message,
    deadline: Duration,
) -> Result<(), WriteError>
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    match timeout(deadline, sink.send(frame)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(WriteError::Transport(e.to_string())),
        Err(_) => Err(WriteError::Timeout(deadline)),
    }
}

fn encode(message: &ChatMessage) -> Result<Message, serde_json::Error> {
    let json = serde_json::to_string(&OutboundMessage::from(message))?;
    Ok(Message::Text(json.into()))
}
