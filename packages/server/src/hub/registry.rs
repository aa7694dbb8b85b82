//! Room registry.
//!
//! Invariant: a room key is present iff its member set is non-empty.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{ChatMessage, ConnectionId, RoomId, RoomSummary};

use super::handle::ConnectionHandle;

/// Result of one fan-out pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub delivered: usize,
    pub evicted: Vec<ConnectionId>,
}

/// Rooms and their members. Owned exclusively by the hub coordinator.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, HashMap<ConnectionId, ConnectionHandle>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connection: ConnectionHandle) {
        tracing::info!(
            "Connection {} ({}) joined room '{}'",
            connection.id,
            connection.user_id,
            connection.room_id
        );
        self.rooms
            .entry(connection.room_id.clone())
            .or_default()
            .insert(connection.id, connection);
    }

    /// Remove a member, closing its mailbox. Returns whether it was present.
    pub fn unregister(&mut self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };
        let Some(connection) = members.remove(connection_id) else {
            return false;
        };
        if members.is_empty() {
            self.rooms.remove(room_id);
            tracing::debug!("Room '{}' is empty and was dropped", room_id);
        }
        tracing::info!(
            "Connection {} ({}) left room '{}'",
            connection.id,
            connection.user_id,
            room_id
        );
        true
    }

    /// Offer a message to every member of its room without waiting.
    ///
    /// A member whose mailbox is full or already closed is evicted in the
    /// same pass; the rest of the room still receives the message.
    pub fn broadcast(&mut self, message: ChatMessage) -> BroadcastOutcome {
        let room_id = message.room_id.clone();
        let Some(members) = self.rooms.get_mut(&room_id) else {
            tracing::debug!("Broadcast to room '{}' without members, dropping", room_id);
            return BroadcastOutcome::default();
        };

        let message = Arc::new(message);
        let mut outcome = BroadcastOutcome::default();
        for (id, connection) in members.iter() {
            match connection.mailbox.try_send(Arc::clone(&message)) {
                Ok(()) => outcome.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Mailbox of connection {} ({}) is full, evicting from room '{}'",
                        id,
                        connection.user_id,
                        room_id
                    );
                    outcome.evicted.push(*id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Mailbox of connection {} is closed, evicting", id);
                    outcome.evicted.push(*id);
                }
            }
        }

        for id in &outcome.evicted {
            members.remove(id);
        }
        if members.is_empty() {
            self.rooms.remove(&room_id);
            tracing::debug!("Room '{}' is empty and was dropped", room_id);
        }

        outcome
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map_or(0, HashMap::len)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Live rooms sorted by room id
    pub fn summaries(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|(room_id, members)| RoomSummary {
                room_id: room_id.clone(),
                members: members.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }
}
