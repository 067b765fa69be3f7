//! Connection hub for the WebSocket transport.
//!
//! Tracks the outbound sender of every live connection and groups
//! connections by session id for selective broadcast. Dead senders are
//! pruned lazily when a send fails.

use crate::session::SessionId;
use axum::extract::ws::Message;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Unique identifier for one WebSocket connection.
pub type ConnId = String;

/// Sender half of a connection's outbound channel.
pub type ConnectionSender = mpsc::UnboundedSender<Message>;

#[derive(Debug, Default)]
struct HubInner {
    connections: HashMap<ConnId, ConnectionSender>,
    groups: HashMap<SessionId, HashSet<ConnId>>,
}

/// Shared registry of connections and session groups.
#[derive(Debug, Clone, Default)]
pub struct Hub {
    inner: Arc<Mutex<HubInner>>,
}

impl Hub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new connection's outbound sender.
    #[instrument(skip(self, sender))]
    pub fn register(&self, conn_id: &str, sender: ConnectionSender) {
        let mut inner = self.lock();
        inner.connections.insert(conn_id.to_string(), sender);
        debug!(conn_id, count = inner.connections.len(), "Connection registered");
    }

    /// Removes a connection and drops it from every session group.
    #[instrument(skip(self))]
    pub fn unregister(&self, conn_id: &str) {
        let mut inner = self.lock();
        inner.connections.remove(conn_id);
        for members in inner.groups.values_mut() {
            members.remove(conn_id);
        }
        inner.groups.retain(|_, members| !members.is_empty());
        debug!(conn_id, count = inner.connections.len(), "Connection unregistered");
    }

    /// Adds a connection to a session's broadcast group.
    #[instrument(skip(self))]
    pub fn join_group(&self, session_id: &str, conn_id: &str) {
        let mut inner = self.lock();
        inner
            .groups
            .entry(session_id.to_string())
            .or_default()
            .insert(conn_id.to_string());
    }

    /// Drops a whole session group (after cancellation).
    #[instrument(skip(self))]
    pub fn drop_group(&self, session_id: &str) {
        let mut inner = self.lock();
        inner.groups.remove(session_id);
    }

    /// Sends a text payload to a single connection.
    #[instrument(skip(self, payload))]
    pub fn send_to(&self, conn_id: &str, payload: &str) {
        let mut inner = self.lock();
        let dead = match inner.connections.get(conn_id) {
            Some(sender) => sender.send(Message::Text(payload.to_string().into())).is_err(),
            None => false,
        };
        if dead {
            inner.connections.remove(conn_id);
        }
    }

    /// Sends a text payload to every live connection.
    #[instrument(skip(self, payload))]
    pub fn broadcast_all(&self, payload: &str) {
        let mut inner = self.lock();
        inner
            .connections
            .retain(|_, sender| sender.send(Message::Text(payload.to_string().into())).is_ok());
    }

    /// Sends a text payload to every connection in a session's group.
    #[instrument(skip(self, payload))]
    pub fn broadcast_group(&self, session_id: &str, payload: &str) {
        let mut inner = self.lock();
        let Some(members) = inner.groups.get(session_id).cloned() else {
            return;
        };
        let mut dead = Vec::new();
        for conn_id in &members {
            if let Some(sender) = inner.connections.get(conn_id) {
                if sender.send(Message::Text(payload.to_string().into())).is_err() {
                    dead.push(conn_id.clone());
                }
            }
        }
        for conn_id in dead {
            inner.connections.remove(&conn_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (ConnectionSender, mpsc::UnboundedReceiver<Message>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_send_to_registered_connection() {
        let hub = Hub::new();
        let (tx, mut rx) = channel();
        hub.register("c1", tx);
        hub.send_to("c1", "hello");
        assert!(matches!(rx.try_recv(), Ok(Message::Text(t)) if t.as_str() == "hello"));
    }

    #[test]
    fn test_group_broadcast_reaches_members_only() {
        let hub = Hub::new();
        let (tx1, mut rx1) = channel();
        let (tx2, mut rx2) = channel();
        hub.register("c1", tx1);
        hub.register("c2", tx2);
        hub.join_group("s1", "c1");

        hub.broadcast_group("s1", "state");
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
    }

    #[test]
    fn test_unregister_removes_from_groups() {
        let hub = Hub::new();
        let (tx, mut rx) = channel();
        hub.register("c1", tx);
        hub.join_group("s1", "c1");
        hub.unregister("c1");

        hub.broadcast_group("s1", "state");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_all() {
        let hub = Hub::new();
        let (tx1, mut rx1) = channel();
        let (tx2, mut rx2) = channel();
        hub.register("c1", tx1);
        hub.register("c2", tx2);

        hub.broadcast_all("lobby");
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }
}
