//! Live order feed: WebSocket transport, room registry, and event fan-out.
//!
//! The registry maps room names to active connection handles; `join` and
//! `leave` are its only mutating operations. The broadcaster reads the
//! registry and pushes serialized events — fire-and-forget, no
//! acknowledgment, and never an error surfaced to the triggering request.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use orderdesk_core::event::{
    ControlMessage, LiveMessage, OrderRef, StatusChange, ROOM_ADMINS, ROOM_EMPLOYEES,
};
use orderdesk_core::model::Order;

use crate::state::AppState;

type ConnectionSender = mpsc::UnboundedSender<String>;

// ── Room registry ────────────────────────────────────────────────

#[derive(Default)]
struct RoomsInner {
    /// Every open connection, keyed by connection id.
    connections: HashMap<Uuid, ConnectionSender>,
    /// Room name → members. Rooms appear on first join and are dropped
    /// when their last member leaves.
    rooms: HashMap<String, HashMap<Uuid, ConnectionSender>>,
}

/// Subscription registry for the live channel.
#[derive(Clone, Default)]
pub struct Rooms {
    inner: Arc<RwLock<RoomsInner>>,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new connection in the global set.
    pub async fn register(&self, id: Uuid, tx: ConnectionSender) {
        self.inner.write().await.connections.insert(id, tx);
    }

    /// Drop a connection from the global set and from every room.
    pub async fn unregister(&self, id: Uuid) {
        let mut inner = self.inner.write().await;
        inner.connections.remove(&id);
        inner.rooms.retain(|_, members| {
            members.remove(&id);
            !members.is_empty()
        });
    }

    /// Add a connection to a room. Unknown connection ids are ignored;
    /// joining the same room twice is a no-op.
    pub async fn join(&self, room: &str, id: Uuid) {
        let mut inner = self.inner.write().await;
        let Some(tx) = inner.connections.get(&id).cloned() else {
            return;
        };
        inner.rooms.entry(room.to_string()).or_default().insert(id, tx);
    }

    /// Remove a connection from a room; absent membership is a no-op.
    pub async fn leave(&self, room: &str, id: Uuid) {
        let mut inner = self.inner.write().await;
        if let Some(members) = inner.rooms.get_mut(room) {
            members.remove(&id);
            if members.is_empty() {
                inner.rooms.remove(room);
            }
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }

    /// Push a payload to every member of a room. Returns the number of
    /// sends attempted; closed receivers are skipped silently.
    pub async fn broadcast_room(&self, room: &str, payload: &str) -> usize {
        let inner = self.inner.read().await;
        let Some(members) = inner.rooms.get(room) else {
            return 0;
        };
        let mut delivered = 0;
        for tx in members.values() {
            if tx.send(payload.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Push a payload to every open connection.
    pub async fn broadcast_all(&self, payload: &str) -> usize {
        let inner = self.inner.read().await;
        let mut delivered = 0;
        for tx in inner.connections.values() {
            if tx.send(payload.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

// ── Order event broadcaster ──────────────────────────────────────

/// Fans order lifecycle events out to the admin room, the employee room,
/// and every connected client. A connection subscribed to a room receives
/// the room copy and the global copy; dashboards dedup by order id.
#[derive(Clone)]
pub struct OrderBroadcaster {
    rooms: Rooms,
}

impl OrderBroadcaster {
    pub fn new(rooms: Rooms) -> Self {
        Self { rooms }
    }

    pub async fn order_created(&self, order: &Order) {
        self.fan_out(&LiveMessage::OrderCreated(order.clone())).await;
    }

    pub async fn order_updated(&self, order: &Order) {
        self.fan_out(&LiveMessage::OrderUpdated(order.clone())).await;
    }

    pub async fn order_deleted(&self, id: Uuid) {
        self.fan_out(&LiveMessage::OrderDeleted(OrderRef { id })).await;
    }

    /// Status-transition summary, pushed to all clients only.
    pub async fn status_changed(&self, change: StatusChange) {
        let Some(payload) = encode(&LiveMessage::OrderStatusChanged(change)) else {
            return;
        };
        self.rooms.broadcast_all(&payload).await;
    }

    async fn fan_out(&self, msg: &LiveMessage) {
        let Some(payload) = encode(msg) else {
            return;
        };
        self.rooms.broadcast_room(ROOM_ADMINS, &payload).await;
        self.rooms.broadcast_room(ROOM_EMPLOYEES, &payload).await;
        self.rooms.broadcast_all(&payload).await;
    }
}

fn encode(msg: &LiveMessage) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("failed to encode live message: {}", e);
            None
        }
    }
}

// ── WebSocket handler ────────────────────────────────────────────

pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.rooms.register(id, tx).await;
    debug!("live client {} connected", id);

    // Forward queued payloads to this client.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Consume control messages (join/leave); ignore everything else.
    let rooms = state.rooms.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ControlMessage>(&text) {
                    Ok(ControlMessage::Join { room }) => rooms.join(&room, id).await,
                    Ok(ControlMessage::Leave { room }) => rooms.leave(&room, id).await,
                    Err(_) => debug!("ignoring unrecognized control message"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish (client disconnect or channel close).
    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.rooms.unregister(id).await;
    debug!("live client {} disconnected", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orderdesk_core::model::OrderStatus;

    fn make_order() -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_name: "Nok".into(),
            flavors: vec!["lychee".into(), "plum".into()],
            sweetness: "normal".into(),
            crushed_type: "fine".into(),
            package_type: "cup".into(),
            amount: 45.0,
            notes: None,
            payment_proof: None,
            status: OrderStatus::Pending,
            assigned_to: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn connect(rooms: &Rooms) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        rooms.register(id, tx).await;
        (id, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[tokio::test]
    async fn creation_reaches_all_three_destinations_once() {
        let rooms = Rooms::new();
        let broadcaster = OrderBroadcaster::new(rooms.clone());

        let (admin, mut admin_rx) = connect(&rooms).await;
        let (employee, mut employee_rx) = connect(&rooms).await;
        let (_guest, mut guest_rx) = connect(&rooms).await;
        rooms.join(ROOM_ADMINS, admin).await;
        rooms.join(ROOM_EMPLOYEES, employee).await;

        let order = make_order();
        broadcaster.order_created(&order).await;

        // Room members get the room copy plus the global copy; a client in
        // no room gets exactly the global copy.
        let admin_msgs = drain(&mut admin_rx);
        let employee_msgs = drain(&mut employee_rx);
        let guest_msgs = drain(&mut guest_rx);
        assert_eq!(admin_msgs.len(), 2);
        assert_eq!(employee_msgs.len(), 2);
        assert_eq!(guest_msgs.len(), 1);

        for raw in admin_msgs.iter().chain(&employee_msgs).chain(&guest_msgs) {
            let msg: LiveMessage = serde_json::from_str(raw).unwrap();
            match msg {
                LiveMessage::OrderCreated(o) => assert_eq!(o.id, order.id),
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn deletion_carries_only_the_identifier() {
        let rooms = Rooms::new();
        let broadcaster = OrderBroadcaster::new(rooms.clone());
        let (_conn, mut rx) = connect(&rooms).await;

        let id = Uuid::new_v4();
        broadcaster.order_deleted(id).await;

        let msgs = drain(&mut rx);
        assert_eq!(msgs.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&msgs[0]).unwrap();
        assert_eq!(value["type"], "order_deleted");
        assert_eq!(value["data"], serde_json::json!({"id": id}));
    }

    #[tokio::test]
    async fn status_change_goes_to_all_clients_only() {
        let rooms = Rooms::new();
        let broadcaster = OrderBroadcaster::new(rooms.clone());
        let (admin, mut admin_rx) = connect(&rooms).await;
        rooms.join(ROOM_ADMINS, admin).await;

        broadcaster
            .status_changed(StatusChange {
                id: Uuid::new_v4(),
                old_status: OrderStatus::Pending,
                new_status: OrderStatus::Completed,
                customer_name: "Nok".into(),
            })
            .await;

        // One copy despite room membership: the summary skips rooms.
        assert_eq!(drain(&mut admin_rx).len(), 1);
    }

    #[tokio::test]
    async fn broadcast_with_no_listeners_is_a_noop() {
        let rooms = Rooms::new();
        let broadcaster = OrderBroadcaster::new(rooms.clone());
        broadcaster.order_created(&make_order()).await;
        assert_eq!(rooms.connection_count().await, 0);
    }

    #[tokio::test]
    async fn unregister_removes_room_membership() {
        let rooms = Rooms::new();
        let (id, mut rx) = connect(&rooms).await;
        rooms.join(ROOM_ADMINS, id).await;
        rooms.unregister(id).await;

        assert_eq!(rooms.broadcast_room(ROOM_ADMINS, "x").await, 0);
        assert_eq!(rooms.broadcast_all("x").await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn join_requires_registered_connection() {
        let rooms = Rooms::new();
        rooms.join(ROOM_ADMINS, Uuid::new_v4()).await;
        assert_eq!(rooms.broadcast_room(ROOM_ADMINS, "x").await, 0);
    }
}
