//! Dashboard-side reconciliation of the live order feed.
//!
//! Incoming messages are idempotent hints: the same event may arrive more
//! than once (room copy + global copy), and ordering relative to REST
//! responses is unspecified. The feed therefore dedups by order id and
//! treats every mutation as apply-if-sensible. When the local list is in
//! doubt, the fix is a full resynchronization, never a targeted rollback.

use anyhow::Result;
use tracing::warn;
use uuid::Uuid;

use orderdesk_core::event::{employee_room, ControlMessage, LiveMessage, ROOM_ADMINS, ROOM_EMPLOYEES};
use orderdesk_core::model::{Order, OrderStatus, Role};

use crate::rest::ApiClient;

/// In-memory order list, kept in sync with the server by applying live
/// messages and occasional full refetches.
#[derive(Debug, Default)]
pub struct OrderFeed {
    orders: Vec<Order>,
}

impl OrderFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Replace the entire local list with a fresh server snapshot.
    pub fn resync(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// Apply one live message; returns whether the list changed.
    pub fn apply(&mut self, msg: &LiveMessage) -> bool {
        match msg {
            LiveMessage::OrderCreated(order) => {
                // Duplicate suppression: the same creation arrives via the
                // room copy and the global copy.
                if self.orders.iter().any(|o| o.id == order.id) {
                    return false;
                }
                self.orders.insert(0, order.clone());
                true
            }
            LiveMessage::OrderUpdated(order) => {
                match self.orders.iter_mut().find(|o| o.id == order.id) {
                    Some(slot) => {
                        *slot = order.clone();
                        true
                    }
                    None => false,
                }
            }
            LiveMessage::OrderDeleted(r) => {
                let before = self.orders.len();
                self.orders.retain(|o| o.id != r.id);
                self.orders.len() != before
            }
            // Summary only; the matching OrderUpdated carries the row.
            LiveMessage::OrderStatusChanged(_) => false,
        }
    }

    /// Parse a raw wire payload and apply it.
    pub fn apply_json(&mut self, text: &str) -> Result<bool, serde_json::Error> {
        let msg: LiveMessage = serde_json::from_str(text)?;
        Ok(self.apply(&msg))
    }

    /// Optimistically set an order's status before the round-trip
    /// confirms it. Returns the previous status if the order is held.
    pub fn set_status(&mut self, id: Uuid, status: OrderStatus) -> Option<OrderStatus> {
        let order = self.orders.iter_mut().find(|o| o.id == id)?;
        let old = order.status;
        order.status = status;
        Some(old)
    }
}

/// Control messages a dashboard sends right after connecting.
/// Admins join the admin room; employees join their identity room plus
/// the shared employee room (backward-compatible targeting).
pub fn join_messages(role: Role, profile_id: Uuid) -> Vec<ControlMessage> {
    match role {
        Role::Admin => vec![ControlMessage::Join {
            room: ROOM_ADMINS.to_string(),
        }],
        Role::Employee => vec![
            ControlMessage::Join {
                room: employee_room(profile_id),
            },
            ControlMessage::Join {
                room: ROOM_EMPLOYEES.to_string(),
            },
        ],
    }
}

/// A feed paired with the REST client, implementing the optimistic-update
/// contract: mutate locally, persist, and on failure resynchronize the
/// whole list instead of compensating the failed mutation.
pub struct Dashboard {
    pub api: ApiClient,
    pub feed: OrderFeed,
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            feed: OrderFeed::new(),
        }
    }

    /// Load the initial order list from the server.
    pub async fn load(&mut self) -> Result<()> {
        let orders = self.api.list_orders(None).await?;
        self.feed.resync(orders);
        Ok(())
    }

    /// Optimistic status change: local state may transiently diverge from
    /// the persisted state; divergence is corrected by a full refetch.
    pub async fn push_status(&mut self, id: Uuid, status: OrderStatus) -> Result<()> {
        self.feed.set_status(id, status);
        match self.api.update_status(id, status).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("status update failed: {} — resynchronizing", e);
                let orders = self.api.list_orders(None).await?;
                self.feed.resync(orders);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orderdesk_core::event::{OrderRef, StatusChange};

    fn make_order(id: Uuid) -> Order {
        Order {
            id,
            customer_name: "Fah".into(),
            flavors: vec!["strawberry".into()],
            sweetness: "less".into(),
            crushed_type: "coarse".into(),
            package_type: "bag".into(),
            amount: 35.0,
            notes: None,
            payment_proof: None,
            status: OrderStatus::Pending,
            assigned_to: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_creations_leave_one_entry() {
        let mut feed = OrderFeed::new();
        let order = make_order(Uuid::new_v4());
        let msg = LiveMessage::OrderCreated(order.clone());

        assert!(feed.apply(&msg));
        assert!(!feed.apply(&msg));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.orders()[0].id, order.id);
    }

    #[test]
    fn update_replaces_matching_entry_and_ignores_unknown() {
        let id = Uuid::new_v4();
        let mut feed = OrderFeed::from_orders(vec![make_order(id)]);

        let mut updated = make_order(id);
        updated.status = OrderStatus::Completed;
        assert!(feed.apply(&LiveMessage::OrderUpdated(updated)));
        assert_eq!(feed.orders()[0].status, OrderStatus::Completed);

        // Update for an order we never saw: ignored, list unchanged.
        let unknown = make_order(Uuid::new_v4());
        assert!(!feed.apply(&LiveMessage::OrderUpdated(unknown)));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn deletion_removes_holder_and_noops_elsewhere() {
        let id = Uuid::new_v4();
        let mut holder = OrderFeed::from_orders(vec![make_order(id)]);
        let mut bystander = OrderFeed::new();

        let msg = LiveMessage::OrderDeleted(OrderRef { id });
        assert!(holder.apply(&msg));
        assert!(holder.is_empty());
        assert!(!bystander.apply(&msg));
    }

    #[test]
    fn status_change_summary_mutates_nothing() {
        let id = Uuid::new_v4();
        let mut feed = OrderFeed::from_orders(vec![make_order(id)]);
        let changed = feed.apply(&LiveMessage::OrderStatusChanged(StatusChange {
            id,
            old_status: OrderStatus::Pending,
            new_status: OrderStatus::Completed,
            customer_name: "Fah".into(),
        }));
        assert!(!changed);
        assert_eq!(feed.orders()[0].status, OrderStatus::Pending);
    }

    #[test]
    fn apply_json_parses_wire_payloads() {
        let mut feed = OrderFeed::new();
        let order = make_order(Uuid::new_v4());
        let raw = serde_json::to_string(&LiveMessage::OrderCreated(order.clone())).unwrap();

        assert!(feed.apply_json(&raw).unwrap());
        assert_eq!(feed.orders()[0].id, order.id);
        assert!(feed.apply_json("not json").is_err());
    }

    #[test]
    fn optimistic_set_status_returns_previous() {
        let id = Uuid::new_v4();
        let mut feed = OrderFeed::from_orders(vec![make_order(id)]);

        let old = feed.set_status(id, OrderStatus::Completed);
        assert_eq!(old, Some(OrderStatus::Pending));
        assert_eq!(feed.orders()[0].status, OrderStatus::Completed);

        assert_eq!(feed.set_status(Uuid::new_v4(), OrderStatus::Cancelled), None);
    }

    #[test]
    fn resync_replaces_the_whole_list() {
        let mut feed = OrderFeed::from_orders(vec![make_order(Uuid::new_v4())]);
        let fresh = vec![make_order(Uuid::new_v4()), make_order(Uuid::new_v4())];
        feed.resync(fresh.clone());
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.orders()[0].id, fresh[0].id);
    }

    #[test]
    fn join_messages_by_role() {
        let profile = Uuid::new_v4();
        assert_eq!(
            join_messages(Role::Admin, profile),
            vec![ControlMessage::Join { room: "admins".into() }]
        );
        assert_eq!(
            join_messages(Role::Employee, profile),
            vec![
                ControlMessage::Join { room: format!("employee:{}", profile) },
                ControlMessage::Join { room: "employees".into() },
            ]
        );
    }
}
