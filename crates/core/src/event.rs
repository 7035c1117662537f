//! Wire types for the live order channel.
//!
//! The server pushes `LiveMessage`s to connected dashboards; dashboards send
//! `ControlMessage`s to join or leave broadcast rooms. Both sides share these
//! definitions so the JSON contract cannot drift.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Order;

/// Room every admin dashboard joins.
pub const ROOM_ADMINS: &str = "admins";

/// Shared room every employee dashboard joins.
pub const ROOM_EMPLOYEES: &str = "employees";

/// Per-employee identity room, kept for backward-compatible targeting.
pub fn employee_room(profile_id: Uuid) -> String {
    format!("employee:{}", profile_id)
}

// ── Server → client ──────────────────────────────────────────────

/// Event pushed after a successful order mutation.
/// Wire shape: `{"type": "<snake_case variant>", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum LiveMessage {
    OrderCreated(Order),
    OrderUpdated(Order),
    OrderStatusChanged(StatusChange),
    OrderDeleted(OrderRef),
}

/// Summary emitted alongside `OrderUpdated` on status transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: Uuid,
    pub old_status: crate::model::OrderStatus,
    pub new_status: crate::model::OrderStatus,
    pub customer_name: String,
}

/// Deletion carries only the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: Uuid,
}

// ── Client → server ──────────────────────────────────────────────

/// Control message sent by a dashboard over the live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    Join { room: String },
    Leave { room: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    #[test]
    fn deletion_wire_format() {
        let id = Uuid::new_v4();
        let msg = LiveMessage::OrderDeleted(OrderRef { id });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "order_deleted", "data": {"id": id}})
        );
    }

    #[test]
    fn status_change_wire_format() {
        let id = Uuid::new_v4();
        let msg = LiveMessage::OrderStatusChanged(StatusChange {
            id,
            old_status: OrderStatus::Pending,
            new_status: OrderStatus::Completed,
            customer_name: "Mali".into(),
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "order_status_changed");
        assert_eq!(value["data"]["old_status"], "pending");
        assert_eq!(value["data"]["new_status"], "completed");
        assert_eq!(value["data"]["customer_name"], "Mali");
    }

    #[test]
    fn join_control_format() {
        let msg: ControlMessage =
            serde_json::from_str(r#"{"type":"join","room":"admins"}"#).unwrap();
        assert_eq!(msg, ControlMessage::Join { room: ROOM_ADMINS.into() });
    }
}
