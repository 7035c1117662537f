//! Client-side building blocks for orderdesk dashboards.
//!
//! `ApiClient` wraps the server's REST surface; `OrderFeed` reconciles the
//! live WebSocket feed against a local in-memory order list. The WebSocket
//! transport itself belongs to the embedding application — this crate
//! builds the join messages and applies the wire payloads.

pub mod feed;
pub mod rest;

pub use feed::{join_messages, Dashboard, OrderFeed};
pub use rest::ApiClient;
