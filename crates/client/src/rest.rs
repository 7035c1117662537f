//! HTTP client for the orderdesk server API.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderdesk_core::model::{Order, OrderStatus};

/// Client for the orderdesk REST API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// Request body for creating an order.
#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub flavors: Vec<String>,
    pub sweetness: String,
    pub crushed_type: String,
    pub package_type: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<String>,
}

#[derive(Serialize)]
struct StatusBody {
    status: OrderStatus,
}

#[derive(Serialize)]
struct AssignBody {
    assigned_to: Option<Uuid>,
}

// ── Report mirrors ───────────────────────────────────────────────
// The server's report shapes, mirrored for deserialization.

#[derive(Debug, Clone, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorCount {
    pub flavor: String,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBreakdown {
    pub total: f64,
    pub count: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesSummary {
    pub today: StatusBreakdown,
    pub month: StatusBreakdown,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();
        Self { base_url, http }
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        self.http
            .get(&url)
            .timeout(std::time::Duration::from_secs(3))
            .send()
            .await
            .context("server not reachable")?;
        Ok(())
    }

    /// List orders, optionally filtered by status, newest first.
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>> {
        let mut url = format!("{}/orders", self.base_url);
        if let Some(status) = status {
            url.push_str(&format!("?status={}", status));
        }
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to list orders")?;
        expect_json(resp).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order> {
        let url = format!("{}/orders/{}", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to fetch order")?;
        expect_json(resp).await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let url = format!("{}/orders", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .context("failed to create order")?;
        expect_json(resp).await
    }

    /// Persist a status transition; returns the updated row.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order> {
        let url = format!("{}/orders/{}/status", self.base_url, id);
        let resp = self
            .http
            .patch(&url)
            .json(&StatusBody { status })
            .send()
            .await
            .context("failed to update order status")?;
        expect_json(resp).await
    }

    /// Reassign an order (or clear the assignment with `None`).
    pub async fn assign_order(&self, id: Uuid, assigned_to: Option<Uuid>) -> Result<Order> {
        let url = format!("{}/orders/{}/assign", self.base_url, id);
        let resp = self
            .http
            .patch(&url)
            .json(&AssignBody { assigned_to })
            .send()
            .await
            .context("failed to assign order")?;
        expect_json(resp).await
    }

    pub async fn delete_order(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/orders/{}", self.base_url, id);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .context("failed to delete order")?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("server returned {}: {}", status, body);
        }
        Ok(())
    }

    pub async fn daily_sales(&self, days: u32) -> Result<Vec<DayBucket>> {
        let url = format!("{}/reports/daily?days={}", self.base_url, days);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to fetch daily sales")?;
        expect_json(resp).await
    }

    pub async fn flavor_frequency(&self, days: u32) -> Result<Vec<FlavorCount>> {
        let url = format!("{}/reports/flavors?days={}", self.base_url, days);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to fetch flavor frequency")?;
        expect_json(resp).await
    }

    pub async fn sales_summary(&self) -> Result<SalesSummary> {
        let url = format!("{}/reports/summary", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to fetch sales summary")?;
        expect_json(resp).await
    }
}

async fn expect_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("server returned {}: {}", status, body);
    }
    resp.json().await.context("failed to parse response body")
}
