//! In-memory aggregation of order rows into report buckets.
//!
//! Inputs arrive pre-filtered by the datastore query; everything here is a
//! linear scan. Buckets are UTC calendar days — an order lands in the day
//! its `created_at` falls on in UTC.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use orderdesk_core::model::{Order, OrderStatus};

// ── Report types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlavorCount {
    pub flavor: String,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusBreakdown {
    /// Sum of `amount` over completed orders in the window.
    pub total: f64,
    /// All orders in the window regardless of status.
    pub count: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesSummary {
    pub today: StatusBreakdown,
    pub month: StatusBreakdown,
}

// ── Aggregations ─────────────────────────────────────────────────

/// Day-bucketed sales for the trailing window ending at `today`,
/// oldest day first. Always returns exactly `days` buckets; days with no
/// matching orders report zero.
pub fn daily_sales(orders: &[Order], days: u32, today: NaiveDate) -> Vec<DayBucket> {
    let mut by_day: HashMap<NaiveDate, (f64, usize)> = HashMap::new();
    for order in orders {
        let entry = by_day.entry(order.created_at.date_naive()).or_default();
        entry.0 += order.amount;
        entry.1 += 1;
    }

    (0..days)
        .rev()
        .map(|back| {
            let date = today - Duration::days(i64::from(back));
            let (total, count) = by_day.get(&date).copied().unwrap_or((0.0, 0));
            DayBucket { date, total, count }
        })
        .collect()
}

/// Occurrences per flavor name across all orders' flavor lists, most
/// frequent first (name ascending on ties, for stable output).
pub fn flavor_frequency(orders: &[Order]) -> Vec<FlavorCount> {
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for order in orders {
        for flavor in &order.flavors {
            *tally.entry(flavor.as_str()).or_default() += 1;
        }
    }

    let mut counts: Vec<FlavorCount> = tally
        .into_iter()
        .map(|(flavor, count)| FlavorCount {
            flavor: flavor.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.flavor.cmp(&b.flavor)));
    counts
}

/// Status partitions for the two overlapping windows "today" and
/// "current calendar month".
pub fn summary(orders: &[Order], today: NaiveDate) -> SalesSummary {
    SalesSummary {
        today: breakdown(orders.iter().filter(|o| o.created_at.date_naive() == today)),
        month: breakdown(orders.iter().filter(|o| {
            let d = o.created_at.date_naive();
            d.year() == today.year() && d.month() == today.month()
        })),
    }
}

fn breakdown<'a>(orders: impl Iterator<Item = &'a Order>) -> StatusBreakdown {
    let mut b = StatusBreakdown {
        total: 0.0,
        count: 0,
        completed: 0,
        pending: 0,
        cancelled: 0,
    };
    for order in orders {
        b.count += 1;
        match order.status {
            OrderStatus::Completed => {
                b.completed += 1;
                b.total += order.amount;
            }
            OrderStatus::Pending => b.pending += 1,
            OrderStatus::Cancelled => b.cancelled += 1,
        }
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn order_on(date: NaiveDate, status: OrderStatus, amount: f64, flavors: &[&str]) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_name: "test".into(),
            flavors: flavors.iter().map(|f| f.to_string()).collect(),
            sweetness: "normal".into(),
            crushed_type: "fine".into(),
            package_type: "cup".into(),
            amount,
            notes: None,
            payment_proof: None,
            status,
            assigned_to: None,
            created_at: Utc.from_utc_datetime(&date.and_hms_opt(12, 30, 0).unwrap()),
            updated_at: Utc.from_utc_datetime(&date.and_hms_opt(12, 30, 0).unwrap()),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_sales_always_returns_one_bucket_per_day() {
        let today = day(2025, 3, 10);
        let orders = vec![
            order_on(day(2025, 3, 10), OrderStatus::Completed, 40.0, &["lychee"]),
            order_on(day(2025, 3, 10), OrderStatus::Completed, 25.0, &["plum"]),
            order_on(day(2025, 3, 8), OrderStatus::Completed, 30.0, &["lychee"]),
            // Outside the window: must not appear anywhere.
            order_on(day(2025, 3, 1), OrderStatus::Completed, 99.0, &["mango"]),
        ];

        let buckets = daily_sales(&orders, 7, today);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, day(2025, 3, 4));
        assert_eq!(buckets[6].date, today);
        assert_eq!(buckets[6].total, 65.0);
        assert_eq!(buckets[6].count, 2);
        // Day with no orders reports zero rather than being skipped.
        assert_eq!(buckets[5].count, 0);
        assert_eq!(buckets[5].total, 0.0);
        assert_eq!(buckets[4].date, day(2025, 3, 8));
        assert_eq!(buckets[4].total, 30.0);
    }

    #[test]
    fn daily_sales_single_day_window() {
        let today = day(2025, 3, 10);
        let buckets = daily_sales(&[], 1, today);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, today);
    }

    #[test]
    fn flavor_counts_sum_to_total_occurrences() {
        let d = day(2025, 3, 10);
        let orders = vec![
            order_on(d, OrderStatus::Completed, 10.0, &["lychee", "plum"]),
            order_on(d, OrderStatus::Pending, 10.0, &["lychee"]),
            order_on(d, OrderStatus::Cancelled, 10.0, &["mango", "lychee", "plum"]),
        ];

        let counts = flavor_frequency(&orders);
        let occurrences: usize = orders.iter().map(|o| o.flavors.len()).sum();
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), occurrences);

        assert_eq!(counts[0].flavor, "lychee");
        assert_eq!(counts[0].count, 3);
        // Tie between mango(1) and nothing else at plum(2); order is
        // count desc, then name asc.
        assert_eq!(counts[1].flavor, "plum");
        assert_eq!(counts[2].flavor, "mango");
    }

    #[test]
    fn flavor_frequency_of_empty_input() {
        assert!(flavor_frequency(&[]).is_empty());
    }

    #[test]
    fn summary_partitions_today() {
        let today = day(2025, 3, 10);
        let orders = vec![
            order_on(today, OrderStatus::Completed, 10.0, &[]),
            order_on(today, OrderStatus::Pending, 5.0, &[]),
            order_on(today, OrderStatus::Cancelled, 3.0, &[]),
        ];

        let s = summary(&orders, today);
        assert_eq!(s.today.total, 10.0);
        assert_eq!(s.today.count, 3);
        assert_eq!(s.today.completed, 1);
        assert_eq!(s.today.pending, 1);
        assert_eq!(s.today.cancelled, 1);
    }

    #[test]
    fn summary_month_window_includes_today() {
        let today = day(2025, 3, 10);
        let orders = vec![
            order_on(today, OrderStatus::Completed, 10.0, &[]),
            order_on(day(2025, 3, 2), OrderStatus::Completed, 20.0, &[]),
            // Previous month: counted nowhere.
            order_on(day(2025, 2, 28), OrderStatus::Completed, 50.0, &[]),
        ];

        let s = summary(&orders, today);
        assert_eq!(s.today.total, 10.0);
        assert_eq!(s.today.count, 1);
        assert_eq!(s.month.total, 30.0);
        assert_eq!(s.month.count, 2);
    }
}
