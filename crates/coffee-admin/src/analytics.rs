//! # Analytics & Dashboard
//!
//! Read-only summaries computed from freshly fetched rows. Nothing is cached and
//! nothing is written.
//!
//! The aggregation itself lives in the pure functions [`summarize`] and
//! [`snapshot`], which take "now" as an argument; [`Analytics`] only fetches the
//! rows and supplies the clock.

use crate::clients::{OrderClient, OrderItemClient, ProductClient};
use crate::model::money::sum;
use crate::model::{Order, OrderItem, OrderStatus, OrderWithItems, Product, ProductId};
use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, instrument};

/// Days covered by [`AnalyticsSummary::daily_revenue`], today included.
pub const REVENUE_WINDOW_DAYS: u64 = 7;
/// Length of [`AnalyticsSummary::top_products`].
pub const TOP_PRODUCTS: usize = 5;
/// Length of [`DashboardSnapshot::recent_orders`].
pub const RECENT_ORDERS: usize = 5;

const UNKNOWN_PRODUCT: &str = "Unknown";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("Failed to load {table}: {reason}")]
    Fetch { table: &'static str, reason: String },
}

fn fetch_error(table: &'static str, e: impl std::fmt::Display) -> AnalyticsError {
    AnalyticsError::Fetch {
        table,
        reason: e.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub units: u32,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    /// Sum of `total_amount` over completed orders.
    pub total_revenue: Decimal,
    pub completed_orders: usize,
    pub product_count: usize,
    /// Oldest day first, zero-filled.
    pub daily_revenue: Vec<DailyRevenue>,
    /// Highest line revenue first.
    pub top_products: Vec<ProductSales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub orders_last_month: usize,
    pub sales_last_month: Decimal,
    pub recent_orders: Vec<OrderWithItems>,
}

/// Builds the analytics summary.
///
/// Revenue figures count completed orders only. Product rankings count every
/// line ever sold; lines whose product no longer exists are grouped as
/// `Unknown`.
pub fn summarize(
    orders: &[Order],
    lines: &[OrderItem],
    products: &[Product],
    today: NaiveDate,
) -> AnalyticsSummary {
    let completed: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .collect();

    let daily_revenue = (0..REVENUE_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailyRevenue {
            date,
            revenue: sum(completed
                .iter()
                .filter(|o| o.created_at.date_naive() == date)
                .map(|o| o.total_amount)),
        })
        .collect();

    let names: HashMap<ProductId, &str> = products.iter().map(|p| (p.id, p.name.as_str())).collect();
    let mut sales: Vec<ProductSales> = Vec::new();
    for line in lines {
        let name = names.get(&line.product_id).copied().unwrap_or(UNKNOWN_PRODUCT);
        match sales.iter_mut().find(|s| s.name == name) {
            Some(entry) => {
                entry.units += line.quantity;
                entry.revenue += line.subtotal;
            }
            None => sales.push(ProductSales {
                name: name.to_string(),
                units: line.quantity,
                revenue: line.subtotal,
            }),
        }
    }
    sales.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    sales.truncate(TOP_PRODUCTS);

    AnalyticsSummary {
        total_revenue: sum(completed.iter().map(|o| o.total_amount)),
        completed_orders: completed.len(),
        product_count: products.len(),
        daily_revenue,
        top_products: sales,
    }
}

/// Builds the dashboard header figures from orders created in the month before
/// `now`, plus the already-joined recent orders.
pub fn snapshot(
    orders_since: &[Order],
    recent_orders: Vec<OrderWithItems>,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let since = month_before(now);
    let window: Vec<&Order> = orders_since.iter().filter(|o| o.created_at >= since).collect();
    DashboardSnapshot {
        orders_last_month: window.len(),
        sales_last_month: sum(window.iter().map(|o| o.total_amount)),
        recent_orders,
    }
}

fn month_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(1)).unwrap_or(now)
}

/// Fetches rows and builds the summaries.
#[derive(Clone)]
pub struct Analytics {
    orders: OrderClient,
    lines: OrderItemClient,
    products: ProductClient,
}

impl Analytics {
    pub fn new(orders: OrderClient, lines: OrderItemClient, products: ProductClient) -> Self {
        Self {
            orders,
            lines,
            products,
        }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<AnalyticsSummary, AnalyticsError> {
        let completed = self
            .orders
            .list_by_status(OrderStatus::Completed)
            .await
            .map_err(|e| fetch_error("orders", e))?;
        let products = self
            .products
            .list_products()
            .await
            .map_err(|e| fetch_error("products", e))?;
        let lines = self
            .lines
            .list_all()
            .await
            .map_err(|e| fetch_error("order_items", e))?;

        let summary = summarize(&completed, &lines, &products, Utc::now().date_naive());
        info!(
            revenue = %summary.total_revenue,
            orders = summary.completed_orders,
            "Analytics computed"
        );
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardSnapshot, AnalyticsError> {
        let now = Utc::now();
        let orders = self
            .orders
            .list_since(month_before(now))
            .await
            .map_err(|e| fetch_error("orders", e))?;
        let recent = self
            .orders
            .list_with_items(&self.lines, &self.products, Some(RECENT_ORDERS))
            .await
            .map_err(|e| fetch_error("orders", e))?;

        let dashboard = snapshot(&orders, recent, now);
        info!(
            orders = dashboard.orders_last_month,
            sales = %dashboard.sales_last_month,
            "Dashboard computed"
        );
        Ok(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderItemId};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn order(id: u32, status: OrderStatus, cents: i64, created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId(id),
            order_number: format!("ORD{id}"),
            customer_name: None,
            table_number: None,
            total_amount: Decimal::new(cents, 2),
            status,
            payment_method: None,
            notes: None,
            created_by: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn line(id: u32, product: u32, quantity: u32, cents: i64) -> OrderItem {
        let unit_price = Decimal::new(cents, 2);
        OrderItem {
            id: OrderItemId(id),
            order_id: OrderId(1),
            product_id: ProductId(product),
            quantity,
            unit_price,
            subtotal: unit_price * Decimal::from(quantity),
            created_at: at(2026, 10, 1),
        }
    }

    fn product(id: u32, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            description: None,
            price: Decimal::ONE,
            image_url: None,
            category: "coffee".to_string(),
            stock: 0,
            is_active: true,
            created_at: at(2026, 1, 1),
            updated_at: at(2026, 1, 1),
        }
    }

    #[test]
    fn test_revenue_counts_completed_orders_only() {
        let today = at(2026, 10, 17).date_naive();
        let orders = vec![
            order(1, OrderStatus::Completed, 1225, at(2026, 10, 17)),
            order(2, OrderStatus::Pending, 5000, at(2026, 10, 17)),
            order(3, OrderStatus::Completed, 300, at(2026, 10, 11)),
            order(4, OrderStatus::Completed, 800, at(2026, 10, 10)),
        ];
        let summary = summarize(&orders, &[], &[product(1, "Latte")], today);

        assert_eq!(summary.completed_orders, 3);
        assert_eq!(summary.total_revenue, Decimal::new(2325, 2));
        assert_eq!(summary.product_count, 1);

        let days: Vec<(NaiveDate, Decimal)> = summary
            .daily_revenue
            .iter()
            .map(|d| (d.date, d.revenue))
            .collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], (at(2026, 10, 11).date_naive(), Decimal::new(300, 2)));
        assert_eq!(days[6], (today, Decimal::new(1225, 2)));
        assert!(days[1..6].iter().all(|(_, revenue)| revenue.is_zero()));
    }

    #[test]
    fn test_top_products_rank_by_revenue_with_unknown_bucket() {
        let products = vec![
            product(1, "Latte"),
            product(2, "Muffin"),
            product(3, "Tea"),
            product(4, "Scone"),
            product(5, "Bagel"),
            product(6, "Juice"),
        ];
        let lines = vec![
            line(1, 1, 2, 450),
            line(2, 2, 1, 325),
            line(3, 1, 1, 450),
            line(4, 3, 1, 200),
            line(5, 4, 1, 275),
            line(6, 5, 1, 150),
            line(7, 6, 1, 100),
            line(8, 99, 4, 300),
            line(9, 98, 1, 100),
        ];
        let summary = summarize(&[], &lines, &products, at(2026, 10, 17).date_naive());

        let top: Vec<(&str, u32, Decimal)> = summary
            .top_products
            .iter()
            .map(|s| (s.name.as_str(), s.units, s.revenue))
            .collect();
        assert_eq!(
            top,
            vec![
                ("Latte", 3, Decimal::new(1350, 2)),
                ("Unknown", 5, Decimal::new(1300, 2)),
                ("Muffin", 1, Decimal::new(325, 2)),
                ("Scone", 1, Decimal::new(275, 2)),
                ("Tea", 1, Decimal::new(200, 2)),
            ]
        );
    }

    #[test]
    fn test_snapshot_uses_the_last_month() {
        let now = at(2026, 10, 17);
        let orders = vec![
            order(1, OrderStatus::Pending, 1000, at(2026, 10, 16)),
            order(2, OrderStatus::Cancelled, 250, at(2026, 9, 17)),
            order(3, OrderStatus::Completed, 999, at(2026, 9, 16)),
        ];
        let snapshot = snapshot(&orders, Vec::new(), now);
        assert_eq!(snapshot.orders_last_month, 2);
        assert_eq!(snapshot.sales_last_month, Decimal::new(1250, 2));
    }
}
