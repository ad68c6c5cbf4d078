use crate::analytics::Analytics;
use crate::clients::{OrderClient, OrderItemClient, ProductClient, ProfileClient, SettingClient};
use crate::composer::{OrderNumberGenerator, OrderSubmitter};
use crate::config::DashboardConfig;
use crate::order_item_table::LineRefs;
use crate::order_lifecycle::OrderLifecycle;
use crate::session::LocalSessionProvider;
use crate::settings::SettingsStore;
use crate::{order_item_table, order_table, product_table, profile_table, setting_table};
use std::sync::Arc;
use tracing::{error, info};

/// The running dashboard backend: every table plus the services built on them.
///
/// `DashboardSystem` is responsible for:
/// - **Lifecycle Management**: starting each table task and stopping them all
/// - **Dependency Wiring**: handing the `order_items` table the clients it checks
///   references with, and giving each service the clients it needs
///
/// # Example
///
/// ```rust
/// use coffee_admin::config::DashboardConfig;
/// use coffee_admin::runtime::DashboardSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = DashboardSystem::new(&DashboardConfig::default());
///     let products = system.products.list_products().await.map_err(|e| e.to_string())?;
///     assert!(products.is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct DashboardSystem {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub order_items: OrderItemClient,
    pub profiles: ProfileClient,
    pub settings_table: SettingClient,

    /// Order Composer persistence.
    pub submitter: OrderSubmitter,
    /// Order Lifecycle Manager.
    pub lifecycle: OrderLifecycle,
    pub analytics: Analytics,
    pub session: LocalSessionProvider,
    pub settings: SettingsStore,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    /// Spawns every table and wires the services. Must be called inside a Tokio
    /// runtime.
    pub fn new(config: &DashboardConfig) -> Self {
        let buffer_size = config.gateway.buffer_size;

        // =====================================================================
        // 1. Tables without dependencies
        // =====================================================================

        let (product_actor, products) = product_table::new(buffer_size);
        let (order_actor, orders) = order_table::new(buffer_size);
        let (profile_actor, profiles) = profile_table::new(buffer_size);
        let (setting_actor, settings_table) = setting_table::new(buffer_size);

        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));
        let profile_handle = tokio::spawn(profile_actor.run(()));
        let setting_handle = tokio::spawn(setting_actor.run(()));

        // =====================================================================
        // 2. Order lines, which check their order and product
        // =====================================================================

        let (item_actor, order_items) = order_item_table::new(buffer_size);
        let refs = LineRefs {
            orders: orders.clone(),
            products: products.clone(),
        };
        let item_handle = tokio::spawn(item_actor.run(refs));

        // =====================================================================
        // 3. Services
        // =====================================================================

        let numbers = Arc::new(OrderNumberGenerator::new(config.orders.number_prefix.clone()));
        let submitter = OrderSubmitter::new(orders.clone(), order_items.clone(), numbers)
            .with_compensation(config.orders.compensate_failed_lines);
        let lifecycle = OrderLifecycle::new(orders.clone(), config.orders.transition_policy);
        let analytics = Analytics::new(orders.clone(), order_items.clone(), products.clone());
        let session = LocalSessionProvider::new(profiles.clone());
        let settings = SettingsStore::new(settings_table.clone());

        info!(
            buffer_size,
            policy = ?config.orders.transition_policy,
            compensate = config.orders.compensate_failed_lines,
            "Dashboard system started"
        );

        Self {
            products,
            orders,
            order_items,
            profiles,
            settings_table,
            submitter,
            lifecycle,
            analytics,
            session,
            settings,
            // the order_items task holds order/product clients, so it is awaited first
            handles: vec![
                item_handle,
                product_handle,
                order_handle,
                profile_handle,
                setting_handle,
            ],
        }
    }

    /// Gracefully shuts down every table.
    ///
    /// Dropping the clients (including the copies held by the services) closes
    /// the request channels; each table then drains and exits. The `order_items`
    /// table goes first because it holds clients of `orders` and `products`.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard...");

        let DashboardSystem {
            products,
            orders,
            order_items,
            profiles,
            settings_table,
            submitter,
            lifecycle,
            analytics,
            session,
            settings,
            handles,
        } = self;
        drop((products, orders, order_items, profiles, settings_table));
        drop((submitter, lifecycle, analytics, session, settings));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
