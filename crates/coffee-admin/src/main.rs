//! # Coffee Admin Demo
//!
//! Runs one shift against in-process tables:
//! 1. Loads [`DashboardConfig`] and sets up tracing.
//! 2. Signs up and signs in an admin.
//! 3. Seeds the catalog and composes an order.
//! 4. Submits it, then walks it through its lifecycle.
//! 5. Prints analytics and the dashboard snapshot, then shuts down.

use coffee_admin::composer::OrderComposition;
use coffee_admin::config::DashboardConfig;
use coffee_admin::model::money::format_amount;
use coffee_admin::model::{PaymentMethod, ProductInsert, Role};
use coffee_admin::runtime::DashboardSystem;
use coffee_admin::session::{SessionProvider, SignUp};
use rust_decimal::Decimal;
use table_actor::telemetry::setup_tracing_with;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = DashboardConfig::load().map_err(|e| e.to_string())?;
    setup_tracing_with(&config.logging.filter);

    info!("Starting coffee admin");
    let system = DashboardSystem::new(&config);

    // Staff account
    system
        .session
        .sign_up(SignUp {
            email: "owner@beanhouse.test".to_string(),
            password: "flatwhite".to_string(),
            full_name: "Robin Okafor".to_string(),
            role: Role::Admin,
        })
        .await
        .map_err(|e| e.to_string())?;
    let admin = system
        .session
        .sign_in("owner@beanhouse.test", "flatwhite")
        .await
        .map_err(|e| e.to_string())?;
    info!(id = %admin.id, name = %admin.full_name, "Signed in");

    // Catalog
    let span = tracing::info_span!("catalog");
    let (latte, muffin) = async {
        let latte = system
            .products
            .create_product(ProductInsert::new("Latte", Decimal::new(450, 2)).with_stock(40))
            .await?;
        let muffin = system
            .products
            .create_product(
                ProductInsert::new("Blueberry Muffin", Decimal::new(325, 2))
                    .with_category("pastry")
                    .with_stock(12),
            )
            .await?;
        Ok::<_, coffee_admin::product_table::ProductError>((latte, muffin))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    // Compose and submit
    let mut cart = OrderComposition::new();
    cart.add_item(&latte);
    cart.add_item(&latte);
    cart.add_item(&muffin);
    cart.set_table_number(Some("7".to_string()));
    cart.set_payment_method(Some(PaymentMethod::Card));
    info!(total = %format_amount("$", cart.compute_total()), "Cart ready");

    let span = tracing::info_span!("order_processing");
    let submitted = async { system.submitter.submit(&cart, Some(&admin)).await }
        .instrument(span)
        .await;
    let order = match submitted {
        Ok(saved) => {
            info!(
                order_number = %saved.order.order_number,
                lines = saved.lines.len(),
                "Order submitted"
            );
            saved.order
        }
        Err(e) => {
            error!(error = %e, kind = ?e.kind(), "Order submission failed");
            return Err(e.to_string());
        }
    };

    // Lifecycle
    for _ in 0..2 {
        match system.lifecycle.advance(order.id).await {
            Ok(updated) => info!(order_id = %updated.id, status = %updated.status, "Order advanced"),
            Err(e) => error!(error = %e, "Status change failed"),
        }
    }

    // Reports
    let settings = system.settings.load().await.map_err(|e| e.to_string())?;
    let summary = system.analytics.summary().await.map_err(|e| e.to_string())?;
    info!(
        app = %settings.app_name,
        revenue = %format_amount(&settings.currency, summary.total_revenue),
        completed = summary.completed_orders,
        "Analytics"
    );
    for product in &summary.top_products {
        info!(
            name = %product.name,
            units = product.units,
            revenue = %format_amount(&settings.currency, product.revenue),
            "Top product"
        );
    }

    let dashboard = system.analytics.dashboard().await.map_err(|e| e.to_string())?;
    for recent in &dashboard.recent_orders {
        info!(
            order_number = %recent.order.order_number,
            items = ?recent.product_names(),
            "Recent order"
        );
    }

    system.session.sign_out().await;
    system.shutdown().await?;

    info!("Coffee admin finished");
    Ok(())
}
