//! # Product Client
//!
//! High-level API for the `products` table.
use crate::clients::map_gateway_error;
use crate::model::{Product, ProductId, ProductInsert, ProductPatch};
use crate::product_table::ProductError;
use async_trait::async_trait;
use table_actor::{GatewayError, Query, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product table.
#[derive(Clone)]
pub struct ProductClient {
    inner: TableClient<Product>,
}

impl ProductClient {
    pub fn new(inner: TableClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, row: ProductInsert) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.insert(row).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Whole catalog, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.select(Query::all().order_by_desc(|p: &Product| (p.created_at, p.id)))
            .await
    }

    /// Products that can be added to an order, by name.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Product>, ProductError> {
        self.select(
            Query::all()
                .filter(|p: &Product| p.is_active)
                .order_by(|p: &Product| p.name.clone()),
        )
        .await
    }
}

#[async_trait]
impl TableAccess<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &TableClient<Product> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        map_gateway_error(e, ProductError::NotFound, ProductError::Gateway)
    }
}
