//! TableRow trait implementation for the Product domain type.
//!
//! Inserts and patches share one validation routine so a product can never be
//! edited into a state it could not have been created in.

use crate::model::{Product, ProductId, ProductInsert, ProductPatch};
use crate::product_table::ProductError;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use table_actor::TableRow;

fn validate(name: &str, price: Decimal) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    if price < Decimal::ZERO {
        return Err(ProductError::NegativePrice(price));
    }
    Ok(())
}

#[async_trait]
impl TableRow for Product {
    const TABLE: &'static str = "products";
    type Id = ProductId;
    type Insert = ProductInsert;
    type Patch = ProductPatch;
    type Context = ();
    type Error = ProductError;

    fn from_insert(id: ProductId, row: ProductInsert) -> Result<Self, Self::Error> {
        validate(&row.name, row.price)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            category: row.category,
            stock: row.stock,
            is_active: row.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, patch: ProductPatch, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        validate(&self.name, self.price)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}
