//! The in-memory cart.
//!
//! An [`OrderComposition`] holds at most one [`SelectionLine`] per product and
//! never a line with quantity zero. Prices are taken from the [`Product`] as it was
//! when added, and that snapshot is what gets persisted.

use crate::composer::ComposeError;
use crate::model::money::{line_subtotal, sum};
use crate::model::{OrderId, OrderInsert, OrderItemInsert, PaymentMethod, Product, ProductId, ProfileId};
use rust_decimal::Decimal;

/// Largest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionLine {
    pub item: Product,
    pub quantity: u32,
}

impl SelectionLine {
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.item.price, self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderComposition {
    lines: Vec<SelectionLine>,
    customer_name: Option<String>,
    table_number: Option<String>,
    payment_method: Option<PaymentMethod>,
    notes: Option<String>,
}

impl OrderComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, merging with an existing line for the same id.
    ///
    /// Stock is not checked. A line already at [`MAX_LINE_QUANTITY`] stays there.
    pub fn add_item(&mut self, item: &Product) {
        match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY),
            None => self.lines.push(SelectionLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
    }

    /// Sets the quantity of an existing line; zero removes it.
    ///
    /// Unknown ids are ignored. Negative quantities and quantities above
    /// [`MAX_LINE_QUANTITY`] are rejected without changing the cart.
    pub fn set_quantity(&mut self, item_id: ProductId, quantity: i64) -> Result<(), ComposeError> {
        if quantity < 0 || quantity > i64::from(MAX_LINE_QUANTITY) {
            return Err(ComposeError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            self.lines.retain(|l| l.item.id != item_id);
            return Ok(());
        }
        let quantity = u32::try_from(quantity).map_err(|_| ComposeError::InvalidQuantity(quantity))?;
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: ProductId) {
        self.lines.retain(|l| l.item.id != item_id);
    }

    /// Exact sum of `price × quantity` over all lines.
    pub fn compute_total(&self) -> Decimal {
        sum(self.lines.iter().map(SelectionLine::subtotal))
    }

    pub fn lines(&self) -> &[SelectionLine] {
        &self.lines
    }

    pub fn line(&self, item_id: ProductId) -> Option<&SelectionLine> {
        self.lines.iter().find(|l| l.item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn set_customer_name(&mut self, name: Option<String>) {
        self.customer_name = name.filter(|n| !n.trim().is_empty());
    }

    pub fn set_table_number(&mut self, table: Option<String>) {
        self.table_number = table.filter(|t| !t.trim().is_empty());
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = method;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn table_number(&self) -> Option<&str> {
        self.table_number.as_deref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Freezes the cart into the rows to persist.
    pub fn draft(
        &self,
        order_number: String,
        created_by: Option<ProfileId>,
    ) -> Result<OrderDraft, ComposeError> {
        if self.is_empty() {
            return Err(ComposeError::EmptyOrder);
        }
        let header = OrderInsert {
            order_number,
            customer_name: self.customer_name.clone(),
            table_number: self.table_number.clone(),
            total_amount: self.compute_total(),
            payment_method: self.payment_method,
            notes: self.notes.clone(),
            created_by,
        };
        let lines = self
            .lines
            .iter()
            .map(|l| (l.item.id, l.quantity, l.item.price))
            .collect();
        Ok(OrderDraft { header, lines })
    }
}

/// A frozen cart: the header to insert and the lines to insert once the header
/// has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub header: OrderInsert,
    lines: Vec<(ProductId, u32, Decimal)>,
}

impl OrderDraft {
    /// Line rows pointing at the saved header.
    pub fn lines_for(&self, order_id: OrderId) -> Vec<OrderItemInsert> {
        self.lines
            .iter()
            .map(|&(product_id, quantity, unit_price)| {
                OrderItemInsert::new(order_id, product_id, quantity, unit_price)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: u32, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            description: None,
            price: Decimal::new(cents, 2),
            image_url: None,
            category: "coffee".to_string(),
            stock: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_adding_twice_merges_into_one_line() {
        let latte = product(1, "Latte", 450);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);
        cart.add_item(&latte);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(latte.id).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_set_quantity_is_absolute_and_zero_removes() {
        let latte = product(1, "Latte", 450);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);

        cart.set_quantity(latte.id, 5).unwrap();
        assert_eq!(cart.line(latte.id).map(|l| l.quantity), Some(5));

        cart.set_quantity(latte.id, 0).unwrap();
        assert!(cart.line(latte.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_quantity_is_rejected_without_change() {
        let latte = product(1, "Latte", 450);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);

        assert_eq!(
            cart.set_quantity(latte.id, -1),
            Err(ComposeError::InvalidQuantity(-1))
        );
        assert_eq!(cart.line(latte.id).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_quantity_is_capped_and_never_wraps() {
        let latte = product(1, "Latte", 450);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);

        let huge = i64::from(u32::MAX);
        assert_eq!(
            cart.set_quantity(latte.id, huge),
            Err(ComposeError::InvalidQuantity(huge))
        );
        assert_eq!(cart.line(latte.id).map(|l| l.quantity), Some(1));

        cart.set_quantity(latte.id, i64::from(MAX_LINE_QUANTITY)).unwrap();
        cart.add_item(&latte);
        assert_eq!(
            cart.line(latte.id).map(|l| l.quantity),
            Some(MAX_LINE_QUANTITY)
        );
        assert_eq!(cart.compute_total(), Decimal::new(450, 2) * Decimal::from(MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_set_quantity_on_unknown_item_is_ignored() {
        let mut cart = OrderComposition::new();
        cart.set_quantity(ProductId(42), 3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let latte = product(1, "Latte", 450);
        let muffin = product(2, "Muffin", 325);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);
        cart.add_item(&muffin);

        cart.remove_item(latte.id);
        let ids: Vec<ProductId> = cart.lines().iter().map(|l| l.item.id).collect();
        assert_eq!(ids, vec![muffin.id]);
    }

    #[test]
    fn test_total_is_exact() {
        let mut cart = OrderComposition::new();
        assert_eq!(cart.compute_total(), Decimal::ZERO);

        for id in 1..=3 {
            let item = product(id, "Cookie", 333);
            cart.add_item(&item);
            cart.set_quantity(item.id, 3).unwrap();
        }
        // 3 lines of 3.33 × 3
        assert_eq!(cart.compute_total(), Decimal::new(2997, 2));

        let mut single = OrderComposition::new();
        let cookie = product(9, "Cookie", 333);
        single.add_item(&cookie);
        single.set_quantity(cookie.id, 3).unwrap();
        assert_eq!(single.compute_total().to_string(), "9.99");
    }

    #[test]
    fn test_total_follows_any_sequence_of_edits() {
        let latte = product(1, "Latte", 450);
        let muffin = product(2, "Muffin", 325);
        let mut cart = OrderComposition::new();

        cart.add_item(&latte);
        cart.add_item(&muffin);
        cart.add_item(&latte);
        cart.set_quantity(muffin.id, 4).unwrap();
        cart.add_item(&muffin);
        cart.set_quantity(latte.id, 0).unwrap();
        cart.add_item(&latte);

        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.item.price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(cart.compute_total(), expected);
        assert_eq!(expected, Decimal::new(2075, 2));
    }

    #[test]
    fn test_draft_snapshots_prices_and_metadata() {
        let latte = product(1, "Latte", 450);
        let muffin = product(2, "Muffin", 325);
        let mut cart = OrderComposition::new();
        cart.add_item(&latte);
        cart.add_item(&latte);
        cart.add_item(&muffin);
        cart.set_table_number(Some("12".to_string()));
        cart.set_customer_name(Some("   ".to_string()));
        cart.set_payment_method(Some(PaymentMethod::Cash));
        cart.set_notes(Some("oat milk".to_string()));

        let draft = cart.draft("ORD1".to_string(), Some(ProfileId(3))).unwrap();
        assert_eq!(draft.header.total_amount, Decimal::new(1225, 2));
        assert_eq!(draft.header.table_number.as_deref(), Some("12"));
        assert_eq!(draft.header.customer_name, None);
        assert_eq!(draft.header.created_by, Some(ProfileId(3)));
        assert_eq!(draft.header.notes.as_deref(), Some("oat milk"));

        let lines = draft.lines_for(OrderId(8));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].order_id, OrderId(8));
        assert_eq!(lines[0].subtotal, Decimal::new(900, 2));
        assert_eq!(lines[1].subtotal, Decimal::new(325, 2));
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let mut cart = OrderComposition::new();
        cart.add_item(&product(1, "Latte", 450));
        cart.set_notes(Some("extra hot".to_string()));
        cart.set_notes(Some(" \t".to_string()));

        let draft = cart.draft("ORD2".to_string(), None).unwrap();
        assert_eq!(draft.header.notes, None);
    }

    #[test]
    fn test_empty_cart_has_no_draft() {
        let cart = OrderComposition::new();
        assert_eq!(cart.draft("ORD1".into(), None), Err(ComposeError::EmptyOrder));
    }
}
