//! Cart aggregation with server-confirmed totals.
//!
//! Prices are integer minor-currency units (cents) throughout; the total is
//! always derived from the items and never floating point, so repeated syncs
//! cannot drift by fractional cents.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One selected product variant in a cart.
///
/// Uniqueness key is `(product_id, variant_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product_title: String,
    pub variant_id: i64,
    pub variant_title: String,
    /// Price in integer minor units.
    pub price: i64,
    pub quantity: i64,
    pub image: String,
}

/// A persisted cart with a derived total.
///
/// Items are only reachable through the mutators, which keep `total` equal to
/// the sum of `price * quantity`; the wire `total` of incoming payloads is
/// discarded and recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: String,
    items: Vec<CartItem>,
    total: i64,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self {
            id,
            items: Vec::new(),
            total: 0,
        }
    }

    /// Build a cart from an item list, recomputing the total.
    ///
    /// # Errors
    ///
    /// `Validation` when an item has a non-positive quantity or a negative
    /// price, or when the total does not fit in `i64`.
    pub fn from_items(id: String, items: Vec<CartItem>) -> Result<Self, StoreError> {
        let total = total_of(&items)?;
        Ok(Self { id, items, total })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of `price * quantity` over items, in integer minor units.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging into an existing `(product_id, variant_id)` entry
    /// by summing quantities instead of duplicating.
    ///
    /// On error the cart is left unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` for an invalid item, or when the merged quantity or the
    /// total overflows.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), StoreError> {
        validate(&item)?;
        let mut items = self.items.clone();
        match items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id
                && existing.variant_id == item.variant_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(item.quantity).ok_or_else(
                    || StoreError::Validation("cart quantity overflows".to_string()),
                )?;
            }
            None => items.push(item),
        }
        let total = total_of(&items)?;
        self.items = items;
        self.total = total;
        Ok(())
    }

    /// Remove the matching entry; no-op if absent.
    pub fn remove_item(&mut self, product_id: &str, variant_id: i64) {
        self.items
            .retain(|item| !(item.product_id == product_id && item.variant_id == variant_id));
        // Removing entries from an already validated cart cannot overflow.
        self.total = self
            .items
            .iter()
            .map(|item| item.price.saturating_mul(item.quantity))
            .sum();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
    }

    /// Re-derive the total after deserializing a wire payload, discarding
    /// whatever total the payload claimed.
    ///
    /// # Errors
    ///
    /// `Validation` for invalid items or an overflowing total.
    pub fn recompute(&mut self) -> Result<(), StoreError> {
        self.total = total_of(&self.items)?;
        Ok(())
    }
}

fn validate(item: &CartItem) -> Result<(), StoreError> {
    if item.quantity <= 0 {
        return Err(StoreError::Validation(format!(
            "quantity must be positive for variant {}",
            item.variant_id
        )));
    }
    if item.price < 0 {
        return Err(StoreError::Validation(format!(
            "price must not be negative for variant {}",
            item.variant_id
        )));
    }
    Ok(())
}

/// Validated sum of `price * quantity`, in integer minor units.
fn total_of(items: &[CartItem]) -> Result<i64, StoreError> {
    let mut total = 0_i64;
    for item in items {
        validate(item)?;
        let line = item
            .price
            .checked_mul(item.quantity)
            .ok_or_else(|| StoreError::Validation("cart total overflows".to_string()))?;
        total = total
            .checked_add(line)
            .ok_or_else(|| StoreError::Validation("cart total overflows".to_string()))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, variant_id: i64, price: i64, quantity: i64) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            product_title: "Sample T-Shirt".to_string(),
            variant_id,
            variant_title: "Black / M".to_string(),
            price,
            quantity,
            image: "http://x/shirt.png".to_string(),
        }
    }

    #[test]
    fn test_add_item_merges_matching_key() {
        let mut cart = Cart::new("c1".to_string());
        cart.add_item(item("p1", 1, 500, 1)).expect("add");
        cart.add_item(item("p1", 1, 500, 2)).expect("add");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|i| i.quantity), Some(3));
        assert_eq!(cart.total(), 1500);
    }

    #[test]
    fn test_add_item_different_variant_appends() {
        let mut cart = Cart::new("c1".to_string());
        cart.add_item(item("p1", 1, 500, 1)).expect("add");
        cart.add_item(item("p1", 2, 700, 1)).expect("add");

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total(), 1200);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut cart = Cart::new("c1".to_string());
        cart.add_item(item("p1", 1, 500, 1)).expect("add");
        cart.remove_item("p9", 1);
        cart.remove_item("p1", 9);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), 500);
    }

    #[test]
    fn test_remove_then_total_tracks_items() {
        let mut cart = Cart::new("c1".to_string());
        cart.add_item(item("p1", 1, 500, 2)).expect("add");
        cart.add_item(item("p2", 4, 3999, 1)).expect("add");
        cart.remove_item("p1", 1);

        assert_eq!(cart.total(), 3999);
        cart.clear();
        assert_eq!(cart.total(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_items_discards_wire_total() {
        let json = serde_json::json!({
            "id": "c1",
            "items": [{
                "productId": "p1",
                "productTitle": "Sample T-Shirt",
                "variantId": 1,
                "variantTitle": "Black / M",
                "price": 2499,
                "quantity": 2,
                "image": ""
            }],
            "total": 1
        });
        let mut cart: Cart = serde_json::from_value(json).expect("deserialize");
        cart.recompute().expect("recompute");
        assert_eq!(cart.total(), 4998);
    }

    #[test]
    fn test_wire_shape() {
        let cart =
            Cart::from_items("c1".to_string(), vec![item("p1", 1, 500, 3)]).expect("from_items");
        let json = serde_json::to_value(&cart).expect("serialize");
        assert_eq!(json["total"], 1500);
        assert_eq!(json["items"][0]["productId"], "p1");
        assert_eq!(json["items"][0]["variantId"], 1);
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let result = Cart::from_items("c1".to_string(), vec![item("p1", 1, i64::MAX, 2)]);
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = Cart::from_items(
            "c1".to_string(),
            vec![item("p1", 1, i64::MAX, 1), item("p2", 2, i64::MAX, 1)],
        );
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        for quantity in [0, -3] {
            let result = Cart::from_items("c1".to_string(), vec![item("p1", 1, 500, quantity)]);
            assert!(matches!(result, Err(StoreError::Validation(_))));
        }
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = Cart::from_items("c1".to_string(), vec![item("p1", 1, -500, 3)]);
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_failed_add_leaves_cart_unchanged() {
        let mut cart = Cart::new("c1".to_string());
        cart.add_item(item("p1", 1, 500, 1)).expect("add");

        assert!(cart.add_item(item("p1", 1, 500, -3)).is_err());
        assert!(cart.add_item(item("p2", 2, i64::MAX, 2)).is_err());

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), 500);
    }
}
