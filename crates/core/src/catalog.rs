//! Read-only product catalog types.
//!
//! Products come from the print-on-demand collaborator; this core never
//! mutates them. A shopper picks a specific SKU by choosing a value for every
//! option key (e.g. color + size), and only variants matching ALL selections
//! are eligible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A purchasable SKU of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    pub title: String,
    /// Price in integer minor units.
    pub price: i64,
    pub is_enabled: bool,
    /// Option values distinguishing this SKU, e.g. `{color: Black, size: M}`.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// A catalog product with its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ordered image URLs, default image first.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Variants a shopper can actually buy.
    pub fn enabled_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| v.is_enabled)
    }

    /// The option keys shoppers must choose from, taken from the first
    /// enabled variant.
    #[must_use]
    pub fn option_keys(&self) -> Vec<String> {
        self.enabled_variants()
            .next()
            .map(|v| v.options.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Distinct values offered for one option key across enabled variants.
    #[must_use]
    pub fn option_values(&self, key: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for variant in self.enabled_variants() {
            if let Some(value) = variant.options.get(key) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        values
    }

    /// Find the enabled variant matching every selected option
    /// simultaneously, or `None` when the combination does not exist.
    #[must_use]
    pub fn find_variant(&self, selections: &BTreeMap<String, String>) -> Option<&Variant> {
        self.enabled_variants().find(|variant| {
            selections
                .iter()
                .all(|(key, value)| variant.options.get(key) == Some(value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i64, enabled: bool, options: &[(&str, &str)]) -> Variant {
        Variant {
            id,
            title: options
                .iter()
                .map(|(_, v)| (*v).to_string())
                .collect::<Vec<_>>()
                .join(" / "),
            price: 2499,
            is_enabled: enabled,
            options: options
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    fn shirt() -> Product {
        Product {
            id: "p1".to_string(),
            title: "Sample T-Shirt".to_string(),
            description: String::new(),
            images: vec![],
            variants: vec![
                variant(1, true, &[("color", "Black"), ("size", "M")]),
                variant(2, true, &[("color", "White"), ("size", "M")]),
                variant(3, true, &[("color", "Black"), ("size", "L")]),
                variant(4, false, &[("color", "Red"), ("size", "M")]),
            ],
            tags: vec![],
        }
    }

    fn selections(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_find_variant_matches_all_options() {
        let product = shirt();
        let found = product.find_variant(&selections(&[("color", "Black"), ("size", "L")]));
        assert_eq!(found.map(|v| v.id), Some(3));
    }

    #[test]
    fn test_find_variant_missing_combination() {
        let product = shirt();
        let found = product.find_variant(&selections(&[("color", "White"), ("size", "L")]));
        assert!(found.is_none());
    }

    #[test]
    fn test_find_variant_skips_disabled() {
        let product = shirt();
        let found = product.find_variant(&selections(&[("color", "Red"), ("size", "M")]));
        assert!(found.is_none());
    }

    #[test]
    fn test_option_keys_and_values() {
        let product = shirt();
        assert_eq!(product.option_keys(), ["color", "size"]);
        assert_eq!(product.option_values("color"), ["Black", "White"]);
        assert_eq!(product.option_values("size"), ["M", "L"]);
    }
}
