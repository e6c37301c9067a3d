//! Printify catalog client.
//!
//! Read-only product source for the shop and the productGrid component. The
//! API response shapes are converted to the core [`Product`] model at this
//! boundary. When no API token is configured the client serves a small mock
//! catalog so the shop works out of the box; this is logged, never surfaced
//! to the shopper.

use std::collections::BTreeMap;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use jaki_core::{Product, Variant};

const PRINTIFY_API_BASE: &str = "https://api.printify.com/v1";

/// How long catalog responses are cached.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Most images carried per product.
const MAX_IMAGES: usize = 5;

/// Printify catalog failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("printify request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("printify responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("no printify shops configured")]
    NoShops,

    #[error("product not found: {0}")]
    ProductNotFound(String),
}

/// A Printify shop (the catalog always uses the first one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub title: String,
}

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Shops,
    Products,
    Product(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Shops(Vec<Shop>),
    Products(Vec<Product>),
    Product(Box<Product>),
}

/// Client for the Printify catalog, with mock fallback and a short-TTL
/// response cache.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a client; `token = None` enables mock mode.
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            cache: Cache::builder()
                .max_capacity(256)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// List shops. Mock mode returns a single placeholder shop.
    ///
    /// # Errors
    ///
    /// Upstream HTTP failures.
    pub async fn shops(&self) -> Result<Vec<Shop>, CatalogError> {
        let Some(token) = &self.token else {
            tracing::warn!("PRINTIFY_API_TOKEN not configured - using mock shop");
            return Ok(vec![Shop {
                id: 0,
                title: "Mock Shop".to_string(),
            }]);
        };

        if let Some(CacheValue::Shops(shops)) = self.cache.get(&CacheKey::Shops).await {
            return Ok(shops);
        }

        let shops: Vec<Shop> = self.fetch(token, "/shops.json").await?;
        self.cache
            .insert(CacheKey::Shops, CacheValue::Shops(shops.clone()))
            .await;
        Ok(shops)
    }

    /// List the first shop's products.
    ///
    /// # Errors
    ///
    /// Upstream HTTP failures, or `NoShops` when the account has no shop.
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let Some(token) = &self.token else {
            tracing::warn!("PRINTIFY_API_TOKEN not configured - returning mock products");
            return Ok(mock_products());
        };

        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            return Ok(products);
        }

        let shop = self.first_shop().await?;
        let page: ProductPage = self
            .fetch(token, &format!("/shops/{}/products.json", shop.id))
            .await?;
        let products: Vec<Product> = page.data.into_iter().map(ApiProduct::into_product).collect();
        self.cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch one product by id from the first shop.
    ///
    /// # Errors
    ///
    /// `ProductNotFound` for an unknown id; upstream HTTP failures otherwise.
    pub async fn product(&self, product_id: &str) -> Result<Product, CatalogError> {
        let Some(token) = &self.token else {
            return mock_products()
                .into_iter()
                .find(|p| p.id == product_id)
                .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()));
        };

        let key = CacheKey::Product(product_id.to_string());
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            return Ok(*product);
        }

        let shop = self.first_shop().await?;
        let api: ApiProduct = self
            .fetch(token, &format!("/shops/{}/products/{product_id}.json", shop.id))
            .await?;
        let product = api.into_product();
        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    async fn first_shop(&self) -> Result<Shop, CatalogError> {
        self.shops()
            .await?
            .into_iter()
            .next()
            .ok_or(CatalogError::NoShops)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        token: &SecretString,
        endpoint: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(format!("{PRINTIFY_API_BASE}{endpoint}"))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

// =============================================================================
// API Response Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductPage {
    data: Vec<ApiProduct>,
}

#[derive(Debug, Deserialize)]
struct ApiProduct {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    images: Vec<ApiImage>,
    #[serde(default)]
    variants: Vec<ApiVariant>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    src: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    is_default: bool,
}

#[derive(Debug, Deserialize)]
struct ApiVariant {
    id: i64,
    title: String,
    price: i64,
    is_enabled: bool,
    #[serde(default)]
    options: Option<serde_json::Value>,
}

impl ApiProduct {
    /// Convert to the core model: default image first, at most
    /// `MAX_IMAGES` images, options flattened to a string map.
    fn into_product(self) -> Product {
        let (default_images, other_images): (Vec<_>, Vec<_>) = self
            .images
            .into_iter()
            .partition(|img| img.is_default || img.position == "0");
        let images: Vec<String> = default_images
            .into_iter()
            .chain(other_images)
            .map(|img| img.src)
            .take(MAX_IMAGES)
            .collect();

        Product {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            images,
            variants: self.variants.into_iter().map(ApiVariant::into_variant).collect(),
            tags: self.tags,
        }
    }
}

impl ApiVariant {
    fn into_variant(self) -> Variant {
        let options: BTreeMap<String, String> = self
            .options
            .as_ref()
            .and_then(serde_json::Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Variant {
            id: self.id,
            title: self.title,
            price: self.price,
            is_enabled: self.is_enabled,
            options,
        }
    }
}

// =============================================================================
// Mock Catalog
// =============================================================================

fn mock_variant(id: i64, title: &str, price: i64, options: &[(&str, &str)]) -> Variant {
    Variant {
        id,
        title: title.to_string(),
        price,
        is_enabled: true,
        options: options
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    }
}

/// The sample catalog served when no API token is configured.
#[must_use]
pub fn mock_products() -> Vec<Product> {
    vec![
        Product {
            id: "mock-1".to_string(),
            title: "Sample T-Shirt".to_string(),
            description: "Configure your Printify API token to see real products".to_string(),
            images: vec!["https://via.placeholder.com/600x600?text=Sample+T-Shirt".to_string()],
            variants: vec![
                mock_variant(1, "Black / M", 2499, &[("color", "Black"), ("size", "M")]),
                mock_variant(2, "White / M", 2499, &[("color", "White"), ("size", "M")]),
                mock_variant(3, "Black / L", 2699, &[("color", "Black"), ("size", "L")]),
            ],
            tags: vec!["sample".to_string()],
        },
        Product {
            id: "mock-2".to_string(),
            title: "Sample Hoodie".to_string(),
            description: "Configure your Printify API token to see real products".to_string(),
            images: vec!["https://via.placeholder.com/600x600?text=Sample+Hoodie".to_string()],
            variants: vec![
                mock_variant(4, "Gray / M", 3999, &[("color", "Gray"), ("size", "M")]),
                mock_variant(5, "Navy / M", 3999, &[("color", "Navy"), ("size", "M")]),
            ],
            tags: vec!["sample".to_string()],
        },
    ]
}
