pub mod client;
pub mod mealdb;
pub mod products;
pub mod proxy;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::{
    normalize_area, normalize_category, normalize_meal, normalize_product, Category, Meal, Product,
};

pub use mealdb::MealDbClient;
pub use products::ProductClient;
pub use proxy::ProxyClient;

const ERR_SEARCH_TOO_SHORT: &str = "Search term too short";
const ERR_INVALID_BARCODE: &str = "Invalid barcode";
const ERR_PRODUCTS_NOT_CONFIGURED: &str = "Products API not configured";
const ERR_BARCODE_NOT_CONFIGURED: &str = "Barcode API not configured";

/// Result-as-value wrapper every orchestrator operation returns. An error
/// always rides with the operation's empty default, never a partial payload;
/// nothing in this layer panics or returns `Err` to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    pub fn fail(empty: T, message: impl Into<String>) -> Self {
        Self {
            data: empty,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One recipe upstream. Implementations decode their own response envelope
/// and hand back raw records: `None` means the request failed, an empty vec
/// means it succeeded and matched nothing.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn list_meals(&self) -> Option<Vec<Value>>;
    async fn meal_by_id(&self, id: &str) -> Option<Value>;
    async fn categories(&self) -> Option<Vec<Value>>;
    async fn areas(&self) -> Option<Vec<Value>>;
    async fn filter_by_category(&self, category: &str) -> Option<Vec<Value>>;
    async fn filter_by_area(&self, area: &str) -> Option<Vec<Value>>;
    async fn search(&self, query: &str) -> Option<Vec<Value>>;
}

/// The nutrition-facts upstream. Same raw-record contract as
/// [`RecipeSource`]: `None` means the request failed.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Option<Vec<Value>>;
    async fn by_barcode(&self, code: &str) -> Option<Value>;
}

/// Fallback orchestrator over the two recipe upstreams plus the optional
/// product client. Each operation tries the primary and awaits it fully; a
/// failed request and an empty result both send it to the fallback. Primary
/// is always preferred when both would succeed, and nothing retries.
pub struct NutriApi {
    primary: Box<dyn RecipeSource>,
    fallback: Box<dyn RecipeSource>,
    products: Option<Box<dyn ProductSource>>,
}

fn normalized<T>(records: Option<Vec<Value>>, map: fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    let records = records?;
    let mapped: Vec<T> = records.iter().filter_map(map).collect();
    if mapped.is_empty() {
        None
    } else {
        Some(mapped)
    }
}

impl NutriApi {
    pub fn new(
        primary: Box<dyn RecipeSource>,
        fallback: Box<dyn RecipeSource>,
        products: Option<Box<dyn ProductSource>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            products,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Box::new(ProxyClient::new(config.base_url.clone())),
            Box::new(MealDbClient::new()),
            config
                .usda_api_key
                .clone()
                .map(|key| Box::new(ProductClient::new(config.base_url.clone(), key)) as Box<dyn ProductSource>),
        )
    }

    pub fn products_available(&self) -> bool {
        self.products.is_some()
    }

    /// Initial meal listing (everything starting with 'a'; neither upstream
    /// paginates this, slicing is the caller's business).
    pub async fn get_meals(&self) -> Envelope<Vec<Meal>> {
        if let Some(meals) = normalized(self.primary.list_meals().await, normalize_meal) {
            return Envelope::ok(meals);
        }
        debug!("primary failed for meal list, trying fallback");
        if let Some(meals) = normalized(self.fallback.list_meals().await, normalize_meal) {
            return Envelope::ok(meals);
        }
        Envelope::fail(Vec::new(), "Unable to load meals. Please try again.")
    }

    pub async fn get_meal_details(&self, id: &str) -> Envelope<Option<Meal>> {
        if let Some(raw) = self.primary.meal_by_id(id).await {
            if let Some(meal) = normalize_meal(&raw) {
                return Envelope::ok(Some(meal));
            }
        }
        debug!("primary failed for meal {id}, trying fallback");
        if let Some(raw) = self.fallback.meal_by_id(id).await {
            if let Some(meal) = normalize_meal(&raw) {
                return Envelope::ok(Some(meal));
            }
        }
        Envelope::fail(None, "Meal not found")
    }

    pub async fn get_categories(&self) -> Envelope<Vec<Category>> {
        if let Some(categories) = normalized(self.primary.categories().await, normalize_category) {
            return Envelope::ok(categories);
        }
        debug!("primary failed for categories, trying fallback");
        if let Some(categories) = normalized(self.fallback.categories().await, normalize_category) {
            return Envelope::ok(categories);
        }
        Envelope::fail(Vec::new(), "Unable to load categories")
    }

    pub async fn get_areas(&self) -> Envelope<Vec<String>> {
        if let Some(areas) = normalized(self.primary.areas().await, normalize_area) {
            return Envelope::ok(areas);
        }
        debug!("primary failed for areas, trying fallback");
        if let Some(areas) = normalized(self.fallback.areas().await, normalize_area) {
            return Envelope::ok(areas);
        }
        Envelope::fail(Vec::new(), "Unable to load areas")
    }

    pub async fn filter_by_category(&self, category: &str) -> Envelope<Vec<Meal>> {
        if let Some(meals) = normalized(self.primary.filter_by_category(category).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        debug!("primary failed for category filter, trying fallback");
        if let Some(meals) = normalized(self.fallback.filter_by_category(category).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        Envelope::fail(Vec::new(), "No meals found in this category")
    }

    pub async fn filter_by_area(&self, area: &str) -> Envelope<Vec<Meal>> {
        if let Some(meals) = normalized(self.primary.filter_by_area(area).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        debug!("primary failed for area filter, trying fallback");
        if let Some(meals) = normalized(self.fallback.filter_by_area(area).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        Envelope::fail(Vec::new(), "No meals found in this area")
    }

    pub async fn search_meals(&self, query: &str) -> Envelope<Vec<Meal>> {
        if query.chars().count() < 2 {
            return Envelope::fail(Vec::new(), ERR_SEARCH_TOO_SHORT);
        }
        if let Some(meals) = normalized(self.primary.search(query).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        debug!("primary failed for search, trying fallback");
        if let Some(meals) = normalized(self.fallback.search(query).await, normalize_meal) {
            return Envelope::ok(meals);
        }
        Envelope::fail(Vec::new(), "No meals found")
    }

    /// Product search. No fallback exists for nutrition data, and without a
    /// configured key the operation short-circuits before any network call.
    pub async fn search_products(&self, query: &str, page: u32, limit: u32) -> Envelope<Vec<Product>> {
        if query.chars().count() < 2 {
            return Envelope::fail(Vec::new(), ERR_SEARCH_TOO_SHORT);
        }
        let Some(client) = &self.products else {
            return Envelope::fail(Vec::new(), ERR_PRODUCTS_NOT_CONFIGURED);
        };
        if let Some(products) = normalized(client.search(query, page, limit).await, normalize_product) {
            return Envelope::ok(products);
        }
        Envelope::fail(Vec::new(), "No products found")
    }

    pub async fn get_product_by_barcode(&self, code: &str) -> Envelope<Option<Product>> {
        if code.chars().count() < 8 {
            return Envelope::fail(None, ERR_INVALID_BARCODE);
        }
        let Some(client) = &self.products else {
            return Envelope::fail(None, ERR_BARCODE_NOT_CONFIGURED);
        };
        if let Some(raw) = client.by_barcode(code).await {
            if let Some(product) = normalize_product(&raw) {
                return Envelope::ok(Some(product));
            }
        }
        Envelope::fail(None, "Product not found")
    }
}
