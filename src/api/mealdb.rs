use async_trait::async_trait;
use serde_json::Value;
use urlencoding::encode;

use super::client::fetch_safe;
use super::RecipeSource;

/// Keyless public fallback recipe database.
pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Fallback recipe upstream: TheMealDB. Payloads arrive under `meals` or
/// `categories`, with `str*`-convention field names; on a no-result query the
/// array is JSON null.
pub struct MealDbClient {
    base_url: String,
}

impl MealDbClient {
    pub fn new() -> Self {
        Self::with_base_url(MEALDB_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn array(&self, path_and_query: &str, field: &str) -> Option<Vec<Value>> {
        let body = fetch_safe(&format!("{}/{path_and_query}", self.base_url), None).await?;
        // null here means the request worked but matched nothing
        Some(
            body.get(field)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        )
    }
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn list_meals(&self) -> Option<Vec<Value>> {
        self.array("search.php?f=a", "meals").await
    }

    async fn meal_by_id(&self, id: &str) -> Option<Value> {
        let records = self.array(&format!("lookup.php?i={}", encode(id)), "meals").await?;
        records.into_iter().next()
    }

    async fn categories(&self) -> Option<Vec<Value>> {
        self.array("categories.php", "categories").await
    }

    async fn areas(&self) -> Option<Vec<Value>> {
        self.array("list.php?a=list", "meals").await
    }

    async fn filter_by_category(&self, category: &str) -> Option<Vec<Value>> {
        self.array(&format!("filter.php?c={}", encode(category)), "meals").await
    }

    async fn filter_by_area(&self, area: &str) -> Option<Vec<Value>> {
        self.array(&format!("filter.php?a={}", encode(area)), "meals").await
    }

    async fn search(&self, query: &str) -> Option<Vec<Value>> {
        self.array(&format!("search.php?s={}", encode(query)), "meals").await
    }
}
