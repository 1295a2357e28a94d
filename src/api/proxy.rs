use async_trait::async_trait;
use serde_json::Value;
use urlencoding::encode;

use super::client::fetch_safe;
use super::RecipeSource;

/// Primary recipe upstream: the NutriPlan proxy API. List endpoints wrap
/// their payload in a `results` array; the detail endpoint returns the meal
/// object bare.
pub struct ProxyClient {
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn results(&self, path_and_query: &str) -> Option<Vec<Value>> {
        let body = fetch_safe(&format!("{}/{path_and_query}", self.base_url), None).await?;
        Some(
            body.get("results")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        )
    }
}

#[async_trait]
impl RecipeSource for ProxyClient {
    async fn list_meals(&self) -> Option<Vec<Value>> {
        self.results("meals/search?f=a").await
    }

    async fn meal_by_id(&self, id: &str) -> Option<Value> {
        fetch_safe(&format!("{}/meals/{}", self.base_url, encode(id)), None).await
    }

    async fn categories(&self) -> Option<Vec<Value>> {
        self.results("meals/categories").await
    }

    async fn areas(&self) -> Option<Vec<Value>> {
        self.results("meals/areas").await
    }

    async fn filter_by_category(&self, category: &str) -> Option<Vec<Value>> {
        self.results(&format!("meals/filter?category={}", encode(category))).await
    }

    async fn filter_by_area(&self, area: &str) -> Option<Vec<Value>> {
        self.results(&format!("meals/filter?area={}", encode(area))).await
    }

    async fn search(&self, query: &str) -> Option<Vec<Value>> {
        self.results(&format!("meals/search?q={}", encode(query))).await
    }
}
