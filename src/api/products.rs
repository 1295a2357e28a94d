use async_trait::async_trait;
use serde_json::Value;
use urlencoding::encode;

use super::client::fetch_safe;
use super::ProductSource;

/// Nutrition-facts client over the proxy API. Requires an API key, sent as
/// the `x-api-key` header; there is no fallback provider for product data.
pub struct ProductClient {
    base_url: String,
    api_key: String,
}

impl ProductClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Option<Vec<Value>> {
        let url = format!(
            "{}/nutrition/search?q={}&page={page}&limit={limit}",
            self.base_url,
            encode(query)
        );
        let body = fetch_safe(&url, Some(&self.api_key)).await?;
        // the proxy has shipped both envelope spellings
        let records = body
            .get("results")
            .or_else(|| body.get("products"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Some(records)
    }

    async fn by_barcode(&self, code: &str) -> Option<Value> {
        let url = format!("{}/nutrition/barcode?code={}", self.base_url, encode(code));
        let body = fetch_safe(&url, Some(&self.api_key)).await?;
        let product = body.get("product").filter(|p| !p.is_null()).cloned();
        Some(product.unwrap_or(body))
    }
}
