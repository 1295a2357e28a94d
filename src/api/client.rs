use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::warn;

// Unbounded hangs would otherwise surface as a stuck caller; a timeout is
// reported like any other transport failure.
const REQUEST_TIMEOUT_SECS: u64 = 15;

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Shared HTTP client with connection pooling and a bounded request timeout.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// GET a URL and decode the JSON body, reporting failure as a value.
///
/// Transport errors, non-2xx statuses, and undecodable bodies all collapse
/// to `None`. This is the only place network faults are absorbed; everything
/// above assumes failures arrive as values, never as panics or `Err`.
pub async fn fetch_safe(url: &str, api_key: Option<&str>) -> Option<Value> {
    let mut request = shared_client().get(url);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }

    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("fetch failed: {url}: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("{} from {url}", response.status());
        return None;
    }

    match response.json::<Value>().await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("undecodable body from {url}: {e}");
            None
        }
    }
}
