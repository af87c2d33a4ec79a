//! HTTP API Client
//!
//! Browser-side access to the stats API.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;
use tropimon_stats::dashboard::{FetchError, JsonSource};

/// Local storage key holding an API base override
pub const API_URL_KEY: &str = "tropimon_api_url";

/// Default API base URL: same origin as the page
pub const DEFAULT_API_BASE: &str = "";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// `fetch`-backed JSON source
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSource;

#[async_trait(?Send)]
impl JsonSource for FetchSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
