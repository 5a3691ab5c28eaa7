//! Shared Fabric backend client.
//!
//! One instance is constructed at process startup and shared (`Arc`) across
//! all tool invocations, so the underlying `reqwest` connection pool is
//! reused. Handlers depend on the [`PatternsApi`] trait rather than the
//! concrete client.

use crate::error::{FabricApiError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Pattern operations offered by the Fabric backend.
///
/// The server crate holds this as `Arc<dyn PatternsApi>` so tests can swap
/// in doubles without a live backend.
#[async_trait]
pub trait PatternsApi: Send + Sync {
    /// Fetch the list of available pattern names.
    async fn list_pattern_names(&self) -> Result<Vec<String>>;

    /// Fetch a single pattern by name.
    async fn pattern(&self, name: &str) -> Result<PatternDetail>;
}

/// Payload of `GET /patterns/{name}`.
///
/// Both fields are optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatternDetail {
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
    #[serde(default, rename = "Pattern")]
    pub pattern: Option<String>,
}

/// Client for the Fabric REST API.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Clone)]
pub struct FabricClient {
    inner: Arc<FabricClientInner>,
}

struct FabricClientInner {
    base_url: Url,
    api_key: Option<String>,
    client: Client,
}

impl FabricClient {
    /// Build a client for the backend at `base_url`.
    ///
    /// `timeout` applies to every request issued through this client. When
    /// `api_key` is set it is sent as an `X-API-Key` header.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be parsed as an HTTP base URL
    /// or if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            FabricApiError::Config(format!("invalid Fabric base URL '{base_url}': {e}"))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FabricApiError::Config(format!(
                "invalid Fabric base URL '{base_url}': not a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FabricApiError::from)?;

        Ok(Self {
            inner: Arc::new(FabricClientInner {
                base_url: parsed,
                api_key,
                client,
            }),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        {
            // Validated in `new`: the base URL can be a base.
            let mut path = url
                .path_segments_mut()
                .expect("base URL accepts path segments");
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments);
        let path = url.path().to_string();

        let mut request = self.inner.client.get(url);
        if let Some(key) = &self.inner.api_key {
            request = request.header("X-API-Key", key);
        }

        tracing::debug!(path = %path, "fabric backend request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let status_code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(FabricApiError::Http(format!(
                "API returned {status_code} {reason}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| FabricApiError::UnexpectedShape(format!("invalid JSON from {path}: {e}")))
    }
}

#[async_trait]
impl PatternsApi for FabricClient {
    async fn list_pattern_names(&self) -> Result<Vec<String>> {
        let payload = self.get_json(&["patterns", "names"]).await?;
        let Value::Array(items) = payload else {
            return Err(FabricApiError::UnexpectedShape(format!(
                "expected a JSON array from /patterns/names, got {}",
                json_type_name(&payload)
            )));
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(FabricApiError::UnexpectedShape(format!(
                    "expected pattern names to be strings, got {}",
                    json_type_name(&other)
                ))),
            })
            .collect()
    }

    async fn pattern(&self, name: &str) -> Result<PatternDetail> {
        let payload = self.get_json(&["patterns", name]).await?;
        serde_json::from_value(payload).map_err(|e| {
            FabricApiError::UnexpectedShape(format!("invalid pattern payload for '{name}': {e}"))
        })
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client(base: &str) -> FabricClient {
        FabricClient::new(base, None, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = FabricClient::new("not a url", None, Duration::from_secs(5))
            .err()
            .expect("config error");
        assert!(matches!(err, FabricApiError::Config(_)));
    }

    #[test]
    fn endpoint_joins_segments_onto_base_path() {
        let client = test_client("http://127.0.0.1:8080");
        let url = client.endpoint(&["patterns", "names"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/patterns/names");

        // Trailing slash on the base must not produce a double slash.
        let client = test_client("http://127.0.0.1:8080/api/");
        let url = client.endpoint(&["patterns", "names"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/patterns/names");
    }

    #[test]
    fn endpoint_percent_encodes_pattern_names() {
        let client = test_client("http://127.0.0.1:8080");
        let url = client.endpoint(&["patterns", "my pattern"]);
        assert_eq!(url.path(), "/patterns/my%20pattern");
    }

    #[test]
    fn pattern_detail_defaults_missing_fields() {
        let detail: PatternDetail = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(detail, PatternDetail::default());

        let detail: PatternDetail =
            serde_json::from_value(json!({"Name": "foo"})).expect("decode");
        assert_eq!(detail.name.as_deref(), Some("foo"));
        assert_eq!(detail.pattern, None);
    }

    #[test]
    fn pattern_detail_ignores_unknown_fields() {
        let detail: PatternDetail = serde_json::from_value(json!({
            "Name": "foo",
            "Pattern": "bar",
            "Description": "ignored"
        }))
        .expect("decode");
        assert_eq!(detail.name.as_deref(), Some("foo"));
        assert_eq!(detail.pattern.as_deref(), Some("bar"));
    }

    #[test]
    fn pattern_detail_rejects_non_object_payloads() {
        let err = serde_json::from_value::<PatternDetail>(json!(["nope"]));
        assert!(err.is_err());
    }
}
