//! HttpAdapter -- concrete [`ProviderAdapter`] for a keyless JSON GET endpoint.
//!
//! Sends `GET {url}?{query_param}={query}` and pulls the answer out of the
//! JSON body using the endpoint's ordered field list. No authentication
//! headers are sent and no retries are made.

use reqwest::Url;
use serde_json::Value;

use neko_core::llm::adapter::ProviderAdapter;
use neko_types::provider::{AdapterError, ProviderEndpoint};

use crate::config::ConfigError;

/// One mirror endpoint of a remote provider.
#[derive(Debug, Clone)]
pub struct HttpAdapter {
    client: reqwest::Client,
    url: Url,
    query_param: String,
    fields: Vec<String>,
    label: String,
}

impl HttpAdapter {
    /// Build an adapter for `endpoint`, sharing `client` with other adapters.
    ///
    /// Fails if the endpoint URL does not parse.
    pub fn new(client: reqwest::Client, endpoint: &ProviderEndpoint) -> Result<Self, ConfigError> {
        let url = Url::parse(&endpoint.url).map_err(|e| ConfigError::InvalidUrl {
            url: endpoint.url.clone(),
            reason: e.to_string(),
        })?;
        let label = match url.port() {
            Some(port) => format!("{}:{port}", url.host_str().unwrap_or("unknown")),
            None => url.host_str().unwrap_or("unknown").to_string(),
        };
        Ok(Self {
            client,
            url,
            query_param: endpoint.query_param.clone(),
            fields: endpoint.fields.clone(),
            label,
        })
    }

    /// Full request URL for `query`, with the query percent-encoded.
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(&self.query_param, query);
        url
    }
}

impl ProviderAdapter for HttpAdapter {
    fn label(&self) -> &str {
        &self.label
    }

    async fn invoke(&self, query: &str) -> Result<String, AdapterError> {
        let url = self.request_url(query);

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| AdapterError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AdapterError::Body(e.to_string()))?;

        extract_text(&body, &self.fields).ok_or_else(|| AdapterError::MissingField {
            tried: self.fields.clone(),
        })
    }
}

/// First non-empty string among `fields`, trimmed.
///
/// A field starting with `/` is a JSON pointer (`/choices/0/text`); any other
/// field is a top-level key.
pub fn extract_text(body: &Value, fields: &[String]) -> Option<String> {
    fields.iter().find_map(|field| {
        let value = if field.starts_with('/') {
            body.pointer(field)
        } else {
            body.get(field)
        };
        match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    })
}
