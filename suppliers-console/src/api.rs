//! HTTP client for the suppliers REST API.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use suppliers_core::{Supplier, SupplierPayload, SupplierQuery};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Request failed: {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The `message` field of the server's error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user: the server's message, else a generic line.
    pub fn display_message(&self) -> String {
        self.server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| self.to_string())
    }
}

/// The operations the supplier form can trigger.
#[async_trait]
pub trait SupplierApi: Send + Sync {
    async fn create(&self, payload: &SupplierPayload) -> Result<Supplier, ApiError>;

    async fn retrieve(&self, id: &str) -> Result<Supplier, ApiError>;

    async fn update(&self, id: &str, payload: &SupplierPayload) -> Result<Supplier, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    async fn search(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, ApiError>;
}

/// `SupplierApi` over HTTP
pub struct HttpSupplierApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpSupplierApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /suppliers` with only the non-empty filters in the query string.
    pub fn search_url(&self, query: &SupplierQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["suppliers"])?;
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl SupplierApi for HttpSupplierApi {
    async fn create(&self, payload: &SupplierPayload) -> Result<Supplier, ApiError> {
        let url = self.endpoint(&["suppliers"])?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(payload).send().await?;
        decode(response).await
    }

    async fn retrieve(&self, id: &str) -> Result<Supplier, ApiError> {
        let url = self.endpoint(&["suppliers", id])?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn update(&self, id: &str, payload: &SupplierPayload) -> Result<Supplier, ApiError> {
        let url = self.endpoint(&["suppliers", id])?;
        debug!("PUT {}", url);
        let response = self.client.put(url).json(payload).send().await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["suppliers", id])?;
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn search(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, ApiError> {
        let url = self.search_url(query)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned));

    debug!("Server answered {} ({:?})", status, message);
    Err(ApiError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpSupplierApi {
        HttpSupplierApi::new("http://localhost:8080").unwrap()
    }

    #[test]
    fn test_search_url_without_filters() {
        let url = api().search_url(&SupplierQuery::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/suppliers");
    }

    #[test]
    fn test_search_url_joins_non_empty_filters() {
        let query = SupplierQuery {
            name: Some("Acme".to_string()),
            category: Some(String::new()),
            available: Some(true),
            status: None,
        };
        let url = api().search_url(&query).unwrap();
        assert_eq!(url.query(), Some("name=Acme&available=true"));
    }

    #[test]
    fn test_search_url_encodes_values() {
        let query = SupplierQuery {
            name: Some("Acme & Sons".to_string()),
            ..Default::default()
        };
        let url = api().search_url(&query).unwrap();
        assert_eq!(url.query(), Some("name=Acme+%26+Sons"));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpSupplierApi::new("http://localhost:8080/api/").unwrap();
        let url = api.endpoint(&["suppliers", "3"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/suppliers/3");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpSupplierApi::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_display_message_prefers_server_text() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("Supplier with id '9' was not found.".to_string()),
        };
        assert_eq!(err.display_message(), "Supplier with id '9' was not found.");

        let err = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(err.display_message(), "Request failed: 502 Bad Gateway");
    }
}
