//! Paginated photo retrieval.
//!
//! [`PhotoSource`] is the page contract the gallery depends on; [`PexelsClient`] implements it
//! over HTTP with reqwest. Tests substitute an in-memory source.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crate::config::GalleryConfig;
use crate::error::FetchError;
use crate::photo::PhotoPage;

/// A request for one page of curated or search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Search term; `None` means the curated feed.
    pub query: Option<String>,
}

impl PageRequest {
    pub fn curated(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            query: None,
        }
    }

    /// A search request. Blank queries fall back to the curated feed.
    pub fn search(query: &str, page: u32, per_page: u32) -> Self {
        let query = query.trim();
        Self {
            page,
            per_page,
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    /// The same list, `page` pages in.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if self.page == 0 {
            return Err(FetchError::InvalidRequest("page must be >= 1".to_string()));
        }
        if self.per_page == 0 {
            return Err(FetchError::InvalidRequest(
                "per_page must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for paginated photo retrieval.
///
/// Failures are returned as-is; retrying is up to the caller.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<PhotoPage, FetchError>;

    async fn curated(&self, page: u32, per_page: u32) -> Result<PhotoPage, FetchError> {
        self.fetch(&PageRequest::curated(page, per_page)).await
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage, FetchError> {
        self.fetch(&PageRequest::search(query, page, per_page)).await
    }
}

/// Pexels API client.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PexelsClient {
    /// Creates a client with the configured base URL, API key and timeout.
    pub fn new(config: &GalleryConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(
            http,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Creates a client against a custom base URL (e.g. a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, request: &PageRequest) -> (String, Vec<(&'static str, String)>) {
        let mut params = Vec::with_capacity(3);
        let path = match &request.query {
            Some(query) => {
                params.push(("query", query.clone()));
                "search"
            }
            None => "curated",
        };
        params.push(("page", request.page.to_string()));
        params.push(("per_page", request.per_page.to_string()));
        (format!("{}/{}", self.base_url, path), params)
    }
}

#[async_trait]
impl PhotoSource for PexelsClient {
    async fn fetch(&self, request: &PageRequest) -> Result<PhotoPage, FetchError> {
        request.validate()?;
        let (url, params) = self.endpoint(request);
        tracing::debug!(
            url = %url,
            page = request.page,
            per_page = request.per_page,
            query = ?request.query,
            "Fetching photos"
        );

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Photo request failed");
                FetchError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Photo API returned an error");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let page: PhotoPage = serde_json::from_slice(&body)?;
        tracing::debug!(
            page = page.page,
            photos = page.photos.len(),
            total_results = page.total_results,
            "Fetched photos"
        );
        Ok(page)
    }
}
