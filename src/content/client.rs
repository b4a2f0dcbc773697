//! Content API REST Client
//!
//! HTTP client for the headless CMS document API. Every query resolves a
//! ref first (the preview ref when previewing, else the master ref) and then
//! runs a predicate search against `/documents/search`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{
    ContentError, ContentGateway, ContentResult, Document, RouteTable, SearchResponse,
};
use super::document::ApiRoot;

/// Content API client
pub struct PrismicClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the content API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Repository name (e.g. "vanilla-leagues")
    pub repository: String,
    /// Explicit API endpoint; defaults to the repository's CDN endpoint
    pub endpoint: Option<String>,
    /// Access token for private repositories
    pub access_token: Option<String>,
    /// Route table sent with every search
    pub routes: RouteTable,
    /// Results per search page
    pub page_size: u32,
    /// Request timeout; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
    /// Preview ref taken from the preview cookie
    pub preview_ref: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            repository: "vanilla-leagues".to_string(),
            endpoint: None,
            access_token: None,
            routes: RouteTable::default(),
            page_size: 100,
            request_timeout_ms: None,
            preview_ref: None,
        }
    }
}

impl ClientConfig {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            ..Default::default()
        }
    }

    /// Document API endpoint without trailing slash
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.cdn.prismic.io/api/v2", self.repository),
        }
    }
}

/// Build an `at` predicate
fn at(path: &str, value: &str) -> String {
    format!(r#"[[at({}, "{}")]]"#, path, value.replace('"', "\\\""))
}

impl PrismicClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ContentResult<Self> {
        let mut builder = Client::builder().user_agent(concat!("leagues/", env!("CARGO_PKG_VERSION")));
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder.build()?;

        if config.preview_ref.is_some() {
            tracing::info!(repository = %config.repository, "Preview mode enabled");
        }

        Ok(Self { client, config })
    }

    /// Whether queries run against a preview ref
    pub fn is_preview(&self) -> bool {
        self.config.preview_ref.is_some()
    }

    /// Ref to query against: preview ref if set, else the current master ref
    async fn resolve_ref(&self) -> ContentResult<String> {
        if let Some(preview) = &self.config.preview_ref {
            return Ok(preview.clone());
        }

        let mut request = self.client.get(self.config.endpoint());
        if let Some(token) = &self.config.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let root: ApiRoot = self.fetch_json(request).await?;
        let master = root.master_ref().ok_or(ContentError::NoMasterRef)?;
        tracing::debug!(
            ref_id = %master.id,
            label = master.label.as_deref().unwrap_or_default(),
            "Resolved master ref"
        );
        Ok(master.reference.clone())
    }

    /// Run one search page
    async fn search_page(
        &self,
        reference: &str,
        predicate: &str,
        page: u32,
        page_size: u32,
    ) -> ContentResult<SearchResponse> {
        let url = format!("{}/documents/search", self.config.endpoint());

        let mut params = vec![
            ("ref", reference.to_string()),
            ("q", predicate.to_string()),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if !self.config.routes.is_empty() {
            params.push(("routes", self.config.routes.to_query_param()));
        }
        if let Some(token) = &self.config.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!(%predicate, page, "Searching content API");
        self.fetch_json(self.client.get(&url).query(&params)).await
    }

    /// First document matching `predicate`, or `NotFound`
    async fn first(&self, predicate: &str, what: String) -> ContentResult<Document> {
        let reference = self.resolve_ref().await?;
        let response = self.search_page(&reference, predicate, 1, 1).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or(ContentError::NotFound(what))
    }

    /// Send a request and decode its JSON body, mapping HTTP failures
    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ContentResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let text = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ContentError::Unauthorized(text)),
            _ => Err(ContentError::Api {
                status: status.as_u16(),
                message: text,
            }),
        }
    }
}

#[async_trait]
impl ContentGateway for PrismicClient {
    async fn list_by_type(&self, type_tag: &str) -> ContentResult<Vec<Document>> {
        let reference = self.resolve_ref().await?;
        let predicate = at("document.type", type_tag);

        let mut documents = Vec::new();
        let mut expected = 0;
        let mut page = 1;
        loop {
            let response = self
                .search_page(&reference, &predicate, page, self.config.page_size)
                .await?;
            if page == 1 {
                expected = response.total_results_size;
            }
            let has_next = response.has_next_page();
            documents.extend(response.results);
            if !has_next {
                break;
            }
            page += 1;
        }

        if documents.len() as u64 != expected {
            tracing::warn!(
                type_tag,
                count = documents.len(),
                expected,
                "Document count differs from reported total"
            );
        }
        tracing::debug!(type_tag, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    async fn get_by_id(&self, id: &str) -> ContentResult<Document> {
        self.first(&at("document.id", id), format!("document with id {}", id))
            .await
    }

    async fn get_by_slug(&self, type_tag: &str, slug: &str) -> ContentResult<Document> {
        let path = format!("my.{}.uid", type_tag);
        self.first(&at(&path, slug), format!("{} with uid {}", type_tag, slug))
            .await
    }
}
