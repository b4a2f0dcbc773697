//! Content Gateway
//!
//! Wraps the headless CMS that owns league records. The rest of the crate
//! only sees the [`ContentGateway`] trait; [`PrismicClient`] is the HTTP
//! implementation.
//!
//! ## Operations
//!
//! - `list_by_type`: every document of a type, in source order
//! - `get_by_id`: one document by opaque identifier
//! - `get_by_slug`: one document by type and slug (deep links only)

mod client;
mod document;
mod error;
mod preview;
mod routes;

pub use client::{ClientConfig, PrismicClient};
pub use document::{ApiRoot, ContentRef, Document, SearchResponse};
pub use error::{ContentError, ContentResult};
pub use preview::{preview_ref_from_cookies, PREVIEW_COOKIE};
pub use routes::{Route, RouteMatch, RouteTable, LEAGUE_TYPE};

use async_trait::async_trait;

/// Read-only access to the content source
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// All documents of `type_tag`; ordering is whatever the source returns
    async fn list_by_type(&self, type_tag: &str) -> ContentResult<Vec<Document>>;

    /// Document by identifier; `ContentError::NotFound` if none matches
    async fn get_by_id(&self, id: &str) -> ContentResult<Document>;

    /// Document by slug; `ContentError::NotFound` if none matches
    async fn get_by_slug(&self, type_tag: &str, slug: &str) -> ContentResult<Document>;
}
