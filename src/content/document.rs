//! Raw content records
//!
//! Wire shapes of the content API: the API root (refs) and the search
//! response envelope wrapping documents.

use serde::{Deserialize, Serialize};

/// A single content record as returned by the content API
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Document {
    /// Opaque identifier
    pub id: String,
    /// Human-readable slug, unique per type
    #[serde(default)]
    pub uid: Option<String>,
    /// Custom type tag (e.g. "league")
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub href: Option<String>,
    /// URL resolved server-side from the route table
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    /// Type-specific fields, left untyped until view-model mapping
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Document {
    /// Look up a top-level data field
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}

/// Paged search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results_size: u64,
    #[serde(default)]
    pub results: Vec<Document>,
}

fn default_page() -> u32 {
    1
}

impl SearchResponse {
    /// Whether another page follows this one
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// API root, used to discover the current master ref
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRoot {
    #[serde(default)]
    pub refs: Vec<ContentRef>,
}

/// A content release pointer
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

impl ApiRoot {
    /// The ref serving published content
    pub fn master_ref(&self) -> Option<&ContentRef> {
        self.refs.iter().find(|r| r.is_master_ref)
    }
}
