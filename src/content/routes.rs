//! Route Table
//!
//! Maps document types to URL path patterns (e.g. `league -> /league/:uid`).
//! The same table is sent to the content API, used to build links for
//! documents, and used to match the current path back into a document.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::Document;
use crate::richtext::{Link, LinkResolver};

/// Type tag of league documents
pub const LEAGUE_TYPE: &str = "league";

/// One route: a document type and its path pattern
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Route {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub path: String,
}

impl Route {
    pub fn new(doc_type: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            path: path.into(),
        }
    }

    /// Build a concrete path by substituting `:uid`
    pub fn build(&self, uid: &str) -> String {
        self.path.replace(":uid", uid)
    }

    /// Compile the pattern into an anchored regex with a `uid` capture
    fn matcher(&self) -> Result<Regex, regex::Error> {
        let mut pattern = String::from("^");
        for (i, segment) in self.path.trim_start_matches('/').split('/').enumerate() {
            if i > 0 || self.path.starts_with('/') {
                pattern.push('/');
            }
            match segment {
                ":uid" => pattern.push_str("(?P<uid>[^/]+)"),
                other => pattern.push_str(&regex::escape(other)),
            }
        }
        pattern.push_str("/?$");
        Regex::new(&pattern)
    }
}

/// A path matched against the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub doc_type: String,
    pub uid: String,
}

/// Ordered collection of routes; the first match wins
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
    /// Compiled on first match, one slot per route
    #[serde(skip)]
    matchers: OnceLock<Vec<Option<Regex>>>,
}

impl PartialEq for RouteTable {
    fn eq(&self, other: &Self) -> bool {
        self.routes == other.routes
    }
}

impl Eq for RouteTable {}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![Route::new(LEAGUE_TYPE, "/league/:uid")])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            matchers: OnceLock::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn matchers(&self) -> &[Option<Regex>] {
        self.matchers.get_or_init(|| {
            self.routes
                .iter()
                .map(|route| match route.matcher() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(
                            doc_type = %route.doc_type,
                            path = %route.path,
                            error = %e,
                            "Ignoring route with invalid path pattern"
                        );
                        None
                    }
                })
                .collect()
        })
    }

    /// Path for a document of `doc_type` with slug `uid`
    pub fn path_for(&self, doc_type: &str, uid: &str) -> Option<String> {
        self.routes
            .iter()
            .find(|r| r.doc_type == doc_type)
            .map(|r| r.build(uid))
    }

    /// Resolve a document to its URL: the server-resolved `url` if present,
    /// otherwise the local table.
    pub fn url_for(&self, doc: &Document) -> Option<String> {
        if let Some(url) = &doc.url {
            return Some(url.clone());
        }
        let uid = doc.uid.as_deref()?;
        self.path_for(&doc.doc_type, uid)
    }

    /// Match a browser path back into a document type and slug
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or(path);

        self.routes.iter().zip(self.matchers()).find_map(|(route, re)| {
            let caps = re.as_ref()?.captures(path)?;
            let uid = caps.name("uid")?.as_str();
            let uid = urlencoding::decode(uid)
                .map(|u| u.into_owned())
                .unwrap_or_else(|_| uid.to_string());
            Some(RouteMatch {
                doc_type: route.doc_type.clone(),
                uid,
            })
        })
    }

    /// JSON form sent to the content API as the `routes` parameter
    pub fn to_query_param(&self) -> String {
        serde_json::to_string(&self.routes).unwrap_or_else(|_| "[]".to_string())
    }
}

impl LinkResolver for RouteTable {
    fn resolve(&self, link: &Link) -> Option<String> {
        if let Some(url) = &link.url {
            return Some(url.clone());
        }
        self.path_for(link.doc_type.as_deref()?, link.uid.as_deref()?)
    }
}
