//! Navigation state
//!
//! The view shown is derived from the current path alone, recomputed on
//! every lifecycle event.

use serde::Serialize;

use super::LeagueLink;
use crate::content::{RouteTable, LEAGUE_TYPE};

/// Which view the current path asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    /// League list only
    List,
    /// League list plus the teams of the league with this slug
    Detail { slug: String },
}

/// The browser location, threaded explicitly through the lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    path: String,
}

impl NavigationState {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.is_empty() { "/".to_string() } else { path };
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Derive the view from the path using the route table
    pub fn view_state(&self, routes: &RouteTable) -> ViewState {
        match routes.match_path(&self.path) {
            Some(m) if m.doc_type == LEAGUE_TYPE => ViewState::Detail { slug: m.uid },
            _ => ViewState::List,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Lifecycle events delivered to the view controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Initial page load
    Load(NavigationState),
    /// Back/forward navigation
    PopState(NavigationState),
    /// A rendered league card was activated
    LeagueClicked(LeagueLink),
}
