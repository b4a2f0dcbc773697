//! Render target capability
//!
//! Everything the view controller needs from a DOM: named containers,
//! click bindings for league cards and the History API. Methods take
//! `&self`; implementations hold their own interior state the way a
//! browser document does.

use serde::Serialize;
use thiserror::Error;

/// Container holding the league list
pub const LEAGUES_CONTAINER: &str = "leagues-container";

/// Container holding the team list, created on demand
pub const TEAMS_CONTAINER: &str = "teams-container";

/// Click binding of one rendered league card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueLink {
    /// League identifier used to fetch its teams
    pub id: String,
    pub slug: String,
    /// Path pushed onto history when the card is activated
    pub path: String,
}

/// Errors raised by a render target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("Container not found: #{0}")]
    MissingContainer(String),
}

/// DOM-like surface the views render into
pub trait RenderTarget: Send + Sync {
    /// Whether an element with this id exists
    fn has_container(&self, id: &str) -> bool;

    /// Append an empty element with this id to the body
    fn create_container(&self, id: &str);

    /// Replace the contents of an existing element
    fn set_inner_html(&self, id: &str, html: &str) -> Result<(), TargetError>;

    /// Attach click handlers to the league cards just rendered,
    /// replacing earlier bindings
    fn bind_league_clicks(&self, links: Vec<LeagueLink>);

    /// Push a new history entry without reloading
    fn push_history(&self, path: &str);
}
