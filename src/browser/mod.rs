//! Browser Boundary
//!
//! The controller never touches global browser objects. It renders into a
//! [`RenderTarget`] and reads the location from a [`NavigationState`]
//! passed to it with each [`BrowserEvent`].
//!
//! [`HeadlessDocument`] implements the target in memory; the CLI and the
//! tests drive the full lifecycle through it.

mod document;
mod navigation;
mod target;

pub use document::HeadlessDocument;
pub use navigation::{BrowserEvent, NavigationState, ViewState};
pub use target::{LeagueLink, RenderTarget, TargetError, LEAGUES_CONTAINER, TEAMS_CONTAINER};
