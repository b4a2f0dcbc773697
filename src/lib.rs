//! # Leagues
//!
//! Renders league and team content from a headless CMS into HTML views,
//! with client-side routing between the league list and one league's teams.
//!
//! ## Modules
//!
//! - [`content`]: Content gateway and its HTTP client
//! - [`richtext`]: Rich text fields and their HTML rendering
//! - [`view`]: View models, templates and the view controller
//! - [`browser`]: Render target, navigation state and a headless document
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leagues::browser::HeadlessDocument;
//! use leagues::content::{ClientConfig, PrismicClient};
//! use leagues::view::{ViewController, ViewOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(PrismicClient::new(ClientConfig::new("vanilla-leagues"))?);
//!     let controller = ViewController::new(gateway, ViewOptions::default());
//!
//!     let page = HeadlessDocument::new("/league/premier-league");
//!     let view = controller.handle_event(page.load_event(), &page).await?;
//!
//!     println!("{:?}", view);
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod content;
pub mod richtext;
pub mod view;

// Re-export top-level types for convenience
pub use browser::{
    BrowserEvent, HeadlessDocument, LeagueLink, NavigationState, RenderTarget, TargetError,
    ViewState,
};

pub use content::{
    ClientConfig, ContentError, ContentGateway, ContentResult, Document, PrismicClient,
    RouteTable,
};

pub use view::{
    ImageOptions, LeagueView, MalformedRecordError, StalePolicy, TeamView, ViewController,
    ViewError, ViewOptions, ViewResult,
};

pub use config::{Config, ConfigError, ContentConfig, LoggingConfig, RenderConfig};
