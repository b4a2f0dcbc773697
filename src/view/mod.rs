//! Views
//!
//! League and team views: mapping from content documents into view models,
//! HTML templates, and the controller that ties them to the page lifecycle.
//!
//! ## States
//!
//! - `List`: league cards only
//! - `Detail`: league cards plus the teams of one league
//!
//! The state is derived from the path on every event; a card click is the
//! only in-page transition from `List` to `Detail`.

mod controller;
mod error;
mod model;
pub mod template;

pub use controller::{StalePolicy, ViewController, ViewOptions};
pub use error::{MalformedRecordError, ViewError, ViewResult};
pub use model::{
    codespan_serializer, first_text, format_date, teams_of, ImageOptions, ImageVariant,
    LeagueView, TeamView,
};
