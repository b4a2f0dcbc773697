//! Rich Text
//!
//! Structured text fields from the content source and their conversion
//! to HTML.

mod html;
mod types;

pub use html::{as_html, as_text, Element, Escaped, HtmlSerializer, LinkResolver};
pub use types::{Block, BlockKind, Embed, Link, RichTextField, Span, SpanKind};
