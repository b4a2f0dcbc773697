//! Rich text field shapes
//!
//! A rich text field is a list of blocks; each text block carries plain
//! text plus formatting spans addressed by UTF-16 offsets.

use serde::{Deserialize, Serialize};

/// A rich text field: ordered blocks
pub type RichTextField = Vec<Block>;

/// Block kinds the renderer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BlockKind {
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "embed")]
    Embed,
    #[serde(other)]
    Unknown,
}

impl BlockKind {
    /// Heading level, if this is a heading
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            BlockKind::Heading4 => Some(4),
            BlockKind::Heading5 => Some(5),
            BlockKind::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, BlockKind::ListItem | BlockKind::OrderedListItem)
    }
}

/// One block of a rich text field
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Block-level label (custom style)
    #[serde(default)]
    pub label: Option<String>,

    // Image blocks
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(rename = "linkTo", default)]
    pub link_to: Option<Link>,

    // Embed blocks
    #[serde(default)]
    pub oembed: Option<Embed>,
}

impl Block {
    /// Plain text block, mostly useful for building fields by hand
    pub fn text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            spans: Vec::new(),
            label: None,
            url: None,
            alt: None,
            link_to: None,
            oembed: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Span kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Label,
    #[serde(other)]
    Unknown,
}

/// Inline formatting over `[start, end)` in UTF-16 code units
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            data: None,
        }
    }

    /// Label span with the given label name
    pub fn label(start: usize, end: usize, label: &str) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Label,
            data: Some(serde_json::json!({ "label": label })),
        }
    }

    /// Label name of a label span
    pub fn label_name(&self) -> Option<&str> {
        if self.kind != SpanKind::Label {
            return None;
        }
        self.data.as_ref()?.get("label")?.as_str()
    }

    /// Link target of a hyperlink span
    pub fn link(&self) -> Option<Link> {
        if self.kind != SpanKind::Hyperlink {
            return None;
        }
        serde_json::from_value(self.data.clone()?).ok()
    }
}

/// A link field: web URL, media file, or another document
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Link {
    #[serde(default)]
    pub link_type: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
}

impl Link {
    pub fn is_document(&self) -> bool {
        self.link_type == "Document"
    }
}

/// oEmbed payload of an embed block
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Embed {
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(rename = "type", default)]
    pub embed_type: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}
