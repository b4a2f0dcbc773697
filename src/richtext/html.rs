//! Rich text to HTML
//!
//! Consecutive list items are grouped into `<ul>`/`<ol>`, spans are nested
//! by range, text is escaped and newlines become `<br />`. A caller-supplied
//! [`HtmlSerializer`] sees every element with its rendered children and may
//! take over its markup.

use std::fmt;

use html_escaper::Escape;

use super::types::{Block, BlockKind, Link, Span, SpanKind};

/// An element handed to the serializer hook
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    /// A whole block (paragraph, heading, list item, image, embed, ...)
    Block(&'a Block),
    /// Wrapper around consecutive list items
    List { ordered: bool },
    /// Inline formatting span
    Span(&'a Span),
    /// Raw, unescaped text run
    Text(&'a str),
}

/// Hook that may override the markup of individual elements.
/// Returning `None` falls back to the default rendering.
pub trait HtmlSerializer {
    fn serialize(&self, element: &Element<'_>, children: &str) -> Option<String>;
}

impl<F> HtmlSerializer for F
where
    F: Fn(&Element<'_>, &str) -> Option<String>,
{
    fn serialize(&self, element: &Element<'_>, children: &str) -> Option<String> {
        self(element, children)
    }
}

/// Display adapter that HTML-escapes the wrapped text
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Escape::escape(&self.0, f, false)
    }
}

/// Turns links to other documents into URLs
pub trait LinkResolver {
    fn resolve(&self, link: &Link) -> Option<String>;
}

/// Render a rich text field to HTML
pub fn as_html(
    field: &[Block],
    link_resolver: Option<&dyn LinkResolver>,
    serializer: Option<&dyn HtmlSerializer>,
) -> String {
    let renderer = Renderer {
        link_resolver,
        serializer,
    };
    renderer.field(field)
}

/// Plain text of a field, blocks joined with `separator`
pub fn as_text(field: &[Block], separator: &str) -> String {
    field
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

struct Renderer<'r> {
    link_resolver: Option<&'r dyn LinkResolver>,
    serializer: Option<&'r dyn HtmlSerializer>,
}

impl Renderer<'_> {
    fn hook(&self, element: &Element<'_>, children: &str) -> Option<String> {
        self.serializer?.serialize(element, children)
    }

    fn field(&self, field: &[Block]) -> String {
        let mut out = String::new();
        let mut i = 0;

        while i < field.len() {
            let kind = field[i].kind;
            if kind.is_list_item() {
                let end = field[i..]
                    .iter()
                    .position(|b| b.kind != kind)
                    .map_or(field.len(), |p| i + p);
                let items: String = field[i..end].iter().map(|b| self.block(b)).collect();
                let ordered = kind == BlockKind::OrderedListItem;
                let element = Element::List { ordered };
                out.push_str(&self.hook(&element, &items).unwrap_or_else(|| {
                    let tag = if ordered { "ol" } else { "ul" };
                    format!("<{tag}>{items}</{tag}>")
                }));
                i = end;
            } else {
                out.push_str(&self.block(&field[i]));
                i += 1;
            }
        }

        out
    }

    fn block(&self, block: &Block) -> String {
        let children = match block.kind {
            BlockKind::Image | BlockKind::Embed => String::new(),
            _ => self.inline(block),
        };

        if let Some(html) = self.hook(&Element::Block(block), &children) {
            return html;
        }

        let class = block
            .label
            .as_deref()
            .map(|l| format!(r#" class="{}""#, Escaped(l)))
            .unwrap_or_default();

        if let Some(level) = block.kind.heading_level() {
            return format!("<h{level}{class}>{children}</h{level}>");
        }

        match block.kind {
            BlockKind::Paragraph => format!("<p{class}>{children}</p>"),
            BlockKind::Preformatted => format!("<pre{class}>{children}</pre>"),
            BlockKind::ListItem | BlockKind::OrderedListItem => {
                format!("<li{class}>{children}</li>")
            }
            BlockKind::Image => self.image(block),
            BlockKind::Embed => self.embed(block),
            _ => children,
        }
    }

    fn image(&self, block: &Block) -> String {
        let img = format!(
            r#"<img src="{}" alt="{}" />"#,
            Escaped(block.url.as_deref().unwrap_or_default()),
            Escaped(block.alt.as_deref().unwrap_or_default()),
        );
        let inner = match block.link_to.as_ref().and_then(|l| self.link_href(l)) {
            Some(href) => format!(r#"<a href="{}">{}</a>"#, Escaped(&href), img),
            None => img,
        };
        format!(r#"<p class="block-img">{inner}</p>"#)
    }

    fn embed(&self, block: &Block) -> String {
        let embed = block.oembed.clone().unwrap_or_default();
        format!(
            r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
            Escaped(embed.embed_url.as_deref().unwrap_or_default()),
            Escaped(embed.embed_type.as_deref().unwrap_or_default()),
            Escaped(embed.provider_name.as_deref().unwrap_or_default()),
            embed.html.unwrap_or_default(),
        )
    }

    fn inline(&self, block: &Block) -> String {
        let spans = block
            .spans
            .iter()
            .map(|span| Ranged {
                start: byte_offset(&block.text, span.start),
                end: byte_offset(&block.text, span.end),
                span,
            })
            .collect();
        let nodes = nest(spans, 0, block.text.len());
        self.nodes(&block.text, &nodes)
    }

    fn nodes(&self, text: &str, nodes: &[Node<'_>]) -> String {
        nodes.iter().map(|n| self.node(text, n)).collect()
    }

    fn node(&self, text: &str, node: &Node<'_>) -> String {
        match node {
            Node::Text { start, end } => {
                let raw = &text[*start..*end];
                self.hook(&Element::Text(raw), raw)
                    .unwrap_or_else(|| escape_text(raw))
            }
            Node::Span { span, children } => {
                let children = self.nodes(text, children);
                self.hook(&Element::Span(*span), &children)
                    .unwrap_or_else(|| self.span(*span, children))
            }
        }
    }

    fn span(&self, span: &Span, children: String) -> String {
        match span.kind {
            SpanKind::Strong => format!("<strong>{children}</strong>"),
            SpanKind::Em => format!("<em>{children}</em>"),
            SpanKind::Label => match span.label_name() {
                Some(label) => format!(r#"<span class="{}">{children}</span>"#, Escaped(label)),
                None => children,
            },
            SpanKind::Hyperlink => {
                let Some(link) = span.link() else {
                    return children;
                };
                let Some(href) = self.link_href(&link) else {
                    return children;
                };
                match link.target.as_deref() {
                    Some(target) => format!(
                        r#"<a href="{}" target="{}" rel="noopener noreferrer">{children}</a>"#,
                        Escaped(&href),
                        Escaped(target),
                    ),
                    None => format!(r#"<a href="{}">{children}</a>"#, Escaped(&href)),
                }
            }
            SpanKind::Unknown => children,
        }
    }

    fn link_href(&self, link: &Link) -> Option<String> {
        if link.is_document() {
            if let Some(url) = self.link_resolver.and_then(|r| r.resolve(link)) {
                return Some(url);
            }
        }
        link.url.clone()
    }
}

fn escape_text(raw: &str) -> String {
    Escaped(raw).to_string().replace('\n', "<br />")
}

/// Byte offset of a UTF-16 offset within `text`, clamped to its length
fn byte_offset(text: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units >= utf16 {
            return byte;
        }
        units += ch.len_utf16();
    }
    text.len()
}

#[derive(Clone, Copy)]
struct Ranged<'a> {
    start: usize,
    end: usize,
    span: &'a Span,
}

enum Node<'a> {
    Text { start: usize, end: usize },
    Span { span: &'a Span, children: Vec<Node<'a>> },
}

/// Build the span tree over `[start, end)`. A span that crosses the end of
/// an enclosing span is split at the boundary.
fn nest(mut pending: Vec<Ranged<'_>>, start: usize, end: usize) -> Vec<Node<'_>> {
    pending.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut nodes = Vec::new();
    let mut cursor = start;

    while !pending.is_empty() {
        let head = pending.remove(0);
        let s = head.start.max(cursor);
        let e = head.end.min(end);
        if s >= e {
            continue;
        }
        if s > cursor {
            nodes.push(Node::Text { start: cursor, end: s });
        }

        let (inner, mut rest): (Vec<_>, Vec<_>) = pending.into_iter().partition(|p| p.start < e);
        let mut children = Vec::with_capacity(inner.len());
        for p in inner {
            if p.end > e {
                children.push(Ranged { end: e, ..p });
                rest.push(Ranged { start: e, ..p });
            } else {
                children.push(p);
            }
        }

        nodes.push(Node::Span {
            span: head.span,
            children: nest(children, s, e),
        });
        cursor = e;

        rest.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        pending = rest;
    }

    if cursor < end {
        nodes.push(Node::Text { start: cursor, end });
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::RichTextField;

    fn render(field: &[Block]) -> String {
        as_html(field, None, None)
    }

    #[test]
    fn test_paragraph_and_heading() {
        let field = vec![
            Block::text(BlockKind::Heading2, "Stadium"),
            Block::text(BlockKind::Paragraph, "Old Trafford"),
        ];
        assert_eq!(render(&field), "<h2>Stadium</h2><p>Old Trafford</p>");
    }

    #[test]
    fn test_text_is_escaped_and_newlines_break() {
        let field = vec![Block::text(BlockKind::Paragraph, "Tom & Jerry's <arena>\nCapacity")];
        let html = render(&field);
        assert!(html.starts_with("<p>Tom &amp; Jerry&apos;s"));
        assert!(html.contains("&lt;arena&gt;<br />Capacity"));
        assert!(!html.contains("<arena>"));
    }

    #[test]
    fn test_escaped_attribute_values() {
        assert_eq!(
            Escaped(r#"a "quoted" <b> & 'single'"#).to_string(),
            "a &quot;quoted&quot; &lt;b&gt; &amp; &apos;single&apos;"
        );

        let json = r#"[{ "type": "image", "url": "https://images.example/a.png?x=1&y=2", "alt": "The \"Den\"" }]"#;
        let field: RichTextField = serde_json::from_str(json).unwrap();
        assert_eq!(
            render(&field),
            r#"<p class="block-img"><img src="https://images.example/a.png?x=1&amp;y=2" alt="The &quot;Den&quot;" /></p>"#
        );
    }

    #[test]
    fn test_nested_spans() {
        let field = vec![Block::text(BlockKind::Paragraph, "Home of champions")
            .with_span(Span::new(SpanKind::Strong, 0, 17))
            .with_span(Span::new(SpanKind::Em, 8, 17))];
        assert_eq!(
            render(&field),
            "<p><strong>Home of <em>champions</em></strong></p>"
        );
    }

    #[test]
    fn test_crossing_spans_are_split() {
        let field = vec![Block::text(BlockKind::Paragraph, "abcdef")
            .with_span(Span::new(SpanKind::Strong, 0, 4))
            .with_span(Span::new(SpanKind::Em, 2, 6))];
        assert_eq!(
            render(&field),
            "<p><strong>ab<em>cd</em></strong><em>ef</em></p>"
        );
    }

    #[test]
    fn test_utf16_offsets() {
        // "⚽" is one UTF-16 unit, "𝄞" is two
        let field = vec![Block::text(BlockKind::Paragraph, "𝄞 ⚽ goal")
            .with_span(Span::new(SpanKind::Strong, 5, 9))];
        assert_eq!(render(&field), "<p>𝄞 ⚽ <strong>goal</strong></p>");
    }

    #[test]
    fn test_list_grouping() {
        let field = vec![
            Block::text(BlockKind::ListItem, "a"),
            Block::text(BlockKind::ListItem, "b"),
            Block::text(BlockKind::OrderedListItem, "one"),
            Block::text(BlockKind::Paragraph, "end"),
        ];
        assert_eq!(
            render(&field),
            "<ul><li>a</li><li>b</li></ul><ol><li>one</li></ol><p>end</p>"
        );
    }

    #[test]
    fn test_default_label_and_hyperlink() {
        let json = r#"[{ "type": "paragraph", "text": "See site now", "spans": [
            { "start": 0, "end": 3, "type": "label", "data": { "label": "codespan" } },
            { "start": 4, "end": 8, "type": "hyperlink",
              "data": { "link_type": "Web", "url": "https://example.com", "target": "_blank" } }
        ] }]"#;
        let field: RichTextField = serde_json::from_str(json).unwrap();

        assert_eq!(
            render(&field),
            concat!(
                r#"<p><span class="codespan">See</span> "#,
                r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a> now</p>"#
            )
        );
    }

    #[test]
    fn test_serializer_overrides_only_matching_elements() {
        let field = vec![Block::text(BlockKind::Paragraph, "use foo() here")
            .with_span(Span::label(4, 9, "codespan"))
            .with_span(Span::label(10, 14, "highlight"))];

        let serializer = |element: &Element<'_>, children: &str| match element {
            Element::Span(span) if span.label_name() == Some("codespan") => {
                Some(format!("<code>{}</code>", children))
            }
            _ => None,
        };

        assert_eq!(
            as_html(&field, None, Some(&serializer)),
            r#"<p>use <code>foo()</code> <span class="highlight">here</span></p>"#
        );
    }

    #[test]
    fn test_document_link_uses_resolver() {
        struct Fixed;
        impl LinkResolver for Fixed {
            fn resolve(&self, link: &Link) -> Option<String> {
                link.uid.as_ref().map(|uid| format!("/league/{}", uid))
            }
        }

        let json = r#"[{ "type": "paragraph", "text": "NHL", "spans": [
            { "start": 0, "end": 3, "type": "hyperlink",
              "data": { "link_type": "Document", "id": "L1", "uid": "nhl", "type": "league" } }
        ] }]"#;
        let field: RichTextField = serde_json::from_str(json).unwrap();

        assert_eq!(
            as_html(&field, Some(&Fixed), None),
            r#"<p><a href="/league/nhl">NHL</a></p>"#
        );
        assert_eq!(as_html(&field, None, None), "<p>NHL</p>");
    }

    #[test]
    fn test_image_and_embed_blocks() {
        let json = r#"[
            { "type": "image", "url": "https://images.example/a.png", "alt": "Pitch" },
            { "type": "embed", "oembed": { "embed_url": "https://youtu.be/x", "type": "video",
              "provider_name": "YouTube", "html": "<iframe></iframe>" } }
        ]"#;
        let field: RichTextField = serde_json::from_str(json).unwrap();

        assert_eq!(
            render(&field),
            concat!(
                r#"<p class="block-img"><img src="https://images.example/a.png" alt="Pitch" /></p>"#,
                r#"<div data-oembed="https://youtu.be/x" data-oembed-type="video" data-oembed-provider="YouTube"><iframe></iframe></div>"#
            )
        );
    }

    #[test]
    fn test_as_text() {
        let field = vec![
            Block::text(BlockKind::Paragraph, "Camp Nou"),
            Block::text(BlockKind::Paragraph, "Barcelona"),
        ];
        assert_eq!(as_text(&field, ", "), "Camp Nou, Barcelona");
    }
}
