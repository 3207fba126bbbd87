//! Rich text: a sequence of blocks whose text carries inline spans.
//!
//! Span offsets count characters of the block's text. Consecutive list items
//! of the same kind are wrapped in one `<ul>` or `<ol>`.

use super::{escape_html, AsHtml, Embed, ImageView, Link, LinkResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink(Link),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
    kind: SpanKind,
}
impl Span {
    pub fn new(start: usize, end: usize, kind: SpanKind) -> Self {
        Self { start, end, kind }
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn end(&self) -> usize {
        self.end
    }
    pub fn kind(&self) -> &SpanKind {
        &self.kind
    }
    fn open(&self, resolver: &dyn LinkResolver) -> String {
        match &self.kind {
            SpanKind::Strong => "<strong>".to_owned(),
            SpanKind::Em => "<em>".to_owned(),
            SpanKind::Hyperlink(link) => format!(r#"<a href="{}">"#, escape_html(&link.url(resolver))),
        }
    }
    fn close(&self) -> &'static str {
        match self.kind {
            SpanKind::Strong => "</strong>",
            SpanKind::Em => "</em>",
            SpanKind::Hyperlink(_) => "</a>",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
    spans: Vec<Span>,
}
impl TextBlock {
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            spans,
        }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
}
impl AsHtml for TextBlock {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        let mut spans: Vec<&Span> = self.spans.iter().filter(|s| s.start < s.end).collect();
        // outer spans first when several start together
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut html = String::with_capacity(self.text.len());
        let mut open: Vec<&Span> = Vec::new();
        for (at, c) in self.text.chars().enumerate() {
            let active: Vec<&Span> = spans
                .iter()
                .copied()
                .filter(|span| span.start <= at && at < span.end)
                .collect();
            // tags stay properly nested: everything above the first span that
            // differs is closed, and spans that continue are opened again
            let kept = open
                .iter()
                .zip(&active)
                .take_while(|(was, now)| std::ptr::eq(**was, **now))
                .count();
            for span in open.drain(kept..).rev() {
                html.push_str(span.close());
            }
            for span in &active[kept..] {
                html.push_str(&span.open(resolver));
                open.push(*span);
            }
            html.push_str(&escape_html(c.encode_utf8(&mut [0; 4])));
        }
        for span in open.drain(..).rev() {
            html.push_str(span.close());
        }
        html
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: TextBlock },
    Paragraph(TextBlock),
    Preformatted(TextBlock),
    ListItem { ordered: bool, text: TextBlock },
    Image(ImageView),
    Embed(Embed),
}
impl AsHtml for Block {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        match self {
            Block::Heading { level, text } => format!("<h{level}>{}</h{level}>", text.as_html(resolver)),
            Block::Paragraph(text) => format!("<p>{}</p>", text.as_html(resolver)),
            Block::Preformatted(text) => format!("<pre>{}</pre>", text.as_html(resolver)),
            Block::ListItem { text, .. } => format!("<li>{}</li>", text.as_html(resolver)),
            Block::Image(view) => format!(r#"<p class="block-img">{}</p>"#, view.as_html(resolver)),
            Block::Embed(embed) => embed.as_html(resolver),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredText {
    blocks: Vec<Block>,
}
impl StructuredText {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    /// The first heading, if any.
    pub fn title(&self) -> Option<&TextBlock> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { text, .. } => Some(text),
            _ => None,
        })
    }
    /// Plain text of all text blocks, one per line.
    pub fn as_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { text, .. }
                | Block::Paragraph(text)
                | Block::Preformatted(text)
                | Block::ListItem { text, .. } => Some(text.text()),
                Block::Image(_) | Block::Embed(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
impl AsHtml for StructuredText {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut list: Option<(bool, String)> = None;
        for block in &self.blocks {
            match block {
                Block::ListItem { ordered, .. } => {
                    let item = block.as_html(resolver);
                    let same_list = matches!(&list, Some((kind, _)) if kind == ordered);
                    if same_list {
                        if let Some((_, items)) = list.as_mut() {
                            items.push_str(&item);
                        }
                    } else {
                        if let Some(done) = list.take() {
                            parts.push(wrap_list(done));
                        }
                        list = Some((*ordered, item));
                    }
                }
                _ => {
                    if let Some(done) = list.take() {
                        parts.push(wrap_list(done));
                    }
                    parts.push(block.as_html(resolver));
                }
            }
        }
        if let Some(done) = list.take() {
            parts.push(wrap_list(done));
        }
        parts.join("\n")
    }
}

fn wrap_list((ordered, items): (bool, String)) -> String {
    if ordered {
        format!("<ol>{items}</ol>")
    } else {
        format!("<ul>{items}</ul>")
    }
}
