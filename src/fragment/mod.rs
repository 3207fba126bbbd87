//! Typed content values and their markup.
//!
//! Every kind of content the CMS can hold is one case of the closed
//! [`Fragment`] enum. Rendering goes through the [`AsHtml`] trait, which each
//! variant implements; link-bearing variants call the caller's
//! [`LinkResolver`] while rendering and never store the resulting URL.

pub mod date;
pub mod embed;
pub mod group;
pub mod image;
pub mod link;
pub mod multiple;
pub mod structured;

use std::fmt::Write;

pub use date::Date;
pub use embed::Embed;
pub use group::{Group, GroupItem};
pub use image::{Image, ImageView};
pub use link::{DocumentLink, Link, LinkResolver, MediaLink, WebLink};
pub use multiple::Multiple;
pub use structured::{Block, Span, SpanKind, StructuredText, TextBlock};

pub trait AsHtml {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Number(f64),
    Color(String),
    Date(Date),
    Embed(Embed),
    Image(Image),
    Link(Link),
    StructuredText(StructuredText),
    Group(Group),
    Multiple(Multiple),
}

impl Fragment {
    pub fn kind(&self) -> &'static str {
        match self {
            Fragment::Text(_) => "Text",
            Fragment::Number(_) => "Number",
            Fragment::Color(_) => "Color",
            Fragment::Date(_) => "Date",
            Fragment::Embed(_) => "Embed",
            Fragment::Image(_) => "Image",
            Fragment::Link(_) => "Link",
            Fragment::StructuredText(_) => "StructuredText",
            Fragment::Group(_) => "Group",
            Fragment::Multiple(_) => "Multiple",
        }
    }
}

impl AsHtml for Fragment {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        match self {
            Fragment::Text(text) => format!(r#"<span class="text">{}</span>"#, escape_html(text)),
            Fragment::Number(number) => format!(r#"<span class="number">{number}</span>"#),
            Fragment::Color(color) => format!(r#"<span class="color">{}</span>"#, escape_html(color)),
            Fragment::Date(date) => date.as_html(resolver),
            Fragment::Embed(embed) => embed.as_html(resolver),
            Fragment::Image(image) => image.as_html(resolver),
            Fragment::Link(link) => link.as_html(resolver),
            Fragment::StructuredText(text) => text.as_html(resolver),
            Fragment::Group(group) => group.as_html(resolver),
            Fragment::Multiple(multiple) => multiple.as_html(resolver),
        }
    }
}

/// Entity-encodes the characters that are significant in text and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders named fragments as `<section data-field="name">` elements, one per line.
pub fn render_sections(fragments: &[(String, Fragment)], resolver: &dyn LinkResolver) -> String {
    let mut html = String::new();
    for (i, (name, fragment)) in fragments.iter().enumerate() {
        if i > 0 {
            html.push('\n');
        }
        let _ = write!(
            html,
            r#"<section data-field="{}">{}</section>"#,
            escape_html(name),
            fragment.as_html(resolver)
        );
    }
    html
}
