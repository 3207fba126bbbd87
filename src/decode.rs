//! Decoding of search responses into documents and fragments.
//!
//! Each fragment arrives as `{"type": ..., "value": ...}`. Known types are
//! decoded into fixed-shape records and fail fast when a required member is
//! missing; unknown types are skipped so that newer content kinds do not make
//! whole documents unreadable.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::document::Document;
use crate::error::{PrismicError, Result};
use crate::fragment::{
    Block, Date, DocumentLink, Embed, Fragment, Group, GroupItem, Image, ImageView, Link, MediaLink, Multiple, Span,
    SpanKind, StructuredText, TextBlock, WebLink,
};

/// Search results come either as a bare array or wrapped in `{"results": [...]}`.
pub fn decode_search_results(response: &Value) -> Result<Vec<Document>> {
    let documents = match response {
        Value::Array(documents) => documents,
        Value::Object(page) => match page.get("results") {
            Some(Value::Array(documents)) => documents,
            _ => return Err(PrismicError::MalformedResponse("no results given".into())),
        },
        _ => return Err(PrismicError::MalformedResponse("search response is neither array nor object".into())),
    };
    documents.iter().map(decode_document).collect()
}

pub fn decode_document(json: &Value) -> Result<Document> {
    let raw = RawDocument::deserialize(json).map_err(|e| PrismicError::MalformedResponse(format!("document: {e}")))?;
    let mut fragments = Vec::new();
    if let Some(Value::Object(data)) = raw.data.as_ref().and_then(|data| data.get(&raw.doc_type)) {
        for (name, value) in data {
            if let Some(fragment) = decode_field(name, value)? {
                fragments.push((name.clone(), fragment));
            }
        }
    }
    Ok(Document::new(
        raw.id,
        raw.doc_type,
        raw.href.unwrap_or_default(),
        raw.tags.unwrap_or_default(),
        raw.slugs.unwrap_or_default(),
        fragments,
    ))
}

/// A field holds either one fragment or an array of them.
fn decode_field(name: &str, value: &Value) -> Result<Option<Fragment>> {
    match value {
        Value::Array(values) => {
            let mut multiple = Multiple::default();
            for value in values {
                if let Some(fragment) = decode_fragment(value)? {
                    multiple.push(fragment);
                }
            }
            Ok(Some(Fragment::Multiple(multiple)))
        }
        Value::Object(_) => decode_fragment(value),
        _ => Err(PrismicError::MalformedFragment(format!("{name}: expected an object or an array"))),
    }
}

/// `Ok(None)` means the fragment type is not one this crate knows.
pub fn decode_fragment(json: &Value) -> Result<Option<Fragment>> {
    let fragment_type = json
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("fragment", "missing type"))?;
    let value = json
        .get("value")
        .ok_or_else(|| malformed(fragment_type, "missing value"))?;

    let fragment = match fragment_type {
        "Text" | "Select" => Fragment::Text(typed(fragment_type, value)?),
        "Number" => Fragment::Number(typed(fragment_type, value)?),
        "Color" => Fragment::Color(typed(fragment_type, value)?),
        "Date" => Fragment::Date(decode_day(value)?),
        "Timestamp" => Fragment::Date(decode_timestamp(value)?),
        "Embed" => Fragment::Embed(decode_embed(value)?),
        "Image" => Fragment::Image(decode_image(value)?),
        "Link.web" | "Link.document" | "Link.file" | "Link.image" => {
            Fragment::Link(decode_link(fragment_type, value)?)
        }
        "StructuredText" => Fragment::StructuredText(decode_structured_text(value)?),
        "Group" => Fragment::Group(decode_group(value)?),
        unknown => {
            warn!(fragment_type = %unknown, "skipping unknown fragment type");
            return Ok(None);
        }
    };
    Ok(Some(fragment))
}

fn malformed(what: &str, why: impl std::fmt::Display) -> PrismicError {
    PrismicError::MalformedFragment(format!("{what}: {why}"))
}

fn typed<T: DeserializeOwned>(what: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| malformed(what, e))
}

fn decode_day(value: &Value) -> Result<Date> {
    let text: String = typed("Date", value)?;
    let day = NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| malformed("Date", e))?;
    Ok(Date::from_day(day))
}

fn decode_timestamp(value: &Value) -> Result<Date> {
    let text: String = typed("Timestamp", value)?;
    // the API writes offsets without a colon, e.g. +0000
    let moment = DateTime::parse_from_rfc3339(&text)
        .or_else(|_| DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|e| malformed("Timestamp", e))?;
    Ok(Date::new(moment))
}

fn decode_embed(value: &Value) -> Result<Embed> {
    let oembed = value.get("oembed").ok_or_else(|| malformed("Embed", "missing oembed"))?;
    let raw: RawOEmbed = typed("Embed", oembed)?;
    Ok(Embed::new(
        raw.embed_type,
        raw.provider_name.unwrap_or_default(),
        raw.embed_url,
        raw.html.unwrap_or_default(),
        oembed.clone(),
    ))
}

fn decode_image(value: &Value) -> Result<Image> {
    let raw: RawImage = typed("Image", value)?;
    let views = raw
        .views
        .unwrap_or_default()
        .into_iter()
        .map(|(name, view)| (name, view.into_view()));
    Ok(Image::new(raw.main.into_view(), views))
}

fn decode_link(fragment_type: &str, value: &Value) -> Result<Link> {
    let link = match fragment_type {
        "Link.web" => {
            let raw: RawWebLink = typed(fragment_type, value)?;
            Link::Web(WebLink::new(raw.url))
        }
        "Link.document" => {
            let raw: RawDocumentLink = typed(fragment_type, value)?;
            let target = raw.document;
            Link::Document(DocumentLink::new(
                target.id,
                target.doc_type,
                target.tags.unwrap_or_default(),
                target.slug.unwrap_or_else(|| crate::document::MISSING_SLUG.to_owned()),
                raw.broken.unwrap_or(false),
            ))
        }
        "Link.file" | "Link.image" => {
            let raw: RawMediaLink = typed(fragment_type, value)?;
            let file = raw.file.or(raw.image).ok_or_else(|| malformed(fragment_type, "missing file"))?;
            Link::Media(MediaLink::new(
                file.url,
                file.kind.unwrap_or_default(),
                file.size.as_ref().map(RawSize::bytes).transpose()?.unwrap_or(0),
                file.name.unwrap_or_default(),
            ))
        }
        other => return Err(malformed(other, "not a link")),
    };
    Ok(link)
}

fn decode_structured_text(value: &Value) -> Result<StructuredText> {
    let raw: Vec<RawBlock> = typed("StructuredText", value)?;
    let blocks = raw.into_iter().filter_map(|block| block.into_block().transpose());
    Ok(StructuredText::new(blocks.collect::<Result<Vec<_>>>()?))
}

fn decode_group(value: &Value) -> Result<Group> {
    let raw: Vec<Map<String, Value>> = typed("Group", value)?;
    let mut items = Vec::with_capacity(raw.len());
    for entry in &raw {
        let mut fragments = Vec::with_capacity(entry.len());
        for (name, value) in entry {
            if let Some(fragment) = decode_field(name, value)? {
                fragments.push((name.clone(), fragment));
            }
        }
        items.push(GroupItem::new(fragments));
    }
    Ok(Group::new(items))
}

// ------------- raw shapes -------------

#[derive(Deserialize)]
struct RawDocument {
    id: String,
    #[serde(rename = "type")]
    doc_type: String,
    href: Option<String>,
    tags: Option<Vec<String>>,
    slugs: Option<Vec<String>>,
    data: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawOEmbed {
    #[serde(rename = "type")]
    embed_type: String,
    provider_name: Option<String>,
    embed_url: String,
    html: Option<String>,
}

#[derive(Deserialize)]
struct RawImage {
    main: RawImageView,
    views: Option<HashMap<String, RawImageView>>,
}

#[derive(Deserialize)]
struct RawImageView {
    url: String,
    alt: Option<String>,
    copyright: Option<String>,
    dimensions: RawDimensions,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

impl RawImageView {
    fn into_view(self) -> ImageView {
        ImageView::new(self.url, self.dimensions.width, self.dimensions.height, self.alt, self.copyright)
    }
}

#[derive(Deserialize)]
struct RawWebLink {
    url: String,
}

#[derive(Deserialize)]
struct RawDocumentLink {
    document: RawLinkedDocument,
    #[serde(rename = "isBroken")]
    broken: Option<bool>,
}

#[derive(Deserialize)]
struct RawLinkedDocument {
    id: String,
    #[serde(rename = "type")]
    doc_type: String,
    tags: Option<Vec<String>>,
    slug: Option<String>,
}

#[derive(Deserialize)]
struct RawMediaLink {
    file: Option<RawFile>,
    image: Option<RawFile>,
}

#[derive(Deserialize)]
struct RawFile {
    url: String,
    kind: Option<String>,
    size: Option<RawSize>,
    name: Option<String>,
}

/// Sizes have been sent both as numbers and as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(u64),
    Text(String),
}
impl RawSize {
    fn bytes(&self) -> Result<u64> {
        match self {
            RawSize::Number(n) => Ok(*n),
            RawSize::Text(s) => s.parse().map_err(|e| malformed("file size", format!("{s:?}: {e}"))),
        }
    }
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
    spans: Option<Vec<RawSpan>>,
    // image blocks carry the view inline
    url: Option<String>,
    alt: Option<String>,
    copyright: Option<String>,
    dimensions: Option<RawDimensions>,
    oembed: Option<Value>,
}

#[derive(Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
    #[serde(rename = "type")]
    span_type: String,
    data: Option<Value>,
}

impl RawBlock {
    fn text_block(&mut self) -> Result<TextBlock> {
        let text = self.text.take().unwrap_or_default();
        let mut spans = Vec::new();
        for span in self.spans.take().unwrap_or_default() {
            let kind = match span.span_type.as_str() {
                "strong" => SpanKind::Strong,
                "em" => SpanKind::Em,
                "hyperlink" => {
                    let data = span.data.as_ref().ok_or_else(|| malformed("hyperlink", "missing data"))?;
                    let link_type = data
                        .get("type")
                        .and_then(Value::as_str)
                        .ok_or_else(|| malformed("hyperlink", "missing type"))?;
                    let value = data.get("value").ok_or_else(|| malformed("hyperlink", "missing value"))?;
                    SpanKind::Hyperlink(decode_link(link_type, value)?)
                }
                other => {
                    warn!(span_type = %other, "skipping unknown span type");
                    continue;
                }
            };
            spans.push(Span::new(span.start, span.end, kind));
        }
        Ok(TextBlock::new(text, spans))
    }

    fn into_block(mut self) -> Result<Option<Block>> {
        let block_type = std::mem::take(&mut self.block_type);
        let block = match block_type.as_str() {
            "paragraph" => Block::Paragraph(self.text_block()?),
            "preformatted" => Block::Preformatted(self.text_block()?),
            "list-item" => Block::ListItem { ordered: false, text: self.text_block()? },
            "o-list-item" => Block::ListItem { ordered: true, text: self.text_block()? },
            heading if heading.starts_with("heading") => {
                let level = heading["heading".len()..]
                    .parse::<u8>()
                    .ok()
                    .filter(|level| (1..=6).contains(level))
                    .ok_or_else(|| malformed("StructuredText", format!("bad heading {heading}")))?;
                Block::Heading { level, text: self.text_block()? }
            }
            "image" => {
                let url = self.url.take().ok_or_else(|| malformed("image block", "missing url"))?;
                let dimensions = self.dimensions.take().ok_or_else(|| malformed("image block", "missing dimensions"))?;
                Block::Image(ImageView::new(
                    url,
                    dimensions.width,
                    dimensions.height,
                    self.alt.take(),
                    self.copyright.take(),
                ))
            }
            "embed" => {
                let oembed = self.oembed.take().ok_or_else(|| malformed("embed block", "missing oembed"))?;
                let wrapped = serde_json::json!({ "oembed": oembed });
                Block::Embed(decode_embed(&wrapped)?)
            }
            other => {
                warn!(block_type = %other, "skipping unknown block type");
                return Ok(None);
            }
        };
        Ok(Some(block))
    }
}
