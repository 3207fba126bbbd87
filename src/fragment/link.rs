use std::fmt;

use super::{escape_html, AsHtml};

/// Turns a link to a CMS document into a URL of the embedding application.
///
/// Any `Fn(&DocumentLink) -> String` is a resolver.
pub trait LinkResolver {
    fn resolve(&self, link: &DocumentLink) -> String;
}
impl<F> LinkResolver for F
where
    F: Fn(&DocumentLink) -> String,
{
    fn resolve(&self, link: &DocumentLink) -> String {
        self(link)
    }
}

// ------------- WebLink -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLink {
    url: String,
}
impl WebLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ------------- MediaLink -------------
/// A file or image stored in the CMS media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
    url: String,
    kind: String,
    size: u64,
    name: String,
}
impl MediaLink {
    pub fn new(url: impl Into<String>, kind: impl Into<String>, size: u64, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: kind.into(),
            size,
            name: name.into(),
        }
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn size(&self) -> u64 {
        self.size
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ------------- DocumentLink -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    id: String,
    link_type: String,
    tags: Vec<String>,
    slug: String,
    broken: bool,
}
impl DocumentLink {
    pub fn new(
        id: impl Into<String>,
        link_type: impl Into<String>,
        tags: Vec<String>,
        slug: impl Into<String>,
        broken: bool,
    ) -> Self {
        Self {
            id: id.into(),
            link_type: link_type.into(),
            tags,
            slug: slug.into(),
            broken,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn link_type(&self) -> &str {
        &self.link_type
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
    pub fn slug(&self) -> &str {
        &self.slug
    }
    /// The target no longer exists in the release the link was read from.
    pub fn is_broken(&self) -> bool {
        self.broken
    }
}
impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.link_type, self.id)
    }
}

// ------------- Link -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Web(WebLink),
    Media(MediaLink),
    Document(DocumentLink),
}
impl Link {
    /// Where the link points; document links go through `resolver` every time.
    pub fn url(&self, resolver: &dyn LinkResolver) -> String {
        match self {
            Link::Web(link) => link.url().to_owned(),
            Link::Media(link) => link.url().to_owned(),
            Link::Document(link) => resolver.resolve(link),
        }
    }
}
impl AsHtml for Link {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        match self {
            Link::Web(link) => {
                let url = escape_html(link.url());
                format!(r#"<a href="{url}">{url}</a>"#)
            }
            Link::Media(link) => format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(link.url()),
                escape_html(link.name())
            ),
            Link::Document(link) if link.is_broken() => {
                format!("<span>{}</span>", escape_html(link.slug()))
            }
            Link::Document(link) => format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&resolver.resolve(link)),
                escape_html(link.slug())
            ),
        }
    }
}
