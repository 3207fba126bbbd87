use std::fmt;

use crate::fragment::{render_sections, AsHtml, Fragment, LinkResolver};

/// Shown in place of a slug when a document has none.
pub const MISSING_SLUG: &str = "-";

/// A document as returned by a search: identity, classification and its
/// named fragments in the order the API sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    doc_type: String,
    href: String,
    tags: Vec<String>,
    slugs: Vec<String>,
    fragments: Vec<(String, Fragment)>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        doc_type: impl Into<String>,
        href: impl Into<String>,
        tags: Vec<String>,
        slugs: Vec<String>,
        fragments: Vec<(String, Fragment)>,
    ) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            href: href.into(),
            tags,
            slugs,
            fragments,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }
    pub fn href(&self) -> &str {
        &self.href
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }
    pub fn set_slugs(&mut self, slugs: Vec<String>) {
        self.slugs = slugs;
    }
    /// Most recent slug first; `"-"` when the document has none.
    pub fn slug(&self) -> &str {
        self.slugs.first().map(String::as_str).unwrap_or(MISSING_SLUG)
    }
    pub fn fragments(&self) -> &[(String, Fragment)] {
        &self.fragments
    }
    /// Looks a fragment up by `field` or by `type.field`.
    pub fn get(&self, name: &str) -> Option<&Fragment> {
        let field = name
            .strip_prefix(self.doc_type.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name);
        self.fragments
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, fragment)| fragment)
    }
    pub fn get_text(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Fragment::Text(text) | Fragment::Color(text) => Some(text.clone()),
            Fragment::Number(number) => Some(number.to_string()),
            Fragment::StructuredText(text) => Some(text.as_text()),
            Fragment::Date(date) => Some(date.iso8601()),
            _ => None,
        }
    }
}

impl AsHtml for Document {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        render_sections(&self.fragments, resolver)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({})", self.doc_type, self.id, self.slug())
    }
}
