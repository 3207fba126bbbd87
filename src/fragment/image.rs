use std::collections::HashMap;

use super::{escape_html, AsHtml, LinkResolver};
use crate::api::LookupHasher;

pub const MAIN_VIEW: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    url: String,
    width: u32,
    height: u32,
    alt: Option<String>,
    copyright: Option<String>,
}
impl ImageView {
    pub fn new(url: impl Into<String>, width: u32, height: u32, alt: Option<String>, copyright: Option<String>) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            alt,
            copyright,
        }
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }
    pub fn ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}
impl AsHtml for ImageView {
    fn as_html(&self, _resolver: &dyn LinkResolver) -> String {
        format!(
            r#"<img src="{}" alt="{}" width="{}" height="{}" />"#,
            escape_html(&self.url),
            escape_html(self.alt.as_deref().unwrap_or("")),
            self.width,
            self.height
        )
    }
}

/// An image with its main rendition and any named alternates ("icon", "wide", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    main: ImageView,
    views: HashMap<String, ImageView, LookupHasher>,
}
impl Image {
    pub fn new<I>(main: ImageView, views: I) -> Self
    where
        I: IntoIterator<Item = (String, ImageView)>,
    {
        Self {
            main,
            views: views.into_iter().collect(),
        }
    }
    pub fn main(&self) -> &ImageView {
        &self.main
    }
    pub fn view(&self, name: &str) -> Option<&ImageView> {
        if name == MAIN_VIEW {
            return Some(&self.main);
        }
        self.views.get(name)
    }
    pub fn views(&self) -> &HashMap<String, ImageView, LookupHasher> {
        &self.views
    }
}
impl AsHtml for Image {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        self.main.as_html(resolver)
    }
}
