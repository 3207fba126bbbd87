use serde_json::Value;

use super::{escape_html, AsHtml, LinkResolver};

/// Third-party content described by an oEmbed payload.
///
/// The provider's markup is emitted exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    embed_type: String,
    provider: String,
    url: String,
    html: String,
    oembed_json: Value,
}
impl Embed {
    pub fn new(
        embed_type: impl Into<String>,
        provider: impl Into<String>,
        url: impl Into<String>,
        html: impl Into<String>,
        oembed_json: Value,
    ) -> Self {
        Self {
            embed_type: embed_type.into(),
            provider: provider.into(),
            url: url.into(),
            html: html.into(),
            oembed_json,
        }
    }
    pub fn embed_type(&self) -> &str {
        &self.embed_type
    }
    pub fn provider(&self) -> &str {
        &self.provider
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn html(&self) -> &str {
        &self.html
    }
    pub fn oembed_json(&self) -> &Value {
        &self.oembed_json
    }
}
impl AsHtml for Embed {
    fn as_html(&self, _resolver: &dyn LinkResolver) -> String {
        format!(
            r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
            escape_html(&self.url),
            escape_html(&self.embed_type.to_lowercase()),
            escape_html(&self.provider.to_lowercase()),
            self.html
        )
    }
}
