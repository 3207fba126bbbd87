//! Prismic – a client-side model of a headless CMS API.
//!
//! The CMS publishes a metadata document at its API root. This crate turns
//! that document into a typed, read-only snapshot and models the content it
//! serves:
//! * A [`api::Ref`] points at a release of the content; exactly one of them is
//!   the *master* ref, the release currently live.
//! * A [`form::Form`] describes a search endpoint: its fields (each with an
//!   optional default), method, relation, encoding and action URL.
//! * A [`form::SearchForm`] is a builder over a form that accumulates the
//!   parameters of one search.
//! * An [`api::Api`] aggregates refs, forms, bookmarks, tags and content types.
//! * A [`document::Document`] carries named [`fragment::Fragment`]s, the typed
//!   content values (text, dates, embeds, images, links, rich text, groups).
//!
//! ## Modules
//! * [`api`] – Snapshot parsing, the master ref invariant, lookups and OAuth helpers.
//! * [`form`] – Fields, forms and the chainable search builder.
//! * [`fragment`] – The closed set of content kinds and their markup.
//! * [`document`] – Search result documents and slug fallback.
//! * [`decode`] – JSON decoding of search results into documents and fragments.
//! * [`transport`] – The HTTP seam (`Transport` trait plus a blocking client).
//! * [`config`] – Settings layered from defaults, file and environment.
//!
//! ## Rendering
//! Every fragment renders through [`fragment::AsHtml`], given a
//! [`fragment::LinkResolver`] that maps document links to application URLs.
//! Any closure `Fn(&DocumentLink) -> String` will do. Resolution happens at
//! render time, nothing is cached on the fragment.
//!
//! ## Errors
//! A metadata document without refs, or without a master ref, is rejected as a
//! whole with [`PrismicError::MalformedResponse`]. Non-2xx responses surface as
//! [`PrismicError::Connection`]. Nothing is retried.
//!
//! ## Quick Start
//! ```
//! use prismic::api::Api;
//! use prismic::fragment::{AsHtml, DocumentLink, Fragment, Multiple};
//! use serde_json::json;
//!
//! let api = Api::parse(json!({
//!     "refs": [{ "ref": "UgjWQN_mqa8HvPJY", "label": "Master", "isMasterRef": true }],
//!     "forms": {
//!         "everything": {
//!             "method": "GET",
//!             "action": "https://example.prismic.io/api/documents/search",
//!             "fields": { "q": { "type": "String", "default": "[[any(document.type, [\"product\"])]]" } }
//!         }
//!     }
//! })).unwrap();
//! assert_eq!(api.master().id(), "UgjWQN_mqa8HvPJY");
//!
//! let mut search = api.form("everything").unwrap();
//! search.query("[[:d = at(document.tags, [\"Pie\"])]]");
//! assert_eq!(
//!     search.data()["q"],
//!     "[[any(document.type, [\"product\"])][:d = at(document.tags, [\"Pie\"])]]"
//! );
//!
//! let resolver = |link: &DocumentLink| format!("/{}/{}", link.link_type(), link.id());
//! let colors = Multiple::new(vec![Fragment::Color("#fff".into()), Fragment::Color("#000".into())]);
//! assert_eq!(
//!     colors.as_html(&resolver),
//!     r#"<span class="color">#fff</span><span class="color">#000</span>"#
//! );
//! ```
//!
//! ## Logging
//! Parsing, requests and skipped content are reported through `tracing`. The
//! crate never installs a subscriber itself; see [`config::Settings::init_tracing`].

pub mod api;
pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod form;
pub mod fragment;
pub mod transport;

pub use crate::api::{Api, Ref};
pub use crate::document::Document;
pub use crate::error::{PrismicError, Result};
pub use crate::form::{Field, Form, SearchForm};
pub use crate::fragment::{AsHtml, Fragment, LinkResolver};
pub use crate::transport::{HttpTransport, Transport};
