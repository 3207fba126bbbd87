//! The API snapshot: everything the CMS publishes at its root endpoint.
//!
//! A snapshot is built in one go from a metadata document and is read-only
//! afterwards. Fetching again yields a brand new [`Api`]; nothing is merged.

use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use seahash::SeaHasher;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::{PrismicError, Result};
use crate::form::{Field, Form, SearchForm};
use crate::transport::Transport;

pub type LookupHasher = BuildHasherDefault<SeaHasher>;

// ------------- Ref -------------
#[derive(Debug, Clone, Eq)]
pub struct Ref {
    id: String,
    label: String,
    master: bool,
}
impl Ref {
    pub fn new(id: impl Into<String>, label: impl Into<String>, master: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            master,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn is_master(&self) -> bool {
        self.master
    }
}
impl PartialEq for Ref {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

// ------------- OAuth -------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuth {
    initiate: Option<String>,
    token: Option<String>,
}
impl OAuth {
    pub fn new(initiate: Option<String>, token: Option<String>) -> Self {
        Self { initiate, token }
    }
    pub fn initiate(&self) -> Option<&str> {
        self.initiate.as_deref()
    }
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Typed ingredients of a snapshot. Refs keep their document order since the
/// master is picked by scanning them front to back.
#[derive(Debug, Clone, Default)]
pub struct ApiParts {
    pub raw: Value,
    pub bookmarks: Vec<(String, String)>,
    pub refs: Vec<Ref>,
    pub forms: Vec<(String, Form)>,
    pub tags: Vec<String>,
    pub types: Vec<(String, String)>,
    pub oauth: OAuth,
    pub access_token: Option<String>,
}

// ------------- Api -------------
#[derive(Debug, Clone)]
pub struct Api {
    raw: Value,
    bookmarks: HashMap<String, String, LookupHasher>,
    refs: HashMap<String, Arc<Ref>, LookupHasher>,
    forms: HashMap<String, SearchForm, LookupHasher>,
    tags: Vec<String>,
    types: HashMap<String, String, LookupHasher>,
    master: Arc<Ref>,
    oauth: OAuth,
    access_token: Option<String>,
}

impl Api {
    /// Assembles a snapshot, failing when no ref is flagged as master.
    ///
    /// Should several refs share a label the later one is kept. Should several
    /// refs be flagged as master the first one kept wins; this is not validated.
    pub fn new(parts: ApiParts) -> Result<Self> {
        let mut order: Vec<String> = Vec::with_capacity(parts.refs.len());
        let mut refs: HashMap<String, Arc<Ref>, LookupHasher> = HashMap::default();
        for reference in parts.refs {
            let label = reference.label().to_owned();
            if refs.insert(label.clone(), Arc::new(reference)).is_none() {
                order.push(label);
            }
        }
        let master = order
            .iter()
            .filter_map(|label| refs.get(label))
            .find(|reference| reference.is_master())
            .map(Arc::clone)
            .ok_or_else(|| PrismicError::MalformedResponse("no master ref found".into()))?;

        let token = parts.access_token;
        let forms = parts
            .forms
            .into_iter()
            .map(|(name, form)| {
                let mut search = SearchForm::new(form);
                search.access_token(token.clone());
                (name, search)
            })
            .collect();

        Ok(Self {
            raw: parts.raw,
            bookmarks: parts.bookmarks.into_iter().collect(),
            refs,
            forms,
            tags: parts.tags,
            types: parts.types.into_iter().collect(),
            master,
            oauth: parts.oauth,
            access_token: token,
        })
    }

    /// Builds a snapshot from the metadata document served at the API root.
    pub fn parse(document: Value) -> Result<Self> {
        Self::parse_with_token(document, None)
    }

    pub fn parse_with_token(document: Value, access_token: Option<String>) -> Result<Self> {
        let root = RawApi::deserialize(&document)
            .map_err(|e| PrismicError::MalformedResponse(e.to_string()))?;
        let raw_refs = root
            .refs
            .ok_or_else(|| PrismicError::MalformedResponse("no refs given".into()))?;

        let refs = raw_refs
            .into_iter()
            .map(|r| Ref::new(r.id, r.label, r.master.unwrap_or(false)))
            .collect();
        let forms = root
            .forms
            .unwrap_or_default()
            .into_iter()
            .map(|(key, raw)| {
                let fields = raw
                    .fields
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(name, field)| (name, Field::new(field.field_type, field.default)));
                let name = raw.name.unwrap_or_else(|| key.clone());
                let form = Form::new(name, fields, raw.method, raw.rel, raw.enctype, raw.action);
                (key, form)
            })
            .collect();

        let api = Self::new(ApiParts {
            bookmarks: root.bookmarks.unwrap_or_default().into_iter().collect(),
            refs,
            forms,
            tags: root.tags.unwrap_or_default(),
            types: root.types.unwrap_or_default().into_iter().collect(),
            oauth: OAuth::new(root.oauth_initiate, root.oauth_token),
            access_token,
            raw: document,
        })?;
        info!(
            refs = api.refs.len(),
            forms = api.forms.len(),
            bookmarks = api.bookmarks.len(),
            tags = api.tags.len(),
            types = api.types.len(),
            master = %api.master.id(),
            "parsed api snapshot"
        );
        Ok(api)
    }

    /// Fetches and parses the API root in one step.
    pub fn start(transport: &dyn Transport, url: &str, access_token: Option<&str>) -> Result<Self> {
        let document = transport.get(url, access_token)?;
        Self::parse_with_token(document, access_token.map(str::to_owned))
    }

    pub fn bookmark(&self, name: &str) -> Option<&str> {
        self.bookmarks.get(name).map(String::as_str)
    }
    pub fn reference(&self, label: &str) -> Option<&Ref> {
        self.refs.get(label).map(Arc::as_ref)
    }
    /// The whole [`Ref`] registered under `label`, not just its id.
    pub fn ref_id_by_label(&self, label: &str) -> Option<&Ref> {
        self.refs
            .iter()
            .find(|(key, _)| key.as_str() == label)
            .map(|(_, reference)| reference.as_ref())
    }
    /// A fresh builder for the named form; each call owns its own parameters.
    pub fn form(&self, name: &str) -> Option<SearchForm> {
        self.forms.get(name).cloned()
    }

    pub fn bookmarks(&self) -> &HashMap<String, String, LookupHasher> {
        &self.bookmarks
    }
    pub fn refs(&self) -> &HashMap<String, Arc<Ref>, LookupHasher> {
        &self.refs
    }
    pub fn forms(&self) -> &HashMap<String, SearchForm, LookupHasher> {
        &self.forms
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
    pub fn types(&self) -> &HashMap<String, String, LookupHasher> {
        &self.types
    }
    pub fn master(&self) -> &Ref {
        &self.master
    }
    pub fn oauth(&self) -> &OAuth {
        &self.oauth
    }
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn oauth_initiate_url(&self, client_id: &str, redirect_uri: &str, scope: &str) -> Result<String> {
        let initiate = self
            .oauth
            .initiate()
            .ok_or_else(|| PrismicError::MalformedResponse("no oauth_initiate endpoint".into()))?;
        let url = Url::parse_with_params(
            initiate,
            &[
                ("client_id", client_id),
                ("redirect_uri", redirect_uri),
                ("scope", scope),
            ],
        )?;
        Ok(url.into())
    }

    pub fn oauth_check_token(&self, transport: &dyn Transport, params: &[(String, String)]) -> Result<Value> {
        let token_url = self
            .oauth
            .token()
            .ok_or_else(|| PrismicError::MalformedResponse("no oauth_token endpoint".into()))?;
        debug!(url = %token_url, "checking oauth token");
        transport.post_form(token_url, params)
    }
}

// ------------- raw metadata document -------------
// Optional members tolerate both absence and an explicit null.

#[derive(Deserialize)]
struct RawApi {
    refs: Option<Vec<RawRef>>,
    bookmarks: Option<HashMap<String, String>>,
    forms: Option<HashMap<String, RawForm>>,
    tags: Option<Vec<String>>,
    types: Option<HashMap<String, String>>,
    oauth_initiate: Option<String>,
    oauth_token: Option<String>,
}

#[derive(Deserialize)]
struct RawRef {
    #[serde(rename = "ref")]
    id: String,
    label: String,
    #[serde(rename = "isMasterRef")]
    master: Option<bool>,
}

#[derive(Deserialize)]
struct RawForm {
    name: Option<String>,
    fields: Option<HashMap<String, RawField>>,
    method: String,
    rel: Option<String>,
    enctype: Option<String>,
    action: String,
}

#[derive(Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    field_type: String,
    default: Option<String>,
}
