//! Query templates and the builder used to fill them in.
//!
//! A [`Form`] is the immutable description the API publishes for one of its
//! search endpoints. A [`SearchForm`] wraps a shared form together with the
//! parameters a caller has set so far, and is what actually gets submitted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::api::{LookupHasher, Ref};
use crate::decode::decode_search_results;
use crate::document::Document;
use crate::error::{PrismicError, Result};
use crate::transport::Transport;

pub const QUERY_FIELD: &str = "q";
pub const REF_FIELD: &str = "ref";

// ------------- Field -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    field_type: String,
    default: Option<String>,
}
impl Field {
    pub fn new(field_type: impl Into<String>, default: Option<String>) -> Self {
        Self {
            field_type: field_type.into(),
            default,
        }
    }
    pub fn field_type(&self) -> &str {
        &self.field_type
    }
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

// ------------- Form -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    name: String,
    fields: HashMap<String, Field, LookupHasher>,
    method: String,
    rel: Option<String>,
    enctype: Option<String>,
    action: String,
}
impl Form {
    pub fn new<I>(
        name: impl Into<String>,
        fields: I,
        method: impl Into<String>,
        rel: Option<String>,
        enctype: Option<String>,
        action: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (String, Field)>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().collect(),
            method: method.into(),
            rel,
            enctype,
            action: action.into(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn fields(&self) -> &HashMap<String, Field, LookupHasher> {
        &self.fields
    }
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
    pub fn method(&self) -> &str {
        &self.method
    }
    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }
    pub fn enctype(&self) -> Option<&str> {
        self.enctype.as_deref()
    }
    pub fn action(&self) -> &str {
        &self.action
    }
}
impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.action, self.name)
    }
}

/// Inserts `value` right before the last closing bracket of a predicate list,
/// so `[X]` and `Y` become `[XY]`. A bracketed `value` loses its outer pair
/// first, so `[foo]` and `[bar]` become `[foobar]` and a query written as a
/// predicate list joins the default list instead of nesting inside it. A
/// default without brackets gets `value` appended.
pub fn splice_predicate(default: &str, value: &str) -> String {
    let value = value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(value);
    match default.rfind(']') {
        Some(at) => {
            let mut composed = String::with_capacity(default.len() + value.len());
            composed.push_str(&default[..at]);
            composed.push_str(value);
            composed.push_str(&default[at..]);
            composed
        }
        None => format!("{default}{value}"),
    }
}

// ------------- SearchForm -------------
/// Builder over a shared [`Form`].
///
/// `data` only ever holds what the caller set; field defaults are folded in
/// when the request is assembled, see [`SearchForm::parameters`].
#[derive(Debug, Clone)]
pub struct SearchForm {
    form: Arc<Form>,
    data: HashMap<String, String, LookupHasher>,
    access_token: Option<String>,
}
impl SearchForm {
    pub fn new(form: Form) -> Self {
        Self::shared(Arc::new(form))
    }
    pub fn shared(form: Arc<Form>) -> Self {
        Self {
            form,
            data: HashMap::default(),
            access_token: None,
        }
    }
    pub fn form(&self) -> &Form {
        &self.form
    }
    pub fn data(&self) -> &HashMap<String, String, LookupHasher> {
        &self.data
    }
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Sets the predicate query. The form's own `q` default is always the base,
    /// so calling this twice replaces the first value rather than adding to it.
    pub fn query(&mut self, value: &str) -> &mut Self {
        let composed = match self.form.field(QUERY_FIELD).and_then(Field::default) {
            Some(default) => splice_predicate(default, value),
            None => value.to_owned(),
        };
        self.data.insert(QUERY_FIELD.to_owned(), composed);
        self
    }
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }
    /// Points the search at a content release.
    pub fn reference(&mut self, reference: &Ref) -> &mut Self {
        self.set(REF_FIELD, reference.id())
    }
    pub fn access_token(&mut self, token: Option<String>) -> &mut Self {
        self.access_token = token;
        self
    }

    /// Field defaults overlaid with everything set on this builder, sorted by key.
    pub fn parameters(&self) -> Vec<(String, String)> {
        let mut merged: HashMap<&str, &str, LookupHasher> = HashMap::default();
        for (name, field) in self.form.fields() {
            if let Some(default) = field.default() {
                merged.insert(name, default);
            }
        }
        for (key, value) in &self.data {
            merged.insert(key, value);
        }
        let mut parameters: Vec<(String, String)> = merged
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        parameters.sort();
        parameters
    }

    pub fn url(&self) -> Result<Url> {
        let url = Url::parse_with_params(self.form.action(), self.parameters())?;
        Ok(url)
    }

    /// Runs the search through `transport` and decodes the returned documents.
    pub fn submit(&self, transport: &dyn Transport) -> Result<Vec<Document>> {
        if !self.form.method().eq_ignore_ascii_case("GET") {
            return Err(PrismicError::UnsupportedMethod(self.form.method().to_owned()));
        }
        let url = self.url()?;
        debug!(form = %self.form.name(), %url, "submitting search form");
        let response = transport.get(url.as_str(), self.token())?;
        decode_search_results(&response)
    }
}
