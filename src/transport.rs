//! HTTP plumbing between the api model and the CMS.
//!
//! Everything above this module only ever sees decoded JSON documents, so the
//! [`Transport`] trait is the seam where tests plug in canned responses.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;
use crate::error::{PrismicError, Result};

pub const ACCESS_TOKEN_PARAM: &str = "access_token";

pub trait Transport {
    /// GETs `url` and decodes the body. Any non-2xx status is a
    /// [`PrismicError::Connection`].
    fn get(&self, url: &str, access_token: Option<&str>) -> Result<Value>;
    /// POSTs `params` url-encoded to `url`, same contract as [`Transport::get`].
    fn post_form(&self, url: &str, params: &[(String, String)]) -> Result<Value>;
}

/// Appends the access token as a query parameter, keeping any existing query.
pub fn with_access_token(url: &str, access_token: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(url)?;
    if let Some(token) = access_token {
        url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
    }
    Ok(url)
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(Duration::from_secs(settings.timeout_secs))
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, access_token: Option<&str>) -> Result<Value> {
        // logged before the token goes in
        debug!(%url, authenticated = access_token.is_some(), "GET");
        let target = with_access_token(url, access_token)?;
        let response = self
            .client
            .get(target)
            .header(ACCEPT, "application/json")
            .send()?;
        read_json(response)
    }

    fn post_form(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
        debug!(%url, params = params.len(), "POST");
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(params)
            .send()?;
        read_json(response)
    }
}

fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let message = status.canonical_reason().unwrap_or("Unknown").to_owned();
        warn!(code = status.as_u16(), %message, "request failed");
        return Err(PrismicError::Connection {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<Value>()
        .map_err(|e| PrismicError::MalformedResponse(e.to_string()))
}
