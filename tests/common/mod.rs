#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use prismic::error::{PrismicError, Result};
use prismic::transport::{with_access_token, Transport};
use serde_json::Value;

pub const API_URL: &str = "http://lesbonneschoses.wroom.io/api";
pub const SEARCH_URL: &str = "http://lesbonneschoses.wroom.io/api/documents/search";

pub fn api_json() -> Value {
    serde_json::from_str(include_str!("../fixtures/api.json")).expect("api fixture")
}

pub fn search_json() -> Value {
    serde_json::from_str(include_str!("../fixtures/search.json")).expect("search fixture")
}

/// Answers from canned documents keyed by URL without query string and
/// records every request it sees.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Value>,
    failure: Option<(u16, String)>,
    pub requests: RefCell<Vec<String>>,
    pub posts: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn respond(mut self, url: &str, document: Value) -> Self {
        self.responses.insert(url.to_owned(), document);
        self
    }
    pub fn failing(mut self, status: u16, message: &str) -> Self {
        self.failure = Some((status, message.to_owned()));
        self
    }
    fn answer(&self, url: &str) -> Result<Value> {
        if let Some((status, message)) = &self.failure {
            return Err(PrismicError::Connection { status: *status, message: message.clone() });
        }
        let base = url.split('?').next().unwrap_or(url);
        self.responses.get(base).cloned().ok_or(PrismicError::Connection {
            status: 404,
            message: "Not Found".into(),
        })
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, access_token: Option<&str>) -> Result<Value> {
        let full = with_access_token(url, access_token)?;
        self.requests.borrow_mut().push(full.to_string());
        self.answer(url)
    }
    fn post_form(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
        self.posts.borrow_mut().push((url.to_owned(), params.to_vec()));
        self.answer(url)
    }
}
