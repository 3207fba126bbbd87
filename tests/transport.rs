mod common;

use common::{StubTransport, API_URL, SEARCH_URL};
use prismic::api::Api;
use prismic::error::PrismicError;
use prismic::transport::with_access_token;
use serde_json::json;

#[test]
fn start_fetches_and_parses_the_snapshot() {
    let transport = StubTransport::new().respond(API_URL, common::api_json());
    let api = Api::start(&transport, API_URL, None).expect("api");
    assert_eq!(api.master().id(), "UgjWQN_mqa8HvPJY");
    assert_eq!(api.access_token(), None);
    assert_eq!(transport.requests.borrow().as_slice(), [API_URL.to_owned()]);
}

#[test]
fn access_token_travels_to_the_forms() {
    let transport = StubTransport::new()
        .respond(API_URL, common::api_json())
        .respond(SEARCH_URL, common::search_json());
    let api = Api::start(&transport, API_URL, Some("s3cr3t")).expect("api");
    assert_eq!(api.access_token(), Some("s3cr3t"));
    assert_eq!(transport.requests.borrow()[0], format!("{API_URL}?access_token=s3cr3t"));

    let mut search = api.form("everything").expect("everything form");
    assert_eq!(search.token(), Some("s3cr3t"));
    let documents = search.reference(api.master()).submit(&transport).expect("documents");
    assert_eq!(documents.len(), 2);
    let requests = transport.requests.borrow();
    assert!(requests[1].starts_with(SEARCH_URL));
    assert!(requests[1].ends_with("&access_token=s3cr3t"));
}

#[test]
fn failed_requests_surface_status_and_reason() {
    let transport = StubTransport::new().failing(401, "Unauthorized");
    let error = Api::start(&transport, API_URL, Some("expired")).unwrap_err();
    assert!(matches!(error, PrismicError::Connection { status: 401, .. }));
    assert_eq!(error.to_string(), "Can't connect to Prismic's API: 401 Unauthorized");
}

#[test]
fn unknown_urls_are_not_found() {
    let transport = StubTransport::new();
    let error = Api::start(&transport, API_URL, None).unwrap_err();
    assert!(matches!(error, PrismicError::Connection { status: 404, .. }));
}

#[test]
fn malformed_snapshots_are_rejected_after_fetching() {
    let transport = StubTransport::new().respond(API_URL, json!({ "refs": [] }));
    let error = Api::start(&transport, API_URL, None).unwrap_err();
    assert!(matches!(error, PrismicError::MalformedResponse(_)));
}

#[test]
fn oauth_token_check_posts_to_the_token_endpoint() {
    let token_url = "https://lesbonneschoses.wroom.io/auth/token";
    let transport = StubTransport::new()
        .respond(API_URL, common::api_json())
        .respond(token_url, json!({ "access_token": "fresh" }));
    let api = Api::start(&transport, API_URL, None).expect("api");
    let params = vec![
        ("grant_type".to_owned(), "authorization_code".to_owned()),
        ("code".to_owned(), "abc".to_owned()),
    ];
    let answer = api.oauth_check_token(&transport, &params).expect("token");
    assert_eq!(answer["access_token"], "fresh");
    let posts = transport.posts.borrow();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, token_url);
    assert_eq!(posts[0].1, params);
}

#[test]
fn access_token_is_appended_to_existing_queries() {
    let url = with_access_token("http://host/api?ref=abc", Some("t k")).expect("url");
    assert_eq!(url.as_str(), "http://host/api?ref=abc&access_token=t+k");
    let url = with_access_token("http://host/api", None).expect("url");
    assert_eq!(url.as_str(), "http://host/api");
    assert!(matches!(with_access_token("not a url", None), Err(PrismicError::InvalidUrl(_))));
}
