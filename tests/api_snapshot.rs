mod common;

use prismic::api::{Api, ApiParts, OAuth, Ref};
use prismic::error::PrismicError;
use prismic::form::{Field, Form};
use serde_json::json;

fn sample() -> Api {
    Api::parse(common::api_json()).expect("sample api parses")
}

fn built_by_hand() -> Api {
    let empty_form = |name: &str| (name.to_owned(), Form::new(name, Vec::<(String, Field)>::new(), "GET", None, None, common::SEARCH_URL));
    Api::new(ApiParts {
        raw: json!({ "foo": "bar" }),
        refs: vec![
            Ref::new("ref1", "key1", false),
            Ref::new("ref2", "key2", false),
            Ref::new("ref3", "key3", true),
            Ref::new("ref4", "key4", false),
        ],
        forms: vec![empty_form("form1"), empty_form("form2"), empty_form("form3"), empty_form("form4")],
        ..ApiParts::default()
    })
    .expect("hand built api")
}

#[test]
fn lookups_on_a_hand_built_snapshot() {
    let api = built_by_hand();
    assert_eq!(api.reference("key2").map(Ref::label), Some("key2"));
    assert_eq!(api.refs().len(), 4);
    assert_eq!(api.ref_id_by_label("key4").map(Ref::id), Some("ref4"));
    assert_eq!(api.form("form2").expect("form2").form().name(), "form2");
    assert_eq!(api.forms().len(), 4);
    assert!(api.master().is_master());
    assert_eq!(api.master().id(), "ref3");
    assert_eq!(api.raw()["foo"], "bar");
    assert_eq!(api.raw().as_object().map(|o| o.len()), Some(1));
}

#[test]
fn unknown_keys_are_absent_not_errors() {
    let api = sample();
    assert!(api.reference("nope").is_none());
    assert!(api.ref_id_by_label("nope").is_none());
    assert!(api.form("nope").is_none());
    assert!(api.bookmark("nope").is_none());
}

#[test]
fn missing_refs_is_rejected() {
    let err = Api::parse(json!({})).unwrap_err();
    assert!(matches!(err, PrismicError::MalformedResponse(ref m) if m == "no refs given"));
}

#[test]
fn empty_refs_is_rejected() {
    let err = Api::parse(json!({ "refs": [] })).unwrap_err();
    assert!(matches!(err, PrismicError::MalformedResponse(ref m) if m == "no master ref found"));
    assert_eq!(err.to_string(), "Malformed response: no master ref found");
}

#[test]
fn refs_without_master_are_rejected() {
    let err = Api::parse(json!({
        "refs": [{ "ref": "a", "label": "A", "isMasterRef": false }, { "ref": "b", "label": "B" }]
    }))
    .unwrap_err();
    assert!(matches!(err, PrismicError::MalformedResponse(ref m) if m == "no master ref found"));
}

#[test]
fn first_master_wins() {
    let api = Api::parse(json!({
        "refs": [
            { "ref": "draft", "label": "Draft", "isMasterRef": false },
            { "ref": "live", "label": "Live", "isMasterRef": true },
            { "ref": "other", "label": "Other", "isMasterRef": true }
        ]
    }))
    .expect("parses");
    assert_eq!(api.master().id(), "live");
    assert_eq!(api.master().label(), "Live");
}

#[test]
fn a_broken_form_fails_the_whole_parse() {
    let err = Api::parse(json!({
        "refs": [{ "ref": "live", "label": "Live", "isMasterRef": true }],
        "forms": { "everything": { "method": "GET" } }
    }))
    .unwrap_err();
    assert!(matches!(err, PrismicError::MalformedResponse(_)));
}

#[test]
fn optional_members_may_be_null() {
    let api = Api::parse(json!({
        "refs": [{ "ref": "live", "label": "Live", "isMasterRef": true }],
        "bookmarks": null,
        "forms": null,
        "tags": null,
        "types": null
    }))
    .expect("parses");
    assert!(api.bookmarks().is_empty());
    assert!(api.forms().is_empty());
    assert!(api.tags().is_empty());
    assert!(api.types().is_empty());
    assert_eq!(api.oauth(), &OAuth::default());
}

#[test]
fn sample_refs() {
    let api = sample();
    assert_eq!(api.refs().len(), 2);
    let bar = api.reference("bar").expect("bar");
    assert_eq!(bar.id(), "foo");
    assert_eq!(bar.label(), "bar");
    assert!(!bar.is_master());
    assert_eq!(api.master().label(), "Master");
}

#[test]
fn sample_bookmarks_types_and_tags() {
    let api = sample();
    assert_eq!(api.bookmarks().len(), 3);
    assert_eq!(api.bookmark("about"), Some("Ue0EDd_mqb8Dhk3j"));
    assert_eq!(api.types().len(), 6);
    assert_eq!(api.types().get("blog-post").map(String::as_str), Some("Blog post"));
    assert_eq!(api.tags().len(), 4);
    assert!(api.tags().iter().any(|t| t == "Cupcake"));
}

#[test]
fn sample_forms() {
    let api = sample();
    assert_eq!(api.forms().len(), 10);
    let pies = api.form("pies").expect("pies");
    let form = pies.form();
    assert_eq!(form.name(), "Little Pies");
    assert_eq!(form.method(), "GET");
    assert_eq!(form.rel(), Some("collection"));
    assert_eq!(form.enctype(), Some("application/x-www-form-urlencoded"));
    assert_eq!(form.action(), "http://lesbonneschoses.wroom.io/api/documents/search");
    assert_eq!(form.fields().len(), 2);
    assert_eq!(form.field("ref").map(|f| f.field_type()), Some("String"));
    assert_eq!(
        form.field("q").and_then(|f| f.default()),
        Some("[[at(document.tags, [\"Pie\"])][any(document.type, [\"product\"])]]")
    );
}

#[test]
fn unnamed_forms_take_their_key_as_name() {
    let api = sample();
    assert_eq!(api.form("everything").expect("everything").form().name(), "everything");
}

#[test]
fn forms_handed_out_are_independent() {
    let api = sample();
    let mut first = api.form("pies").expect("pies");
    first.query("[[:d = at(my.product.price, 3)]]");
    assert_eq!(
        first.data()["q"],
        "[[at(document.tags, [\"Pie\"])][any(document.type, [\"product\"])][:d = at(my.product.price, 3)]]"
    );
    let second = api.form("pies").expect("pies");
    assert!(second.data().is_empty());
    assert!(api.forms()["pies"].data().is_empty());
}

#[test]
fn oauth_initiate_url_is_encoded() {
    let api = sample();
    let url = api
        .oauth_initiate_url("my client", "http://localhost/callback?x=1", "master+releases")
        .expect("initiate url");
    assert_eq!(
        url,
        "https://lesbonneschoses.wroom.io/auth?client_id=my+client&redirect_uri=http%3A%2F%2Flocalhost%2Fcallback%3Fx%3D1&scope=master%2Breleases"
    );
}

#[test]
fn oauth_initiate_url_needs_an_endpoint() {
    let api = built_by_hand();
    assert!(matches!(
        api.oauth_initiate_url("id", "http://localhost", "master"),
        Err(PrismicError::MalformedResponse(_))
    ));
}
