mod common;

use prismic::api::{Api, Ref};
use prismic::error::PrismicError;
use prismic::form::{splice_predicate, Field, Form, SearchForm};

fn form_with(fields: Vec<(String, Field)>) -> Form {
    Form::new("form1", fields, "GET", None, None, common::SEARCH_URL)
}

fn q_default(default: &str) -> Vec<(String, Field)> {
    vec![("q".to_owned(), Field::new("String", Some(default.to_owned())))]
}

#[test]
fn query_without_default_is_taken_verbatim() {
    let mut form = SearchForm::new(form_with(Vec::new()));
    form.query("[bar]");
    assert_eq!(form.data().len(), 1);
    assert_eq!(form.data()["q"], "[bar]");
}

#[test]
fn query_field_without_default_is_taken_verbatim() {
    let mut form = SearchForm::new(form_with(vec![("q".to_owned(), Field::new("String", None))]));
    form.query("Y");
    assert_eq!(form.data()["q"], "Y");
}

#[test]
fn query_is_spliced_into_the_default() {
    let mut form = SearchForm::new(form_with(q_default("[X]")));
    form.query("Y");
    assert_eq!(form.data()["q"], "[XY]");
}

#[test]
fn predicates_append_to_the_default_list() {
    let mut form = SearchForm::new(form_with(q_default("[[any(document.type, [\"product\"])]]")));
    form.query("[[:d = at(document.tags, [\"Pie\"])]]");
    assert_eq!(
        form.data()["q"],
        "[[any(document.type, [\"product\"])][:d = at(document.tags, [\"Pie\"])]]"
    );
}

#[test]
fn bracketed_query_joins_the_default_list() {
    let mut form = SearchForm::new(form_with(q_default("[foo]")));
    form.query("[bar]");
    assert_eq!(form.data()["q"], "[foobar]");
}

#[test]
fn query_returns_the_same_builder() {
    let mut form = SearchForm::new(form_with(q_default("[foo]")));
    let before: *const SearchForm = &form;
    let after: *const SearchForm = form.query("[foo]");
    assert!(std::ptr::eq(before, after));
}

#[test]
fn repeated_queries_replace_each_other() {
    let mut form = SearchForm::new(form_with(q_default("[X]")));
    form.query("A").query("B");
    assert_eq!(form.data()["q"], "[XB]");
}

#[test]
fn splicing_without_brackets_appends() {
    assert_eq!(splice_predicate("X", "Y"), "XY");
    assert_eq!(splice_predicate("[a][b]", "c"), "[a][bc]");
    assert_eq!(splice_predicate("X", "[Y]"), "XY");
    assert_eq!(splice_predicate("[X]", "[Y"), "[X[Y]");
}

#[test]
fn parameters_overlay_defaults() {
    let fields = vec![
        ("q".to_owned(), Field::new("String", Some("[X]".to_owned()))),
        ("page".to_owned(), Field::new("Integer", Some("1".to_owned()))),
        ("ref".to_owned(), Field::new("String", None)),
    ];
    let mut form = SearchForm::new(form_with(fields));
    form.set("page", "2").reference(&Ref::new("live", "Master", true));
    assert_eq!(
        form.parameters(),
        vec![
            ("page".to_owned(), "2".to_owned()),
            ("q".to_owned(), "[X]".to_owned()),
            ("ref".to_owned(), "live".to_owned()),
        ]
    );
}

#[test]
fn url_carries_the_parameters() {
    let mut form = SearchForm::new(form_with(Vec::new()));
    form.set("ref", "live").query("[[:d = any(document.type, [\"store\"])]]");
    let url = form.url().expect("url");
    assert_eq!(url.path(), "/api/documents/search");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("q".to_owned(), "[[:d = any(document.type, [\"store\"])]]".to_owned()),
            ("ref".to_owned(), "live".to_owned()),
        ]
    );
}

#[test]
fn submit_decodes_the_results() {
    let api = Api::parse(common::api_json()).expect("api");
    let transport = common::StubTransport::new().respond(common::SEARCH_URL, common::search_json());
    let mut pies = api.form("pies").expect("pies");
    pies.reference(api.master());
    let documents = pies.submit(&transport).expect("documents");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].slug(), "apricot-pie");
    let requests = transport.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("ref=UgjWQN_mqa8HvPJY"));
    assert!(!requests[0].contains("access_token"));
}

#[test]
fn submit_only_supports_get() {
    let form = SearchForm::new(Form::new("post", Vec::<(String, Field)>::new(), "POST", None, None, common::SEARCH_URL));
    let transport = common::StubTransport::new();
    assert!(matches!(form.submit(&transport), Err(PrismicError::UnsupportedMethod(ref m)) if m == "POST"));
    assert!(transport.requests.borrow().is_empty());
}
