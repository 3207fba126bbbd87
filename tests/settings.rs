use prismic::config::{Settings, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_SECS};
use prismic::error::PrismicError;

#[test]
fn defaults_fill_missing_values() {
    let settings = Settings::from_toml(r#"endpoint = "https://lesbonneschoses.prismic.io/api""#).expect("settings");
    assert_eq!(settings.endpoint, "https://lesbonneschoses.prismic.io/api");
    assert_eq!(settings.access_token, None);
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn file_values_override_defaults() {
    let settings = Settings::from_toml(
        r#"
        endpoint = "https://lesbonneschoses.prismic.io/api"
        access_token = "s3cr3t"
        timeout_secs = 5
        log_filter = "prismic=debug"
        "#,
    )
    .expect("settings");
    assert_eq!(settings.access_token.as_deref(), Some("s3cr3t"));
    assert_eq!(settings.timeout_secs, 5);
    assert_eq!(settings.log_filter, "prismic=debug");
}

#[test]
fn endpoint_is_required() {
    let error = Settings::from_toml("timeout_secs = 5").unwrap_err();
    assert!(matches!(error, PrismicError::Config(_)));
}

#[test]
fn malformed_toml_is_a_config_error() {
    assert!(matches!(Settings::from_toml("endpoint = "), Err(PrismicError::Config(_))));
}
