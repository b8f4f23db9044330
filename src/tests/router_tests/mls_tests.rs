use crate::errors::ServerError;
use crate::mls::MlsConfig;
use crate::tests::router_tests::{read_body_json, send, send_err};
use crate::tests::utils::init_test_db;
use http::Method;

#[test]
fn status_endpoint_reports_unconfigured() {
    let db = init_test_db("router_mls_status");
    let config = MlsConfig::default();

    let resp = send(&db, &config, Method::GET, "/api/v1/mls/status", None).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body_json(resp);
    assert_eq!(body["configured"], false);
}

#[test]
fn status_endpoint_reports_configured() {
    let db = init_test_db("router_mls_status_ok");
    let config = MlsConfig {
        base_url: Some("https://mls.example.test".into()),
        api_key: Some("key".into()),
        ..Default::default()
    };

    let resp = send(&db, &config, Method::GET, "/api/v1/mls/status", None).unwrap();
    let body = read_body_json(resp);
    assert_eq!(body["configured"], true);
    assert_eq!(body["message"], "MLS is configured and ready");
}

#[test]
fn sync_endpoints_return_503_when_unconfigured() {
    let db = init_test_db("router_mls_503");
    let config = MlsConfig::default();

    let err = send_err(
        &db,
        &config,
        Method::POST,
        "/api/v1/mls/sync/zip/34711",
        None,
    );
    assert!(matches!(err, ServerError::ServiceUnavailable(_)));

    let err = send_err(&db, &config, Method::POST, "/api/v1/mls/sync/batch", None);
    assert!(matches!(err, ServerError::ServiceUnavailable(_)));
}
