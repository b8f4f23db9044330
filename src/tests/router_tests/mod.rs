mod contact_tests;
mod mls_tests;
mod properties_tests;

use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::mls::MlsConfig;
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;

/// Drive the router directly, the way the server loop does.
pub fn send(
    db: &Database,
    config: &MlsConfig,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Result<Response, ServerError> {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };

    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();

    handle(req, db, config)
}

/// Like `send`, but the request is expected to be rejected.
pub fn send_err(
    db: &Database,
    config: &MlsConfig,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> ServerError {
    match send(db, config, method, uri, body) {
        Err(e) => e,
        Ok(resp) => panic!("expected an error, got HTTP {}", resp.status()),
    }
}

pub fn read_body_json(resp: Response) -> serde_json::Value {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    serde_json::from_str(&body).expect("response body should be JSON")
}
