use crate::errors::ServerError;
use crate::mls::MlsConfig;
use crate::tests::router_tests::{read_body_json, send, send_err};
use crate::tests::utils::init_test_db;
use http::Method;
use serde_json::json;

#[test]
fn contact_form_round_trip() {
    let db = init_test_db("router_contact");
    let config = MlsConfig::default();

    let resp = send(
        &db,
        &config,
        Method::POST,
        "/api/v1/contact",
        Some(json!({
            "name": "Jane Buyer",
            "email": "jane@example.com",
            "message": "I'd like to see the Oak St house this weekend.",
            "interest_type": "buy"
        })),
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let created = read_body_json(resp);
    assert_eq!(created["name"], "Jane Buyer");
    assert_eq!(created["submission_type"], "contact"); // defaulted

    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/contact/submissions",
        None,
    )
    .unwrap();
    let listed = read_body_json(resp);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["email"], "jane@example.com");
}

#[test]
fn appointment_requests_keep_their_schedule_fields() {
    let db = init_test_db("router_appointment");
    let config = MlsConfig::default();

    let resp = send(
        &db,
        &config,
        Method::POST,
        "/api/v1/contact",
        Some(json!({
            "name": "Sam Seller",
            "email": "sam@example.com",
            "message": "Please call about listing my townhouse.",
            "submission_type": "appointment",
            "preferred_date": "2026-09-12",
            "preferred_time": "morning"
        })),
    )
    .unwrap();

    let created = read_body_json(resp);
    assert_eq!(created["submission_type"], "appointment");
    assert_eq!(created["preferred_date"], "2026-09-12");
}

#[test]
fn blank_required_fields_are_rejected() {
    let db = init_test_db("router_contact_invalid");
    let config = MlsConfig::default();

    let err = send_err(
        &db,
        &config,
        Method::POST,
        "/api/v1/contact",
        Some(json!({ "name": " ", "email": "x@example.com", "message": "hi" })),
    );
    assert!(matches!(err, ServerError::BadRequest(_)));
}
