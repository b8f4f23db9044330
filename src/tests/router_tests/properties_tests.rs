use crate::errors::ServerError;
use crate::mls::MlsConfig;
use crate::tests::router_tests::{read_body_json, send, send_err};
use crate::tests::utils::init_test_db;
use http::Method;
use serde_json::json;

fn listing_body(address: &str, zip: &str, price: f64) -> serde_json::Value {
    json!({
        "address": address,
        "zip_code": zip,
        "price": price,
        "bedrooms": 3,
        "bathrooms": 2.0,
        "description": "A lovely home."
    })
}

#[test]
fn create_then_fetch_a_property() {
    let db = init_test_db("router_create_fetch");
    let config = MlsConfig::default();

    let resp = send(
        &db,
        &config,
        Method::POST,
        "/api/v1/properties",
        Some(listing_body("12 Oak St", "34711", 325000.0)),
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let created = read_body_json(resp);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["address"], "12 Oak St");
    assert_eq!(created["city"], "Orlando"); // defaulted
    assert_eq!(created["status"], "Available");
    assert_eq!(created["mls_number"], serde_json::Value::Null);

    let resp = send(
        &db,
        &config,
        Method::GET,
        &format!("/api/v1/properties/{id}"),
        None,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_body_json(resp)["price"], 325000.0);
}

#[test]
fn unknown_property_is_a_404() {
    let db = init_test_db("router_404");
    let config = MlsConfig::default();

    let err = send_err(&db, &config, Method::GET, "/api/v1/properties/9999", None);
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn listing_query_filters_and_paginates() {
    let db = init_test_db("router_filters");
    let config = MlsConfig::default();

    for (address, zip, price) in [
        ("1 A St", "34711", 200000.0),
        ("2 B St", "34711", 400000.0),
        ("3 C St", "34747", 600000.0),
    ] {
        let resp = send(
            &db,
            &config,
            Method::POST,
            "/api/v1/properties",
            Some(listing_body(address, zip, price)),
        )
        .unwrap();
        assert_eq!(resp.status(), 201);
    }

    // zip filter
    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/properties?zip_code=34711",
        None,
    )
    .unwrap();
    let page = read_body_json(resp);
    assert_eq!(page["total"], 2);

    // price range
    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/properties?min_price=300000&max_price=500000",
        None,
    )
    .unwrap();
    let page = read_body_json(resp);
    assert_eq!(page["total"], 1);
    assert_eq!(page["properties"][0]["address"], "2 B St");

    // pagination caps and reports itself
    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/properties?page=2&page_size=2",
        None,
    )
    .unwrap();
    let page = read_body_json(resp);
    assert_eq!(page["page"], 2);
    assert_eq!(page["page_size"], 2);
    assert_eq!(page["total"], 3);
    assert_eq!(page["properties"].as_array().unwrap().len(), 1);
}

#[test]
fn source_filter_separates_manual_from_synced() {
    let db = init_test_db("router_source_filter");
    let config = MlsConfig::default();

    let mut synced = listing_body("5 Mls Way", "34711", 500000.0);
    synced["mls_number"] = json!("MLS900");
    for body in [listing_body("4 Manual Rd", "34711", 300000.0), synced] {
        send(&db, &config, Method::POST, "/api/v1/properties", Some(body)).unwrap();
    }

    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/properties?source=manual",
        None,
    )
    .unwrap();
    let page = read_body_json(resp);
    assert_eq!(page["total"], 1);
    assert_eq!(page["properties"][0]["address"], "4 Manual Rd");

    let resp = send(
        &db,
        &config,
        Method::GET,
        "/api/v1/properties?source=mls",
        None,
    )
    .unwrap();
    assert_eq!(read_body_json(resp)["total"], 1);
}

#[test]
fn put_replaces_and_delete_removes() {
    let db = init_test_db("router_put_delete");
    let config = MlsConfig::default();

    let resp = send(
        &db,
        &config,
        Method::POST,
        "/api/v1/properties",
        Some(listing_body("7 Elm Ct", "34711", 250000.0)),
    )
    .unwrap();
    let id = read_body_json(resp)["id"].as_i64().unwrap();

    let mut replacement = listing_body("7 Elm Ct", "34711", 239000.0);
    replacement["status"] = json!("Under Contract");
    let resp = send(
        &db,
        &config,
        Method::PUT,
        &format!("/api/v1/properties/{id}"),
        Some(replacement),
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let updated = read_body_json(resp);
    assert_eq!(updated["price"], 239000.0);
    assert_eq!(updated["status"], "Under Contract");

    let resp = send(
        &db,
        &config,
        Method::DELETE,
        &format!("/api/v1/properties/{id}"),
        None,
    )
    .unwrap();
    assert_eq!(resp.status(), 204);

    let err = send_err(
        &db,
        &config,
        Method::GET,
        &format!("/api/v1/properties/{id}"),
        None,
    );
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn invalid_body_is_a_bad_request() {
    let db = init_test_db("router_bad_body");
    let config = MlsConfig::default();

    let err = send_err(
        &db,
        &config,
        Method::POST,
        "/api/v1/properties",
        Some(json!({ "price": "not even a listing" })),
    );
    assert!(matches!(err, ServerError::BadRequest(_)));
}
