use crate::db::{contacts, listings, Database};
use crate::domain::contact::ContactInput;
use crate::domain::listing::ListingInput;
use crate::errors::ServerError;
use crate::mls::{MlsClient, MlsConfig, MlsSyncService};
use crate::responses::{json_response, no_content_response, ResultResp};
use astra::Request;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

pub fn handle(req: Request, db: &Database, mls_config: &MlsConfig) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);
    let mut req = req;

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(200, &json!({ "status": "ok" })),

        ("GET", "/api/v1/properties") => list_properties(db, &params),
        ("POST", "/api/v1/properties") => create_property(&mut req, db),

        ("POST", "/api/v1/contact") => submit_contact(&mut req, db),
        ("GET", "/api/v1/contact/submissions") => {
            let submissions = contacts::list_submissions(db)?;
            json_response(200, &submissions)
        }

        ("GET", "/api/v1/mls/status") => mls_status(mls_config),
        ("POST", "/api/v1/mls/sync/batch") => sync_batch(db, mls_config, &params),

        _ => {
            if let Some(rest) = path.strip_prefix("/api/v1/properties/") {
                let id: i64 = rest
                    .parse()
                    .map_err(|_| ServerError::BadRequest("invalid property id".into()))?;
                return match method.as_str() {
                    "GET" => get_property(db, id),
                    "PUT" => update_property(&mut req, db, id),
                    "DELETE" => delete_property(db, id),
                    _ => Err(ServerError::NotFound),
                };
            }
            if let ("POST", Some(zip)) = (method.as_str(), path.strip_prefix("/api/v1/mls/sync/zip/"))
            {
                return sync_zip(db, mls_config, zip);
            }
            Err(ServerError::NotFound)
        }
    }
}

// ---------- listings ----------

fn list_properties(db: &Database, params: &HashMap<String, String>) -> ResultResp {
    let query = listings::ListingQuery {
        page: parse_param(params, "page")?.unwrap_or(1),
        page_size: parse_param(params, "page_size")?.unwrap_or(20),
        zip_code: params.get("zip_code").cloned(),
        neighborhood: params.get("neighborhood").cloned(),
        min_price: parse_param(params, "min_price")?,
        max_price: parse_param(params, "max_price")?,
        bedrooms: parse_param(params, "bedrooms")?,
        bathrooms: parse_param(params, "bathrooms")?,
        property_type: params.get("property_type").cloned(),
        status: params.get("status").cloned(),
        source: match params.get("source").map(String::as_str) {
            Some("mls") => Some(listings::ListingSource::Mls),
            Some("manual") => Some(listings::ListingSource::Manual),
            _ => None,
        },
    };

    let page = listings::query_listings(db, &query)?;
    json_response(200, &page)
}

fn get_property(db: &Database, id: i64) -> ResultResp {
    let listing = listings::find_by_id(db, id)?.ok_or(ServerError::NotFound)?;
    json_response(200, &listing)
}

fn create_property(req: &mut Request, db: &Database) -> ResultResp {
    let input: ListingInput = read_json(req)?;
    let now = Utc::now().naive_utc();

    let id = listings::insert_listing(db, &input.into(), now)?;
    let listing = listings::find_by_id(db, id)?.ok_or(ServerError::InternalError)?;
    json_response(201, &listing)
}

fn update_property(req: &mut Request, db: &Database, id: i64) -> ResultResp {
    let input: ListingInput = read_json(req)?;
    let now = Utc::now().naive_utc();

    listings::update_listing(db, id, &input.into(), now)?;
    let listing = listings::find_by_id(db, id)?.ok_or(ServerError::InternalError)?;
    json_response(200, &listing)
}

fn delete_property(db: &Database, id: i64) -> ResultResp {
    listings::delete_listing(db, id)?;
    no_content_response()
}

// ---------- contact ----------

fn submit_contact(req: &mut Request, db: &Database) -> ResultResp {
    let input: ContactInput = read_json(req)?;
    input.validate().map_err(ServerError::BadRequest)?;

    let now = Utc::now().naive_utc();
    let id = contacts::insert_submission(db, &input, now)?;
    let submission = contacts::find_submission(db, id)?.ok_or(ServerError::InternalError)?;
    json_response(201, &submission)
}

// ---------- MLS sync ----------

const MLS_UNCONFIGURED: &str =
    "MLS not configured. Set MLS_API_URL and MLS_API_KEY (or MLS_USERNAME and MLS_PASSWORD).";

fn mls_status(config: &MlsConfig) -> ResultResp {
    let configured = config.is_configured();
    json_response(
        200,
        &json!({
            "configured": configured,
            "message": if configured {
                "MLS is configured and ready"
            } else {
                MLS_UNCONFIGURED
            },
        }),
    )
}

fn build_sync_service(
    db: &Database,
    config: &MlsConfig,
) -> Result<MlsSyncService<MlsClient>, ServerError> {
    let client = MlsClient::new(config.clone()).map_err(|e| {
        eprintln!("Failed to build MLS client: {e}");
        ServerError::InternalError
    })?;
    Ok(MlsSyncService::new(db.clone(), client, config.clone()))
}

fn sync_zip(db: &Database, config: &MlsConfig, zip_code: &str) -> ResultResp {
    if !config.is_configured() {
        return Err(ServerError::ServiceUnavailable(MLS_UNCONFIGURED.into()));
    }

    let service = build_sync_service(db, config)?;
    let report = service.sync_zip_code(zip_code);
    let status = if report.success { 200 } else { 500 };
    json_response(status, &report)
}

fn sync_batch(db: &Database, config: &MlsConfig, params: &HashMap<String, String>) -> ResultResp {
    if !config.is_configured() {
        return Err(ServerError::ServiceUnavailable(MLS_UNCONFIGURED.into()));
    }

    // ?zip_codes=34711,34747 — omitted means the built-in default set.
    let zip_codes: Option<Vec<String>> = params.get("zip_codes").map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(str::to_string)
            .collect()
    });

    let service = build_sync_service(db, config)?;
    let report = service.sync_all(zip_codes.as_deref());
    let status = if report.success { 200 } else { 500 };
    json_response(status, &report)
}

// ---------- helpers ----------

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for pair in q.split('&') {
            let mut parts = pair.splitn(2, '=');
            if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
                map.insert(k.to_string(), v.to_string());
            }
        }
    }

    map
}

fn parse_param<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, ServerError> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("invalid value for {name}"))),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    serde_json::from_slice(&buf)
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}
