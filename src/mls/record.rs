// src/mls/record.rs
//
// Field mapping from raw RESO Web API records into our normalized
// listing shape. Provider dialects disagree on field names, so every
// canonical field resolves through an ordered list of alternatives:
// first key present wins, documented default applies when none is.
// The mapper is pure and total; a missing listing key is the caller's
// problem (see `mls::sync::reconcile`), never a panic here.

use serde_json::Value;

use crate::domain::listing::{ListingStatus, MappedListing, DEFAULT_CITY, DEFAULT_STATE};
use crate::mls::status::translate_status;

/// One raw record as the provider sent it.
pub type RawRecord = serde_json::Map<String, Value>;

const EXTERNAL_ID_FIELDS: &[&str] = &["ListingKey", "ListingId", "MlsNumber"];

const FULL_ADDRESS_FIELDS: &[&str] = &["UnparsedAddress", "FullStreetAddress"];
const STREET_PART_FIELDS: &[&str] = &["StreetNumber", "StreetName", "StreetSuffix"];
const CITY_FIELDS: &[&str] = &["City"];
const STATE_FIELDS: &[&str] = &["StateOrProvince"];
const ZIP_FIELDS: &[&str] = &["PostalCode"];
const NEIGHBORHOOD_FIELDS: &[&str] = &["SubdivisionName", "Neighborhood"];

const PRICE_FIELDS: &[&str] = &["ListPrice", "CurrentPrice"];
const BEDROOM_FIELDS: &[&str] = &["BedroomsTotal"];
const BATHROOM_FIELDS: &[&str] = &["BathroomsTotalInteger", "BathroomsTotalDecimal"];
const SQUARE_FEET_FIELDS: &[&str] = &["LivingArea", "BuildingAreaTotal"];
const LOT_SIZE_FIELDS: &[&str] = &["LotSizeSquareFeet", "LotSizeArea"];
const YEAR_BUILT_FIELDS: &[&str] = &["YearBuilt"];
const PROPERTY_TYPE_FIELDS: &[&str] = &["PropertySubType", "PropertyType"];

const TAX_FIELDS: &[&str] = &["TaxAnnualAmount"];
const HOA_FIELDS: &[&str] = &["AssociationFee", "HoaFee"];

const STATUS_FIELDS: &[&str] = &["StandardStatus", "MlsStatus"];
const DESCRIPTION_FIELDS: &[&str] = &["PublicRemarks", "LongDescription"];
const MEDIA_FIELDS: &[&str] = &["Media"];
const MEDIA_URL_KEY: &str = "MediaURL";
const FLAT_MEDIA_FIELDS: &[&str] = &["MediaURL", "PhotoUrl"];
const FEATURE_FIELDS: &[&str] = &["Features", "InteriorFeatures"];

/// Normalize one raw MLS record. Missing optional fields fall back to
/// their documented defaults; nothing in here returns an error.
pub fn map_external_record(raw: &RawRecord) -> MappedListing {
    let status = translate_status(
        resolve_string(raw, STATUS_FIELDS)
            .as_deref()
            .unwrap_or_default(),
    );

    MappedListing {
        mls_number: resolve_string(raw, EXTERNAL_ID_FIELDS),
        address: resolve_address(raw, status),
        city: resolve_string(raw, CITY_FIELDS).unwrap_or_else(|| DEFAULT_CITY.to_string()),
        state: resolve_string(raw, STATE_FIELDS).unwrap_or_else(|| DEFAULT_STATE.to_string()),
        zip_code: resolve_string(raw, ZIP_FIELDS).unwrap_or_default(),
        neighborhood: resolve_string(raw, NEIGHBORHOOD_FIELDS),
        price: coerce_f64(raw, PRICE_FIELDS, 0.0),
        bedrooms: coerce_i64(raw, BEDROOM_FIELDS, 0),
        bathrooms: coerce_f64(raw, BATHROOM_FIELDS, 0.0),
        // "unknown" stays None here; 0 would mean a literal zero
        square_feet: resolve_i64(raw, SQUARE_FEET_FIELDS),
        lot_size: resolve_f64(raw, LOT_SIZE_FIELDS),
        year_built: resolve_i64(raw, YEAR_BUILT_FIELDS),
        property_type: resolve_property_type(raw),
        property_tax: resolve_f64(raw, TAX_FIELDS),
        // no MLS feed we know of carries one
        insurance_estimate: None,
        hoa_fee: resolve_f64(raw, HOA_FIELDS),
        status,
        description: resolve_string(raw, DESCRIPTION_FIELDS).unwrap_or_default(),
        image_urls: resolve_image_urls(raw),
        features: resolve_features(raw),
    }
}

/// Best-effort listing key straight off a raw record, for error
/// reporting before (or without) a full mapping pass.
pub fn resolve_external_id(raw: &RawRecord) -> Option<String> {
    resolve_string(raw, EXTERNAL_ID_FIELDS)
}

/// First alternative that is present and non-null.
fn first_present<'a>(raw: &'a RawRecord, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| raw.get(*name))
        .find(|v| !v.is_null())
}

/// Resolve a string field, stringifying bare numbers (listing keys in
/// particular show up as numbers from some vendors).
fn resolve_string(raw: &RawRecord, names: &[&str]) -> Option<String> {
    match first_present(raw, names)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn resolve_f64(raw: &RawRecord, names: &[&str]) -> Option<f64> {
    first_present(raw, names).and_then(value_as_f64)
}

fn resolve_i64(raw: &RawRecord, names: &[&str]) -> Option<i64> {
    first_present(raw, names).and_then(value_as_i64)
}

/// Total numeric coercion: unparsable input degrades to the default
/// instead of failing the record.
fn coerce_f64(raw: &RawRecord, names: &[&str], default: f64) -> f64 {
    resolve_f64(raw, names).unwrap_or(default)
}

fn coerce_i64(raw: &RawRecord, names: &[&str], default: i64) -> i64 {
    resolve_i64(raw, names).unwrap_or(default)
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Prefer an assembled full-address field, else join the street parts,
/// else fall back to a label derived from the listing status so the
/// address column is never blank.
fn resolve_address(raw: &RawRecord, status: ListingStatus) -> String {
    if let Some(full) = resolve_string(raw, FULL_ADDRESS_FIELDS).and_then(non_blank) {
        return full;
    }

    let parts: Vec<String> = STREET_PART_FIELDS
        .iter()
        .filter_map(|name| resolve_string(raw, std::slice::from_ref(name)))
        .filter_map(non_blank)
        .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }

    format!("{} Property", status.as_str())
}

/// Blank property types become "Residential"; the schema's column
/// default covers the generic "House" fallback for manual entries.
fn resolve_property_type(raw: &RawRecord) -> String {
    resolve_string(raw, PROPERTY_TYPE_FIELDS)
        .and_then(non_blank)
        .unwrap_or_else(|| "Residential".to_string())
}

/// Media arrives in three shapes across vendors: a structured array of
/// media objects, that same array JSON-encoded into a string, or a single
/// flat URL field. Order is preserved; entries without a URL are dropped;
/// a string that fails to decode yields no images.
fn resolve_image_urls(raw: &RawRecord) -> Vec<String> {
    match first_present(raw, MEDIA_FIELDS) {
        Some(Value::Array(entries)) => media_urls(entries),
        Some(Value::String(encoded)) => match serde_json::from_str::<Vec<Value>>(encoded) {
            Ok(entries) => media_urls(&entries),
            Err(_) => Vec::new(),
        },
        _ => resolve_string(raw, FLAT_MEDIA_FIELDS)
            .and_then(non_blank)
            .map(|url| vec![url])
            .unwrap_or_default(),
    }
}

fn media_urls(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(media) => media
                .get(MEDIA_URL_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Value::String(url) => Some(url.clone()),
            _ => None,
        })
        .collect()
}

/// Features come as an array of strings or a comma-joined string.
fn resolve_features(raw: &RawRecord) -> Vec<String> {
    match first_present(raw, FEATURE_FIELDS) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
