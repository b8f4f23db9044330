// src/domain/listing.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fallbacks for listings that arrive without a usable location. The site
/// serves a single metro market, so these are fixed rather than guessed.
pub const DEFAULT_CITY: &str = "Orlando";
pub const DEFAULT_STATE: &str = "FL";
pub const DEFAULT_PROPERTY_TYPE: &str = "House";

/// Internal listing status vocabulary. External feeds use a much wider
/// set of labels; see `mls::status` for the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Under Contract")]
    UnderContract,
    #[serde(rename = "Sold")]
    Sold,
    #[serde(rename = "Off Market")]
    OffMarket,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "Available",
            ListingStatus::UnderContract => "Under Contract",
            ListingStatus::Sold => "Sold",
            ListingStatus::OffMarket => "Off Market",
        }
    }

    /// Parse a status column value back out of the database. Anything we
    /// don't recognize degrades to `Available` rather than failing a read.
    pub fn from_db(s: &str) -> Self {
        match s {
            "Under Contract" => ListingStatus::UnderContract,
            "Sold" => ListingStatus::Sold,
            "Off Market" => ListingStatus::OffMarket,
            _ => ListingStatus::Available,
        }
    }
}

/// A listing as normalized from an external feed (or a manual entry),
/// flattened and ready to be written to the store. This acts as an
/// anti-corruption layer between raw provider payloads and our rows.
///
/// `mls_number` is the provider's stable key. It is the sole reconciliation
/// key for synced listings; manual entries leave it `None` and are never
/// touched by sync.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedListing {
    pub mls_number: Option<String>,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub neighborhood: Option<String>,

    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub square_feet: Option<i64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i64>,
    pub property_type: String,

    pub property_tax: Option<f64>,
    pub insurance_estimate: Option<f64>,
    pub hoa_fee: Option<f64>,

    pub status: ListingStatus,
    pub description: String,
    pub image_urls: Vec<String>,
    pub features: Vec<String>,
}

/// A listing as stored, with row identity and lifecycle timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: i64,
    pub mls_number: Option<String>,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub neighborhood: Option<String>,

    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub square_feet: Option<i64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i64>,
    pub property_type: String,

    pub property_tax: Option<f64>,
    pub insurance_estimate: Option<f64>,
    pub hoa_fee: Option<f64>,

    pub status: ListingStatus,
    pub description: String,
    pub image_urls: Vec<String>,
    pub features: Vec<String>,

    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Request body for creating or replacing a listing through the CRUD API.
#[derive(Debug, Deserialize)]
pub struct ListingInput {
    pub mls_number: Option<String>,

    pub address: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub zip_code: String,
    pub neighborhood: Option<String>,

    pub price: f64,
    #[serde(default)]
    pub bedrooms: i64,
    #[serde(default)]
    pub bathrooms: f64,
    pub square_feet: Option<i64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i64>,
    #[serde(default = "default_property_type")]
    pub property_type: String,

    pub property_tax: Option<f64>,
    pub insurance_estimate: Option<f64>,
    pub hoa_fee: Option<f64>,

    #[serde(default)]
    pub status: ListingStatus,
    pub description: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

fn default_property_type() -> String {
    DEFAULT_PROPERTY_TYPE.to_string()
}

impl From<ListingInput> for MappedListing {
    fn from(input: ListingInput) -> Self {
        MappedListing {
            mls_number: input.mls_number.filter(|s| !s.is_empty()),
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            neighborhood: input.neighborhood,
            price: input.price,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            square_feet: input.square_feet,
            lot_size: input.lot_size,
            year_built: input.year_built,
            property_type: input.property_type,
            property_tax: input.property_tax,
            insurance_estimate: input.insurance_estimate,
            hoa_fee: input.hoa_fee,
            status: input.status,
            description: input.description.unwrap_or_default(),
            image_urls: input.image_urls,
            features: input.features,
        }
    }
}

/// One page of listing query results.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub properties: Vec<Listing>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
