use crate::db::connection::Database;
use crate::domain::listing::{Listing, ListingPage, ListingStatus, MappedListing};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

// Column order shared by every SELECT in this module.
const LISTING_COLUMNS: &str = "id, mls_number, address, city, state, zip_code, neighborhood, \
     price, bedrooms, bathrooms, square_feet, lot_size, year_built, property_type, \
     property_tax, insurance_estimate, hoa_fee, status, description, image_urls, features, \
     created_at, updated_at";

fn row_to_listing(row: &Row) -> rusqlite::Result<Listing> {
    let status: String = row.get(17)?;
    let description: Option<String> = row.get(18)?;
    let image_urls: Option<String> = row.get(19)?;
    let features: Option<String> = row.get(20)?;

    Ok(Listing {
        id: row.get(0)?,
        mls_number: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        zip_code: row.get(5)?,
        neighborhood: row.get(6)?,
        price: row.get(7)?,
        bedrooms: row.get(8)?,
        bathrooms: row.get(9)?,
        square_feet: row.get(10)?,
        lot_size: row.get(11)?,
        year_built: row.get(12)?,
        property_type: row.get(13)?,
        property_tax: row.get(14)?,
        insurance_estimate: row.get(15)?,
        hoa_fee: row.get(16)?,
        status: ListingStatus::from_db(&status),
        description: description.unwrap_or_default(),
        image_urls: decode_json_list(image_urls.as_deref()),
        features: decode_json_list(features.as_deref()),
        created_at: row.get(21)?,
        updated_at: row.get(22)?,
    })
}

/// Image URLs and features live in TEXT columns as JSON arrays. A column
/// that fails to decode reads back as empty rather than failing the row.
fn decode_json_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

fn encode_json_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_string(items).ok()
    }
}

pub fn find_by_id(db: &Database, id: i64) -> Result<Option<Listing>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1"),
            params![id],
            row_to_listing,
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

pub fn find_by_mls_number(db: &Database, mls_number: &str) -> Result<Option<Listing>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {LISTING_COLUMNS} FROM listings WHERE mls_number = ?1"),
            params![mls_number],
            row_to_listing,
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

pub fn insert_listing(
    db: &Database,
    listing: &MappedListing,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO listings (
                mls_number, address, city, state, zip_code, neighborhood,
                price, bedrooms, bathrooms, square_feet, lot_size, year_built, property_type,
                property_tax, insurance_estimate, hoa_fee, status, description,
                image_urls, features, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                ?14, ?15, ?16, ?17, ?18,
                ?19, ?20, ?21
            )
            "#,
            params![
                listing.mls_number,
                listing.address,
                listing.city,
                listing.state,
                listing.zip_code,
                listing.neighborhood,
                listing.price,
                listing.bedrooms,
                listing.bathrooms,
                listing.square_feet,
                listing.lot_size,
                listing.year_built,
                listing.property_type,
                listing.property_tax,
                listing.insurance_estimate,
                listing.hoa_fee,
                listing.status.as_str(),
                listing.description,
                encode_json_list(&listing.image_urls),
                encode_json_list(&listing.features),
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(conn.last_insert_rowid())
    })
}

/// Full replace of every mapped field, refreshing `updated_at`. Used by
/// both the sync reconciler and the CRUD PUT handler; the feed (or the
/// caller) always wins, field by field.
pub fn update_listing(
    db: &Database,
    id: i64,
    listing: &MappedListing,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let changed = conn
            .execute(
                r#"
                UPDATE listings SET
                    mls_number = ?1, address = ?2, city = ?3, state = ?4, zip_code = ?5,
                    neighborhood = ?6, price = ?7, bedrooms = ?8, bathrooms = ?9,
                    square_feet = ?10, lot_size = ?11, year_built = ?12, property_type = ?13,
                    property_tax = ?14, insurance_estimate = ?15, hoa_fee = ?16,
                    status = ?17, description = ?18, image_urls = ?19, features = ?20,
                    updated_at = ?21
                WHERE id = ?22
                "#,
                params![
                    listing.mls_number,
                    listing.address,
                    listing.city,
                    listing.state,
                    listing.zip_code,
                    listing.neighborhood,
                    listing.price,
                    listing.bedrooms,
                    listing.bathrooms,
                    listing.square_feet,
                    listing.lot_size,
                    listing.year_built,
                    listing.property_type,
                    listing.property_tax,
                    listing.insurance_estimate,
                    listing.hoa_fee,
                    listing.status.as_str(),
                    listing.description,
                    encode_json_list(&listing.image_urls),
                    encode_json_list(&listing.features),
                    now,
                    id,
                ],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        if changed == 0 {
            return Err(ServerError::NotFound);
        }
        Ok(())
    })
}

pub fn delete_listing(db: &Database, id: i64) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let changed = conn
            .execute("DELETE FROM listings WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        if changed == 0 {
            return Err(ServerError::NotFound);
        }
        Ok(())
    })
}

/// Whether a query should see synced listings, manual ones, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Mls,
    Manual,
}

/// Filters and pagination for the public listings query.
#[derive(Debug, Default)]
pub struct ListingQuery {
    pub page: i64,
    pub page_size: i64,
    pub zip_code: Option<String>,
    pub neighborhood: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub source: Option<ListingSource>,
}

pub fn query_listings(db: &Database, query: &ListingQuery) -> Result<ListingPage, ServerError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(zip) = &query.zip_code {
        clauses.push("zip_code = ?".into());
        values.push(SqlValue::Text(zip.clone()));
    }
    if let Some(neighborhood) = &query.neighborhood {
        clauses.push("neighborhood LIKE ?".into());
        values.push(SqlValue::Text(format!("%{neighborhood}%")));
    }
    if let Some(min_price) = query.min_price {
        clauses.push("price >= ?".into());
        values.push(SqlValue::Real(min_price));
    }
    if let Some(max_price) = query.max_price {
        clauses.push("price <= ?".into());
        values.push(SqlValue::Real(max_price));
    }
    if let Some(bedrooms) = query.bedrooms {
        clauses.push("bedrooms >= ?".into());
        values.push(SqlValue::Integer(bedrooms));
    }
    if let Some(bathrooms) = query.bathrooms {
        clauses.push("bathrooms >= ?".into());
        values.push(SqlValue::Real(bathrooms));
    }
    if let Some(property_type) = &query.property_type {
        clauses.push("property_type = ?".into());
        values.push(SqlValue::Text(property_type.clone()));
    }
    if let Some(status) = &query.status {
        clauses.push("status = ?".into());
        values.push(SqlValue::Text(status.clone()));
    }
    match query.source {
        Some(ListingSource::Mls) => clauses.push("mls_number IS NOT NULL".into()),
        Some(ListingSource::Manual) => clauses.push("mls_number IS NULL".into()),
        None => {}
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, 100);
    let offset = (page - 1) * page_size;

    db.with_conn(|conn| {
        let total: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM listings {where_sql}"),
                params_from_iter(values.iter()),
                |row| row.get(0),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {LISTING_COLUMNS} FROM listings {where_sql} \
                 ORDER BY created_at DESC, id DESC LIMIT {page_size} OFFSET {offset}"
            ))
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_listing)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut properties = Vec::new();
        for row in rows {
            properties.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }

        Ok(ListingPage {
            properties,
            total,
            page,
            page_size,
        })
    })
}
