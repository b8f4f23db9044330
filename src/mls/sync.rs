// src/mls/sync.rs
//
// Upsert reconciliation and batch orchestration for the MLS feed.
// One bad record never aborts a zip code; one bad zip code never aborts
// a multi-zip run. Everything that goes wrong below the fetch boundary
// is collected into the report instead of thrown.

use chrono::Utc;
use serde::Serialize;

use crate::db::connection::Database;
use crate::db::listings;
use crate::domain::listing::MappedListing;
use crate::mls::client::ListingFeed;
use crate::mls::config::MlsConfig;
use crate::mls::record::{map_external_record, resolve_external_id};
use crate::mls::MlsError;

/// The zip codes we sync when the caller doesn't name any: our core
/// Central Florida market.
pub const DEFAULT_ZIP_CODES: &[&str] = &[
    "34736", // Groveland/Clermont
    "34711", // Clermont
    "34747", // Kissimmee
    "34746", // Kissimmee
    "34734", // Gotha
    "34761", // Ocoee
    "34787", // Winter Garden
    "32819", // Orlando
    "32821", // Orlando
    "32827", // Orlando
];

const NOT_CONFIGURED_MSG: &str =
    "MLS not configured. Set MLS_API_URL and MLS_API_KEY (or MLS_USERNAME and MLS_PASSWORD).";

/// Outcome of reconciling one mapped listing against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

/// One record- or zip-scoped failure inside an otherwise successful run.
#[derive(Debug, Serialize)]
pub struct SyncIssue {
    pub identifier: String,
    pub reason: String,
}

/// Aggregate outcome of a sync pass. `success` reflects only whether the
/// pass could run at all; per-record failures live in `errors`.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub success: bool,
    pub added: u32,
    pub updated: u32,
    pub errors: Vec<SyncIssue>,
    pub message: String,
}

impl SyncReport {
    fn not_configured() -> Self {
        SyncReport {
            success: false,
            added: 0,
            updated: 0,
            errors: Vec::new(),
            message: NOT_CONFIGURED_MSG.to_string(),
        }
    }
}

/// Insert-or-update a mapped listing, keyed by its MLS number.
///
/// Updates are a full replace of every mapped field; the feed always
/// wins. Listings without an MLS number cannot be reconciled and are
/// rejected before any write happens.
pub fn reconcile(db: &Database, mapped: &MappedListing) -> Result<UpsertOutcome, MlsError> {
    let key = mapped
        .mls_number
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(MlsError::MissingListingKey)?;

    let now = Utc::now().naive_utc();

    match listings::find_by_mls_number(db, key)? {
        Some(existing) => {
            listings::update_listing(db, existing.id, mapped, now)?;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            listings::insert_listing(db, mapped, now)?;
            Ok(UpsertOutcome::Added)
        }
    }
}

/// Drives fetch → map → reconcile for the configured feed.
pub struct MlsSyncService<F: ListingFeed> {
    db: Database,
    feed: F,
    config: MlsConfig,
}

impl<F: ListingFeed> MlsSyncService<F> {
    pub fn new(db: Database, feed: F, config: MlsConfig) -> Self {
        Self { db, feed, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Sync every listing the feed has for one zip code.
    ///
    /// A fetch error fails the whole zip (`success=false`); anything that
    /// goes wrong for a single record is recorded and skipped.
    pub fn sync_zip_code(&self, zip_code: &str) -> SyncReport {
        if !self.config.is_configured() {
            eprintln!("⚠️ MLS sync requested but no credentials are configured");
            return SyncReport::not_configured();
        }

        let records = match self.feed.fetch_by_zip(zip_code) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("⚠️ MLS sync failed for zip {zip_code}: {e}");
                return SyncReport {
                    success: false,
                    added: 0,
                    updated: 0,
                    errors: vec![SyncIssue {
                        identifier: zip_code.to_string(),
                        reason: e.to_string(),
                    }],
                    message: format!("Error syncing listings for zip code {zip_code}: {e}"),
                };
            }
        };

        let mut added = 0;
        let mut updated = 0;
        let mut errors = Vec::new();

        for raw in &records {
            // Best-effort identifier for error reporting, resolved before
            // mapping so even a hopeless record names itself.
            let identifier =
                resolve_external_id(raw).unwrap_or_else(|| "<no listing key>".to_string());

            let mapped = map_external_record(raw);
            match reconcile(&self.db, &mapped) {
                Ok(UpsertOutcome::Added) => added += 1,
                Ok(UpsertOutcome::Updated) => updated += 1,
                Err(e) => {
                    eprintln!("⚠️ Failed to sync listing {identifier}: {e}");
                    errors.push(SyncIssue {
                        identifier,
                        reason: e.to_string(),
                    });
                }
            }
        }

        eprintln!("✅ Synced zip {zip_code}: {added} added, {updated} updated");

        SyncReport {
            success: true,
            added,
            updated,
            errors,
            message: format!(
                "Synced {} listings for zip code {zip_code}",
                added + updated
            ),
        }
    }

    /// Sync a set of zip codes in order, aggregating counts and errors.
    ///
    /// A zip whose fetch failed contributes one error entry tagged with
    /// the zip code and the run moves on; once the configuration gate has
    /// passed, the aggregate result is always `success=true`.
    pub fn sync_all(&self, zip_codes: Option<&[String]>) -> SyncReport {
        if !self.config.is_configured() {
            return SyncReport::not_configured();
        }

        let defaults: Vec<String> = DEFAULT_ZIP_CODES.iter().map(|z| z.to_string()).collect();
        let zips = zip_codes.unwrap_or(&defaults);

        let mut added = 0;
        let mut updated = 0;
        let mut errors = Vec::new();

        for zip in zips {
            let report = self.sync_zip_code(zip);
            if report.success {
                added += report.added;
                updated += report.updated;
                errors.extend(report.errors);
            } else {
                errors.push(SyncIssue {
                    identifier: zip.clone(),
                    reason: report.message,
                });
            }
        }

        SyncReport {
            success: true,
            added,
            updated,
            errors,
            message: format!(
                "Synced {} listings across {} zip codes",
                added + updated,
                zips.len()
            ),
        }
    }
}
