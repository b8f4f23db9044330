mod client;
mod config;
mod error;
mod record;
mod status;
mod sync;

pub use client::{ListingFeed, MlsClient};
pub use config::MlsConfig;
pub use error::MlsError;
pub use record::{map_external_record, resolve_external_id, RawRecord};
pub use status::translate_status;
pub use sync::{reconcile, MlsSyncService, SyncIssue, SyncReport, UpsertOutcome, DEFAULT_ZIP_CODES};
