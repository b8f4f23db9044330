// src/mls/status.rs

use crate::domain::listing::ListingStatus;

/// Translate an MLS status label into our internal vocabulary.
///
/// Total by design: anything we don't recognize (including an empty
/// string) lands on `Available` instead of failing the record.
pub fn translate_status(raw: &str) -> ListingStatus {
    match raw {
        "Active" => ListingStatus::Available,
        "Pending" => ListingStatus::UnderContract,
        "Sold" => ListingStatus::Sold,
        "Withdrawn" | "Expired" | "Cancelled" => ListingStatus::OffMarket,
        _ => ListingStatus::Available,
    }
}
