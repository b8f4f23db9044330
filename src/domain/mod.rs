pub mod contact;
pub mod listing;
