use std::error::Error;
use std::fmt;

/// Failures inside the MLS sync pipeline. Errors scoped to one record or
/// one zip code are recorded into the batch report rather than propagated;
/// see `mls::sync` for the aggregation rules.
#[derive(Debug)]
pub enum MlsError {
    Config(String),
    Network(String),
    UnexpectedShape(String),
    MissingListingKey,
    Db(String),
}

impl fmt::Display for MlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlsError::Config(msg) => write!(f, "MLS configuration error: {msg}"),
            MlsError::Network(msg) => write!(f, "Network error: {msg}"),
            MlsError::UnexpectedShape(msg) => write!(f, "Unexpected feed shape: {msg}"),
            MlsError::MissingListingKey => write!(f, "MLS record missing listing key"),
            MlsError::Db(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl Error for MlsError {}

impl From<crate::errors::ServerError> for MlsError {
    fn from(e: crate::errors::ServerError) -> Self {
        MlsError::Db(e.to_string())
    }
}
