// src/mls/client.rs

use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

use crate::mls::config::MlsConfig;
use crate::mls::record::RawRecord;
use crate::mls::MlsError;

/// Per-fetch result cap; we never paginate past the first page.
const FETCH_CAP: usize = 200;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw listing batches, keyed by zip code. The sync service is
/// written against this seam so tests can feed it canned records.
pub trait ListingFeed {
    fn fetch_by_zip(&self, zip_code: &str) -> Result<Vec<RawRecord>, MlsError>;
}

/// RESO Web API client. Auth is basic-auth either way: API key + secret
/// when present, else username + password.
pub struct MlsClient {
    client: Client,
    config: MlsConfig,
}

impl MlsClient {
    pub fn new(config: MlsConfig) -> Result<Self, MlsError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| MlsError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

impl ListingFeed for MlsClient {
    /// Fetch one zip code's worth of listings.
    ///
    /// Provider-side failures (auth rejection, non-2xx, transport errors)
    /// degrade to an empty batch so one flaky zip never takes down a
    /// multi-zip run; they are logged for operators. Only a missing base
    /// URL or a response we cannot make sense of escapes as an error.
    fn fetch_by_zip(&self, zip_code: &str) -> Result<Vec<RawRecord>, MlsError> {
        let base = self
            .config
            .base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| MlsError::Config("MLS base URL not set".into()))?;

        let url = format!("{}/Property", base.trim_end_matches('/'));
        let query = [
            ("$filter", format!("PostalCode eq '{zip_code}'")),
            ("$top", FETCH_CAP.to_string()),
        ];

        let mut request = self.client.get(&url).query(&query);
        request = match (&self.config.api_key, &self.config.username) {
            (Some(key), _) => request.basic_auth(key, self.config.api_secret.as_deref()),
            (None, Some(user)) => request.basic_auth(user, self.config.password.as_deref()),
            (None, None) => request,
        };

        eprintln!("Fetching MLS listings for zip code {zip_code}");

        let resp = match request.send() {
            Ok(resp) => resp,
            Err(e) => {
                eprintln!("⚠️ MLS fetch failed for zip {zip_code}: {e}");
                return Ok(Vec::new());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            eprintln!("⚠️ MLS returned HTTP {status} for zip {zip_code}: {body}");
            return Ok(Vec::new());
        }

        let payload: Value = resp
            .json()
            .map_err(|e| MlsError::UnexpectedShape(format!("response was not JSON: {e}")))?;

        // RESO wraps the result set in an OData "value" array.
        let entries = payload
            .get("value")
            .and_then(Value::as_array)
            .ok_or_else(|| MlsError::UnexpectedShape("missing \"value\" array".into()))?;

        let records = entries
            .iter()
            .filter_map(|entry| entry.as_object().cloned())
            .collect();

        Ok(records)
    }
}
