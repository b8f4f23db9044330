// src/domain/contact.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for the contact / appointment form.
#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub property_id: Option<i64>,
    /// buy, sell, invest, rent, other
    pub interest_type: Option<String>,
    /// "contact" or "appointment"
    #[serde(default = "default_submission_type")]
    pub submission_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
}

fn default_submission_type() -> String {
    "contact".to_string()
}

impl ContactInput {
    /// Presence checks only; anything fancier belongs in front of us.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".into());
        }
        if self.email.trim().is_empty() {
            return Err("email is required".into());
        }
        if self.message.trim().is_empty() {
            return Err("message is required".into());
        }
        Ok(())
    }
}

/// A stored contact submission.
#[derive(Debug, Serialize)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub property_id: Option<i64>,
    pub interest_type: Option<String>,
    pub submission_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub submitted_at: NaiveDateTime,
}
