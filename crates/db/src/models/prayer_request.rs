//! Prayer request model and DTOs.

use chapel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A prayer request row from the `prayer_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrayerRequest {
    pub id: DbId,
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub request_text: String,
    pub is_private: bool,
    pub is_approved: bool,
    pub is_answered: bool,
    pub created_at: Timestamp,
}

/// The public projection of an approved, non-private request. No contact details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicPrayerRequest {
    pub id: DbId,
    pub name: String,
    pub request_text: String,
    pub is_answered: bool,
    pub created_at: Timestamp,
}

impl From<&PrayerRequest> for PublicPrayerRequest {
    fn from(row: &PrayerRequest) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            request_text: row.request_text.clone(),
            is_answered: row.is_answered,
            created_at: row.created_at,
        }
    }
}

/// DTO for the public prayer request form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrayerRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 10, message = "Prayer request must be at least 10 characters."))]
    pub request_text: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Prayer request figures for the admin dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct PrayerStats {
    pub prayer_requests: i64,
    /// Requests still awaiting approval.
    pub pending_requests: i64,
}
