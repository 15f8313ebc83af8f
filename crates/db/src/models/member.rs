//! Member entity model and DTOs.

use chapel_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A member row from the `members` table, keyed by the identity provider's user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the member registration form.
///
/// `user_id` is optional in the body; when present it must equal the
/// authenticated subject.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMember {
    pub user_id: Option<String>,
    #[validate(length(min = 2, message = "First name must be at least 2 characters."))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters."))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Member figures for the admin dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct MemberStats {
    pub total_members: i64,
    /// Members created within the reporting window.
    pub new_members: i64,
}
