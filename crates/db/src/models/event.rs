//! Event and event-registration models and DTOs.

use chapel_core::registration::EventCapacity;
use chapel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    /// Free-form display time, e.g. `"9:00 AM & 11:00 AM"`.
    pub time_label: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_recurring: bool,
    pub registration_required: bool,
    /// `None` means unlimited.
    pub max_attendees: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    pub fn capacity(&self) -> EventCapacity {
        EventCapacity {
            event_id: self.id,
            registration_required: self.registration_required,
            max_attendees: self.max_attendees,
        }
    }
}

/// DTO for creating an event. An empty `slug` is derived from the title.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub content: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub time_label: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub registration_required: bool,
    #[validate(range(min = 1, message = "Max attendees must be at least 1"))]
    pub max_attendees: Option<i32>,
}

/// An attendee's registration row from `event_registrations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRegistration {
    pub id: DbId,
    pub event_id: DbId,
    /// External identity-provider user id, when the registrant was signed in.
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub num_guests: i32,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for the public registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRegistration {
    #[validate(length(min = 2, message = "First name must be at least 2 characters."))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters."))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 10, message = "Maximum 10 additional guests allowed."))]
    pub num_guests: i32,
    pub comments: Option<String>,
}

/// Whether an email already holds a registration for an event.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatus {
    pub is_registered: bool,
}

/// Event figures for the admin dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventStats {
    pub upcoming_events: i64,
    pub next_event_name: Option<String>,
}
