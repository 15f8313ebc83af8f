//! Event registration admission rules.
//!
//! A registration is admitted only after three checks, in this order:
//!
//! 1. the event exists and takes registrations,
//! 2. the email is not already registered for the event,
//! 3. the attendee total (existing + registrant + guests) stays within
//!    `max_attendees`, when the event has a cap.
//!
//! Repositories gather the facts and call [`check_registration`] while they
//! hold whatever lock makes check-then-insert atomic for their backend.

use crate::error::CoreError;
use crate::types::DbId;

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejection {
    #[error("Event {0} not found")]
    EventNotFound(DbId),

    #[error("Registration is not required for this event")]
    RegistrationNotRequired,

    #[error("You are already registered for this event")]
    AlreadyRegistered,

    #[error("This event is at capacity ({remaining} spots remaining, {requested} requested)")]
    AtCapacity { requested: i64, remaining: i64 },
}

impl From<RegistrationRejection> for CoreError {
    fn from(rejection: RegistrationRejection) -> Self {
        match rejection {
            RegistrationRejection::EventNotFound(id) => CoreError::NotFound { entity: "Event", id },
            RegistrationRejection::RegistrationNotRequired => {
                CoreError::Validation(rejection.to_string())
            }
            RegistrationRejection::AlreadyRegistered | RegistrationRejection::AtCapacity { .. } => {
                CoreError::Conflict(rejection.to_string())
            }
        }
    }
}

/// The parts of an event the admission rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCapacity {
    pub event_id: DbId,
    pub registration_required: bool,
    /// `None` means unlimited.
    pub max_attendees: Option<i32>,
}

/// People one registration accounts for: the registrant plus their guests.
pub fn attendee_count(num_guests: i32) -> i64 {
    i64::from(num_guests.max(0)) + 1
}

/// Run the admission checks against facts gathered by the repository.
///
/// `event` is `None` when no event with the requested id exists.
/// `current_attendees` is the sum of [`attendee_count`] over existing
/// registrations for the event.
pub fn check_registration(
    event_id: DbId,
    event: Option<EventCapacity>,
    already_registered: bool,
    current_attendees: i64,
    num_guests: i32,
) -> Result<(), RegistrationRejection> {
    let event = event.ok_or(RegistrationRejection::EventNotFound(event_id))?;

    if !event.registration_required {
        return Err(RegistrationRejection::RegistrationNotRequired);
    }

    if already_registered {
        return Err(RegistrationRejection::AlreadyRegistered);
    }

    if let Some(max) = event.max_attendees {
        let requested = attendee_count(num_guests);
        let remaining = (i64::from(max) - current_attendees).max(0);
        if current_attendees + requested > i64::from(max) {
            return Err(RegistrationRejection::AtCapacity {
                requested,
                remaining,
            });
        }
    }

    Ok(())
}

/// Emails are compared case-insensitively for duplicate detection.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
