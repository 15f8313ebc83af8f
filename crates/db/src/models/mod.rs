//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - Where the entity is editable, an update DTO (all `Option` fields) for patches

pub mod event;
pub mod live_stream;
pub mod member;
pub mod prayer_request;
pub mod sermon;

use chapel_core::error::CoreError;
use validator::Validate;

/// Run `validator` rules on a DTO, flattening failures into one
/// [`CoreError::Validation`] message.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        CoreError::Validation(messages.join("; "))
    })
}
