//! Request field validation shared by the customer and video endpoints.
//!
//! Request bodies arrive with every field optional so that an absent key
//! can be reported as [`CoreError::MissingField`] instead of a generic
//! deserialization failure.

use crate::error::CoreError;
use crate::types::CalendarDate;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unwrap a required request field, naming it in the error when absent.
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, CoreError> {
    value.ok_or(CoreError::MissingField(field))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<CalendarDate, CoreError> {
    CalendarDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::InvalidFormat(format!(
            "'{raw}' is not a valid date, expected YYYY-MM-DD"
        ))
    })
}

/// Total inventory counts physical copies and cannot be negative.
pub fn validate_total_inventory(total_inventory: i32) -> Result<(), CoreError> {
    if total_inventory < 0 {
        return Err(CoreError::Validation(format!(
            "total_inventory must be >= 0, got {total_inventory}"
        )));
    }
    Ok(())
}
