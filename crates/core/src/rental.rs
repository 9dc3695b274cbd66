//! Rental lifecycle rules.
//!
//! A (customer, video) pair is either *closed* (no rental row) or *open*
//! (exactly one rental row). Check-out moves closed -> open and check-in
//! moves open -> closed. The guards here are evaluated by the persistence
//! layer against row-locked values inside the transition's transaction.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of a rental, counted from the moment of check-out.
pub const RENTAL_PERIOD_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Due date for a rental checked out at `checked_out_at`.
pub fn due_date_from(checked_out_at: Timestamp) -> Timestamp {
    checked_out_at + Duration::days(RENTAL_PERIOD_DAYS)
}

/// Guard for check-out: at least one copy must be on the shelf.
pub fn ensure_in_stock(available_inventory: i32) -> Result<(), CoreError> {
    if available_inventory <= 0 {
        return Err(CoreError::OutOfStock);
    }
    Ok(())
}

/// Guard for check-in: a copy can only come back if one is out.
pub fn ensure_returnable(available_inventory: i32, total_inventory: i32) -> Result<(), CoreError> {
    if available_inventory >= total_inventory {
        return Err(CoreError::FullyStocked);
    }
    Ok(())
}

/// Pick the single open rental for a (customer, video) pair.
///
/// Zero matches means there is nothing to check in; more than one means the
/// pair is in an inconsistent state. Both are reported as an invalid request.
pub fn single_open_rental<T>(mut matches: Vec<T>) -> Result<T, CoreError> {
    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(CoreError::InvalidRequest(
            "no open rental for that customer and video".to_string(),
        )),
        n => Err(CoreError::InvalidRequest(format!(
            "expected one open rental for that customer and video, found {n}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// `0 <= available <= total`.
pub fn inventory_within_bounds(available_inventory: i32, total_inventory: i32) -> bool {
    (0..=total_inventory).contains(&available_inventory)
}

/// New available count after `total_inventory` changes from `old_total` to
/// `new_total`.
///
/// The number of copies currently rented out is preserved, so the available
/// count moves by the same delta as the total. Fails when the new total is
/// smaller than the number of copies still rented.
pub fn rebalance_available(
    old_total: i32,
    old_available: i32,
    new_total: i32,
) -> Result<i32, CoreError> {
    let rented = old_total - old_available;
    let available = new_total - rented;
    if available < 0 {
        return Err(CoreError::Validation(format!(
            "total_inventory ({new_total}) is less than the {rented} copies currently rented"
        )));
    }
    Ok(available)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    // -- due_date_from -------------------------------------------------------

    #[test]
    fn due_date_is_one_week_out() {
        let now = Utc.with_ymd_and_hms(2024, 2, 26, 18, 30, 0).unwrap();
        let due = due_date_from(now);
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 3, 4, 18, 30, 0).unwrap());
    }

    // -- ensure_in_stock -----------------------------------------------------

    #[test]
    fn check_out_allowed_with_copies_left() {
        assert!(ensure_in_stock(1).is_ok());
        assert!(ensure_in_stock(3).is_ok());
    }

    #[test]
    fn check_out_rejected_when_shelf_is_empty() {
        assert_matches!(ensure_in_stock(0), Err(CoreError::OutOfStock));
    }

    #[test]
    fn check_out_rejected_for_negative_inventory() {
        assert_matches!(ensure_in_stock(-2), Err(CoreError::OutOfStock));
    }

    // -- ensure_returnable ---------------------------------------------------

    #[test]
    fn check_in_allowed_when_a_copy_is_out() {
        assert!(ensure_returnable(2, 3).is_ok());
        assert!(ensure_returnable(0, 1).is_ok());
    }

    #[test]
    fn check_in_rejected_when_fully_stocked() {
        assert_matches!(ensure_returnable(3, 3), Err(CoreError::FullyStocked));
        assert_matches!(ensure_returnable(0, 0), Err(CoreError::FullyStocked));
    }

    // -- single_open_rental --------------------------------------------------

    #[test]
    fn single_match_is_returned() {
        assert_eq!(single_open_rental(vec![42]).unwrap(), 42);
    }

    #[test]
    fn no_match_is_invalid_request() {
        assert_matches!(
            single_open_rental(Vec::<i64>::new()),
            Err(CoreError::InvalidRequest(_))
        );
    }

    #[test]
    fn ambiguous_match_is_invalid_request() {
        let err = single_open_rental(vec![1, 2]).unwrap_err();
        assert_matches!(err, CoreError::InvalidRequest(ref msg) if msg.contains("found 2"));
    }

    // -- inventory -----------------------------------------------------------

    #[test]
    fn bounds_are_inclusive() {
        assert!(inventory_within_bounds(0, 3));
        assert!(inventory_within_bounds(3, 3));
        assert!(!inventory_within_bounds(4, 3));
        assert!(!inventory_within_bounds(-1, 3));
    }

    #[test]
    fn round_trip_restores_inventory() {
        let (total, mut available) = (3, 3);
        ensure_in_stock(available).unwrap();
        available -= 1;
        assert!(inventory_within_bounds(available, total));
        ensure_returnable(available, total).unwrap();
        available += 1;
        assert_eq!(available, 3);
    }

    #[test]
    fn growing_total_adds_available_copies() {
        assert_eq!(rebalance_available(3, 1, 5).unwrap(), 3);
    }

    #[test]
    fn shrinking_total_keeps_rented_copies_out() {
        assert_eq!(rebalance_available(5, 3, 2).unwrap(), 0);
    }

    #[test]
    fn shrinking_below_rented_copies_is_rejected() {
        assert_matches!(
            rebalance_available(5, 3, 1),
            Err(CoreError::Validation(_))
        );
    }
}
