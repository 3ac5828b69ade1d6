//! Booking identifier generation: `APT-{year}-{NNNN}`.
//!
//! The happy path derives the suffix from the stored count for the current
//! year. Uniqueness is enforced at insert time; on a collision the caller
//! retries with [`retry_booking_id`], bounded by [`MAX_ID_ATTEMPTS`].

use chrono::{Datelike, Utc};
use rand::Rng;

pub const MAX_ID_ATTEMPTS: u32 = 5;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Prefix shared by every booking id of a given year, used to count the
/// year's existing records.
pub fn booking_id_prefix(year: i32) -> String {
    format!("APT-{}-", year)
}

pub fn format_booking_id(year: i32, number: i64) -> String {
    format!("APT-{}-{:04}", year, number)
}

/// Next sequential id for the year: count + 1, zero-padded to four digits
/// and widening naturally past 9999.
pub fn next_booking_id(year: i32, count_for_year: usize) -> String {
    format_booking_id(year, count_for_year as i64 + 1)
}

/// Best-effort id when the count query fails: unix timestamp reduced modulo
/// 10000. Still subject to the insert-retry loop.
pub fn fallback_booking_id(year: i32) -> String {
    let timestamp = Utc::now().timestamp();
    format_booking_id(year, timestamp % 10000)
}

/// Fresh random suffix after an insert-time collision.
pub fn retry_booking_id(year: i32) -> String {
    let number = rand::thread_rng().gen_range(0..10000);
    format_booking_id(year, number)
}
