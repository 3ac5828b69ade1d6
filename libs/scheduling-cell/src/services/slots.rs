//! Interval and slot arithmetic. Pure functions over times-of-day; no I/O.
//!
//! Intervals are half-open `[start, end)`: an appointment ending at 10:30
//! does not conflict with one starting at 10:30.

use chrono::{Duration, NaiveTime};

pub const SLOT_MINUTES: i64 = 30;
pub const MIN_DURATION_MINUTES: i64 = 15;

pub fn business_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

pub fn business_end() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn within_business_hours(start: NaiveTime, end: NaiveTime) -> bool {
    start >= business_start() && end <= business_end() && start < end
}

pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

pub fn meets_minimum_duration(start: NaiveTime, end: NaiveTime) -> bool {
    duration_minutes(start, end) >= MIN_DURATION_MINUTES
}

/// Enumerate every slot-aligned interval within business hours that does not
/// overlap any booked interval, in ascending start order. A candidate whose
/// end would pass the business close is dropped; one ending exactly at close
/// is kept.
pub fn enumerate_free_slots(booked: &[(NaiveTime, NaiveTime)]) -> Vec<FreeSlot> {
    let mut free = Vec::new();
    let mut cursor = business_start();

    loop {
        let slot_end = cursor + Duration::minutes(SLOT_MINUTES);
        if slot_end > business_end() || slot_end <= cursor {
            break;
        }

        let taken = booked
            .iter()
            .any(|&(b_start, b_end)| overlaps(cursor, slot_end, b_start, b_end));
        if !taken {
            free.push(FreeSlot {
                start: cursor,
                end: slot_end,
            });
        }

        cursor = slot_end;
    }

    free
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (t(10, 0), t(10, 30), t(10, 15), t(10, 45)),
            (t(9, 0), t(17, 0), t(12, 0), t(12, 30)),
            (t(10, 0), t(10, 30), t(11, 0), t(11, 30)),
            (t(10, 0), t(10, 30), t(10, 30), t(11, 0)),
        ];
        for (a_start, a_end, b_start, b_end) in cases {
            assert_eq!(
                overlaps(a_start, a_end, b_start, b_end),
                overlaps(b_start, b_end, a_start, a_end),
            );
        }
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!overlaps(t(10, 0), t(10, 30), t(10, 30), t(11, 0)));
        assert!(!overlaps(t(10, 30), t(11, 0), t(10, 0), t(10, 30)));
    }

    #[test]
    fn containment_and_partial_overlap_detected() {
        // contained
        assert!(overlaps(t(10, 0), t(11, 0), t(10, 15), t(10, 45)));
        // partial
        assert!(overlaps(t(10, 0), t(10, 30), t(10, 15), t(10, 45)));
    }

    #[test]
    fn business_hours_bounds() {
        assert!(within_business_hours(t(9, 0), t(9, 30)));
        assert!(within_business_hours(t(17, 30), t(18, 0)));
        assert!(!within_business_hours(t(8, 30), t(9, 30)));
        assert!(!within_business_hours(t(18, 0), t(18, 30)));
        assert!(!within_business_hours(t(10, 0), t(10, 0)));
        assert!(!within_business_hours(t(11, 0), t(10, 0)));
    }

    #[test]
    fn minimum_duration_is_fifteen_minutes() {
        assert!(!meets_minimum_duration(t(9, 0), t(9, 10)));
        assert!(meets_minimum_duration(t(9, 0), t(9, 15)));
        assert_eq!(duration_minutes(t(9, 0), t(9, 45)), 45);
    }

    #[test]
    fn empty_calendar_yields_eighteen_slots() {
        let slots = enumerate_free_slots(&[]);
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].start, t(9, 0));
        assert_eq!(slots[17].start, t(17, 30));
        assert_eq!(slots[17].end, t(18, 0));
        // ascending order
        assert!(slots.windows(2).all(|pair| pair[0].start < pair[1].start));
    }

    #[test]
    fn booking_removes_exactly_the_covered_slot() {
        let slots = enumerate_free_slots(&[(t(10, 0), t(10, 30))]);
        assert_eq!(slots.len(), 17);
        assert!(!slots.iter().any(|slot| slot.start == t(10, 0)));
        assert!(slots.iter().any(|slot| slot.start == t(9, 30)));
        assert!(slots.iter().any(|slot| slot.start == t(10, 30)));
    }

    #[test]
    fn unaligned_booking_removes_both_touched_slots() {
        let slots = enumerate_free_slots(&[(t(10, 15), t(10, 45))]);
        assert!(!slots.iter().any(|slot| slot.start == t(10, 0)));
        assert!(!slots.iter().any(|slot| slot.start == t(10, 30)));
        assert_eq!(slots.len(), 16);
    }
}
