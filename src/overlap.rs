//! Booking overlap detection.
//!
//! Bookings occupy half-open ranges `[start, end)`: the checkout instant of one
//! stay may equal the checkin instant of the next without a conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid date range: start {start} must be before end {end}")]
pub struct InvalidRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A non-empty half-open date range. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidRange> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidRange { start, end })
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One confirmed reservation as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingInterval {
    pub unit_id: Uuid,
    pub booking_id: Uuid,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum Decision {
    Available,
    #[serde(rename_all = "camelCase")]
    Conflict { conflicting_booking_ids: Vec<Uuid> },
}

impl Decision {
    pub fn is_available(&self) -> bool {
        matches!(self, Decision::Available)
    }
}

/// Decides whether `candidate` may be booked on `unit_id`.
///
/// `existing` may contain intervals of other units; those are skipped, so
/// callers can pass either a per-unit or an unfiltered snapshot. Every
/// overlapping interval is reported, in the order `existing` yields them.
pub fn check_availability<'a, I>(unit_id: Uuid, candidate: &DateRange, existing: I) -> Decision
where
    I: IntoIterator<Item = &'a BookingInterval>,
{
    let conflicting_booking_ids: Vec<Uuid> = existing
        .into_iter()
        .filter(|interval| interval.unit_id == unit_id)
        .filter(|interval| interval.range.overlaps(candidate))
        .map(|interval| interval.booking_id)
        .collect();

    if conflicting_booking_ids.is_empty() {
        Decision::Available
    } else {
        Decision::Conflict {
            conflicting_booking_ids,
        }
    }
}
