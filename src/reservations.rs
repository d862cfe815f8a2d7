//! Check-then-reserve for bookings.
//!
//! Reading the current bookings of a unit and writing the new one happen
//! while holding that unit's lock, so two requests in this process can never
//! both pass the overlap check for the same dates. Across processes the
//! storage layer rejects the losing write with `BackendError::RaceLost`,
//! which is retried once against a fresh snapshot.

use crate::{
    backend::{RentalBackend, Repository},
    error::{BackendError, ReservationError},
    overlap::{check_availability, DateRange, Decision},
    record::Record,
    types::{Booking, BookingDraft, BookingPatch, Unit},
};
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, Weak},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One mutex per unit id, created on first use. Only weak references are
/// kept, so a unit's mutex goes away once no reservation holds it.
#[derive(Debug, Clone, Default)]
pub struct UnitLocks(Arc<Mutex<HashMap<Uuid, Weak<Mutex<()>>>>>);

impl UnitLocks {
    fn unit(&self, unit_id: Uuid) -> Arc<Mutex<()>> {
        // Neither the map nor the unit mutexes can be left half-updated, so a
        // poisoned lock is still usable.
        let mut locks = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(&unit_id).and_then(Weak::upgrade) {
            return lock;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(Mutex::new(()));
        locks.insert(unit_id, Arc::downgrade(&lock));
        lock
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reservations {
    locks: UnitLocks,
}

impl Reservations {
    /// Decides whether `range` is free on `unit_id` without booking it.
    pub fn availability<T: RentalBackend>(
        &self,
        backend: &T,
        unit_id: Uuid,
        range: &DateRange,
    ) -> Result<Decision, BackendError> {
        Repository::<Unit>::find(backend, unit_id)?;
        let bookings = backend.bookings_for_unit(unit_id)?;
        let intervals: Vec<_> = bookings.iter().filter_map(Booking::interval).collect();
        let decision = check_availability(unit_id, range, &intervals);
        debug!(%unit_id, available = decision.is_available(), "Availability checked");
        Ok(decision)
    }

    /// Creates a booking if its dates are free on the unit.
    pub fn reserve<T: RentalBackend>(
        &self,
        backend: &T,
        draft: BookingDraft,
    ) -> Result<Booking, ReservationError> {
        let range = DateRange::new(draft.start_date, draft.end_date)?;
        Repository::<Unit>::find(backend, draft.unit_id)?;
        let booking = Booking::from_draft(Uuid::new_v4(), Utc::now(), draft);

        self.commit(backend, booking, &range, <T as Repository<Booking>>::insert)
    }

    /// Applies `patch` to a stored booking, re-checking the dates against
    /// every other booking of the (possibly new) unit.
    pub fn reschedule<T: RentalBackend>(
        &self,
        backend: &T,
        id: Uuid,
        patch: BookingPatch,
    ) -> Result<Booking, ReservationError> {
        let mut booking = Repository::<Booking>::find(backend, id)?;
        booking.apply(patch);
        let range = DateRange::new(booking.start_date, booking.end_date)?;
        Repository::<Unit>::find(backend, booking.unit_id)?;

        self.commit(backend, booking, &range, <T as Repository<Booking>>::save)
    }

    fn commit<T, F>(
        &self,
        backend: &T,
        booking: Booking,
        range: &DateRange,
        write: F,
    ) -> Result<Booking, ReservationError>
    where
        T: RentalBackend,
        F: Fn(&T, Booking) -> Result<Booking, BackendError>,
    {
        let unit_lock = self.locks.unit(booking.unit_id);
        let _guard = unit_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut retried = false;
        loop {
            let others: Vec<_> = backend
                .bookings_for_unit(booking.unit_id)?
                .iter()
                .filter(|existing| existing.id != booking.id)
                .filter_map(Booking::interval)
                .collect();

            if let Decision::Conflict {
                conflicting_booking_ids,
            } = check_availability(booking.unit_id, range, &others)
            {
                info!(
                    unit_id = %booking.unit_id,
                    start = %range.start(),
                    end = %range.end(),
                    ?conflicting_booking_ids,
                    "Unit unavailable for requested dates"
                );
                return Err(ReservationError::Conflict {
                    conflicting_booking_ids,
                });
            }

            match write(backend, booking.clone()) {
                Ok(booking) => {
                    info!(booking_id = %booking.id, unit_id = %booking.unit_id, "Booking confirmed");
                    return Ok(booking);
                }
                Err(BackendError::RaceLost) if !retried => {
                    warn!(unit_id = %booking.unit_id, "Lost booking race, checking again");
                    retried = true;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
