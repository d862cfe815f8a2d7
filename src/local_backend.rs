use crate::{
    backend::{RentalBackend, Repository},
    error::BackendError,
    record::Record,
    types::{
        Address, Booking, FinancialTransaction, MaintenanceTicket, Message, Property, Report,
        Review, Unit, User,
    },
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::error;
use uuid::Uuid;

/// One in-memory table.
#[derive(Debug)]
pub struct Table<R>(Arc<Mutex<HashMap<Uuid, R>>>);

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self(Arc::default())
    }
}

impl<R: Record> Table<R> {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, R>>, BackendError> {
        self.0.lock().map_err(|err| {
            error!(%err, "{} table lock poisoned", R::NAME);
            BackendError::Unavailable(format!("{} table lock poisoned", R::NAME))
        })
    }

    fn not_found(id: Uuid) -> BackendError {
        BackendError::NotFound { kind: R::NAME, id }
    }
}

/// Non-persistent backend used when no database is configured.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    addresses: Table<Address>,
    users: Table<User>,
    properties: Table<Property>,
    units: Table<Unit>,
    bookings: Table<Booking>,
    reviews: Table<Review>,
    transactions: Table<FinancialTransaction>,
    tickets: Table<MaintenanceTicket>,
    messages: Table<Message>,
    reports: Table<Report>,
}

pub trait Stores<R> {
    fn table(&self) -> &Table<R>;
}

macro_rules! stores {
    ($($record:ty => $field:ident),+ $(,)?) => {
        $(impl Stores<$record> for LocalBackend {
            fn table(&self) -> &Table<$record> {
                &self.$field
            }
        })+
    };
}

stores!(
    Address => addresses,
    User => users,
    Property => properties,
    Unit => units,
    Booking => bookings,
    Review => reviews,
    FinancialTransaction => transactions,
    MaintenanceTicket => tickets,
    Message => messages,
    Report => reports,
);

impl<R> Repository<R> for LocalBackend
where
    R: Record,
    LocalBackend: Stores<R>,
{
    fn all(&self) -> Result<Vec<R>, BackendError> {
        let mut records: Vec<R> = Stores::<R>::table(self).lock()?.values().cloned().collect();
        records.sort_by_key(|record| record.created_at());
        Ok(records)
    }

    fn find(&self, id: Uuid) -> Result<R, BackendError> {
        Stores::<R>::table(self)
            .lock()?
            .get(&id)
            .cloned()
            .ok_or_else(|| Table::<R>::not_found(id))
    }

    fn insert(&self, record: R) -> Result<R, BackendError> {
        Stores::<R>::table(self).lock()?.insert(record.id(), record.clone());
        Ok(record)
    }

    fn save(&self, record: R) -> Result<R, BackendError> {
        match Stores::<R>::table(self).lock()?.get_mut(&record.id()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(record)
            }
            None => Err(Table::<R>::not_found(record.id())),
        }
    }

    fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        match Stores::<R>::table(self).lock()?.remove(&id) {
            Some(_) => Ok(()),
            None => {
                let err = Table::<R>::not_found(id);
                error!(%err, "Removal failed");
                Err(err)
            }
        }
    }
}

impl RentalBackend for LocalBackend {}
