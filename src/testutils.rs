use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use uuid::Uuid;

use crate::{
    backend::{RentalBackend, Repository},
    error::BackendError,
    local_backend::LocalBackend,
    record::Record,
    types::Booking,
};

pub struct MockRentalBackendInner {
    pub success: AtomicBool,
    /// Booking inserts that still have to fail with `RaceLost`.
    pub race_losses: AtomicU64,
    pub calls_to_all: AtomicU64,
    pub calls_to_find: AtomicU64,
    pub calls_to_insert: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub calls_to_remove: AtomicU64,
    pub records: LocalBackend,
}

#[derive(Clone)]
pub struct MockRentalBackend(pub Arc<MockRentalBackendInner>);

impl MockRentalBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            race_losses: AtomicU64::default(),
            calls_to_all: AtomicU64::default(),
            calls_to_find: AtomicU64::default(),
            calls_to_insert: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            calls_to_remove: AtomicU64::default(),
            records: LocalBackend::default(),
        }
    }
}

impl MockRentalBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockRentalBackendInner::new()))
    }

    fn result(&self) -> Result<(), BackendError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(BackendError::Database("Supposed to fail".into())),
        }
    }

    fn lose_race<R: Record>(&self) -> Result<(), BackendError> {
        if R::NAME != Booking::NAME {
            return Ok(());
        }
        let remaining = self
            .0
            .race_losses
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match remaining {
            Ok(_) => Err(BackendError::RaceLost),
            Err(_) => Ok(()),
        }
    }
}

impl<R> Repository<R> for MockRentalBackend
where
    R: Record,
    LocalBackend: Repository<R>,
{
    fn all(&self) -> Result<Vec<R>, BackendError> {
        self.0.calls_to_all.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Repository::<R>::all(&self.0.records)
    }

    fn find(&self, id: Uuid) -> Result<R, BackendError> {
        self.0.calls_to_find.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Repository::<R>::find(&self.0.records, id)
    }

    fn insert(&self, record: R) -> Result<R, BackendError> {
        self.0.calls_to_insert.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.lose_race::<R>()?;
        Repository::<R>::insert(&self.0.records, record)
    }

    fn save(&self, record: R) -> Result<R, BackendError> {
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.lose_race::<R>()?;
        Repository::<R>::save(&self.0.records, record)
    }

    fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        self.0.calls_to_remove.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Repository::<R>::remove(&self.0.records, id)
    }
}

impl RentalBackend for MockRentalBackend {}
