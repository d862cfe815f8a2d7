use crate::error::BackendError;
use crate::record::Record;
use crate::types::{
    Address, Booking, FinancialTransaction, MaintenanceTicket, Message, OccupancyStatus, Property,
    Report, Review, Unit, User,
};
use serde::Deserialize;
use uuid::Uuid;

/// Plain storage for one kind of record.
pub trait Repository<R: Record> {
    /// All records, oldest first.
    fn all(&self) -> Result<Vec<R>, BackendError>;
    fn find(&self, id: Uuid) -> Result<R, BackendError>;
    fn insert(&self, record: R) -> Result<R, BackendError>;
    /// Replaces the stored record with the same id.
    fn save(&self, record: R) -> Result<R, BackendError>;
    fn remove(&self, id: Uuid) -> Result<(), BackendError>;
}

/// Filters for `RentalBackend::search_units`. Unset filters match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    pub occupancy: Option<OccupancyStatus>,
}

/// Everything the HTTP layer needs from storage.
///
/// The lookup methods have default implementations that scan `all()`;
/// backends with an index override them.
pub trait RentalBackend:
    Clone
    + Send
    + Sync
    + 'static
    + Repository<Address>
    + Repository<User>
    + Repository<Property>
    + Repository<Unit>
    + Repository<Booking>
    + Repository<Review>
    + Repository<FinancialTransaction>
    + Repository<MaintenanceTicket>
    + Repository<Message>
    + Repository<Report>
{
    /// Confirmed bookings of one unit.
    fn bookings_for_unit(&self, unit_id: Uuid) -> Result<Vec<Booking>, BackendError> {
        scan(self, |booking: &Booking| booking.unit_id == unit_id)
    }

    fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BackendError> {
        scan(self, |booking: &Booking| booking.user_id == user_id)
    }

    fn properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, BackendError> {
        scan(self, |property: &Property| property.owner_id == owner_id)
    }

    fn properties_by_type(&self, property_type: &str) -> Result<Vec<Property>, BackendError> {
        scan(self, |property: &Property| property.property_type == property_type)
    }

    fn units_by_property(&self, property_id: Uuid) -> Result<Vec<Unit>, BackendError> {
        scan(self, |unit: &Unit| unit.property_id == property_id)
    }

    fn search_units(&self, filter: &UnitFilter) -> Result<Vec<Unit>, BackendError> {
        let matching_addresses: Option<Vec<Uuid>> = match &filter.address {
            Some(query) => Some(
                scan(self, |address: &Address| address.matches(query))?
                    .iter()
                    .map(|address| address.id)
                    .collect(),
            ),
            None => None,
        };

        scan(self, |unit: &Unit| {
            let name_matches = filter
                .name
                .as_deref()
                .map_or(true, |name| unit.name_contains(name));
            let occupancy_matches = filter
                .occupancy
                .map_or(true, |occupancy| unit.occupancy_status == occupancy);
            let address_matches = matching_addresses.as_ref().map_or(true, |ids| {
                unit.address_id
                    .is_some_and(|address_id| ids.contains(&address_id))
            });
            name_matches && occupancy_matches && address_matches
        })
    }

    fn reviews_for_unit(&self, unit_id: Uuid) -> Result<Vec<Review>, BackendError> {
        scan(self, |review: &Review| review.unit_id == unit_id)
    }

    /// Messages of one chat, oldest first.
    fn messages_in_chat(&self, chat_id: Uuid) -> Result<Vec<Message>, BackendError> {
        scan(self, |message: &Message| message.chat_id == chat_id)
    }
}

fn scan<B, R, F>(backend: &B, predicate: F) -> Result<Vec<R>, BackendError>
where
    B: Repository<R> + ?Sized,
    R: Record,
    F: Fn(&R) -> bool,
{
    Ok(backend
        .all()?
        .into_iter()
        .filter(|record| predicate(record))
        .collect())
}
