use crate::overlap::{BookingInterval, DateRange};
use crate::record::{merge, nullable, Record};
use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, io::Write, str::FromStr};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PHONE_NUMBER: Regex = Regex::new(r"^\+?[0-9][0-9 ()-]{4,18}[0-9]$").unwrap();
    static ref SLUG: Regex = Regex::new(r"^[a-z][a-z0-9_-]{0,31}$").unwrap();
}

/// Declares a closed set of values stored as `TEXT` and sent as plain strings.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!("Unknown {} '{other}'", stringify!($name))),
                }
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
                Ok(std::str::from_utf8(bytes.as_bytes())?.parse()?)
            }
        }
    };
}

text_enum!(UserRole {
    Tenant => "tenant",
    Owner => "owner",
    Maintenance => "maintenance",
    Admin => "admin",
});

text_enum!(OccupancyStatus {
    Available => "available",
    Occupied => "occupied",
});

text_enum!(UrgencyLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

text_enum!(TicketStatus {
    Open => "open",
    InProgress => "in_progress",
    Closed => "closed",
});

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::addresses, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: String,
    pub postal_code: String,
    pub additional_number: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    #[validate(length(min = 1, max = 64))]
    pub country: String,
    #[validate(length(min = 1, max = 64))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub state: String,
    #[validate(length(min = 1, max = 128))]
    pub street: String,
    #[validate(length(min = 1, max = 16))]
    pub postal_code: String,
    #[validate(length(max = 16))]
    pub additional_number: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    #[validate(length(min = 1, max = 64))]
    pub country: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub city: Option<String>,
    #[validate(length(max = 64))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub street: Option<String>,
    #[validate(length(min = 1, max = 16))]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 16))]
    pub additional_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<Option<f64>>,
}

impl Address {
    /// Case-insensitive substring match on the human readable parts.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.street, &self.city, &self.state, &self.country]
            .iter()
            .any(|part| part.to_lowercase().contains(&query))
    }
}

impl Record for Address {
    const NAME: &'static str = "address";
    type Draft = AddressDraft;
    type Patch = AddressPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: AddressDraft) -> Self {
        Self {
            id,
            country: draft.country,
            city: draft.city,
            state: draft.state,
            street: draft.street,
            postal_code: draft.postal_code,
            additional_number: draft.additional_number,
            latitude: draft.latitude,
            longitude: draft.longitude,
            created_at,
        }
    }

    fn apply(&mut self, patch: AddressPatch) {
        merge(&mut self.country, patch.country);
        merge(&mut self.city, patch.city);
        merge(&mut self.state, patch.state);
        merge(&mut self.street, patch.street);
        merge(&mut self.postal_code, patch.postal_code);
        merge(&mut self.additional_number, patch.additional_number);
        merge(&mut self.latitude, patch.latitude);
        merge(&mut self.longitude, patch.longitude);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub address_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub address_id: Option<Uuid>,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_NUMBER))]
    pub phone_number: Option<String>,
    pub user_role: UserRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub address_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(regex(path = *PHONE_NUMBER))]
    pub phone_number: Option<Option<String>>,
    pub user_role: Option<UserRole>,
}

impl Record for User {
    const NAME: &'static str = "user";
    type Draft = UserDraft;
    type Patch = UserPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: UserDraft) -> Self {
        Self {
            id,
            address_id: draft.address_id,
            name: draft.name,
            email: draft.email,
            phone_number: draft.phone_number,
            user_role: draft.user_role,
            created_at,
        }
    }

    fn apply(&mut self, patch: UserPatch) {
        merge(&mut self.address_id, patch.address_id);
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone_number, patch.phone_number);
        merge(&mut self.user_role, patch.user_role);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::properties, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub address_id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    pub rules: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub owner_id: Uuid,
    pub address_id: Option<Uuid>,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(regex(path = *SLUG))]
    pub property_type: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub rules: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    pub owner_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub address_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(regex(path = *SLUG))]
    pub property_type: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub rules: Option<String>,
}

impl Record for Property {
    const NAME: &'static str = "property";
    type Draft = PropertyDraft;
    type Patch = PropertyPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: PropertyDraft) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            address_id: draft.address_id,
            name: draft.name,
            property_type: draft.property_type,
            description: draft.description,
            rules: draft.rules,
            created_at,
        }
    }

    fn apply(&mut self, patch: PropertyPatch) {
        merge(&mut self.owner_id, patch.owner_id);
        merge(&mut self.address_id, patch.address_id);
        merge(&mut self.name, patch.name);
        merge(&mut self.property_type, patch.property_type);
        merge(&mut self.description, patch.description);
        merge(&mut self.rules, patch.rules);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::units, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub property_id: Uuid,
    pub address_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rental_price: i32,
    pub occupancy_status: OccupancyStatus,
    pub structural_properties: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnitDraft {
    pub property_id: Uuid,
    pub address_id: Option<Uuid>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub rental_price: i32,
    pub occupancy_status: OccupancyStatus,
    #[validate(length(min = 1))]
    pub structural_properties: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnitPatch {
    pub property_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub address_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(min = 1, max = 128))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub rental_price: Option<i32>,
    pub occupancy_status: Option<OccupancyStatus>,
    #[validate(length(min = 1))]
    pub structural_properties: Option<String>,
}

impl Unit {
    pub fn name_contains(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&query))
    }
}

impl Record for Unit {
    const NAME: &'static str = "unit";
    type Draft = UnitDraft;
    type Patch = UnitPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: UnitDraft) -> Self {
        Self {
            id,
            property_id: draft.property_id,
            address_id: draft.address_id,
            name: draft.name,
            description: draft.description,
            rental_price: draft.rental_price,
            occupancy_status: draft.occupancy_status,
            structural_properties: draft.structural_properties,
            created_at,
        }
    }

    fn apply(&mut self, patch: UnitPatch) {
        merge(&mut self.property_id, patch.property_id);
        merge(&mut self.address_id, patch.address_id);
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
        merge(&mut self.rental_price, patch.rental_price);
        merge(&mut self.occupancy_status, patch.occupancy_status);
        merge(&mut self.structural_properties, patch.structural_properties);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::bookings, check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub unit_id: Uuid,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    pub unit_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub summary: Option<String>,
}

impl Booking {
    /// The stored range as an interval. `None` for a malformed row, which
    /// cannot overlap anything.
    pub fn interval(&self) -> Option<BookingInterval> {
        DateRange::new(self.start_date, self.end_date)
            .ok()
            .map(|range| BookingInterval {
                unit_id: self.unit_id,
                booking_id: self.id,
                range,
            })
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_date <= now
    }
}

impl Record for Booking {
    const NAME: &'static str = "booking";
    type Draft = BookingDraft;
    type Patch = BookingPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: BookingDraft) -> Self {
        Self {
            id,
            unit_id: draft.unit_id,
            user_id: draft.user_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            summary: draft.summary,
            created_at,
        }
    }

    fn apply(&mut self, patch: BookingPatch) {
        merge(&mut self.unit_id, patch.unit_id);
        merge(&mut self.user_id, patch.user_id);
        merge(&mut self.start_date, patch.start_date);
        merge(&mut self.end_date, patch.end_date);
        merge(&mut self.summary, patch.summary);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::reviews, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub unit_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub user_id: Uuid,
    pub unit_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000))]
    pub comment: Option<Option<String>>,
}

impl Record for Review {
    const NAME: &'static str = "review";
    type Draft = ReviewDraft;
    type Patch = ReviewPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: ReviewDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            unit_id: draft.unit_id,
            rating: draft.rating,
            comment: draft.comment,
            created_at,
        }
    }

    fn apply(&mut self, patch: ReviewPatch) {
        merge(&mut self.rating, patch.rating);
        merge(&mut self.comment, patch.comment);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::financial_transactions, check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub unit_id: Uuid,
    pub payment_method: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransactionDraft {
    pub user_id: Uuid,
    pub unit_id: Uuid,
    #[validate(regex(path = *SLUG))]
    pub payment_method: String,
    #[validate(range(min = 1))]
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransactionPatch {
    #[validate(regex(path = *SLUG))]
    pub payment_method: Option<String>,
    #[validate(range(min = 1))]
    pub amount: Option<i64>,
}

impl Record for FinancialTransaction {
    const NAME: &'static str = "transaction";
    type Draft = FinancialTransactionDraft;
    type Patch = FinancialTransactionPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: FinancialTransactionDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            unit_id: draft.unit_id,
            payment_method: draft.payment_method,
            amount: draft.amount,
            created_at,
        }
    }

    fn apply(&mut self, patch: FinancialTransactionPatch) {
        merge(&mut self.payment_method, patch.payment_method);
        merge(&mut self.amount, patch.amount);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::maintenance_tickets, check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub id: Uuid,
    pub presenter_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub description: String,
    pub urgency_level: UrgencyLevel,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicketDraft {
    pub presenter_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    #[validate(length(min = 1))]
    pub description: String,
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicketPatch {
    pub presenter_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub urgency_level: Option<UrgencyLevel>,
    pub status: Option<TicketStatus>,
}

impl Record for MaintenanceTicket {
    const NAME: &'static str = "maintenance ticket";
    type Draft = MaintenanceTicketDraft;
    type Patch = MaintenanceTicketPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: MaintenanceTicketDraft) -> Self {
        Self {
            id,
            presenter_id: draft.presenter_id,
            tenant_id: draft.tenant_id,
            property_id: draft.property_id,
            description: draft.description,
            urgency_level: draft.urgency_level,
            status: draft.status,
            created_at,
        }
    }

    fn apply(&mut self, patch: MaintenanceTicketPatch) {
        merge(&mut self.presenter_id, patch.presenter_id);
        merge(&mut self.description, patch.description);
        merge(&mut self.urgency_level, patch.urgency_level);
        merge(&mut self.status, patch.status);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::messages, check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatch {
    #[validate(length(min = 1, max = 4000))]
    pub content: Option<String>,
}

impl Record for Message {
    const NAME: &'static str = "message";
    type Draft = MessageDraft;
    type Patch = MessagePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: MessageDraft) -> Self {
        Self {
            id,
            chat_id: draft.chat_id,
            sender_id: draft.sender_id,
            receiver_id: draft.receiver_id,
            content: draft.content,
            created_at,
        }
    }

    fn apply(&mut self, patch: MessagePatch) {
        merge(&mut self.content, patch.content);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::reports, check_for_backend(Pg), treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    #[validate(regex(path = *SLUG))]
    pub report_type: Option<String>,
    #[validate(length(min = 1))]
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    #[validate(regex(path = *SLUG))]
    pub report_type: Option<Option<String>>,
    #[validate(length(min = 1))]
    pub data: Option<String>,
}

impl Record for Report {
    const NAME: &'static str = "report";
    type Draft = ReportDraft;
    type Patch = ReportPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: ReportDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            report_type: draft.report_type,
            data: draft.data,
            created_at,
        }
    }

    fn apply(&mut self, patch: ReportPatch) {
        merge(&mut self.report_type, patch.report_type);
        merge(&mut self.data, patch.data);
    }
}
