use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored entity with a server-assigned id and create time.
///
/// `Draft` is the client payload for creation, `Patch` the payload for partial
/// updates. Both are validated before they reach a backend.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Singular name used in errors and logs.
    const NAME: &'static str;

    type Draft: DeserializeOwned + Validate + Send + 'static;
    type Patch: DeserializeOwned + Validate + Send + 'static;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn apply(&mut self, patch: Self::Patch);
}

/// Overwrites `field` if the patch carries a value.
pub fn merge<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Deserializes a present field (including `null`) as `Some`, so that for an
/// optional column `Option<Option<T>>` distinguishes "absent" from "clear".
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
