use crate::domain::model::Property;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read/write access to the property records this service derives
/// availability from. The store owns the records; this service only ever
/// touches the room counts.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>>;

    /// Writes new room counts and returns the updated record. Fails with
    /// `NotFound` if the id does not exist.
    async fn update_room_counts(
        &self,
        id: &str,
        available_rooms: u32,
        total_rooms: u32,
    ) -> Result<Property>;

    /// Every property, for platform-wide aggregation.
    async fn all(&self) -> Result<Vec<Property>>;
}

/// Key-value cache with per-entry time-to-live.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn put(&self, key: &str, value: serde_json::Value, ttl: Duration) -> Result<()>;

    /// Removes an entry. Removing a key that is not cached is not an error.
    async fn forget(&self, key: &str) -> Result<()>;
}
