use crate::core::cache_key;
use crate::domain::model::{
    AvailabilitySnapshot, AvailabilityStats, AvailabilityStatus, AvailabilityUpdate, Property,
};
use crate::domain::ports::{CacheStore, PropertyStore};
use crate::utils::error::{AvailabilityError, Result};
use crate::utils::validation;
use chrono::Utc;
use std::time::Duration;

/// Upper bound on the number of ids a single batch lookup may carry.
pub const MAX_BATCH_SIZE: usize = 50;

const MAX_ROOMS: i64 = u32::MAX as i64;

/// Cache lifetimes for the three kinds of entries this service writes.
/// A manually confirmed value is trusted longer than a derived one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub read: Duration,
    pub manual_update: Duration,
    pub stats: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(300),
            manual_update: Duration::from_secs(1800),
            stats: Duration::from_secs(600),
        }
    }
}

pub struct AvailabilityService<S: PropertyStore, C: CacheStore> {
    store: S,
    cache: C,
    ttl: TtlPolicy,
}

impl<S: PropertyStore, C: CacheStore> AvailabilityService<S, C> {
    pub fn new(store: S, cache: C) -> Self {
        Self {
            store,
            cache,
            ttl: TtlPolicy::default(),
        }
    }

    pub fn with_ttl_policy(store: S, cache: C, ttl: TtlPolicy) -> Self {
        Self { store, cache, ttl }
    }

    /// Returns the availability snapshot for one property, served from
    /// cache when a fresh entry exists and recomputed from the store
    /// otherwise.
    pub async fn get_availability(&self, property_id: &str) -> Result<AvailabilitySnapshot> {
        let key = cache_key::property(property_id);
        if let Some(snapshot) = self.cache_lookup(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(snapshot);
        }

        let property = self
            .store
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AvailabilityError::NotFound(property_id.to_string()))?;

        let snapshot = AvailabilitySnapshot::from_property(&property);
        tracing::debug!(
            "Computed availability for {}: {} of {} rooms, status {}",
            property_id,
            snapshot.available_rooms,
            snapshot.total_rooms,
            snapshot.status
        );
        self.cache_store(&key, &snapshot, self.ttl.read).await;
        Ok(snapshot)
    }

    /// Resolves up to [`MAX_BATCH_SIZE`] properties in input order. Ids
    /// that reference no property are omitted from the result; one bad id
    /// must not abort the rest of the batch.
    pub async fn get_multiple_availability(
        &self,
        property_ids: &[String],
    ) -> Result<Vec<AvailabilitySnapshot>> {
        if property_ids.is_empty() {
            return Err(AvailabilityError::ValidationError {
                field: "propertyIds".to_string(),
                reason: "at least one property id is required".to_string(),
            });
        }
        if property_ids.len() > MAX_BATCH_SIZE {
            return Err(AvailabilityError::ValidationError {
                field: "propertyIds".to_string(),
                reason: format!("at most {} property ids per request", MAX_BATCH_SIZE),
            });
        }
        for property_id in property_ids {
            validation::validate_non_empty_string("propertyIds", property_id)?;
        }

        let mut snapshots = Vec::with_capacity(property_ids.len());
        for property_id in property_ids {
            match self.get_availability(property_id).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(AvailabilityError::NotFound(_)) => {
                    tracing::debug!("Skipping unknown property {} in batch lookup", property_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(snapshots)
    }

    /// Writes new room counts through to the store and refreshes the cache
    /// entry with the longer manual-update lifetime.
    ///
    /// `lastUpdated` on the returned snapshot is the update instant, not
    /// the store's timestamp.
    pub async fn update_availability(
        &self,
        property_id: &str,
        update: AvailabilityUpdate,
    ) -> Result<AvailabilitySnapshot> {
        validate_room_counts(update.available_rooms, update.total_rooms)?;
        let available_rooms = update.available_rooms as u32;
        let total_rooms = update.total_rooms as u32;

        let property = self
            .store
            .update_room_counts(property_id, available_rooms, total_rooms)
            .await?;

        let status = update
            .status
            .unwrap_or_else(|| AvailabilityStatus::derive(available_rooms, total_rooms));
        let snapshot = AvailabilitySnapshot {
            property_id: property.id,
            available_rooms,
            total_rooms,
            status,
            last_updated: Utc::now(),
        };
        tracing::info!(
            "Updated availability for {}: {} of {} rooms, status {}",
            property_id,
            available_rooms,
            total_rooms,
            status
        );

        let key = cache_key::property(property_id);
        if !self.cache_store(&key, &snapshot, self.ttl.manual_update).await {
            // The store write went through but the cache refresh did not.
            // Drop any pre-update entry so it cannot outlive this write.
            if let Err(e) = self.cache.forget(&key).await {
                tracing::warn!("Cache invalidation for {} failed: {}", key, e);
            }
        }
        Ok(snapshot)
    }

    /// Drops the property's cache entry. Clearing an id that was never
    /// cached is not an error.
    pub async fn clear_cache(&self, property_id: &str) -> Result<()> {
        let key = cache_key::property(property_id);
        self.cache.forget(&key).await?;
        tracing::debug!("Cleared cache entry {}", key);
        Ok(())
    }

    /// Platform-wide aggregate over every property. Served from cache for
    /// the stats lifetime; staleness within that window is accepted.
    pub async fn get_availability_stats(&self) -> Result<AvailabilityStats> {
        let key = cache_key::stats();
        if let Some(stats) = self.cache_lookup(key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(stats);
        }

        let properties = self.store.all().await?;
        let stats = compute_stats(&properties);
        tracing::debug!(
            "Computed stats over {} properties, occupancy {}%",
            stats.total_properties,
            stats.occupancy_rate
        );
        self.cache_store(key, &stats, self.ttl.stats).await;
        Ok(stats)
    }

    /// Cache lookup that can only produce a usable value or nothing.
    /// Backend failures and undecodable entries degrade to a miss.
    async fn cache_lookup<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.cache.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read for {} failed: {}", key, e);
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Cache write that never fails the caller. Returns whether the entry
    /// was actually written.
    async fn cache_store<T: serde::Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Could not encode cache entry {}: {}", key, e);
                return false;
            }
        };
        match self.cache.put(key, encoded, ttl).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Cache write for {} failed: {}", key, e);
                false
            }
        }
    }
}

fn validate_room_counts(available_rooms: i64, total_rooms: i64) -> Result<()> {
    if available_rooms < 0 {
        return Err(AvailabilityError::ValidationError {
            field: "availableRooms".to_string(),
            reason: "must be zero or greater".to_string(),
        });
    }
    if total_rooms < 1 {
        return Err(AvailabilityError::ValidationError {
            field: "totalRooms".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if total_rooms > MAX_ROOMS {
        return Err(AvailabilityError::ValidationError {
            field: "totalRooms".to_string(),
            reason: "exceeds the supported room count".to_string(),
        });
    }
    if available_rooms > total_rooms {
        return Err(AvailabilityError::ValidationError {
            field: "availableRooms".to_string(),
            reason: "available rooms cannot exceed total rooms".to_string(),
        });
    }
    Ok(())
}

fn compute_stats(properties: &[Property]) -> AvailabilityStats {
    let mut available_properties = 0u64;
    let mut full_properties = 0u64;
    let mut limited_properties = 0u64;
    let mut total_rooms = 0u64;
    let mut available_rooms = 0u64;

    for property in properties {
        if property.available_rooms > 0 {
            available_properties += 1;
        } else {
            full_properties += 1;
        }
        // Limited overlaps the available count: a nearly full property is
        // still bookable.
        if AvailabilityStatus::derive(property.available_rooms, property.total_rooms)
            == AvailabilityStatus::Limited
        {
            limited_properties += 1;
        }
        total_rooms += u64::from(property.total_rooms);
        available_rooms += u64::from(property.available_rooms);
    }

    let occupancy_rate = if total_rooms == 0 {
        0.0
    } else {
        let occupied = total_rooms.saturating_sub(available_rooms) as f64;
        round_two_places(occupied / total_rooms as f64 * 100.0)
    };

    AvailabilityStats {
        total_properties: properties.len() as u64,
        available_properties,
        full_properties,
        limited_properties,
        total_rooms,
        available_rooms,
        occupancy_rate,
        last_updated: Utc::now(),
    }
}

fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
