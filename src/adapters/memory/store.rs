use crate::domain::model::Property;
use crate::domain::ports::PropertyStore;
use crate::utils::error::{AvailabilityError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Property store backed by a shared in-memory map, with an optional JSON
/// seed file for the initial records.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPropertyStore {
    properties: Arc<RwLock<HashMap<String, Property>>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the initial records from a JSON array of properties. Records
    /// without an `updatedAt` field get the load instant.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let seed: Vec<Property> = serde_json::from_str(&raw)?;
        let mut properties = HashMap::with_capacity(seed.len());
        for property in seed {
            properties.insert(property.id.clone(), property);
        }
        tracing::info!(
            "Loaded {} properties from {}",
            properties.len(),
            path.as_ref().display()
        );
        Ok(Self {
            properties: Arc::new(RwLock::new(properties)),
        })
    }

    pub async fn insert(&self, property: Property) {
        let mut properties = self.properties.write().await;
        properties.insert(property.id.clone(), property);
    }

    pub async fn len(&self) -> usize {
        let properties = self.properties.read().await;
        properties.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>> {
        let properties = self.properties.read().await;
        Ok(properties.get(id).cloned())
    }

    async fn update_room_counts(
        &self,
        id: &str,
        available_rooms: u32,
        total_rooms: u32,
    ) -> Result<Property> {
        let mut properties = self.properties.write().await;
        let property = properties
            .get_mut(id)
            .ok_or_else(|| AvailabilityError::NotFound(id.to_string()))?;
        property.available_rooms = available_rooms;
        property.total_rooms = total_rooms;
        property.updated_at = Utc::now();
        Ok(property.clone())
    }

    async fn all(&self) -> Result<Vec<Property>> {
        let properties = self.properties.read().await;
        let mut all: Vec<Property> = properties.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}
