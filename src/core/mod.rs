pub mod availability;
pub mod cache_key;

pub use crate::domain::model::{
    AvailabilitySnapshot, AvailabilityStats, AvailabilityStatus, AvailabilityUpdate, Property,
};
pub use crate::domain::ports::{CacheStore, PropertyStore};
pub use crate::utils::error::Result;
pub use availability::{AvailabilityService, TtlPolicy, MAX_BATCH_SIZE};
