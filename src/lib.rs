pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::memory::{InMemoryPropertyStore, InMemoryTtlCache};
pub use config::{CliConfig, ServiceConfig};
pub use crate::core::availability::{AvailabilityService, TtlPolicy};
pub use domain::model::{
    AvailabilitySnapshot, AvailabilityStats, AvailabilityStatus, AvailabilityUpdate, Property,
};
pub use utils::error::{AvailabilityError, Result};
