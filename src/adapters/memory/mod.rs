pub mod cache;
pub mod store;

pub use cache::InMemoryTtlCache;
pub use store::InMemoryPropertyStore;
