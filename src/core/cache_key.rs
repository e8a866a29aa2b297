//! Cache key construction, shared by the read, write and invalidation
//! paths so a key format change cannot split them.

pub const STATS_KEY: &str = "availability_stats";

pub fn property(property_id: &str) -> String {
    format!("availability:{}", property_id)
}

pub fn stats() -> &'static str {
    STATS_KEY
}
