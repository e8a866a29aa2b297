// Adapters layer: concrete implementations for external systems.
// Outbound: the in-memory property store and TTL cache. Inbound: the HTTP API.

pub mod http;
pub mod memory;
