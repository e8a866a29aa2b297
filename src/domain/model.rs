use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property as the persistence store owns it. This service reads and
/// updates room counts; it never creates or deletes a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub available_rooms: u32,
    pub total_rooms: u32,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    Full,
    /// Reserved vocabulary value. Never derived from room counts; accepted
    /// only when a manual update supplies it explicitly.
    Offline,
}

impl AvailabilityStatus {
    /// Derives the status from room counts.
    ///
    /// Zero available rooms is always `Full`, and a zero total also reads
    /// `Full` so the occupancy division never sees a zero denominator.
    /// Otherwise occupancy at or above 90% is `Limited`.
    pub fn derive(available_rooms: u32, total_rooms: u32) -> Self {
        if available_rooms == 0 {
            return AvailabilityStatus::Full;
        }
        if total_rooms == 0 {
            return AvailabilityStatus::Full;
        }
        let occupied = total_rooms.saturating_sub(available_rooms);
        let occupancy = occupied as f64 / total_rooms as f64;
        if occupancy >= 0.90 {
            AvailabilityStatus::Limited
        } else {
            AvailabilityStatus::Available
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Limited => "limited",
            AvailabilityStatus::Full => "full",
            AvailabilityStatus::Offline => "offline",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time availability of a single property. Cached transiently,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySnapshot {
    pub property_id: String,
    pub available_rooms: u32,
    pub total_rooms: u32,
    pub status: AvailabilityStatus,
    pub last_updated: DateTime<Utc>,
}

impl AvailabilitySnapshot {
    pub fn from_property(property: &Property) -> Self {
        AvailabilitySnapshot {
            property_id: property.id.clone(),
            available_rooms: property.available_rooms,
            total_rooms: property.total_rooms,
            status: AvailabilityStatus::derive(property.available_rooms, property.total_rooms),
            last_updated: property.updated_at,
        }
    }
}

/// Platform-wide aggregate over all properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStats {
    pub total_properties: u64,
    pub available_properties: u64,
    pub full_properties: u64,
    pub limited_properties: u64,
    pub total_rooms: u64,
    pub available_rooms: u64,
    pub occupancy_rate: f64,
    pub last_updated: DateTime<Utc>,
}

/// Manual availability update. Counts are signed so out-of-range values
/// reach validation instead of failing JSON deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub available_rooms: i64,
    pub total_rooms: i64,
    #[serde(default)]
    pub status: Option<AvailabilityStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_full_when_no_rooms_left() {
        assert_eq!(AvailabilityStatus::derive(0, 10), AvailabilityStatus::Full);
        assert_eq!(AvailabilityStatus::derive(0, 1), AvailabilityStatus::Full);
        assert_eq!(AvailabilityStatus::derive(0, 0), AvailabilityStatus::Full);
    }

    #[test]
    fn test_status_full_when_total_is_zero() {
        // Inconsistent store data: rooms available out of zero total.
        assert_eq!(AvailabilityStatus::derive(5, 0), AvailabilityStatus::Full);
    }

    #[test]
    fn test_status_limited_at_ninety_percent_occupancy() {
        assert_eq!(AvailabilityStatus::derive(1, 10), AvailabilityStatus::Limited);
        assert_eq!(AvailabilityStatus::derive(10, 100), AvailabilityStatus::Limited);
        assert_eq!(AvailabilityStatus::derive(1, 20), AvailabilityStatus::Limited);
    }

    #[test]
    fn test_status_available_below_threshold() {
        assert_eq!(AvailabilityStatus::derive(2, 10), AvailabilityStatus::Available);
        assert_eq!(AvailabilityStatus::derive(11, 100), AvailabilityStatus::Available);
        assert_eq!(AvailabilityStatus::derive(10, 10), AvailabilityStatus::Available);
    }

    #[test]
    fn test_status_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_value(AvailabilityStatus::Limited).unwrap(),
            serde_json::json!("limited")
        );
        assert_eq!(
            serde_json::to_value(AvailabilityStatus::Offline).unwrap(),
            serde_json::json!("offline")
        );
        let parsed: AvailabilityStatus = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(parsed, AvailabilityStatus::Full);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let property = Property {
            id: "kost-001".to_string(),
            available_rooms: 3,
            total_rooms: 10,
            updated_at: "2025-06-01T08:30:00Z".parse().unwrap(),
        };
        let snapshot = AvailabilitySnapshot::from_property(&property);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["propertyId"], "kost-001");
        assert_eq!(json["availableRooms"], 3);
        assert_eq!(json["totalRooms"], 10);
        assert_eq!(json["status"], "available");
        assert_eq!(json["lastUpdated"], "2025-06-01T08:30:00Z");
    }

    #[test]
    fn test_snapshot_keeps_property_timestamp() {
        let updated_at: DateTime<Utc> = "2025-03-15T12:00:00Z".parse().unwrap();
        let property = Property {
            id: "kost-002".to_string(),
            available_rooms: 1,
            total_rooms: 10,
            updated_at,
        };
        let snapshot = AvailabilitySnapshot::from_property(&property);
        assert_eq!(snapshot.last_updated, updated_at);
        assert_eq!(snapshot.status, AvailabilityStatus::Limited);
    }

    #[test]
    fn test_property_deserializes_without_timestamp() {
        // Seed files may omit updatedAt; the load instant is used instead.
        let property: Property = serde_json::from_str(
            r#"{"id": "kost-003", "availableRooms": 4, "totalRooms": 8}"#,
        )
        .unwrap();
        assert_eq!(property.id, "kost-003");
        assert_eq!(property.available_rooms, 4);
        assert_eq!(property.total_rooms, 8);
    }

    #[test]
    fn test_update_accepts_missing_status() {
        let update: AvailabilityUpdate =
            serde_json::from_str(r#"{"availableRooms": 2, "totalRooms": 10}"#).unwrap();
        assert_eq!(update.available_rooms, 2);
        assert_eq!(update.total_rooms, 10);
        assert!(update.status.is_none());
    }
}
