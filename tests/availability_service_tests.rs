//! Service-level tests against the real in-memory adapters, including the
//! time-dependent cache behavior under paused tokio time.

use chrono::Utc;
use satu_atap_availability::adapters::memory::{InMemoryPropertyStore, InMemoryTtlCache};
use satu_atap_availability::core::availability::AvailabilityService;
use satu_atap_availability::domain::model::{AvailabilityStatus, AvailabilityUpdate, Property};
use satu_atap_availability::domain::ports::PropertyStore;
use satu_atap_availability::utils::error::AvailabilityError;
use std::time::Duration;

fn property(id: &str, available_rooms: u32, total_rooms: u32) -> Property {
    Property {
        id: id.to_string(),
        available_rooms,
        total_rooms,
        updated_at: Utc::now(),
    }
}

fn update(available_rooms: i64, total_rooms: i64) -> AvailabilityUpdate {
    AvailabilityUpdate {
        available_rooms,
        total_rooms,
        status: None,
    }
}

async fn seeded(
    properties: &[(&str, u32, u32)],
) -> (
    AvailabilityService<InMemoryPropertyStore, InMemoryTtlCache>,
    InMemoryPropertyStore,
) {
    let store = InMemoryPropertyStore::new();
    for (id, available_rooms, total_rooms) in properties {
        store
            .insert(property(id, *available_rooms, *total_rooms))
            .await;
    }
    let service = AvailabilityService::new(store.clone(), InMemoryTtlCache::new());
    (service, store)
}

#[tokio::test]
async fn test_snapshot_within_ttl_is_identical() {
    let (service, store) = seeded(&[("kost-001", 3, 10)]).await;

    let first = service.get_availability("kost-001").await.unwrap();
    // A store change behind the cache is not visible inside the window.
    store.update_room_counts("kost-001", 9, 10).await.unwrap();
    let second = service.get_availability("kost-001").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.available_rooms, 3);
}

#[tokio::test(start_paused = true)]
async fn test_read_entry_expires_after_five_minutes() {
    let (service, store) = seeded(&[("kost-001", 3, 10)]).await;

    let first = service.get_availability("kost-001").await.unwrap();
    assert_eq!(first.status, AvailabilityStatus::Available);
    store.update_room_counts("kost-001", 1, 10).await.unwrap();

    // Four minutes in, the cached snapshot still wins.
    tokio::time::advance(Duration::from_secs(240)).await;
    let cached = service.get_availability("kost-001").await.unwrap();
    assert_eq!(cached.available_rooms, 3);

    // Past the five-minute mark the entry has expired.
    tokio::time::advance(Duration::from_secs(61)).await;
    let fresh = service.get_availability("kost-001").await.unwrap();
    assert_eq!(fresh.available_rooms, 1);
    assert_eq!(fresh.status, AvailabilityStatus::Limited);
}

#[tokio::test(start_paused = true)]
async fn test_manual_update_entry_outlives_read_ttl() {
    let (service, store) = seeded(&[("kost-001", 3, 10)]).await;

    let updated = service
        .update_availability("kost-001", update(2, 10))
        .await
        .unwrap();
    store.update_room_counts("kost-001", 8, 10).await.unwrap();

    // Six minutes is past the read lifetime but well inside the
    // thirty-minute manual-update lifetime.
    tokio::time::advance(Duration::from_secs(360)).await;
    let cached = service.get_availability("kost-001").await.unwrap();
    assert_eq!(cached, updated);

    // Past thirty minutes the store value shows through again.
    tokio::time::advance(Duration::from_secs(1500)).await;
    let fresh = service.get_availability("kost-001").await.unwrap();
    assert_eq!(fresh.available_rooms, 8);
}

#[tokio::test(start_paused = true)]
async fn test_stats_refresh_after_ten_minutes() {
    let (service, store) = seeded(&[("kost-a", 2, 10)]).await;

    let first = service.get_availability_stats().await.unwrap();
    assert_eq!(first.total_properties, 1);
    store.insert(property("kost-b", 5, 10)).await;

    tokio::time::advance(Duration::from_secs(599)).await;
    let cached = service.get_availability_stats().await.unwrap();
    assert_eq!(cached, first);

    tokio::time::advance(Duration::from_secs(2)).await;
    let refreshed = service.get_availability_stats().await.unwrap();
    assert_eq!(refreshed.total_properties, 2);
    assert_eq!(refreshed.total_rooms, 20);
}

#[tokio::test]
async fn test_update_then_read_serves_refreshed_entry() {
    let (service, _store) = seeded(&[("kost-001", 3, 10)]).await;

    let updated = service
        .update_availability("kost-001", update(0, 10))
        .await
        .unwrap();
    let read_back = service.get_availability("kost-001").await.unwrap();

    assert_eq!(read_back, updated);
    assert_eq!(read_back.status, AvailabilityStatus::Full);
}

#[tokio::test]
async fn test_clear_cache_forces_fresh_computation() {
    let (service, store) = seeded(&[("kost-001", 3, 10)]).await;

    service.get_availability("kost-001").await.unwrap();
    store.update_room_counts("kost-001", 1, 10).await.unwrap();

    // Still the cached value,
    let stale = service.get_availability("kost-001").await.unwrap();
    assert_eq!(stale.available_rooms, 3);
    assert_eq!(stale.status, AvailabilityStatus::Available);

    // until the entry is explicitly dropped.
    service.clear_cache("kost-001").await.unwrap();
    let fresh = service.get_availability("kost-001").await.unwrap();
    assert_eq!(fresh.available_rooms, 1);
    assert_eq!(fresh.status, AvailabilityStatus::Limited);
}

#[tokio::test]
async fn test_clear_cache_for_never_cached_id() {
    let (service, _store) = seeded(&[]).await;
    service.clear_cache("never-cached").await.unwrap();
}

#[tokio::test]
async fn test_batch_partial_success() {
    let (service, _store) = seeded(&[("kost-a", 1, 10), ("kost-b", 5, 10)]).await;

    let ids = vec![
        "kost-a".to_string(),
        "missing".to_string(),
        "kost-b".to_string(),
    ];
    let snapshots = service.get_multiple_availability(&ids).await.unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].property_id, "kost-a");
    assert_eq!(snapshots[1].property_id, "kost-b");
}

#[tokio::test]
async fn test_batch_seeds_cache_for_single_reads() {
    let (service, store) = seeded(&[("kost-a", 3, 10)]).await;

    let ids = vec!["kost-a".to_string()];
    service.get_multiple_availability(&ids).await.unwrap();
    store.update_room_counts("kost-a", 7, 10).await.unwrap();

    let snapshot = service.get_availability("kost-a").await.unwrap();
    assert_eq!(snapshot.available_rooms, 3);
}

#[tokio::test]
async fn test_batch_over_limit_is_rejected() {
    let (service, _store) = seeded(&[("kost-a", 3, 10)]).await;

    let ids: Vec<String> = (0..51).map(|i| format!("kost-{:03}", i)).collect();
    let err = service.get_multiple_availability(&ids).await.unwrap_err();
    assert!(matches!(err, AvailabilityError::ValidationError { .. }));
}

#[tokio::test]
async fn test_rejected_update_leaves_everything_untouched() {
    let (service, store) = seeded(&[("kost-001", 3, 10)]).await;

    let err = service
        .update_availability("kost-001", update(11, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AvailabilityError::ValidationError { .. }));

    let stored = store.find_by_id("kost-001").await.unwrap().unwrap();
    assert_eq!(stored.available_rooms, 3);
    assert_eq!(stored.total_rooms, 10);

    let snapshot = service.get_availability("kost-001").await.unwrap();
    assert_eq!(snapshot.available_rooms, 3);
}

#[tokio::test]
async fn test_explicit_offline_status_round_trips() {
    let (service, _store) = seeded(&[("kost-001", 5, 10)]).await;

    service
        .update_availability(
            "kost-001",
            AvailabilityUpdate {
                available_rooms: 5,
                total_rooms: 10,
                status: Some(AvailabilityStatus::Offline),
            },
        )
        .await
        .unwrap();

    let snapshot = service.get_availability("kost-001").await.unwrap();
    assert_eq!(snapshot.status, AvailabilityStatus::Offline);
}

#[tokio::test]
async fn test_stats_worked_example() {
    let (service, _store) = seeded(&[
        ("kost-a", 0, 10),
        ("kost-b", 1, 10),
        ("kost-c", 5, 10),
    ])
    .await;

    let stats = service.get_availability_stats().await.unwrap();

    assert_eq!(stats.total_properties, 3);
    assert_eq!(stats.available_properties, 2);
    assert_eq!(stats.full_properties, 1);
    assert_eq!(stats.limited_properties, 1);
    assert_eq!(stats.total_rooms, 30);
    assert_eq!(stats.available_rooms, 6);
    assert_eq!(stats.occupancy_rate, 80.0);
}

#[tokio::test]
async fn test_stats_for_empty_platform() {
    let (service, _store) = seeded(&[]).await;

    let stats = service.get_availability_stats().await.unwrap();

    assert_eq!(stats.total_properties, 0);
    assert_eq!(stats.total_rooms, 0);
    assert_eq!(stats.occupancy_rate, 0.0);
}
