use std::fs;
use std::time::Duration;
use tripboard_core::{
    ExpenseCategory, Latency, SeedData, SeedSource, StoreConfig, TripPatch, TripStore,
};

fn seeded() -> TripStore {
    TripStore::seeded(Latency::none(), SeedData::bundled())
}

#[tokio::test]
async fn bundled_seed_populates_every_collection() {
    let store = seeded();
    assert!(!store.trips().is_empty().await);
    assert!(!store.itineraries().is_empty().await);
    assert!(!store.accommodations().is_empty().await);
    assert!(!store.places().is_empty().await);
    assert!(!store.members().is_empty().await);
    assert!(!store.invitations().is_empty().await);
    assert!(!store.expenses().is_empty().await);
}

#[tokio::test]
async fn seeded_trip_summary_matches_dataset() {
    let store = seeded();
    let summary = store.expense_service().get_trip_summary("1").await;

    assert_eq!(summary.total_amount, 1130.0);
    assert_eq!(summary.total_expenses, 2);
    assert_eq!(
        summary.category_summary[&ExpenseCategory::Accommodation],
        450.0
    );
    assert_eq!(
        summary.category_summary[&ExpenseCategory::Transportation],
        680.0
    );
}

#[tokio::test]
async fn seeded_invite_can_be_accepted() {
    let store = seeded();
    let before = store.members().get_by_trip_id("1").await.len();

    let accepted = store.invite_service().accept_invite("1").await.unwrap();
    assert_eq!(accepted.member.name, "Jordan Lee");
    assert_eq!(store.members().get_by_trip_id("1").await.len(), before + 1);
}

#[tokio::test]
async fn overview_counts_related_records() {
    let store = seeded();
    let overview = store.trip_service().overview("1").await.unwrap();

    assert_eq!(overview.trip.name, "Tokyo Adventure");
    assert_eq!(overview.duration_days, 7);
    assert_eq!(overview.planned_days, 2);
    assert_eq!(overview.activity_count, 3);
    assert_eq!(overview.member_count, 4);
    assert_eq!(overview.accommodation_count, 2);
    assert_eq!(overview.place_count, 3);
    assert_eq!(overview.must_see_count, 2);
    assert_eq!(overview.expense_total, 1130.0);

    assert!(store.trip_service().overview("404").await.is_none());
}

#[tokio::test]
async fn seed_dir_with_malformed_file_degrades_to_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("trips.json"),
        r#"[{"id":"9","name":"Rome","destination":"Italy","startDate":"2025-03-01","endDate":"2025-03-04"}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("places.json"), "[{ broken").unwrap();

    let config = StoreConfig {
        latency: Latency::none(),
        seed: SeedSource::Dir(dir.path().to_path_buf()),
        ..StoreConfig::default()
    };
    let store = TripStore::from_config(&config);

    let trips = store.trips().get_all().await;
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].name, "Rome");
    assert!(trips[0].description.is_empty());
    assert!(store.places().is_empty().await);
    assert!(store.expenses().is_empty().await);
}

#[tokio::test]
async fn test_config_starts_empty() {
    let store = TripStore::from_config(&StoreConfig::for_tests());
    assert!(store.trips().get_all().await.is_empty());
}

#[tokio::test]
async fn clones_share_collections() {
    let store = seeded();
    let handle = store.clone();

    let patch = TripPatch {
        name: Some("Tokyo Again".to_string()),
        ..TripPatch::default()
    };
    handle.trips().update("1", patch).await.unwrap();

    assert_eq!(
        store.trips().get_by_id("1").await.unwrap().name,
        "Tokyo Again"
    );
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_lookups() {
    let store = TripStore::seeded(Latency::simulated(), SeedData::bundled());
    let started = tokio::time::Instant::now();

    let trip = store.trips().get_by_id("1").await;

    assert!(trip.is_some());
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn concurrent_updates_are_last_write_wins() {
    let store = TripStore::seeded(Latency::simulated(), SeedData::bundled());
    let first = TripPatch {
        name: Some("first".to_string()),
        ..TripPatch::default()
    };
    let second = TripPatch {
        name: Some("second".to_string()),
        ..TripPatch::default()
    };

    let trips = store.trips();
    let (a, b) = tokio::join!(trips.update("1", first), trips.update("1", second));
    let (a, b) = (a.unwrap(), b.unwrap());

    let stored = store.trips().get_by_id("1").await.unwrap();
    assert!(stored == a || stored == b);
    assert!(stored.name == "first" || stored.name == "second");
}
