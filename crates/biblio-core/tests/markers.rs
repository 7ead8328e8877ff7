// File: crates/biblio-core/tests/markers.rs
// Purpose: Marker extraction: source fallback order, normalization, cumulative totals.

mod support;

use biblio_core::extract_markers;
use support::{scope, FakeStore};

#[tokio::test]
async fn publish_dates_are_the_primary_source() {
    let store = FakeStore {
        publish_dates: Some(vec![
            "2021/3/5".into(),
            "2021-03-05".into(),
            "2021-04".into(),
        ]),
        added_timestamps: Some(vec!["2030-01-01 12:00:00".into()]),
        ..FakeStore::default()
    };

    let markers = extract_markers(&store, scope()).await;

    assert_eq!(markers.days, vec!["2021-03-05".to_string(), "2021-04-01".to_string()]);
    assert_eq!(markers.cumulative_by_day["2021-03-05"], 2);
    assert_eq!(markers.cumulative_by_day["2021-04-01"], 3);
    assert_eq!(store.recorded_calls(), vec!["publish_dates"]);
}

#[tokio::test]
async fn added_timestamps_used_only_when_primary_is_empty() {
    let store = FakeStore {
        publish_dates: Some(Vec::new()),
        added_timestamps: Some(vec![
            "2022-09-01 08:15:00".into(),
            "2022-09-02 19:30:00".into(),
        ]),
        ..FakeStore::default()
    };

    let markers = extract_markers(&store, scope()).await;

    assert_eq!(markers.days.len(), 2);
    assert_eq!(
        store.recorded_calls(),
        vec!["publish_dates", "added_timestamps"]
    );
}

#[tokio::test]
async fn unparseable_values_are_discarded_silently() {
    let store = FakeStore {
        publish_dates: Some(vec![
            "n.d.".into(),
            "".into(),
            "2020-05-05".into(),
            "forthcoming".into(),
        ]),
        ..FakeStore::default()
    };

    let markers = extract_markers(&store, scope()).await;

    assert_eq!(markers.days, vec!["2020-05-05".to_string()]);
    assert_eq!(markers.cumulative_by_day["2020-05-05"], 1);
}

#[tokio::test]
async fn cumulative_values_run_over_sorted_days() {
    let store = FakeStore {
        publish_dates: Some(vec![
            "2020-12-01".into(),
            "2019-01-15".into(),
            "2020-12-01".into(),
            "2021-06-30".into(),
        ]),
        ..FakeStore::default()
    };

    let markers = extract_markers(&store, scope()).await;

    assert_eq!(
        markers.days,
        vec![
            "2019-01-15".to_string(),
            "2020-12-01".to_string(),
            "2021-06-30".to_string()
        ]
    );
    let cumulative: Vec<u64> = markers
        .days
        .iter()
        .map(|d| markers.cumulative_by_day[d])
        .collect();
    assert_eq!(cumulative, vec![1, 3, 4]);
    assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn source_failures_degrade_to_no_markers() {
    let store = FakeStore::default();

    let markers = extract_markers(&store, scope()).await;

    assert!(markers.is_empty());
    assert!(markers.cumulative_by_day.is_empty());
}
