// File: crates/biblio-sqlite/tests/adapter.rs
// Purpose: Adapter queries against an in-memory Zotero-compatible schema.

use biblio_core::store::{LibraryStore, RecordFilter};
use biblio_core::types::LibraryScope;
use biblio_core::{aggregate, extract_markers};
use biblio_sqlite::LibraryDatabase;

const SCHEMA: &str = "
CREATE TABLE items (itemID INTEGER PRIMARY KEY, itemTypeID INTEGER, libraryID INTEGER, dateAdded TEXT);
CREATE TABLE itemTypes (itemTypeID INTEGER PRIMARY KEY, typeName TEXT);
CREATE TABLE tags (tagID INTEGER PRIMARY KEY, name TEXT);
CREATE TABLE itemTags (itemID INTEGER, tagID INTEGER);
CREATE TABLE deletedItems (itemID INTEGER PRIMARY KEY);
CREATE TABLE publicationsItems (itemID INTEGER PRIMARY KEY);
CREATE TABLE fields (fieldID INTEGER PRIMARY KEY, fieldName TEXT);
CREATE TABLE itemData (itemID INTEGER, fieldID INTEGER, valueID INTEGER);
CREATE TABLE itemDataValues (valueID INTEGER PRIMARY KEY, value TEXT);
";

const SEED: &str = "
INSERT INTO itemTypes VALUES (1, 'journalArticle'), (2, 'book'), (3, 'note');
INSERT INTO tags VALUES (10, 'reading'), (11, 'methods');

-- Two articles on Jan 1, one book on Jan 3, one note (never counted),
-- one soft-deleted article on Jan 2.
INSERT INTO items VALUES
  (1, 1, 1, '2024-01-01 09:00:00'),
  (2, 1, 1, '2024-01-01 15:30:00'),
  (3, 2, 1, '2024-01-03 11:00:00'),
  (4, 3, 1, '2024-01-02 10:00:00'),
  (5, 1, 1, '2024-01-02 12:00:00');
INSERT INTO deletedItems VALUES (5);

-- Item 2 carries the focal tag; the deleted item 5 does too.
INSERT INTO itemTags VALUES (2, 10), (5, 10), (3, 11);

-- Items 1 and 3 are curated publications; item 1 has a publish date.
INSERT INTO publicationsItems VALUES (1), (3);
INSERT INTO fields VALUES (100, 'date'), (101, 'title');
INSERT INTO itemDataValues VALUES (1000, '2023/11/7'), (1001, 'Some Title');
INSERT INTO itemData VALUES (1, 100, 1000), (1, 101, 1001);
";

fn seeded() -> LibraryDatabase {
    let db = LibraryDatabase::open_in_memory().expect("in-memory db");
    db.execute_batch(SCHEMA).expect("schema");
    db.execute_batch(SEED).expect("seed");
    db
}

fn scope() -> LibraryScope {
    LibraryScope::new(1)
}

#[tokio::test]
async fn fused_day_counts_group_filter_and_order() {
    let db = seeded();
    let rows = db
        .day_counts(scope(), &RecordFilter::scholarly(), &[10])
        .await
        .expect("fused query");

    let days: Vec<&str> = rows.iter().map(|r| r.day.as_str()).collect();
    assert_eq!(days, vec!["2024-01-01", "2024-01-03"]);
    assert_eq!(rows[0].added_count, 2);
    assert_eq!(rows[0].focal_added_count, Some(1));
    assert_eq!(rows[1].added_count, 1);
    assert_eq!(rows[1].focal_added_count, Some(0));
}

#[tokio::test]
async fn fused_without_tags_reports_no_focal_column() {
    let db = seeded();
    let rows = db
        .day_counts(scope(), &RecordFilter::scholarly(), &[])
        .await
        .expect("fused query");
    assert!(rows.iter().all(|r| r.focal_added_count.is_none()));
}

#[tokio::test]
async fn decomposed_columns_align_with_the_fused_form() {
    let db = seeded();
    let filter = RecordFilter::scholarly();

    let fused = db.day_counts(scope(), &filter, &[10]).await.expect("fused");
    let days = db.day_column(scope(), &filter).await.expect("days");
    let added = db.added_count_column(scope(), &filter).await.expect("added");
    let focal = db
        .focal_count_column(scope(), &filter, &[10])
        .await
        .expect("focal");

    assert_eq!(days.len(), fused.len());
    assert_eq!(added.len(), fused.len());
    assert_eq!(focal.len(), fused.len());
    for (i, row) in fused.iter().enumerate() {
        assert_eq!(days[i], row.day);
        assert_eq!(added[i], row.added_count);
        assert_eq!(Some(focal[i]), row.focal_added_count);
    }
}

#[tokio::test]
async fn unknown_library_scope_yields_zero_rows() {
    let db = seeded();
    let rows = db
        .day_counts(LibraryScope::new(99), &RecordFilter::scholarly(), &[])
        .await
        .expect("fused query");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn tag_resolution_drops_unknown_names() {
    let db = seeded();
    let ids = db
        .resolve_tag_ids(&["reading".into(), "nonexistent".into()])
        .await
        .expect("resolve");
    assert_eq!(ids, vec![10]);

    let empty = db.resolve_tag_ids(&[]).await.expect("resolve empty");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn publish_dates_cover_only_curated_records() {
    let db = seeded();
    let filter = RecordFilter::publications();

    let dates = db.publish_dates(scope(), &filter).await.expect("publish");
    assert_eq!(dates, vec!["2023/11/7".to_string()]);

    let added = db.added_timestamps(scope(), &filter).await.expect("added");
    assert_eq!(added.len(), 2);
    assert!(added.iter().all(|d| d.starts_with("2024-01-0")));
}

#[tokio::test]
async fn aggregate_end_to_end_over_sqlite() {
    let db = seeded();
    let stats = aggregate(&db, scope(), &[10]).await;

    // Jan 1 through Jan 3, gap-filled.
    assert_eq!(stats.daily.len(), 3);
    assert_eq!(stats.total_count, 3);
    assert_eq!(stats.focal_count, 1);
    assert_eq!(stats.daily[1].added_count, 0);
    assert_eq!(stats.daily[1].cumulative_count, 2);
    assert_eq!(stats.start_date, "2024-01-01");
    assert_eq!(stats.end_date, "2024-01-03");
}

#[tokio::test]
async fn markers_end_to_end_prefer_publish_dates() {
    let db = seeded();
    let markers = extract_markers(&db, scope()).await;

    assert_eq!(markers.days, vec!["2023-11-07".to_string()]);
    assert_eq!(markers.cumulative_by_day["2023-11-07"], 1);
}

#[tokio::test]
async fn missing_schema_degrades_to_query_error() {
    let db = LibraryDatabase::open_in_memory().expect("in-memory db");
    let result = db.day_counts(scope(), &RecordFilter::scholarly(), &[]).await;
    assert!(result.is_err());
}
