// File: crates/biblio-sqlite/src/sql.rs
// Summary: SQL text builders; one shared filter fragment feeds every query form.

use biblio_core::store::RecordFilter;

/// Calendar-day bucket: the added-timestamp is ISO-prefixed, so its
/// first ten characters are already `YYYY-MM-DD`.
pub const DAY_EXPR: &str = "substr(i.dateAdded, 1, 10)";

/// Shared FROM/WHERE fragments rendered from the one record predicate.
/// Both the fused aggregate query and the decomposed fallback columns
/// are built from this, so the two forms cannot drift.
pub struct FilterSql {
    pub joins: String,
    pub conditions: String,
}

pub fn filter_sql(filter: &RecordFilter) -> FilterSql {
    let mut joins = String::from(
        "FROM items i\n JOIN itemTypes it ON i.itemTypeID = it.itemTypeID",
    );
    let mut conditions = Vec::new();

    if let Some(types) = quoted_type_list(filter) {
        conditions.push(format!("it.typeName IN ({types})"));
    }
    conditions.push("i.libraryID = ?".to_string());
    if filter.exclude_deleted {
        joins.push_str("\n LEFT JOIN deletedItems di ON di.itemID = i.itemID");
        conditions.push("di.itemID IS NULL".to_string());
    }
    if filter.curated_only {
        conditions.push("i.itemID IN (SELECT itemID FROM publicationsItems)".to_string());
    }

    FilterSql { joins, conditions: conditions.join("\n   AND ") }
}

fn quoted_type_list(filter: &RecordFilter) -> Option<String> {
    let types = filter.type_allow_list();
    if types.is_empty() {
        return None;
    }
    Some(
        types
            .iter()
            .map(|t| format!("'{t}'"))
            .collect::<Vec<_>>()
            .join(","),
    )
}

pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Fused per-day aggregate. With a focal filter the focal membership is
/// a CTE of distinct live item ids carrying any of the given tags;
/// without one the focal column is omitted entirely.
pub fn fused_day_counts(filter: &RecordFilter, tag_count: usize) -> String {
    let f = filter_sql(filter);
    if tag_count == 0 {
        return format!(
            "SELECT {DAY_EXPR} AS day,\n        COUNT(DISTINCT i.itemID) AS added_count\n {joins}\n WHERE {conditions}\n GROUP BY {DAY_EXPR}\n ORDER BY day ASC",
            joins = f.joins,
            conditions = f.conditions,
        );
    }
    format!(
        "WITH focal AS (\n   SELECT DISTINCT itemID FROM itemTags\n   WHERE tagID IN ({tags})\n     AND itemID NOT IN (SELECT itemID FROM deletedItems)\n )\n SELECT {DAY_EXPR} AS day,\n        COUNT(DISTINCT i.itemID) AS added_count,\n        COUNT(DISTINCT CASE WHEN f.itemID IS NOT NULL THEN i.itemID END) AS focal_added_count\n {joins}\n LEFT JOIN focal f ON f.itemID = i.itemID\n WHERE {conditions}\n GROUP BY {DAY_EXPR}\n ORDER BY day ASC",
        tags = placeholders(tag_count),
        joins = f.joins,
        conditions = f.conditions,
    )
}

/// Decomposition fallback, query one of three: the distinct days.
pub fn day_column(filter: &RecordFilter) -> String {
    let f = filter_sql(filter);
    format!(
        "SELECT {DAY_EXPR} AS day\n {joins}\n WHERE {conditions}\n GROUP BY {DAY_EXPR}\n ORDER BY day ASC",
        joins = f.joins,
        conditions = f.conditions,
    )
}

/// Decomposition fallback, query two: added counts aligned with the
/// day column by identical grouping and ordering.
pub fn added_count_column(filter: &RecordFilter) -> String {
    let f = filter_sql(filter);
    format!(
        "SELECT COUNT(DISTINCT i.itemID) AS added_count\n {joins}\n WHERE {conditions}\n GROUP BY {DAY_EXPR}\n ORDER BY {DAY_EXPR} ASC",
        joins = f.joins,
        conditions = f.conditions,
    )
}

/// Decomposition fallback, query three: focal counts via a tag join,
/// same grouping and ordering as the other two.
pub fn focal_count_column(filter: &RecordFilter, tag_count: usize) -> String {
    let f = filter_sql(filter);
    format!(
        "SELECT COUNT(DISTINCT CASE WHEN itg.itemID IS NOT NULL THEN i.itemID END) AS focal_added_count\n {joins}\n LEFT JOIN itemTags itg ON itg.itemID = i.itemID AND itg.tagID IN ({tags})\n WHERE {conditions}\n GROUP BY {DAY_EXPR}\n ORDER BY {DAY_EXPR} ASC",
        tags = placeholders(tag_count),
        joins = f.joins,
        conditions = f.conditions,
    )
}

pub fn tag_ids(name_count: usize) -> String {
    format!(
        "SELECT tagID FROM tags WHERE name IN ({})",
        placeholders(name_count)
    )
}

/// Explicit publish-date field values of the curated subset, in
/// added order.
pub fn publish_dates(filter: &RecordFilter) -> String {
    let f = filter_sql(filter);
    format!(
        "SELECT idv.value AS publishDate\n {joins}\n LEFT JOIN itemData idt ON i.itemID = idt.itemID\n LEFT JOIN itemDataValues idv ON idt.valueID = idv.valueID\n LEFT JOIN fields fl ON idt.fieldID = fl.fieldID\n WHERE fl.fieldName = 'date'\n   AND idv.value IS NOT NULL\n   AND {conditions}\n ORDER BY i.dateAdded ASC",
        joins = f.joins,
        conditions = f.conditions,
    )
}

/// Added-timestamps of the curated subset; the marker fallback source.
pub fn added_timestamps(filter: &RecordFilter) -> String {
    let f = filter_sql(filter);
    format!(
        "SELECT i.dateAdded AS dateAdded\n {joins}\n WHERE {conditions}\n ORDER BY i.dateAdded ASC",
        joins = f.joins,
        conditions = f.conditions,
    )
}
