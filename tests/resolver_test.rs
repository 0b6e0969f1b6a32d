//! End-to-end tests for query resolution
//!
//! Exercises the persons/addresses/phones surface: filtering with operator
//! suffixes, relation traversal, multi-key sort, pagination and search,
//! going through the full parse-then-resolve path.

use queryhaus::prelude::*;

fn person_schema() -> EntitySchema {
    let phone = EntitySchema::new("phones")
        .with_field("id", FieldType::Integer)
        .with_field("number", FieldType::String)
        .with_field("type", FieldType::String)
        .with_field("person_id", FieldType::Integer);

    let inspection = EntitySchema::new("inspections")
        .with_field("id", FieldType::Integer)
        .with_field("grade", FieldType::String)
        .with_field("address_id", FieldType::Integer);

    let address = EntitySchema::new("addresses")
        .with_field("id", FieldType::Integer)
        .with_field("street", FieldType::String)
        .with_field("city", FieldType::String)
        .with_field("person_id", FieldType::Integer)
        .with_relation("inspections", inspection, Cardinality::Many, "address_id");

    EntitySchema::new("persons")
        .with_field("id", FieldType::Integer)
        .with_searchable_field("name", FieldType::String)
        .with_field("age", FieldType::Integer)
        .with_field("created_at", FieldType::DateTime)
        .with_relation("addresses", address, Cardinality::Many, "person_id")
        .with_relation("phones", phone, Cardinality::Many, "person_id")
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();

    store.insert_all(
        "persons",
        [
            Record::new()
                .with("id", 1i64)
                .with("name", "John")
                .with("age", 25i64)
                .with("created_at", FieldValue::parse("2024-01-10", FieldType::DateTime).unwrap()),
            Record::new()
                .with("id", 2i64)
                .with("name", "Johnny")
                .with("age", 30i64)
                .with("created_at", FieldValue::parse("2024-02-20T08:15:00", FieldType::DateTime).unwrap()),
            Record::new()
                .with("id", 3i64)
                .with("name", "Alice")
                .with("age", 40i64)
                .with("created_at", FieldValue::parse("2023-12-01", FieldType::DateTime).unwrap()),
        ],
    );

    store.insert_all(
        "addresses",
        [
            Record::new()
                .with("id", 1i64)
                .with("street", "Main St 1")
                .with("city", "Berlin")
                .with("person_id", 1i64),
            Record::new()
                .with("id", 2i64)
                .with("street", "Side St 9")
                .with("city", "Paris")
                .with("person_id", 2i64),
            Record::new()
                .with("id", 3i64)
                .with("street", "Back St 4")
                .with("city", "Berlin")
                .with("person_id", 2i64),
        ],
    );

    store.insert_all(
        "inspections",
        [
            Record::new()
                .with("id", 1i64)
                .with("grade", "A")
                .with("address_id", 1i64),
            Record::new()
                .with("id", 2i64)
                .with("grade", "C")
                .with("address_id", 3i64),
        ],
    );

    store.insert_all(
        "phones",
        [
            Record::new()
                .with("id", 1i64)
                .with("number", "030-111")
                .with("type", "home")
                .with("person_id", 1i64),
            Record::new()
                .with("id", 2i64)
                .with("number", "030-222")
                .with("type", "work")
                .with("person_id", 3i64),
        ],
    );

    store
}

fn query(pairs: &[(&str, &str)]) -> Result<QuerySpec, QueryhausError> {
    let params: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    parse_params(&params, &person_schema(), &ResolverConfig::default())
}

async fn run(pairs: &[(&str, &str)]) -> ResultPage {
    let spec = query(pairs).expect("valid query");
    QueryResolver::new(person_schema())
        .resolve(&spec, &seeded_store())
        .await
        .expect("resolution succeeds")
}

fn names(page: &ResultPage) -> Vec<String> {
    page.records
        .iter()
        .map(|r| r.get("name").as_text().unwrap().to_string())
        .collect()
}

// ========================================
// Filtering
// ========================================

#[tokio::test]
async fn test_exact_match() {
    let page = run(&[("name", "John")]).await;
    assert_eq!(names(&page), vec!["John"]);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_ilike_matches_both_johns() {
    let page = run(&[("name__ilike", "%john%")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);
}

#[tokio::test]
async fn test_range_comparison() {
    let page = run(&[("age__gt", "25")]).await;
    assert_eq!(names(&page), vec!["Johnny", "Alice"]);

    let page = run(&[("age__gte", "25"), ("age__lt", "40")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);
}

#[tokio::test]
async fn test_date_filter_calendar_form() {
    // calendar date means start of day, so Johnny's 08:15 record qualifies
    let page = run(&[("created_at__gte", "2024-02-20")]).await;
    assert_eq!(names(&page), vec!["Johnny"]);
}

#[tokio::test]
async fn test_and_combination_narrows() {
    let base = run(&[("name__ilike", "%john%")]).await;
    let narrowed = run(&[("name__ilike", "%john%"), ("age__gt", "25")]).await;
    assert!(narrowed.total <= base.total);
    assert_eq!(names(&narrowed), vec!["Johnny"]);
}

// ========================================
// Relation Traversal
// ========================================

#[tokio::test]
async fn test_relation_exact_match() {
    let page = run(&[("addresses__city", "Berlin")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);
}

#[tokio::test]
async fn test_relation_ilike() {
    let page = run(&[("addresses__street__ilike", "%side%")]).await;
    assert_eq!(names(&page), vec!["Johnny"]);
}

#[tokio::test]
async fn test_semi_join_does_not_duplicate_parents() {
    // Johnny has two Berlin-adjacent addresses but appears once
    let page = run(&[("addresses__street__ilike", "%st%")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);
}

#[tokio::test]
async fn test_parent_without_related_records_never_matches() {
    // Alice has no addresses at all
    let page = run(&[("addresses__city__ilike", "%")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);

    let page = run(&[("phones__type", "work")]).await;
    assert_eq!(names(&page), vec!["Alice"]);
}

#[tokio::test]
async fn test_nested_relation_semi_join() {
    // persons -> addresses -> inspections, two hops
    let page = run(&[("addresses__inspections__grade", "A")]).await;
    assert_eq!(names(&page), vec!["John"]);

    let page = run(&[("addresses__inspections__grade__ilike", "%c%")]).await;
    assert_eq!(names(&page), vec!["Johnny"]);
}

#[tokio::test]
async fn test_nested_relation_without_grandchildren_never_matches() {
    // Johnny's Paris address has no inspections and his Berlin one graded C,
    // so an A-grade filter excludes him despite his related addresses;
    // Alice has no addresses at all
    let page = run(&[("addresses__inspections__grade", "A")]).await;
    assert_eq!(page.total, 1);

    let page = run(&[("addresses__inspections__grade", "Z")]).await;
    assert!(page.records.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_filters_across_relations_combine() {
    let page = run(&[("addresses__city", "Berlin"), ("phones__type", "home")]).await;
    assert_eq!(names(&page), vec!["John"]);
}

// ========================================
// Sorting
// ========================================

#[tokio::test]
async fn test_sort_descending() {
    let page = run(&[("sort", "-age")]).await;
    let ages: Vec<_> = page
        .records
        .iter()
        .map(|r| r.get("age").clone())
        .collect();
    assert_eq!(
        ages,
        vec![
            FieldValue::Integer(40),
            FieldValue::Integer(30),
            FieldValue::Integer(25)
        ]
    );
}

#[tokio::test]
async fn test_sort_multi_key() {
    let page = run(&[("sort", "name,-age")]).await;
    assert_eq!(names(&page), vec!["Alice", "John", "Johnny"]);
}

#[tokio::test]
async fn test_repeated_query_is_deterministic() {
    let first = run(&[("sort", "-age"), ("limit", "2")]).await;
    let second = run(&[("sort", "-age"), ("limit", "2")]).await;
    assert_eq!(names(&first), names(&second));
}

// ========================================
// Pagination
// ========================================

#[tokio::test]
async fn test_page_is_contiguous_slice() {
    let all = run(&[("sort", "-age")]).await;
    let page = run(&[("sort", "-age"), ("skip", "1"), ("limit", "1")]).await;

    assert_eq!(page.total, 3);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0], all.records[1]);
}

#[tokio::test]
async fn test_total_ignores_pagination() {
    let page = run(&[("age__gte", "25"), ("limit", "1")]).await;
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_skip_past_end_yields_empty_page() {
    let page = run(&[("skip", "10")]).await;
    assert!(page.records.is_empty());
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_zero_limit_is_rejected_before_execution() {
    let err = query(&[("age__gt", "25"), ("limit", "0")]).unwrap_err();
    assert!(matches!(err, QueryhausError::InvalidPagination(_)));
}

// ========================================
// Search
// ========================================

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let page = run(&[("search", "JOHN")]).await;
    assert_eq!(names(&page), vec!["John", "Johnny"]);
}

#[tokio::test]
async fn test_search_combines_with_filters() {
    let page = run(&[("search", "john"), ("age__gt", "25")]).await;
    assert_eq!(names(&page), vec!["Johnny"]);
}

#[tokio::test]
async fn test_search_without_searchable_fields_matches_nothing() {
    let schema = EntitySchema::new("persons")
        .with_field("id", FieldType::Integer)
        .with_field("name", FieldType::String);
    let spec = parse_params(
        &[("search".to_string(), "john".to_string())],
        &schema,
        &ResolverConfig::default(),
    )
    .unwrap();

    let page = QueryResolver::new(schema)
        .resolve(&spec, &seeded_store())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_resolver_exposes_its_schema() {
    let resolver = QueryResolver::new(person_schema());
    assert_eq!(resolver.schema().name, "persons");
    assert!(resolver.schema().relation("addresses").is_some());
}

// ========================================
// Page Invariants
// ========================================

#[tokio::test]
async fn test_page_length_bound() {
    for (skip, limit) in [("0", "1"), ("1", "2"), ("2", "5"), ("3", "1")] {
        let page = run(&[("skip", skip), ("limit", limit)]).await;
        let skip: u64 = skip.parse().unwrap();
        let limit: u64 = limit.parse().unwrap();
        let remaining = page.total.saturating_sub(skip);
        assert!(page.records.len() as u64 <= limit.min(remaining));
    }
}
