//! Quick demo: persons/addresses/phones query resolution
//!
//! Run with: cargo run --example demo

use queryhaus::prelude::*;

fn schema() -> EntitySchema {
    let address = EntitySchema::new("addresses")
        .with_field("id", FieldType::Integer)
        .with_field("street", FieldType::String)
        .with_field("city", FieldType::String)
        .with_field("person_id", FieldType::Integer);

    let phone = EntitySchema::new("phones")
        .with_field("id", FieldType::Integer)
        .with_field("number", FieldType::String)
        .with_field("type", FieldType::String)
        .with_field("person_id", FieldType::Integer);

    EntitySchema::new("persons")
        .with_field("id", FieldType::Integer)
        .with_searchable_field("name", FieldType::String)
        .with_field("age", FieldType::Integer)
        .with_relation("addresses", address, Cardinality::Many, "person_id")
        .with_relation("phones", phone, Cardinality::Many, "person_id")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::new();
    store.insert_all(
        "persons",
        [
            Record::new().with("id", 1i64).with("name", "John").with("age", 25i64),
            Record::new().with("id", 2i64).with("name", "Johnny").with("age", 30i64),
            Record::new().with("id", 3i64).with("name", "Alice").with("age", 40i64),
        ],
    );
    store.insert(
        "addresses",
        Record::new()
            .with("id", 1i64)
            .with("street", "Main St 1")
            .with("city", "Berlin")
            .with("person_id", 2i64),
    );

    let schema = schema();
    let config = ResolverConfig::default();
    let resolver = QueryResolver::new(schema.clone());

    // name__ilike=%john%&sort=-age&limit=10
    let params = vec![
        ("name__ilike".to_string(), "%john%".to_string()),
        ("sort".to_string(), "-age".to_string()),
        ("limit".to_string(), "10".to_string()),
    ];
    let spec = parse_params(&params, &schema, &config)?;
    let page = resolver.resolve(&spec, &store).await?;
    println!("ilike: {} matches of {} total", page.records.len(), page.total);
    for record in &page.records {
        println!("  {:?} (age {:?})", record.get("name"), record.get("age"));
    }

    // addresses__city=Berlin
    let params = vec![("addresses__city".to_string(), "Berlin".to_string())];
    let spec = parse_params(&params, &schema, &config)?;
    let page = resolver.resolve(&spec, &store).await?;
    println!("relation filter: {:?}", page.records[0].get("name"));

    // invalid pagination is rejected before execution
    let params = vec![("limit".to_string(), "0".to_string())];
    match parse_params(&params, &schema, &config) {
        Err(e) => println!("rejected: {e}"),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
