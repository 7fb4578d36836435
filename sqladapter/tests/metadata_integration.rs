// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog, table and column discovery

#[path = "testutils/mod.rs"]
mod testutils;

use sqladapter::{MetadataIntrospector, ValueType};
use testutils::scripted_driver::ScriptedDataSource;
use testutils::sqlite_fixture::SqliteFixture;

#[test]
fn test_sqlite_catalogs_and_tables() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");

    let catalogs = adapter.list_catalogs().unwrap();
    assert!(catalogs.contains("main"));

    let tables = adapter.list_tables("main").unwrap();
    let tables: Vec<&str> = tables.iter().map(String::as_str).collect();
    assert_eq!(tables, vec!["departments", "employees", "people"]);
}

#[test]
fn test_views_are_listed() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    fixture
        .execute_batch("CREATE VIEW rich AS SELECT * FROM employees WHERE salary > 90;")
        .unwrap();

    let tables = fixture.adapter("sqlite").list_tables("main").unwrap();
    assert!(tables.contains("rich"));
}

#[test]
fn test_columns_carry_foreign_keys() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let columns = fixture.adapter("sqlite").list_columns("main", "employees").unwrap();

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "dept_id", "salary", "hired"]);

    let dept = &columns[2];
    assert_eq!(dept.value_type, ValueType::Numeric);
    assert_eq!(dept.fk_catalog.as_deref(), Some("main"));
    assert_eq!(dept.fk_table.as_deref(), Some("departments"));
    assert_eq!(dept.fk_column.as_deref(), Some("id"));

    assert_eq!(columns[1].value_type, ValueType::String);
    assert_eq!(columns[3].value_type, ValueType::Numeric);
    assert_eq!(columns[4].value_type, ValueType::Date);
    for column in [&columns[0], &columns[1], &columns[3], &columns[4]] {
        assert!(!column.has_foreign_key(), "{} has no imported key", column.name);
    }
}

#[test]
fn test_table_without_imported_keys() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let columns = fixture
        .adapter("sqlite")
        .list_columns("main", "departments")
        .unwrap();

    assert_eq!(columns.len(), 2);
    for column in &columns {
        assert_eq!(column.fk_catalog, None);
        assert_eq!(column.fk_table, None);
        assert_eq!(column.fk_column, None);
    }
}

#[test]
fn test_current_catalog_wins_over_catalog_list() {
    let source = ScriptedDataSource::numbered(1)
        .with_catalogs(&["sales", "hr", "ops"])
        .with_current_catalog("sales");
    let catalogs = MetadataIntrospector::new(&source).list_catalogs().unwrap();
    assert_eq!(catalogs.into_iter().collect::<Vec<_>>(), vec!["sales"]);
}

#[test]
fn test_blank_current_catalog_lists_all() {
    let source = ScriptedDataSource::numbered(1)
        .with_catalogs(&["sales", "hr", "ops", "hr"])
        .with_current_catalog("  ");
    let catalogs = MetadataIntrospector::new(&source).list_catalogs().unwrap();
    assert_eq!(
        catalogs.into_iter().collect::<Vec<_>>(),
        vec!["hr", "ops", "sales"]
    );
}

#[test]
fn test_foreign_key_match_is_case_sensitive() {
    let source = ScriptedDataSource::numbered(1)
        .with_imported_key("ID", "other", "pk")
        .with_imported_key("name", "labels", "label");
    let columns = MetadataIntrospector::new(&source)
        .list_columns("main", "numbers")
        .unwrap();

    assert!(!columns[0].has_foreign_key());
    assert_eq!(columns[1].fk_table.as_deref(), Some("labels"));
    assert_eq!(columns[1].fk_column.as_deref(), Some("label"));
}

#[test]
fn test_each_call_uses_its_own_connection() {
    let source = ScriptedDataSource::numbered(1);
    let introspector = MetadataIntrospector::new(&source);

    introspector.list_catalogs().unwrap();
    introspector.list_tables("main").unwrap();
    introspector.list_columns("main", "numbers").unwrap();

    assert_eq!(source.connection_count(), 3);
}
