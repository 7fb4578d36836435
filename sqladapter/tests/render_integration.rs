// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Rendered SQL executed against SQLite

#[path = "testutils/mod.rs"]
mod testutils;

use sqladapter::{
    AdapterConfig, AdapterError, AggregateFunction, DriverInfo, ExecuteParams, FilterOperator,
    PageInfo, QueryScript, RenderMode, ScriptVariable, SingleTypedValue, SortDirection,
    SourceAdapter, SqlOperator, SqlScriptRender, Value, ValueType,
};
use std::sync::Arc;
use testutils::scripted_driver::ScriptedDataSource;
use testutils::sqlite_fixture::SqliteFixture;

fn first_page() -> ExecuteParams {
    ExecuteParams::new(PageInfo::new(1, 100, false))
}

#[test]
fn test_quoted_string_variable_round_trips() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");

    for text in ["O'Brien", "it''s", r"C:\temp\new", "plain"] {
        let script = QueryScript::new("SELECT $who$ AS who")
            .with_variable(ScriptVariable::new("who", ValueType::String).with_value(text));
        let df = adapter.execute(&script, &mut first_page()).unwrap();
        assert_eq!(df.get(0, "who"), Some(&Value::from(text)));
    }
}

#[test]
fn test_string_filter_with_embedded_quote() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let script = QueryScript::new("SELECT id, name FROM employees");
    let mut params = first_page().filter(
        FilterOperator::new("name", SqlOperator::Equals)
            .with_value(SingleTypedValue::string("O'Brien")),
    );

    let df = adapter.execute(&script, &mut params).unwrap();

    assert_eq!(df.row_count(), 1);
    assert_eq!(df.get(0, "id"), Some(&Value::Integer(3)));
}

#[test]
fn test_multi_valued_and_empty_variables() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");

    let script = QueryScript::new("SELECT id FROM people WHERE id IN ($ids$) ORDER BY id")
        .with_variable(ScriptVariable::new("ids", ValueType::Numeric).with_values(["3", "5", "7"]));
    let df = adapter.execute(&script, &mut first_page()).unwrap();
    let ids: Vec<Value> = df.rows().iter().map(|r| r[0].clone()).collect();
    assert_eq!(ids, vec![Value::Integer(3), Value::Integer(5), Value::Integer(7)]);

    let script = QueryScript::new("SELECT $nothing$ AS v")
        .with_variable(ScriptVariable::new("nothing", ValueType::String));
    let df = adapter.execute(&script, &mut first_page()).unwrap();
    assert_eq!(df.get(0, "v"), Some(&Value::Null));
}

#[test]
fn test_date_variable_compares_as_timestamp_text() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let script = QueryScript::new("SELECT name FROM employees WHERE hired >= $since$ ORDER BY hired")
        .with_variable(ScriptVariable::new("since", ValueType::Date).with_value("2022-01-01"));

    let df = adapter.execute(&script, &mut first_page()).unwrap();

    let names: Vec<&str> = df.rows().iter().filter_map(|r| r[0].as_str()).collect();
    assert_eq!(names, vec!["Dana", "Eve"]);
}

#[test]
fn test_grouped_aggregation_with_having_and_count() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let script = QueryScript::new("SELECT dept_id, salary FROM employees");
    let mut params = ExecuteParams::new(PageInfo::new(1, 10, true))
        .group_by("dept_id")
        .aggregate(AggregateFunction::Sum, "salary", Some("total_salary"))
        .filter(FilterOperator::new("dept_id", SqlOperator::IsNotNull))
        .filter(
            FilterOperator::new("salary", SqlOperator::GreaterThan)
                .with_value(SingleTypedValue::numeric(100))
                .with_aggregate(AggregateFunction::Sum),
        )
        .order_by("dept_id", SortDirection::Desc);

    let df = adapter.execute(&script, &mut params).unwrap();

    let names: Vec<&str> = df.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["dept_id", "total_salary"]);
    assert_eq!(
        df.rows(),
        &[
            vec![Value::Integer(2), Value::Real(210.0)],
            vec![Value::Integer(1), Value::Real(180.0)],
        ]
    );
    assert_eq!(params.page_info.total, Some(2));
}

#[test]
fn test_count_over_grouped_and_ordered_script() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let script = QueryScript::new(
        "SELECT dept_id, COUNT(*) AS n FROM employees GROUP BY dept_id ORDER BY n DESC;",
    );
    let mut params = ExecuteParams::new(PageInfo::new(1, 2, true));

    let df = adapter.execute(&script, &mut params).unwrap();

    assert_eq!(df.row_count(), 2);
    assert_eq!(params.page_info.total, Some(4));
}

#[test]
fn test_count_only_matches_plain_row_count() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let dialect = adapter.dialect();
    let script = QueryScript::new("SELECT * FROM people ORDER BY name DESC");

    let cases = vec![
        ExecuteParams::default(),
        ExecuteParams::default().select("id"),
        ExecuteParams::default().filter(
            FilterOperator::new("id", SqlOperator::Between)
                .with_value(SingleTypedValue::numeric(5))
                .with_value(SingleTypedValue::numeric(9)),
        ),
        ExecuteParams::default()
            .aggregate(AggregateFunction::Count, "*", Some("n"))
            .group_by("name"),
    ];

    for params in cases {
        let render = SqlScriptRender::new(&script, &params, &dialect.descriptor);
        let plain = adapter.execute_sql(&render.render(RenderMode::Plain).unwrap()).unwrap();
        let count = adapter
            .execute_sql(&render.render(RenderMode::CountOnly).unwrap())
            .unwrap();

        assert_eq!(count.row_count(), 1);
        assert_eq!(count.column_count(), 1);
        assert_eq!(
            count.rows()[0][0].as_count(),
            Some(plain.row_count() as u64)
        );
    }
}

#[test]
fn test_render_errors_happen_before_any_round_trip() {
    let source = ScriptedDataSource::numbered(5);
    let adapter = SourceAdapter::new(
        AdapterConfig::new(DriverInfo::new("sqlite")),
        Arc::new(source.clone()),
    )
    .unwrap();

    let undefined = QueryScript::new("SELECT * FROM numbers WHERE id = $id$");
    let err = adapter.execute(&undefined, &mut first_page()).unwrap_err();
    assert!(matches!(err, AdapterError::Render(_)));

    let keyword = QueryScript::new("SELECT * FROM numbers ORDER BY id $dir$")
        .with_variable(ScriptVariable::new("dir", ValueType::Keyword).with_value("DESC"));
    let err = adapter.execute(&keyword, &mut first_page()).unwrap_err();
    assert!(matches!(err, AdapterError::Render(_)));

    assert_eq!(source.connection_count(), 0);
    assert!(source.queries().is_empty());
}

#[test]
fn test_dollar_words_inside_literals_are_data() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let adapter = fixture.adapter("sqlite");
    let script = QueryScript::new("SELECT '$USD$' AS currency /* priced in $USD$ */");

    let mut params = ExecuteParams::new(PageInfo::new(1, 10, false));
    let df = adapter.execute(&script, &mut params).unwrap();

    assert_eq!(df.row_count(), 1);
    assert_eq!(df.get(0, "currency"), Some(&Value::from("$USD$")));
}

#[test]
fn test_trailing_line_comment_pages_and_counts() {
    let fixture = SqliteFixture::standard().expect("Failed to create fixture");
    let script = QueryScript::new("SELECT id, name FROM people ORDER BY id -- all people");

    for db_type in ["sqlite", "mssql"] {
        let adapter = fixture.adapter(db_type);
        let mut params = ExecuteParams::new(PageInfo::new(3, 10, true));

        let df = adapter.execute(&script, &mut params).unwrap();

        assert_eq!(df.row_count(), 5, "{}", db_type);
        assert_eq!(df.get(0, "id"), Some(&Value::Integer(21)), "{}", db_type);
        assert_eq!(params.page_info.total, Some(25), "{}", db_type);
    }
}
