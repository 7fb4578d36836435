// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for table, JSON and CSV output

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{json, Map, Value as JsonValue};
use sqladapter::{Column, Dataframe, Value};

use super::commands::OutputFormat;

pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format(dataframe: &Dataframe, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(dataframe),
            OutputFormat::Json => Self::format_json(dataframe),
            OutputFormat::Csv => Self::format_csv(dataframe),
        }
    }

    /// Column metadata as rows of name, type and foreign-key reference
    pub fn format_columns(columns: &[Column], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(columns).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
            }
            OutputFormat::Csv => {
                let mut out = String::from("name,type,references\n");
                for column in columns {
                    out.push_str(&csv_line(&[
                        column.name.clone(),
                        column.value_type.to_string(),
                        reference(column),
                    ]));
                }
                out
            }
            OutputFormat::Table => {
                let mut table = new_table();
                table.set_header(vec!["Column", "Type", "References"]);
                for column in columns {
                    table.add_row(vec![
                        column.name.clone(),
                        column.value_type.to_string(),
                        reference(column),
                    ]);
                }
                table.to_string()
            }
        }
    }

    fn format_table(dataframe: &Dataframe) -> String {
        if dataframe.columns().is_empty() {
            return "(no columns)".to_string();
        }
        let mut table = new_table();
        table.set_header(
            dataframe
                .columns()
                .iter()
                .map(|c| format!("{}\n{}", c.name, c.value_type))
                .collect::<Vec<_>>(),
        );
        for row in dataframe.rows() {
            table.add_row(row.iter().map(cell).collect::<Vec<_>>());
        }
        let mut out = table.to_string();
        out.push_str(&format!("\n{} row(s)", dataframe.row_count()));
        out
    }

    fn format_json(dataframe: &Dataframe) -> String {
        let rows: Vec<JsonValue> = dataframe
            .rows()
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (column, value) in dataframe.columns().iter().zip(row) {
                    object.insert(
                        column.name.clone(),
                        serde_json::to_value(value).unwrap_or(JsonValue::Null),
                    );
                }
                JsonValue::Object(object)
            })
            .collect();

        let document = json!({
            "columns": dataframe.columns(),
            "rows": rows,
            "pageInfo": dataframe.page_info,
            "script": dataframe.script,
        });
        serde_json::to_string_pretty(&document)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn format_csv(dataframe: &Dataframe) -> String {
        let header: Vec<String> = dataframe.columns().iter().map(|c| c.name.clone()).collect();
        let mut out = csv_line(&header);
        for row in dataframe.rows() {
            let fields: Vec<String> = row
                .iter()
                .map(|v| if v.is_null() { String::new() } else { v.to_string() })
                .collect();
            out.push_str(&csv_line(&fields));
        }
        out
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

fn reference(column: &Column) -> String {
    match (&column.fk_table, &column.fk_column) {
        (Some(table), Some(pk)) => match &column.fk_catalog {
            Some(catalog) => format!("{}.{}.{}", catalog, table, pk),
            None => format!("{}.{}", table, pk),
        },
        (Some(table), None) => table.clone(),
        _ => String::new(),
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}
