// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for SqlAdapter

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use sqladapter::dialect::registered_dialects;
use sqladapter::{
    global_resolver, AdapterConfig, DriverInfo, ExecuteParams, PageInfo, QueryScript,
    ScriptVariable, SourceAdapter,
};

use super::commands::{merge_variables, OutputFormat, SourceArgs};
use super::output::ResultFormatter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Build an adapter from a config file and/or command-line overrides
fn build_adapter(source: &SourceArgs) -> Result<SourceAdapter, Box<dyn std::error::Error>> {
    let mut config = match &source.config {
        Some(path) => AdapterConfig::from_json_file(path)?,
        None => AdapterConfig::new(DriverInfo::new(source.db_type.clone())),
    };
    if let Some(db) = &source.db {
        config.properties.url = db.to_string_lossy().into_owned();
    }
    if let Some(dialect) = &source.dialect {
        config.driver.sql_dialect = Some(dialect.clone());
    }
    if config.properties.url.is_empty() {
        return Err("No database given. Use --db <path> or a config file with properties.url".into());
    }
    log::debug!("Opening source {}", config.properties.url);
    Ok(SourceAdapter::sqlite(config)?)
}

/// Handle the query command
pub fn handle_query(
    script: String,
    source: SourceArgs,
    page: u64,
    size: u64,
    count: bool,
    vars: Vec<ScriptVariable>,
    format: OutputFormat,
) -> CliResult {
    let adapter = build_adapter(&source)?;

    let mut query = QueryScript::new(script).with_source_id(adapter.config().properties.url.clone());
    for var in merge_variables(vars) {
        query = query.with_variable(var);
    }
    let mut params = ExecuteParams::new(PageInfo::new(page, size, count));

    let dataframe = adapter.execute(&query, &mut params)?;
    println!("{}", ResultFormatter::format(&dataframe, format));

    if format == OutputFormat::Table {
        let mut status = format!("Page {} ({} rows per page)", page, size);
        if let Some(total) = params.page_info.total {
            status.push_str(&format!(", {} rows in total", total));
        }
        println!("{}", status.dimmed());
        if let Some(sql) = &dataframe.script {
            log::info!("Executed: {}", sql);
        }
    }
    Ok(())
}

/// Handle the catalogs command
pub fn handle_catalogs(source: SourceArgs) -> CliResult {
    let adapter = build_adapter(&source)?;
    for catalog in adapter.list_catalogs()? {
        println!("{}", catalog);
    }
    Ok(())
}

/// Handle the tables command
pub fn handle_tables(catalog: String, source: SourceArgs) -> CliResult {
    let adapter = build_adapter(&source)?;
    let tables = adapter.list_tables(&catalog)?;
    if tables.is_empty() {
        println!("{}", format!("No tables in catalog '{}'", catalog).yellow());
    }
    for table in tables {
        println!("{}", table);
    }
    Ok(())
}

/// Handle the columns command
pub fn handle_columns(
    catalog: String,
    table: String,
    source: SourceArgs,
    format: OutputFormat,
) -> CliResult {
    let adapter = build_adapter(&source)?;
    let columns = adapter.list_columns(&catalog, &table)?;
    if columns.is_empty() {
        return Err(format!("Table '{}.{}' not found or has no columns", catalog, table).into());
    }
    println!("{}", ResultFormatter::format_columns(&columns, format));
    Ok(())
}

/// Handle the dialect command
pub fn handle_dialect(
    db_type: Option<String>,
    dialect: Option<String>,
    quote: Option<String>,
    paging: bool,
) -> CliResult {
    let Some(db_type) = db_type else {
        println!("{}", "Registered dialects:".bold().green());
        for tag in registered_dialects() {
            println!("  {}", tag.cyan());
        }
        return Ok(());
    };

    let mut driver = DriverInfo::new(db_type).with_paging(paging);
    if let Some(tag) = dialect {
        driver = driver.with_sql_dialect(tag);
    }
    if let Some(quote) = quote {
        driver = driver.with_identifier_quote(quote);
    }
    AdapterConfig::new(driver.clone()).validate()?;

    let resolution = global_resolver().resolve(&driver);
    let descriptor = &resolution.descriptor;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Property", "Value"]);
    table.add_row(vec!["dialect".to_string(), descriptor.name.clone()]);
    table.add_row(vec!["product".to_string(), descriptor.product.to_string()]);
    table.add_row(vec!["resolved via".to_string(), format!("{:?}", resolution.source)]);
    table.add_row(vec![
        "quotes".to_string(),
        format!("{}{}", descriptor.quote_start, descriptor.quote_end),
    ]);
    table.add_row(vec!["casing".to_string(), format!("{:?}", descriptor.casing)]);
    table.add_row(vec!["pagination".to_string(), format!("{:?}", descriptor.pagination)]);
    table.add_row(vec![
        "timestamp literal".to_string(),
        format!("{:?}", descriptor.timestamp_literal),
    ]);
    table.add_row(vec![
        "AS before alias".to_string(),
        descriptor.table_alias_as.to_string(),
    ]);
    println!("{}", table);

    for warning in &resolution.warnings {
        println!("{}", format!("Warning: {}", warning).yellow());
    }
    Ok(())
}

/// Handle the version command
pub fn handle_version() -> CliResult {
    println!(
        "{} {}",
        "sqladapter".bold().green(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Registered dialects: {}", registered_dialects().join(", "));
    Ok(())
}
