// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SqlAdapter command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        cli.log_level
            .map(|l| l.to_level_filter())
            .unwrap_or(log::LevelFilter::Warn)
    };
    env_logger::Builder::new().filter_level(level).init();

    let result = match cli.command {
        Commands::Version => cli::handle_version(),
        Commands::Query {
            script,
            source,
            page,
            size,
            count,
            vars,
            format,
        } => cli::handle_query(script, source, page, size, count, vars, format),
        Commands::Catalogs { source } => cli::handle_catalogs(source),
        Commands::Tables { catalog, source } => cli::handle_tables(catalog, source),
        Commands::Columns {
            catalog,
            table,
            source,
            format,
        } => cli::handle_columns(catalog, table, source, format),
        Commands::Dialect {
            db_type,
            dialect,
            quote,
            paging,
        } => cli::handle_dialect(db_type, dialect, quote, paging),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
