// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for SqlAdapter

use clap::{Args, Parser, Subcommand, ValueEnum};
use sqladapter::{ScriptVariable, ValueType};
use std::path::PathBuf;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// SqlAdapter CLI - dialect-aware paged queries over SQL sources
#[derive(Parser)]
#[command(name = "sqladapter")]
#[command(about = "SqlAdapter - render, page and materialize SQL query scripts")]
#[command(version)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find the source and how to identify its dialect
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Adapter configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Driver identity used for dialect resolution
    #[arg(long = "db-type", default_value = "sqlite")]
    pub db_type: String,

    /// Explicit dialect tag overriding the driver identity
    #[arg(long)]
    pub dialect: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// Render and execute a query script
    Query {
        /// The query script; `$name$` placeholders are filled from --var
        script: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u64,

        /// Rows per page
        #[arg(long, default_value_t = 100)]
        size: u64,

        /// Also compute the total row count
        #[arg(long)]
        count: bool,

        /// Script variable as name=type:value; repeat a name for multiple values
        #[arg(long = "var", value_parser = parse_variable)]
        vars: Vec<ScriptVariable>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List catalogs of a source
    Catalogs {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List tables and views of a catalog
    Tables {
        /// Catalog name
        catalog: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Describe the columns of a table
    Columns {
        /// Catalog name
        catalog: String,

        /// Table name
        table: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show how a driver identity resolves to a dialect
    Dialect {
        /// Driver identity; lists registered dialects when omitted
        db_type: Option<String>,

        /// Explicit dialect tag
        #[arg(long)]
        dialect: Option<String>,

        /// Identifier quote for the generic dialect
        #[arg(long)]
        quote: Option<String>,

        /// Let the generic dialect emit LIMIT/OFFSET
        #[arg(long)]
        paging: bool,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Parse `name=type:value` or `name=value` (string)
pub fn parse_variable(s: &str) -> Result<ScriptVariable, String> {
    let (name, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected name=type:value, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Variable name missing in '{}'", s));
    }

    let (value_type, value) = match rest.split_once(':') {
        Some((ty, value)) => match ty.parse::<ValueType>() {
            Ok(value_type) => (value_type, value),
            // `name=12:30` is a string that happens to contain a colon
            Err(_) => (ValueType::String, rest),
        },
        None => (ValueType::String, rest),
    };
    Ok(ScriptVariable::new(name, value_type).with_value(value))
}

/// Merge repeated variables into one multi-valued variable, keeping first-seen order
pub fn merge_variables(vars: Vec<ScriptVariable>) -> Vec<ScriptVariable> {
    let mut merged: Vec<ScriptVariable> = Vec::new();
    for var in vars {
        match merged.iter_mut().find(|m| m.name == var.name) {
            Some(existing) => existing.values.extend(var.values),
            None => merged.push(var),
        }
    }
    merged
}
