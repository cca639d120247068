//! CLI command handling for ngmill

mod classes;
mod imports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ngmill_ast::ParseOptions;
use ngmill_config::AppConfig;
use ngmill_lang_angular::DecoratorKind;
use std::path::PathBuf;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "ngmill")]
#[command(about = "Angular-aware import and decorator codemods for TypeScript sources")]
#[command(version)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List Angular classes (components, directives, pipes, injectables, modules)
    Classes {
        /// Only list classes carrying this decorator (e.g. "component", "NgModule")
        #[arg(long)]
        kind: Option<DecoratorKind>,

        /// File or project directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Ensure named imports exist in each file
    AddImport {
        #[command(flatten)]
        edit: ImportEditArgs,

        /// Names to import, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        names: Vec<String>,
    },
    /// Remove named imports, dropping declarations left without named imports
    RemoveImport {
        #[command(flatten)]
        edit: ImportEditArgs,

        /// Names to remove, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        names: Vec<String>,
    },
    /// Remove named imports of a module that are never referenced
    PruneImports {
        #[command(flatten)]
        edit: ImportEditArgs,
    },
}

/// Arguments shared by the import editing commands
#[derive(clap::Args)]
pub struct ImportEditArgs {
    /// Module specifier, as written in the import (e.g. "@angular/core")
    #[arg(long)]
    pub module: String,

    /// Write changes back to the files instead of printing them
    #[arg(long)]
    pub write: bool,

    /// Files to edit
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Main CLI entry point
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    ngmill_config::logging::initialize(&config)?;
    let options = ParseOptions::from(&config.parser);

    match cli.command {
        Commands::Classes { kind, path, format } => {
            classes::handle_classes(&config, &options, &path, kind, &format)
        }
        Commands::AddImport { edit, names } => imports::handle_add(&options, &edit, names),
        Commands::RemoveImport { edit, names } => imports::handle_remove(&options, &edit, &names),
        Commands::PruneImports { edit } => imports::handle_prune(&options, &edit),
    }
}
