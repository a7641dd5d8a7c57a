//! layoutchain CLI.
//!
//! Commands:
//! - `layoutchain resolve [root]`: print `file -> [layouts..., file]` for every content file
//! - `layoutchain generate <dir>`: write a synthetic nested dataset
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use layoutchain::generate::{generate_dataset, DatasetSpec};
use layoutchain::{LayoutMap, ResolverConfig, ResolverOverrides};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("layoutchain=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(result_to_exit(dispatch_command(cli)));
}

fn dispatch_command(cli: Cli) -> anyhow::Result<()> {
    let overrides = cli.command.overrides();
    match cli.command {
        Commands::Resolve {
            root,
            config,
            relative,
            json,
            ..
        } => run_resolve(&root, config.as_deref(), overrides, relative, json),
        Commands::Generate { dir, dirs, depth } => run_generate(&dir, DatasetSpec::new(dirs, depth)),
    }
}

/// Convert a command result to an exit code, reporting the error chain on stderr.
fn result_to_exit(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_resolve(
    root: &Path,
    config_file: Option<&Path>,
    overrides: ResolverOverrides,
    relative: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = ResolverConfig::load_with(config_file, overrides)
        .context("failed to load configuration")?;

    let mut layouts = config
        .resolver()
        .resolve(root)
        .with_context(|| format!("failed to resolve layouts under '{}'", root.display()))?;
    if relative {
        layouts = layouts.relative_to(root);
    }

    tracing::debug!("Resolved {} content files", layouts.len());

    let mut stdout = io::stdout().lock();
    stdout.write_all(render(&layouts, json)?.as_bytes())?;
    Ok(())
}

/// One `file -> [chain]` line per content file sorted by identifier, or a JSON object.
fn render(layouts: &LayoutMap, json: bool) -> anyhow::Result<String> {
    if json {
        let mut output = serde_json::to_string_pretty(layouts)?;
        output.push('\n');
        return Ok(output);
    }

    let mut output = String::new();
    for (file, chain) in layouts.sorted() {
        output.push_str(&format!("{file} -> {chain}\n"));
    }
    Ok(output)
}

fn run_generate(dir: &Path, spec: DatasetSpec) -> anyhow::Result<()> {
    let written = generate_dataset(dir, spec)
        .with_context(|| format!("failed to generate dataset in '{}'", dir.display()))?;
    println!("{written} html content files written to {}", dir.display());
    Ok(())
}
