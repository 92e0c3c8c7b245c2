//! variantkit - build CI build variant documents from the command line
//!
//! ## Commands
//!
//! - `build`: assemble a variant from flags (optionally on top of a base document)
//! - `fmt`: load a document and re-render it in minimal form

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

use variantkit_core::{
    load_variant, parse_display_task_arg, parse_expansion_arg, render, write_variant,
    DisplayTaskDefinition, DocumentFormat, Variant,
};

#[derive(Parser)]
#[command(name = "variantkit")]
#[command(author = "Stevedores Org")]
#[command(version = variantkit_core::VERSION)]
#[command(about = "Build CI build variant documents", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a variant from flags and render it
    Build {
        /// Existing document to start from (format taken from its extension)
        #[arg(long)]
        base: Option<PathBuf>,

        #[command(flatten)]
        fields: VariantFields,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-render a variant document in minimal form
    Fmt {
        /// Document to load
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Default)]
struct VariantFields {
    /// Variant identifier
    #[arg(long)]
    name: Option<String>,

    /// Human-readable variant name
    #[arg(long)]
    display_name: Option<String>,

    /// Batch interval in seconds
    #[arg(long, allow_negative_numbers = true)]
    batch_time: Option<i64>,

    /// Cron expression for batch scheduling
    #[arg(long)]
    cron: Option<String>,

    /// Stepback override (omit to inherit)
    #[arg(long)]
    stepback: Option<bool>,

    /// Activate the variant initially (omit to inherit)
    #[arg(long)]
    activate: Option<bool>,

    /// Disable the variant (omit to inherit)
    #[arg(long)]
    disable: Option<bool>,

    /// Allow the variant in patches (omit to inherit)
    #[arg(long)]
    patchable: Option<bool>,

    /// Only run the variant in patches (omit to inherit)
    #[arg(long)]
    patch_only: Option<bool>,

    /// Allow the variant for git tag versions (omit to inherit)
    #[arg(long)]
    allow_for_git_tag: Option<bool>,

    /// Only run the variant for git tag versions (omit to inherit)
    #[arg(long)]
    git_tag_only: Option<bool>,

    /// Distro to run on (replaces any existing run-on distro)
    #[arg(long)]
    run_on: Option<String>,

    /// Task to add (repeatable)
    #[arg(long = "task")]
    tasks: Vec<String>,

    /// Expansion as KEY=VALUE; VALUE is JSON when it parses (repeatable)
    #[arg(long = "expansion", value_parser = parse_expansion)]
    expansions: Vec<(String, serde_json::Value)>,

    /// Display task as NAME=task1,task2 (repeatable)
    #[arg(long = "display-task", value_parser = parse_display_task)]
    display_tasks: Vec<DisplayTaskDefinition>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format: json, yaml or toml
    #[arg(short, long, env = "VARIANTKIT_FORMAT")]
    format: Option<DocumentFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_expansion(arg: &str) -> std::result::Result<(String, serde_json::Value), String> {
    parse_expansion_arg(arg).map_err(|e| e.to_string())
}

fn parse_display_task(arg: &str) -> std::result::Result<DisplayTaskDefinition, String> {
    parse_display_task_arg(arg).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    variantkit_core::init_tracing(cli.json_logs, level);

    match cli.command {
        Commands::Build {
            base,
            fields,
            output,
        } => cmd_build(base.as_deref(), fields, &output),
        Commands::Fmt { path, output } => cmd_fmt(&path, &output),
    }
}

/// Build a variant from flags and emit it
fn cmd_build(base: Option<&Path>, fields: VariantFields, output: &OutputArgs) -> Result<()> {
    let mut variant = match base {
        Some(path) => load_variant(path)
            .with_context(|| format!("Failed to load base variant {:?}", path))?,
        None => Variant::new(),
    };

    apply_fields(&mut variant, fields);
    info!(
        variant = %variant.name,
        tasks = variant.task_specs.len(),
        display_tasks = variant.display_task_specs.len(),
        "Built variant"
    );

    let format = output.format.unwrap_or_default();
    emit(&variant, format, output.output.as_deref())
}

/// Load a document and re-render it
fn cmd_fmt(path: &Path, output: &OutputArgs) -> Result<()> {
    let variant =
        load_variant(path).with_context(|| format!("Failed to load variant {:?}", path))?;

    let format = match output.format {
        Some(format) => format,
        None => DocumentFormat::from_path(path)?,
    };
    emit(&variant, format, output.output.as_deref())
}

/// Apply flag values in a fixed order. Flags that were not given leave the
/// variant untouched; tri-state flags only ever set explicit overrides.
fn apply_fields(variant: &mut Variant, fields: VariantFields) {
    if let Some(name) = fields.name {
        variant.name(name);
    }
    if let Some(display_name) = fields.display_name {
        variant.display_name(display_name);
    }
    if let Some(batch_time) = fields.batch_time {
        variant.batch_time(batch_time);
    }
    if let Some(cron) = fields.cron {
        variant.set_cron_batch_time(cron);
    }

    let flags: [(Option<bool>, fn(&mut Variant, Option<bool>) -> &mut Variant); 7] = [
        (fields.stepback, Variant::set_stepback),
        (fields.activate, Variant::set_activate),
        (fields.disable, Variant::set_disable),
        (fields.patchable, Variant::set_patchable),
        (fields.patch_only, Variant::set_patch_only),
        (fields.allow_for_git_tag, Variant::set_allow_for_git_tag),
        (fields.git_tag_only, Variant::set_git_tag_only),
    ];
    for (value, set) in flags {
        if value.is_some() {
            set(variant, value);
        }
    }

    if let Some(distro) = fields.run_on {
        variant.run_on(distro);
    }
    variant.add_tasks(fields.tasks);
    for (key, value) in fields.expansions {
        debug!(key = %key, "Setting expansion");
        variant.expansion(key, value);
    }
    variant.display_tasks(fields.display_tasks);
}

fn emit(variant: &Variant, format: DocumentFormat, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => write_variant(path, variant, format)
            .with_context(|| format!("Failed to write {:?}", path))?,
        None => {
            let rendered = render(variant, format)
                .with_context(|| format!("Failed to render variant as {}", format))?;
            print!("{}", rendered);
        }
    }
    Ok(())
}
