use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::config::{load_config_for, ErrorCodeScope, GeneratorConfig, UnmappedPolicy};
use crate::error::{print_issues, GenerationError};
use crate::generator::{
    generate, render_report, serialize_artifacts, write_artifacts, write_report, Generation,
    OutputFormat,
};
use crate::schema::{load_schema, load_schema_file};

/// Command-line interface for routegen
///
/// Reads an annotated schema document and emits routing, binding and error
/// artifacts.
#[derive(Parser, Debug)]
#[command(name = "routegen", version)]
#[command(about = "Route, binding and error-contract generator", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides ROUTEGEN_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings that override `routegen.toml`
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Path to the generator config (routegen.toml)
    /// If not provided, will auto-detect alongside the schema
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generic-option key whose text value names the operation
    #[arg(long)]
    pub options_key: Option<String>,

    /// HTTP status for error values without one
    #[arg(long)]
    pub fallback_status: Option<u16>,

    /// Handling of methods with neither HTTP mapping nor options
    #[arg(long, value_enum)]
    pub unmapped: Option<UnmappedPolicy>,

    /// Uniqueness scope of enum error codes
    #[arg(long, value_enum)]
    pub error_code_scope: Option<ErrorCodeScope>,

    /// Maximum depth of dotted path field references
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl ConfigArgs {
    /// Resolve the config file for `schema` and apply the flag overrides
    pub fn resolve(&self, schema: &Path) -> anyhow::Result<GeneratorConfig> {
        let mut config = load_config_for(self.config.as_deref(), schema)?;
        if let Some(key) = &self.options_key {
            config.options_key = key.clone();
        }
        if let Some(status) = self.fallback_status {
            config.fallback_status = status;
        }
        if let Some(policy) = self.unmapped {
            config.unmapped = policy;
        }
        if let Some(scope) = self.error_code_scope {
            config.error_code_scope = scope;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        config.validate().context("Invalid generator settings")?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the artifact bundle from a schema document
    Generate {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output directory for the artifact bundle
        #[arg(short, long, default_value = "gen")]
        output: PathBuf,

        /// Serialization format of the bundle
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the artifacts even if some methods failed
        #[arg(long, default_value_t = false)]
        allow_partial: bool,

        /// Also write a human-readable route report (routes.txt)
        #[arg(long, default_value_t = false)]
        report: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Load and generate without writing anything, reporting every issue
    Check {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the route report, or the full artifact bundle, to stdout
    Inspect {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Print the serialized bundle instead of the report
        #[arg(long, value_enum)]
        dump: Option<OutputFormat>,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

impl Commands {
    pub fn schema(&self) -> &Path {
        match self {
            Commands::Generate { schema, .. }
            | Commands::Check { schema, .. }
            | Commands::Inspect { schema, .. } => schema,
        }
    }
}

/// Load, normalize and generate, printing issues on failure
///
/// `Ok(None)` means issues were found and already printed.
fn load_and_generate(schema: &Path, config: &GeneratorConfig) -> anyhow::Result<Option<Generation>> {
    let raw = load_schema_file(schema)?;
    let ir = match load_schema(&raw) {
        Ok(ir) => ir,
        Err(issues) => {
            print_issues(issues.issues());
            return Ok(None);
        }
    };
    match generate(&ir, config) {
        Ok(generation) => Ok(Some(generation)),
        Err(issues) => {
            print_issues(issues.issues());
            Ok(None)
        }
    }
}

fn print_failures(failures: &[GenerationError]) {
    for failure in failures {
        warn!(%failure, "Method or enum skipped");
    }
}

/// Execute a parsed command line
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let schema = cli.command.schema();
    match &cli.command {
        Commands::Generate {
            output,
            format,
            allow_partial,
            report,
            config,
            ..
        } => {
            let config = config.resolve(schema)?;
            let Some(generation) = load_and_generate(schema, &config)? else {
                return Ok(ExitCode::FAILURE);
            };
            if !generation.is_complete() {
                if !*allow_partial {
                    print_issues(&generation.failures);
                    return Ok(ExitCode::FAILURE);
                }
                print_failures(&generation.failures);
            }
            let path = write_artifacts(output, &generation.artifacts, *format)?;
            if *report {
                write_report(output, &generation.artifacts)?;
            }
            println!(
                "✅ Generated {} operation(s) into {}",
                generation.artifacts.operations.len(),
                path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { config, .. } => {
            let config = config.resolve(schema)?;
            let Some(generation) = load_and_generate(schema, &config)? else {
                return Ok(ExitCode::FAILURE);
            };
            if !generation.is_complete() {
                print_issues(&generation.failures);
                return Ok(ExitCode::FAILURE);
            }
            info!(schema = %schema.display(), "Schema check passed");
            println!(
                "✅ {}: {} operation(s), {} error contract(s)",
                schema.display(),
                generation.artifacts.operations.len(),
                generation.artifacts.errors.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect { dump, config, .. } => {
            let config = config.resolve(schema)?;
            let Some(generation) = load_and_generate(schema, &config)? else {
                return Ok(ExitCode::FAILURE);
            };
            print_failures(&generation.failures);
            let out = match dump {
                Some(format) => serialize_artifacts(&generation.artifacts, *format)?,
                None => render_report(&generation.artifacts)?,
            };
            print!("{out}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
