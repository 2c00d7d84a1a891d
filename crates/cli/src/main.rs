//! OpenAPI Provider Analyzer CLI
//!
//! Command-line interface for deriving terraform-style resources from
//! Swagger 2.0 documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use openapi_provider_analyzer_common::{AnalysisReport, AnalyzerConfig, Rejection};
use openapi_provider_analyzer_parser::SwaggerParser;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-provider-analyzer")]
#[command(version, about = "Derive terraform-style resources from Swagger 2.0 documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and display the derived resources
    #[command(after_help = "EXAMPLES:\n  \
        # Analyze a YAML document\n  \
        openapi-provider-analyzer analyze --spec swagger.yaml\n\n  \
        # Use an analyzer configuration and emit JSON\n  \
        openapi-provider-analyzer analyze --spec swagger.json --config analyzer.yaml --format json")]
    Analyze {
        /// Path to the Swagger 2.0 document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Analyzer configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human readable summary
    Text,
    /// Full analysis report as JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            spec,
            config,
            format,
        } => {
            analyze_command(spec.as_path(), config.as_deref(), format, cli.verbose)?;
        },
    }

    Ok(())
}

/// Logs go to stderr so JSON output stays parseable
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn analyze_command(
    spec_path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let parser = SwaggerParser::from_file(spec_path)
        .with_context(|| format!("Failed to load Swagger document {}", spec_path.display()))?
        .with_config(config);
    let report = parser.analyze().context("Failed to analyze Swagger document")?;

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        },
        OutputFormat::Text => print_report(spec_path, &report, verbose),
    }

    Ok(())
}

fn print_report(spec_path: &Path, report: &AnalysisReport, verbose: bool) {
    println!("{} Analyzed: {}", "→".cyan(), spec_path.display());
    println!("\n{}", "✓ Analysis successful!".green().bold());

    println!("\n{}", "Backend:".bold());
    println!(
        "  Host: {}",
        report.backend.host.as_deref().unwrap_or("-").yellow()
    );
    println!("  Base path: {}", report.backend.base_path);
    println!("  Scheme: {}", report.backend.scheme);

    println!("\n{} {}", "Resources:".bold(), report.resources.len());
    for resource in &report.resources {
        let mut line = format!(
            "  • {} ({}) {}",
            resource.name.cyan(),
            resource.operations.crud_marker(),
            resource.instance_path
        );
        if let Some(region) = &resource.region {
            line.push_str(&format!(" [region: {}]", region.yellow()));
        }
        if resource.ignored {
            line.push_str(&format!(" {}", "[ignored]".dimmed()));
        }
        println!("{}", line);

        if verbose {
            if let Some(host) = &resource.host {
                println!("    Host: {}", host);
            }
            if let Some(parent) = &resource.parent {
                println!("    Parents: {}", parent.parent_names.join(", "));
            }
            let identifiers: Vec<&str> = resource.identifiers().map(|f| f.name.as_str()).collect();
            println!("    Identifier: {}", identifiers.join(", "));
            for field in &resource.schema {
                println!(
                    "    - {}: {}{}{}",
                    field.name,
                    field.field_type.label(),
                    if field.required { " (required)" } else { "" },
                    if field.read_only { " (computed)" } else { "" }
                );
            }
        }
    }

    println!("\n{} {}", "Data sources:".bold(), report.data_sources.len());
    for data_source in &report.data_sources {
        println!("  • {} {}", data_source.name.cyan(), data_source.path);
    }

    println!(
        "\n{} {}",
        "Security definitions:".bold(),
        report.security_definitions.len()
    );
    for definition in &report.security_definitions {
        println!(
            "  • {} ({:?}{}, {})",
            definition.name().cyan(),
            definition.location(),
            if definition.is_bearer() { " bearer" } else { "" },
            definition.parameter()
        );
    }
    if !report.global_security.is_empty() {
        let names: Vec<&str> = report
            .global_security
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        println!("  Global: {}", names.join(", ").yellow());
    }

    if !report.header_parameters.is_empty() {
        println!("\n{}", "Header parameters:".bold());
        for header in &report.header_parameters {
            println!(
                "  • {} → {}{}",
                header.name,
                header.terraform_name.cyan(),
                if header.required { " (required)" } else { "" }
            );
        }
    }

    print_rejections("resource", &report.rejected_resources, verbose);
    print_rejections("data source", &report.rejected_data_sources, verbose);
}

fn print_rejections<E: Display>(kind: &str, rejections: &[Rejection<E>], verbose: bool) {
    for line in rejection_lines(kind, rejections, verbose) {
        println!("{}", line);
    }
}

fn rejection_lines<E: Display>(
    kind: &str,
    rejections: &[Rejection<E>],
    verbose: bool,
) -> Vec<String> {
    if rejections.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!(
        "\n{} {} {} candidates rejected",
        "⚠".yellow(),
        rejections.len(),
        kind
    )];
    if verbose {
        lines.extend(
            rejections
                .iter()
                .map(|rejection| format!("  • {}: {}", rejection.path.red(), rejection.reason)),
        );
    } else {
        lines.push("  Run with --verbose to list the reasons".to_string());
    }
    lines
}
