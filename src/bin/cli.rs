use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use extguard::config::Config;
use extguard::error::GuardError;
use extguard::kb::{self, Grade};
use extguard::output::OutputFormat;
use extguard::report::AuditReport;
use extguard::store::fetch::WebStoreSource;
use extguard::store::manifest::listing_from_manifest;

#[derive(Parser)]
#[command(
    name = "extguard",
    about = "Chrome extension security auditor",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit an extension by ID or Chrome Web Store URL
    Audit {
        /// Extension ID (32 lowercase letters) or store URL
        input: String,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Fail (exit 1) when the grade is this bad or worse (A-F)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Audit a local extension manifest.json offline
    Manifest {
        /// Path to manifest.json
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Fail (exit 1) when the grade is this bad or worse (A-F)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the permission knowledge base
    Permissions {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .extguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit {
            input,
            config,
            format,
            fail_on,
            output,
        } => cmd_audit(input, config, format, fail_on, output),
        Commands::Manifest {
            path,
            config,
            format,
            fail_on,
            output,
        } => cmd_manifest(path, config, format, fail_on, output),
        Commands::Permissions { format } => cmd_permissions(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn parse_format(format_str: &str) -> OutputFormat {
    OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    })
}

fn parse_fail_on(fail_on_str: Option<String>) -> Option<Grade> {
    fail_on_str.and_then(|s| {
        let grade = Grade::from_str_lenient(&s);
        if grade.is_none() {
            eprintln!("Warning: unknown grade '{}', using config default", s);
        }
        grade
    })
}

/// Write the rendered report, then pick the exit code: 2 for a failed
/// audit, 1 when the grade trips the fail-on threshold, 0 otherwise.
fn finish(
    report: &AuditReport,
    format: OutputFormat,
    output_path: Option<PathBuf>,
    fail_on: Option<Grade>,
) -> Result<i32, GuardError> {
    let rendered = extguard::output::render(report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    if report.is_failure() {
        return Ok(2);
    }
    if let Some(threshold) = fail_on {
        if report.safety_grade >= threshold && report.safety_grade != Grade::Unknown {
            return Ok(1);
        }
    }
    Ok(0)
}

fn cmd_audit(
    input: String,
    config_path: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, GuardError> {
    let format = parse_format(&format_str);
    let config = Config::load(
        &config_path.unwrap_or_else(|| PathBuf::from(".extguard.toml")),
    )?;
    let fail_on = parse_fail_on(fail_on_str).or(config.policy.fail_on);

    let source = WebStoreSource::new(&config.fetch)?;
    let report = extguard::audit(&input, &source);

    finish(&report, format, output_path, fail_on)
}

fn cmd_manifest(
    path: PathBuf,
    config_path: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, GuardError> {
    let format = parse_format(&format_str);
    let config = Config::load(
        &config_path.unwrap_or_else(|| PathBuf::from(".extguard.toml")),
    )?;
    let fail_on = parse_fail_on(fail_on_str).or(config.policy.fail_on);

    let listing = listing_from_manifest(&path)?;
    let report = extguard::audit_permissions(&path.display().to_string(), &listing);

    finish(&report, format, output_path, fail_on)
}

fn cmd_permissions(format_str: String) -> Result<i32, GuardError> {
    match format_str.as_str() {
        "json" => {
            let entries: Vec<serde_json::Value> = kb::PERMISSIONS
                .iter()
                .map(|(name, entry)| {
                    serde_json::json!({
                        "name": name,
                        "risk_level": entry.risk,
                        "category": entry.category,
                        "description": entry.description,
                        "explanation": entry.explanation,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            println!(
                "{:<38} {:<10} {:<16} DESCRIPTION",
                "PERMISSION", "RISK", "CATEGORY"
            );
            println!("{}", "-".repeat(100));
            for (name, entry) in kb::PERMISSIONS {
                println!(
                    "{:<38} {:<10} {:<16} {}",
                    name,
                    entry.risk.to_string(),
                    entry.category.to_string(),
                    entry.description,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, GuardError> {
    let path = PathBuf::from(".extguard.toml");

    if path.exists() && !force {
        eprintln!(".extguard.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .extguard.toml");

    Ok(0)
}
