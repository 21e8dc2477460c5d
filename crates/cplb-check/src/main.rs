//! cplb-check binary

use anyhow::Context;
use clap::Parser;
use cplb_check::{
    ClusterConfig, Config, LogFormat, OutputFormat, Overrides, check_cluster_config,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Validate and default the control plane load balancing section of a
/// cluster configuration
#[derive(Parser, Debug)]
#[command(name = "cplb-check", version, about, long_about = None)]
struct Cli {
    /// Cluster configuration document (YAML or JSON), `-` for stdin
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Settings file (defaults to the standard search paths)
    #[arg(long, short, env = "CPLB_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Use this instead of the document's .spec.api.externalAddress
    #[arg(long, env = "CPLB_EXTERNAL_ADDRESS")]
    external_address: Option<String>,

    /// Print the defaulted document to stdout
    #[arg(long)]
    print: bool,

    /// Output format for --print
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Log level used when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Can't use tracing yet - not initialized
    let settings_path = cli.config.clone().or_else(Config::find_config_file);
    let mut settings =
        Config::load_from(settings_path.as_deref()).context("failed to load settings")?;
    settings
        .apply_overrides(Overrides {
            log_level: cli.log_level,
            log_format: cli.log_format,
            output_format: cli.output,
            print_defaulted: cli.print,
        })
        .context("invalid settings")?;

    common::logging::init_with_level(
        &settings.logging.level,
        settings.logging.format == LogFormat::Json,
    );
    match &settings_path {
        Some(path) => info!("Loaded settings from {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    let mut document = ClusterConfig::load(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let resolver = settings.nic.resolver();
    let errors =
        check_cluster_config(&mut document, cli.external_address.as_deref(), &resolver);

    if settings.output.print_defaulted {
        let rendered = document
            .render(settings.output.format)
            .context("failed to render document")?;
        print!("{rendered}");
        if !rendered.ends_with('\n') {
            println!();
        }
    }

    for error in &errors {
        eprintln!("{error}");
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
