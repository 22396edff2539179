//! Podctl CLI - creates a test pod and lists the pods of its namespace

use anyhow::Result;
use clap::{Parser, Subcommand};
use podctl::commands::run::{self, RunOptions};
use podctl::config::Settings;
use podctl::k8s::credentials;
use podctl::k8s::pods::PodTemplate;
use podctl::utils::{PodctlError, display_error_and_exit, enhance_error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podctl")]
#[command(author, version, about = "Create a test pod and list the pods of a namespace", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry-run mode: print the pod manifest instead of creating it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Namespace to create the pod in and list pods from
    #[arg(short, long)]
    namespace: Option<String>,

    /// Kubeconfig used when in-cluster configuration is unavailable
    /// (default: $HOME/.kube/config)
    #[arg(short, long)]
    kubeconfig: Option<PathBuf>,

    /// Path to a podctl settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    podctl::utils::logger::init(cli.verbose);

    if let Some(Commands::Version) = cli.command {
        return handle_version_command();
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path).unwrap_or_else(|e| {
            display_error_and_exit(
                PodctlError::new(format!("{:#}", e))
                    .suggest("Check that the file exists and is valid TOML"),
            )
        }),
        None => Settings::load(),
    };

    let options = build_options(&cli, &settings);

    if options.dry_run {
        podctl::log_info!("DRY RUN MODE: the pod will not be created");
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run::run(&options, &mut stdout).await {
        display_error_and_exit(enhance_error(e));
    }

    Ok(())
}

/// Command line flags win over the settings file, which wins over defaults
fn build_options(cli: &Cli, settings: &Settings) -> RunOptions {
    let namespace = cli
        .namespace
        .clone()
        .unwrap_or_else(|| settings.defaults.namespace.clone());

    let kubeconfig = cli
        .kubeconfig
        .clone()
        .or_else(|| settings.defaults.kubeconfig_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(credentials::default_kubeconfig_path);

    RunOptions {
        namespace,
        template: PodTemplate::from(&settings.pod),
        kubeconfig,
        dry_run: cli.dry_run,
    }
}

fn handle_version_command() -> Result<()> {
    println!("podctl {}", env!("CARGO_PKG_VERSION"));
    println!("Create a test pod and list the pods of a namespace");
    Ok(())
}
