//! Create the test pod, then list the pods of its namespace

use crate::k8s::credentials;
use crate::k8s::pods::{self, DEFAULT_NAMESPACE, PodTemplate};
use crate::utils::pretty::pretty_string;
use anyhow::{Context, Result};
use colored::Colorize;
use k8s_openapi::api::core::v1::Pod;
use kube::{Client, ResourceExt};
use std::io::Write;
use std::path::PathBuf;

/// Width of the `*` line printed after each listed pod
pub const SEPARATOR_WIDTH: usize = 80;

/// Options for a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Namespace the pod is created in and the pods are listed from
    pub namespace: String,
    pub template: PodTemplate,
    /// Kubeconfig tried when in-cluster configuration is unavailable
    pub kubeconfig: PathBuf,
    /// Print the manifest instead of creating it
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            template: PodTemplate::default(),
            kubeconfig: credentials::default_kubeconfig_path(),
            dry_run: false,
        }
    }
}

/// Resolve credentials, then create and list pods
pub async fn run<W: Write>(options: &RunOptions, out: &mut W) -> Result<()> {
    let config = credentials::resolve(&options.kubeconfig).await?;
    crate::log_info!("Using cluster {}", config.cluster_url);

    let client = credentials::build_client(config)?;
    run_with_client(client, options, out).await
}

/// Create and list pods with an existing client
///
/// A failed create is reported and the listing still runs. A failed list is
/// returned as an error.
pub async fn run_with_client<W: Write>(
    client: Client,
    options: &RunOptions,
    out: &mut W,
) -> Result<()> {
    let pod = options.template.to_pod(&options.namespace);

    if options.dry_run {
        let manifest = serde_yaml::to_string(&pod).context("Failed to render pod manifest")?;
        writeln!(
            out,
            "{} Would create pod {} in namespace {}:",
            "[DRY RUN]".cyan().bold(),
            options.template.name,
            options.namespace
        )?;
        writeln!(out, "{}", manifest)?;
    } else {
        crate::log_info!(
            "Creating pod {} in namespace {}",
            options.template.name,
            options.namespace
        );
        match pods::create_pod(client.clone(), &pod).await {
            Ok(created) => {
                writeln!(out, "Pod  {} created successfully...", created.name_any())?;
            }
            Err(e) => {
                crate::log_error!("Cannot create pod {}: {}", options.template.name, e);
                writeln!(out, "Unable to create pod {}: {}", options.template.name, e)?;
            }
        }
    }

    writeln!(out, "Listing pods..")?;

    let listed = pods::list_pods(client, &options.namespace)
        .await
        .with_context(|| format!("Failed to list pods in namespace {}", options.namespace))?;
    crate::log_info!("Found {} pods in {}", listed.len(), options.namespace);

    for pod in &listed {
        print_pod(out, pod)?;
    }

    writeln!(out, "Pods listed")?;
    Ok(())
}

fn print_pod<W: Write>(out: &mut W, pod: &Pod) -> Result<()> {
    writeln!(out, "Pod Name:  {}", pod.name_any())?;
    writeln!(out, "{}", pretty_string(pod))?;
    writeln!(out)?;
    writeln!(out, "{}", "*".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}
