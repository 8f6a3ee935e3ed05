//! CLI command implementations
//!
//! Every command loads a persisted store, runs one library operation over
//! it and reports through [`crate::output`]. Commands return an [`Outcome`]
//! so that a negative answer (a divergence, a failed check) exits non-zero
//! without being treated as an error.

use anyhow::{Context, anyhow, bail};
use graft_core::persist;
use graft_core::{
    ConfigLoader, GraftConfig, GraftError, PipelineOptions, Store, TokenPrinter,
    emit, equivalence, reconstruct, validate, verify_round_trip,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::OutputFormat;
use crate::output;

/// Result of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    fn from_success(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Explicit config file, or whatever discovery finds from the current directory
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GraftConfig> {
    ConfigLoader::load(path, None).context("failed to load configuration")
}

fn load_store(path: &Path) -> anyhow::Result<Store> {
    let store =
        persist::load(path).with_context(|| format!("failed to load store '{}'", path.display()))?;
    debug!(
        "Loaded '{}': {} node(s), {} version(s)",
        store.file_name(),
        store.node_count(),
        store.versions().len()
    );
    Ok(store)
}

/// Node a command starts from: the explicit id, else the root of the
/// selected version, else the latest root
fn select_root(store: &Store, node: Option<String>, version: Option<usize>) -> anyhow::Result<String> {
    if let Some(id) = node {
        store.lookup(&id)?;
        return Ok(id);
    }
    let selected = match version {
        Some(index) => store.version(index).ok_or_else(|| {
            anyhow!(
                "store has no version {index} (it has {})",
                store.versions().len()
            )
        })?,
        None => store
            .latest_version()
            .ok_or_else(|| anyhow!("store has no versions"))?,
    };
    Ok(selected.root_node_id.as_str().to_string())
}

/// History command implementation
pub fn history_command(path: &Path, format: OutputFormat) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    match format {
        OutputFormat::Human => output::print_history(&store),
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "fileName": store.file_name(),
            "nodeCount": store.node_count(),
            "versions": store.versions(),
        }))?,
    }
    Ok(Outcome::Success)
}

/// Show command implementation
pub fn show_command(path: &Path, node: Option<String>, version: Option<usize>) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    let root = select_root(&store, node, version)?;
    output::print_tree(&store, &root)?;
    Ok(Outcome::Success)
}

/// Render command implementation
pub fn render_command(
    path: &Path,
    node: Option<String>,
    version: Option<usize>,
    options: &PipelineOptions,
    output_path: Option<&Path>,
) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    let root = select_root(&store, node, version)?;
    let text = emit(&store, &root, &TokenPrinter::new(), options)?;

    match output_path {
        Some(target) => {
            fs::write(target, &text).map_err(|err| GraftError::io_error(target, err))?;
            info!("Wrote {} byte(s) to {}", text.len(), target.display());
        }
        None if text.ends_with('\n') => print!("{text}"),
        None => println!("{text}"),
    }
    Ok(Outcome::Success)
}

/// Verify command implementation: equivalence of two stored subtrees
pub fn verify_command(
    path: &Path,
    left: Option<String>,
    right: Option<String>,
    options: &PipelineOptions,
    format: OutputFormat,
) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    let versions = store.versions();
    let root_at = |back: usize| {
        versions
            .len()
            .checked_sub(back)
            .and_then(|index| versions.get(index))
            .map(|version| version.root_node_id.as_str().to_string())
    };

    let left = match left.or_else(|| root_at(2)) {
        Some(id) => id,
        None => bail!("store has fewer than two versions; pass --left and --right"),
    };
    let right = match right.or_else(|| root_at(1)) {
        Some(id) => id,
        None => bail!("store has no versions"),
    };

    let result = equivalence::check(&store, &left, &store, &right, &options.equivalence)?;
    match format {
        OutputFormat::Human => output::print_equivalence(&left, &right, &result),
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "left": left,
            "right": right,
            "result": result,
        }))?,
    }
    Ok(Outcome::from_success(result.is_equivalent()))
}

/// Round-trip flavour of the verify command
pub fn round_trip_command(
    path: &Path,
    node: Option<String>,
    options: &PipelineOptions,
    format: OutputFormat,
) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    let root = select_root(&store, node, None)?;
    let report = verify_round_trip(&store, &root, &TokenPrinter::new(), options)?;
    match format {
        OutputFormat::Human => output::print_round_trip(&root, &report),
        OutputFormat::Json => output::print_json(&report)?,
    }
    Ok(Outcome::from_success(report.is_equivalent()))
}

/// Check command implementation
///
/// Loading already enforces the closed-graph invariant; the check then
/// reconstructs the latest version and validates the result.
pub fn check_command(path: &Path, options: &PipelineOptions, format: OutputFormat) -> anyhow::Result<Outcome> {
    let store = load_store(path)?;
    store.check_integrity()?;
    let root = select_root(&store, None, None)?;

    let (diagnostics, failure) = match reconstruct(&store, &root, &options.reconstruct) {
        Ok(reconstruction) => {
            let failure = validate(&reconstruction).err();
            (reconstruction.diagnostics, failure)
        }
        Err(err) => (Vec::new(), Some(err)),
    };

    match format {
        OutputFormat::Human => output::print_check(&store, &root, &diagnostics, failure.as_ref()),
        OutputFormat::Json => {
            let occurrences = match &failure {
                Some(GraftError::Unsupported { occurrences, .. }) => occurrences.clone(),
                _ => Vec::new(),
            };
            let status = if failure.is_none() { "ok" } else { "failed" };
            output::print_json(&serde_json::json!({
                "fileName": store.file_name(),
                "root": root,
                "status": status,
                "error": failure.as_ref().map(|err| err.to_string()),
                "occurrences": occurrences,
                "diagnostics": diagnostics,
            }))?
        }
    }
    Ok(Outcome::from_success(failure.is_none()))
}

/// Merge command implementation
pub fn merge_command(
    path: &Path,
    fragment: &Path,
    message: Option<String>,
    file_name: Option<String>,
    output_path: Option<&Path>,
) -> anyhow::Result<Outcome> {
    let parsed = persist::load_fragment(fragment)
        .with_context(|| format!("failed to load fragment '{}'", fragment.display()))?;

    let store = if path.exists() {
        load_store(path)?
    } else {
        let name = match file_name {
            Some(name) => name,
            None => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("cannot derive a file name from '{}'", path.display()))?,
        };
        info!("Creating store for '{}'", name);
        Store::new(name)
    };

    let added = parsed.nodes.len();
    let merged = store.merge_output(parsed, message)?;
    let target = output_path.unwrap_or(path);
    persist::save(&merged, target)
        .with_context(|| format!("failed to write store '{}'", target.display()))?;

    let index = merged.versions().len() - 1;
    output::print_merged(&merged, index, added, target);
    Ok(Outcome::Success)
}

/// Config command implementation: the effective settings of every stage
pub fn config_show_command(config: &GraftConfig) -> anyhow::Result<Outcome> {
    output::print_json(&serde_json::json!({
        "reconstruct": config.reconstruct_options(),
        "render": config.render_options(),
        "equivalence": config.equivalence_options(),
    }))?;
    Ok(Outcome::Success)
}
