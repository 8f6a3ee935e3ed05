//! End-to-end flows over a store
//!
//! [`emit`] turns a stored subtree into text: reconstruct, validate, render.
//! [`verify_round_trip`] additionally checks that nothing was lost on the
//! way: the reconstructed tree is rendered twice (the printer must be
//! deterministic), ingested into a scratch store and compared against the
//! original subtree. An equivalent result must render back to the same text.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diagnostics::Diagnostic;
use crate::equivalence::{self, Equivalence, EquivalenceOptions};
use crate::error::GraftError;
use crate::ingest::{CstIngester, SourceParser};
use crate::printer::{Printer, RenderOptions};
use crate::reconstruct::{self, ReconstructOptions, Reconstruction};
use crate::result::Result;
use crate::store::{IdMinter, Store};
use crate::validate;

/// Settings for every stage of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub reconstruct: ReconstructOptions,
    pub render: RenderOptions,
    pub equivalence: EquivalenceOptions,
}

/// Outcome of [`verify_round_trip`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripReport {
    pub rendered: String,
    pub equivalence: Equivalence,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundTripReport {
    pub fn is_equivalent(&self) -> bool {
        self.equivalence.is_equivalent()
    }
}

fn reconstruct_valid(store: &Store, id: &str, options: &PipelineOptions) -> Result<Reconstruction> {
    let reconstruction = reconstruct::reconstruct(store, id, &options.reconstruct)?;
    for diagnostic in &reconstruction.diagnostics {
        warn!("{}", diagnostic);
    }
    validate::validate(&reconstruction)?;
    Ok(reconstruction)
}

fn render(printer: &dyn Printer, reconstruction: &Reconstruction, options: &RenderOptions) -> Result<String> {
    printer
        .render(&reconstruction.green, options)
        .map_err(|err| err.for_request(&reconstruction.root_id))
}

/// Reconstruct, validate and render the subtree rooted at `id`
pub fn emit(store: &Store, id: &str, printer: &dyn Printer, options: &PipelineOptions) -> Result<String> {
    let reconstruction = reconstruct_valid(store, id, options)?;
    let text = render(printer, &reconstruction, &options.render)?;
    debug!("Emitted '{}' ({} bytes)", id, text.len());
    Ok(text)
}

/// Emit the subtree at `id` and check the result against the original
pub fn verify_round_trip(
    store: &Store,
    id: &str,
    printer: &dyn Printer,
    options: &PipelineOptions,
) -> Result<RoundTripReport> {
    let reconstruction = reconstruct_valid(store, id, options)?;

    let rendered = render(printer, &reconstruction, &options.render)?;
    let again = render(printer, &reconstruction, &options.render)?;
    if rendered != again {
        return Err(GraftError::render_failed(
            reconstruction.root_id.clone(),
            reconstruction.syntax().kind().name(),
            "rendering the same tree twice produced different text",
        ));
    }

    let mut minter = IdMinter::with_prefix("rt");
    let output = CstIngester.parse(&reconstruction.green, &mut minter)?;
    let scratch = Store::new(store.file_name()).merge_output(output, Some("round trip".to_string()))?;
    let scratch_root = scratch.latest_root()?;

    let equivalence = equivalence::check(
        store,
        id,
        &scratch,
        scratch_root.id().as_str(),
        &options.equivalence,
    )?;
    match &equivalence {
        Equivalence::Equivalent => info!("Round trip of '{}' is equivalent", id),
        Equivalence::Diverged { reason, .. } => warn!("Round trip of '{}' diverged: {}", id, reason),
    }

    // An equivalent tree must also print back to the same text
    if equivalence.is_equivalent() {
        let reprinted = emit(&scratch, scratch_root.id().as_str(), printer, options)?;
        if reprinted != rendered {
            return Err(GraftError::render_failed(
                reconstruction.root_id.clone(),
                reconstruction.syntax().kind().name(),
                "the re-ingested tree renders to different text",
            ));
        }
    }

    Ok(RoundTripReport {
        rendered,
        equivalence,
        diagnostics: reconstruction.diagnostics,
    })
}
