//! Graft Core
//!
//! Versioned syntax-graph storage and source reconstruction. This crate
//! provides the node store with its append-only version history, the
//! reconstruction engine that turns a stored subtree back into a concrete
//! syntax tree, the validator that gates emission, and the structural
//! equivalence checker used to verify round trips.

pub mod config;
pub mod cst; // Concrete Syntax Tree (Rowan-based) produced by reconstruction
pub mod diagnostics;
pub mod equivalence;
pub mod error;
pub mod ingest;
pub mod persist;
pub mod pipeline;
pub mod printer;
pub mod query;
pub mod reconstruct;
pub mod result;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use config::{ConfigLoader, GraftConfig};
pub use cst::{TsLanguage, TsSyntaxKind, TsSyntaxNode};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use equivalence::{Equivalence, EquivalenceOptions};
pub use error::{ErrorKind, GraftError};
pub use ingest::{CstIngester, SourceParser};
pub use pipeline::{PipelineOptions, RoundTripReport, emit, verify_round_trip};
pub use printer::{Layout, Printer, RenderOptions, TokenPrinter};
pub use query::QueryIndex;
pub use reconstruct::{ReconstructOptions, Reconstruction, reconstruct};
pub use result::Result;
pub use store::{
    Comment, CommentKind, GraphBuilder, IdMinter, Node, NodeBuilder, NodeId, ParseOutput,
    ParseStats, PropertyValue, Store, Version,
};
pub use validate::{Occurrence, validate};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("graft=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
