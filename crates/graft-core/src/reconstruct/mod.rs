//! Reconstruction engine
//!
//! Turns a subtree of the node store back into a concrete syntax tree. The
//! engine walks the graph top-down, dispatches each node to the builder
//! registered for its kind, and lets builders recurse into children through
//! the context they are handed. Builders see a flat run of slots (groupings
//! spliced in) and re-emit them in the canonical child layout of their kind,
//! synthesizing fixed tokens the graph left out.
//!
//! ## Degradation
//!
//! A kind without a builder never aborts reconstruction: the engine emits a
//! placeholder leaf and records a [`Diagnostic`](crate::diagnostics::Diagnostic).
//! A supported kind whose required child is missing is an error naming the
//! node.
//!
//! ## Example
//!
//! ```rust,ignore
//! use graft_core::reconstruct::{reconstruct, ReconstructOptions};
//!
//! let out = reconstruct(&store, "n1", &ReconstructOptions::default())?;
//! println!("{}", out.text());
//! ```

pub mod builders;
mod context;
mod emit;
mod engine;
pub mod precedence;
mod registry;

pub use context::Cx;
pub use emit::{Built, Emitter, Separated, Trailing};
pub use engine::{placeholder_text, reconstruct, Recurse, ReconstructOptions, Reconstruction};
pub use registry::{builder_for, is_supported, BuilderFn};
