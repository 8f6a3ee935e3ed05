//! Configuration system for graft
//!
//! - JSON, YAML and TOML configuration files
//! - Auto-discovery by traversing up directories
//! - Section-per-stage layout with defaults for everything left out
//!
//! ## Configuration Discovery
//!
//! When no explicit config path is provided, graft searches for
//! `.graftrc.json`, `.graftrc.toml`, `graft.yaml`, `graft.yml` and
//! `graft.json` starting from the current directory and moving up the
//! directory tree. Finding none is not an error: every setting has a
//! default.
//!
//! ## Example Configuration
//!
//! ```json
//! {
//!   "reconstruct": { "maxDepth": 512, "includeComments": true },
//!   "render": { "layout": "readable", "indentSize": 2 },
//!   "equivalence": { "compareComments": false }
//! }
//! ```

mod graft_config;
mod loader;

pub use graft_config::GraftConfig;
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
