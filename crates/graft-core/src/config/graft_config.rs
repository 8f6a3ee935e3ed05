//! Configuration structure for graft
//!
//! Settings are grouped by pipeline stage. Every section is optional and
//! every field inside a section falls back to its default, so a config file
//! only needs to name what it changes.
//!
//! ## Example Configuration (graft.yaml)
//!
//! ```yaml
//! reconstruct:
//!   maxDepth: 256
//!   includeComments: true
//!
//! render:
//!   layout: compact
//!   indentSize: 4
//!
//! equivalence:
//!   compareComments: false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::equivalence::EquivalenceOptions;
use crate::error::GraftError;
use crate::pipeline::PipelineOptions;
use crate::printer::RenderOptions;
use crate::reconstruct::ReconstructOptions;
use crate::result::Result;

/// Section-based graft configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraftConfig {
    /// Reconstruction settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconstruct: Option<ReconstructOptions>,

    /// Rendering settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderOptions>,

    /// Equivalence checking settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalence: Option<EquivalenceOptions>,
}

impl GraftConfig {
    /// Load configuration from file
    ///
    /// Supports YAML (`.yaml`, `.yml`), JSON (`.json`) and TOML (`.toml`);
    /// dotfiles without a recognised extension are read as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| GraftError::io_error(path, err))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") | None => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some(other) => Err(format!("unsupported config extension '.{other}'")),
        };
        let config: GraftConfig = parsed.map_err(|message| {
            GraftError::config_error(format!("failed to parse '{}': {message}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no stage can work with
    pub fn validate(&self) -> Result<()> {
        if self.reconstruct_options().max_depth == 0 {
            return Err(GraftError::config_error("reconstruct.maxDepth must be at least 1"));
        }
        if self.render_options().indent_size > 16 {
            return Err(GraftError::config_error("render.indentSize must be at most 16"));
        }
        Ok(())
    }

    /// Reconstruction settings with defaults
    pub fn reconstruct_options(&self) -> ReconstructOptions {
        self.reconstruct.clone().unwrap_or_default()
    }

    /// Render settings with defaults
    pub fn render_options(&self) -> RenderOptions {
        self.render.clone().unwrap_or_default()
    }

    /// Equivalence settings with defaults
    pub fn equivalence_options(&self) -> EquivalenceOptions {
        self.equivalence.clone().unwrap_or_default()
    }

    /// Settings for a whole pipeline run
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            reconstruct: self.reconstruct_options(),
            render: self.render_options(),
            equivalence: self.equivalence_options(),
        }
    }
}
