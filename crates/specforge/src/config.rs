//! Project-level generation config loaded from YAML.
//!
//! Externalizes project-specific knobs (document metadata, filters, processor
//! toggles) so they live next to the endpoint manifest instead of being
//! hardcoded in Rust source.
//!
//! # File format
//!
//! ```yaml
//! # api/specforge.yaml
//! title: Pet Store
//! description: Internal pet inventory API
//! version: 2.1.0
//! schema_type: open_api3
//!
//! # Only endpoints in these API-explorer groups are documented.
//! group_names:
//!   - public
//!
//! # Only endpoints annotated with one of these versions are documented.
//! api_versions:
//!   - "2"
//!
//! bearer_description: JWT issued by /auth/login
//!
//! # Processor toggles (all default to true except `security`).
//! processors:
//!   security: true
//!   document_tags: false
//! ```

use std::path::Path;

use serde::Deserialize;
use specforge_model::SchemaType;

/// Project-level generation config.
///
/// Loaded from a YAML file via [`ProjectConfig::load`], then applied to a
/// [`GeneratorSettings`](crate::GeneratorSettings) via
/// [`GeneratorSettings::with_project_config`](crate::GeneratorSettings::with_project_config).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Document title, used when no template is supplied.
    pub title: Option<String>,

    /// Document description, used when no template is supplied.
    pub description: Option<String>,

    /// Document version, used when no template is supplied.
    pub version: Option<String>,

    /// Target format when no template decides it.
    pub schema_type: Option<SchemaType>,

    /// API-explorer group filter. Empty means every group.
    pub group_names: Vec<String>,

    /// API-version filter. Empty means every version.
    pub api_versions: Vec<String>,

    /// Description of the Bearer auth scheme.
    pub bearer_description: Option<String>,

    /// Generator signature override (`x-generator`).
    pub generator: Option<String>,

    /// Built-in processor toggles.
    pub processors: ProcessorConfig,
}

/// Built-in processor on/off switches.
///
/// Everything defaults to `true` except [`security`](Self::security), which
/// changes the document's global requirements and must be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ProcessorConfig {
    /// Operation tags from annotations or the owner name.
    pub tags: bool,

    /// Summary and description annotations.
    pub summary: bool,

    /// Request parameters and bodies.
    pub parameters: bool,

    /// Response objects.
    pub responses: bool,

    /// API-version filtering.
    pub api_version: bool,

    /// `security: []` for anonymous endpoints.
    pub anonymous: bool,

    /// Document-level tag declarations for used owners.
    pub document_tags: bool,

    /// Bearer security scheme and global requirement.
    pub security: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            tags: true,
            summary: true,
            parameters: true,
            responses: true,
            api_version: true,
            anonymous: true,
            document_tags: true,
            security: false,
        }
    }
}

impl ProcessorConfig {
    /// Every built-in processor switched off.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            tags: false,
            summary: false,
            parameters: false,
            responses: false,
            api_version: false,
            anonymous: false,
            document_tags: false,
            security: false,
        }
    }
}

impl ProjectConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }
}
