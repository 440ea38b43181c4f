//! Endpoint discovery.
//!
//! Discovery hands the assembler an ordered list of [`EndpointDescriptor`]s.
//! Host frameworks plug in through [`EndpointProvider`]; the bundled
//! [`ManifestProvider`] reads a declarative YAML manifest carrying
//! pre-extracted endpoint metadata and pre-generated schemas:
//!
//! ```yaml
//! owners:
//!   - id: app::UsersController
//!     name: Users
//!     annotations:
//!       description: User management
//!     endpoints:
//!       - action: GetAsync
//!         route: users/{id}
//!         method: get
//!         parameters:
//!           - { name: id, in: path, type: { id: i64, schema: { type: integer } } }
//!         responses:
//!           - status: 200
//!             content_types: [application/json]
//!             type: { id: app::User, schema: { type: object } }
//! ```
//!
//! Discovery order is significant: it decides identifier disambiguation
//! and path-table order, so providers must yield a deterministic order.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use specforge_model::HttpMethod;

use crate::descriptor::{
    Annotation, Annotations, EndpointDescriptor, OwnerDescriptor, ParameterDescriptor,
    ResponseDescriptor, TypeRef,
};
use crate::error::{self, Error};

/// Source of discovered endpoints.
pub trait EndpointProvider {
    /// Yield every reachable endpoint in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Discovery`] (or an I/O/parse error) when endpoint
    /// metadata cannot be produced.
    fn discover(&self) -> error::Result<Vec<EndpointDescriptor>>;
}

impl EndpointProvider for Vec<EndpointDescriptor> {
    fn discover(&self) -> error::Result<Vec<EndpointDescriptor>> {
        Ok(self.clone())
    }
}

/// Discovery provider backed by a YAML endpoint manifest.
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    manifest: Manifest,
}

impl ManifestProvider {
    /// Read a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> error::Result<Self> {
        let manifest: Manifest = serde_yaml_ng::from_str(yaml)?;
        Ok(Self { manifest })
    }
}

impl EndpointProvider for ManifestProvider {
    fn discover(&self) -> error::Result<Vec<EndpointDescriptor>> {
        let mut endpoints = Vec::new();

        for owner in &self.manifest.owners {
            if owner.id.is_empty() {
                return Err(Error::Discovery {
                    message: "owner with an empty id".to_string(),
                });
            }
            let descriptor = Arc::new(OwnerDescriptor {
                id: owner.id.clone(),
                name: owner.name.clone().unwrap_or_else(|| short_name(&owner.id)),
                annotations: owner.annotations.to_annotations(),
                processors: Vec::new(),
            });

            for endpoint in &owner.endpoints {
                endpoints.push(endpoint.to_descriptor(&descriptor)?);
            }
        }

        Ok(endpoints)
    }
}

/// Partition endpoints by owner identity.
///
/// Groups appear in first-seen order; endpoints keep their discovery order
/// within each group.
#[must_use]
pub fn group_by_owner(endpoints: Vec<EndpointDescriptor>) -> Vec<OwnerGroup> {
    let mut groups: IndexMap<String, OwnerGroup> = IndexMap::new();
    for endpoint in endpoints {
        groups
            .entry(endpoint.owner.id.clone())
            .or_insert_with(|| OwnerGroup {
                owner: Arc::clone(&endpoint.owner),
                endpoints: Vec::new(),
            })
            .endpoints
            .push(endpoint);
    }
    groups.into_values().collect()
}

/// Endpoints sharing one owner.
#[derive(Debug, Clone)]
pub struct OwnerGroup {
    /// The shared owner.
    pub owner: Arc<OwnerDescriptor>,
    /// Endpoints in discovery order.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Last `::`/`.` segment of a type path.
fn short_name(id: &str) -> String {
    id.rsplit(|c: char| c == ':' || c == '.')
        .find(|s| !s.is_empty())
        .unwrap_or(id)
        .to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    owners: Vec<ManifestOwner>,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestOwner {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    annotations: ManifestAnnotations,
    #[serde(default)]
    endpoints: Vec<ManifestEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestEndpoint {
    action: String,
    route: String,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    consumes: Vec<String>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    annotations: ManifestAnnotations,
    #[serde(default)]
    parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    request_body: Option<TypeRef>,
    #[serde(default)]
    responses: Vec<ResponseDescriptor>,
}

impl ManifestEndpoint {
    fn to_descriptor(&self, owner: &Arc<OwnerDescriptor>) -> error::Result<EndpointDescriptor> {
        if self.action.trim().is_empty() {
            return Err(Error::Discovery {
                message: format!("endpoint of '{}' has an empty action", owner.id),
            });
        }
        if self.route.trim().is_empty() {
            return Err(Error::Discovery {
                message: format!("endpoint '{}.{}' has an empty route", owner.id, self.action),
            });
        }

        let method = self
            .method
            .as_deref()
            .map(str::parse::<HttpMethod>)
            .transpose()
            .map_err(|e| Error::Discovery {
                message: format!("endpoint '{}.{}': {e}", owner.id, self.action),
            })?;

        let mut endpoint = EndpointDescriptor::new(owner, &self.action, &self.route);
        endpoint.method = method;
        endpoint.group_name.clone_from(&self.group);
        endpoint.consumes.clone_from(&self.consumes);
        endpoint.deprecated = self.deprecated;
        endpoint.annotations = self.annotations.to_annotations();
        endpoint.parameters.clone_from(&self.parameters);
        endpoint.request_body.clone_from(&self.request_body);
        endpoint.responses.clone_from(&self.responses);
        Ok(endpoint)
    }
}

/// Struct form of the annotation list, as written in manifests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ManifestAnnotations {
    ignore: bool,
    operation_id: Option<String>,
    tags: Option<Vec<String>>,
    summary: Option<String>,
    description: Option<String>,
    allow_anonymous: bool,
    api_versions: Vec<String>,
}

impl ManifestAnnotations {
    fn to_annotations(&self) -> Annotations {
        let mut annotations = Annotations::new();
        if self.ignore {
            annotations.push(Annotation::Ignore);
        }
        if let Some(id) = &self.operation_id {
            annotations.push(Annotation::OperationId(id.clone()));
        }
        if let Some(tags) = &self.tags {
            annotations.push(Annotation::Tags(tags.clone()));
        }
        if let Some(summary) = &self.summary {
            annotations.push(Annotation::Summary(summary.clone()));
        }
        if let Some(description) = &self.description {
            annotations.push(Annotation::Description(description.clone()));
        }
        if self.allow_anonymous {
            annotations.push(Annotation::AllowAnonymous);
        }
        for version in &self.api_versions {
            annotations.push(Annotation::ApiVersion(version.clone()));
        }
        annotations
    }
}
