//! Discovered endpoint metadata consumed by the assembler.
//!
//! These are the inputs handed over by a discovery provider: one
//! [`OwnerDescriptor`] per handler group (a controller, a service) and one
//! [`EndpointDescriptor`] per reachable action. Annotation metadata is
//! pre-extracted into typed [`Annotation`] values, so the assembler never
//! inspects host-runtime type information.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use specforge_model::{HttpMethod, Value};

use crate::processors::OperationProcessor;

/// A pre-extracted annotation on an owner or an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Exclude from the document.
    Ignore,
    /// Explicit operation identifier (ignored when empty).
    OperationId(String),
    /// Operation tags.
    Tags(Vec<String>),
    /// Operation summary.
    Summary(String),
    /// Operation (or, on an owner, tag) description.
    Description(String),
    /// Endpoint requires no authentication.
    AllowAnonymous,
    /// API version the endpoint belongs to.
    ApiVersion(String),
}

/// Ordered annotation list with typed queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation.
    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// All annotations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    /// Whether an `Ignore` annotation is present.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::Ignore))
    }

    /// First non-empty `OperationId` override.
    #[must_use]
    pub fn operation_id(&self) -> Option<&str> {
        self.0.iter().find_map(|a| match a {
            Annotation::OperationId(id) if !id.is_empty() => Some(id.as_str()),
            _ => None,
        })
    }

    /// All declared tags, or `None` when no `Tags` annotation is present.
    #[must_use]
    pub fn tags(&self) -> Option<Vec<&str>> {
        let mut found = false;
        let mut tags = Vec::new();
        for annotation in &self.0 {
            if let Annotation::Tags(list) = annotation {
                found = true;
                tags.extend(list.iter().map(String::as_str));
            }
        }
        found.then_some(tags)
    }

    /// First `Summary`.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.0.iter().find_map(|a| match a {
            Annotation::Summary(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// First `Description`.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.iter().find_map(|a| match a {
            Annotation::Description(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Whether an `AllowAnonymous` annotation is present.
    #[must_use]
    pub fn allows_anonymous(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::AllowAnonymous))
    }

    /// Declared API versions.
    pub fn api_versions(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|a| match a {
            Annotation::ApiVersion(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reference to a type whose schema the resolver registers.
///
/// Schema generation from type metadata happens upstream; `schema` carries
/// the already-generated JSON schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeRef {
    /// Stable type identity (e.g., `app::models::User`).
    pub id: String,

    /// Schema name override. Defaults to the last segment of `id`.
    #[serde(default)]
    pub name: Option<String>,

    /// Pre-generated JSON schema.
    #[serde(default)]
    pub schema: Value,
}

impl TypeRef {
    /// Create a type reference with a pre-generated schema.
    pub fn new(id: impl Into<String>, schema: Value) -> Self {
        Self {
            id: id.into(),
            name: None,
            schema,
        }
    }

    /// Set the schema name override.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Schema name: the override, else the last `::`/`.` segment of the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name;
        }
        self.id
            .rsplit(|c: char| c == ':' || c == '.')
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }

    /// Whether the schema is a scalar (`string`, `integer`, `number`,
    /// `boolean`) that is inlined rather than registered.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.schema.get("type").and_then(Value::as_str),
            Some("string" | "integer" | "number" | "boolean")
        )
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path template variable.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Swagger 2.0 form field.
    FormData,
}

impl ParameterLocation {
    /// Value of the parameter's `in` key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::FormData => "formData",
        }
    }
}

/// A non-body request parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required. Path parameters always are.
    #[serde(default)]
    pub required: bool,
    /// Parameter description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter type.
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
}

/// A declared response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseDescriptor {
    /// Status code (e.g., `"200"`, `"default"`).
    #[serde(deserialize_with = "status_code")]
    pub status: String,
    /// Response description.
    #[serde(default)]
    pub description: Option<String>,
    /// Media types the response is produced as.
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Response body type.
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
}

impl ResponseDescriptor {
    /// Create a response with no body.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            description: None,
            content_types: Vec::new(),
            type_ref: None,
        }
    }

    /// Set the media types.
    #[must_use]
    pub fn content_types(mut self, types: &[&str]) -> Self {
        self.content_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the body type.
    #[must_use]
    pub fn body(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// A handler group that declares endpoints (e.g., a controller).
#[derive(Clone)]
pub struct OwnerDescriptor {
    /// Stable identity used for grouping.
    pub id: String,
    /// Display name used for identifiers and default tags.
    pub name: String,
    /// Group-level annotations.
    pub annotations: Annotations,
    /// Group-level operation processors, run after the global ones.
    pub processors: Vec<Arc<dyn OperationProcessor>>,
}

impl OwnerDescriptor {
    /// Create an owner with no annotations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            annotations: Annotations::new(),
            processors: Vec::new(),
        }
    }

    /// Add an annotation.
    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a group-level operation processor.
    #[must_use]
    pub fn processor(mut self, processor: impl OperationProcessor + 'static) -> Self {
        self.processors.push(Arc::new(processor));
        self
    }

    /// Wrap in an [`Arc`] for sharing across endpoints.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl fmt::Debug for OwnerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .field("processors", &processor_names(&self.processors))
            .finish()
    }
}

/// One discovered, reachable action.
#[derive(Clone)]
pub struct EndpointDescriptor {
    /// Owning handler group.
    pub owner: Arc<OwnerDescriptor>,
    /// Action (handler method) name.
    pub action: String,
    /// Route template, possibly without a leading `/`.
    pub route: String,
    /// Declared verb. `None` means GET.
    pub method: Option<HttpMethod>,
    /// API-explorer group name, used by the group filter.
    pub group_name: Option<String>,
    /// Accepted request media types.
    pub consumes: Vec<String>,
    /// Non-body parameters.
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body type.
    pub request_body: Option<TypeRef>,
    /// Declared responses.
    pub responses: Vec<ResponseDescriptor>,
    /// Deprecation marker.
    pub deprecated: bool,
    /// Endpoint-level annotations.
    pub annotations: Annotations,
    /// Endpoint-level operation processors, run last.
    pub processors: Vec<Arc<dyn OperationProcessor>>,
}

impl EndpointDescriptor {
    /// Create an endpoint with no verb, media types or annotations.
    pub fn new(
        owner: &Arc<OwnerDescriptor>,
        action: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            owner: Arc::clone(owner),
            action: action.into(),
            route: route.into(),
            method: None,
            group_name: None,
            consumes: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            deprecated: false,
            annotations: Annotations::new(),
            processors: Vec::new(),
        }
    }

    /// Handler identity: `<owner id>.<action>`.
    #[must_use]
    pub fn handler(&self) -> String {
        format!("{}.{}", self.owner.id, self.action)
    }

    /// Whether this endpoint or its owner carries `Ignore`.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.owner.annotations.is_ignored() || self.annotations.is_ignored()
    }

    /// Set the verb.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the API-explorer group name.
    #[must_use]
    pub fn group(mut self, group_name: &str) -> Self {
        self.group_name = Some(group_name.to_string());
        self
    }

    /// Set the accepted request media types.
    #[must_use]
    pub fn consumes(mut self, types: &[&str]) -> Self {
        self.consumes = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Add a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the request body type.
    #[must_use]
    pub fn request_body(mut self, type_ref: TypeRef) -> Self {
        self.request_body = Some(type_ref);
        self
    }

    /// Add a response.
    #[must_use]
    pub fn response(mut self, response: ResponseDescriptor) -> Self {
        self.responses.push(response);
        self
    }

    /// Set the deprecation marker.
    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Add an annotation.
    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add an endpoint-level operation processor.
    #[must_use]
    pub fn processor(mut self, processor: impl OperationProcessor + 'static) -> Self {
        self.processors.push(Arc::new(processor));
        self
    }
}

impl fmt::Debug for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDescriptor")
            .field("owner", &self.owner.id)
            .field("action", &self.action)
            .field("route", &self.route)
            .field("method", &self.method)
            .field("group_name", &self.group_name)
            .field("consumes", &self.consumes)
            .field("responses", &self.responses.len())
            .field("deprecated", &self.deprecated)
            .field("annotations", &self.annotations)
            .field("processors", &processor_names(&self.processors))
            .finish_non_exhaustive()
    }
}

/// Accept both `200` and `"200"` for status codes.
fn status_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Code(u16),
        Text(String),
    }

    Ok(match Status::deserialize(deserializer)? {
        Status::Code(code) => code.to_string(),
        Status::Text(text) => text,
    })
}

fn processor_names(processors: &[Arc<dyn OperationProcessor>]) -> Vec<&str> {
    processors.iter().map(|p| p.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_id_skips_empty_override() {
        let annotations: Annotations = [
            Annotation::OperationId(String::new()),
            Annotation::OperationId("ListUsers".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(annotations.operation_id(), Some("ListUsers"));
    }

    #[test]
    fn tags_none_without_annotation() {
        assert!(Annotations::new().tags().is_none());

        let annotations: Annotations = [
            Annotation::Tags(vec!["a".to_string()]),
            Annotation::Tags(vec!["b".to_string()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(annotations.tags().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn display_name_uses_last_segment() {
        let ty = TypeRef::new("app::models::User", Value::Null);
        assert_eq!(ty.display_name(), "User");

        let ty = TypeRef::new("users.v1.Profile", Value::Null);
        assert_eq!(ty.display_name(), "Profile");

        let ty = TypeRef::new("app::User", Value::Null).named("Account");
        assert_eq!(ty.display_name(), "Account");
    }

    #[test]
    fn primitive_detection() {
        let schema: Value = serde_yaml_ng::from_str("type: integer\nformat: int64").unwrap();
        assert!(TypeRef::new("i64", schema).is_primitive());

        let schema: Value = serde_yaml_ng::from_str("type: object").unwrap();
        assert!(!TypeRef::new("User", schema).is_primitive());
    }

    #[test]
    fn owner_ignore_applies_to_endpoint() {
        let owner = OwnerDescriptor::new("app::Admin", "Admin")
            .annotate(Annotation::Ignore)
            .shared();
        let endpoint = EndpointDescriptor::new(&owner, "Purge", "admin/purge");
        assert!(endpoint.is_ignored());
        assert_eq!(endpoint.handler(), "app::Admin.Purge");
    }
}
