//! Operations and media-type inheritance.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::document::SecurityRequirement;

/// Media types accepted or produced by an operation.
///
/// `Inherited` means "use the document default" and is omitted on output.
/// `Explicit` always carries a deduplicated list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum MediaTypes {
    /// Fall back to the document-level list.
    #[default]
    Inherited,
    /// Operation-specific list.
    Explicit(Vec<String>),
}

impl MediaTypes {
    /// Build an explicit list, dropping duplicates but keeping first-seen order.
    pub fn explicit<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for media_type in types {
            let media_type = media_type.into();
            if !distinct.contains(&media_type) {
                distinct.push(media_type);
            }
        }
        Self::Explicit(distinct)
    }

    /// Whether this defers to the document default.
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        matches!(self, Self::Inherited)
    }

    /// The explicit list, or `None` when inherited.
    #[must_use]
    pub fn as_explicit(&self) -> Option<&[String]> {
        match self {
            Self::Inherited => None,
            Self::Explicit(types) => Some(types),
        }
    }

    /// The effective list given the document default.
    #[must_use]
    pub fn resolve<'a>(&'a self, document_default: &'a [String]) -> &'a [String] {
        self.as_explicit().unwrap_or(document_default)
    }
}

impl From<Vec<String>> for MediaTypes {
    fn from(types: Vec<String>) -> Self {
        Self::explicit(types)
    }
}

impl From<MediaTypes> for Vec<String> {
    fn from(types: MediaTypes) -> Self {
        match types {
            MediaTypes::Inherited => Vec::new(),
            MediaTypes::Explicit(types) => types,
        }
    }
}

/// One verb + path endpoint in the document.
///
/// Parameters, request bodies and responses are opaque schema values owned
/// by the schema subsystem; the assembler never looks inside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Grouping tags (usually the owning controller).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Identifier, unique within the document.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation_id: String,

    /// Accepted request media types.
    #[serde(default, skip_serializing_if = "MediaTypes::is_inherited")]
    pub consumes: MediaTypes,

    /// Produced response media types.
    #[serde(default, skip_serializing_if = "MediaTypes::is_inherited")]
    pub produces: MediaTypes,

    /// Parameter objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,

    /// OpenAPI 3 request body object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,

    /// Response objects keyed by status code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Value>,

    /// Whether the endpoint is deprecated.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,

    /// Per-operation security override. `Some(vec![])` means "no auth".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    /// `x-*` extension data.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
fn is_false(b: &bool) -> bool {
    !*b
}
