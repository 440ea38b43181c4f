//! Reading templates and writing finished documents.

use std::borrow::Cow;
use std::path::Path;

use specforge_model::{Document, MediaTypes, SchemaType};

use crate::error;

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML (default).
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Serialize `document` as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml(document: &Document) -> error::Result<String> {
    Ok(serde_yaml_ng::to_string(&output_view(document))?)
}

/// Serialize `document` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(document: &Document) -> error::Result<String> {
    let mut json = serde_json::to_string_pretty(&output_view(document))?;
    json.push('\n');
    Ok(json)
}

/// Serialize `document` in `format`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(document: &Document, format: OutputFormat) -> error::Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(document),
        OutputFormat::Json => to_json(document),
    }
}

/// OpenAPI 3 carries media types in `content` objects; the Swagger 2.0
/// `consumes`/`produces` lists are dropped from its output.
fn output_view(document: &Document) -> Cow<'_, Document> {
    if document.schema_type == SchemaType::Swagger2 {
        return Cow::Borrowed(document);
    }
    let mut view = document.clone();
    view.consumes.clear();
    view.produces.clear();
    for operation in view.operations_mut() {
        operation.consumes = MediaTypes::Inherited;
        operation.produces = MediaTypes::Inherited;
    }
    Cow::Owned(view)
}

/// Parse a template document (YAML or JSON) and detect its format.
///
/// # Errors
///
/// Returns an error if the text is not a valid document.
pub fn template_from_str(text: &str) -> error::Result<Document> {
    // JSON is a YAML subset, so one parser covers both encodings.
    let mut document: Document = serde_yaml_ng::from_str(text)?;
    document.detect_schema_type();
    Ok(document)
}

/// Read a template document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_template(path: &Path) -> error::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    template_from_str(&content)
}
