//! Security transforms.
//!
//! Adds the Bearer security scheme to the document and per-operation
//! overrides for endpoints that allow anonymous access.

use specforge_model::{Document, SchemaType, SecurityRequirement};

use crate::error;

use super::helpers::{mapping, val_s};
use super::{
    DocumentContext, DocumentProcessor, OperationContext, OperationProcessor, ProcessOutcome,
};

/// Name the Bearer scheme is registered under.
pub const BEARER_SCHEME_NAME: &str = "bearerAuth";

const DEFAULT_BEARER_DESCRIPTION: &str = "Bearer authentication token";

/// Marks operations whose endpoint or owner carries `AllowAnonymous` with
/// an empty security requirement (`security: []`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousAccessProcessor;

impl OperationProcessor for AnonymousAccessProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        if context.endpoint.annotations.allows_anonymous()
            || context.owner.annotations.allows_anonymous()
        {
            context.operation.security = Some(Vec::new());
        }
        Ok(ProcessOutcome::Accept)
    }
}

/// Registers the Bearer scheme and appends it to the global requirements.
///
/// Existing schemes and requirements (e.g., from a template) are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecuritySchemeAppender;

impl DocumentProcessor for SecuritySchemeAppender {
    fn process(&self, context: &mut DocumentContext<'_>) -> error::Result<()> {
        add_bearer_scheme(context.document, context.settings.bearer_description_text());
        Ok(())
    }
}

fn add_bearer_scheme(document: &mut Document, description: Option<&str>) {
    let description = description.unwrap_or(DEFAULT_BEARER_DESCRIPTION);

    // Swagger 2.0 has no `http` scheme type; the token travels as an API key.
    let scheme = match document.schema_type {
        SchemaType::Swagger2 => mapping([
            ("type", val_s("apiKey")),
            ("name", val_s("Authorization")),
            ("in", val_s("header")),
            ("description", val_s(description)),
        ]),
        SchemaType::OpenApi3 => mapping([
            ("type", val_s("http")),
            ("scheme", val_s("bearer")),
            ("bearerFormat", val_s("JWT")),
            ("description", val_s(description)),
        ]),
    };
    document
        .security_schemes_mut()
        .insert(BEARER_SCHEME_NAME.to_string(), scheme);

    let already_required = document
        .security
        .iter()
        .any(|requirement| requirement.contains_key(BEARER_SCHEME_NAME));
    if !already_required {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(BEARER_SCHEME_NAME.to_string(), Vec::new());
        document.security.push(requirement);
    }
}
