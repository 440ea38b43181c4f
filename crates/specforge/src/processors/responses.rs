//! Response object generation.

use serde_yaml_ng::{Mapping, Value};
use specforge_model::SchemaType;

use crate::error;

use super::helpers::{content_with_schema, mapping, status_description, val_s};
use super::{OperationContext, OperationProcessor, ProcessOutcome};

/// Turns response descriptors into response objects keyed by status code.
///
/// Responses already present on the operation are left alone. An endpoint
/// that declares nothing gets a bare `200: Success`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationResponseProcessor;

impl OperationProcessor for OperationResponseProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        let endpoint = context.endpoint;
        let schema_type = context.document.schema_type;

        for response in &endpoint.responses {
            if context.operation.responses.contains_key(&response.status) {
                continue;
            }

            let description = response
                .description
                .as_deref()
                .unwrap_or_else(|| status_description(&response.status));
            let mut map = Mapping::new();
            map.insert(val_s("description"), val_s(description));

            if let Some(type_ref) = &response.type_ref {
                let schema = context.schema_for(type_ref)?;
                match schema_type {
                    SchemaType::Swagger2 => {
                        map.insert(val_s("schema"), schema);
                    }
                    SchemaType::OpenApi3 => {
                        map.insert(
                            val_s("content"),
                            content_with_schema(&response.content_types, &schema),
                        );
                    }
                }
            }

            context
                .operation
                .responses
                .insert(response.status.clone(), Value::Mapping(map));
        }

        if context.operation.responses.is_empty() {
            context.operation.responses.insert(
                "200".to_string(),
                mapping([("description", val_s(status_description("200")))]),
            );
        }

        Ok(ProcessOutcome::Accept)
    }
}
