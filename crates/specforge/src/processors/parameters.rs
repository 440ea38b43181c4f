//! Request parameter and request body generation.

use serde_yaml_ng::{Mapping, Value};
use specforge_model::SchemaType;

use crate::descriptor::{ParameterDescriptor, ParameterLocation};
use crate::error;

use super::helpers::{content_with_schema, mapping, merge_missing, val_s};
use super::{OperationContext, OperationProcessor, ProcessOutcome};

/// Turns parameter descriptors and the request body type into operation
/// parameters.
///
/// Swagger 2.0 documents carry the body as an `in: body` parameter and
/// inline scalar parameter schemas; OpenAPI 3 documents get a
/// `requestBody` with one content entry per accepted media type.
///
/// Path parameters whose variable no longer appears in the path (e.g., an
/// API-version placeholder that was substituted) are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationParameterProcessor;

impl OperationProcessor for OperationParameterProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        let endpoint = context.endpoint;
        let schema_type = context.document.schema_type;

        for parameter in &endpoint.parameters {
            if parameter.location == ParameterLocation::Path
                && !path_has_variable(context.path, &parameter.name)
            {
                continue;
            }
            if has_parameter(&context.operation.parameters, parameter) {
                continue;
            }

            let value = build_parameter(context, parameter, schema_type)?;
            context.operation.parameters.push(value);
        }

        if let Some(body) = &endpoint.request_body {
            let schema = context.schema_for(body)?;
            match schema_type {
                SchemaType::Swagger2 => {
                    context.operation.parameters.push(mapping([
                        ("name", val_s("body")),
                        ("in", val_s("body")),
                        ("required", Value::Bool(true)),
                        ("schema", schema),
                    ]));
                }
                SchemaType::OpenApi3 => {
                    let consumes = context
                        .operation
                        .consumes
                        .resolve(&context.document.consumes)
                        .to_vec();
                    context.operation.request_body = Some(mapping([
                        ("required", Value::Bool(true)),
                        ("content", content_with_schema(&consumes, &schema)),
                    ]));
                }
            }
        }

        Ok(ProcessOutcome::Accept)
    }
}

fn build_parameter(
    context: &mut OperationContext<'_>,
    parameter: &ParameterDescriptor,
    schema_type: SchemaType,
) -> error::Result<Value> {
    let mut map = Mapping::new();
    map.insert(val_s("name"), val_s(&parameter.name));
    map.insert(val_s("in"), val_s(parameter.location.as_str()));
    map.insert(
        val_s("required"),
        Value::Bool(parameter.required || parameter.location == ParameterLocation::Path),
    );
    if let Some(description) = &parameter.description {
        map.insert(val_s("description"), val_s(description));
    }

    let schema = match &parameter.type_ref {
        Some(type_ref) => context.schema_for(type_ref)?,
        None => mapping([("type", val_s("string"))]),
    };

    match schema_type {
        // Swagger 2.0 non-body parameters carry their type inline.
        SchemaType::Swagger2 if schema.get("$ref").is_none() => merge_missing(&mut map, &schema),
        _ => {
            map.insert(val_s("schema"), schema);
        }
    }

    Ok(Value::Mapping(map))
}

fn has_parameter(existing: &[Value], parameter: &ParameterDescriptor) -> bool {
    existing.iter().any(|p| {
        p.get("name").and_then(Value::as_str) == Some(parameter.name.as_str())
            && p.get("in").and_then(Value::as_str) == Some(parameter.location.as_str())
    })
}

/// Whether the route template declares `{name}`, `{name?}` or `{name:constraint}`.
fn path_has_variable(path: &str, name: &str) -> bool {
    path.split('{').skip(1).any(|segment| {
        let inner = segment.split('}').next().unwrap_or_default();
        let variable = inner
            .split(':')
            .next()
            .unwrap_or_default()
            .trim_end_matches('?');
        variable == name
    })
}
