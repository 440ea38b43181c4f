//! API-version filtering.

use crate::error;

use super::{OperationContext, OperationProcessor, ProcessOutcome};

/// Route constraint marking an API-version placeholder (`{version:apiVersion}`).
const VERSION_CONSTRAINT: &str = ":apiVersion";

/// Rejects endpoints that do not belong to one of the configured API
/// versions, and substitutes the matched version into the path.
///
/// Endpoint `ApiVersion` annotations take precedence over the owner's.
/// Endpoints without any version annotation, or runs without configured
/// versions, are always accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiVersionProcessor;

impl OperationProcessor for ApiVersionProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        let (settings, owner, endpoint) = (context.settings, context.owner, context.endpoint);
        let included = settings.included_api_versions();
        if included.is_empty() {
            return Ok(ProcessOutcome::Accept);
        }

        let mut declared: Vec<&str> = endpoint.annotations.api_versions().collect();
        if declared.is_empty() {
            declared = owner.annotations.api_versions().collect();
        }
        if declared.is_empty() {
            return Ok(ProcessOutcome::Accept);
        }

        let Some(version) = declared
            .into_iter()
            .find(|v| included.iter().any(|i| i == v))
        else {
            return Ok(ProcessOutcome::Reject);
        };

        *context.path = replace_version_placeholder(context.path, version);
        Ok(ProcessOutcome::Accept)
    }
}

/// Replace every `{name:apiVersion}` placeholder in `path` with `version`.
fn replace_version_placeholder(path: &str, version: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        result.push_str(&rest[..open]);
        let inner = &rest[open + 1..close];
        if inner.ends_with(VERSION_CONSTRAINT) {
            result.push_str(version);
        } else {
            result.push_str(&rest[open..=close]);
        }
        rest = &rest[close + 1..];
    }

    result.push_str(rest);
    result
}
