//! Summary and description annotations.

use crate::error;

use super::{OperationContext, OperationProcessor, ProcessOutcome};

/// Copies the endpoint's `Summary` and `Description` annotations onto the
/// operation, without overwriting values a previous processor set.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationSummaryProcessor;

impl OperationProcessor for OperationSummaryProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        let annotations = &context.endpoint.annotations;

        if context.operation.summary.is_none() {
            context.operation.summary = annotations.summary().map(ToString::to_string);
        }
        if context.operation.description.is_none() {
            context.operation.description = annotations.description().map(ToString::to_string);
        }

        Ok(ProcessOutcome::Accept)
    }
}
