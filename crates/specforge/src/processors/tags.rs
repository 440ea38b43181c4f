//! Operation tags and document-level tag declarations.

use specforge_model::Tag;

use crate::descriptor::OwnerDescriptor;
use crate::error;

use super::{
    DocumentContext, DocumentProcessor, OperationContext, OperationProcessor, ProcessOutcome,
};

/// Fills in operation tags when none are set.
///
/// Source order: the endpoint's `Tags`, the owner's `Tags`, the owner name.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationTagsProcessor;

impl OperationProcessor for OperationTagsProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        if !context.operation.tags.is_empty() {
            return Ok(ProcessOutcome::Accept);
        }

        let tags = context
            .endpoint
            .annotations
            .tags()
            .filter(|tags| !tags.is_empty())
            .map_or_else(|| owner_tags(context.owner), |tags| to_owned(&tags));
        context.operation.tags = tags;

        Ok(ProcessOutcome::Accept)
    }
}

/// Declares one document tag per owner that contributed an operation.
///
/// The tag carries the owner's `Description` annotation. Tags already
/// declared (e.g., by the template) are kept as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTagsProcessor;

impl DocumentProcessor for DocumentTagsProcessor {
    fn process(&self, context: &mut DocumentContext<'_>) -> error::Result<()> {
        for owner in context.used_owners {
            let description = owner.annotations.description().map(ToString::to_string);
            for name in owner_tags(owner) {
                if context.document.tags.iter().any(|t| t.name == name) {
                    continue;
                }
                context.document.tags.push(Tag {
                    name,
                    description: description.clone(),
                });
            }
        }
        Ok(())
    }
}

fn owner_tags(owner: &OwnerDescriptor) -> Vec<String> {
    match owner.annotations.tags() {
        Some(tags) if !tags.is_empty() => to_owned(&tags),
        _ => vec![owner.name.clone()],
    }
}

fn to_owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use crate::descriptor::Annotation;

    use super::*;

    #[test]
    fn owner_tags_fall_back_to_name() {
        let owner = OwnerDescriptor::new("app::Users", "Users");
        assert_eq!(owner_tags(&owner), vec!["Users"]);

        let owner = owner.annotate(Annotation::Tags(vec!["People".to_string()]));
        assert_eq!(owner_tags(&owner), vec!["People"]);
    }

    #[test]
    fn empty_tags_annotation_falls_back_to_name() {
        let owner =
            OwnerDescriptor::new("app::Users", "Users").annotate(Annotation::Tags(Vec::new()));
        assert_eq!(owner_tags(&owner), vec!["Users"]);
    }
}
