//! Generator settings.

use std::fmt;
use std::sync::Arc;

use specforge_model::{Document, SchemaType};

use crate::config::{ProcessorConfig, ProjectConfig};
use crate::processors::{
    AnonymousAccessProcessor, ApiVersionProcessor, DocumentProcessor, DocumentTagsProcessor,
    OperationParameterProcessor, OperationProcessor, OperationResponseProcessor,
    OperationSummaryProcessor, OperationTagsProcessor, SecuritySchemeAppender,
};

/// Default document title when neither config nor template provides one.
pub const DEFAULT_TITLE: &str = "My Title";

/// Default document version when neither config nor template provides one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Callback run on the finished document before it is returned.
pub type PostProcess = Arc<dyn Fn(&mut Document) + Send + Sync>;

/// Configuration for a generation run.
///
/// Controls document metadata, filters and which processors run. Construct
/// with [`GeneratorSettings::new`] and configure via
/// [`with_project_config`](Self::with_project_config) (file-based) or
/// individual builder methods (programmatic).
///
/// # Example
///
/// ```ignore
/// let settings = GeneratorSettings::new()
///     .title("Pet Store")
///     .schema_type(SchemaType::OpenApi3)
///     .api_versions(&["2"])
///     .operation_processor(AuditProcessor);
/// ```
#[derive(Clone)]
pub struct GeneratorSettings {
    /// Title applied to a template-less document.
    title: String,

    /// Description applied to a template-less document.
    description: Option<String>,

    /// Version applied to a template-less document.
    version: String,

    /// Target format when no template decides it.
    schema_type: SchemaType,

    /// Template document cloned at the start of each run.
    template: Option<Document>,

    /// API-explorer group filter. Empty means every group.
    group_names: Vec<String>,

    /// API-version filter. Empty means every version.
    api_versions: Vec<String>,

    /// Custom description for the Bearer auth scheme.
    ///
    /// Defaults to `"Bearer authentication token"` when `None`.
    bearer_description: Option<String>,

    /// `x-generator` override.
    generator: Option<String>,

    /// Built-in processor toggles.
    builtins: ProcessorConfig,

    /// Custom global operation processors, run after the built-ins.
    operation_processors: Vec<Arc<dyn OperationProcessor>>,

    /// Custom document processors, run after the built-ins.
    document_processors: Vec<Arc<dyn DocumentProcessor>>,

    /// Finalization hook.
    post_process: Option<PostProcess>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorSettings {
    /// Create settings with default metadata and the default built-ins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: None,
            version: DEFAULT_VERSION.to_string(),
            schema_type: SchemaType::default(),
            template: None,
            group_names: Vec::new(),
            api_versions: Vec::new(),
            bearer_description: None,
            generator: None,
            builtins: ProcessorConfig::default(),
            operation_processors: Vec::new(),
            document_processors: Vec::new(),
            post_process: None,
        }
    }

    /// Apply settings from a [`ProjectConfig`](crate::ProjectConfig).
    ///
    /// Only values present in the config are copied; builder methods called
    /// after this will override config values.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let project = ProjectConfig::load(Path::new("specforge.yaml"))?;
    /// let settings = GeneratorSettings::new().with_project_config(&project);
    /// ```
    #[must_use]
    pub fn with_project_config(mut self, project: &ProjectConfig) -> Self {
        if let Some(title) = &project.title {
            self.title.clone_from(title);
        }
        if project.description.is_some() {
            self.description.clone_from(&project.description);
        }
        if let Some(version) = &project.version {
            self.version.clone_from(version);
        }
        if let Some(schema_type) = project.schema_type {
            self.schema_type = schema_type;
        }
        if !project.group_names.is_empty() {
            self.group_names.clone_from(&project.group_names);
        }
        if !project.api_versions.is_empty() {
            self.api_versions.clone_from(&project.api_versions);
        }
        if project.bearer_description.is_some() {
            self.bearer_description
                .clone_from(&project.bearer_description);
        }
        if project.generator.is_some() {
            self.generator.clone_from(&project.generator);
        }
        self.builtins = project.processors;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the document description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the document version.
    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set the target format.
    #[must_use]
    pub fn schema_type(mut self, schema_type: SchemaType) -> Self {
        self.schema_type = schema_type;
        self
    }

    /// Start every run from a copy of `template`.
    ///
    /// The template's metadata wins over the title/description/version
    /// defaults, and its version key decides the target format.
    #[must_use]
    pub fn template(mut self, template: Document) -> Self {
        self.template = Some(template);
        self
    }

    /// Only document endpoints in these API-explorer groups.
    #[must_use]
    pub fn group_names(mut self, groups: &[&str]) -> Self {
        self.group_names = groups.iter().map(ToString::to_string).collect();
        self
    }

    /// Only document endpoints annotated with one of these API versions.
    #[must_use]
    pub fn api_versions(mut self, versions: &[&str]) -> Self {
        self.api_versions = versions.iter().map(ToString::to_string).collect();
        self
    }

    /// Set a custom description for the Bearer auth security scheme.
    #[must_use]
    pub fn bearer_description(mut self, description: &str) -> Self {
        self.bearer_description = Some(description.to_string());
        self
    }

    /// Override the `x-generator` signature.
    #[must_use]
    pub fn generator(mut self, generator: &str) -> Self {
        self.generator = Some(generator.to_string());
        self
    }

    /// Replace the built-in processor toggles.
    #[must_use]
    pub fn builtin_processors(mut self, toggles: ProcessorConfig) -> Self {
        self.builtins = toggles;
        self
    }

    /// Switch every built-in processor off.
    #[must_use]
    pub fn without_builtin_processors(self) -> Self {
        self.builtin_processors(ProcessorConfig::none())
    }

    /// Enable or disable the Bearer security scheme appender.
    #[must_use]
    pub fn add_security(mut self, enabled: bool) -> Self {
        self.builtins.security = enabled;
        self
    }

    /// Enable or disable document tag declarations.
    #[must_use]
    pub fn document_tags(mut self, enabled: bool) -> Self {
        self.builtins.document_tags = enabled;
        self
    }

    /// Register a global operation processor.
    #[must_use]
    pub fn operation_processor(mut self, processor: impl OperationProcessor + 'static) -> Self {
        self.operation_processors.push(Arc::new(processor));
        self
    }

    /// Register a document processor.
    #[must_use]
    pub fn document_processor(mut self, processor: impl DocumentProcessor + 'static) -> Self {
        self.document_processors.push(Arc::new(processor));
        self
    }

    /// Run `hook` on the finished document.
    #[must_use]
    pub fn post_process<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Document) + Send + Sync + 'static,
    {
        self.post_process = Some(Arc::new(hook));
        self
    }

    /// Configured title default.
    #[must_use]
    pub fn title_default(&self) -> &str {
        &self.title
    }

    /// Configured target format.
    #[must_use]
    pub fn target_schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Configured group filter.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.group_names
    }

    /// Configured API-version filter.
    #[must_use]
    pub fn included_api_versions(&self) -> &[String] {
        &self.api_versions
    }

    /// Configured Bearer scheme description.
    #[must_use]
    pub fn bearer_description_text(&self) -> Option<&str> {
        self.bearer_description.as_deref()
    }

    /// Built-in processor toggles.
    #[must_use]
    pub fn builtins(&self) -> ProcessorConfig {
        self.builtins
    }

    /// Global operation pipeline: enabled built-ins, then custom processors.
    #[must_use]
    pub fn operation_pipeline(&self) -> Vec<Arc<dyn OperationProcessor>> {
        let toggles = self.builtins;
        let mut pipeline: Vec<Arc<dyn OperationProcessor>> = Vec::new();
        if toggles.api_version {
            pipeline.push(Arc::new(ApiVersionProcessor));
        }
        if toggles.parameters {
            pipeline.push(Arc::new(OperationParameterProcessor));
        }
        if toggles.responses {
            pipeline.push(Arc::new(OperationResponseProcessor));
        }
        if toggles.tags {
            pipeline.push(Arc::new(OperationTagsProcessor));
        }
        if toggles.summary {
            pipeline.push(Arc::new(OperationSummaryProcessor));
        }
        if toggles.anonymous {
            pipeline.push(Arc::new(AnonymousAccessProcessor));
        }
        pipeline.extend(self.operation_processors.iter().cloned());
        pipeline
    }

    /// Document pipeline: enabled built-ins, then custom processors.
    #[must_use]
    pub fn document_pipeline(&self) -> Vec<Arc<dyn DocumentProcessor>> {
        let toggles = self.builtins;
        let mut pipeline: Vec<Arc<dyn DocumentProcessor>> = Vec::new();
        if toggles.document_tags {
            pipeline.push(Arc::new(DocumentTagsProcessor));
        }
        if toggles.security {
            pipeline.push(Arc::new(SecuritySchemeAppender));
        }
        pipeline.extend(self.document_processors.iter().cloned());
        pipeline
    }

    /// Fresh document for a run: the template copy or an empty document with
    /// the configured defaults applied.
    pub(crate) fn initial_document(&self) -> Document {
        let mut document = match &self.template {
            Some(template) => {
                let mut document = template.clone();
                if document.swagger.is_some() || document.openapi.is_some() {
                    document.detect_schema_type();
                    document.stamp_schema_type(document.schema_type);
                } else {
                    document.stamp_schema_type(self.schema_type);
                }
                document
            }
            None => {
                let mut document = Document::new(self.schema_type);
                if document.info.title.is_empty() {
                    document.info.title.clone_from(&self.title);
                }
                if document.info.description.is_none() {
                    document.info.description.clone_from(&self.description);
                }
                if document.info.version.is_empty() {
                    document.info.version.clone_from(&self.version);
                }
                document
            }
        };

        document.generator = Some(
            self.generator
                .clone()
                .unwrap_or_else(|| crate::GENERATOR_SIGNATURE.to_string()),
        );
        document
    }

    /// Whether `group_name` passes the group filter.
    pub(crate) fn includes_group(&self, group_name: Option<&str>) -> bool {
        self.group_names.is_empty()
            || group_name.is_some_and(|g| self.group_names.iter().any(|n| n == g))
    }

    pub(crate) fn run_post_process(&self, document: &mut Document) {
        if let Some(hook) = &self.post_process {
            hook(document);
        }
    }
}

impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("schema_type", &self.schema_type)
            .field("template", &self.template.is_some())
            .field("group_names", &self.group_names)
            .field("api_versions", &self.api_versions)
            .field("bearer_description", &self.bearer_description)
            .field("generator", &self.generator)
            .field("builtins", &self.builtins)
            .field("operation_processors", &self.operation_processors)
            .field("document_processors", &self.document_processors)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}
