//! Typed error enum for the `specforge` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.
//!
//! Pipeline rejections are not errors: a rejected candidate is dropped and
//! the run continues. Everything in this enum aborts the run.

use specforge_model::HttpMethod;

/// Errors produced by `specforge` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config, manifest, or template files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Two endpoints map to the same verb and normalized path.
    ///
    /// Fix the routes or suppress one of the endpoints; the generator never
    /// overwrites an existing operation.
    #[error(
        "the method '{method}' on path '{path}' is registered multiple times; \
         check the route templates or ignore one of the endpoints"
    )]
    OperationConflict {
        /// Conflicting verb.
        method: HttpMethod,
        /// Normalized path.
        path: String,
    },

    /// The schema resolver could not produce a schema for a type.
    #[error("failed to resolve schema for type '{type_id}': {message}")]
    SchemaResolution {
        /// Identity of the unresolved type.
        type_id: String,
        /// Resolver-supplied reason.
        message: String,
    },

    /// The endpoint discovery provider failed.
    #[error("endpoint discovery failed: {message}")]
    Discovery {
        /// Provider-supplied reason.
        message: String,
    },

    /// An operation or document processor failed.
    #[error("processor '{processor}' failed: {message}")]
    Processor {
        /// Processor name.
        processor: String,
        /// Processor-supplied reason.
        message: String,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
