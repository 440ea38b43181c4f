//! CLI for `specforge`.
//!
//! Standalone binary: reads an endpoint manifest and writes a document.
//!
//! # Subcommands
//!
//! ```text
//! # Assemble a document from a manifest
//! specforge generate \
//!   --manifest api/endpoints.yaml \
//!   --config api/specforge.yaml \
//!   --cargo-toml Cargo.toml \
//!   --output api/openapi.yaml
//!
//! # Start from a hand-written template, JSON output, public group only
//! specforge generate --manifest api/endpoints.yaml \
//!   --template api/base.yaml --group public --format json
//!
//! # Print what the manifest declares, grouped by owner
//! specforge discover --manifest api/endpoints.yaml
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use specforge::{
    DocumentGenerator, EndpointProvider, GeneratorSettings, HttpMethod, ManifestProvider,
    OutputFormat, ProjectConfig,
};
use tracing_subscriber::EnvFilter;

/// OpenAPI / Swagger document generator for discovered service endpoints.
#[derive(Parser)]
#[command(name = "specforge", version, about)]
enum Cli {
    /// Assemble a document from an endpoint manifest.
    Generate(GenerateArgs),

    /// Print the endpoints a manifest declares, grouped by owner.
    Discover(DiscoverArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Path to the endpoint manifest YAML.
    #[arg(short, long)]
    manifest: PathBuf,

    /// Path to a project config YAML file.
    ///
    /// Provides metadata defaults, filters, and processor toggles.
    /// CLI flags override values from the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template document (YAML or JSON) to start from.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format. Defaults to the `--output` extension, else YAML.
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Document version. Mutually exclusive with `--cargo-toml`.
    #[arg(long, conflicts_with = "cargo_toml")]
    version: Option<String>,

    /// Read the document version from this `Cargo.toml`.
    #[arg(long)]
    cargo_toml: Option<PathBuf>,

    /// Only document endpoints in these API-explorer groups.
    /// Overrides `group_names` from the config file.
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Add the Bearer security scheme.
    #[arg(long)]
    security: bool,
}

#[derive(Parser)]
struct DiscoverArgs {
    /// Path to the endpoint manifest YAML.
    #[arg(short, long)]
    manifest: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => Self::Yaml,
            Format::Json => Self::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli {
        Cli::Generate(args) => run_generate(&args),
        Cli::Discover(args) => run_discover(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    // Load project config (if provided), otherwise use defaults
    let project = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            ProjectConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => ProjectConfig::default(),
    };

    let provider = ManifestProvider::from_path(&args.manifest)
        .with_context(|| format!("Failed to read manifest: {}", args.manifest.display()))?;

    let mut settings = GeneratorSettings::new().with_project_config(&project);
    if let Some(path) = &args.template {
        let template = specforge::load_template(path)
            .with_context(|| format!("Failed to load template: {}", path.display()))?;
        settings = settings.template(template);
    }
    if let Some(version) = resolve_version(args.version.as_ref(), args.cargo_toml.as_ref())? {
        settings = settings.version(&version);
    }
    if !args.groups.is_empty() {
        let refs: Vec<&str> = args.groups.iter().map(String::as_str).collect();
        settings = settings.group_names(&refs);
    }
    if args.security {
        settings = settings.add_security(true);
    }

    let document = DocumentGenerator::new(settings)
        .generate(&provider)
        .context("Failed to generate document")?;

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or_else(|| format_for_path(args.output.as_deref()));
    let output = specforge::render(&document, format).context("Failed to render document")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote document");
        }
        None => print!("{output}"),
    }

    Ok(())
}

/// JSON for `.json` outputs, YAML otherwise.
fn format_for_path(path: Option<&Path>) -> OutputFormat {
    match path.and_then(Path::extension).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    }
}

/// Resolve version from the explicit flag or a Cargo.toml.
///
/// `None` keeps the config (or default) version.
fn resolve_version(
    explicit: Option<&String>,
    cargo_toml: Option<&PathBuf>,
) -> anyhow::Result<Option<String>> {
    match (explicit, cargo_toml) {
        (Some(v), _) => Ok(Some(v.clone())),
        (_, Some(path)) => read_cargo_version(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn run_discover(args: &DiscoverArgs) -> anyhow::Result<()> {
    let provider = ManifestProvider::from_path(&args.manifest)
        .with_context(|| format!("Failed to read manifest: {}", args.manifest.display()))?;
    let endpoints = provider.discover().context("Failed to discover endpoints")?;

    println!("=== Endpoints ===");

    let groups = specforge::group_by_owner(endpoints);
    for group in &groups {
        println!();
        let ignored = if group.owner.annotations.is_ignored() {
            " [ignored]"
        } else {
            ""
        };
        println!(
            "{} ({}): {} endpoints{ignored}",
            group.owner.name,
            group.owner.id,
            group.endpoints.len()
        );
        for endpoint in &group.endpoints {
            let method = endpoint.method.unwrap_or(HttpMethod::Get);
            let path = specforge::internal::normalize_route(&endpoint.route);
            let id = specforge::internal::base_operation_id(endpoint);
            let marker = if endpoint.annotations.is_ignored() {
                " [ignored]"
            } else {
                ""
            };
            println!("  {method} {path} → {id}{marker}");
        }
    }

    Ok(())
}

/// Read `version` from a Cargo.toml `[package]` or `[workspace.package]`.
fn read_cargo_version(path: &Path) -> anyhow::Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let doc: toml::Table =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    if let Some(v) = doc
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(toml::Value::as_str)
    {
        return Ok(v.to_string());
    }

    if let Some(v) = doc
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(toml::Value::as_str)
    {
        return Ok(v.to_string());
    }

    bail!("No version found in {}", path.display());
}
