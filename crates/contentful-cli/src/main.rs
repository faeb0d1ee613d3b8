//! contentful CLI entrypoint
//! Parses command-line arguments and dispatches to the core library.

mod client;

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use client::ManagementClient;

// External imports (alphabetized)
use anyhow::{bail, Context};
use clap::Parser;
use contentful_core::{
    field::Json, schema::ContentTypeSchema, ApiConfiguration, Config, GeneratedArtifact,
    Generator, Parameters, RequestUriBuilder, Resource, ResourceBuilder, TemplateManager,
};
use dialoguer::Confirm;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contentful")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate typed entry code from the content types of a space
    Generate {
        /// Configuration file (YAML or TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Space ID; overrides the configuration file
        #[arg(long)]
        space: Option<String>,
        /// Environment ID; overrides the configuration file
        #[arg(long)]
        environment: Option<String>,
        /// Output directory for generated code; overrides the configuration file
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Rust module path of the generated code, e.g. crate::content
        #[arg(long)]
        namespace: Option<String>,
        /// Directory with template overrides
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
        /// Overwrite existing files without asking
        #[arg(long)]
        force: bool,
    },
    /// Write a configuration file with default values
    Init {
        /// Space ID
        #[arg(long)]
        space: String,
        /// Output directory for generated code
        #[arg(long, default_value = "src/content")]
        output_dir: String,
        /// Path of the configuration file to write
        #[arg(long, default_value = "contentful.yaml")]
        path: PathBuf,
    },
    /// Print the request path of a resource type
    Uri {
        /// Resource type, e.g. Asset or ContentTypeSnapshot
        resource_type: String,
        /// Path parameter as name=value, e.g. --param space=cfexampleapi
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// ID of the resource; omit for the collection path
        #[arg(long)]
        id: Option<String>,
        /// Treat the type as a link type, e.g. WebhookDefinition
        #[arg(long)]
        link: bool,
    },
    /// List every registered resource type and its URI template
    Endpoints,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            config,
            space,
            environment,
            output_dir,
            namespace,
            template_dir,
            dry_run,
            force,
        } => {
            let mut config = match (config, space) {
                (Some(path), space) => {
                    let mut config = Config::from_file(&path)
                        .await
                        .with_context(|| format!("Failed to load {}", path.display()))?;
                    if let Some(space) = space {
                        config.space_id = space;
                    }
                    config
                }
                (None, Some(space)) => Config::new(space, "src/content"),
                (None, None) => bail!("Either --config or --space is required"),
            };
            if let Some(environment) = environment {
                config.environment_id = environment;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir.to_string_lossy().to_string();
            }
            if let Some(namespace) = namespace {
                config.namespace = namespace;
            }
            if let Some(template_dir) = template_dir {
                config.template_dir = Some(template_dir.to_string_lossy().to_string());
            }
            config.validate()?;

            generate(&config, dry_run, force).await?;
        }
        Commands::Init {
            space,
            output_dir,
            path,
        } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            let config = Config::new(space, output_dir);
            config.validate()?;
            config.save(&path).await?;
            println!("Wrote {}", path.display());
        }
        Commands::Uri {
            resource_type,
            params,
            id,
            link,
        } => {
            let configuration = ApiConfiguration::global();
            let descriptor = if link {
                configuration.resolve_link(&resource_type)?
            } else {
                configuration.resolve(resource_type.as_str())?
            };
            let parameters: Parameters = params.into_iter().collect();
            let path = RequestUriBuilder::build(&descriptor, &parameters, id.as_deref())?;
            match descriptor.host() {
                Some(host) => println!("{host}{path}"),
                None => println!("{path}"),
            }
        }
        Commands::Endpoints => {
            for descriptor in ApiConfiguration::global().descriptors() {
                println!(
                    "{:<22} {}",
                    descriptor.resource_type(),
                    descriptor.uri_template()
                );
            }
        }
    }
    Ok(())
}

async fn generate(config: &Config, dry_run: bool, force: bool) -> anyhow::Result<()> {
    let token = config.resolve_access_token().with_context(|| {
        format!(
            "No access token configured; set {}",
            contentful_core::config::ACCESS_TOKEN_ENV
        )
    })?;

    let client = ManagementClient::new(config.api_host.clone(), token)?;
    let payloads = client
        .content_types(&config.space_id, &config.environment_id, config.page_limit)
        .await?;
    info!(
        "Fetched {} content types from {}/{}",
        payloads.len(),
        config.space_id,
        config.environment_id
    );

    let schemas = collect_schemas(&ResourceBuilder::new(), &payloads);
    if schemas.is_empty() {
        bail!("No content types to generate code for");
    }

    let generator = match &config.template_dir {
        Some(dir) => Generator::with_templates(
            TemplateManager::with_overrides(dir)
                .await
                .with_context(|| format!("Failed to load templates from {dir}"))?,
        ),
        None => Generator::new()?,
    };
    let artifacts = generator.generate_all(&schemas, &config.namespace)?;

    let output_dir = Path::new(&config.output_dir);
    if dry_run {
        for artifact in &artifacts {
            println!("{}", output_dir.join(&artifact.path).display());
        }
        return Ok(());
    }

    if !force && has_entries(output_dir).await? {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "{} is not empty. Overwrite generated files?",
                output_dir.display()
            ))
            .default(false)
            .interact()?;
        if !proceed {
            println!("Nothing written");
            return Ok(());
        }
    }

    let written = write_artifacts(&artifacts, output_dir).await?;
    println!(
        "Generated {} files for {} content types in {}",
        written.len(),
        schemas.len(),
        output_dir.display()
    );
    Ok(())
}

/// Schemas of the payloads that build as content types; others are skipped with a warning
fn collect_schemas(builder: &ResourceBuilder, payloads: &[Json]) -> Vec<ContentTypeSchema> {
    let mut schemas = Vec::with_capacity(payloads.len());
    for payload in payloads {
        let id = payload
            .pointer("/sys/id")
            .and_then(Json::as_str)
            .unwrap_or("<unknown>");
        match builder.build(payload, None) {
            Ok(Resource::ContentType(content_type)) => schemas.push(content_type.schema()),
            Ok(other) => warn!("Skipping {id}: expected a content type, got {}", other.kind()),
            Err(e) => warn!("Skipping content type {id}: {e}"),
        }
    }
    schemas
}

async fn has_entries(dir: &Path) -> anyhow::Result<bool> {
    match tokio::fs::read_dir(dir).await {
        Ok(mut entries) => Ok(entries.next_entry().await?.is_some()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", dir.display())),
    }
}

async fn write_artifacts(
    artifacts: &[GeneratedArtifact],
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = artifact
            .write_to(output_dir)
            .await
            .with_context(|| format!("Failed to write {}", artifact.path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got \"{raw}\"")),
    }
}
