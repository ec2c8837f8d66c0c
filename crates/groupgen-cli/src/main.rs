//! Groupgen CLI
//!
//! - `generate`: run group-interface synthesis over a JSON generation document
//!   (schema set, code outline, compiled environment) and write the rewired
//!   outline plus a report.
//! - `episode`: list the group → interface bindings an episode publishes.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use groupgen_core::{
    CollectingDiagnostics, GenerationInput, GeneratorConfig, GroupInterfaceGenerator,
};
use groupgen_episode::{Availability, EpisodeIndex, EpisodeSource};
use groupgen_model::{StandardNameConverter, TypeEnvironment};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod document;

use document::{GenerationDocument, OutputDocument, ReportDocument};

#[derive(Parser)]
#[command(name = "groupgen")]
#[command(
    author,
    version,
    about = "Groupgen: interfaces for XML Schema model and attribute groups"
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize group interfaces and bind them to the generated classes.
    Generate(GenerateArgs),
    /// List the interfaces an episode publishes.
    Episode {
        /// Path or `file:`/`http(s):` URL of the episode.
        location: String,
        /// Compiled interface names to check availability against.
        #[arg(long = "compiled")]
        compiled: Vec<String>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Generation document (JSON: `{ schema, outline, environment }`).
    #[arg(long)]
    input: PathBuf,
    /// Generator configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Upstream episode (path, `file:` or `http(s):` URL); overrides the config file.
    #[arg(long)]
    episode: Option<String>,
    /// Declare setters on interfaces (`--declare-setters=false` for getters only).
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    declare_setters: Option<bool>,
    /// Declare nested builder interfaces (implies the fluent-builder plugin).
    #[arg(long)]
    builder_interface: bool,
    /// Write an episode for the synthesized interfaces.
    #[arg(long)]
    emit_episode: Option<PathBuf>,
    /// Output document; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(episode) = &args.episode {
        config.upstream_episode = Some(episode.clone());
    }
    if let Some(declare_setters) = args.declare_setters {
        config.declare_setters = declare_setters;
    }
    if args.builder_interface {
        config.declare_builder_interface = true;
        config.plugins.fluent_builder = true;
    }

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let mut document: GenerationDocument = serde_json::from_str(&text)
        .with_context(|| format!("invalid generation document {}", args.input.display()))?;
    tracing::debug!(
        input = %args.input.display(),
        classes = document.outline.classes.len(),
        model_groups = document.schema.model_groups.len(),
        attribute_groups = document.schema.attribute_groups.len(),
        "loaded generation document"
    );

    let mut generator = GroupInterfaceGenerator::from_config(&config)?;
    if args.emit_episode.is_some() {
        generator = generator.with_episode_builder();
    }

    let mut diagnostics = CollectingDiagnostics::new();
    let result = generator.generate(GenerationInput {
        schema: &document.schema,
        outline: &mut document.outline,
        names: &StandardNameConverter,
        environment: &document.environment,
        diagnostics: &mut diagnostics,
    });

    for warning in &diagnostics.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    let report = match result {
        Ok(report) => report,
        Err(err) => {
            for error in &diagnostics.errors {
                eprintln!("{} {}", "error:".red().bold(), error);
            }
            return Err(err).context("group interface generation failed");
        }
    };

    if let Some(path) = &args.emit_episode {
        if let Some(episode) = generator.take_episode_builder() {
            episode
                .write_to(path)
                .with_context(|| format!("failed to write episode {}", path.display()))?;
            eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
        }
    }

    let output = OutputDocument {
        outline: &document.outline,
        report: ReportDocument::from(&report),
    };
    let json = serde_json::to_string_pretty(&output)?;
    match &args.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
        }
        None => println!("{json}"),
    }

    eprintln!(
        "{} {} model-group and {} attribute-group interfaces, {} classes bound, {} warnings",
        "ok".green().bold(),
        report.model_group_interfaces.len(),
        report.attribute_group_interfaces.len(),
        report.associations.len(),
        report.warnings.len()
    );
    Ok(())
}

fn cmd_episode(location: &str, compiled: &[String]) -> Result<()> {
    let source = EpisodeSource::parse(location)?;
    let environment: TypeEnvironment = compiled.iter().cloned().collect();
    let index = EpisodeIndex::load(&source, &environment)
        .with_context(|| format!("failed to load episode {source}"))?;
    if index.is_empty() {
        bail!("episode {source} publishes no interfaces");
    }
    for (group, reference) in index.iter() {
        let availability = match reference.availability {
            Availability::Compiled => "compiled".green(),
            Availability::Missing => "missing".yellow(),
        };
        println!("{group} → {} ({availability})", reference.type_ref);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Generate(args) => cmd_generate(&args),
        Commands::Episode { location, compiled } => cmd_episode(&location, &compiled),
    }
}
