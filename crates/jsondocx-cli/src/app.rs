//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use jsondocx_model::{DocumentDefinition, Inline, Node};
use jsondocx_ooxml::{DocxGenerator, FsLoader, GeneratorOptions};

/// Options file picked up next to the input when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "jsondocx.toml";

/// Output format for `check`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "jsondocx")]
#[command(author, version, about = "JSON document definitions to DOCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON definition to DOCX
    Render {
        /// Input JSON definition
        input: PathBuf,

        /// Output DOCX file (defaults to the input with a .docx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generator options (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a JSON definition and print a summary
    Check {
        /// Input JSON definition
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI
pub fn run_cli() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(render_command(&input, output.as_deref(), config.as_deref()))?;
        }
        Commands::Check { input, format } => {
            check_command(&input, format)?;
        }
    }

    Ok(())
}

fn init_logging() {
    // A second installation (e.g. from tests) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the render command
///
/// Image paths in the definition are resolved relative to the input file.
/// Returns the path of the written document.
pub async fn render_command(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<PathBuf> {
    println!("jsondocx v{}", jsondocx_model::VERSION);
    println!("Rendering: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let definition = read_definition(input)?;
    let options = load_options(input, config)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("docx"),
    };

    let base_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let generator = DocxGenerator::new(definition)
        .with_options(options)
        .with_loader(FsLoader::with_base_dir(base_dir));

    let written = generator
        .save(&output_path)
        .await
        .with_context(|| format!("Failed to render {}", input.display()))?;

    println!("  Wrote: {}", written.display());
    Ok(written)
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<DefinitionSummary> {
    let definition = read_definition(input)?;
    let summary = summarize(&definition);

    match format {
        OutputFormat::Text => {
            println!("{}: valid definition", input.display());
            println!("  Top-level nodes: {}", summary.nodes);
            println!("  Paragraphs:      {}", summary.paragraphs);
            println!("  Tables:          {}", summary.tables);
            println!("  Links:           {}", summary.links);
            println!(
                "  Images:          {} ({} from paths)",
                summary.images, summary.path_images
            );
            println!("  Header:          {}", yes_no(summary.has_header));
            println!("  Footer:          {}", yes_no(summary.has_footer));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(summary)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn read_definition(input: &Path) -> Result<DocumentDefinition> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    DocumentDefinition::from_json_str(&json)
        .with_context(|| format!("Invalid document definition: {}", input.display()))
}

fn load_options(input: &Path, config: Option<&Path>) -> Result<GeneratorOptions> {
    let config_path = match config {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = input
                .parent()
                .unwrap_or(Path::new("."))
                .join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(GeneratorOptions::default());
            }
            candidate
        }
    };

    println!("  Loading config: {}", config_path.display());
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let options = GeneratorOptions::from_toml_str(&content)
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    debug!("Generator options: {:?}", options);
    Ok(options)
}

/// Counts reported by `check`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefinitionSummary {
    pub nodes: usize,
    pub paragraphs: usize,
    pub tables: usize,
    pub links: usize,
    pub images: usize,
    pub path_images: usize,
    pub has_header: bool,
    pub has_footer: bool,
}

/// Count the content of a definition, header and footer included
pub fn summarize(definition: &DocumentDefinition) -> DefinitionSummary {
    let mut summary = DefinitionSummary {
        nodes: definition.content.len(),
        has_header: definition.header.is_some(),
        has_footer: definition.footer.is_some(),
        ..Default::default()
    };

    let sections = std::iter::once(&definition.content)
        .chain(definition.header.as_ref().map(|h| &h.content))
        .chain(definition.footer.as_ref().map(|f| &f.content));

    for node in sections.flatten() {
        match node {
            Node::PlainText(_) | Node::Text(_) => {}
            Node::Link(_) => summary.links += 1,
            Node::Image(image) => summary.count_image(image.is_unresolved()),
            Node::Paragraph(paragraph) => {
                summary.paragraphs += 1;
                summary.count_inlines(&paragraph.content);
            }
            Node::Table(table) => {
                summary.tables += 1;
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    summary.count_inlines(&cell.content);
                }
            }
        }
    }

    summary
}

impl DefinitionSummary {
    fn count_image(&mut self, from_path: bool) {
        self.images += 1;
        if from_path {
            self.path_images += 1;
        }
    }

    fn count_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Link(_) => self.links += 1,
                Inline::Image(image) => self.count_image(image.is_unresolved()),
                Inline::PlainText(_) | Inline::Text(_) => {}
            }
        }
    }
}
