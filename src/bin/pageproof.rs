//! CLI binary for pageproof.
//!
//! A thin shim over the library crate: each subcommand maps flags to one
//! library entry point and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pageproof::{
    export_pages, extract_text, load_page_map, ConversionConfig, VlmVisionClient,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Export PDF pages as enhanced PNGs (grayscale, 2.0 contrast, 300 DPI)
  pageproof convert report.pdf

  # Export in colour at a lower resolution
  pageproof convert report.pdf --no-grayscale --dpi 150

  # Extract text from the exported images into output.md
  pageproof extract --image-dir png_output -o output.md

  # Extract with an explicit provider and model
  pageproof extract --provider openai --model gpt-4.1-nano

  # Print one page's extracted section for proofreading
  pageproof show output.md --page 3

  # Dump the whole page map as JSON
  pageproof show output.md --json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY       OpenAI API key
  ANTHROPIC_API_KEY    Anthropic API key
  GEMINI_API_KEY       Google Gemini API key
  PDFIUM_LIB_PATH      Path to an existing libpdfium shared library
"#;

/// Convert PDF pages to PNGs, extract text with Vision LLMs, verify alignment.
#[derive(Parser, Debug)]
#[command(
    name = "pageproof",
    version,
    about = "Convert PDF pages to enhanced PNGs and extract their text with Vision LLMs",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PAGEPROOF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PAGEPROOF_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every PDF page as an enhanced, numbered PNG.
    Convert {
        /// Source PDF file path.
        #[arg(default_value = "document.pdf")]
        input: PathBuf,

        /// Output directory for page images.
        #[arg(short, long, env = "PAGEPROOF_OUTPUT_DIR", default_value = "png_output")]
        output_dir: PathBuf,

        /// Contrast multiplier (>= 0; 1.0 = identity).
        #[arg(long, env = "PAGEPROOF_CONTRAST", default_value_t = 2.0)]
        contrast: f32,

        /// Rendering DPI (> 0).
        #[arg(long, env = "PAGEPROOF_DPI", default_value_t = 300)]
        dpi: u32,

        /// Keep colour instead of collapsing to grayscale.
        #[arg(long)]
        no_grayscale: bool,
    },

    /// Extract text from exported page images into a markdown file.
    Extract {
        /// Directory holding the numbered page images.
        #[arg(long, env = "PAGEPROOF_IMAGE_DIR", default_value = "png_output")]
        image_dir: PathBuf,

        /// Markdown output file (truncated at start, then appended per page).
        #[arg(short, long, env = "PAGEPROOF_OUTPUT", default_value = "output.md")]
        output: PathBuf,

        /// Vision provider: openai, anthropic, gemini, ollama, azure.
        /// Auto-detected from API key env vars if not set.
        #[arg(long, env = "PAGEPROOF_PROVIDER")]
        provider: Option<String>,

        /// Vision model ID (e.g. gpt-4.1-nano).
        #[arg(long, env = "PAGEPROOF_MODEL")]
        model: Option<String>,
    },

    /// Print extracted sections from a page-delimited markdown file.
    Show {
        /// The markdown file produced by `extract`.
        #[arg(default_value = "output.md")]
        markdown: PathBuf,

        /// 1-indexed page to print. Omit to print every page in order.
        #[arg(short, long)]
        page: Option<usize>,

        /// Dump the full page map as JSON (keys are 0-indexed).
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            input,
            output_dir,
            contrast,
            dpi,
            no_grayscale,
        } => {
            let config = ConversionConfig::builder()
                .input_pdf(input)
                .output_dir(&output_dir)
                .contrast_factor(contrast)
                .dpi(dpi)
                .grayscale(!no_grayscale)
                .build()
                .context("Invalid configuration")?;

            let pages = export_pages(&config).await.context("Export failed")?;
            if !cli.quiet {
                eprintln!("{} pages written to {}", pages, output_dir.display());
            }
        }

        Command::Extract {
            image_dir,
            output,
            provider,
            model,
        } => {
            let client = VlmVisionClient::from_env(provider.as_deref(), model.as_deref())
                .context("No vision provider available")?;

            let stats = extract_text(&image_dir, &output, &client)
                .await
                .context("Extraction failed")?;

            if !cli.quiet {
                eprintln!(
                    "{}/{} pages extracted ({} failed) -> {}",
                    stats.processed_pages,
                    stats.attempted_pages,
                    stats.failed_pages,
                    output.display()
                );
            }
        }

        Command::Show {
            markdown,
            page,
            json,
        } => {
            let map = load_page_map(&markdown)
                .with_context(|| format!("Failed to load {}", markdown.display()))?;

            let stdout = io::stdout();
            let mut out = stdout.lock();

            if json {
                let rendered =
                    serde_json::to_string_pretty(&map).context("Failed to serialise page map")?;
                writeln!(out, "{rendered}")?;
            } else if let Some(page) = page {
                let key = page.checked_sub(1).context("Pages are 1-indexed")?;
                let section = map
                    .get(&key)
                    .with_context(|| format!("No section for page {page}"))?;
                writeln!(out, "{section}")?;
            } else {
                let mut keys: Vec<_> = map.keys().copied().collect();
                keys.sort_unstable();
                for key in keys {
                    writeln!(out, "{}\n", map[&key])?;
                }
            }
        }
    }

    Ok(())
}
