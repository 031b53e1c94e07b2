//! CLI for competitor website reports and slide decks.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pitchkit_core::catalog::{builtin_deck, BUILTIN_DECKS};
use pitchkit_core::config::{API_BASE_ENV, API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_MODEL, MODEL_ENV};
use pitchkit_core::{
    deck_file_name, AppConfig, DeckFile, DeckOutline, DeckStyle, FetchConfig, GeneratorConfig,
    Report, Rgb, SlideSpec,
};
use pitchkit_pptx::{BuiltDeck, DeckBuilder, DeckReader};
use pitchkit_web::AppContext;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Competitor website reports and PPTX pitch decks.
#[derive(Parser, Debug)]
#[command(name = "pitchkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a competitor website and write a dated text report
    Report(ReportArgs),
    /// Build a deck from a JSON spec or a built-in deck
    Deck(DeckArgs),
    /// Generate a deck about a topic with the completion model
    Topic(TopicArgs),
    /// Print the outline of an existing .pptx file
    Inspect {
        /// Deck to read
        input: PathBuf,
    },
}

/// Completion backend options shared by the generating commands.
#[derive(Args, Debug)]
struct GeneratorArgs {
    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = API_BASE_ENV, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Completion model name
    #[arg(long, env = MODEL_ENV, default_value = DEFAULT_MODEL)]
    model: String,

    /// API credential
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

impl GeneratorArgs {
    fn app_config(&self, timeout: Duration) -> AppConfig {
        AppConfig {
            fetch: FetchConfig {
                timeout,
                ..Default::default()
            },
            generator: GeneratorConfig {
                api_base: self.api_base.clone(),
                model: self.model.clone(),
                api_key: self.api_key.clone(),
            },
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Competitor website URL
    #[arg(default_value = "")]
    url: String,

    /// Output directory for the report (default: current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report to stdout without writing a file
    #[arg(short, long)]
    print: bool,

    /// Page fetch timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Args, Debug)]
struct DeckArgs {
    /// JSON deck description (default: the built-in deck)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Built-in deck to use when no spec is given
    #[arg(long, default_value = "valuezen")]
    builtin: String,

    /// Output .pptx path (default: the deck's own file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args, Debug)]
struct TopicArgs {
    /// Presentation topic
    topic: String,

    /// Number of slides to ask for
    #[arg(short = 'n', long, default_value = "5")]
    slides: usize,

    /// Output .pptx path (default: <topic>_presentation.pptx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(flatten)]
    generator: GeneratorArgs,
}

/// Rendering overrides shared by the deck-building commands.
#[derive(Args, Debug)]
struct RenderArgs {
    /// Template deck to take the theme and slide size from
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory holding images referenced by slides
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Solid background colour as RRGGBB
    #[arg(long)]
    background: Option<Rgb>,

    /// Font face for all text
    #[arg(long)]
    font: Option<String>,
}

impl RenderArgs {
    fn builder(&self, mut style: DeckStyle, default_assets: Option<&Path>) -> DeckBuilder {
        if let Some(color) = self.background {
            style = style.with_background(color);
        }
        if let Some(font) = &self.font {
            style = style.with_font(font.clone());
        }

        let mut builder = DeckBuilder::new(style);
        if let Some(dir) = self.assets.as_deref().or(default_assets) {
            builder = builder.with_asset_root(dir);
        }
        if let Some(template) = &self.template {
            builder = builder.with_template(template);
        }
        builder
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &cli.command {
        Command::Report(args) => run_report(args),
        Command::Deck(args) => run_deck(args, cli.verbose),
        Command::Topic(args) => run_topic(args, cli.verbose),
        Command::Inspect { input } => run_inspect(input),
    }
}

fn run_report(args: &ReportArgs) -> Result<()> {
    if args.url.trim().is_empty() {
        log::warn!("Report requested without a URL");
        eprintln!("Please enter a valid competitor website URL.");
        return Ok(());
    }

    let context = AppContext::initialize(args.generator.app_config(Duration::from_secs(args.timeout)))?;

    eprintln!("Analyzing {}...", args.url.trim());
    let report = context
        .analyze_competitor(&args.url)
        .map_err(|e| {
            let message = failure_message(&e);
            anyhow::Error::new(e).context(message)
        })?;

    eprintln!("Analysis complete!");
    println!("{}", report.text());

    if !args.print {
        let path = report_path(args.output.as_deref())?;
        fs::write(&path, report.text())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

/// User-facing summary for a failed analysis.
fn failure_message(error: &pitchkit_core::Error) -> &'static str {
    match error {
        pitchkit_core::Error::Fetch(_) => "Failed to extract website content",
        pitchkit_core::Error::Generation(_) => "Failed to generate the AI report",
        pitchkit_core::Error::Deck(_) => "Analysis failed",
    }
}

/// Dated report path inside `output_dir`, creating the directory if needed.
fn report_path(output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_name = Report::file_name_today();
    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            Ok(dir.join(file_name))
        }
        None => Ok(PathBuf::from(file_name)),
    }
}

fn run_deck(args: &DeckArgs, verbose: bool) -> Result<()> {
    let (deck_file, spec_dir) = match &args.spec {
        Some(path) => (load_deck_file(path)?, path.parent().map(Path::to_path_buf)),
        None => {
            let deck = builtin_deck(&args.builtin).with_context(|| {
                format!(
                    "Unknown built-in deck '{}' (available: {})",
                    args.builtin,
                    BUILTIN_DECKS.join(", ")
                )
            })?;
            (deck, None)
        }
    };

    let output = args
        .output
        .clone()
        .or_else(|| deck_file.file_name.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("presentation.pptx"));

    let builder = args
        .render
        .builder(deck_file.style.clone(), spec_dir.as_deref())
        .with_title(deck_title(&deck_file.slides, &output));
    write_deck(&builder, &deck_file.slides, &output, verbose)
}

fn run_topic(args: &TopicArgs, verbose: bool) -> Result<()> {
    if args.topic.trim().is_empty() {
        bail!("Topic must not be empty");
    }
    if args.slides == 0 {
        bail!("Slide count must be at least 1");
    }

    let context = AppContext::initialize(args.generator.app_config(FetchConfig::default().timeout))?;
    eprintln!("Generating {} slide(s) about '{}'...", args.slides, args.topic);
    let slides = context
        .topic_deck(&args.topic, args.slides)
        .context("Failed to generate slide content")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(deck_file_name(&args.topic)));
    let builder = args
        .render
        .builder(DeckStyle::default(), None)
        .with_title(args.topic.trim());
    write_deck(&builder, &slides, &output, verbose)
}

fn run_inspect(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let outline = DeckReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", input.display()))?;
    print!("{}", render_outline(&outline));
    Ok(())
}

fn load_deck_file(path: &Path) -> Result<DeckFile> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid deck spec {}", path.display()))
}

fn deck_title(slides: &[SlideSpec], output: &Path) -> String {
    slides
        .first()
        .map(|s| s.title.clone())
        .or_else(|| {
            output
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Presentation".to_string())
}

fn write_deck(builder: &DeckBuilder, slides: &[SlideSpec], output: &Path, verbose: bool) -> Result<()> {
    let deck: BuiltDeck = builder
        .write_to_file(slides, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    for warning in &deck.warnings {
        eprintln!("Warning: {}", warning);
    }
    if verbose {
        eprintln!("  {} bytes", deck.bytes.len());
    }
    eprintln!(
        "Presentation saved as {} ({} slides)",
        output.display(),
        deck.slide_count
    );
    Ok(())
}

/// Human-readable outline: one block per slide, bullets indented by level.
fn render_outline(outline: &DeckOutline) -> String {
    let mut out = String::new();
    for slide in &outline.slides {
        out.push_str(&format!("Slide {}", slide.number));
        if let Some(color) = &slide.background {
            out.push_str(&format!(" [background {}]", color));
        }
        if slide.pictures > 0 {
            out.push_str(&format!(" [{} picture(s)]", slide.pictures));
        }
        out.push('\n');
        for paragraph in slide.paragraphs() {
            if paragraph.text.is_empty() {
                continue;
            }
            let indent = "  ".repeat(paragraph.level as usize + 1);
            out.push_str(&format!("{}{}\n", indent, paragraph.text.trim()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pitchkit_core::{ParagraphOutline, ShapeOutline, SlideOutline};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_deck_overrides() {
        let cli = Cli::try_parse_from([
            "pitchkit",
            "deck",
            "--background",
            "#112233",
            "--font",
            "Arial",
            "-o",
            "out.pptx",
        ])
        .unwrap();

        let Command::Deck(args) = cli.command else {
            panic!("expected deck command");
        };
        assert_eq!(args.render.background, Some(Rgb(0x11, 0x22, 0x33)));
        assert_eq!(args.render.font.as_deref(), Some("Arial"));
        assert_eq!(args.builtin, "valuezen");
    }

    #[test]
    fn test_topic_defaults() {
        let cli = Cli::try_parse_from(["pitchkit", "topic", "Cloud costs"]).unwrap();
        let Command::Topic(args) = cli.command else {
            panic!("expected topic command");
        };
        assert_eq!(args.slides, 5);
        assert_eq!(args.generator.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_failure_message_by_class() {
        let fetch = pitchkit_core::Error::from(pitchkit_core::FetchError::EmptyContent(
            "https://example.com/".to_string(),
        ));
        let generation = pitchkit_core::Error::from(pitchkit_core::GenerationError::EmptyOutput);

        assert_eq!(failure_message(&fetch), "Failed to extract website content");
        assert_eq!(failure_message(&generation), "Failed to generate the AI report");
    }

    #[test]
    fn test_report_path_in_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let path = report_path(Some(&dir)).unwrap();
        assert!(dir.is_dir());
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(Report::file_name_today().as_str())
        );
    }

    #[test]
    fn test_render_outline() {
        let mut slide = SlideOutline::new(1);
        slide.background = Some("FFA500".to_string());
        slide.shapes.push(ShapeOutline {
            x: 0,
            y: 0,
            paragraphs: vec![
                ParagraphOutline {
                    level: 0,
                    text: "Title".to_string(),
                },
                ParagraphOutline {
                    level: 1,
                    text: "• point".to_string(),
                },
            ],
        });
        let outline = DeckOutline {
            slides: vec![slide],
        };

        assert_eq!(
            render_outline(&outline),
            "Slide 1 [background FFA500]\n  Title\n    • point\n"
        );
    }

    #[test]
    fn test_deck_title_falls_back_to_file_stem() {
        assert_eq!(deck_title(&[], Path::new("Launch.pptx")), "Launch");
    }
}
