//! unocr CLI - OCR transcription formatting tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unocr::batch::{self, DiscoverOptions, FileOutcome, CONSOLIDATED_FILE_NAME, OUTPUT_DIR};
use unocr::{
    Document, FormatStats, HeadingWindow, JsonFormat, Metadata, ParseOptions, RenderOptions, Tag,
    TranscriptParser,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "unocr")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn raw OCR book transcriptions into structured Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a transcription file or every transcription in a directory
    #[command(alias = "fmt")]
    Format {
        /// Transcription file or directory
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output file (single input) or directory (directory input)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Write JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Merge every transcription in a directory into one book
    Consolidate {
        /// Directory with transcription files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output file (defaults to livro-completo.md inside DIR)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show the tag assigned to each kept line
    Classify {
        /// Transcription file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by the processing commands.
#[derive(Args)]
struct CommonArgs {
    /// TOML file with parse options
    #[arg(long, value_name = "TOML", env = "UNOCR_CONFIG")]
    config: Option<PathBuf>,

    /// Book title (header, and stripped as a running header)
    #[arg(long, env = "UNOCR_TITLE")]
    title: Option<String>,

    /// Book author (header, and stripped as a running footer)
    #[arg(long, env = "UNOCR_AUTHOR")]
    author: Option<String>,

    /// Paragraphs must be longer than this many characters
    #[arg(long, value_name = "CHARS")]
    min_paragraph: Option<usize>,

    /// Maximum number of index entries
    #[arg(long, value_name = "N")]
    index_cap: Option<usize>,

    /// Titles must be longer than this many characters
    #[arg(long, value_name = "CHARS")]
    heading_min: Option<usize>,

    /// Headings must be shorter than this many characters
    #[arg(long, value_name = "CHARS")]
    heading_max: Option<usize>,

    /// Skip cover and catalog pages before the first content keyword
    #[arg(long)]
    skip_front_matter: bool,

    /// Leave the index block out of the output
    #[arg(long)]
    no_index: bool,

    /// Leave the harvested table of contents out of the output
    #[arg(long)]
    no_contents: bool,

    /// Include YAML frontmatter
    #[arg(short, long)]
    frontmatter: bool,
}

impl CommonArgs {
    /// Parse options from the config file, overridden by flags.
    fn parse_options(&self) -> CliResult<ParseOptions> {
        let mut options = match &self.config {
            Some(path) => {
                log::debug!("Loading parse options from {}", path.display());
                ParseOptions::from_toml_str(&fs::read_to_string(path)?)?
            }
            None => ParseOptions::default(),
        };

        if let Some(ref title) = self.title {
            options = options.with_title(title.clone());
        }
        if let Some(ref author) = self.author {
            options = options.with_author(author.clone());
        }
        if let Some(len) = self.min_paragraph {
            options = options.with_min_paragraph_len(len);
        }
        if let Some(cap) = self.index_cap {
            options = options.with_index_cap(cap);
        }
        if self.heading_min.is_some() || self.heading_max.is_some() {
            let window = HeadingWindow {
                min_len: self.heading_min.unwrap_or(options.heading.min_len),
                max_len: self.heading_max.unwrap_or(options.heading.max_len),
                ..options.heading
            };
            options = options.with_heading_window(window);
        }
        if self.skip_front_matter {
            options = options.with_front_matter_skip(true);
        }

        Ok(options)
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_contents(!self.no_contents)
            .with_index(!self.no_index)
            .with_frontmatter(self.frontmatter)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Format {
            input,
            output,
            json,
            sequential,
            common,
        } => cmd_format(&input, output.as_deref(), json, sequential, &common),
        Commands::Consolidate {
            dir,
            output,
            common,
        } => cmd_consolidate(&dir, output.as_deref(), &common),
        Commands::Classify { input, common } => cmd_classify(&input, &common),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_format(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    sequential: bool,
    common: &CommonArgs,
) -> CliResult<()> {
    let mut options = common.parse_options()?;
    if sequential {
        options = options.sequential();
    }
    let render_options = common.render_options();
    let parser = TranscriptParser::new(options)?;

    if !input.is_dir() {
        let doc = parser.parse_file(input)?;
        let content = render(&doc, &render_options, json)?;

        if let Some(path) = output {
            fs::write(path, &content)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", content);
        }
        return Ok(());
    }

    let paths = batch::discover(input, &DiscoverOptions::default())?;
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.join(OUTPUT_DIR));
    fs::create_dir_all(&output_dir)?;

    let pb = progress_bar(paths.len() as u64)?;
    pb.set_message("Formatting...");
    let outcomes = batch::parse_files(&parser, &paths, parser.options().parallel);

    let failed = write_outcomes(&outcomes, &output_dir, &render_options, json, &pb);
    pb.finish_with_message("Done!");

    let mut total = FormatStats::new();
    for doc in outcomes.iter().filter_map(|o| o.result.as_ref().ok()) {
        total.merge(&doc.stats);
    }
    print_stats(&total);

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, outcomes.len()).into());
    }
    println!(
        "\n{} {} files written to {}",
        "Done!".green().bold(),
        outcomes.len(),
        output_dir.display()
    );
    Ok(())
}

/// Write every parsed document into `output_dir`. A file that fails to parse,
/// render or write is reported and skipped; returns the number of such files.
fn write_outcomes(
    outcomes: &[FileOutcome],
    output_dir: &Path,
    render_options: &RenderOptions,
    json: bool,
    pb: &ProgressBar,
) -> usize {
    let mut failed = 0;
    for outcome in outcomes {
        let written = match &outcome.result {
            Ok(doc) => write_document(doc, &outcome.path, output_dir, render_options, json),
            Err(e) => Err(e.to_string().into()),
        };
        match written {
            Ok(target) => pb.println(format!(
                "{} {} -> {}",
                "✓".green(),
                outcome.file_name(),
                target.display()
            )),
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "✗".red(), outcome.file_name(), e));
            }
        }
        pb.inc(1);
    }
    failed
}

fn write_document(
    doc: &Document,
    input: &Path,
    output_dir: &Path,
    render_options: &RenderOptions,
    json: bool,
) -> CliResult<PathBuf> {
    let mut target = batch::output_path(input, output_dir);
    if json {
        target.set_extension("json");
    }
    fs::write(&target, render(doc, render_options, json)?)?;
    Ok(target)
}

fn cmd_consolidate(dir: &Path, output: Option<&Path>, common: &CommonArgs) -> CliResult<()> {
    let options = common.parse_options()?;
    let render_options = common.render_options();
    let metadata = Metadata::for_book(options.title.clone(), options.author.clone());
    let index_cap = options.index_cap;
    let parallel = options.parallel;
    let parser = TranscriptParser::new(options)?;

    let paths = batch::discover(dir, &DiscoverOptions::default())?;
    println!("{} {} transcription files", "Found".cyan(), paths.len());

    let pb = progress_bar(paths.len() as u64)?;
    pb.set_message("Formatting...");
    let outcomes = batch::parse_files(&parser, &paths, parallel);
    pb.set_position(outcomes.len() as u64);
    pb.finish_with_message("Done!");

    let mut docs = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red(), outcome.path.display(), e);
            }
        }
    }

    let book = batch::consolidate(&docs, metadata, index_cap);
    let markdown = unocr::render::to_markdown(&book, &render_options)?;

    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.join(CONSOLIDATED_FILE_NAME));
    fs::write(&target, &markdown)?;
    println!("{} {}", "Saved to".green(), target.display());
    print_stats(&book.stats);

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, paths.len()).into());
    }
    Ok(())
}

fn cmd_classify(input: &Path, common: &CommonArgs) -> CliResult<()> {
    let parser = TranscriptParser::new(common.parse_options()?)?;
    let text = unocr::detect::read_text(input)?;

    for line in parser.classify_lines(&text) {
        let tag = format!("{:>10}", line.tag.name());
        let tag = match line.tag {
            t if t.is_heading() => tag.cyan().bold(),
            Tag::Quote | Tag::NumberedListItem | Tag::BulletListItem | Tag::Footnote => {
                tag.green()
            }
            Tag::Blank | Tag::Noise | Tag::Contents => tag.dimmed(),
            _ => tag.normal(),
        };
        println!("{} {} {}", tag, "│".dimmed(), line.text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unocr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR transcription formatting tool");
    println!();
    println!("License: MIT");
}

fn render(doc: &Document, options: &RenderOptions, json: bool) -> unocr::Result<String> {
    if json {
        unocr::render::to_json(doc, JsonFormat::Pretty)
    } else {
        unocr::render::to_markdown(doc, options)
    }
}

fn progress_bar(len: u64) -> CliResult<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn print_stats(stats: &FormatStats) {
    println!();
    println!("{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Parts".bold(), stats.part_count);
    println!("{}: {}", "Chapters".bold(), stats.chapter_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Footnotes".bold(), stats.footnote_count);
    println!("{}: {}", "Dropped lines".bold(), stats.dropped_line_count);
}
