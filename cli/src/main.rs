//! docsift CLI - persona-driven PDF section ranking

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::analysis::DEFAULT_TOP_N;
use docsift::collection::PDF_DIR_NAME;
use docsift::llm::{DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_READY_DELAY, DEFAULT_READY_RETRIES};
use docsift::pipeline::extract_sections_with_strategy;
use docsift::{
    parse_file_with_options, wait_until_ready, Analyzer, AnalyzerOptions, ErrorMode, Manifest,
    OllamaClient, ParseOptions, Progress,
};

/// Report file written next to the manifest when no output is given.
const DEFAULT_OUTPUT: &str = "output/challenge1b_output.json";

#[derive(Parser)]
#[command(name = "docsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank PDF sections by relevance to a persona and task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every section of a document collection and write a report
    Analyze {
        /// Manifest JSON; PDFs are read from the PDFs directory next to it
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Report file (default: <manifest dir>/output/challenge1b_output.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Model name
        #[arg(long, env = "DOCSIFT_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// Model server address
        #[arg(long, env = "DOCSIFT_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Number of sections kept in the report
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Readiness probes before giving up on the model server
        #[arg(long, default_value_t = DEFAULT_READY_RETRIES)]
        retries: u32,

        /// Seconds between readiness probes
        #[arg(long, default_value_t = DEFAULT_READY_DELAY.as_secs())]
        retry_delay: u64,

        /// Extract documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Skip a document when any of its pages cannot be read
        #[arg(long)]
        strict: bool,
    },

    /// Print the sections extracted from a PDF
    Sections {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            manifest,
            output,
            model,
            host,
            top,
            retries,
            retry_delay,
            sequential,
            strict,
        } => {
            let client = OllamaClient::new().with_model(model).with_host(host);
            let error_mode = if strict {
                ErrorMode::Strict
            } else {
                ErrorMode::Lenient
            };
            let options = AnalyzerOptions::new().with_top_n(top).with_parse_options(
                ParseOptions::new()
                    .with_parallel(!sequential)
                    .with_error_mode(error_mode),
            );
            cmd_analyze(
                &manifest,
                output.as_deref(),
                client,
                options,
                retries,
                Duration::from_secs(retry_delay),
            )
        }
        Commands::Sections { input, json } => cmd_sections(&input, json),
        Commands::Info { input } => cmd_info(&input),
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

fn cmd_analyze(
    manifest_path: &Path,
    output: Option<&Path>,
    client: OllamaClient,
    options: AnalyzerOptions,
    retries: u32,
    retry_delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    if !manifest_path.exists() {
        return Err(format!("Input file not found at {}", manifest_path.display()).into());
    }
    let manifest = Manifest::load(manifest_path)?;
    let pdf_dir = Manifest::pdf_dir(manifest_path);

    println!(
        "{} {} at {}",
        "Waiting for".cyan(),
        client.model(),
        client.host()
    );
    wait_until_ready(&client, retries, retry_delay)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Parsing PDFs in {}...", PDF_DIR_NAME));

    let analyzer = Analyzer::new(client).with_options(options);
    let report = analyzer.analyze_with_progress(&manifest, &pdf_dir, &|event| match event {
        Progress::Extracted { sections } => {
            pb.set_length(sections as u64);
            pb.set_message("Scoring sections...");
        }
        Progress::Scored { done, section, .. } => {
            pb.set_position(done as u64);
            pb.set_message(format!("{:.1} {}", section.score, section.section.text));
        }
        Progress::Summarized { done, total } => {
            pb.set_message(format!("Summarizing top sections ({}/{})", done, total));
        }
    })?;
    pb.finish_with_message("Done!");

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(manifest_path));
    report.write(&output_path)?;
    log::debug!("Report written to {}", output_path.display());

    println!("\n{}", "Top sections:".green().bold());
    for ranked in &report.extracted_sections {
        println!(
            "  {} {} {} (p.{})",
            format!("{}.", ranked.importance_rank).bold(),
            ranked.section_title,
            format!("[{}]", ranked.document).dimmed(),
            ranked.page_number
        );
    }
    println!("\n{} {}", "Saved to".green(), output_path.display());

    Ok(())
}

fn default_output(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_OUTPUT)
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let extracted = docsift::extract_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&extracted)?);
        return Ok(());
    }

    println!("{}", extracted.title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for section in &extracted.sections {
        println!(
            "{} {} {}",
            format!("p.{:<4}", section.page).dimmed(),
            section.text,
            format!("({} chars)", section.content_len()).dimmed()
        );
    }
    println!(
        "\n{} sections from {} pages",
        extracted.sections.len(),
        extracted.total_pages
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.metadata.pdf_version);
    println!("{}: {}", "Title".bold(), doc.title());
    println!("{}: {}", "Pages".bold(), doc.page_count());

    let blank = doc.pages.iter().filter(|p| p.text.trim().is_empty()).count();
    println!("{}: {}", "Pages without text".bold(), blank);

    if let Some(ref outline) = doc.outline {
        println!("{}: {}", "Bookmarks".bold(), outline.total_items());
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match extract_sections_with_strategy(&doc) {
        Some((strategy, sections)) => {
            println!("{}: {}", "Strategy".bold(), strategy);
            println!("{}: {}", "Sections".bold(), sections.len());
        }
        None => println!("{}", "No sections found".yellow()),
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Persona-driven PDF section ranking");
    println!();
    println!("License: MIT");
}
