//! docfb2 - DOCX to FB2 converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use docfb2::docx::Package;
use docfb2::{ConversionOptions, Converter, Error, extract_metadata};

#[derive(Parser)]
#[command(name = "docfb2")]
#[command(version, about = "Convert DOCX documents to FictionBook 2", long_about = None)]
#[command(after_help = "EXAMPLES:
    docfb2 novel.docx                 Write novel.fb2 next to the input
    docfb2 novel.docx out/novel.fb2   Convert to an explicit path
    docfb2 -i novel.docx              Show metadata and a text preview")]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output FB2 file (defaults to INPUT with a .fb2 extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show document metadata and a text preview without converting
    #[arg(short, long)]
    info: bool,

    /// JSON file with conversion options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Drop bold/italic formatting
    #[arg(long)]
    plain: bool,

    /// Do not embed images
    #[arg(long)]
    no_images: bool,

    /// Keep empty paragraphs
    #[arg(long)]
    keep_empty: bool,

    /// Skip the well-formedness check of the output
    #[arg(long)]
    no_validate: bool,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Log pipeline progress
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = load_options(&cli).and_then(|options| {
        if cli.print_config {
            print_config(&options)
        } else if cli.info {
            show_info(&cli.input)
        } else {
            convert(&cli, options)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_options(cli: &Cli) -> Result<ConversionOptions, String> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid options in {}: {e}", path.display()))?
        }
        None => ConversionOptions::default(),
    };

    if cli.plain {
        options.preserve_formatting = false;
    }
    if cli.no_images {
        options.convert_images = false;
    }
    if cli.keep_empty {
        options.remove_empty_paragraphs = false;
    }
    if cli.no_validate {
        options.validate_output = false;
    }
    Ok(options)
}

fn print_config(options: &ConversionOptions) -> Result<(), String> {
    let json = serde_json::to_string_pretty(options).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn show_info(path: &Path) -> Result<(), String> {
    let meta = extract_metadata(path).map_err(|e| e.to_string())?;
    let mut package = Package::open(path).map_err(|e| e.to_string())?;
    let media_prefix = package.media_prefix();
    let media = package
        .archive_mut()
        .file_names()
        .filter(|name| name.starts_with(&media_prefix))
        .count();
    let document = package.read_document().map_err(|e| e.to_string())?;

    println!("File: {}", path.display());
    println!("Title: {}", meta.title);
    println!("Author: {} {}", meta.author.first_name, meta.author.last_name);
    println!("Date: {}", meta.date);
    println!("Language: {}", meta.lang);
    println!("Paragraphs: {}", document.paragraphs.len());
    println!("Media entries: {media}");

    let preview = document.preview();
    if !preview.is_empty() {
        println!();
        println!("{preview}");
    }
    Ok(())
}

/// Resolve the output path, refusing to write over the input.
fn output_path(input: &Path, output: Option<&Path>) -> Result<PathBuf, String> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("fb2"));

    let same = output == input
        || matches!(
            (input.canonicalize(), output.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(format!(
            "output {} would overwrite the input; give a different OUTPUT",
            output.display()
        ));
    }
    Ok(output)
}

fn convert(cli: &Cli, options: ConversionOptions) -> Result<(), String> {
    let output = output_path(&cli.input, cli.output.as_deref())?;

    let converter = Converter::new().with_options(options);
    let fb2 = match converter.convert(&cli.input) {
        Ok(fb2) => fb2,
        Err(Error::MalformedOutput { message, output: text }) => {
            // Keep the produced text around for inspection
            let rejected = output.with_extension("fb2.invalid");
            std::fs::write(&rejected, text).map_err(|e| e.to_string())?;
            return Err(format!(
                "malformed output: {message} (written to {})",
                rejected.display()
            ));
        }
        Err(e) => return Err(e.to_string()),
    };

    std::fs::write(&output, &fb2).map_err(|e| format!("cannot write {}: {e}", output.display()))?;

    if !cli.quiet {
        println!("{} -> {}", cli.input.display(), output.display());
    }
    Ok(())
}
