//! Command-line interface for the segmenter.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::assembly::ParagraphAssembler;
use crate::config::{default_output_path, validate_input_path, validate_output_path, OutputFormat};
use crate::error::Result;
use crate::output::save;
use crate::segmenter::{SegmentOptions, Segmenter};

/// Regulation text segmenter - Split extracted regulation text into labelled paragraphs.
#[derive(Parser)]
#[command(name = "regtext-segmenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Segment a text file into records and save them.
    Segment {
        /// Extracted text file, one line per input line
        input: PathBuf,

        /// Output file (default: <input stem>.records.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: yaml or json
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Skip the broken-paragraph merge pass
        #[arg(long)]
        no_merge: bool,

        /// Skip text normalization
        #[arg(long)]
        no_normalize: bool,
    },

    /// Print how each line of a text file is classified.
    Classify {
        /// Extracted text file, one line per input line
        input: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Segment {
            input,
            output,
            format,
            no_merge,
            no_normalize,
        } => {
            let options = SegmentOptions {
                merge: !no_merge,
                normalize: !no_normalize,
            };
            segment_command(&input, output.as_deref(), &format, options)
        }
        Commands::Classify { input } => classify_command(&input),
    }
}

/// Execute the segment command.
fn segment_command(
    input: &Path,
    output: Option<&Path>,
    format: &str,
    options: SegmentOptions,
) -> Result<()> {
    // Validate everything before doing any work
    let format: OutputFormat = format.parse()?;
    validate_input_path(input)?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, format));
    validate_output_path(&output_path)?;

    println!(
        "{} {} as {}",
        style("Segmenting").bold(),
        style(input.display()).cyan(),
        style(format.extension()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Classifying lines...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let document = match Segmenter::new(options).segment_file(input) {
        Ok(document) => document,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    println!("  Records: {}", document.len());
    println!("  Body: {}", document.body_records().count());
    let footnotes = document.footnote_records().count();
    if footnotes > 0 {
        println!("  Footnotes: {}", style(footnotes).yellow().bold());
    }

    pb.set_message("Saving records...");

    let source = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let saved = match save(&document, &source, &output_path, format) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!();
    println!("{} {}", style("Saved to:").green().bold(), saved.display());

    Ok(())
}

/// Execute the classify command.
fn classify_command(input: &Path) -> Result<()> {
    validate_input_path(input)?;
    let lines: Vec<String> = fs::read_to_string(input)?
        .lines()
        .map(str::to_string)
        .collect();

    for entry in ParagraphAssembler::default().trace(&lines) {
        let kind = if entry.kind == "Body" {
            style(entry.kind).dim()
        } else {
            style(entry.kind).cyan().bold()
        };
        println!(
            "{:>5}  {:<16} {:<18} {}",
            entry.line_number,
            entry.rule,
            kind,
            entry.text
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_segment() {
        let cli = Cli::parse_from(["regtext-segmenter", "segment", "input.txt"]);

        let Commands::Segment {
            input,
            output,
            format,
            no_merge,
            no_normalize,
        } = cli.command
        else {
            panic!("expected segment command");
        };
        assert_eq!(input, PathBuf::from("input.txt"));
        assert!(output.is_none());
        assert_eq!(format, "yaml");
        assert!(!no_merge);
        assert!(!no_normalize);
    }

    #[test]
    fn test_cli_parse_segment_with_flags() {
        let cli = Cli::parse_from([
            "regtext-segmenter",
            "segment",
            "input.txt",
            "--output",
            "out.json",
            "--format",
            "json",
            "--no-merge",
        ]);

        let Commands::Segment {
            output,
            format,
            no_merge,
            no_normalize,
            ..
        } = cli.command
        else {
            panic!("expected segment command");
        };
        assert_eq!(output, Some(PathBuf::from("out.json")));
        assert_eq!(format, "json");
        assert!(no_merge);
        assert!(!no_normalize);
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["regtext-segmenter", "classify", "input.txt"]);
        assert!(matches!(cli.command, Commands::Classify { input } if input == Path::new("input.txt")));
    }

    #[test]
    fn test_segment_rejects_unknown_format() {
        let result = segment_command(
            Path::new("input.txt"),
            None,
            "xlsx",
            SegmentOptions::default(),
        );
        assert!(result.is_err());
    }
}
