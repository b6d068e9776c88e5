use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use textsplit::{
    AppConfig, BatchError, ChunkConfig, Chunker, MergeOptions, SplitOptions, Strategy,
    merge_directory, split_directory,
};
use textsplit::batch::{FileFailure, SplitReport};

// ── CLI ─────────────────────────────────────────────────────────────

/// Split long text files into bounded, boundary-aware chunks and merge them back.
#[derive(Parser, Debug)]
#[command(name = "textsplit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split .txt files by size at paragraph and line breaks.
    Split {
        /// Directory containing input .txt files.
        input: PathBuf,
        /// Directory to write split files.
        output: PathBuf,
        /// Minimum characters per chunk (except when the file itself is shorter).
        #[arg(long)]
        min_chars: usize,
        /// Maximum characters per chunk; may overflow to satisfy the minimum.
        #[arg(long)]
        max_chars: usize,
        /// Recurse into subdirectories.
        #[arg(long)]
        recursive: bool,
        /// Write manifest.jsonl into the output directory.
        #[arg(long)]
        manifest: bool,
    },

    /// Chunk .txt files into overlapping chunks at headings, steps and safe punctuation.
    Chunk(ChunkArgs),

    /// Merge <base>_split_<i>_of_<n>.txt files back into <base>.txt.
    Merge {
        /// Directory containing split .txt files.
        input: PathBuf,
        /// Directory to write merged .txt files.
        output: PathBuf,
        /// Recurse into subdirectories.
        #[arg(long)]
        recursive: bool,
        /// Merge even if some parts are missing.
        #[arg(long)]
        allow_partial: bool,
        /// Insert a newline between parts when the previous part does not end with one.
        #[arg(long)]
        ensure_newline_between: bool,
    },
}

#[derive(Args, Debug)]
struct ChunkArgs {
    /// Directory containing input .txt files.
    input: PathBuf,
    /// Directory to write chunk files.
    output: PathBuf,
    /// JSON config file with `chunk` and `vocabulary` sections.
    #[arg(long, env = "TEXTSPLIT_CONFIG")]
    config: Option<PathBuf>,
    /// Minimum characters per chunk [default: 600]
    #[arg(long)]
    min_chars: Option<usize>,
    /// Target characters per chunk [default: 1000]
    #[arg(long)]
    target_chars: Option<usize>,
    /// Maximum characters per chunk [default: 1400]
    #[arg(long)]
    max_chars: Option<usize>,
    /// Overlap characters between chunks [default: 150]
    #[arg(long)]
    overlap_chars: Option<usize>,
    /// Use plain paragraph/line boundaries instead of heading and step detection.
    #[arg(long)]
    no_domain: bool,
    /// Chunking strategy [default: breakpoints]
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// Treat each file as one section (units strategy).
    #[arg(long)]
    no_section: bool,
    /// Recurse into subdirectories.
    #[arg(long)]
    recursive: bool,
    /// Write manifest.jsonl into the output directory.
    #[arg(long)]
    manifest: bool,
}

impl ChunkArgs {
    /// Config file values overridden by any flags given
    fn chunker(&self) -> Result<Chunker> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        let chunk = &mut config.chunk;
        if let Some(v) = self.min_chars {
            chunk.min_chars = v;
        }
        if let Some(v) = self.target_chars {
            chunk.target_chars = v;
        }
        if let Some(v) = self.max_chars {
            chunk.max_chars = v;
        }
        if let Some(v) = self.overlap_chars {
            chunk.overlap_chars = v;
        }
        if let Some(strategy) = self.strategy {
            chunk.strategy = strategy;
        }
        if self.no_domain {
            chunk.domain_aware = false;
        }
        if self.no_section {
            chunk.by_section = false;
        }

        config.chunker()
    }
}

// ── Commands ────────────────────────────────────────────────────────

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Split {
            input,
            output,
            min_chars,
            max_chars,
            recursive,
            manifest,
        } => {
            let config = ChunkConfig::default()
                .strategy(Strategy::Window)
                .min_chars(min_chars)
                .max_chars(max_chars);
            let options = SplitOptions::new(Chunker::new(config))
                .recursive(recursive)
                .manifest(manifest);
            let report = split_directory(&input, &output, &options)?;
            Ok(summarize_split(&report))
        }

        Command::Chunk(args) => {
            let options = SplitOptions::new(args.chunker()?)
                .recursive(args.recursive)
                .manifest(args.manifest);
            let report = split_directory(&args.input, &args.output, &options)?;
            Ok(summarize_split(&report))
        }

        Command::Merge {
            input,
            output,
            recursive,
            allow_partial,
            ensure_newline_between,
        } => {
            let options = MergeOptions::new()
                .recursive(recursive)
                .allow_partial(allow_partial)
                .ensure_newline_between(ensure_newline_between);
            let report = merge_directory(&input, &output, &options)?;

            for merged in &report.merged {
                println!("Wrote {}", merged.output.display());
            }
            for copied in &report.copied {
                println!("Wrote {}", copied.display());
            }
            for skipped in &report.skipped {
                println!("Skipped {}: {}", skipped.key, skipped.reason);
            }
            println!(
                "✓ Merged {} groups, copied {} files, skipped {}",
                report.merged.len(),
                report.copied.len(),
                report.skipped.len()
            );
            Ok(exit_code(&report.failed))
        }
    }
}

fn summarize_split(report: &SplitReport) -> ExitCode {
    for file in &report.files {
        for output in &file.outputs {
            println!("Wrote {}", output.display());
        }
    }
    if let Some(manifest) = &report.manifest {
        println!("Wrote {}", manifest.display());
    }
    println!(
        "✓ Wrote {} chunks from {} files",
        report.segment_count(),
        report.files.len()
    );
    exit_code(&report.failed)
}

fn exit_code(failed: &[FileFailure]) -> ExitCode {
    for failure in failed {
        eprintln!("✗ {}: {}", failure.path.display(), failure.error);
    }
    if failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start_time = Instant::now();

    match run(cli.command) {
        Ok(code) => {
            tracing::debug!(elapsed = ?start_time.elapsed(), "done");
            Ok(code)
        }
        Err(err) => match err.downcast_ref::<BatchError>() {
            Some(BatchError::NoInputFiles(dir)) => {
                eprintln!("No .txt files found in {}", dir.display());
                Ok(ExitCode::from(2))
            }
            _ => Err(err),
        },
    }
}
