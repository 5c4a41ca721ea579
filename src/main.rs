use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use colored::Colorize;
use jpegbatch::{Batch, BatchSummary, Config, Outcome, DEVICE, QUALITY};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jpegbatch", version)]
#[command(about = "Compress every JPEG in a directory on a pool of worker threads")]
struct Args {
    /// Directory to scan for .jpg/.jpeg files (defaults to the working directory)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output directory (defaults to <source>/compressed_images)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Write compressed_<name> next to each original instead
    #[arg(long)]
    in_place: bool,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Number of worker threads
    #[arg(short, long, default_value_t = DEVICE, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    workers: usize,

    /// Drop EXIF and ICC data instead of copying them over
    #[arg(long)]
    strip_metadata: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}
fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args);
    if let Err(e) = &result {
        eprintln!("{}", format!("{e:#}").red());
    }
    ExitCode::from(exit_code(&result))
}
/// A completed run exits with 0 even if some images failed.
fn exit_code(result: &anyhow::Result<BatchSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
fn run(args: Args) -> anyhow::Result<BatchSummary> {
    let config = config_from(args)?;
    let summary = Batch::new(config)
        .run(print_outcome)
        .context("batch aborted")?;
    print_summary(&summary);
    Ok(summary)
}
fn config_from(args: Args) -> anyhow::Result<Config> {
    let source = match args.source {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine working directory")?,
    };
    let mut config = Config::new(source)
        .with_quality(args.quality)
        .with_workers(args.workers)
        .with_metadata(!args.strip_metadata);
    if args.in_place {
        config = config.in_place();
    } else if let Some(dir) = args.output {
        config = config.with_output_dir(dir);
    }
    Ok(config)
}
fn print_outcome(outcome: &Outcome) {
    if outcome.is_success() {
        println!("{}", outcome.to_string().green());
    } else {
        println!("{}", outcome.to_string().red());
    }
}
fn print_summary(summary: &BatchSummary) {
    let line = format!(
        "{} images: {} compressed, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    if summary.is_clean() {
        println!("{}", line.bold());
    } else {
        println!("{}", line.yellow().bold());
        for (path, reason) in &summary.failures {
            println!("  {}: {reason}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpegbatch::{Error, OutputMode};
    use tempdir::TempDir;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("jpegbatch").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_use_working_directory() {
        let config = config_from(parse(&[]).unwrap()).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.source(), cwd.as_path());
        assert_eq!(
            config.output_mode(),
            &OutputMode::Separate(cwd.join("compressed_images"))
        );
        assert_eq!(config.quality(), 85);
        assert_eq!(config.workers(), 4);
        assert!(config.preserve_metadata());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = parse(&[
            "--source",
            "/photos",
            "--in-place",
            "--quality",
            "40",
            "--workers",
            "2",
            "--strip-metadata",
        ])
        .unwrap();
        let config = config_from(args).unwrap();
        assert_eq!(config.source(), std::path::Path::new("/photos"));
        assert_eq!(config.output_mode(), &OutputMode::InPlace);
        assert_eq!(config.quality(), 40);
        assert_eq!(config.workers(), 2);
        assert!(!config.preserve_metadata());

        let config = config_from(parse(&["-s", "/photos", "-o", "/small"]).unwrap()).unwrap();
        assert_eq!(
            config.output_mode(),
            &OutputMode::Separate(PathBuf::from("/small"))
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse(&["--workers", "0"]).is_err());
        assert!(parse(&["--quality", "0"]).is_err());
        assert!(parse(&["--quality", "101"]).is_err());
        assert!(parse(&["--workers", "1", "--quality", "100"]).is_ok());
    }

    #[test]
    fn output_conflicts_with_in_place() {
        let err = parse(&["--in-place", "--output", "/small"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn missing_source_exits_with_failure() {
        let dir = TempDir::new("cli").unwrap();
        let missing = dir.path().join("missing");
        let result = run(parse(&["--source", missing.to_str().unwrap()]).unwrap());
        assert_eq!(exit_code(&result), 1);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Enumeration { .. })
        ));
    }

    #[test]
    fn item_failures_still_exit_with_success() {
        let dir = TempDir::new("cli").unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();
        let result = run(parse(&["--source", dir.path().to_str().unwrap()]).unwrap());
        assert_eq!(exit_code(&result), 0);
        let summary = result.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.failed, 1);
    }
}
