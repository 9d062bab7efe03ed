use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use entro::report::BatchEntry;
use entro::{batch, Base, Format, Metrics, Report, RunConfig, Settings, Source};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "entro", version, about = "Calculate entropy")]
struct Cli {
    /// File to measure; several files or a directory measure each file separately
    #[arg(short, long, num_args = 1.., conflicts_with_all = ["text", "password"])]
    file: Vec<PathBuf>,

    /// Measure the UTF-8 bytes of this text
    #[arg(short, long, conflicts_with = "password")]
    text: Option<String>,

    /// Prompt for masked input
    #[arg(short, long)]
    password: bool,

    /// Logarithm base: a number, or e / bits / nats / digits (default 2)
    #[arg(short, long, allow_negative_numbers = true)]
    base: Option<String>,

    /// Print Shannon entropy
    #[arg(short, long)]
    shannon: bool,

    /// Print Shannon entropy divided by input length
    #[arg(short, long)]
    metric: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let metrics = Metrics {
        shannon: cli.shannon,
        metric: cli.metric,
    };
    if !metrics.any() {
        eprintln!("{}", Cli::command().render_usage());
        process::exit(1);
    }

    match run(cli, metrics) {
        Ok(code) => process::exit(code),
        Err(e) => {
            debug!(error = ?e, "run failed");
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli, metrics: Metrics) -> Result<i32> {
    let settings = Settings::load_default().context("loading settings")?;
    let cli_base = cli.base.as_deref().map(str::parse::<Base>).transpose()?;
    let base = settings.resolve_base(cli_base)?;
    let format = settings.resolve_format(cli.format);

    if cli.file.len() > 1 || cli.file.iter().any(|p| p.is_dir()) {
        let entries = batch::measure_files(&cli.file, base, metrics);
        print_batch(&entries, format)?;
        return Ok(if entries.iter().any(BatchEntry::is_err) { 1 } else { 0 });
    }

    let source = match (cli.file.into_iter().next(), cli.text) {
        (Some(path), _) => Source::File(path),
        (None, Some(text)) => Source::Text(text),
        (None, None) if cli.password => Source::Password,
        (None, None) => Source::Prompt,
    };
    let config = RunConfig { base, source };
    let label = config.source.label();
    debug!(source = %label, base = %config.base, "measuring");

    let entropy = entro::load(&config)?;
    let report = Report::measure(label.clone(), &entropy, metrics)
        .with_context(|| format!("measuring {}", label))?;
    match format {
        Format::Human => print!("{}", report.to_human()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(0)
}

fn print_batch(entries: &[BatchEntry], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            for e in entries {
                println!("{}", e.to_human());
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(entries)?),
    }
    Ok(())
}
