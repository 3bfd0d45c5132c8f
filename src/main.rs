//! mrdedup: remove duplicate reads from sorted mapped reads
//!
//! Usage: mrdedup [OPTIONS] <INPUT | --stdin>

use clap::{ArgGroup, Parser};
use log::info;
use std::path::PathBuf;
use std::process;

use mrdedup::commands::dedup::first_record;
use mrdedup::mr::{MrError, MrReader};
use mrdedup::stats::{write_histogram_file, write_stats_file};
use mrdedup::streaming::compression::is_stdio_path;
use mrdedup::streaming::{open_input, open_stdin, OutputSink};
use mrdedup::{DedupConfig, DuplicateRemoverCommand, DEFAULT_SEED};

#[derive(Parser)]
#[command(name = "mrdedup")]
#[command(version)]
#[command(about = "Remove duplicate reads from sorted mapped reads", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "stdin"])))]
struct Cli {
    /// Sorted mapped-read file, plain or gzip (use - for stdin)
    input: Option<PathBuf>,

    /// Output file for unique reads (compressed if it ends in .gz) [default: stdout]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Take input from stdin
    #[arg(long)]
    stdin: bool,

    /// Statistics output file
    #[arg(short = 'S', long)]
    stats: Option<PathBuf>,

    /// Histogram output file for library complexity analysis
    #[arg(long)]
    hist: Option<PathBuf>,

    /// Use sequence info: keep one read per methylation pattern
    #[arg(short, long)]
    seq: bool,

    /// Use all cytosines for patterns (default: CpG)
    #[arg(short = 'A', long)]
    all_cytosines: bool,

    /// Disable the sort test
    #[arg(short = 'D', long = "disable")]
    disable_sort_test: bool,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print more run info
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MrError> {
    let config = DedupConfig::new()
        .with_sequence(cli.seq)
        .with_all_cytosines(cli.all_cytosines)
        .with_sort_validation(!cli.disable_sort_test)
        .with_seed(cli.seed);
    let cmd = DuplicateRemoverCommand::new(config);

    // Open the input before creating any output file
    let (reader, source) = match cli.input.as_deref() {
        Some(path) if !cli.stdin && !is_stdio_path(path) => {
            (open_input(path)?, path.display().to_string())
        }
        _ => (open_stdin()?, "stdin".to_string()),
    };

    // An empty input must not create or truncate the output file
    let mut reader = MrReader::new(reader);
    let first = first_record(&mut reader, &source)?;

    let mut sink = OutputSink::create(cli.output.as_deref())?;
    let report = cmd.run_from(first, reader, &source, &mut sink)?;
    sink.finish()?;

    if let Some(ref path) = cli.stats {
        write_stats_file(path, &report.stats)?;
        info!("wrote statistics to {}", path.display());
    }
    if let Some(ref path) = cli.hist {
        write_histogram_file(path, &report.histogram)?;
        info!("wrote histogram to {}", path.display());
    }

    Ok(())
}
