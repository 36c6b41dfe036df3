use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use benchlog::labels::{Labels, parse_mapping};
use benchlog::pivot::SystemOrder;
use benchlog::report::{Format, ReportOptions, Unit};

#[derive(Parser)]
#[command(
    name = "benchlog",
    about = "Aggregate benchmark timing logs into query × system comparison tables",
    version
)]
struct Cli {
    /// Log files or glob patterns; `-` reads stdin
    #[arg(required = true)]
    logs: Vec<String>,

    /// Column order as display labels, comma-separated (default: order of first appearance)
    #[arg(long, value_delimiter = ',', env = "BENCHLOG_ORDER")]
    order: Vec<String>,

    /// Extra system label mapping (repeatable)
    #[arg(long = "system-label", value_name = "RAW=DISPLAY", value_parser = parse_mapping)]
    system_labels: Vec<(String, String)>,

    /// Extra query label mapping (repeatable)
    #[arg(long = "query-label", value_name = "RAW=DISPLAY", value_parser = parse_mapping)]
    query_labels: Vec<(String, String)>,

    /// Don't apply the built-in JQ/Rumble/Rhyme display names
    #[arg(long)]
    raw_labels: bool,

    /// Unit for reported times
    #[arg(long, value_enum, default_value_t = Unit::Millis, env = "BENCHLOG_UNIT")]
    unit: Unit,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text, env = "BENCHLOG_FORMAT")]
    format: Format,

    /// Add speedup columns relative to this system (display label)
    #[arg(long)]
    baseline: Option<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn labels(&self) -> Labels {
        let base = if self.raw_labels {
            Labels::identity()
        } else {
            Labels::builtin()
        };
        let base = self
            .system_labels
            .iter()
            .fold(base, |l, (raw, display)| l.with_system(raw, display));
        self.query_labels
            .iter()
            .fold(base, |l, (raw, display)| l.with_query(raw, display))
    }

    fn order(&self) -> SystemOrder {
        let systems: Vec<String> = self
            .order
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if systems.is_empty() {
            SystemOrder::FirstSeen
        } else {
            SystemOrder::Explicit(systems)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "benchlog=debug" } else { "benchlog=info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let names = benchlog::input::expand(&cli.logs)?;
    let sources = names
        .iter()
        .map(|name| benchlog::input::read_source(name))
        .collect::<Result<Vec<_>>>()?;

    let pivot = benchlog::summarize(&sources, &cli.order(), &cli.labels())
        .context("failed to build benchmark comparison")?;
    tracing::info!(
        systems = pivot.systems().len(),
        queries = pivot.mean.len(),
        "built comparison tables"
    );

    let opts = ReportOptions {
        unit: cli.unit,
        baseline: cli.baseline.clone(),
        sources: names,
        generated_at: Some(jiff::Timestamp::now()),
    };
    let rendered = benchlog::report::render(&pivot, cli.format, &opts)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote report");
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            out.write_all(rendered.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
