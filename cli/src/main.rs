use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sortbench_core::candidates::CandidateTable;
use sortbench_core::dataset::Dataset;
use sortbench_core::perf::{RunPlan, run_plan};
use sortbench_core::{BenchContext, ScenarioRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use config::{Config, ReportFormat};
use report::RunReport;

const DEFAULT_TRACE_FILTER: &str = "sortbench=info,sortbench_core=info,sortbench_cli=info";

#[derive(Debug, Parser)]
#[command(
    name = "sortbench",
    author,
    version,
    about = "Benchmark harness for sorted-list implementations",
    long_about = None,
    after_help = "Settings are read from sortbench.toml in the working directory unless --config is given."
)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List scenarios and the candidates bound to each, with their size limits.
    List {
        /// Configuration file whose limit overrides should be applied
        #[arg(long, short = 'f', value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Run scenarios and report timings.
    Run(RunArgs),
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Configuration file (defaults to ./sortbench.toml when present)
    #[arg(long, short = 'f', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Only run this scenario (repeatable)
    #[arg(long = "scenario", short = 's', value_name = "NAME")]
    scenarios: Vec<String>,
    /// Only run this candidate (repeatable)
    #[arg(long = "candidate", short = 'c', value_name = "NAME")]
    candidates: Vec<String>,
    /// Dataset size to run at (repeatable)
    #[arg(long = "size", short = 'n', value_name = "N")]
    sizes: Vec<usize>,
    /// Timed trials per scenario, candidate and size
    #[arg(long, short = 'r')]
    repeat: Option<usize>,
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
    /// Directory for `latest.<format>`; stdout when omitted
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl RunArgs {
    /// Flags win over the configuration file.
    fn merge_into(self, config: &mut Config) -> anyhow::Result<()> {
        if !self.scenarios.is_empty() {
            config.scenarios = self.scenarios;
        }
        if !self.candidates.is_empty() {
            config.candidates = self.candidates;
        }
        if !self.sizes.is_empty() {
            config.sizes = self.sizes;
        }
        if let Some(repeat) = self.repeat {
            config.repeat = repeat;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = Some(dir);
        }
        config.validate()
    }
}

/// What `SORTBENCH_TRACE` asks for.
#[derive(Debug, PartialEq, Eq)]
enum TraceSetting {
    Off,
    /// Filter from `RUST_LOG`, else [`DEFAULT_TRACE_FILTER`].
    Default,
    Filter(String),
}

impl TraceSetting {
    fn parse(raw: &str) -> Self {
        let any_of = |value: &str, words: [&str; 3]| words.iter().any(|w| value.eq_ignore_ascii_case(w));
        match raw.trim() {
            "" => TraceSetting::Off,
            value if any_of(value, ["0", "false", "off"]) => TraceSetting::Off,
            value if any_of(value, ["1", "true", "on"]) => TraceSetting::Default,
            value => TraceSetting::Filter(value.to_string()),
        }
    }

    fn into_filter(self) -> Option<EnvFilter> {
        let expr = match self {
            TraceSetting::Off => return None,
            TraceSetting::Default => std::env::var("RUST_LOG").ok(),
            TraceSetting::Filter(expr) => Some(expr),
        };
        let filter = expr.and_then(|expr| EnvFilter::try_new(expr).ok());
        Some(filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_FILTER)))
    }
}

fn init_tracing() {
    let Ok(raw) = std::env::var("SORTBENCH_TRACE") else {
        return;
    };
    let Some(filter) = TraceSetting::parse(&raw).into_filter() else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_context(config: &Config) -> BenchContext {
    BenchContext::new(
        ScenarioRegistry::standard(),
        CandidateTable::standard(),
        Dataset::identity(&config.sizes),
        &config.limits,
    )
}

fn list(config: &Config) -> anyhow::Result<()> {
    let ctx = build_context(config);
    let width = ctx.candidates.names().map(str::len).max().unwrap_or(0);
    for scenario in ctx.scenarios.iter() {
        println!("{}", scenario.name());
        for (candidate, spec) in ctx.registry.bindings(scenario.name())? {
            println!(
                "  {:<width$}  limit {}  setup {}",
                candidate,
                spec.limit,
                spec.setup.name(),
                width = width
            );
        }
    }
    Ok(())
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = Config::resolve(args.config.as_deref())?;
    args.merge_into(&mut config).context("invalid run settings")?;

    let ctx = build_context(&config);
    let plan = RunPlan {
        scenarios: config.scenarios.clone(),
        candidates: config.candidates.clone(),
        sizes: ctx.dataset.sizes().collect(),
        repeat: config.repeat,
    };
    info!(
        target: "sortbench::cli",
        sizes = ?plan.sizes,
        repeat = plan.repeat,
        "starting run"
    );
    let measurements = run_plan(&ctx, &plan)?;

    let report = RunReport::new(chrono::Utc::now(), plan.repeat, plan.sizes, measurements);
    if let Some(path) = report::emit(&report, config.output.format, config.output.dir.as_deref())? {
        println!("Report written -> {}", path.display());
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{} of {} pairs failed correctness checks", failed, report.measurements.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let CliArgs { command } = CliArgs::parse();
    match command {
        Commands::List { config } => {
            let config = Config::resolve(config.as_deref())?;
            list(&config)
        }
        Commands::Run(args) => run(args),
    }
}
