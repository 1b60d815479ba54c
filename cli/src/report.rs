use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sortbench_core::perf::{Measurement, Outcome};

use crate::config::ReportFormat;

/// One harness run as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub repeat: usize,
    pub sizes: Vec<usize>,
    pub measurements: Vec<Measurement>,
}

impl RunReport {
    pub fn new(timestamp: DateTime<Utc>, repeat: usize, sizes: Vec<usize>, measurements: Vec<Measurement>) -> Self {
        Self {
            generated_at: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            repeat,
            sizes,
            measurements,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter().filter(|m| !m.outcome.is_passed())
    }
}

fn millis(ns: u64) -> f64 {
    ns as f64 / 1_000_000.0
}

fn status(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "ok",
        Outcome::Failed { .. } => "FAILED",
    }
}

pub fn write_table<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let scenario_w = report
        .measurements
        .iter()
        .map(|m| m.scenario.len())
        .chain(["scenario".len()])
        .max()
        .unwrap_or(0);
    let candidate_w = report
        .measurements
        .iter()
        .map(|m| m.candidate.len())
        .chain(["candidate".len()])
        .max()
        .unwrap_or(0);

    writeln!(out, "# sortbench run at {} (repeat {})", report.generated_at, report.repeat)?;
    writeln!(
        out,
        "{:<sw$}  {:<cw$}  {:>9}  {:>12}  {:>12}  {:>12}  status",
        "scenario",
        "candidate",
        "size",
        "best_ms",
        "median_ms",
        "worst_ms",
        sw = scenario_w,
        cw = candidate_w
    )?;
    for m in &report.measurements {
        writeln!(
            out,
            "{:<sw$}  {:<cw$}  {:>9}  {:>12.3}  {:>12.3}  {:>12.3}  {}",
            m.scenario,
            m.candidate,
            m.size,
            millis(m.stats.best_ns),
            millis(m.stats.median_ns),
            millis(m.stats.worst_ns),
            status(&m.outcome),
            sw = scenario_w,
            cw = candidate_w
        )?;
    }
    for m in report.failures() {
        if let Outcome::Failed { message } = &m.outcome {
            writeln!(out, "! {}", message)?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(out: W, report: &RunReport) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(out, report).context("serialize run report")
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

pub fn write_csv<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "generated_at,scenario,candidate,size,trials,best_ns,median_ns,mean_ns,worst_ns,status,message")?;
    for m in &report.measurements {
        let message = match &m.outcome {
            Outcome::Passed => "",
            Outcome::Failed { message } => message.as_str(),
        };
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            report.generated_at,
            csv_field(&m.scenario),
            csv_field(&m.candidate),
            m.size,
            m.trials,
            m.stats.best_ns,
            m.stats.median_ns,
            m.stats.mean_ns,
            m.stats.worst_ns,
            status(&m.outcome),
            csv_field(message)
        )?;
    }
    Ok(())
}

pub fn render<W: Write>(mut out: W, report: &RunReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Table => write_table(&mut out, report)?,
        ReportFormat::Json => write_json(&mut out, report)?,
        ReportFormat::Csv => write_csv(&mut out, report)?,
    }
    out.flush()?;
    Ok(())
}

/// Write `latest.<ext>` into `dir`, or print to stdout when `dir` is `None`.
pub fn emit(report: &RunReport, format: ReportFormat, dir: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let Some(dir) = dir else {
        render(io::stdout().lock(), report, format)?;
        return Ok(None);
    };
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("create output directory {}", dir.display()))?;
    }
    let path = dir.join(format!("latest.{}", format.extension()));
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    render(BufWriter::new(file), report, format).with_context(|| format!("write {}", path.display()))?;
    Ok(Some(path))
}
