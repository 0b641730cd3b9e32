//! Flightline - currency and compliance reports for flight departments.
//!
//! Thin front end over `flightline-core`: reads crew roster and data
//! snapshot JSON files, runs the calculators, and prints text or JSON
//! reports. All date comparisons against the clock happen here; the core
//! itself never reads the system time.

mod report;

use std::io;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flightline_core::compliance::catalog::{standard_catalog, subpart_title};
use flightline_core::compliance::OverrideMap;
use flightline_core::currency::calculate_currency;
use flightline_core::models::{ComplianceReport, CrewCurrencyRecord, CurrencySheet, DataSnapshot};

use report::{date_line, grace_line};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flightline currency <roster.json> [--as-of YYYY-MM-DD] [--json]");
    eprintln!("  flightline compliance <snapshot.json> [--overrides overrides.json] [--json]");
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("currency") => run_currency(&args[2..]),
        Some("compliance") => run_compliance(&args[2..]),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

/// One roster entry: a display name plus the crew member's currency record.
#[derive(Debug, Deserialize)]
struct RosterEntry {
    name: String,
    #[serde(flatten)]
    record: CrewCurrencyRecord,
}

#[derive(Debug, Serialize)]
struct NamedSheet {
    name: String,
    #[serde(flatten)]
    sheet: CurrencySheet,
}

fn run_currency(args: &[String]) -> Result<()> {
    let mut path = None;
    let mut as_of = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--as-of" => {
                let value = iter.next().context("--as-of requires a date")?;
                as_of = Some(
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .with_context(|| format!("invalid --as-of date '{}'", value))?,
                );
            }
            "--json" => json = true,
            other => path = Some(other.to_string()),
        }
    }

    let path = path.context("missing roster file argument")?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let roster: Vec<RosterEntry> =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path))?;
    info!(count = roster.len(), %as_of, "Computing currency sheets");

    let mut sheets = Vec::new();
    for entry in &roster {
        let input = entry
            .record
            .to_input()
            .with_context(|| format!("bad record for '{}'", entry.name))?;
        let output = calculate_currency(&input, as_of);

        if json {
            sheets.push(NamedSheet {
                name: entry.name.clone(),
                sheet: CurrencySheet::from_output(&output),
            });
            continue;
        }

        println!("{}", entry.name);
        println!("{}", date_line("part 135 medical", output.part135_medical, as_of));
        println!("{}", date_line("flight review", output.flight_review, as_of));
        println!("{}", date_line("ipc", output.ipc, as_of));
        println!("{}", date_line("recurrent", output.recurrent, as_of));
        println!("{}", date_line("checkride", output.checkride, as_of));
        if let Some(ref grace) = output.checkride_grace {
            println!("{}", grace_line(grace));
        }
        println!("{}", date_line("passport", output.passport, as_of));
        println!();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&sheets)?);
    }

    Ok(())
}

fn run_compliance(args: &[String]) -> Result<()> {
    let mut snapshot_path = None;
    let mut overrides_path = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--overrides" => {
                overrides_path = Some(iter.next().context("--overrides requires a file")?.clone());
            }
            "--json" => json = true,
            other => snapshot_path = Some(other.to_string()),
        }
    }

    let snapshot_path = snapshot_path.context("missing snapshot file argument")?;
    let contents = std::fs::read_to_string(&snapshot_path)
        .with_context(|| format!("reading {}", snapshot_path))?;
    let snapshot: DataSnapshot =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", snapshot_path))?;

    let overrides: OverrideMap = match overrides_path {
        Some(ref p) => {
            let contents =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p))?;
            serde_json::from_str(&contents).with_context(|| format!("parsing {}", p))?
        }
        None => OverrideMap::new(),
    };

    let catalog = standard_catalog();
    let report = ComplianceReport::build(&catalog, &snapshot, &overrides);
    info!(
        total = report.summary.total,
        compliant = report.summary.compliant,
        "Compliance evaluated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for subpart in &report.by_subpart {
        println!(
            "Subpart {} - {} ({}/{} compliant, {:.0}%)",
            subpart.subpart,
            subpart_title(&subpart.subpart),
            subpart.summary.compliant,
            subpart.summary.total,
            subpart.percent_compliant
        );
        for req in report.requirements.iter().filter(|r| r.subpart == subpart.subpart) {
            println!("  {:<6} [{}] {}", req.section, req.status, req.text);
            println!("  {:<6} evidence: {}", "", req.evidence);
        }
        println!();
    }

    println!(
        "Overall: {}/{} compliant ({:.1}%), {} needing attention, {} for manual review",
        report.summary.compliant,
        report.summary.total,
        report.percent_compliant,
        report.summary.needs_attention,
        report.summary.manual_review
    );

    Ok(())
}
