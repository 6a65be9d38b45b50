use std::time::Duration;

use serde_json::{Value, json};

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::{LoadReport, RunOutcome};
use crate::session::SessionConfig;

const KIB: u128 = 1024;
const MIB: u128 = KIB * 1024;
const GIB: u128 = MIB * 1024;

pub(crate) const NO_STATISTICS_LINE: &str = "Error: No statistics collected / no requests found";

pub(crate) fn print_banner(session: &SessionConfig) {
    println!(
        "Running {}s test @ {}\n  {} worker(s) running concurrently",
        session.duration.as_secs(),
        session.target.as_str(),
        session.concurrency
    );
}

/// Prints the outcome in the requested format.
///
/// # Errors
///
/// Returns an error when the JSON summary cannot be serialized.
pub(crate) fn print_outcome(outcome: &RunOutcome, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in render_text(outcome) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render_json(outcome))?);
        }
    }
    Ok(())
}

pub(crate) fn render_text(outcome: &RunOutcome) -> Vec<String> {
    let report = match outcome {
        RunOutcome::NoStatistics { .. } => return vec![NO_STATISTICS_LINE.to_owned()],
        RunOutcome::Completed(report) => report,
    };
    vec![
        format!(
            "{} requests in {:?}, {} read",
            report.num_requests,
            report.avg_worker_duration,
            format_bytes(report.total_bytes)
        ),
        format!("Requests/sec:\t\t{}", format_x100(report.requests_per_sec_x100)),
        format!("Transfer/sec:\t\t{}", format_bytes(report.bytes_per_sec)),
        format!("Avg Req Time:\t\t{:?}", report.avg_latency),
        format!("Fastest Request:\t{:?}", report.fastest),
        format!("Slowest Request:\t{:?}", report.slowest),
        format!(
            "p50/p90/p99:\t\t{:?} / {:?} / {:?}",
            report.p50, report.p90, report.p99
        ),
        format!("Number of Errors:\t{}", report.num_errs),
    ]
}

pub(crate) fn render_json(outcome: &RunOutcome) -> Value {
    match outcome {
        RunOutcome::NoStatistics { errors } => json!({
            "status": "no_statistics",
            "errors": errors,
        }),
        RunOutcome::Completed(report) => report_json(report),
    }
}

fn report_json(report: &LoadReport) -> Value {
    json!({
        "status": "completed",
        "requests": report.num_requests,
        "errors": report.num_errs,
        "bytes_read": report.total_bytes,
        "avg_worker_duration_us": micros(report.avg_worker_duration),
        "requests_per_sec": format_x100(report.requests_per_sec_x100),
        "bytes_per_sec": report.bytes_per_sec,
        "avg_latency_us": micros(report.avg_latency),
        "fastest_us": micros(report.fastest),
        "slowest_us": micros(report.slowest),
        "p50_us": micros(report.p50),
        "p90_us": micros(report.p90),
        "p99_us": micros(report.p99),
    })
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Human readable size with two decimals, 1024 based.
pub(crate) fn format_bytes(bytes: u64) -> String {
    let size = u128::from(bytes);
    let (unit, suffix) = if size > GIB {
        (GIB, "GB")
    } else if size > MIB {
        (MIB, "MB")
    } else if size > KIB {
        (KIB, "KB")
    } else {
        (1, "bytes")
    };
    let scaled = size
        .saturating_mul(100)
        .saturating_add(unit / 2)
        .checked_div(unit)
        .unwrap_or(0);
    format!("{}.{:02}{}", scaled / 100, scaled % 100, suffix)
}
