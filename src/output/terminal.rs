//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::analysis::FileSummary;
use crate::result::{per_second, Summary};

/// Format a benchmark summary for human-readable terminal output.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str(&format!("motion-bench: {}\n", summary.title.bold()));
    output.push_str(&sep);
    output.push('\n');

    output.push_str(&format!("  Queries:            {}\n", summary.queries));
    if let Some(collisions) = summary.collisions {
        let line = format!("{collisions}");
        let colored = if collisions == 0 { line.green() } else { line.yellow() };
        output.push_str(&format!("  Collisions found:   {}\n", colored));
    }
    output.push_str(&format!(
        "  Total elapsed:      {:.5} s\n",
        summary.elapsed_secs()
    ));

    match (summary.secs_per_query(), summary.queries_per_sec()) {
        (Some(spq), Some(qps)) => {
            output.push_str(&format!("  Average per query:  {:.7} s\n", spq));
            output.push_str(&format!("  Queries per second: {:.2}\n", qps));
        }
        _ => {
            output.push_str(&format!("  {}\n", "No timed queries".yellow()));
        }
    }

    if summary.queries >= 2 {
        output.push_str(&format!(
            "  Mean / std dev:     {:.6} / {:.6} ms\n",
            summary.mean_ms,
            summary.variance_ms.sqrt()
        ));
    }

    for (name, phase_ms) in &summary.phases {
        let rate = per_second(summary.queries, *phase_ms)
            .map(|r| format!("{r:.2}/s"))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("    {:<24} {:>12.3} ms  {}\n", name, phase_ms, rate));
    }

    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a throughput table over several result files.
pub fn format_comparison(files: &[FileSummary]) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str(&format!(
        "{:<20} {:>10} {:>14} {:>14}\n",
        "label", "checks", "checks/s", "ms/check"
    ));
    output.push_str(&sep);
    output.push('\n');

    let best = files
        .iter()
        .filter_map(|f| f.throughput.checks_per_second)
        .fold(f64::NEG_INFINITY, f64::max);

    for file in files {
        let t = &file.throughput;
        let cps = t
            .checks_per_second
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let cps = if t.checks_per_second == Some(best) {
            cps.green().bold().to_string()
        } else {
            cps
        };
        let mspc = t
            .ms_per_check
            .map(|v| format!("{v:.6}"))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<20} {:>10} {:>14} {:>14}\n",
            file.label, t.checks, cps, mspc
        ));
        if let Some(p) = &file.percentiles {
            output.push_str(&format!(
                "  {} p50 {:.6}  p90 {:.6}  p99 {:.6}  max {:.6} ms\n",
                "\u{2514}".dimmed(),
                p.p50_ms,
                p.p90_ms,
                p.p99_ms,
                p.max_ms
            ));
        }
    }
    output
}
