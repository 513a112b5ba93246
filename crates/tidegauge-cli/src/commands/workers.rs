use crate::OutputFormat;
use crate::render::{bar, terminal_color};
use anyhow::Result;
use console::{Color, style};
use tidegauge_core::extract::WorkerLogExtractor;
use tidegauge_core::report::{ScenarioInput, WorkerComparison};

/// Extract k6 worker summaries from every file and compare the scenarios
pub fn compare_workers(inputs: &[ScenarioInput], source: &str) -> Result<WorkerComparison> {
    let extractor = WorkerLogExtractor::new(source)?;
    let comparison = WorkerComparison::build(inputs, &extractor)?;
    Ok(comparison)
}

pub fn execute(
    inputs: &[ScenarioInput],
    source: &str,
    show_workers: bool,
    format: OutputFormat,
) -> Result<()> {
    tracing::debug!(
        "Comparing {} worker logs as {}",
        inputs.len(),
        format.as_str()
    );

    let comparison = compare_workers(inputs, source)?;

    if comparison.is_empty() {
        println!("No data to plot.");
        return Ok(());
    }

    match format {
        OutputFormat::Json => output_json(&comparison)?,
        OutputFormat::Table => output_table(&comparison, show_workers)?,
        OutputFormat::Pretty => output_pretty(&comparison, show_workers)?,
    }

    Ok(())
}

fn output_pretty(comparison: &WorkerComparison, show_workers: bool) -> Result<()> {
    let labels = comparison.labels();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    println!("\n{}", style("Load Test Comparison").bold().cyan());
    println!("{}", style("====================").cyan());

    // Throughput
    let throughput = comparison.throughput();
    let max_throughput = throughput.iter().copied().fold(0.0, f64::max);

    println!("\n{}", style("Total System Throughput (RPS)").bold());
    for (scenario, value) in comparison.scenarios.iter().zip(&throughput) {
        println!(
            "  {:<width$}  {:<40}  {}",
            scenario.label,
            style(bar(*value, max_throughput)).fg(terminal_color(scenario.color)),
            style(value.trunc() as i64).bold(),
            width = label_width
        );
    }

    // Latency
    let avg = comparison.avg_latency();
    let p95 = comparison.p95_latency();
    let max_latency = avg.iter().chain(&p95).copied().fold(0.0, f64::max);

    println!("\n{}", style("Response Latency (ms)").bold());
    for ((label, avg), p95) in labels.iter().zip(&avg).zip(&p95) {
        println!(
            "  {:<width$}  avg {:<40}  {:.2}",
            label,
            style(bar(*avg, max_latency)).fg(Color::Yellow),
            avg,
            width = label_width
        );
        println!(
            "  {:<width$}  p95 {:<40}  {:.2}",
            "",
            style(bar(*p95, max_latency)).fg(Color::Red),
            p95,
            width = label_width
        );
    }

    if show_workers {
        for scenario in &comparison.scenarios {
            println!(
                "\n{}",
                style(format!("Workers: {}", scenario.label)).bold()
            );
            println!(
                "  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>7}",
                "worker", "requests", "req/s", "avg ms", "med ms", "p95 ms", "fail %"
            );
            for worker in &scenario.workers {
                println!(
                    "  {:>8}  {:>10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>7}",
                    worker.worker_id,
                    worker.request_count,
                    worker.throughput_per_sec,
                    worker.avg_latency_ms,
                    worker.median_latency_ms,
                    worker.p95_latency_ms,
                    worker
                        .fail_rate_percent
                        .map(|f| format!("{:.2}", f))
                        .unwrap_or_else(|| "-".to_string())
                );
            }
        }
    }

    if !comparison.skipped.is_empty() {
        println!(
            "\n{} {}",
            style("No usable data:").dim(),
            comparison.skipped.join(", ")
        );
    }

    println!();
    Ok(())
}

fn output_json(comparison: &WorkerComparison) -> Result<()> {
    let json = serde_json::to_string_pretty(comparison)?;
    println!("{}", json);
    Ok(())
}

fn output_table(comparison: &WorkerComparison, show_workers: bool) -> Result<()> {
    println!(
        "Scenario,Workers,Total Requests,Throughput (req/s),Avg Latency (ms),Median Latency (ms),P95 Latency (ms)"
    );
    for scenario in &comparison.scenarios {
        let s = &scenario.summary;
        println!(
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            scenario.label,
            s.worker_count,
            s.total_requests,
            s.total_throughput,
            s.mean_avg_latency_ms,
            s.mean_median_latency_ms,
            s.mean_p95_latency_ms
        );
    }

    if show_workers {
        println!();
        println!("Scenario,Worker,Requests,Throughput (req/s),Avg (ms),Median (ms),P95 (ms),Fail %");
        for scenario in &comparison.scenarios {
            for worker in &scenario.workers {
                println!(
                    "{},{},{},{:.2},{:.2},{:.2},{:.2},{}",
                    scenario.label,
                    worker.worker_id,
                    worker.request_count,
                    worker.throughput_per_sec,
                    worker.avg_latency_ms,
                    worker.median_latency_ms,
                    worker.p95_latency_ms,
                    worker
                        .fail_rate_percent
                        .map(|f| format!("{:.2}", f))
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
