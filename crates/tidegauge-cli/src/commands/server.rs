use crate::OutputFormat;
use crate::render::{seconds_per_cell, sparkline, terminal_color};
use anyhow::Result;
use console::style;
use tidegauge_core::analysis::RateAnalyzer;
use tidegauge_core::extract::{ServerLogConfig, ServerLogExtractor};
use tidegauge_core::report::{RateComparison, ScenarioInput};

const SPARK_WIDTH: usize = 60;

/// Settings for reading server logs
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub log: ServerLogConfig,
    pub window: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            log: ServerLogConfig::default(),
            window: tidegauge_core::analysis::DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Count sentinel events per second in every file and compare the scenarios
pub fn compare_servers(inputs: &[ScenarioInput], options: &ServerOptions) -> Result<RateComparison> {
    let extractor = ServerLogExtractor::new(options.log.clone())?;
    let analyzer = RateAnalyzer::new(options.window);
    let comparison = RateComparison::build(inputs, &extractor, &analyzer)?;
    Ok(comparison)
}

pub fn execute(
    inputs: &[ScenarioInput],
    options: &ServerOptions,
    show_series: bool,
    format: OutputFormat,
) -> Result<()> {
    tracing::debug!(
        "Comparing {} server logs as {} (sentinel: {:?})",
        inputs.len(),
        format.as_str(),
        options.log.sentinel
    );

    if options.window == 0 {
        anyhow::bail!("--window must be at least 1");
    }

    let comparison = compare_servers(inputs, options)?;

    if comparison.is_empty() {
        println!("No data to plot.");
        return Ok(());
    }

    match format {
        OutputFormat::Json => output_json(&comparison)?,
        OutputFormat::Table => output_table(&comparison)?,
        OutputFormat::Pretty => output_pretty(&comparison, show_series)?,
    }

    Ok(())
}

fn output_pretty(comparison: &RateComparison, show_series: bool) -> Result<()> {
    println!(
        "\n{}",
        style("Server-Side Traffic (Requests Processed/Checked)")
            .bold()
            .cyan()
    );
    println!(
        "{}",
        style("================================================").cyan()
    );

    let max_rate = comparison
        .scenarios
        .iter()
        .flat_map(|s| s.report.smoothed.iter().map(|p| p.rate))
        .fold(0.0, f64::max);

    for scenario in &comparison.scenarios {
        let color = terminal_color(scenario.color);
        let report = &scenario.report;

        println!("\n{} {}", style("●").fg(color), style(&scenario.legend).bold());
        println!(
            "  {} requests over {:.1}s, peak {} RPS",
            style(report.total_events).yellow(),
            report.duration_seconds,
            report.peak_rps
        );

        let points: Vec<(u64, f64)> = report.smoothed.iter().map(|p| (p.second, p.rate)).collect();
        for (start, row) in sparkline(&points, max_rate, SPARK_WIDTH) {
            println!("  {:>5}s {}", start, style(row).fg(color));
        }
        if let Some(last) = points.last().map(|(second, _)| *second) {
            let step = seconds_per_cell(last, SPARK_WIDTH);
            if step > 1 {
                println!("  {}", style(format!("one cell = {}s", step)).dim());
            }
        }

        if show_series {
            println!("  {:>7}  {:>7}  {:>10}", "second", "count", "smoothed");
            for point in &report.smoothed {
                println!(
                    "  {:>7}  {:>7}  {:>10.2}",
                    point.second, point.count, point.rate
                );
            }
        }
    }

    println!(
        "\n{} time elapsed in seconds, {}-point trailing average",
        style("x:").dim(),
        comparison
            .scenarios
            .first()
            .map(|s| s.report.window)
            .unwrap_or_default()
    );

    if !comparison.skipped.is_empty() {
        println!(
            "{} {}",
            style("No request data:").dim(),
            comparison.skipped.join(", ")
        );
    }

    println!();
    Ok(())
}

fn output_json(comparison: &RateComparison) -> Result<()> {
    let json = serde_json::to_string_pretty(comparison)?;
    println!("{}", json);
    Ok(())
}

fn output_table(comparison: &RateComparison) -> Result<()> {
    println!("Scenario,Requests,Duration (s),Average (req/s),Peak (req/s)");
    for scenario in &comparison.scenarios {
        let report = &scenario.report;
        println!(
            "{},{},{:.3},{:.2},{}",
            scenario.label,
            report.total_events,
            report.duration_seconds,
            report.average_rps,
            report.peak_rps
        );
    }

    println!();
    println!("Scenario,Second,Count,Smoothed (req/s)");
    for scenario in &comparison.scenarios {
        for point in &scenario.report.smoothed {
            println!(
                "{},{},{},{:.2}",
                scenario.label, point.second, point.count, point.rate
            );
        }
    }

    Ok(())
}
