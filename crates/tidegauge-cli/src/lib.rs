use clap::ValueEnum;
use std::path::Path;
use tidegauge_core::report::ScenarioInput;

pub mod commands;
pub mod render;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

/// Parse a `FILE` or `LABEL=FILE` command-line argument
pub fn parse_scenario_arg(arg: &str) -> Result<ScenarioInput, String> {
    if arg.is_empty() {
        return Err("file argument must not be empty".to_string());
    }

    if let Some((label, path)) = arg.split_once('=')
        && !label.is_empty()
        && !path.is_empty()
        && !label.contains(['/', '\\'])
    {
        return Ok(ScenarioInput::new(label, path));
    }

    Ok(ScenarioInput::new(derive_label(Path::new(arg)), arg))
}

/// Scenario label for a log file: the file name's text after its last `-`,
/// without a `.log` suffix (`k6-workers-cmsmode.log` gives `cmsmode`).
///
/// Only the file name is looked at, so hyphens in directory names are
/// ignored, and the result is never empty.
pub fn derive_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let stem = name.strip_suffix(".log").unwrap_or(&name);
    let tail = stem.rsplit('-').next().unwrap_or(stem);

    if !tail.is_empty() {
        tail.to_string()
    } else if !stem.is_empty() {
        stem.to_string()
    } else {
        name
    }
}
