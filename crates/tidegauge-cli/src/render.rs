//! Terminal drawing helpers shared by the `pretty` outputs.

use console::Color;

const BAR_WIDTH: usize = 40;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Terminal colour closest to a palette entry
pub fn terminal_color(hex: &str) -> Color {
    match hex {
        "#4285f4" => Color::Blue,
        "#34a853" => Color::Green,
        "#ea4335" => Color::Red,
        "#fbbc05" => Color::Yellow,
        _ => Color::White,
    }
}

/// Horizontal bar scaled against `max`; a non-zero value always gets a cell
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }

    let cells = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells.clamp(1, BAR_WIDTH))
}

/// Rows a sparkline may take before seconds are merged into wider cells
pub const MAX_SPARK_ROWS: u64 = 20;

/// Seconds each sparkline cell covers so that `0..=last` fits in
/// `MAX_SPARK_ROWS` rows of `width` cells
pub fn seconds_per_cell(last: u64, width: usize) -> u64 {
    let capacity = width.max(1) as u64 * MAX_SPARK_ROWS;
    last / capacity + 1
}

/// Sparkline of `(second, value)` points laid out by second.
///
/// Cells with no point are left blank; a cell covering several seconds shows
/// the highest value among them. Returns one string per row, each paired with
/// the second it starts at.
pub fn sparkline(points: &[(u64, f64)], max: f64, width: usize) -> Vec<(u64, String)> {
    let Some(last) = points.iter().map(|(second, _)| *second).max() else {
        return Vec::new();
    };
    let width = width.max(1);
    let step = seconds_per_cell(last, width);

    let mut cells: Vec<Option<f64>> = vec![None; (last / step) as usize + 1];
    for &(second, value) in points {
        let cell = &mut cells[(second / step) as usize];
        *cell = Some(cell.map_or(value, |seen| seen.max(value)));
    }

    let chars: Vec<char> = cells
        .iter()
        .map(|cell| cell.map_or(' ', |value| level(value, max)))
        .collect();

    chars
        .chunks(width)
        .enumerate()
        .map(|(row, chunk)| (row as u64 * width as u64 * step, chunk.iter().collect()))
        .collect()
}

fn level(value: f64, max: f64) -> char {
    if max <= 0.0 || value <= 0.0 {
        return SPARK_LEVELS[0];
    }
    let idx = ((value / max) * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
    SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
}
