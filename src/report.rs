use analyzer::color::Rgb;
use analyzer::{BETA_COLOR, Comparison, Extrema, InstrumentSummary};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::path::Path;

/// Padding applied to the zero-bounded extremes for the value axis.
pub const AXIS_PADDING: f64 = 1.1;

/// The five artifacts handed to a chart renderer.
#[derive(Debug, Serialize)]
pub struct ChartData<'a> {
    pub title: String,
    pub labels: &'a [String],
    pub betas: &'a [f64],
    pub alphas: &'a [f64],
    pub colors: &'a [Rgb],
    pub extrema: Extrema,
    pub axis_limits: (f64, f64),
    pub label_offset: f64,
}

impl<'a> ChartData<'a> {
    pub fn new(symbol: &str, comparison: &'a Comparison) -> Self {
        let extrema = comparison.ranked.extrema;
        Self {
            title: format!("Benchmark Correlations for {}", symbol),
            labels: &comparison.ranked.labels,
            betas: &comparison.ranked.betas,
            alphas: &comparison.ranked.alphas,
            colors: &comparison.colors,
            extrema,
            axis_limits: extrema.axis_limits(AXIS_PADDING),
            label_offset: extrema.label_offset(),
        }
    }
}

pub fn format_beta(beta: f64) -> String {
    format!("{:.2}", beta)
}

pub fn format_alpha(alpha: f64) -> String {
    format!("{:.1}%", 100.0 * alpha)
}

pub fn summary_lines(summary: &InstrumentSummary) -> Vec<String> {
    vec![
        format!("Starting Share Price: ${:.2}", summary.start_price),
        format!("Final Share Price:    ${:.2}", summary.end_price),
        format!("Stock Percent Return: {:.2}%", 100.0 * summary.total_return),
    ]
}

pub fn print_summary(summary: &InstrumentSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

fn color_of(rgb: &Rgb) -> Color {
    let (r, g, b) = rgb.to_u8();
    Color::Rgb { r, g, b }
}

/// Renders the ranked comparison as a terminal table.
pub fn comparison_table(comparison: &Comparison) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Benchmark", "Beta", "Alpha /yr", "Alpha color (r, g, b)"]);

    let ranked = &comparison.ranked;
    for (i, label) in ranked.labels.iter().enumerate() {
        let color = &comparison.colors[i];
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_beta(ranked.betas[i]))
                .fg(color_of(&BETA_COLOR))
                .set_alignment(CellAlignment::Right),
            Cell::new(format_alpha(ranked.alphas[i]))
                .fg(color_of(color))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("({:.2}, {:.2}, {:.2})", color.r, color.g, color.b)),
        ]);
    }
    table
}

pub fn print_dropped(comparison: &Comparison) {
    for dropped in &comparison.dropped {
        println!(
            "Ignored benchmark {} [{}]: {}",
            dropped.label, dropped.ticker, dropped.reason
        );
    }
}

pub fn write_json(path: &Path, chart: &ChartData<'_>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(chart)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::ranking::RankedResult;
    use std::collections::BTreeMap;

    fn comparison() -> Comparison {
        let alphas = vec![0.123, -0.05];
        let betas = vec![1.234, 0.5];
        let extrema = Extrema::from_values(&alphas, &betas).unwrap();
        Comparison {
            colors: analyzer::color::colors_for_alphas(&alphas, &extrema),
            ranked: RankedResult {
                labels: vec!["SP500".to_string(), "Gold".to_string()],
                betas,
                alphas,
                extrema,
            },
            results: BTreeMap::new(),
            dropped: Vec::new(),
        }
    }

    #[test]
    fn labels_use_chart_precision() {
        assert_eq!(format_beta(1.234), "1.23");
        assert_eq!(format_beta(-0.456), "-0.46");
        assert_eq!(format_alpha(0.0802), "8.0%");
        assert_eq!(format_alpha(-0.1234), "-12.3%");
    }

    #[test]
    fn summary_mentions_prices_and_return() {
        let summary = InstrumentSummary {
            symbol: "AAPL".to_string(),
            start_price: 100.0,
            end_price: 121.0,
            total_return: 0.21,
            bars: 3,
        };
        let lines = summary_lines(&summary);
        assert_eq!(lines[0], "Starting Share Price: $100.00");
        assert_eq!(lines[1], "Final Share Price:    $121.00");
        assert_eq!(lines[2], "Stock Percent Return: 21.00%");
    }

    #[test]
    fn table_has_one_row_per_benchmark() {
        let table = comparison_table(&comparison());
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("SP500"));
        assert!(rendered.contains("12.3%"));
    }

    #[test]
    fn chart_json_carries_all_artifacts() {
        let comparison = comparison();
        let chart = ChartData::new("AAPL", &comparison);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");

        write_json(&path, &chart).unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["title"], "Benchmark Correlations for AAPL");
        assert_eq!(value["labels"][0], "SP500");
        assert_eq!(value["colors"].as_array().unwrap().len(), 2);
        assert_eq!(value["extrema"]["min"], -0.05);
        assert_eq!(value["extrema"]["max"], 1.234);
    }
}
