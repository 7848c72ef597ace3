use analytics::StatisticsResult;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value * 100.0)
    } else {
        "-".to_string()
    }
}

fn ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.3}")
    } else {
        "-".to_string()
    }
}

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// One row per fund with its whole-series figures.
pub fn comparison_table(results: &[(String, StatisticsResult)]) -> Table {
    let mut table = new_table(
        [
            "Fund",
            "Return",
            "Benchmark",
            "Relative",
            "Risk",
            "Sharpe",
            "Consistency",
            "Correlation",
        ]
        .map(String::from)
        .to_vec(),
    );

    for (name, result) in results {
        let a = &result.accumulated;
        table.add_row(vec![
            Cell::new(name),
            Cell::new(percent(a.investment_return)).set_alignment(CellAlignment::Right),
            Cell::new(percent(a.benchmark_investment_return)).set_alignment(CellAlignment::Right),
            Cell::new(ratio(a.relative_investment_return)).set_alignment(CellAlignment::Right),
            Cell::new(percent(a.risk)).set_alignment(CellAlignment::Right),
            Cell::new(ratio(a.sharpe)).set_alignment(CellAlignment::Right),
            Cell::new(percent(a.consistency)).set_alignment(CellAlignment::Right),
            Cell::new(ratio(a.correlation)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// A labelled square table of correlation coefficients.
pub fn matrix_table(labels: &[String], matrix: &[Vec<f64>]) -> Table {
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    let mut table = new_table(header);

    for (label, row) in labels.iter().zip(matrix) {
        let mut cells = vec![Cell::new(label)];
        cells.extend(
            row.iter()
                .map(|&v| Cell::new(ratio(v)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(cells);
    }
    table
}
