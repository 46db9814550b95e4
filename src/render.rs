use analytics::{AssetSummary, Heatmap, HeatmapCell, ProjectionResult, RiskReport};
use comfy_table::{Table, presets::UTF8_FULL};
use engine::{AnalyticsResponse, ForecastView, Outcome};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

const PERCENTILES: [f64; 3] = [5.0, 50.0, 95.0];

/// Prints every section of a response as terminal tables.
pub fn print_response(response: &AnalyticsResponse) {
    println!(
        "Request {} | {} observations | seed {}",
        response.request_id,
        response.observations,
        response.seed.map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    println!("{}", summary_table(&response.summary));
    print_section("Risk", &response.risk, risk_table);
    print_section("Monthly heatmap", &response.heatmap, heatmap_table);
    print_section("Monte Carlo forecast", &response.simulation, forecast_table);
    if let Some(projection) = &response.projection {
        print_section("Projection", projection, projection_table);
    }
}

fn print_section<T>(title: &str, outcome: &Outcome<T>, render: fn(&T) -> Table) {
    println!("\n{title}");
    match outcome {
        Outcome::Ready(value) => println!("{}", render(value)),
        Outcome::NotEnoughData(message) => println!("{message}"),
        Outcome::Failed { message, .. } => println!("Unavailable: {message}"),
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn summary_table(summary: &AssetSummary) -> Table {
    let mut table = new_table(vec!["Latest date", "Latest price", "1y growth", "Best month", "Worst month"]);
    table.add_row(vec![
        summary.latest_date.to_string(),
        money(summary.latest_price),
        optional_percent(summary.one_year_growth_pct),
        month_label(summary.best_month),
        month_label(summary.worst_month),
    ]);
    table
}

fn risk_table(report: &RiskReport) -> Table {
    let metrics = &report.metrics;
    let mut table = new_table(vec!["Metric", "Value"]);
    table
        .add_row(vec!["Annualized volatility".to_string(), format!("{:.4}", metrics.annualized_volatility)])
        .add_row(vec![
            "Annualized return".to_string(),
            optional_percent(metrics.annualized_return.map(|r| r * 100.0)),
        ])
        .add_row(vec!["Sharpe ratio".to_string(), optional(metrics.sharpe_ratio, 3)])
        .add_row(vec!["Daily mean return".to_string(), format!("{:.6}", report.daily.mean_return)])
        .add_row(vec!["Daily volatility".to_string(), optional(report.daily.volatility, 6)])
        .add_row(vec!["Daily returns".to_string(), report.daily.observations.to_string()]);
    table
}

fn heatmap_table(heatmap: &Heatmap) -> Table {
    let mut table = new_table(vec!["Month", "Mean daily change"]);
    for cell in heatmap.cells() {
        table.add_row(vec![month_label(Some(*cell)), format!("{:+.4}%", cell.mean_daily_change * 100.0)]);
    }
    table
}

fn forecast_table(forecast: &ForecastView) -> Table {
    let bundle = &forecast.bundle;
    let mut table = new_table(vec!["Statistic", "Terminal price"]);
    table.add_row(vec![
        format!("Mean of {} paths over {} days", bundle.len(), bundle.horizon_days),
        forecast.mean_terminal_price.map_or_else(|| "-".to_string(), money),
    ]);
    for pct in PERCENTILES {
        table.add_row(vec![
            format!("P{pct:.0}"),
            bundle.terminal_percentile(pct).map_or_else(|| "-".to_string(), money),
        ]);
    }
    if let Some(end) = forecast.predicted.last() {
        table.add_row(vec![format!("Predicted path ({})", end.date), money(end.price)]);
    }
    table
}

fn projection_table(projection: &ProjectionResult) -> Table {
    let mut table = new_table(vec!["Final amount", "Growth", "Annualized return used"]);
    table.add_row(vec![
        money(projection.final_amount),
        format!("{:.2}%", projection.growth_percent),
        format!("{:.2}%", projection.annualized_return_used * 100.0),
    ]);
    table
}

/// Rounds to cents. Amounts outside the decimal range fall back to float formatting.
fn money(amount: f64) -> String {
    Decimal::from_f64(amount)
        .map(|d| d.round_dp(2).to_string())
        .unwrap_or_else(|| format!("{amount:.2}"))
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.precision$}"))
}

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}%"))
}

fn month_label(cell: Option<HeatmapCell>) -> String {
    cell.and_then(|c| u8::try_from(c.month).ok())
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map_or_else(|| "-".to_string(), |m| m.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money(1234.5678), "1234.57");
        assert_eq!(money(f64::INFINITY), "inf");
    }

    #[test]
    fn month_labels() {
        let cell = HeatmapCell { month: 3, mean_daily_change: 0.01 };
        assert_eq!(month_label(Some(cell)), "March");
        assert_eq!(month_label(None), "-");
    }
}
