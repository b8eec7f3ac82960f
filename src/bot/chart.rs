//! Builds the quickchart.io URL for the income-vs-expense chart.

use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

use crate::ledger::MonthFlow;

/// Build a quickchart.io bar chart URL from the per-month totals.
///
/// One bar pair per month: `Pemasukan` next to `Pengeluaran`, rendered at
/// 600x400 on a white background.
pub fn build_chart_url(months: &[MonthFlow]) -> String {
    let labels: Vec<&str> = months.iter().map(|flow| flow.label.as_str()).collect();
    let income: Vec<f64> = months
        .iter()
        .map(|flow| flow.total_in.to_f64().unwrap_or(0.0))
        .collect();
    let expenses: Vec<f64> = months
        .iter()
        .map(|flow| flow.total_out.to_f64().unwrap_or(0.0))
        .collect();

    let config = json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [
                {
                    "label": "Pemasukan",
                    "data": income,
                    "backgroundColor": "rgba(75, 192, 192, 0.8)",
                },
                {
                    "label": "Pengeluaran",
                    "data": expenses,
                    "backgroundColor": "rgba(255, 99, 132, 0.8)",
                },
            ],
        },
        "options": {
            "title": { "display": true, "text": "Pemasukan vs Pengeluaran" },
            "scales": {
                "yAxes": [{ "ticks": { "beginAtZero": true, "min": 0 } }],
            },
        },
    });

    let query = serde_urlencoded::to_string([("c", config.to_string())]).unwrap_or_default();

    format!("https://quickchart.io/chart?{query}&w=600&h=400&bkg=white")
}
