// src/services/dashboard.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use log::info;

use crate::error::Result;
use crate::models::{
    ChartPoint, DashboardPayload, GaugePanel, ProjectionInput, ReserveRecord, SummaryRow,
};
use crate::services::calendar::{business_day_sequence, business_days_between, target_date};
use crate::services::classifier::{classify, ClassifierParams, RandomSource};
use crate::services::projection::{project, terminal_value};
use crate::services::trend::day_over_day_change;

/// Conventional logo overlay path. Absence is not an error.
pub const DEFAULT_LOGO_PATH: &str = "logo_gsv.png";

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub target_date: NaiveDate,
    pub logo_path: PathBuf,
    pub classifier: ClassifierParams,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            target_date: target_date(),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            classifier: ClassifierParams::default(),
        }
    }
}

/// Thousands-separated fixed-point formatting, e.g. `1234567.891` with two
/// decimals becomes `1,234,567.89`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Run the full pipeline over an already-loaded reserves series and assemble
/// the presentation payload: summary rows, both chart series and the gauge.
/// `today` is passed in so the horizon and chart dates are testable.
pub fn build_dashboard(
    series: &[ReserveRecord],
    current_value: f64,
    daily_rate: f64,
    today: NaiveDate,
    opts: &DashboardOptions,
    draw: &mut dyn RandomSource,
) -> Result<DashboardPayload> {
    let reserves_trend = day_over_day_change(series)?;

    let horizon_days = business_days_between(today, opts.target_date);
    let input = ProjectionInput {
        starting_value: current_value,
        daily_rate,
        horizon_days,
    };
    let projected = project(&input)?;
    let final_value = terminal_value(&projected, current_value);

    let classification = classify(daily_rate, &opts.classifier, draw);

    let latest_reserves = series.last().map(|r| r.amount).unwrap_or(0.0);
    let summary = vec![
        SummaryRow {
            label: "Valor actual del dólar".to_string(),
            value: format!("${}", format_thousands(current_value, 2)),
        },
        SummaryRow {
            label: "Variación diaria dólar".to_string(),
            value: format!("{:.2}%", daily_rate * 100.0),
        },
        SummaryRow {
            label: format!(
                "Dólar proyectado ({})",
                opts.target_date.format("%d/%m/%Y")
            ),
            value: format!("${}", format_thousands(final_value, 2)),
        },
        SummaryRow {
            label: "Reservas actuales (USD)".to_string(),
            value: format!("${}", format_thousands(latest_reserves, 0)),
        },
        SummaryRow {
            label: "Días hábiles proyectados".to_string(),
            value: horizon_days.to_string(),
        },
    ];

    // Reserves chart is displayed in billions.
    let reserves_chart: Vec<ChartPoint> = series
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            value: r.amount / 1e9,
        })
        .collect();

    let projection_dates = business_day_sequence(today, horizon_days);
    let projection_chart: Vec<ChartPoint> = projection_dates
        .into_iter()
        .zip(projected.iter())
        .map(|(date, point)| ChartPoint {
            date,
            value: point.value,
        })
        .collect();

    let logo_path = if opts.logo_path.exists() {
        Some(opts.logo_path.to_string_lossy().into_owned())
    } else {
        None
    };

    info!(
        "Dashboard assembled: {} reserve points, {} projected days, score {:.1}",
        reserves_chart.len(),
        projection_chart.len(),
        classification.score
    );

    Ok(DashboardPayload {
        summary,
        reserves_chart,
        projection_chart,
        reserves_trend,
        gauge: GaugePanel {
            score: classification.score,
            label: classification.state.label().to_string(),
            color: classification.state.color().to_string(),
        },
        logo_path,
    })
}
