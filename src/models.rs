// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

/// One reserves observation, amount in base currency units (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReserveRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Sorted ascending by date, dates strictly increasing after normalization.
pub type ReserveSeries = Vec<ReserveRecord>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub starting_value: f64,
    pub daily_rate: f64,
    pub horizon_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub day_index: u32,
    pub value: f64,
}

pub type ProjectedSeries = Vec<ProjectedPoint>;

/// Severity states, worst first. Label and color are presentation metadata
/// carried through as-is; nothing in the core interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomicState {
    Corralito,
    Picadolar,
    Npn,
    Tmc,
}

impl EconomicState {
    pub fn label(&self) -> &'static str {
        match self {
            EconomicState::Corralito => "CORRALITO",
            EconomicState::Picadolar => "Picadolar",
            EconomicState::Npn => "NPN",
            EconomicState::Tmc => "TMC",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EconomicState::Corralito => "#ff3c38",
            EconomicState::Picadolar => "#ff9800",
            EconomicState::Npn => "#f4e04d",
            EconomicState::Tmc => "#90ee90",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub score: f64,
    pub state: EconomicState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugePanel {
    pub score: f64,
    pub label: String,
    pub color: String,
}

/// Everything the frontend needs to draw the dashboard: summary table rows,
/// both chart series, the gauge panel and an optional logo overlay path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub summary: Vec<SummaryRow>,
    pub reserves_chart: Vec<ChartPoint>,
    pub projection_chart: Vec<ChartPoint>,
    pub reserves_trend: f64,
    pub gauge: GaugePanel,
    pub logo_path: Option<String>,
}
