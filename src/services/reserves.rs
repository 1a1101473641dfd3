// src/services/reserves.rs
use chrono::{Duration, NaiveDate, Utc};
use csv::Reader;
use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{PipelineError, Result};
use crate::models::{ReserveRecord, ReserveSeries};

/// BCRA "principales variables" page for gross international reserves.
pub const BCRA_RESERVES_URL: &str =
    "https://www.bcra.gob.ar/PublicacionesEstadisticas/Principales_variables_datos.asp?serie=246";

/// Conventional name of the locally exported reserves file.
pub const DEFAULT_LOCAL_CSV: &str = "reservas_bcra_ultimos3meses.csv";

const DATE_COLUMN: &str = "Fecha";
const VALUE_COLUMN: &str = "Reservas_USD";

/// Loader tunables. The two sources report in different units, so the
/// multiplier is configured per entry point rather than unified: the local
/// export carries billions, the scraped table millions.
#[derive(Debug, Clone, Copy)]
pub struct LoaderParams {
    pub unit_multiplier: f64,
    pub window_days: i64,
}

impl LoaderParams {
    pub fn local() -> Self {
        LoaderParams {
            unit_multiplier: 1e9,
            window_days: 180,
        }
    }

    pub fn scraped() -> Self {
        LoaderParams {
            unit_multiplier: 1e6,
            window_days: 180,
        }
    }
}

/// How to locate the reserves table inside the scraped document. The BCRA
/// page puts it first, so `Index(0)` is the default; that is a convention of
/// the page layout, not of HTML, and breaks loudly if it stops holding.
#[derive(Debug, Clone)]
pub enum TableSelect {
    Index(usize),
    /// First table whose caption (or first header row) contains the needle.
    Caption(String),
}

impl Default for TableSelect {
    fn default() -> Self {
        TableSelect::Index(0)
    }
}

fn parse_date_dayfirst(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
        .ok()
}

/// Sort ascending and collapse duplicate dates to the later-seen value, so
/// dates come out strictly increasing.
fn normalize(mut records: Vec<ReserveRecord>) -> ReserveSeries {
    records.sort_by_key(|r| r.date);
    let mut out: ReserveSeries = Vec::with_capacity(records.len());
    for rec in records {
        match out.last_mut() {
            Some(last) if last.date == rec.date => *last = rec,
            _ => out.push(rec),
        }
    }
    out
}

/// Parse the local CSV export. This form is strict: the file is assumed to
/// be machine-written, so the first row that fails date or number parsing
/// aborts with `MalformedRecord` instead of being skipped.
pub fn parse_local_csv(bytes: &[u8], params: &LoaderParams) -> Result<ReserveSeries> {
    let mut rdr = Reader::from_reader(bytes);

    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::MalformedRecord {
            line: 1,
            reason: format!("unreadable header row: {}", e),
        })?
        .clone();
    let idx_date = headers
        .iter()
        .position(|h| h.trim() == DATE_COLUMN)
        .ok_or_else(|| PipelineError::MalformedRecord {
            line: 1,
            reason: format!("no '{}' column", DATE_COLUMN),
        })?;
    let idx_value = headers
        .iter()
        .position(|h| h.trim() == VALUE_COLUMN)
        .ok_or_else(|| PipelineError::MalformedRecord {
            line: 1,
            reason: format!("no '{}' column", VALUE_COLUMN),
        })?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let line = i + 2; // 1-based, after the header row
        let row = row.map_err(|e| PipelineError::MalformedRecord {
            line,
            reason: e.to_string(),
        })?;

        let date_cell = row.get(idx_date).unwrap_or("").trim();
        let date = parse_date_dayfirst(date_cell).ok_or_else(|| PipelineError::MalformedRecord {
            line,
            reason: format!("unparsable date '{}'", date_cell),
        })?;

        let value_cell = row.get(idx_value).unwrap_or("").trim();
        let value: f64 = value_cell
            .parse()
            .map_err(|_| PipelineError::MalformedRecord {
                line,
                reason: format!("unparsable number '{}'", value_cell),
            })?;
        let amount = value * params.unit_multiplier;
        if amount < 0.0 {
            return Err(PipelineError::MalformedRecord {
                line,
                reason: format!("negative reserve amount {}", amount),
            });
        }

        records.push(ReserveRecord { date, amount });
    }

    let series = normalize(records);
    if series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    Ok(series)
}

/// Read and parse the local CSV export from disk.
pub fn load_from_path(path: &str, params: &LoaderParams) -> Result<ReserveSeries> {
    info!("Loading reserves from local file: {}", path);
    let bytes = std::fs::read(path)?;
    parse_local_csv(&bytes, params)
}

fn select_table<'a>(document: &'a Html, select: &TableSelect) -> Option<scraper::ElementRef<'a>> {
    let table_sel = Selector::parse("table").unwrap();
    match select {
        TableSelect::Index(n) => document.select(&table_sel).nth(*n),
        TableSelect::Caption(needle) => {
            let caption_sel = Selector::parse("caption").unwrap();
            let tr_sel = Selector::parse("tr").unwrap();
            document.select(&table_sel).find(|table| {
                let caption_text: String = table
                    .select(&caption_sel)
                    .next()
                    .or_else(|| table.select(&tr_sel).next())
                    .map(|el| el.text().collect())
                    .unwrap_or_default();
                caption_text.contains(needle.as_str())
            })
        }
    }
}

/// Parse the scraped HTML document. This form is lenient: the page is
/// hand-maintained, so rows whose date or value cell does not parse are
/// dropped and counted rather than aborting the run.
pub fn parse_html_table(
    html: &str,
    select: &TableSelect,
    params: &LoaderParams,
) -> Result<ReserveSeries> {
    let document = Html::parse_document(html);
    let table = select_table(&document, select).ok_or_else(|| {
        PipelineError::SourceUnavailable(format!("no table matching {:?} in document", select))
    })?;

    let tr_sel = Selector::parse("tr").unwrap();
    let td_sel = Selector::parse("td").unwrap();
    // Keep digits, dot and minus; the page decorates values freely.
    let cleanup = Regex::new(r"[^0-9.\-]").unwrap();

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in table.select(&tr_sel) {
        let cells: Vec<String> = row
            .select(&td_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 2 {
            continue; // header or spacer row
        }

        let date = match parse_date_dayfirst(&cells[0]) {
            Some(d) => d,
            None => {
                dropped += 1;
                continue;
            }
        };

        let cleaned = cleanup.replace_all(&cells[1], "");
        let value: f64 = match cleaned.parse() {
            Ok(v) => v,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        let amount = value * params.unit_multiplier;
        if amount < 0.0 {
            dropped += 1;
            continue;
        }

        records.push(ReserveRecord { date, amount });
    }

    if dropped > 0 {
        warn!("Dropped {} unparsable rows from scraped table", dropped);
    }

    Ok(normalize(records))
}

/// Keep only records within the trailing window ending at `today`. A window
/// that removes every record means the source had nothing recent enough,
/// which is `EmptySeries`.
pub fn filter_trailing_window(
    series: ReserveSeries,
    today: NaiveDate,
    window_days: i64,
) -> Result<ReserveSeries> {
    let cutoff = today - Duration::days(window_days);
    let filtered: ReserveSeries = series.into_iter().filter(|r| r.date >= cutoff).collect();
    if filtered.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    Ok(filtered)
}

/// One GET against the BCRA page, then parse, window-filter and sort.
pub async fn fetch_from_bcra(url: &str, params: &LoaderParams) -> Result<ReserveSeries> {
    info!("Fetching BCRA reserves table from URL: {}", url);

    let client = Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()?;
    let body = client.get(url).send().await?.text().await?;

    let series = parse_html_table(&body, &TableSelect::default(), params)?;
    let today = Utc::now().date_naive();
    let series = filter_trailing_window(series, today, params.window_days)?;
    info!("Loaded {} reserve records from BCRA", series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const LOCAL_CSV: &str = "Fecha,Reservas_USD\n01/01/2025,50\n02/01/2025,51\n";

    #[test]
    fn local_csv_applies_multiplier_and_sorts() {
        let series = parse_local_csv(LOCAL_CSV.as_bytes(), &LoaderParams::local()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date(2025, 1, 1));
        assert!((series[0].amount - 5e10).abs() < 1e-3);
        assert_eq!(series[1].date, date(2025, 1, 2));
        assert!((series[1].amount - 5.1e10).abs() < 1e-3);
    }

    #[test]
    fn local_csv_is_idempotent() {
        let params = LoaderParams::local();
        let a = parse_local_csv(LOCAL_CSV.as_bytes(), &params).unwrap();
        let b = parse_local_csv(LOCAL_CSV.as_bytes(), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn local_csv_sorts_out_of_order_rows() {
        let csv = "Fecha,Reservas_USD\n03/01/2025,52\n01/01/2025,50\n02/01/2025,51\n";
        let series = parse_local_csv(csv.as_bytes(), &LoaderParams::local()).unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3)]
        );
    }

    #[test]
    fn local_csv_rejects_bad_date() {
        let csv = "Fecha,Reservas_USD\nnot-a-date,50\n";
        let err = parse_local_csv(csv.as_bytes(), &LoaderParams::local()).unwrap_err();
        match err {
            PipelineError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn local_csv_rejects_bad_number() {
        let csv = "Fecha,Reservas_USD\n01/01/2025,fifty\n";
        assert!(matches!(
            parse_local_csv(csv.as_bytes(), &LoaderParams::local()),
            Err(PipelineError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn local_csv_missing_column_is_malformed() {
        let csv = "Fecha,Other\n01/01/2025,50\n";
        assert!(matches!(
            parse_local_csv(csv.as_bytes(), &LoaderParams::local()),
            Err(PipelineError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn duplicate_dates_collapse_to_later_value() {
        let csv = "Fecha,Reservas_USD\n01/01/2025,50\n01/01/2025,55\n";
        let series = parse_local_csv(csv.as_bytes(), &LoaderParams::local()).unwrap();
        assert_eq!(series.len(), 1);
        assert!((series[0].amount - 5.5e10).abs() < 1e-3);
    }

    const HTML_DOC: &str = r#"
        <html><body>
        <table>
          <tr><th>Fecha</th><th>Valor</th></tr>
          <tr><td>02/06/2025</td><td>41.123,0</td></tr>
          <tr><td>03/06/2025</td><td>$ 41.500</td></tr>
          <tr><td>sin fecha</td><td>41.000</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn html_table_cleans_values_and_drops_bad_rows() {
        let series =
            parse_html_table(HTML_DOC, &TableSelect::Index(0), &LoaderParams::scraped()).unwrap();
        // Third row has an unparsable date and is dropped.
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date(2025, 6, 2));
        // "41.123,0" strips to "41.123" then scales by 1e6.
        assert!((series[0].amount - 41.123e6).abs() < 1.0);
        assert!((series[1].amount - 41.5e6).abs() < 1.0);
    }

    #[test]
    fn html_missing_table_is_source_unavailable() {
        let err = parse_html_table(
            "<html><body><p>nothing</p></body></html>",
            &TableSelect::Index(0),
            &LoaderParams::scraped(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    }

    #[test]
    fn caption_selection_finds_second_table() {
        let html = r#"
            <table><caption>Otra serie</caption>
              <tr><td>01/06/2025</td><td>1</td></tr></table>
            <table><caption>Reservas Internacionales</caption>
              <tr><td>02/06/2025</td><td>41000</td></tr></table>"#;
        let series = parse_html_table(
            html,
            &TableSelect::Caption("Reservas".to_string()),
            &LoaderParams::scraped(),
        )
        .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date(2025, 6, 2));
    }

    #[test]
    fn trailing_window_filters_old_records() {
        let series = vec![
            ReserveRecord {
                date: date(2024, 1, 1),
                amount: 1.0,
            },
            ReserveRecord {
                date: date(2025, 5, 1),
                amount: 2.0,
            },
        ];
        let filtered = filter_trailing_window(series, date(2025, 6, 1), 180).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, date(2025, 5, 1));
    }

    #[test]
    fn header_only_csv_is_empty_series() {
        let err = parse_local_csv(b"Fecha,Reservas_USD\n", &LoaderParams::local()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptySeries));
    }

    #[test]
    fn trailing_window_removing_everything_is_empty_series() {
        let series = vec![ReserveRecord {
            date: date(2024, 1, 1),
            amount: 1.0,
        }];
        let err = filter_trailing_window(series, date(2025, 6, 1), 180).unwrap_err();
        assert!(matches!(err, PipelineError::EmptySeries));
    }
}
