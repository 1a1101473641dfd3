// src/bin/import_reserves.rs
use reservas_dashboard::services::reserves::{fetch_from_bcra, LoaderParams, BCRA_RESERVES_URL};
use reservas_dashboard::services::trend::day_over_day_change;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let series = fetch_from_bcra(BCRA_RESERVES_URL, &LoaderParams::scraped()).await?;
    println!("Fetched {} reserve records:", series.len());
    for record in &series {
        println!("{}  {:>20.0}", record.date, record.amount);
    }
    println!("Day-over-day trend: {:+.4}%", day_over_day_change(&series)? * 100.0);
    Ok(())
}
