use std::sync::Arc;

use anyhow::{bail, Context, Result};

use nimbus_app::{LoadOutcome, WeatherPipeline};
use nimbus_core::{AppState, Config, Coordinates};
use nimbus_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    nimbus_core::init()?;

    let config = Config::from_env().context("loading configuration")?;
    let report = config.validate();
    if !report.is_valid() {
        bail!("invalid configuration: {}", report.error_summary());
    }
    for warning in &report.warnings {
        tracing::warn!("config: {}", warning);
    }

    let query = std::env::args()
        .nth(1)
        .context("usage: nimbus-app <city name>")?;

    let state = Arc::new(AppState::with_unit(config.weather.default_unit));
    let client = Arc::new(WeatherClient::new(&config)?);
    let pipeline = WeatherPipeline::new(Arc::clone(&client), Arc::clone(&state));

    let places = client.fetch_city_suggestions(&query, 1).await?;
    let Some(place) = places.first() else {
        bail!("no city found for {query:?}");
    };
    tracing::info!("Resolved {:?} to {}", query, place.display_name());

    let outcome = pipeline
        .load(Coordinates::new(place.lat, place.lon))
        .await?;
    let LoadOutcome::Loaded(snapshot) = outcome else {
        bail!("weather load was superseded");
    };

    let unit = state.unit();
    println!("{}", place.display_name());
    println!(
        "  now: {:.0} {}  {}",
        snapshot.current.main.temp,
        unit.temperature_label(),
        snapshot
            .current
            .condition()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown"),
    );
    println!(
        "  wind: {} {}  humidity: {}%",
        snapshot.current.wind.speed,
        unit.wind_label(),
        snapshot.current.main.humidity,
    );
    if let Some(sunrise) = snapshot.current.sys.sunrise {
        println!(
            "  sunrise: {}",
            nimbus_weather::time::format_time(sunrise, snapshot.current.timezone)
        );
    }

    for bucket in &snapshot.buckets {
        let temps: Vec<String> = bucket
            .slots
            .iter()
            .map(|slot| format!("{:.0}", slot.main.temp))
            .collect();
        println!("  {:>5}: {}", bucket.key, temps.join(" "));
    }

    Ok(())
}
