//! OpenWeatherMap client for Nimbus
//!
//! Provides current conditions, the 5-day/3-hour forecast, and direct
//! geocoding, plus the pure helpers that turn raw forecast lists into
//! day-bucketed data for display.

pub mod client;
pub mod conditions;
pub mod forecast;
pub mod time;
pub mod types;

pub use client::WeatherClient;
pub use conditions::{background_key, icon_key, BackgroundKey, IconKey};
pub use forecast::{group_by_city_day, ForecastBucket, TODAY_KEY};
pub use types::*;
