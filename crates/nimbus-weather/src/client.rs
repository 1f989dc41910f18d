//! HTTP client for the OpenWeatherMap current-weather, forecast and direct
//! geocoding endpoints.
//!
//! Each operation is a single GET with the API key injected into the query
//! string. There are no retries and no caching; a non-success status is
//! surfaced as [`WeatherError::Api`] carrying the service's own `message`
//! field when one is present.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use nimbus_core::{Config, Coordinates, Unit, WeatherError};

use crate::types::{CurrentWeatherResponse, ForecastResponse, GeocodeResult};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Optional `message` field of OpenWeatherMap error bodies.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: String,
    weather_base: String,
    geocode_base: String,
}

impl WeatherClient {
    /// Create a client from the application config.
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            weather_base: config.weather_base_url.trim_end_matches('/').to_string(),
            geocode_base: config.geocode_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current conditions for a coordinate pair.
    pub async fn fetch_current(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<CurrentWeatherResponse, WeatherError> {
        let url = self.endpoint(
            &self.weather_base,
            "/weather",
            &[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("units", unit.as_str().to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    /// 5-day/3-hour forecast for a coordinate pair.
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<ForecastResponse, WeatherError> {
        let url = self.endpoint(
            &self.weather_base,
            "/forecast",
            &[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("units", unit.as_str().to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    /// Direct geocoding: free-text query to candidate places.
    pub async fn fetch_city_suggestions(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<GeocodeResult>, WeatherError> {
        let url = self.endpoint(
            &self.geocode_base,
            "/direct",
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )?;
        self.get_json(url).await
    }

    /// Build a request URL from base + path + parameters, always appending
    /// the API key.
    fn endpoint(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|e| WeatherError::message(format!("Invalid endpoint URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("appid", &self.api_key);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WeatherError> {
        tracing::debug!("GET {}{}", url.host_str().unwrap_or(""), url.path());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // The API reports errors as JSON with a human-readable message;
            // fall back to the status code when the body is unusable.
            let message = if text.is_empty() {
                None
            } else {
                serde_json::from_str::<ApiErrorBody>(&text)
                    .ok()
                    .and_then(|body| body.message)
            }
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

            tracing::warn!("Weather API error ({}): {}", status.as_u16(), message);
            return Err(WeatherError::Api { message });
        }

        if text.is_empty() {
            return Err(WeatherError::message("Empty response body"));
        }

        serde_json::from_str(&text)
            .map_err(|e| WeatherError::message(format!("Invalid response: {e}")))
    }
}
