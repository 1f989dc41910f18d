//! Wire types for the OpenWeatherMap current-weather, forecast and
//! geocoding endpoints. Only the fields the client actually consumes are
//! modeled; unknown fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Part-of-day indicator from the provider (`d` = day, `n` = night).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PartOfDay {
    #[default]
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "n")]
    Night,
}

impl PartOfDay {
    pub fn is_night(&self) -> bool {
        matches!(self, PartOfDay::Night)
    }
}

/// Temperature/pressure/humidity block shared by current and forecast slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub sea_level: Option<f64>,
    pub grnd_level: Option<f64>,
}

/// A single weather condition entry (id drives icon/background selection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTag {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl ConditionTag {
    /// Part of day from the icon suffix (`"10n"` is night, anything else day).
    pub fn part_of_day(&self) -> PartOfDay {
        if self.icon.ends_with('n') {
            PartOfDay::Night
        } else {
            PartOfDay::Day
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SysInfo {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Response of the `/weather` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub main: MainConditions,
    pub weather: Vec<ConditionTag>,
    #[serde(default)]
    pub sys: SysInfo,
    pub wind: Wind,
    /// Shift in seconds from UTC for the city's local time
    pub timezone: i64,
}

impl CurrentWeatherResponse {
    /// Primary condition tag, when the provider sent one.
    pub fn condition(&self) -> Option<&ConditionTag> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ForecastSlotSys {
    pub pod: Option<PartOfDay>,
}

/// One 3-hour slot of the `/forecast` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    /// Slot time as UNIX seconds (UTC)
    pub dt: i64,
    pub main: MainConditions,
    pub weather: Vec<ConditionTag>,
    /// Probability of precipitation, 0.0..=1.0
    pub pop: Option<f64>,
    #[serde(default)]
    pub sys: ForecastSlotSys,
}

impl ForecastSlot {
    pub fn condition(&self) -> Option<&ConditionTag> {
        self.weather.first()
    }

    /// Part of day: the slot's own `pod` when present, else derived from the
    /// condition icon, else day.
    pub fn part_of_day(&self) -> PartOfDay {
        self.sys
            .pod
            .or_else(|| self.condition().map(ConditionTag::part_of_day))
            .unwrap_or_default()
    }
}

/// Response of the `/forecast` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSlot>,
}

/// One entry of the direct geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl GeocodeResult {
    /// Display form of the place: "Name, State, Country" with absent parts
    /// omitted.
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(state) = self.state.as_deref() {
            parts.push(state);
        }
        if let Some(country) = self.country.as_deref() {
            parts.push(country);
        }
        parts.join(", ")
    }
}
