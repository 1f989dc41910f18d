//! Mapping from OpenWeatherMap condition ids to icon and background keys.
//!
//! Condition id ranges follow the provider's published groups: 2xx
//! thunderstorm, 3xx drizzle, 5xx rain, 6xx snow, 7xx atmosphere, 800
//! clear, 80x clouds. Night variants are chosen when the part of day is
//! night.

use crate::types::PartOfDay;

/// Asset key for the small condition icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    Thunderstorm,
    Drizzle,
    DrizzleNight,
    FreezingRain,
    HeavyRain,
    Rain,
    HeavySnow,
    Snow,
    Fog,
    Haze,
    Clear,
    ClearNight,
    PartlyCloudy,
    PartlyCloudyNight,
    Cloudy,
}

impl IconKey {
    /// Asset name used to look up the icon resource.
    pub fn asset_name(&self) -> &'static str {
        match self {
            IconKey::Thunderstorm => "thunderstorm",
            IconKey::Drizzle => "drizzle",
            IconKey::DrizzleNight => "drizzlenight",
            IconKey::FreezingRain => "freezingrain",
            IconKey::HeavyRain => "heavyrain",
            IconKey::Rain => "rain",
            IconKey::HeavySnow => "heavysnow",
            IconKey::Snow => "snow",
            IconKey::Fog => "fog",
            IconKey::Haze => "haze",
            IconKey::Clear => "clear",
            IconKey::ClearNight => "clearnight",
            IconKey::PartlyCloudy => "partlycloud",
            IconKey::PartlyCloudyNight => "partlycloudynight",
            IconKey::Cloudy => "cloudy",
        }
    }
}

/// Asset key for the full-screen weather background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKey {
    Thunderstorm,
    ThunderstormNight,
    Rain,
    RainNight,
    Snow,
    SnowNight,
    Fog,
    FogNight,
    Clear,
    ClearNight,
    Cloudy,
    CloudyNight,
}

impl BackgroundKey {
    pub fn asset_name(&self) -> &'static str {
        match self {
            BackgroundKey::Thunderstorm => "thunderstorm",
            BackgroundKey::ThunderstormNight => "thunderstormnight",
            BackgroundKey::Rain => "rain",
            BackgroundKey::RainNight => "rainnight",
            BackgroundKey::Snow => "snow",
            BackgroundKey::SnowNight => "snownight",
            BackgroundKey::Fog => "fog",
            BackgroundKey::FogNight => "fognight",
            BackgroundKey::Clear => "clear",
            BackgroundKey::ClearNight => "clearnight",
            BackgroundKey::Cloudy => "cloudy",
            BackgroundKey::CloudyNight => "cloudynight",
        }
    }
}

/// Pick the icon key for a condition id and part of day.
pub fn icon_key(weather_id: i64, pod: PartOfDay) -> IconKey {
    let is_night = pod.is_night();

    match weather_id {
        200..=232 => IconKey::Thunderstorm,
        300..=321 => {
            if is_night {
                IconKey::DrizzleNight
            } else {
                IconKey::Drizzle
            }
        }
        511 => IconKey::FreezingRain,
        520..=531 => IconKey::HeavyRain,
        500..=519 => IconKey::Rain,
        612..=622 => IconKey::HeavySnow,
        600..=611 => IconKey::Snow,
        721 => IconKey::Haze,
        701..=781 => IconKey::Fog,
        800 => {
            if is_night {
                IconKey::ClearNight
            } else {
                IconKey::Clear
            }
        }
        801..=802 => {
            if is_night {
                IconKey::PartlyCloudyNight
            } else {
                IconKey::PartlyCloudy
            }
        }
        _ => IconKey::Cloudy,
    }
}

/// Pick the background key for a condition id and part of day.
pub fn background_key(weather_id: i64, pod: PartOfDay) -> BackgroundKey {
    let is_night = pod.is_night();

    match weather_id {
        200..=232 => {
            if is_night {
                BackgroundKey::ThunderstormNight
            } else {
                BackgroundKey::Thunderstorm
            }
        }
        300..=531 => {
            if is_night {
                BackgroundKey::RainNight
            } else {
                BackgroundKey::Rain
            }
        }
        600..=622 => {
            if is_night {
                BackgroundKey::SnowNight
            } else {
                BackgroundKey::Snow
            }
        }
        701..=781 => {
            if is_night {
                BackgroundKey::FogNight
            } else {
                BackgroundKey::Fog
            }
        }
        800 => {
            if is_night {
                BackgroundKey::ClearNight
            } else {
                BackgroundKey::Clear
            }
        }
        _ => {
            if is_night {
                BackgroundKey::CloudyNight
            } else {
                BackgroundKey::Cloudy
            }
        }
    }
}
