//! Weather load pipeline.
//!
//! Fetches current conditions and the forecast concurrently, joins them,
//! buckets the forecast by the city's local day, and publishes the result.
//! Loads are guarded by a generation counter, same pattern as the search
//! token: when a newer load starts while an older one is in flight, the
//! older completion is dropped instead of winning by finishing last.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use nimbus_core::{
    build_location_id, AppError, AppState, Coordinates, LocationSelection, WeatherError,
};
use nimbus_location::{LocationResolver, PositionProvider};
use nimbus_weather::{group_by_city_day, CurrentWeatherResponse, ForecastBucket, WeatherClient};

/// Joined result of one weather load.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentWeatherResponse,
    pub buckets: Vec<ForecastBucket>,
    /// Coordinates the load was issued for
    pub coords: Coordinates,
    pub fetched_at: DateTime<Utc>,
}

/// How a load call ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(WeatherSnapshot),
    /// A newer load started while this one was in flight; its result was
    /// discarded without touching the published state.
    Superseded,
}

pub struct WeatherPipeline {
    client: Arc<WeatherClient>,
    state: Arc<AppState>,
    generation: AtomicU64,
    loading: AtomicBool,
    snapshot: Mutex<Option<WeatherSnapshot>>,
    error: Mutex<Option<String>>,
}

impl WeatherPipeline {
    pub fn new(client: Arc<WeatherClient>, state: Arc<AppState>) -> Self {
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            snapshot: Mutex::new(None),
            error: Mutex::new(None),
        }
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.snapshot.lock().clone()
    }

    /// Message of the most recent failed load, cleared on the next load.
    pub fn error_message(&self) -> Option<String> {
        self.error.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Load current weather and forecast for the coordinates and publish
    /// the bucketed result.
    pub async fn load(&self, coords: Coordinates) -> Result<LoadOutcome, WeatherError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);
        *self.error.lock() = None;

        let unit = self.state.unit();
        let (current, forecast) = tokio::join!(
            self.client.fetch_current(coords, unit),
            self.client.fetch_forecast(coords, unit),
        );

        // A newer load owns the published state (and the loading flag).
        if generation != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(
                "Discarding superseded weather load for ({:.4}, {:.4})",
                coords.lat,
                coords.lon
            );
            return Ok(LoadOutcome::Superseded);
        }

        self.loading.store(false, Ordering::SeqCst);
        match (current, forecast) {
            (Ok(current), Ok(forecast)) => {
                let buckets = group_by_city_day(&forecast.list, current.timezone);
                let snapshot = WeatherSnapshot {
                    current,
                    buckets,
                    coords,
                    fetched_at: Utc::now(),
                };
                *self.snapshot.lock() = Some(snapshot.clone());
                Ok(LoadOutcome::Loaded(snapshot))
            }
            (Err(err), _) | (_, Err(err)) => {
                *self.error.lock() = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Load weather for the selected location when one is set, else for the
    /// given fallback coordinates (typically the resolved device position).
    pub async fn load_active(
        &self,
        fallback: Option<Coordinates>,
    ) -> Result<Option<LoadOutcome>, WeatherError> {
        let coords = self
            .state
            .selected_location()
            .map(|selection| selection.coordinates())
            .or(fallback);
        match coords {
            Some(coords) => self.load(coords).await.map(Some),
            None => Ok(None),
        }
    }

    /// "Use my location": drop the explicit selection, refresh the device
    /// position and load weather there. When the refresh fails but an older
    /// fix is still held, that fix is used instead of failing outright.
    pub async fn load_device_location<P: PositionProvider>(
        &self,
        resolver: &LocationResolver<P>,
    ) -> Result<LoadOutcome, AppError> {
        self.state.set_selected_location(None);

        let fix = match resolver.refresh().await {
            Ok(fix) => fix,
            Err(err) => match resolver.current_fix() {
                Some(fix) => fix,
                None => return Err(err.into()),
            },
        };

        self.load(fix.coordinates).await.map_err(AppError::from)
    }

    /// The place a save toggle applies to: the selected location when one is
    /// set, otherwise a selection promoted from the published snapshot.
    pub fn active_save_target(&self) -> Option<LocationSelection> {
        if let Some(selection) = self.state.selected_location() {
            return Some(selection);
        }

        let snapshot = self.snapshot.lock();
        let snapshot = snapshot.as_ref()?;
        Some(LocationSelection {
            id: build_location_id(
                snapshot.coords.lat,
                snapshot.coords.lon,
                &snapshot.current.name,
            ),
            name: snapshot.current.name.clone(),
            lat: snapshot.coords.lat,
            lon: snapshot.coords.lon,
            country: snapshot.current.sys.country.clone(),
            state: None,
        })
    }
}
