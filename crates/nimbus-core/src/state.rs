//! Process-wide application state.
//!
//! The store is an explicit context object (`AppState`) constructed once and
//! injected into the pipeline and presentation layers. All state lives in
//! memory and is not persisted across restarts. Mutations replace whole
//! objects; there are no partial updates.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Unit system preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// Wire value expected by the weather API's `units` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    /// Temperature label for display ("C" / "F")
    pub fn temperature_label(&self) -> &'static str {
        match self {
            Unit::Metric => "C",
            Unit::Imperial => "F",
        }
    }

    /// Wind speed label for display ("m/s" / "mph")
    pub fn wind_label(&self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

/// A user-visible place, either chosen from search results or promoted from
/// the active resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSelection {
    /// Deterministic identity key, see [`build_location_id`]
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl LocationSelection {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Derive the identity key for a place from its name and rounded coordinates.
///
/// Two places with the same name and coordinates rounded to four decimals
/// collide on purpose; that is the dedup behavior for the saved list.
pub fn build_location_id(lat: f64, lon: f64, name: &str) -> String {
    format!("{}-{:.4}-{:.4}", name.to_lowercase(), lat, lon)
}

#[derive(Debug, Default)]
struct StateInner {
    unit: Unit,
    selected_location: Option<LocationSelection>,
    saved_locations: Vec<LocationSelection>,
}

/// In-memory application state shared between the pipeline and the UI.
///
/// Wrap in an `Arc` to share; all methods take `&self` and lock internally.
#[derive(Debug, Default)]
pub struct AppState {
    inner: RwLock<StateInner>,
}

impl AppState {
    /// Create an empty store with the default unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an explicit startup unit.
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            inner: RwLock::new(StateInner {
                unit,
                ..StateInner::default()
            }),
        }
    }

    pub fn unit(&self) -> Unit {
        self.inner.read().unit
    }

    pub fn set_unit(&self, unit: Unit) {
        self.inner.write().unit = unit;
    }

    pub fn selected_location(&self) -> Option<LocationSelection> {
        self.inner.read().selected_location.clone()
    }

    pub fn set_selected_location(&self, location: Option<LocationSelection>) {
        self.inner.write().selected_location = location;
    }

    /// Saved locations, newest first.
    pub fn saved_locations(&self) -> Vec<LocationSelection> {
        self.inner.read().saved_locations.clone()
    }

    /// Find a saved location by id.
    pub fn saved_location(&self, id: &str) -> Option<LocationSelection> {
        self.inner
            .read()
            .saved_locations
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Remove the location when its id is already saved, otherwise prepend it.
    pub fn toggle_saved(&self, location: LocationSelection) {
        let mut inner = self.inner.write();
        let exists = inner
            .saved_locations
            .iter()
            .any(|item| item.id == location.id);
        if exists {
            inner.saved_locations.retain(|item| item.id != location.id);
        } else {
            inner.saved_locations.insert(0, location);
        }
    }

    pub fn remove_saved(&self, id: &str) {
        self.inner.write().saved_locations.retain(|item| item.id != id);
    }

    pub fn clear_saved(&self) {
        self.inner.write().saved_locations.clear();
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.inner
            .read()
            .saved_locations
            .iter()
            .any(|item| item.id == id)
    }
}
