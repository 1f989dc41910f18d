//! Debounced city autocomplete with stale-response suppression.
//!
//! Free-text queries are debounced behind a single pending-timer slot. Every
//! executed lookup draws a fresh token from a monotonic counter and its
//! completion is applied only while that token is still the newest, so an
//! out-of-order network completion can never overwrite a newer query's
//! results. Discarded completions are silent, not errors.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use nimbus_core::{build_location_id, AppState, LocationSelection, SearchConfig, SearchError};
use nimbus_weather::{GeocodeResult, WeatherClient};

const NO_RESULTS_MESSAGE: &str = "No cities found. Try a different search.";

/// Search state visible to the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub suggestions: Vec<GeocodeResult>,
    pub searching: bool,
    /// User-facing message: a lookup failure, or the explicit-submit
    /// no-results notice
    pub message: Option<String>,
}

pub struct SearchOrchestrator {
    client: Arc<WeatherClient>,
    config: SearchConfig,
    /// Token of the most recently issued lookup
    token: AtomicU64,
    /// Single pending debounce task slot
    pending: Mutex<Option<JoinHandle<()>>>,
    /// One-shot latch: skip exactly the next text-change event
    suppress_next: AtomicBool,
    view: Mutex<SearchView>,
}

impl SearchOrchestrator {
    pub fn new(client: Arc<WeatherClient>, config: SearchConfig) -> Self {
        Self {
            client,
            config,
            token: AtomicU64::new(0),
            pending: Mutex::new(None),
            suppress_next: AtomicBool::new(false),
            view: Mutex::new(SearchView::default()),
        }
    }

    /// Snapshot of the current search state.
    pub fn view(&self) -> SearchView {
        self.view.lock().clone()
    }

    /// Handle a text-change event: cancel any pending lookup and, for a long
    /// enough query, schedule a new one after the quiet period.
    pub fn on_query_changed(self: &Arc<Self>, text: &str) {
        self.cancel_pending();

        if self.suppress_next.swap(false, Ordering::SeqCst) {
            return;
        }

        let query = text.trim().to_string();
        if query.chars().count() < self.config.min_query_chars {
            let mut view = self.view.lock();
            view.suggestions.clear();
            view.searching = false;
            return;
        }

        let debounce = Duration::from_millis(self.config.debounce_ms);
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            this.lookup(&query, false).await;
        });
        *self.pending.lock() = Some(handle);
    }

    /// Handle explicit submission: look up immediately, reporting an empty
    /// result set to the user.
    pub async fn on_submit(&self, text: &str) {
        self.cancel_pending();
        self.lookup(text.trim(), true).await;
    }

    /// The user picked a suggestion: record the selection, arm the
    /// suppression latch for the rewrite of the input field, and return the
    /// display text the field should show.
    pub fn select_suggestion(&self, item: &GeocodeResult, state: &AppState) -> String {
        let selection = LocationSelection {
            id: build_location_id(item.lat, item.lon, &item.name),
            name: item.name.clone(),
            lat: item.lat,
            lon: item.lon,
            country: item.country.clone(),
            state: item.state.clone(),
        };
        state.set_selected_location(Some(selection));

        self.suppress_next.store(true, Ordering::SeqCst);
        self.view.lock().suggestions.clear();
        item.display_name()
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    async fn lookup(&self, query: &str, explicit: bool) {
        if query.chars().count() < self.config.min_query_chars {
            let mut view = self.view.lock();
            view.suggestions.clear();
            view.searching = false;
            return;
        }

        let my_token = self.token.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut view = self.view.lock();
            view.searching = true;
            view.message = None;
        }

        let result = self
            .client
            .fetch_city_suggestions(query, self.config.suggestion_limit)
            .await;

        // A newer lookup was issued while we were in flight; its completion
        // owns the view now.
        if my_token != self.token.load(Ordering::SeqCst) {
            tracing::debug!("Discarding stale suggestions for {:?}", query);
            return;
        }

        let mut view = self.view.lock();
        view.searching = false;
        match result {
            Ok(results) if results.is_empty() => {
                view.suggestions.clear();
                if explicit {
                    view.message = Some(NO_RESULTS_MESSAGE.to_string());
                }
            }
            Ok(results) => {
                view.suggestions = results;
            }
            Err(err) => {
                view.suggestions.clear();
                view.message = Some(SearchError::from(err).user_message());
            }
        }
    }
}
