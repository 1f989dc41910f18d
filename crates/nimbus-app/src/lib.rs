//! Orchestration layer for Nimbus
//!
//! Ties the weather client, the location resolver and the application state
//! together: debounced token-guarded city search and the generation-guarded
//! weather load pipeline.

pub mod pipeline;
pub mod search;

pub use pipeline::{LoadOutcome, WeatherPipeline, WeatherSnapshot};
pub use search::{SearchOrchestrator, SearchView};
