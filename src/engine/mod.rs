mod distance_api;
mod geocode_api;

use std::time::Duration;

use crate::api::API;

/// Convenience client over the provider's geocoding and distance-matrix
/// endpoints, batching requests to stay within its limits.
pub struct Engine {
    geocode_batch: usize,
    max_destinations: usize,
    pause: Duration,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new")]
    pub fn new() -> Self {
        dotenv::dotenv().ok();

        Self {
            // The provider allows 50 geocoding queries per second.
            geocode_batch: 50,
            max_destinations: 25,
            pause: Duration::from_secs(1),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl API for Engine {}
