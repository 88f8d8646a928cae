use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DistanceMatrixAPI,
    chunker::Chunker,
    entities::{DistanceMatrix, Mode},
    error::{batch_limit_error, validation_error, Error},
    external::google_maps,
};

#[async_trait]
impl DistanceMatrixAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn distance_matrix(
        &self,
        origins: &[String],
        destinations: &[String],
        mode: Mode,
    ) -> Result<DistanceMatrix, Error> {
        if destinations.is_empty() {
            return Err(validation_error("at least one destination is required"));
        }

        if destinations.len() > self.max_destinations {
            return Err(batch_limit_error(format!(
                "can't calculate to more than {} destinations at a time, got {}",
                self.max_destinations,
                destinations.len()
            )));
        }

        let batch = origin_batch_size(destinations.len(), self.max_destinations);
        let chunker = Chunker::new(origins);
        let mut result = DistanceMatrix::new();

        for chunk in chunker.chunks(batch)? {
            let rows = google_maps::distance_matrix(chunk, destinations, mode).await?;
            result.extend(google_maps::interpret_rows(chunk, destinations, &rows)?);
        }

        Ok(result)
    }
}

// The provider caps a single request at 100 elements, so fewer destinations
// allow proportionally larger origin batches.
fn origin_batch_size(destinations: usize, cap: usize) -> usize {
    if destinations < 4 {
        100 / destinations
    } else {
        cap
    }
}
