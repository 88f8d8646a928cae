use super::Engine;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::{
    api::GeocodeAPI,
    chunker::Chunker,
    entities::Geocoded,
    error::{not_found_error, Error},
    external::google_maps::{self, GeocodeResult},
};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, addresses: &[String]) -> Result<HashMap<String, Geocoded>, Error> {
        let chunker = Chunker::new(addresses);
        let mut result = HashMap::new();

        for chunk in chunker.chunks(self.geocode_batch)? {
            for address in chunk {
                let matches = google_maps::geocode_address(address).await?;
                result.insert(address.clone(), first_match(address, matches)?);
            }

            // Stay under the provider's per-second quota between batches.
            tokio::time::sleep(self.pause).await;
        }

        Ok(result)
    }
}

fn first_match(address: &str, matches: Vec<GeocodeResult>) -> Result<Geocoded, Error> {
    let first = matches
        .into_iter()
        .next()
        .ok_or_else(|| not_found_error(format!("{} not found", address)))?;

    Ok(Geocoded {
        geo: first.geometry.location,
        place_id: first.place_id,
    })
}
