use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{DistanceMatrix, Geocoded, Mode};
use crate::error::Error;

#[async_trait]
pub trait GeocodeAPI {
    async fn geocode(&self, addresses: &[String]) -> Result<HashMap<String, Geocoded>, Error>;
}

#[async_trait]
pub trait DistanceMatrixAPI {
    async fn distance_matrix(
        &self,
        origins: &[String],
        destinations: &[String],
        mode: Mode,
    ) -> Result<DistanceMatrix, Error>;
}

pub trait API: GeocodeAPI + DistanceMatrixAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
