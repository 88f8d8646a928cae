use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::Geo;

/// Interpreted geocoding result for a single address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geocoded {
    pub geo: Geo,
    pub place_id: String,
}

/// One origin-destination leg: travel time in minutes, distance in meters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub time: f64,
    pub distance: f64,
}

pub type DistanceMatrix = HashMap<String, HashMap<String, Leg>>;
