use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use crate::{
    entities::{DistanceMatrix, Geo, Leg, Mode},
    error::{invalid_input_error, not_found_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub place_id: String,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Geo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    pub duration: Option<ValueField>,
    pub distance: Option<ValueField>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ValueField {
    pub value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
    rows: Option<T>,
}

#[tracing::instrument]
pub async fn geocode_address(address: &str) -> Result<Vec<GeocodeResult>, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/geocode/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("address", address.to_string())])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Vec<GeocodeResult>> = res.json().await?;

    if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
        return Err(upstream_error());
    }

    Ok(data.results.unwrap_or_default())
}

#[tracing::instrument]
pub async fn distance_matrix(
    origins: &[String],
    destinations: &[String],
    mode: Mode,
) -> Result<Vec<MatrixRow>, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/distancematrix/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let mut request = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("origins", origins.join("|"))])
        .query(&[("destinations", destinations.join("|"))]);

    if let Some(travel_mode) = provider_mode(mode) {
        request = request.query(&[("mode", travel_mode.to_string())]);
    }

    let res = request.send().await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Vec<MatrixRow>> = res.json().await?;

    if data.status != "OK" {
        return Err(upstream_error());
    }

    data.rows.ok_or_else(|| upstream_error())
}

/// The provider's travel mode parameter; `Fastest` leaves the choice to the
/// provider default.
pub fn provider_mode(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::Fastest => None,
        Mode::PublicTransport => Some("transit"),
        Mode::Car => Some("driving"),
    }
}

/// Pairs one chunk of origins with the destination list. Provider durations
/// arrive in seconds; the rest of the crate speaks minutes.
pub fn interpret_rows(
    origins: &[String],
    destinations: &[String],
    rows: &[MatrixRow],
) -> Result<DistanceMatrix, Error> {
    if rows.len() != origins.len() {
        return Err(upstream_error());
    }

    let mut matrix = DistanceMatrix::new();

    for (origin, row) in origins.iter().zip(rows) {
        if row.elements.len() != destinations.len() {
            return Err(upstream_error());
        }

        let mut legs = HashMap::new();

        for (destination, element) in destinations.iter().zip(&row.elements) {
            if element.status != "OK" {
                return Err(not_found_error(format!(
                    "no route from {} to {}",
                    origin, destination
                )));
            }

            let (duration, distance) = match (element.duration, element.distance) {
                (Some(duration), Some(distance)) => (duration, distance),
                _ => return Err(upstream_error()),
            };

            legs.insert(
                destination.clone(),
                Leg {
                    time: duration.value / 60.0,
                    distance: distance.value,
                },
            );
        }

        matrix.insert(origin.clone(), legs);
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::{interpret_rows, provider_mode, GeocodeResult, MatrixRow, Response};
    use crate::entities::Mode;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<MatrixRow> {
        serde_json::from_value(value).unwrap()
    }

    fn addresses(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn parses_a_geocode_response() {
        let data: Response<Vec<GeocodeResult>> = serde_json::from_value(json!({
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJh7j3rwkDdkgRDyRSDeB-nn0",
                    "geometry": {"location": {"lat": 51.513723, "lng": -0.099858}}
                }
            ]
        }))
        .unwrap();

        assert_eq!(data.status, "OK");

        let results = data.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].place_id, "ChIJh7j3rwkDdkgRDyRSDeB-nn0");
        assert_eq!(results[0].geometry.location.lat, 51.513723);
    }

    #[test]
    fn interprets_rows_into_minute_legs() {
        let origins = addresses(&["A", "B"]);
        let destinations = addresses(&["X"]);
        let rows = rows(json!([
            {"elements": [{"status": "OK", "duration": {"value": 1800}, "distance": {"value": 4200}}]},
            {"elements": [{"status": "OK", "duration": {"value": 600}, "distance": {"value": 1000}}]}
        ]));

        let matrix = interpret_rows(&origins, &destinations, &rows).unwrap();

        assert_eq!(matrix["A"]["X"].time, 30.0);
        assert_eq!(matrix["A"]["X"].distance, 4200.0);
        assert_eq!(matrix["B"]["X"].time, 10.0);
        assert_eq!(matrix["B"]["X"].distance, 1000.0);
    }

    #[test]
    fn rejects_a_row_count_mismatch() {
        let origins = addresses(&["A", "B"]);
        let destinations = addresses(&["X"]);
        let rows = rows(json!([
            {"elements": [{"status": "OK", "duration": {"value": 1800}, "distance": {"value": 4200}}]}
        ]));

        let err = interpret_rows(&origins, &destinations, &rows).unwrap_err();

        assert_eq!(err.code, 3);
    }

    #[test]
    fn rejects_an_element_count_mismatch() {
        let origins = addresses(&["A"]);
        let destinations = addresses(&["X", "Y"]);
        let rows = rows(json!([
            {"elements": [{"status": "OK", "duration": {"value": 1800}, "distance": {"value": 4200}}]}
        ]));

        let err = interpret_rows(&origins, &destinations, &rows).unwrap_err();

        assert_eq!(err.code, 3);
    }

    #[test]
    fn flags_unroutable_pairs() {
        let origins = addresses(&["A"]);
        let destinations = addresses(&["X"]);
        let rows = rows(json!([{"elements": [{"status": "NOT_FOUND"}]}]));

        let err = interpret_rows(&origins, &destinations, &rows).unwrap_err();

        assert_eq!(err.code, 103);
        assert!(err.message.contains("A"));
        assert!(err.message.contains("X"));
    }

    #[test]
    fn maps_modes_to_provider_parameters() {
        assert_eq!(provider_mode(Mode::Fastest), None);
        assert_eq!(provider_mode(Mode::PublicTransport), Some("transit"));
        assert_eq!(provider_mode(Mode::Car), Some("driving"));
    }
}
