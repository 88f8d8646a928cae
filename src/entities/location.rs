use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Geo, Mode};
use crate::error::{validation_error, Error};

/// A place with at least one of a postcode or an address. The token doubles
/// as the location's identity once it is added to an atlas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub token: Uuid,
    pub postcode: Option<String>,
    pub address: Option<String>,
    pub geo: Option<Geo>,
    pub mode: Mode,
}

impl Location {
    pub fn new(
        postcode: Option<String>,
        address: Option<String>,
        geo: Option<Geo>,
    ) -> Result<Self, Error> {
        let postcode = postcode.filter(|postcode| !postcode.is_empty());
        let address = address.filter(|address| !address.is_empty());

        if postcode.is_none() && address.is_none() {
            return Err(validation_error(
                "either a postcode or an address should be provided",
            ));
        }

        Ok(Self {
            token: Uuid::new_v4(),
            postcode,
            address,
            geo,
            mode: Mode::default(),
        })
    }

    pub fn lat(&self) -> Option<f64> {
        self.geo.map(|geo| geo.lat)
    }

    pub fn lng(&self) -> Option<f64> {
        self.geo.map(|geo| geo.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;
    use crate::entities::Geo;

    #[test]
    fn requires_a_postcode_or_an_address() {
        let err = Location::new(None, None, None).unwrap_err();
        assert_eq!(err.code, 100);

        let err = Location::new(Some("".into()), Some("".into()), None).unwrap_err();
        assert_eq!(err.code, 100);

        assert!(Location::new(Some("EC4M 8AD".into()), None, None).is_ok());
        assert!(Location::new(None, Some("St. Paul's Churchyard, London".into()), None).is_ok());
    }

    #[test]
    fn exposes_coordinates_when_geocoded() {
        let location = Location::new(
            Some("EC4M 8AD".into()),
            None,
            Some(Geo::new(51.513723, -0.099858)),
        )
        .unwrap();

        assert_eq!(location.lat(), Some(51.513723));
        assert_eq!(location.lng(), Some(-0.099858));

        let location = Location::new(Some("EC4M 8AD".into()), None, None).unwrap();

        assert_eq!(location.lat(), None);
    }

    #[test]
    fn tokens_are_distinct_for_identical_places() {
        let first = Location::new(Some("EC4M 8AD".into()), None, None).unwrap();
        let second = Location::new(Some("EC4M 8AD".into()), None, None).unwrap();

        assert_ne!(first.token, second.token);
    }
}
