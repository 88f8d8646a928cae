use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{validation_error, Error};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "fastest")]
    Fastest,
    #[serde(rename = "public transport")]
    PublicTransport,
    #[serde(rename = "car")]
    Car,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Fastest, Mode::PublicTransport, Mode::Car];
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Fastest
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Fastest => write!(f, "fastest"),
            Mode::PublicTransport => write!(f, "public transport"),
            Mode::Car => write!(f, "car"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "fastest" => Ok(Mode::Fastest),
            "public transport" => Ok(Mode::PublicTransport),
            "car" => Ok(Mode::Car),
            other => Err(validation_error(format!(
                "mode should be either: fastest, public transport or car, not {}",
                other
            ))),
        }
    }
}
