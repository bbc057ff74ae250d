//! Parse errors for the shared enums

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    #[error("Unknown soil parameter: {0}")]
    UnknownSoilParameter(String),
}
