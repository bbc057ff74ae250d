//! Envelope shared by every panel response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::season::Season;
use crate::types::DataSource;

/// Panel payload tagged with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub generated_at: DateTime<Utc>,
    pub season: Season,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn new(source: DataSource, season: Season, data: T) -> Self {
        Self {
            source,
            generated_at: Utc::now(),
            season,
            data,
        }
    }

    pub fn demo(season: Season, data: T) -> Self {
        Self::new(DataSource::Demo, season, data)
    }
}
