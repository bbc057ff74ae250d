//! NASA Earthdata CMR client
//!
//! Lists recent granules of a vegetation index collection that intersect a
//! field. Index values themselves stay simulated; only the asset listing is
//! live.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, SatelliteAsset};

use super::read_json;
use crate::error::AppResult;

const PAGE_SIZE: &str = "5";

#[derive(Clone)]
pub struct EarthdataClient {
    client: Client,
    base_url: String,
    token: String,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct GranuleResponse {
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default)]
    entry: Vec<Granule>,
}

#[derive(Debug, Deserialize)]
struct Granule {
    id: String,
    title: String,
    time_start: Option<String>,
    time_end: Option<String>,
}

fn parse_time(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
        .map(|t| t.with_timezone(&Utc))
}

impl From<Granule> for SatelliteAsset {
    fn from(granule: Granule) -> Self {
        SatelliteAsset {
            id: granule.id,
            title: granule.title,
            time_start: parse_time(granule.time_start),
            time_end: parse_time(granule.time_end),
        }
    }
}

impl EarthdataClient {
    pub fn new(client: Client, base_url: String, token: String, collection: String) -> Self {
        Self {
            client,
            base_url,
            token,
            collection,
        }
    }

    /// Most recent granules covering a point
    pub async fn recent_granules(&self, location: GpsCoordinates) -> AppResult<Vec<SatelliteAsset>> {
        let point = format!("{},{}", location.longitude, location.latitude);
        let response = self
            .client
            .get(format!("{}/granules.json", self.base_url))
            .bearer_auth(&self.token)
            .query(&[
                ("short_name", self.collection.as_str()),
                ("point", point.as_str()),
                ("sort_key", "-start_date"),
                ("page_size", PAGE_SIZE),
            ])
            .send()
            .await?;

        let body: GranuleResponse = read_json(response, "NASA Earthdata").await?;
        Ok(body.feed.entry.into_iter().map(SatelliteAsset::from).collect())
    }
}
