//! SoilGrids client
//!
//! Queries the ISRIC SoilGrids v2.0 properties endpoint for the topsoil
//! (0-5 cm) mean of the properties it models. Values come back as integers
//! scaled by the layer's `d_factor`.

use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, SoilReading, ORGANIC_MATTER_FACTOR};

use super::read_json;
use crate::error::{AppError, AppResult};

const PROPERTIES: [&str; 5] = ["phh2o", "soc", "nitrogen", "bdod", "cec"];
const DEPTH: &str = "0-5cm";

#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

/// Topsoil properties in conventional units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilGridsProperties {
    pub ph: Option<f64>,
    /// g/kg
    pub soil_organic_carbon: Option<f64>,
    /// g/kg
    pub total_nitrogen: Option<f64>,
    /// g/cm3
    pub bulk_density: Option<f64>,
    /// cmol/kg
    pub cec: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    properties: PropertiesBlock,
}

#[derive(Debug, Deserialize)]
struct PropertiesBlock {
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct Layer {
    name: String,
    unit_measure: UnitMeasure,
    depths: Vec<Depth>,
}

#[derive(Debug, Deserialize)]
struct UnitMeasure {
    d_factor: f64,
}

#[derive(Debug, Deserialize)]
struct Depth {
    label: String,
    values: DepthValues,
}

#[derive(Debug, Deserialize)]
struct DepthValues {
    mean: Option<f64>,
}

impl SoilGridsClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch topsoil properties at a point
    pub async fn get_properties(&self, location: GpsCoordinates) -> AppResult<SoilGridsProperties> {
        let mut query: Vec<(&str, String)> = vec![
            ("lon", location.longitude.to_string()),
            ("lat", location.latitude.to_string()),
        ];
        query.extend(PROPERTIES.iter().map(|p| ("property", p.to_string())));
        query.push(("depth", DEPTH.to_string()));
        query.push(("value", "mean".to_string()));

        let response = self
            .client
            .get(format!("{}/properties/query", self.base_url))
            .query(&query)
            .send()
            .await?;
        let data: QueryResponse = read_json(response, "SoilGrids").await?;

        let properties = convert_layers(data.properties.layers);
        if properties == SoilGridsProperties::default() {
            // Oceans, cities and water bodies have no modelled soil
            return Err(AppError::ExternalService(
                "SoilGrids returned no values for this location".to_string(),
            ));
        }
        Ok(properties)
    }
}

fn convert_layers(layers: Vec<Layer>) -> SoilGridsProperties {
    let mut properties = SoilGridsProperties::default();
    for layer in layers {
        let factor = if layer.unit_measure.d_factor > 0.0 {
            layer.unit_measure.d_factor
        } else {
            1.0
        };
        let value = layer
            .depths
            .iter()
            .find(|d| d.label == DEPTH)
            .and_then(|d| d.values.mean)
            .map(|v| v / factor);

        match layer.name.as_str() {
            "phh2o" => properties.ph = value,
            "soc" => properties.soil_organic_carbon = value,
            "nitrogen" => properties.total_nitrogen = value,
            "bdod" => properties.bulk_density = value,
            "cec" => properties.cec = value,
            _ => {}
        }
    }
    properties
}

/// Available N estimated from total N, kg/ha for the top 15 cm
const AVAILABLE_N_FACTOR: f64 = 2240.0 * 0.1;

impl SoilGridsProperties {
    /// Replace the modelled properties of a generated reading with measured
    /// ones, keeping the rest
    pub fn overlay(&self, mut reading: SoilReading) -> SoilReading {
        if let Some(ph) = self.ph {
            reading.ph = ph;
        }
        if let Some(soc) = self.soil_organic_carbon {
            // g/kg to percent
            reading.organic_carbon = soc / 10.0;
            reading.organic_matter = reading.organic_carbon * ORGANIC_MATTER_FACTOR;
        }
        if let Some(n) = self.total_nitrogen {
            reading.nitrogen = n * AVAILABLE_N_FACTOR;
        }
        if let Some(bd) = self.bulk_density {
            reading.bulk_density = bd;
        }
        if let Some(cec) = self.cec {
            reading.cation_exchange_capacity = cec;
        }
        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Micronutrients;

    const RESPONSE: &str = r#"{
        "type": "Feature",
        "properties": {
            "layers": [
                {"name": "phh2o", "unit_measure": {"d_factor": 10, "target_units": "-log(H+)"},
                 "depths": [{"label": "0-5cm", "values": {"mean": 72}}]},
                {"name": "soc", "unit_measure": {"d_factor": 10},
                 "depths": [{"label": "0-5cm", "values": {"mean": 85}}]},
                {"name": "nitrogen", "unit_measure": {"d_factor": 100},
                 "depths": [{"label": "0-5cm", "values": {"mean": 125}}]},
                {"name": "bdod", "unit_measure": {"d_factor": 100},
                 "depths": [{"label": "0-5cm", "values": {"mean": 142}}]},
                {"name": "cec", "unit_measure": {"d_factor": 10},
                 "depths": [{"label": "0-5cm", "values": {"mean": null}}]}
            ]
        }
    }"#;

    fn reading() -> SoilReading {
        SoilReading {
            ph: 6.0,
            organic_carbon: 0.4,
            organic_matter: 0.4 * ORGANIC_MATTER_FACTOR,
            nitrogen: 200.0,
            phosphorus: 15.0,
            potassium: 150.0,
            bulk_density: 1.3,
            moisture: 25.0,
            temperature: 22.0,
            cation_exchange_capacity: 12.0,
            electrical_conductivity: 0.3,
            micronutrients: Micronutrients {
                iron: 5.0,
                zinc: 0.7,
                manganese: 3.0,
                copper: 0.3,
                boron: 0.6,
            },
        }
    }

    #[test]
    fn layers_are_scaled_by_d_factor() {
        let data: QueryResponse = serde_json::from_str(RESPONSE).unwrap();
        let props = convert_layers(data.properties.layers);
        assert_eq!(props.ph, Some(7.2));
        assert_eq!(props.soil_organic_carbon, Some(8.5));
        assert_eq!(props.total_nitrogen, Some(1.25));
        assert_eq!(props.bulk_density, Some(1.42));
        assert_eq!(props.cec, None);
    }

    #[test]
    fn overlay_keeps_unmodelled_properties() {
        let props = SoilGridsProperties {
            ph: Some(7.2),
            soil_organic_carbon: Some(8.5),
            ..Default::default()
        };
        let merged = props.overlay(reading());
        assert_eq!(merged.ph, 7.2);
        assert!((merged.organic_carbon - 0.85).abs() < 1e-9);
        assert_eq!(merged.phosphorus, 15.0);
        assert_eq!(merged.cation_exchange_capacity, 12.0);
    }
}
