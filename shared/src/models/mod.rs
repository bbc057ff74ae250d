//! Domain models for the dashboard panels

mod crop_stage;
mod diagnosis;
mod disease_pest;
mod market;
mod panel;
mod satellite;
mod sensor;
mod soil;
mod weather;

pub use crop_stage::*;
pub use diagnosis::*;
pub use disease_pest::*;
pub use market::*;
pub use panel::*;
pub use satellite::*;
pub use sensor::*;
pub use soil::*;
pub use weather::*;
