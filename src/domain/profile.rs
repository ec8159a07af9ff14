use serde::{Deserialize, Serialize};

/// Crop reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: String,
    pub name: String,
    /// Litres per square meter per day
    pub water_needs_per_day: f64,
    /// Days from planting to harvest
    pub growth_period: u32,
}

impl CropProfile {
    pub fn new(id: &str, name: &str, water_needs_per_day: f64, growth_period: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            water_needs_per_day,
            growth_period,
        }
    }
}

/// Soil reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub id: String,
    pub name: String,
    /// Multiplier applied to the crop's water need
    pub retention_factor: f64,
    pub description: String,
}

impl SoilProfile {
    pub fn new(id: &str, name: &str, retention_factor: f64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            retention_factor,
            description: description.to_string(),
        }
    }
}
