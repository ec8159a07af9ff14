//! Daily irrigation water demand
//!
//! volume (L/day) = area (m²) × crop water need (L/m²/day) × soil retention factor

use crate::domain::{CropProfile, SoilProfile};

/// Water need used when the crop selection does not resolve
pub const NEUTRAL_WATER_NEED: f64 = 0.0;
/// Retention factor used when the soil selection does not resolve
pub const NEUTRAL_RETENTION_FACTOR: f64 = 1.0;

/// Litres of water the field needs per day
pub fn daily_water_volume(area_sqm: f64, crop: &CropProfile, soil: &SoilProfile) -> f64 {
    volume(area_sqm, crop.water_needs_per_day, soil.retention_factor)
}

/// Same as [`daily_water_volume`], but a missing profile falls back to the
/// neutral values. A missing crop therefore yields 0 litres, which the
/// presentation layer reads as "selection incomplete".
pub fn daily_water_volume_or_default(
    area_sqm: f64,
    crop: Option<&CropProfile>,
    soil: Option<&SoilProfile>,
) -> f64 {
    let water_need = crop.map_or(NEUTRAL_WATER_NEED, |c| c.water_needs_per_day);
    let retention = soil.map_or(NEUTRAL_RETENTION_FACTOR, |s| s.retention_factor);
    volume(area_sqm, water_need, retention)
}

fn volume(area_sqm: f64, water_need: f64, retention: f64) -> f64 {
    area_sqm * water_need * retention
}
