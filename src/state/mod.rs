//! Editing-session state
//!
//! [`FarmState`] is never mutated in place: [`FarmState::apply`] takes the
//! current state and an event and returns the next state, with the derived
//! area already recomputed.

use crate::api::{AdviceRequest, SoilEstimate};
use crate::demand::daily_water_volume_or_default;
use crate::domain::{Catalog, Coordinate};
use crate::geometry::compute_area;
use crate::units::{format_as_thai_units, to_rai};

/// Names sent to the advisor when a selection does not resolve
const FALLBACK_CROP_NAME: &str = "พืช";
const FALLBACK_SOIL_NAME: &str = "ดิน";

#[derive(Debug, Clone, PartialEq)]
pub enum FarmEvent {
    /// A map click or location fix appended a boundary point
    PointAdded(Coordinate),
    PointsCleared,
    CropSelected(String),
    SoilSelected(String),
    /// The soil estimator answered; ignored unless the id is in the catalog
    SoilEstimated(SoilEstimate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmState {
    points: Vec<Coordinate>,
    area_sqm: f64,
    selected_crop: String,
    selected_soil: String,
}

impl FarmState {
    pub fn new(crop: impl Into<String>, soil: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            area_sqm: 0.0,
            selected_crop: crop.into(),
            selected_soil: soil.into(),
        }
    }

    /// Empty boundary with the catalog's first crop and soil selected
    pub fn with_defaults(catalog: &Catalog) -> Self {
        Self::new(
            catalog.default_crop().id.clone(),
            catalog.default_soil().id.clone(),
        )
    }

    pub fn apply(&self, event: FarmEvent, catalog: &Catalog) -> Self {
        match event {
            FarmEvent::PointAdded(point) => {
                let mut points = self.points.clone();
                points.push(point);
                let area_sqm = compute_area(&points);
                log::debug!(
                    "Point {} added at {}, area now {:.1} m²",
                    points.len(),
                    point,
                    area_sqm
                );
                Self {
                    points,
                    area_sqm,
                    ..self.clone()
                }
            }
            FarmEvent::PointsCleared => {
                log::debug!("Boundary cleared");
                Self {
                    points: Vec::new(),
                    area_sqm: 0.0,
                    ..self.clone()
                }
            }
            FarmEvent::CropSelected(id) => {
                if catalog.crop(&id).is_none() {
                    log::warn!("Unknown crop {:?}; water estimate will be 0", id);
                }
                Self {
                    selected_crop: id,
                    ..self.clone()
                }
            }
            FarmEvent::SoilSelected(id) => {
                if catalog.soil(&id).is_none() {
                    log::warn!("Unknown soil {:?}; using neutral retention", id);
                }
                Self {
                    selected_soil: id,
                    ..self.clone()
                }
            }
            FarmEvent::SoilEstimated(estimate) => {
                if catalog.soil(&estimate.soil_id).is_none() {
                    log::warn!(
                        "Ignoring soil estimate with unknown id {:?}",
                        estimate.soil_id
                    );
                    return self.clone();
                }
                log::info!("Soil estimated as {}: {}", estimate.soil_id, estimate.reason);
                Self {
                    selected_soil: estimate.soil_id,
                    ..self.clone()
                }
            }
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn area_sqm(&self) -> f64 {
        self.area_sqm
    }

    pub fn selected_crop(&self) -> &str {
        &self.selected_crop
    }

    pub fn selected_soil(&self) -> &str {
        &self.selected_soil
    }

    /// Current daily water estimate in litres
    pub fn daily_water_liters(&self, catalog: &Catalog) -> f64 {
        daily_water_volume_or_default(
            self.area_sqm,
            catalog.crop(&self.selected_crop),
            catalog.soil(&self.selected_soil),
        )
    }

    /// All derived values for display
    pub fn summary(&self, catalog: &Catalog) -> FarmSummary {
        let crop = catalog.crop(&self.selected_crop);
        let soil = catalog.soil(&self.selected_soil);

        FarmSummary {
            point_count: self.points.len(),
            area_sqm: self.area_sqm,
            thai_area: format_as_thai_units(self.area_sqm),
            area_rai: to_rai(self.area_sqm),
            daily_water_liters: self.daily_water_liters(catalog),
            crop_name: crop.map(|c| c.name.clone()),
            soil_name: soil.map(|s| s.name.clone()),
            soil_description: soil.map(|s| s.description.clone()),
        }
    }

    /// Advisory request for the current field, or `None` while there is no
    /// enclosed area yet. A NaN area (non-finite points) also counts as none.
    pub fn advice_request(&self, catalog: &Catalog) -> Option<AdviceRequest> {
        if !self.area_sqm.is_finite() || self.area_sqm <= 0.0 {
            return None;
        }

        let crop_name = catalog
            .crop(&self.selected_crop)
            .map_or(FALLBACK_CROP_NAME, |c| c.name.as_str());
        let soil_name = catalog
            .soil(&self.selected_soil)
            .map_or(FALLBACK_SOIL_NAME, |s| s.name.as_str());

        Some(AdviceRequest {
            area_sqm: self.area_sqm,
            area_rai: to_rai(self.area_sqm),
            crop_name: crop_name.to_string(),
            soil_name: soil_name.to_string(),
        })
    }

    /// Location sent to the soil estimator: the first boundary point
    pub fn soil_probe(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }
}

/// Read-only values recomputed from a [`FarmState`]
#[derive(Debug, Clone, PartialEq)]
pub struct FarmSummary {
    pub point_count: usize,
    pub area_sqm: f64,
    pub thai_area: String,
    pub area_rai: String,
    pub daily_water_liters: f64,
    pub crop_name: Option<String>,
    pub soil_name: Option<String>,
    pub soil_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Coordinate; 4] {
        [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.001),
            Coordinate::new(0.001, 0.001),
            Coordinate::new(0.001, 0.0),
        ]
    }

    fn traced(catalog: &Catalog) -> FarmState {
        square()
            .into_iter()
            .fold(FarmState::with_defaults(catalog), |s, p| {
                s.apply(FarmEvent::PointAdded(p), catalog)
            })
    }

    #[test]
    fn test_area_tracks_points() {
        let catalog = Catalog::builtin();
        let mut state = FarmState::with_defaults(&catalog);
        let pts = square();

        for (i, p) in pts.iter().enumerate() {
            state = state.apply(FarmEvent::PointAdded(*p), &catalog);
            assert_eq!(state.points().len(), i + 1);
            assert_eq!(state.area_sqm(), compute_area(&pts[..=i]));
        }
        assert!(state.area_sqm() > 12_000.0);
    }

    #[test]
    fn test_apply_leaves_previous_state_untouched() {
        let catalog = Catalog::builtin();
        let before = FarmState::with_defaults(&catalog);
        let after = before.apply(FarmEvent::PointAdded(Coordinate::new(1.0, 2.0)), &catalog);
        assert!(before.points().is_empty());
        assert_eq!(after.points().len(), 1);
    }

    #[test]
    fn test_clear_keeps_selection() {
        let catalog = Catalog::builtin();
        let state = traced(&catalog)
            .apply(FarmEvent::CropSelected("durian".to_string()), &catalog)
            .apply(FarmEvent::PointsCleared, &catalog);
        assert!(state.points().is_empty());
        assert_eq!(state.area_sqm(), 0.0);
        assert_eq!(state.selected_crop(), "durian");
    }

    #[test]
    fn test_soil_estimate_applied_when_known() {
        let catalog = Catalog::builtin();
        let state = traced(&catalog).apply(
            FarmEvent::SoilEstimated(SoilEstimate {
                soil_id: "clay".to_string(),
                reason: "ที่ราบลุ่มภาคกลาง".to_string(),
            }),
            &catalog,
        );
        assert_eq!(state.selected_soil(), "clay");
    }

    #[test]
    fn test_unknown_soil_estimate_ignored() {
        let catalog = Catalog::builtin();
        let before = traced(&catalog);
        let after = before.apply(
            FarmEvent::SoilEstimated(SoilEstimate {
                soil_id: "volcanic".to_string(),
                reason: String::new(),
            }),
            &catalog,
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_summary_values() {
        let catalog = Catalog::builtin();
        let state = traced(&catalog)
            .apply(FarmEvent::CropSelected("vegetables".to_string()), &catalog)
            .apply(FarmEvent::SoilSelected("sand".to_string()), &catalog);
        let summary = state.summary(&catalog);

        assert_eq!(summary.point_count, 4);
        assert_eq!(summary.thai_area, format_as_thai_units(state.area_sqm()));
        assert_eq!(summary.area_rai, to_rai(state.area_sqm()));
        let expected = state.area_sqm() * 5.0 * 1.4;
        assert!((summary.daily_water_liters - expected).abs() < 1e-6);
        assert_eq!(summary.crop_name.as_deref(), Some("ผักสวนครัว"));
        assert_eq!(summary.soil_name.as_deref(), Some("ดินทราย"));
    }

    #[test]
    fn test_unknown_crop_gives_zero_water() {
        let catalog = Catalog::builtin();
        let state = traced(&catalog).apply(FarmEvent::CropSelected("hemp".to_string()), &catalog);
        let summary = state.summary(&catalog);
        assert_eq!(summary.daily_water_liters, 0.0);
        assert!(summary.crop_name.is_none());
    }

    #[test]
    fn test_empty_state_summary() {
        let catalog = Catalog::builtin();
        let summary = FarmState::with_defaults(&catalog).summary(&catalog);
        assert_eq!(summary.thai_area, "0 ไร่ 0 งาน 0.00 ตร.ว.");
        assert_eq!(summary.daily_water_liters, 0.0);
    }

    #[test]
    fn test_advice_request_needs_area() {
        let catalog = Catalog::builtin();
        assert!(
            FarmState::with_defaults(&catalog)
                .advice_request(&catalog)
                .is_none()
        );

        let request = traced(&catalog).advice_request(&catalog).unwrap();
        assert_eq!(request.crop_name, "ข้าวนาปี");
        assert_eq!(request.soil_name, "ดินร่วน");
        assert_eq!(request.area_rai, to_rai(request.area_sqm));
    }

    #[test]
    fn test_advice_request_fallback_names() {
        let catalog = Catalog::builtin();
        let request = traced(&catalog)
            .apply(FarmEvent::CropSelected("x".to_string()), &catalog)
            .apply(FarmEvent::SoilSelected("y".to_string()), &catalog)
            .advice_request(&catalog)
            .unwrap();
        assert_eq!(request.crop_name, "พืช");
        assert_eq!(request.soil_name, "ดิน");
    }

    #[test]
    fn test_advice_request_skipped_for_nan_area() {
        let catalog = Catalog::builtin();
        let state = [
            Coordinate::new(f64::NAN, 0.0),
            Coordinate::new(0.0, 0.001),
            Coordinate::new(0.001, 0.001),
        ]
        .into_iter()
        .fold(FarmState::with_defaults(&catalog), |s, p| {
            s.apply(FarmEvent::PointAdded(p), &catalog)
        });

        assert!(state.area_sqm().is_nan());
        assert!(state.advice_request(&catalog).is_none());
    }

    #[test]
    fn test_advice_request_skipped_for_infinite_area() {
        let catalog = Catalog::builtin();
        let state = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, f64::INFINITY),
            Coordinate::new(0.001, 0.001),
        ]
        .into_iter()
        .fold(FarmState::with_defaults(&catalog), |s, p| {
            s.apply(FarmEvent::PointAdded(p), &catalog)
        });

        assert!(!state.area_sqm().is_finite());
        assert!(state.advice_request(&catalog).is_none());
    }

    #[test]
    fn test_soil_probe_is_first_point() {
        let catalog = Catalog::builtin();
        assert!(FarmState::with_defaults(&catalog).soil_probe().is_none());
        assert_eq!(traced(&catalog).soil_probe(), Some(square()[0]));
    }
}
