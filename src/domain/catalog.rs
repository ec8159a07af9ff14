use super::{CropProfile, SoilProfile};
use std::collections::HashSet;

/// Reasons a crop/soil dataset is rejected at load time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no crop profiles")]
    NoCrops,
    #[error("catalog has no soil profiles")]
    NoSoils,
    #[error("profile id must not be empty")]
    EmptyId,
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("crop {id}: water need must be a finite value >= 0, got {value}")]
    InvalidWaterNeed { id: String, value: f64 },
    #[error("soil {id}: retention factor must be a finite value > 0, got {value}")]
    InvalidRetention { id: String, value: f64 },
}

/// Read-only crop and soil lookup tables.
///
/// Lists are small, so lookups are linear scans by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    crops: Vec<CropProfile>,
    soils: Vec<SoilProfile>,
}

impl Catalog {
    /// Build a catalog after checking ids and numeric ranges
    pub fn new(crops: Vec<CropProfile>, soils: Vec<SoilProfile>) -> Result<Self, CatalogError> {
        if crops.is_empty() {
            return Err(CatalogError::NoCrops);
        }
        if soils.is_empty() {
            return Err(CatalogError::NoSoils);
        }

        check_ids("crop", crops.iter().map(|c| c.id.as_str()))?;
        check_ids("soil", soils.iter().map(|s| s.id.as_str()))?;

        for crop in &crops {
            let value = crop.water_needs_per_day;
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidWaterNeed {
                    id: crop.id.clone(),
                    value,
                });
            }
        }

        for soil in &soils {
            let value = soil.retention_factor;
            if !value.is_finite() || value <= 0.0 {
                return Err(CatalogError::InvalidRetention {
                    id: soil.id.clone(),
                    value,
                });
            }
        }

        Ok(Self { crops, soils })
    }

    /// Built-in dataset for Thai field crops and the three soil classes the
    /// soil estimator can answer with (loam, clay, sand).
    pub fn builtin() -> Self {
        Self {
            crops: vec![
                CropProfile::new("rice", "ข้าวนาปี", 8.0, 120),
                CropProfile::new("cassava", "มันสำปะหลัง", 3.0, 300),
                CropProfile::new("sugarcane", "อ้อย", 5.5, 330),
                CropProfile::new("corn", "ข้าวโพดเลี้ยงสัตว์", 4.5, 110),
                CropProfile::new("durian", "ทุเรียน", 4.0, 365),
                CropProfile::new("vegetables", "ผักสวนครัว", 5.0, 45),
            ],
            soils: vec![
                SoilProfile::new(
                    "loam",
                    "ดินร่วน",
                    1.0,
                    "ระบายน้ำและอุ้มน้ำได้สมดุล เหมาะกับพืชส่วนใหญ่",
                ),
                SoilProfile::new(
                    "clay",
                    "ดินเหนียว",
                    0.8,
                    "อุ้มน้ำได้ดี ระบายน้ำช้า ควรระวังน้ำขัง",
                ),
                SoilProfile::new(
                    "sand",
                    "ดินทราย",
                    1.4,
                    "ระบายน้ำเร็ว อุ้มน้ำได้น้อย ต้องให้น้ำบ่อยขึ้น",
                ),
            ],
        }
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn soils(&self) -> &[SoilProfile] {
        &self.soils
    }

    pub fn crop(&self, id: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn soil(&self, id: &str) -> Option<&SoilProfile> {
        self.soils.iter().find(|s| s.id == id)
    }

    /// Selection used when nothing else is configured
    pub fn default_crop(&self) -> &CropProfile {
        &self.crops[0]
    }

    pub fn default_soil(&self) -> &SoilProfile {
        &self.soils[0]
    }
}

fn check_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.crops().to_vec(), builtin.soils().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn test_builtin_soils_match_estimator_ids() {
        let catalog = Catalog::builtin();
        for id in ["loam", "clay", "sand"] {
            assert!(catalog.soil(id).is_some(), "missing soil {id}");
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.crop("rice").unwrap().growth_period, 120);
        assert_eq!(catalog.soil("sand").unwrap().retention_factor, 1.4);
        assert!(catalog.crop("wheat").is_none());
        assert!(catalog.soil("peat").is_none());
    }

    #[test]
    fn test_defaults_are_first_entries() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.default_crop().id, "rice");
        assert_eq!(catalog.default_soil().id, "loam");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let crops = vec![
            CropProfile::new("rice", "a", 1.0, 10),
            CropProfile::new("rice", "b", 2.0, 10),
        ];
        let soils = Catalog::builtin().soils().to_vec();
        assert_eq!(
            Catalog::new(crops, soils),
            Err(CatalogError::DuplicateId {
                kind: "crop",
                id: "rice".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let crops = Catalog::builtin().crops().to_vec();
        let soils = vec![SoilProfile::new("mud", "mud", 0.0, "")];
        assert!(matches!(
            Catalog::new(crops, soils),
            Err(CatalogError::InvalidRetention { .. })
        ));

        let crops = vec![CropProfile::new("weed", "weed", -1.0, 10)];
        let soils = Catalog::builtin().soils().to_vec();
        assert!(matches!(
            Catalog::new(crops, soils),
            Err(CatalogError::InvalidWaterNeed { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_lists() {
        let soils = Catalog::builtin().soils().to_vec();
        assert_eq!(Catalog::new(vec![], soils), Err(CatalogError::NoCrops));
    }
}
