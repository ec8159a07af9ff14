use agriflow::api::{Advice, AdviceRequest, Advisor, SoilEstimate, render_advice};
use agriflow::domain::{Catalog, Coordinate, SoilProfile, parse_boundary};
use agriflow::geometry::compute_area;
use agriflow::state::{FarmEvent, FarmState};
use agriflow::units::format_liters;
use std::cell::RefCell;

/// Canned advisor that records what it was asked
struct StubAdvisor {
    soil: Option<&'static str>,
    fail_advice: bool,
    requests: RefCell<Vec<AdviceRequest>>,
}

impl StubAdvisor {
    fn new(soil: Option<&'static str>, fail_advice: bool) -> Self {
        Self {
            soil,
            fail_advice,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Advisor for StubAdvisor {
    fn advise(&self, request: &AdviceRequest) -> Option<Advice> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail_advice {
            return None;
        }
        Some(Advice {
            daily_water_needs: format!("{} ไร่", request.area_rai),
            best_timing: "06:00-08:00".to_string(),
            precautions: vec!["ระวังน้ำขัง".to_string()],
            automation_tips: "ใช้เซนเซอร์ความชื้นดิน".to_string(),
        })
    }

    fn estimate_soil(&self, _at: Coordinate, _soils: &[SoilProfile]) -> Option<SoilEstimate> {
        self.soil.map(|id| SoilEstimate {
            soil_id: id.to_string(),
            reason: "stub".to_string(),
        })
    }
}

const FIELD: &str = "\
# Nonthaburi test plot
13.8600,100.5000
13.8600,100.5010
13.8609,100.5010
13.8609,100.5000
";

fn traced_state(catalog: &Catalog) -> FarmState {
    parse_boundary(FIELD)
        .unwrap()
        .into_iter()
        .fold(FarmState::with_defaults(catalog), |state, p| {
            state.apply(FarmEvent::PointAdded(p), catalog)
        })
}

#[test]
fn test_full_session() {
    let catalog = Catalog::builtin();
    let advisor = StubAdvisor::new(Some("sand"), false);

    let state = traced_state(&catalog)
        .apply(FarmEvent::CropSelected("corn".to_string()), &catalog);

    let probe = state.soil_probe().unwrap();
    let estimate = advisor.estimate_soil(probe, catalog.soils()).unwrap();
    let state = state.apply(FarmEvent::SoilEstimated(estimate), &catalog);
    assert_eq!(state.selected_soil(), "sand");

    let summary = state.summary(&catalog);
    assert_eq!(summary.point_count, 4);
    assert_eq!(summary.area_sqm, compute_area(state.points()));
    // ~108 m x ~100 m
    assert!(summary.area_sqm > 9_000.0 && summary.area_sqm < 12_000.0);
    let expected = summary.area_sqm * 4.5 * 1.4;
    assert!((summary.daily_water_liters - expected).abs() < 1e-6);
    assert_eq!(format_liters(summary.daily_water_liters), format_liters(expected));

    let request = state.advice_request(&catalog).unwrap();
    let advice = advisor.advise(&request);
    assert!(advice.is_some());
    assert_eq!(advisor.requests.borrow()[0].soil_name, "ดินทราย");
    assert!(render_advice(advice.as_ref()).contains("06:00-08:00"));
}

#[test]
fn test_advisor_failure_renders_no_advice() {
    let catalog = Catalog::builtin();
    let advisor = StubAdvisor::new(None, true);
    let state = traced_state(&catalog);

    let request = state.advice_request(&catalog).unwrap();
    let advice = advisor.advise(&request);
    assert!(advice.is_none());
    assert!(render_advice(advice.as_ref()).contains("no advice available"));

    // A failed soil estimate leaves the selection alone
    assert!(advisor.estimate_soil(Coordinate::new(13.86, 100.5), catalog.soils()).is_none());
    assert_eq!(state.selected_soil(), "loam");
}

#[test]
fn test_clearing_drops_area_and_water() {
    let catalog = Catalog::builtin();
    let state = traced_state(&catalog).apply(FarmEvent::PointsCleared, &catalog);
    let summary = state.summary(&catalog);

    assert_eq!(summary.area_sqm, 0.0);
    assert_eq!(summary.thai_area, "0 ไร่ 0 งาน 0.00 ตร.ว.");
    assert_eq!(summary.daily_water_liters, 0.0);
    assert!(state.advice_request(&catalog).is_none());
}

#[test]
fn test_core_is_usable_across_threads() {
    let catalog = Catalog::builtin();
    let points = parse_boundary(FIELD).unwrap();
    let expected = compute_area(&points);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let points = &points;
                let catalog = &catalog;
                scope.spawn(move || {
                    let state = points.iter().fold(FarmState::with_defaults(catalog), |s, p| {
                        s.apply(FarmEvent::PointAdded(*p), catalog)
                    });
                    state.area_sqm()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
