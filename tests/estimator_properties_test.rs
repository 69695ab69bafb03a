use uce_calc::{estimate, BuildingType, EstimateRequest, FormInput, PriceCatalog, PriceEstimator};

const AREAS: [f64; 10] = [0.0, 0.5, 1.0, 99.9, 100.0, 100.01, 101.0, 250.0, 999.0, 1000.0];

fn expected_total(base: u64, area: f64) -> u64 {
    (base as f64 * (1.0 + (area / 100.0).ceil() * 0.15)).round() as u64
}

#[test]
fn test_total_matches_formula_for_every_type_and_area() {
    let catalog = PriceCatalog::default();

    for kind in BuildingType::ALL {
        for area in AREAS {
            let result = estimate(&EstimateRequest::new(kind, area, false), &catalog);
            assert_eq!(
                result.total_fee,
                expected_total(catalog.base_fee(kind), area),
                "{} at {} m²",
                kind,
                area
            );
        }
    }
}

#[test]
fn test_instrumentation_adds_exactly_1500() {
    let catalog = PriceCatalog::default();

    for kind in BuildingType::ALL {
        for area in AREAS {
            let without = estimate(&EstimateRequest::new(kind, area, false), &catalog);
            let with = estimate(&EstimateRequest::new(kind, area, true), &catalog);
            assert_eq!(with.total_fee, without.total_fee + 1500);
        }
    }
}

#[test]
fn test_zero_area_returns_base_fee() {
    let catalog = PriceCatalog::default();
    for kind in BuildingType::ALL {
        let result = estimate(&EstimateRequest::new(kind, 0.0, false), &catalog);
        assert_eq!(result.total_fee, catalog.base_fee(kind));
    }
}

#[test]
fn test_unknown_type_is_estimated_as_bloc() {
    let estimator = PriceEstimator::default();

    let unknown = estimator.estimate(&FormInput::from_urlencoded("tip=unknown&sup=0").to_request());
    let bloc = estimator.estimate(&FormInput::from_urlencoded("tip=bloc&sup=0").to_request());
    assert_eq!(unknown, bloc);
}

#[test]
fn test_band_boundary_changes_total() {
    let catalog = PriceCatalog::default();
    let at_100 = estimate(&EstimateRequest::new(BuildingType::Bloc, 100.0, false), &catalog);
    let at_101 = estimate(&EstimateRequest::new(BuildingType::Bloc, 101.0, false), &catalog);

    assert_eq!(at_100.total_fee, 4589);
    assert_eq!(at_101.total_fee, 5187);
}

#[test]
fn test_pinned_rounding_scenarios() {
    let catalog = PriceCatalog::default();
    let cases = [
        (BuildingType::Bloc, 250.0, false, 5786),
        (BuildingType::Casa, 0.0, true, 4490),
        (BuildingType::Casa, 100.0, false, 3438),
        (BuildingType::Casa, 250.0, false, 4336),
        (BuildingType::Hala, 250.0, false, 7961),
        (BuildingType::Birouri, 1000.0, false, 11225),
    ];

    for (kind, area, instr, total) in cases {
        let result = estimate(&EstimateRequest::new(kind, area, instr), &catalog);
        assert_eq!(result.total_fee, total, "{} at {} m²", kind, area);
    }
}

#[test]
fn test_result_echoes_normalized_request() {
    let request = FormInput::from_urlencoded("tip=hala&sup=-20&instr=on").to_request();
    let result = PriceEstimator::default().estimate(&request);

    assert_eq!(result.building_type, BuildingType::Hala);
    assert_eq!(result.area_square_meters, 0.0);
    assert!(result.include_instrumentation);
    assert_eq!(result.total_fee, 5490 + 1500);
}

#[test]
fn test_huge_form_areas_are_clamped() {
    let estimator = PriceEstimator::default();

    let estimate_form = |query: String| estimator.estimate(&FormInput::from_urlencoded(&query).to_request());

    for sup in ["1e20", "1e308", "1e400"] {
        let with_instr = estimate_form(format!("tip=bloc&sup={}&instr=on", sup));
        assert_eq!(with_instr.area_square_meters, 1_000_000.0, "sup={}", sup);
        assert_eq!(with_instr.total_fee, 5_990_490, "sup={}", sup);

        let without = estimate_form(format!("tip=bloc&sup={}", sup));
        assert_eq!(without.total_fee, 5_988_990, "sup={}", sup);
    }

    let capped = estimate_form("tip=bloc&sup=1e20".to_string());
    assert_eq!(estimator.summarize(&capped).details, "Bloc • 1000000 mp");
}

#[test]
fn test_larger_area_never_costs_less() {
    let catalog = PriceCatalog::default();
    let areas = [
        0.0,
        1.0,
        100.0,
        101.0,
        1e3,
        1e5,
        999_999.0,
        1e6,
        1e7,
        1e20,
        1e308,
        f64::INFINITY,
    ];

    for kind in BuildingType::ALL {
        for instr in [false, true] {
            let mut previous = 0;
            for area in areas {
                // 直接建構，不經 `EstimateRequest::new`
                let request = EstimateRequest {
                    building_type: kind,
                    area_square_meters: area,
                    include_instrumentation: instr,
                };
                let total = estimate(&request, &catalog).total_fee;
                assert!(total >= previous, "{} at {} m² costs {} < {}", kind, area, total, previous);
                previous = total;
            }
        }
    }
}
