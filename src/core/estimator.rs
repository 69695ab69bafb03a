use crate::core::render::{render_summary, Summary, DEFAULT_THOUSANDS_SEPARATOR};
use crate::domain::model::{normalize_area, EstimateRequest, EstimateResult, PriceCatalog};

const AREA_BAND_M2: f64 = 100.0;
const SURCHARGE_PER_BAND: f64 = 0.15;

/// 每個開始的 100 m² 區間加收 15%。面積為 0 時係數為 0。
pub fn area_factor(area_square_meters: f64) -> f64 {
    (area_square_meters / AREA_BAND_M2).ceil() * SURCHARGE_PER_BAND
}

/// 純函式估價，不會失敗。
///
/// 計算以 f64 依固定順序進行，`round` 只在面積加成之後做一次（四捨五入，遠離零），
/// 儀器費用不參與加成。因此 `casa` 100 m² 的乘積是 3438.4999999999995，結果為 3438。
///
/// 面積先經 `normalize_area` 限制在 `0..=MAX_AREA_SQUARE_METERS`，金額相加採飽和運算。
pub fn estimate(request: &EstimateRequest, catalog: &PriceCatalog) -> EstimateResult {
    let area_square_meters = normalize_area(request.area_square_meters);
    let base_price = catalog.base_fee(request.building_type) as f64;
    let scaled = (base_price * (1.0 + area_factor(area_square_meters))).round();

    // `as` 對 f64 → u64 為飽和轉換
    let mut total_fee = scaled as u64;
    if request.include_instrumentation {
        total_fee = total_fee.saturating_add(catalog.instrumentation_fee());
    }

    EstimateResult {
        total_fee,
        building_type: request.building_type,
        area_square_meters,
        include_instrumentation: request.include_instrumentation,
    }
}

/// 持有價目表與顯示格式的估價服務，啟動時建立一次
#[derive(Debug, Clone)]
pub struct PriceEstimator {
    catalog: PriceCatalog,
    thousands_separator: char,
}

impl PriceEstimator {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self {
            catalog,
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
        }
    }

    pub fn with_thousands_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn estimate(&self, request: &EstimateRequest) -> EstimateResult {
        let result = estimate(request, &self.catalog);
        tracing::debug!(
            "Estimated {} lei for {} ({} m², instrumentation: {})",
            result.total_fee,
            result.building_type,
            result.area_square_meters,
            result.include_instrumentation
        );
        result
    }

    pub fn summarize(&self, result: &EstimateResult) -> Summary {
        render_summary(result, self.thousands_separator)
    }
}

impl Default for PriceEstimator {
    fn default() -> Self {
        Self::new(PriceCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BuildingType;

    fn request(kind: BuildingType, area: f64, instr: bool) -> EstimateRequest {
        EstimateRequest::new(kind, area, instr)
    }

    #[test]
    fn test_zero_area_has_no_surcharge() {
        let catalog = PriceCatalog::default();
        let result = estimate(&request(BuildingType::Bloc, 0.0, false), &catalog);
        assert_eq!(result.total_fee, 3990);
    }

    #[test]
    fn test_half_rounds_up_for_bloc_250() {
        // 3990 * 1.45 = 5785.5
        let catalog = PriceCatalog::default();
        let result = estimate(&request(BuildingType::Bloc, 250.0, false), &catalog);
        assert_eq!(result.total_fee, 5786);
    }

    #[test]
    fn test_float_product_below_half_rounds_down() {
        let catalog = PriceCatalog::default();
        assert_eq!(estimate(&request(BuildingType::Casa, 100.0, false), &catalog).total_fee, 3438);
        assert_eq!(estimate(&request(BuildingType::Hala, 50.0, false), &catalog).total_fee, 6313);
    }

    #[test]
    fn test_instrumentation_is_added_after_rounding() {
        let catalog = PriceCatalog::default();
        assert_eq!(estimate(&request(BuildingType::Casa, 0.0, true), &catalog).total_fee, 4490);
        assert_eq!(estimate(&request(BuildingType::Bloc, 250.0, true), &catalog).total_fee, 7286);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(area_factor(0.0), 0.0);
        assert_eq!(area_factor(0.5), 0.15);
        assert_eq!(area_factor(100.0), 0.15);
        assert_eq!(area_factor(101.0), 0.3);

        let catalog = PriceCatalog::default();
        let at_100 = estimate(&request(BuildingType::Birouri, 100.0, false), &catalog);
        let at_101 = estimate(&request(BuildingType::Birouri, 101.0, false), &catalog);
        assert_eq!(at_100.total_fee, 5164);
        assert_eq!(at_101.total_fee, 5837);
    }

    #[test]
    fn test_extreme_area_is_capped_and_surcharge_saturates() {
        let catalog = PriceCatalog::default();

        // 直接建構的請求略過邊界正規化
        let raw = EstimateRequest {
            building_type: BuildingType::Bloc,
            area_square_meters: 1e308,
            include_instrumentation: true,
        };
        let capped = estimate(&raw, &catalog);
        assert_eq!(capped.area_square_meters, 1_000_000.0);
        // 3990 * (1 + 10000 * 0.15) + 1500
        assert_eq!(capped.total_fee, 5_990_490);

        let huge_catalog = PriceCatalog::new(
            std::collections::BTreeMap::from([(BuildingType::Bloc, u64::MAX)]),
            u64::MAX,
        )
        .unwrap();
        let saturated = estimate(&request(BuildingType::Bloc, 1_000_000.0, true), &huge_catalog);
        assert_eq!(saturated.total_fee, u64::MAX);
    }

    #[test]
    fn test_estimator_service_renders_summary() {
        let estimator = PriceEstimator::default();
        let result = estimator.estimate(&request(BuildingType::Bloc, 250.0, false));
        let summary = estimator.summarize(&result);
        assert_eq!(summary.headline, "~ 5.786 lei/an + TVA");

        let spaced = PriceEstimator::default().with_thousands_separator(' ');
        assert_eq!(spaced.summarize(&result).headline, "~ 5 786 lei/an + TVA");
    }
}
