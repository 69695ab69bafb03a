use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INSTRUMENTATION_FEE: u64 = 1500;

/// 可接受的最大面積（m²），超過的輸入以此計算
pub const MAX_AREA_SQUARE_METERS: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    #[default]
    Bloc,
    Casa,
    Hala,
    Birouri,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::Bloc,
        BuildingType::Casa,
        BuildingType::Hala,
        BuildingType::Birouri,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BuildingType::Bloc => "bloc",
            BuildingType::Casa => "casa",
            BuildingType::Hala => "hala",
            BuildingType::Birouri => "birouri",
        }
    }

    /// 顯示在結果摘要中的名稱
    pub fn label(self) -> &'static str {
        match self {
            BuildingType::Bloc => "Bloc",
            BuildingType::Casa => "Casă",
            BuildingType::Hala => "Hală/Depozit",
            BuildingType::Birouri => "Birouri/Retail",
        }
    }

    /// 表單值轉換，缺少或無法辨識時回到 `bloc`
    pub fn from_form_value(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        BuildingType::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| CalcError::InvalidConfigValueError {
                field: "tip".to_string(),
                value: s.to_string(),
                reason: "Unknown building type. Valid types: bloc, casa, hala, birouri".to_string(),
            })
    }
}

/// 各建物類型的年度基本費用（lei）。一定包含 `bloc`，其他缺少的類型以 `bloc` 計價。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceCatalog {
    base_fees: BTreeMap<BuildingType, u64>,
    instrumentation_fee: u64,
}

impl PriceCatalog {
    pub fn new(base_fees: BTreeMap<BuildingType, u64>, instrumentation_fee: u64) -> Result<Self> {
        if !base_fees.contains_key(&BuildingType::Bloc) {
            return Err(CalcError::MissingConfigError {
                field: "pricing.bloc".to_string(),
            });
        }
        if let Some((kind, fee)) = base_fees.iter().find(|(_, fee)| **fee == 0) {
            return Err(CalcError::InvalidConfigValueError {
                field: format!("pricing.{}", kind),
                value: fee.to_string(),
                reason: "Base fee must be a positive amount".to_string(),
            });
        }

        Ok(Self {
            base_fees,
            instrumentation_fee,
        })
    }

    pub fn base_fee(&self, kind: BuildingType) -> u64 {
        self.base_fees
            .get(&kind)
            .or_else(|| self.base_fees.get(&BuildingType::Bloc))
            .copied()
            .unwrap_or_default()
    }

    pub fn instrumentation_fee(&self) -> u64 {
        self.instrumentation_fee
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        let base_fees = BTreeMap::from([
            (BuildingType::Bloc, 3990),
            (BuildingType::Casa, 2990),
            (BuildingType::Hala, 5490),
            (BuildingType::Birouri, 4490),
        ]);
        Self {
            base_fees,
            instrumentation_fee: DEFAULT_INSTRUMENTATION_FEE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub building_type: BuildingType,
    pub area_square_meters: f64,
    pub include_instrumentation: bool,
}

impl EstimateRequest {
    pub fn new(building_type: BuildingType, area_square_meters: f64, include_instrumentation: bool) -> Self {
        Self {
            building_type,
            area_square_meters: normalize_area(area_square_meters),
            include_instrumentation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub total_fee: u64,
    pub building_type: BuildingType,
    pub area_square_meters: f64,
    pub include_instrumentation: bool,
}

/// 計算器表單的原始欄位：`tip`、`sup`、`instr`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub tip: Option<String>,
    pub sup: Option<String>,
    pub instr: Option<String>,
}

impl FormInput {
    /// 解析 `tip=casa&sup=120&instr=on` 形式的表單內容
    pub fn from_urlencoded(query: &str) -> Self {
        let mut input = FormInput::default();
        for (key, value) in url::form_urlencoded::parse(query.trim().as_bytes()) {
            match &*key {
                "tip" => input.tip = Some(value.into_owned()),
                "sup" => input.sup = Some(value.into_owned()),
                "instr" => input.instr = Some(value.into_owned()),
                other => tracing::debug!("Ignoring unknown form field '{}'", other),
            }
        }
        input
    }

    pub fn to_request(&self) -> EstimateRequest {
        EstimateRequest::new(
            BuildingType::from_form_value(self.tip.as_deref()),
            parse_area(self.sup.as_deref()),
            self.instr.as_deref() == Some("on"),
        )
    }
}

/// 取字串開頭最長的十進位數字（`"120mp"` → 120），其餘情況為 0
pub fn parse_area(value: Option<&str>) -> f64 {
    use regex::Regex;
    use std::sync::OnceLock;

    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("area pattern is a valid regex")
    });

    let Some(raw) = value.map(str::trim_start) else {
        return 0.0;
    };

    re.find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(normalize_area)
        .unwrap_or(0.0)
}

/// 負值與 NaN 為 0；超過上限（含 +inf）一律取 `MAX_AREA_SQUARE_METERS`
pub fn normalize_area(area: f64) -> f64 {
    if area.is_nan() || area <= 0.0 {
        0.0
    } else {
        area.min(MAX_AREA_SQUARE_METERS)
    }
}
