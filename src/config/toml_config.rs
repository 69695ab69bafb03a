use crate::core::calculator::DEFAULT_DEBOUNCE;
use crate::core::links::{DEFAULT_PHONE, DEFAULT_WHATSAPP_MESSAGE};
use crate::core::render::DEFAULT_THOUSANDS_SEPARATOR;
use crate::core::ConfigProvider;
use crate::domain::model::{BuildingType, PriceCatalog, DEFAULT_INSTRUMENTATION_FEE};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_EMAIL: &str = "ionescu.lupeanu.silviu@gmail.com";
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: ContactConfig,
    pub pricing: PricingConfig,
    pub calculator: CalculatorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: String,
    pub email: String,
    pub whatsapp_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: DEFAULT_PHONE.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            whatsapp_message: DEFAULT_WHATSAPP_MESSAGE.to_string(),
        }
    }
}

/// 價目表設定，未列出的類型沿用預設價格
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub bloc: Option<u64>,
    pub casa: Option<u64>,
    pub hala: Option<u64>,
    pub birouri: Option<u64>,
    pub instrumentation_fee: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let catalog = PriceCatalog::default();
        Self {
            bloc: Some(catalog.base_fee(BuildingType::Bloc)),
            casa: Some(catalog.base_fee(BuildingType::Casa)),
            hala: Some(catalog.base_fee(BuildingType::Hala)),
            birouri: Some(catalog.base_fee(BuildingType::Birouri)),
            instrumentation_fee: DEFAULT_INSTRUMENTATION_FEE,
        }
    }
}

impl PricingConfig {
    pub fn to_catalog(&self) -> Result<PriceCatalog> {
        let bloc = validation::validate_required_field("pricing.bloc", &self.bloc)?;

        let mut base_fees = BTreeMap::from([(BuildingType::Bloc, *bloc)]);
        for (kind, fee) in [
            (BuildingType::Casa, self.casa),
            (BuildingType::Hala, self.hala),
            (BuildingType::Birouri, self.birouri),
        ] {
            if let Some(fee) = fee {
                base_fees.insert(kind, fee);
            }
        }

        PriceCatalog::new(base_fees, self.instrumentation_fee)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub debounce_ms: u64,
    pub thousands_separator: char,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UCE_PHONE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_email("site.email", &self.site.email)?;
        validation::validate_phone("site.phone", &self.site.phone)?;
        validation::validate_non_empty_string("site.whatsapp_message", &self.site.whatsapp_message)?;

        for (field, fee) in [
            ("pricing.bloc", self.pricing.bloc),
            ("pricing.casa", self.pricing.casa),
            ("pricing.hala", self.pricing.hala),
            ("pricing.birouri", self.pricing.birouri),
        ] {
            if let Some(fee) = fee {
                validation::validate_positive_number(field, fee, 1)?;
            }
        }
        self.pricing.to_catalog()?;

        validation::validate_range("calculator.debounce_ms", self.calculator.debounce_ms, 0, MAX_DEBOUNCE_MS)?;

        if self.calculator.thousands_separator.is_ascii_digit() {
            return Err(CalcError::InvalidConfigValueError {
                field: "calculator.thousands_separator".to_string(),
                value: self.calculator.thousands_separator.to_string(),
                reason: "Separator cannot be a digit".to_string(),
            });
        }

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(CalcError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn catalog(&self) -> Result<PriceCatalog> {
        self.pricing.to_catalog()
    }

    fn phone(&self) -> &str {
        &self.site.phone
    }

    fn email(&self) -> &str {
        &self.site.email
    }

    fn whatsapp_message(&self) -> &str {
        &self.site.whatsapp_message
    }

    fn debounce_ms(&self) -> u64 {
        self.calculator.debounce_ms
    }

    fn thousands_separator(&self) -> char {
        self.calculator.thousands_separator
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
