use crate::core::render::Summary;
use crate::domain::model::{EstimateResult, PriceCatalog};
use crate::utils::error::Result;

/// 估價結果的輸出端（頁面上的顯示區塊）
pub trait EstimateSink: Send + Sync {
    fn publish(&self, result: &EstimateResult, summary: &Summary) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog(&self) -> Result<PriceCatalog>;
    fn phone(&self) -> &str;
    fn email(&self) -> &str;
    fn whatsapp_message(&self) -> &str;
    fn debounce_ms(&self) -> u64;
    fn thousands_separator(&self) -> char;
}
