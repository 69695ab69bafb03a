use crate::config::toml_config::SiteConfig;
use crate::utils::error::{CalcError, Result};
use std::env;

pub const PHONE_VAR: &str = "UCE_PHONE";
pub const EMAIL_VAR: &str = "UCE_EMAIL";
pub const WHATSAPP_MESSAGE_VAR: &str = "UCE_WHATSAPP_MESSAGE";
pub const DEBOUNCE_MS_VAR: &str = "UCE_DEBOUNCE_MS";

impl SiteConfig {
    /// 以環境變數覆蓋聯絡資訊與 debounce 設定
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(phone) = lookup(PHONE_VAR) {
            tracing::debug!("{} overrides site.phone", PHONE_VAR);
            self.site.phone = phone;
        }
        if let Some(email) = lookup(EMAIL_VAR) {
            tracing::debug!("{} overrides site.email", EMAIL_VAR);
            self.site.email = email;
        }
        if let Some(message) = lookup(WHATSAPP_MESSAGE_VAR) {
            self.site.whatsapp_message = message;
        }
        if let Some(raw) = lookup(DEBOUNCE_MS_VAR) {
            self.calculator.debounce_ms =
                raw.trim()
                    .parse()
                    .map_err(|_| CalcError::InvalidConfigValueError {
                        field: DEBOUNCE_MS_VAR.to_string(),
                        value: raw.clone(),
                        reason: "Expected a whole number of milliseconds".to_string(),
                    })?;
        }
        Ok(())
    }
}
