use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const DEFAULT_PHONE: &str = "+40700000000";
pub const DEFAULT_WHATSAPP_MESSAGE: &str = "Salut! Vreau ofertă pentru UCE (P130-2025).";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLinks {
    pub tel: String,
    pub whatsapp: String,
}

/// 浮動按鈕（電話、WhatsApp）的連結
#[derive(Debug, Clone)]
pub struct FloatingLinks {
    phone: String,
    whatsapp_message: String,
}

impl FloatingLinks {
    pub fn new(phone: impl Into<String>, whatsapp_message: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            whatsapp_message: whatsapp_message.into(),
        }
    }

    pub fn tel(&self) -> String {
        format!("tel:{}", self.phone)
    }

    pub fn whatsapp(&self) -> String {
        static NON_DIGIT: OnceLock<Regex> = OnceLock::new();
        let re = NON_DIGIT.get_or_init(|| Regex::new(r"\D").expect("non-digit pattern is a valid regex"));

        let digits = re.replace_all(&self.phone, "");
        format!(
            "https://wa.me/{}?text={}",
            digits,
            urlencoding::encode(&self.whatsapp_message)
        )
    }

    pub fn all(&self) -> ContactLinks {
        ContactLinks {
            tel: self.tel(),
            whatsapp: self.whatsapp(),
        }
    }
}

impl Default for FloatingLinks {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE, DEFAULT_WHATSAPP_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tel_link_keeps_plus_sign() {
        assert_eq!(FloatingLinks::default().tel(), "tel:+40700000000");
    }

    #[test]
    fn test_whatsapp_link_strips_non_digits() {
        let links = FloatingLinks::new("+40 (700) 123-456", "Salut!");
        assert_eq!(links.whatsapp(), "https://wa.me/40700123456?text=Salut%21");
    }

    #[test]
    fn test_default_whatsapp_message_is_encoded() {
        let whatsapp = FloatingLinks::default().whatsapp();
        assert_eq!(
            whatsapp,
            "https://wa.me/40700000000?text=Salut%21%20Vreau%20ofert%C4%83%20pentru%20UCE%20%28P130-2025%29."
        );
        let parsed = url::Url::parse(&whatsapp).unwrap();
        assert_eq!(parsed.host_str(), Some("wa.me"));
    }
}
