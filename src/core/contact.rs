use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SUBJECT: &str = "Solicitare UCE";
const MISSING_FIELDS_MESSAGE: &str = "Vă rugăm să completați toate câmpurile obligatorii.";
const SUCCESS_AUTO_HIDE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub nume: String,
    pub email: String,
    pub telefon: String,
    pub subiect: Option<String>,
    pub mesaj: String,
}

impl ContactRequest {
    fn subject(&self) -> &str {
        self.subiect
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    /// `nume`、`email`、`mesaj` 為必填
    pub fn check_required(&self) -> Result<()> {
        let missing = [&self.nume, &self.email, &self.mesaj]
            .iter()
            .any(|field| field.trim().is_empty());

        if missing {
            return Err(CalcError::FormValidationError {
                message: MISSING_FIELDS_MESSAGE.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl FormStatus {
    pub fn css_class(&self) -> String {
        let kind = match self.kind {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        };
        format!("form__status form__status--{}", kind)
    }

    /// 成功訊息 5 秒後自動隱藏，錯誤訊息保留
    pub fn auto_hide_after(&self) -> Option<Duration> {
        match self.kind {
            StatusKind::Success => Some(SUCCESS_AUTO_HIDE),
            StatusKind::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactOutcome {
    pub mailto: Option<String>,
    pub status: FormStatus,
}

/// 聯絡表單：驗證必填欄位後組出 mailto 連結
#[derive(Debug, Clone)]
pub struct ContactForm {
    recipient: String,
}

impl ContactForm {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    pub fn mailto_link(&self, request: &ContactRequest) -> Result<String> {
        request.check_required()?;

        let subject = format!("{} – {}", request.subject(), request.nume.trim());
        let body = format!(
            "Nume: {}\nEmail: {}\nTelefon: {}\n\nMesaj:\n{}",
            request.nume.trim(),
            request.email.trim(),
            request.telefon.trim(),
            request.mesaj
        );

        Ok(format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        ))
    }

    pub fn submit(&self, request: &ContactRequest) -> ContactOutcome {
        match self.mailto_link(request) {
            Ok(mailto) => {
                tracing::info!("📧 Contact request from '{}' ready to send", request.nume.trim());
                ContactOutcome {
                    mailto: Some(mailto),
                    status: FormStatus {
                        kind: StatusKind::Success,
                        message: format!(
                            "S-a deschis clientul de e-mail pentru trimitere. Dacă nu se deschide, scrie-ne direct la {}",
                            self.recipient
                        ),
                    },
                }
            }
            Err(e) => {
                tracing::warn!("Contact form rejected: {}", e);
                ContactOutcome {
                    mailto: None,
                    status: FormStatus {
                        kind: StatusKind::Error,
                        message: e.user_friendly_message(),
                    },
                }
            }
        }
    }
}
