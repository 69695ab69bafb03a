use crate::utils::error::{CalcError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if !email_pattern().is_match(email.trim()) {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: email.to_string(),
            reason: "Not a valid e-mail address".to_string(),
        });
    }
    Ok(())
}

/// 電話號碼至少要有一位數字，只允許 + 空白 - ( ) 作為分隔
pub fn validate_phone(field_name: &str, phone: &str) -> Result<()> {
    let has_digit = phone.chars().any(|c| c.is_ascii_digit());
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    if !has_digit || !allowed {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: phone.to_string(),
            reason: "Phone number must contain digits and only + - ( ) or spaces".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(CalcError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(CalcError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CalcError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("site.email", "ionescu@example.ro").is_ok());
        assert!(validate_email("site.email", "  office@uce.ro ").is_ok());
        assert!(validate_email("site.email", "").is_err());
        assert!(validate_email("site.email", "no-at-sign.ro").is_err());
        assert!(validate_email("site.email", "two words@x.ro").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("site.phone", "+40700000000").is_ok());
        assert!(validate_phone("site.phone", "+40 (700) 000-000").is_ok());
        assert!(validate_phone("site.phone", "+").is_err());
        assert!(validate_phone("site.phone", "call me").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("pricing.bloc", 3990, 1).is_ok());
        assert!(validate_positive_number("pricing.bloc", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["cereri.csv".to_string()];
        assert!(validate_file_extensions("batch.input", &files, &["csv"]).is_ok());

        let invalid_files = vec!["cereri.xlsx".to_string(), "fara_extensie".to_string()];
        assert!(validate_file_extensions("batch.input", &invalid_files[..1], &["csv"]).is_err());
        assert!(validate_file_extensions("batch.input", &invalid_files[1..], &["csv"]).is_err());
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("calculator.debounce_ms", 300u64, 0, 10_000).is_ok());
        assert!(validate_range("calculator.debounce_ms", 20_000u64, 0, 10_000).is_err());

        let missing: Option<u64> = None;
        assert!(matches!(
            validate_required_field("pricing.bloc", &missing),
            Err(CalcError::MissingConfigError { .. })
        ));
    }
}
