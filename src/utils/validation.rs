use crate::utils::error::{CalcError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> CalcError {
    CalcError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// API base URLs must be absolute http(s) URLs.
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => {
                if url.query().is_some() || url.fragment().is_some() {
                    Err(invalid(field_name, url_str, "Base URL cannot carry a query or fragment"))
                } else {
                    Ok(())
                }
            }
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// Separators must be a single character and differ from each other.
pub fn validate_separators(field_name: &str, thousands: &str, decimal: &str) -> Result<()> {
    if decimal.chars().count() != 1 {
        return Err(invalid(field_name, decimal, "Decimal separator must be one character"));
    }
    if thousands.chars().count() > 1 {
        return Err(invalid(field_name, thousands, "Thousands separator must be at most one character"));
    }
    if thousands == decimal {
        return Err(invalid(field_name, thousands, "Separators must differ"));
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
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("api.base_url", "https://example.com/api").is_ok());
        assert!(validate_base_url("api.base_url", "http://localhost:8000/api").is_ok());
        assert!(validate_base_url("api.base_url", "").is_err());
        assert!(validate_base_url("api.base_url", "invalid-url").is_err());
        assert!(validate_base_url("api.base_url", "ftp://example.com").is_err());
        assert!(validate_base_url("api.base_url", "http://example.com/api?x=1").is_err());
    }

    #[test]
    fn test_validate_separators() {
        assert!(validate_separators("format", ",", ".").is_ok());
        assert!(validate_separators("format", "", ",").is_ok());
        assert!(validate_separators("format", ".", ".").is_err());
        assert!(validate_separators("format", ",", "").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("calendar.reminder_minutes", 60, 0, 40320).is_ok());
        assert!(validate_range("calendar.reminder_minutes", -1, 0, 40320).is_err());
    }
}
