use crate::utils::error::{EnablerError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EnablerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EnablerError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EnablerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EnablerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 必填參數：缺少或只有空白都視為未提供
pub fn validate_required_argument<'a>(argument: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(EnablerError::MissingArgument {
            argument: argument.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EnablerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base_url", "https://app.codacy.com/api/v3").is_ok());
        assert!(validate_url("api_base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("api_base_url", "").is_err());
        assert!(validate_url("api_base_url", "invalid-url").is_err());
        assert!(validate_url("api_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("page_size", 100, 1).is_ok());
        assert!(validate_positive_number("page_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_argument() {
        assert_eq!(
            validate_required_argument("organization", &Some(" acme ".to_string())).unwrap(),
            "acme"
        );
        assert!(matches!(
            validate_required_argument("organization", &None),
            Err(EnablerError::MissingArgument { .. })
        ));
        assert!(validate_required_argument("organization", &Some("   ".to_string())).is_err());
    }
}
