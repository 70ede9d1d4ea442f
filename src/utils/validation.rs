use crate::domain::model::Provider;
use crate::utils::error::{MoopError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MoopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MoopError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MoopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MoopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MoopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
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
        return Err(MoopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses a `PROVIDER:CODE` theater reference such as `C:0056`.
/// The provider part is the chain code carried in `Theater::type`.
pub fn parse_theater_ref(field_name: &str, reference: &str) -> Result<(Provider, String)> {
    let invalid = |reason: String| MoopError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: reference.to_string(),
        reason,
    };

    let (provider_code, code) = reference
        .split_once(':')
        .ok_or_else(|| invalid("Expected PROVIDER:CODE, e.g. C:0056".to_string()))?;

    let provider = Provider::from_code(provider_code.trim()).ok_or_else(|| {
        let known: Vec<&str> = Provider::ALL.iter().map(|p| p.code()).collect();
        invalid(format!("Unknown chain '{}'. Known chains: {}", provider_code, known.join(", ")))
    })?;

    let code = code.trim();
    if code.is_empty() {
        return Err(invalid("Theater code cannot be empty".to_string()));
    }

    Ok((provider, code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.endpoint", "https://moop.example.com/api").is_ok());
        assert!(validate_url("api.endpoint", "").is_err());
        assert!(validate_url("api.endpoint", "ftp://moop.example.com").is_err());
        assert!(validate_url("api.endpoint", "not a url").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./data").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("api.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("api.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("api.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_parse_theater_ref() {
        let (provider, code) = parse_theater_ref("--set", "M:1372").unwrap();
        assert_eq!(provider, Provider::Megabox);
        assert_eq!(code, "1372");

        // 樂天的代碼本身含有 '|'
        let (provider, code) = parse_theater_ref("--set", "L:1|0001|1016").unwrap();
        assert_eq!(provider, Provider::Lotte);
        assert_eq!(code, "1|0001|1016");

        assert!(parse_theater_ref("--set", "1372").is_err());
        assert!(parse_theater_ref("--set", "X:1372").is_err());
        assert!(parse_theater_ref("--set", "C:").is_err());
    }
}
