use crate::utils::error::{AvailabilityError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AvailabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AvailabilityError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AvailabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AvailabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AvailabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
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
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(AvailabilityError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(AvailabilityError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AvailabilityError::ValidationError {
            field: field_name.to_string(),
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
        return Err(AvailabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server.cors_allowed_origin", "https://satuatap.id").is_ok());
        assert!(validate_url("server.cors_allowed_origin", "http://localhost:5173").is_ok());
        assert!(validate_url("server.cors_allowed_origin", "").is_err());
        assert!(validate_url("server.cors_allowed_origin", "invalid-url").is_err());
        assert!(validate_url("server.cors_allowed_origin", "ftp://satuatap.id").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("cache.read_ttl_seconds", 300u64, 1, 86_400).is_ok());
        assert!(validate_range("cache.read_ttl_seconds", 0u64, 1, 86_400).is_err());
        assert!(validate_range("cache.read_ttl_seconds", 100_000u64, 1, 86_400).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["data/properties.json".to_string()];
        assert!(validate_file_extensions("store.seed_file", &files, &["json"]).is_ok());

        let invalid_files = vec!["data/properties.csv".to_string()];
        assert!(validate_file_extensions("store.seed_file", &invalid_files, &["json"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("propertyId", "kost-001").is_ok());
        assert!(validate_non_empty_string("propertyId", "").is_err());
        assert!(validate_non_empty_string("propertyId", "   ").is_err());
    }
}
