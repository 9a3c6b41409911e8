use crate::utils::error::{CartError, Result};
use std::path::Path;
use url::Url;

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> CartError {
    CartError::InvalidConfigValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// `stock/{id}` and `products/{id}` are joined onto this URL, so it must be an
/// http(s) origin or path without query or fragment.
pub fn validate_api_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| invalid(field, value, format!("not a stock service URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            value,
            format!("stock service must be reached over http or https, not {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, value, "stock service URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field,
            value,
            "product paths are appended to this URL; drop the query or fragment",
        ));
    }
    Ok(())
}

/// The cart snapshot lives in this directory; it may not exist yet.
pub fn validate_storage_dir(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "cart storage directory is empty"));
    }
    if value.contains('\0') {
        return Err(invalid(field, value, "cart storage directory contains a NUL byte"));
    }
    if Path::new(value).is_file() {
        return Err(invalid(
            field,
            value,
            "a file is in the way of the cart storage directory",
        ));
    }
    Ok(())
}

pub fn validate_timeout_seconds(field: &str, value: u64) -> Result<()> {
    if value == 0 || value > MAX_TIMEOUT_SECONDS {
        return Err(invalid(
            field,
            value,
            format!("stock lookups need a timeout between 1 and {} seconds", MAX_TIMEOUT_SECONDS),
        ));
    }
    Ok(())
}
