use crate::utils::error::{AdapterError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// `required`: the value must not be the empty string.
pub fn validate_required(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AdapterError::validation(field_name, "required"));
    }
    Ok(())
}

/// `min=N` on a sequence: at least `min` elements.
pub fn validate_min_len<T>(field_name: &str, items: &[T], min: usize) -> Result<()> {
    if items.len() < min {
        return Err(AdapterError::validation(field_name, "min"));
    }
    Ok(())
}

/// `min=N` on a number.
pub fn validate_min<T: PartialOrd + Copy>(field_name: &str, value: T, min: T) -> Result<()> {
    if value < min {
        return Err(AdapterError::validation(field_name, "min"));
    }
    Ok(())
}

/// `dive`: validates every element in order and reports the first failure
/// under `field_name[index]`.
pub fn validate_dive<T: Validate>(field_name: &str, items: &[T]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| e.within(&format!("{}[{}]", field_name, index)))?;
    }
    Ok(())
}

pub fn validate_nested<T: Validate>(field_name: &str, value: &T) -> Result<()> {
    value.validate().map_err(|e| e.within(field_name))
}

pub fn validate_url(field_name: &str, url_str: &str, allowed_schemes: &[&str]) -> Result<()> {
    match Url::parse(url_str) {
        Ok(url) if allowed_schemes.contains(&url.scheme()) => Ok(()),
        Ok(url) => {
            tracing::debug!(
                "{} has unsupported scheme '{}', allowed: {}",
                field_name,
                url.scheme(),
                allowed_schemes.join(", ")
            );
            Err(AdapterError::validation(field_name, "url"))
        }
        Err(e) => {
            tracing::debug!("{} is not a valid URL: {}", field_name, e);
            Err(AdapterError::validation(field_name, "url"))
        }
    }
}
