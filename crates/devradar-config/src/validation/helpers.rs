//! Shared validation helpers.

use url::Url;

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float). NaN is out of range.
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `value` parses as a URL with a host and one of `schemes`.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, value: &str, schemes: &[&str]) {
    let url = match Url::parse(value) {
        Ok(url) => url,
        Err(url::ParseError::EmptyHost) => {
            errors.push(format!("{name} = {value:?} has no host"));
            return;
        }
        Err(e) => {
            errors.push(format!("{name} = {value:?} is not a valid URL: {e}"));
            return;
        }
    };
    if !schemes.contains(&url.scheme()) {
        errors.push(format!(
            "{name} scheme {:?} must be one of {}",
            url.scheme(),
            schemes.join(", ")
        ));
    }
    if !url.has_host() {
        errors.push(format!("{name} = {value:?} has no host"));
    }
}
