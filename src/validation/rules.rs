use std::borrow::Cow;

use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Numbers are parsed without a default region, so they must carry a `+<country>` prefix.
pub fn is_valid_phone(value: &str) -> bool {
    phonenumber::parse(None, value)
        .map(|number| phonenumber::is_valid(&number))
        .unwrap_or(false)
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(invalid("phone", "Enter a valid phone number."))
    }
}

pub fn validate_http_scheme(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(invalid(
            "url_scheme",
            "URL must start with http:// or https://.",
        ))
    }
}

pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", "Enter some text."))
    } else {
        Ok(())
    }
}
