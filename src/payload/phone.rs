use serde::{Deserialize, Serialize};

use crate::utils::encode::encode_component;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInput {
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsInput {
    pub phone: String,
    pub message: Option<String>,
}

/// Remove every whitespace character, keeping `+` and any other punctuation.
pub(crate) fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn build_phone_payload(input: &PhoneInput) -> String {
    format!("tel:{}", strip_whitespace(&input.phone))
}

/// `smsto:<phone>[:<message>]`, with no trailing colon when the message is blank.
pub fn build_sms_payload(input: &SmsInput) -> String {
    let phone = strip_whitespace(&input.phone);
    match input.message.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!("smsto:{}:{}", phone, encode_component(text)),
        _ => format!("smsto:{}", phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_payload_strips_spaces_keeps_plus() {
        let input = PhoneInput {
            phone: "+49 170 1234567".to_string(),
        };
        assert_eq!(build_phone_payload(&input), "tel:+491701234567");
    }

    #[test]
    fn sms_payload_with_message() {
        let input = SmsInput {
            phone: "+49 170 1234567".to_string(),
            message: Some("Hi".to_string()),
        };
        assert_eq!(build_sms_payload(&input), "smsto:+491701234567:Hi");
    }

    #[test]
    fn sms_payload_without_message_has_no_trailing_colon() {
        let mut input = SmsInput {
            phone: "+49 170 1234567".to_string(),
            message: None,
        };
        assert_eq!(build_sms_payload(&input), "smsto:+491701234567");

        input.message = Some("   ".to_string());
        assert_eq!(build_sms_payload(&input), "smsto:+491701234567");
    }

    #[test]
    fn sms_message_is_trimmed_and_encoded() {
        let input = SmsInput {
            phone: "+441234".to_string(),
            message: Some("  see you at 5? ".to_string()),
        };
        assert_eq!(build_sms_payload(&input), "smsto:+441234:see%20you%20at%205%3F");
    }
}
