use serde::{Deserialize, Serialize};

use crate::utils::encode::encode_form_value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailInput {
    pub email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// `mailto:` URI with optional form-encoded `subject` and `body` parameters.
pub fn build_email_payload(input: &EmailInput) -> String {
    let params: Vec<String> = [("subject", &input.subject), ("body", &input.body)]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| format!("{}={}", key, encode_form_value(value)))
        })
        .collect();

    if params.is_empty() {
        format!("mailto:{}", input.email)
    } else {
        format!("mailto:{}?{}", input.email, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_payload_with_subject_and_body() {
        let input = EmailInput {
            email: "hi@example.com".to_string(),
            subject: Some("Hi".to_string()),
            body: Some("Hello".to_string()),
        };
        assert_eq!(
            build_email_payload(&input),
            "mailto:hi@example.com?subject=Hi&body=Hello"
        );
    }

    #[test]
    fn email_payload_without_params_has_no_question_mark() {
        let input = EmailInput {
            email: "hi@example.com".to_string(),
            subject: Some("  ".to_string()),
            body: None,
        };
        assert_eq!(build_email_payload(&input), "mailto:hi@example.com");
    }

    #[test]
    fn email_payload_body_only() {
        let input = EmailInput {
            email: "hi@example.com".to_string(),
            subject: None,
            body: Some(" See you soon ".to_string()),
        };
        assert_eq!(
            build_email_payload(&input),
            "mailto:hi@example.com?body=See+you+soon"
        );
    }
}
