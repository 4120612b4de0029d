//! Payload builders: pure functions mapping validated input to the exact string
//! embedded in the QR symbol.

pub mod email;
pub mod escape;
pub mod phone;
pub mod url;
pub mod vcard;
pub mod whatsapp;
pub mod wifi;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use email::{EmailInput, build_email_payload};
pub use phone::{PhoneInput, SmsInput, build_phone_payload, build_sms_payload};
pub use url::{TextInput, UrlInput, build_text_payload, build_url_payload};
pub use vcard::{VCardInput, build_vcard_payload};
pub use whatsapp::{WhatsAppInput, build_whatsapp_payload};
pub use wifi::{WifiEncryption, WifiInput, build_wifi_payload};

/// Text longer than this makes the symbol dense enough to be worth a warning.
pub const LONG_TEXT_THRESHOLD: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrKind {
    Url,
    Text,
    Wifi,
    Vcard,
    Whatsapp,
    Email,
    Phone,
    Sms,
}

impl QrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrKind::Url => "url",
            QrKind::Text => "text",
            QrKind::Wifi => "wifi",
            QrKind::Vcard => "vcard",
            QrKind::Whatsapp => "whatsapp",
            QrKind::Email => "email",
            QrKind::Phone => "phone",
            QrKind::Sms => "sms",
        }
    }
}

impl fmt::Display for QrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input, one variant per QR type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PayloadInput {
    Url(UrlInput),
    Text(TextInput),
    Wifi(WifiInput),
    #[serde(rename = "vcard")]
    VCard(VCardInput),
    #[serde(rename = "whatsapp")]
    WhatsApp(WhatsAppInput),
    Email(EmailInput),
    Phone(PhoneInput),
    Sms(SmsInput),
}

impl PayloadInput {
    pub fn kind(&self) -> QrKind {
        match self {
            PayloadInput::Url(_) => QrKind::Url,
            PayloadInput::Text(_) => QrKind::Text,
            PayloadInput::Wifi(_) => QrKind::Wifi,
            PayloadInput::VCard(_) => QrKind::Vcard,
            PayloadInput::WhatsApp(_) => QrKind::Whatsapp,
            PayloadInput::Email(_) => QrKind::Email,
            PayloadInput::Phone(_) => QrKind::Phone,
            PayloadInput::Sms(_) => QrKind::Sms,
        }
    }
}

pub fn build_payload(input: &PayloadInput) -> String {
    match input {
        PayloadInput::Url(input) => build_url_payload(input),
        PayloadInput::Text(input) => build_text_payload(input),
        PayloadInput::Wifi(input) => build_wifi_payload(input),
        PayloadInput::VCard(input) => build_vcard_payload(input),
        PayloadInput::WhatsApp(input) => build_whatsapp_payload(input),
        PayloadInput::Email(input) => build_email_payload(input),
        PayloadInput::Phone(input) => build_phone_payload(input),
        PayloadInput::Sms(input) => build_sms_payload(input),
    }
}

/// Non-blocking advice shown next to the payload, e.g. for very long text.
pub fn payload_warning(input: &PayloadInput) -> Option<String> {
    match input {
        PayloadInput::Text(TextInput { text }) => {
            let length = text.chars().count();
            (length > LONG_TEXT_THRESHOLD).then(|| {
                format!(
                    "Long text ({} characters) increases QR density. Consider using a URL if scans fail.",
                    length
                )
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_inputs() -> Vec<PayloadInput> {
        vec![
            PayloadInput::Url(UrlInput {
                url: " https://example.com ".to_string(),
            }),
            PayloadInput::Text(TextInput {
                text: "Hello".to_string(),
            }),
            PayloadInput::Wifi(WifiInput {
                ssid: "Cafe".to_string(),
                password: "secret".to_string(),
                encryption: WifiEncryption::Wpa,
                hidden: false,
            }),
            PayloadInput::VCard(VCardInput {
                first_name: "Ada".to_string(),
                ..Default::default()
            }),
            PayloadInput::WhatsApp(WhatsAppInput {
                phone: "+49 170 1234567".to_string(),
                message: Some("Hello".to_string()),
            }),
            PayloadInput::Email(EmailInput {
                email: "hi@example.com".to_string(),
                subject: Some("Hi".to_string()),
                body: None,
            }),
            PayloadInput::Phone(PhoneInput {
                phone: "+49 170 1234567".to_string(),
            }),
            PayloadInput::Sms(SmsInput {
                phone: "+49 170 1234567".to_string(),
                message: Some("Hi".to_string()),
            }),
        ]
    }

    #[test]
    fn builders_are_idempotent() {
        for input in all_inputs() {
            assert_eq!(build_payload(&input), build_payload(&input), "{}", input.kind());
        }
    }

    #[test]
    fn dispatch_matches_variant_builders() {
        let inputs = all_inputs();
        assert_eq!(build_payload(&inputs[0]), "https://example.com");
        assert_eq!(build_payload(&inputs[2]), "WIFI:T:WPA;S:Cafe;P:secret;H:false;;");
        assert_eq!(
            build_payload(&inputs[4]),
            "https://wa.me/491701234567?text=Hello"
        );
        assert_eq!(build_payload(&inputs[5]), "mailto:hi@example.com?subject=Hi");
        assert_eq!(build_payload(&inputs[6]), "tel:+491701234567");
        assert_eq!(build_payload(&inputs[7]), "smsto:+491701234567:Hi");
    }

    #[test]
    fn kinds_round_trip_their_names() {
        let kinds: Vec<&str> = all_inputs().iter().map(|i| i.kind().as_str()).collect();
        assert_eq!(
            kinds,
            vec!["url", "text", "wifi", "vcard", "whatsapp", "email", "phone", "sms"]
        );
    }

    #[test]
    fn long_text_warns() {
        let short = PayloadInput::Text(TextInput {
            text: "a".repeat(LONG_TEXT_THRESHOLD),
        });
        assert_eq!(payload_warning(&short), None);

        let long = PayloadInput::Text(TextInput {
            text: "a".repeat(LONG_TEXT_THRESHOLD + 1),
        });
        let warning = payload_warning(&long).unwrap();
        assert!(warning.starts_with("Long text (501 characters)"));
    }
}
