use serde::Deserialize;
use validator::Validate;

use crate::payload::WifiEncryption;
use crate::validation::rules::{validate_http_scheme, validate_non_blank, validate_phone};

/// Raw form values as submitted by the UI, tagged by QR type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PayloadRequest {
    Url(UrlForm),
    Text(TextForm),
    Wifi(WifiForm),
    Vcard(VCardForm),
    Whatsapp(WhatsAppForm),
    Email(EmailForm),
    Phone(PhoneForm),
    Sms(SmsForm),
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UrlForm {
    #[validate(
        url(message = "Enter a valid URL."),
        custom(function = "validate_http_scheme")
    )]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TextForm {
    #[validate(custom(function = "validate_non_blank"))]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct WifiForm {
    #[validate(length(min = 1, message = "SSID is required."))]
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VCardForm {
    pub first_name: String,
    pub last_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(email(message = "Enter a valid email."))]
    pub email: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    #[validate(url(message = "Enter a valid URL."))]
    pub website: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct WhatsAppForm {
    #[validate(
        length(min = 5, message = "Enter a phone number."),
        custom(function = "validate_phone")
    )]
    pub phone: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EmailForm {
    #[validate(email(message = "Enter a valid email."))]
    pub email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PhoneForm {
    #[validate(
        length(min = 5, message = "Enter a phone number."),
        custom(function = "validate_phone")
    )]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SmsForm {
    #[validate(
        length(min = 5, message = "Enter a phone number."),
        custom(function = "validate_phone")
    )]
    pub phone: String,
    pub message: Option<String>,
}
