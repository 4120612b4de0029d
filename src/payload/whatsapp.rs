use serde::{Deserialize, Serialize};

use crate::utils::encode::encode_component;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppInput {
    pub phone: String,
    pub message: Option<String>,
}

/// Click-to-chat link: `https://wa.me/<digits>[?text=<message>]`.
///
/// wa.me only accepts the bare international number, so everything that is not an
/// ASCII digit (including the leading `+`) is dropped.
pub fn build_whatsapp_payload(input: &WhatsAppInput) -> String {
    let digits: String = input.phone.chars().filter(char::is_ascii_digit).collect();
    match input.message.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            format!("https://wa.me/{}?text={}", digits, encode_component(text))
        }
        _ => format!("https://wa.me/{}", digits),
    }
}
