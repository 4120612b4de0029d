use std::fmt;

use serde::{Deserialize, Serialize};

use super::escape::escape_wifi_value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInput {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

/// `WIFI:T:<enc>;S:<ssid>;P:<password>;H:<hidden>;;`
///
/// The password field is left empty for open networks.
pub fn build_wifi_payload(input: &WifiInput) -> String {
    let ssid = escape_wifi_value(input.ssid.trim());
    let password = match input.encryption {
        WifiEncryption::NoPass => String::new(),
        _ => escape_wifi_value(&input.password),
    };
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        input.encryption, ssid, password, input.hidden
    )
}
