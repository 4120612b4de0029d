use serde::{Deserialize, Serialize};

use super::escape::escape_vcard_value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VCardInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Build a vCard 3.0 card. Optional properties are emitted only when present and
/// non-empty; every value is escaped exactly once.
pub fn build_vcard_payload(input: &VCardInput) -> String {
    let first_name = input.first_name.trim();
    let last_name = input.last_name.trim();
    let full_name = [first_name, last_name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
    lines.push(format!(
        "N:{};{};;;",
        escape_vcard_value(last_name),
        escape_vcard_value(first_name)
    ));
    if !full_name.is_empty() {
        lines.push(format!("FN:{}", escape_vcard_value(&full_name)));
    }

    let optional = [
        ("ORG:", &input.company, ""),
        ("TITLE:", &input.title, ""),
        ("TEL;TYPE=WORK,VOICE:", &input.phone, ""),
        ("EMAIL:", &input.email, ""),
        ("URL:", &input.website, ""),
        ("ADR;TYPE=WORK:;;", &input.address, ";;;;"),
        ("NOTE:", &input.notes, ""),
    ];
    for (prefix, value, suffix) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("{}{}{}", prefix, escape_vcard_value(value), suffix));
        }
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}
