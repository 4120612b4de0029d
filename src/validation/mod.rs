//! Per-tool validation. Every function either yields a normalized [`PayloadInput`]
//! or a field-indexed error map; bad input is data, never a panic.

pub mod rules;

use std::collections::BTreeMap;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::payload::{
    EmailInput, PayloadInput, PhoneInput, SmsInput, TextInput, UrlInput, VCardInput,
    WhatsAppInput, WifiEncryption, WifiInput,
};
use crate::structs::payload_request::{
    EmailForm, PayloadRequest, PhoneForm, SmsForm, TextForm, UrlForm, VCardForm, WhatsAppForm,
    WifiForm,
};

/// Field name → first user-facing error message for that field.
/// Keys are the snake_case JSON field names, so a missing vCard name is reported under `first_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                let message = err.message.as_deref().unwrap_or("Invalid value.");
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

fn check<T: Validate>(form: &T) -> FieldErrors {
    form.validate().err().map(FieldErrors::from).unwrap_or_default()
}

/// Trim a value and treat blank strings as absent.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate(request: PayloadRequest) -> Result<PayloadInput, FieldErrors> {
    match request {
        PayloadRequest::Url(form) => validate_url(form).map(PayloadInput::Url),
        PayloadRequest::Text(form) => validate_text(form).map(PayloadInput::Text),
        PayloadRequest::Wifi(form) => validate_wifi(form).map(PayloadInput::Wifi),
        PayloadRequest::Vcard(form) => validate_vcard(form).map(PayloadInput::VCard),
        PayloadRequest::Whatsapp(form) => validate_whatsapp(form).map(PayloadInput::WhatsApp),
        PayloadRequest::Email(form) => validate_email(form).map(PayloadInput::Email),
        PayloadRequest::Phone(form) => validate_phone(form).map(PayloadInput::Phone),
        PayloadRequest::Sms(form) => validate_sms(form).map(PayloadInput::Sms),
    }
}

pub fn validate_url(form: UrlForm) -> Result<UrlInput, FieldErrors> {
    let form = UrlForm {
        url: form.url.trim().to_string(),
    };
    check(&form).into_result(UrlInput { url: form.url })
}

pub fn validate_text(form: TextForm) -> Result<TextInput, FieldErrors> {
    check(&form).into_result(TextInput { text: form.text })
}

pub fn validate_wifi(form: WifiForm) -> Result<WifiInput, FieldErrors> {
    let form = WifiForm {
        ssid: form.ssid.trim().to_string(),
        ..form
    };
    let mut errors = check(&form);
    if form.encryption != WifiEncryption::NoPass && form.password.trim().is_empty() {
        errors.add("password", "Password is required for secured networks.");
    }
    errors.into_result(WifiInput {
        ssid: form.ssid,
        password: form.password,
        encryption: form.encryption,
        hidden: form.hidden,
    })
}

pub fn validate_vcard(form: VCardForm) -> Result<VCardInput, FieldErrors> {
    let form = VCardForm {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        phone: present(form.phone),
        email: present(form.email),
        company: present(form.company),
        title: present(form.title),
        website: present(form.website),
        address: present(form.address),
        notes: present(form.notes),
    };
    let mut errors = check(&form);
    if form.first_name.is_empty() && form.last_name.is_empty() {
        errors.add("first_name", "Add a first or last name.");
    }
    errors.into_result(VCardInput {
        first_name: form.first_name,
        last_name: form.last_name,
        phone: form.phone,
        email: form.email,
        company: form.company,
        title: form.title,
        website: form.website,
        address: form.address,
        notes: form.notes,
    })
}

pub fn validate_whatsapp(form: WhatsAppForm) -> Result<WhatsAppInput, FieldErrors> {
    let form = WhatsAppForm {
        phone: form.phone.trim().to_string(),
        message: present(form.message),
    };
    check(&form).into_result(WhatsAppInput {
        phone: form.phone,
        message: form.message,
    })
}

pub fn validate_email(form: EmailForm) -> Result<EmailInput, FieldErrors> {
    let form = EmailForm {
        email: form.email.trim().to_string(),
        subject: present(form.subject),
        body: present(form.body),
    };
    check(&form).into_result(EmailInput {
        email: form.email,
        subject: form.subject,
        body: form.body,
    })
}

pub fn validate_phone(form: PhoneForm) -> Result<PhoneInput, FieldErrors> {
    let form = PhoneForm {
        phone: form.phone.trim().to_string(),
    };
    check(&form).into_result(PhoneInput { phone: form.phone })
}

pub fn validate_sms(form: SmsForm) -> Result<SmsInput, FieldErrors> {
    let form = SmsForm {
        phone: form.phone.trim().to_string(),
        message: present(form.message),
    };
    check(&form).into_result(SmsInput {
        phone: form.phone,
        message: form.message,
    })
}
