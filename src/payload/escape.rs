/// Escape a value for the `WIFI:` micro-format.
///
/// Backslash, semicolon, comma and colon are prefixed with a backslash in a single
/// left-to-right pass, so an escaped backslash is never escaped again.
pub fn escape_wifi_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\\' | ';' | ',' | ':' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape a vCard 3.0 property value: newlines, commas and semicolons.
pub fn escape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            _ => out.push(c),
        }
    }
    out
}
