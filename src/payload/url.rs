use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInput {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// A URL payload is the trimmed URL itself.
pub fn build_url_payload(input: &UrlInput) -> String {
    input.url.trim().to_string()
}

/// Text is embedded verbatim, surrounding whitespace included.
pub fn build_text_payload(input: &TextInput) -> String {
    input.text.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_payload_is_trimmed() {
        let input = UrlInput {
            url: " https://example.com ".to_string(),
        };
        assert_eq!(build_url_payload(&input), "https://example.com");
    }

    #[test]
    fn url_payload_only_strips_outer_whitespace() {
        let input = UrlInput {
            url: "\t https://example.com/a b?q=1 \n".to_string(),
        };
        assert_eq!(build_url_payload(&input), "https://example.com/a b?q=1");
    }

    #[test]
    fn text_payload_is_kept_as_is() {
        let input = TextInput {
            text: "  Hello world \n".to_string(),
        };
        assert_eq!(build_text_payload(&input), "  Hello world \n");
    }
}
