//! Generative service endpoint URLs

/// API version prefix
pub const API_VERSION: &str = "v1beta";

/// `generateContent` URL for `model`, authenticated with `api_key`
pub fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/{}/models/{}:generateContent?key={}",
        base_url.trim_end_matches('/'),
        API_VERSION,
        urlencoding::encode(model),
        urlencoding::encode(api_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("https://example.com/", "gemini-3-flash-preview", "abc"),
            "https://example.com/v1beta/models/gemini-3-flash-preview:generateContent?key=abc"
        );
    }

    #[test]
    fn test_key_is_encoded() {
        let url = generate_content_url("http://localhost", "m", "a b&c");
        assert!(url.ends_with("key=a%20b%26c"));
    }
}
