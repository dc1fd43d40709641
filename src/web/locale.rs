use crate::constants::is_supported_locale;
use axum::http::{header, HeaderMap};

/// Picks the response locale: an explicit `?lang=` wins, then the
/// highest-weighted supported `Accept-Language` tag, then the default.
pub fn negotiate(requested: Option<&str>, headers: &HeaderMap, default_locale: &str) -> String {
    if let Some(lang) = requested.map(|l| l.trim().to_lowercase()) {
        if is_supported_locale(&lang) {
            return lang;
        }
    }

    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(from_accept_language)
        .unwrap_or_else(|| default_locale.to_string())
}

fn from_accept_language(header: &str) -> Option<String> {
    let mut candidates: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            let primary = tag.split('-').next()?.to_lowercase();
            let weight = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (weight > 0.0).then_some((primary, weight))
        })
        .collect();

    // Stable sort keeps header order among equal weights
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .map(|(lang, _)| lang)
        .find(|lang| is_supported_locale(lang))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(accept: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(accept).unwrap());
        headers
    }

    #[test]
    fn test_query_parameter_wins() {
        assert_eq!(negotiate(Some("EN"), &headers("de-AT"), "de"), "en");
    }

    #[test]
    fn test_unsupported_query_parameter_is_ignored() {
        assert_eq!(negotiate(Some("fr"), &headers("en-GB,en;q=0.8"), "de"), "en");
        assert_eq!(negotiate(Some("fr"), &HeaderMap::new(), "de"), "de");
    }

    #[test]
    fn test_accept_language_weights() {
        assert_eq!(negotiate(None, &headers("fr;q=1.0, de;q=0.5, en;q=0.9"), "de"), "en");
        assert_eq!(negotiate(None, &headers("fr, it"), "de"), "de");
        assert_eq!(negotiate(None, &headers("en;q=0"), "de"), "de");
    }
}
