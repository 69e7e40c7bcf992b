//! Request language resolution.
//!
//! A pure fallback chain, first non-empty source wins:
//! session language → user `custom_params.language` → request payload
//! `custom_params.language` → `Accept-Language` header → default.

use serde_json::{Map, Value};

/// Resolve the language for one request.
pub fn resolve_language(
    session_language: Option<&str>,
    user_params: &Map<String, Value>,
    payload_params: Option<&Map<String, Value>>,
    accept_language: Option<&str>,
    default: &str,
) -> String {
    if let Some(lang) = non_empty(session_language) {
        return lang.to_string();
    }
    if let Some(lang) = params_language(Some(user_params)) {
        return lang;
    }
    if let Some(lang) = params_language(payload_params) {
        return lang;
    }
    if let Some(lang) = accept_language.and_then(normalize_accept_language) {
        return lang;
    }
    default.to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn params_language(params: Option<&Map<String, Value>>) -> Option<String> {
    params
        .and_then(|p| p.get("language"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// First language tag of an `Accept-Language` header, quality
/// parameters stripped, `_` normalized to `-`.
fn normalize_accept_language(header: &str) -> Option<String> {
    let first = header.split(',').next()?;
    let tag = first.split(';').next()?.trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(language: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("language".into(), json!(language));
        map
    }

    #[test]
    fn session_language_wins() {
        let user = params("de-DE");
        let got = resolve_language(Some("pl-PL"), &user, None, Some("fr-FR"), "en-US");
        assert_eq!(got, "pl-PL");
    }

    #[test]
    fn user_params_beat_payload_and_header() {
        let user = params("de-DE");
        let payload = params("it-IT");
        let got = resolve_language(None, &user, Some(&payload), Some("fr-FR"), "en-US");
        assert_eq!(got, "de-DE");
    }

    #[test]
    fn payload_beats_header() {
        let user = Map::new();
        let payload = params("it-IT");
        let got = resolve_language(None, &user, Some(&payload), Some("fr-FR"), "en-US");
        assert_eq!(got, "it-IT");
    }

    #[test]
    fn header_underscore_is_normalized() {
        let user = Map::new();
        let got = resolve_language(None, &user, None, Some("pt_BR"), "en-US");
        assert_eq!(got, "pt-BR");
    }

    #[test]
    fn header_quality_parameters_are_stripped() {
        let user = Map::new();
        let got = resolve_language(None, &user, None, Some("da, en-GB;q=0.8, en;q=0.7"), "en-US");
        assert_eq!(got, "da");
    }

    #[test]
    fn empty_sources_fall_through_to_default() {
        let user = Map::new();
        let got = resolve_language(Some("  "), &user, None, None, "en-US");
        assert_eq!(got, "en-US");
    }

    #[test]
    fn wildcard_header_is_ignored() {
        let user = Map::new();
        let got = resolve_language(None, &user, None, Some("*"), "en-US");
        assert_eq!(got, "en-US");
    }
}
