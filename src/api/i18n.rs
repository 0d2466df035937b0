use serde_json::Value;

/// Resolve a localized field. Rows carry a `traducciones` JSONB map shaped
/// `{"en": {"titulo": "...", ...}, ...}`; the base columns hold the
/// default-locale text. Resolution order: translation entry, base field,
/// literal field key.
pub fn resolve_field(
    translations: &Value,
    lang: &str,
    field: &str,
    base: Option<&str>,
) -> String {
    if let Some(text) = translations
        .get(lang)
        .and_then(|entry| entry.get(field))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    {
        return text.to_string();
    }

    match base {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_translation_entry() {
        let tr = json!({"en": {"titulo": "Beach house"}});
        assert_eq!(
            resolve_field(&tr, "en", "titulo", Some("Casa de playa")),
            "Beach house"
        );
    }

    #[test]
    fn falls_back_to_base_field() {
        let tr = json!({"en": {"descripcion": "..."}});
        assert_eq!(
            resolve_field(&tr, "en", "titulo", Some("Casa de playa")),
            "Casa de playa"
        );
        assert_eq!(
            resolve_field(&json!({}), "fr", "titulo", Some("Casa de playa")),
            "Casa de playa"
        );
    }

    #[test]
    fn falls_back_to_literal_key() {
        assert_eq!(resolve_field(&json!({}), "en", "titulo", None), "titulo");
        assert_eq!(resolve_field(&json!({}), "en", "titulo", Some("")), "titulo");
    }

    #[test]
    fn empty_translation_is_skipped() {
        let tr = json!({"en": {"titulo": ""}});
        assert_eq!(resolve_field(&tr, "en", "titulo", Some("Casa")), "Casa");
    }
}
