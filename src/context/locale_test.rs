// ABOUTME: Tests for language tags and the localized canned-string catalog.

use super::locale::Language;

#[test]
fn test_tag_normalization() {
    assert_eq!(Language::new("es_MX").tag(), "es-mx");
    assert_eq!(Language::new(" FR ").tag(), "fr");
    assert_eq!(Language::new(""), Language::english());
}

#[test]
fn test_primary_subtag() {
    assert_eq!(Language::new("pt-BR").primary(), "pt");
    assert_eq!(Language::new("de").primary(), "de");
}

#[test]
fn test_english_catalog() {
    let en = Language::english();
    assert_eq!(
        en.localize("welcome"),
        Some("Welcome! How can I assist you today?")
    );
    assert_eq!(en.localize("help"), Some("I'm here to help. What do you need?"));
}

#[test]
fn test_regional_variant_uses_primary_translation() {
    let es = Language::new("es-AR");
    assert_eq!(
        es.localize("welcome"),
        Some("¡Bienvenido! ¿En qué puedo ayudarte hoy?")
    );
}

#[test]
fn test_untranslated_language_falls_back_to_english() {
    let ja = Language::new("ja");
    assert_eq!(ja.localize("help"), Language::english().localize("help"));
}

#[test]
fn test_unknown_key() {
    assert_eq!(Language::english().localize("goodbye"), None);
    assert_eq!(Language::new("fr").localize(""), None);
}

#[test]
fn test_serde_round_trips_as_plain_tag() {
    let json = serde_json::to_string(&Language::new("en_GB")).unwrap();
    assert_eq!(json, "\"en-gb\"");
    let lang: Language = serde_json::from_str("\"DE\"").unwrap();
    assert_eq!(lang.tag(), "de");
}
