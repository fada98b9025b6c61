use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::NormalizeError;

/// Reduces an ingredient name (plus optional modifier text) to the key used
/// to match the same ingredient across recipes
///
/// Implementations never fail; an empty string means "nothing to shop for".
pub trait NameNormalizer {
    fn normalize(&self, name: &str, modifiers: Option<&str>) -> String;
}

impl<N: NameNormalizer + ?Sized> NameNormalizer for &N {
    fn normalize(&self, name: &str, modifiers: Option<&str>) -> String {
        (**self).normalize(name, modifiers)
    }
}

impl<N: NameNormalizer + ?Sized> NameNormalizer for Box<N> {
    fn normalize(&self, name: &str, modifiers: Option<&str>) -> String {
        (**self).normalize(name, modifiers)
    }
}

/// A normalizer backed by something that can fail (a model, a service)
///
/// Only usable through [`FallbackNormalizer`].
pub trait SemanticNormalizer {
    fn try_normalize(&self, name: &str, modifiers: Option<&str>) -> Result<String, NormalizeError>;
}

/// Which normalizer the application runs with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerBackend {
    #[default]
    Rules,
    Ollama,
}

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

// "minus 2 tablespoons cake flour" → "cake flour"
static MINUS_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*minus\s+[\d\s/¼½¾⅓⅔⅛⅜⅝⅞]+\s*\w+\s+").unwrap()
});

// Applied in this order; a later pattern may only match once earlier ones
// have stripped the surrounding text.
static NOTES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r",?\s*\bplus (?:additional|more|extra)\b.*",
        r",?\s*\bdivided\b",
        r",?\s*\bto taste\b",
        r",?\s*\bas needed\b",
        r",?\s*\boptional\b",
        r",?\s*\bfor (?:dusting|garnish|serving|greasing|topping|brushing)\b",
        r",?\s*\bif (?:needed|desired)\b",
        r",?\s*\bor (?:more|less)\b",
        r",?\s*\bat room temperature\b",
        r",?\s*\bsoftened\b",
        r",?\s*\bcold\b",
        r",?\s*\bwarm\b",
        r",?\s*\bthawed\b",
        r",?\s*\bcut into\b.*",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static PREPARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:chopped|diced|minced|sliced|grated|crushed|peeled|fresh|dried|frozen)\b")
        .unwrap()
});

// Flour type, sugar type and onion colour change what you buy and are
// deliberately absent.
static MODIFIERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bextra[\s-]?virgin\b", ""),
        (r"\bvirgin\b", ""),
        (r"\bunsalted\b", ""),
        (r"\bsalted\b", ""),
        (r"\blarge\b", ""),
        (r"\bmedium\b", ""),
        (r"\bsmall\b", ""),
        (r"\bjumbo\b", ""),
        (r"\broma\b", ""),
        (r"\bcherry\b", ""),
        (r"\bgrape\b", ""),
        (r"\bbeefsteak\b", ""),
        (r"\bkosher\b", ""),
        (r"\bsea\s+salt\b", "salt"),
        // must not touch "tablespoon"
        (r"\btable\s+salt\b", "salt"),
        (r"\bcoarse\b", ""),
        (r"\bfine\b", ""),
        (r"\bground\b", ""),
        (r"\bcracked\b", ""),
        (r"\bfreshly\b", ""),
        (r"\bnatural\b", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Deterministic, always-available normalizer
///
/// Modifier text is not consulted; only the name is reduced.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedNormalizer;

impl RuleBasedNormalizer {
    pub fn normalize_name(name: &str) -> String {
        let mut name = name.to_lowercase().trim().to_string();

        name = PARENTHETICAL.replace_all(&name, "").trim().to_string();
        name = MINUS_CLAUSE.replace(&name, "").trim().to_string();

        for pattern in NOTES.iter() {
            name = pattern.replace_all(&name, "").trim().to_string();
        }

        name = PREPARATION.replace_all(&name, "").trim().to_string();

        for (pattern, replacement) in MODIFIERS.iter() {
            name = pattern.replace_all(&name, *replacement).trim().to_string();
        }

        tidy(&depluralize(&tidy(&name)))
    }
}

impl NameNormalizer for RuleBasedNormalizer {
    fn normalize(&self, name: &str, _modifiers: Option<&str>) -> String {
        Self::normalize_name(name)
    }
}

/// Collapse whitespace runs and drop commas left dangling by removals
fn tidy(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn depluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("es") {
        stem.to_string()
    } else if name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

/// Runs a [`SemanticNormalizer`] and falls back to the rule set for any
/// ingredient it cannot handle
#[derive(Debug, Clone)]
pub struct FallbackNormalizer<S> {
    semantic: S,
}

impl<S: SemanticNormalizer> FallbackNormalizer<S> {
    pub fn new(semantic: S) -> Self {
        Self { semantic }
    }

    pub fn inner(&self) -> &S {
        &self.semantic
    }
}

impl<S: SemanticNormalizer> NameNormalizer for FallbackNormalizer<S> {
    fn normalize(&self, name: &str, modifiers: Option<&str>) -> String {
        match self.semantic.try_normalize(name, modifiers) {
            Ok(normalized) => normalized,
            Err(err) => {
                let fallback = RuleBasedNormalizer::normalize_name(name);
                tracing::warn!(
                    ingredient = name,
                    fallback = %fallback,
                    error = %err,
                    "semantic normalization failed, using rule-based name"
                );
                fallback
            }
        }
    }
}
