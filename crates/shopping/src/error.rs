use thiserror::Error;

/// Why a semantic normalizer could not produce a name
///
/// Never reaches callers of the shopping list engine; [`crate::FallbackNormalizer`]
/// turns every variant into a rule-based result.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Normalizer unavailable: {0}")]
    Unavailable(String),

    #[error("Normalizer returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed normalizer output: {0}")]
    Malformed(String),
}
