pub mod aggregation;
pub mod categorization;
pub mod error;
pub mod ingredient;
pub mod normalize;
pub mod quantity;
pub mod semantic;
pub mod shopping_list;
pub mod units;

// Re-export commonly used types
pub use aggregation::{AggregatedQuantity, IngredientAggregationService};
pub use categorization::{CategorizationService, Category};
pub use error::NormalizeError;
pub use ingredient::{OccurrenceEntry, ParsedIngredient, RecipeContext};
pub use normalize::{
    FallbackNormalizer, NameNormalizer, NormalizerBackend, RuleBasedNormalizer, SemanticNormalizer,
};
pub use semantic::{OllamaNormalizer, OllamaSettings};
pub use shopping_list::{
    generate_shopping_list, ShoppingList, ShoppingListGenerator, ShoppingListItem,
};

/// Build the normalizer selected by configuration
///
/// An Ollama client that cannot be constructed degrades to the rule set.
pub fn build_normalizer(
    backend: NormalizerBackend,
    ollama: OllamaSettings,
) -> Box<dyn NameNormalizer + Send + Sync> {
    match backend {
        NormalizerBackend::Rules => Box::new(RuleBasedNormalizer),
        NormalizerBackend::Ollama => match OllamaNormalizer::new(ollama) {
            Ok(client) => {
                tracing::info!(
                    host = %client.settings().host,
                    model = %client.settings().model,
                    "using ollama ingredient normalizer"
                );
                Box::new(FallbackNormalizer::new(client))
            }
            Err(err) => {
                tracing::warn!(error = %err, "ollama normalizer unavailable, using rules");
                Box::new(RuleBasedNormalizer)
            }
        },
    }
}
