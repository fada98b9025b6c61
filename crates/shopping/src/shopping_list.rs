use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::aggregation::IngredientAggregationService;
use crate::categorization::{CategorizationService, Category};
use crate::ingredient::{OccurrenceEntry, RecipeContext};
use crate::normalize::{NameNormalizer, RuleBasedNormalizer};

/// One line of the consolidated shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Category,
    pub recipes: BTreeSet<String>,
    pub raw_items: Vec<String>,
}

/// Items grouped by category, each group sorted by name
///
/// Categories iterate (and serialize) in taxonomy order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    categories: BTreeMap<Category, Vec<ShoppingListItem>>,
}

impl ShoppingList {
    fn from_items(items: Vec<ShoppingListItem>) -> Self {
        let mut categories: BTreeMap<Category, Vec<ShoppingListItem>> = BTreeMap::new();

        for item in items {
            categories.entry(item.category).or_default().push(item);
        }

        for items in categories.values_mut() {
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Self { categories }
    }

    /// Non-empty categories with their items
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[ShoppingListItem])> {
        self.categories
            .iter()
            .map(|(category, items)| (*category, items.as_slice()))
    }

    pub fn items(&self, category: Category) -> &[ShoppingListItem] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find(&self, name: &str) -> Option<&ShoppingListItem> {
        self.categories.values().flatten().find(|item| item.name == name)
    }

    /// Number of items across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Occurrences grouped by canonical name in first-seen order
#[derive(Debug, Default)]
struct Buckets {
    index: HashMap<String, usize>,
    buckets: Vec<(String, Vec<OccurrenceEntry>)>,
}

impl Buckets {
    fn push(&mut self, canonical_name: String, entry: OccurrenceEntry) {
        match self.index.get(&canonical_name) {
            Some(&position) => self.buckets[position].1.push(entry),
            None => {
                self.index.insert(canonical_name.clone(), self.buckets.len());
                self.buckets.push((canonical_name, vec![entry]));
            }
        }
    }

    fn into_inner(self) -> Vec<(String, Vec<OccurrenceEntry>)> {
        self.buckets
    }
}

/// Consolidates the ingredients of several recipes into one shopping list
///
/// Pure apart from whatever the normalizer does; every failure inside an
/// ingredient degrades that ingredient instead of aborting the list.
#[derive(Debug, Clone, Default)]
pub struct ShoppingListGenerator<N> {
    normalizer: N,
}

impl<N: NameNormalizer> ShoppingListGenerator<N> {
    pub fn new(normalizer: N) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn generate(&self, recipes: &[RecipeContext]) -> ShoppingList {
        tracing::debug!(recipes = recipes.len(), "generating shopping list");

        let mut buckets = Buckets::default();

        for recipe in recipes {
            for ingredient in &recipe.ingredients {
                let name = self
                    .normalizer
                    .normalize(&ingredient.name, ingredient.modifiers.as_deref());

                // Nothing to shop for
                if name.trim().is_empty() {
                    tracing::warn!(
                        recipe = %recipe.title,
                        ingredient = %ingredient.name,
                        "skipping ingredient with empty normalized name"
                    );
                    continue;
                }

                tracing::debug!(
                    recipe = %recipe.title,
                    original = %ingredient.name,
                    normalized = %name,
                    quantity = ?ingredient.quantity,
                    unit = ?ingredient.unit,
                    "normalized ingredient"
                );

                buckets.push(
                    name,
                    OccurrenceEntry::from_ingredient(ingredient, &recipe.title),
                );
            }
        }

        let items = buckets
            .into_inner()
            .into_iter()
            .map(|(name, entries)| {
                let aggregated = IngredientAggregationService::aggregate(&name, &entries);
                let category = CategorizationService::categorize(&name);

                tracing::debug!(
                    ingredient = %name,
                    occurrences = entries.len(),
                    quantity = ?aggregated.quantity,
                    unit = ?aggregated.unit,
                    category = category.as_str(),
                    "aggregated ingredient"
                );

                ShoppingListItem {
                    name,
                    quantity: aggregated.quantity,
                    unit: aggregated.unit,
                    category,
                    recipes: aggregated.recipes,
                    raw_items: entries.into_iter().map(|e| e.raw_text).collect(),
                }
            })
            .collect();

        let list = ShoppingList::from_items(items);
        tracing::info!(items = list.len(), "shopping list generated");

        list
    }
}

/// Generate a shopping list with the rule-based normalizer
pub fn generate_shopping_list(recipes: &[RecipeContext]) -> ShoppingList {
    ShoppingListGenerator::new(RuleBasedNormalizer).generate(recipes)
}
