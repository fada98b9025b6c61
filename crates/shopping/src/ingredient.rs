use serde::{Deserialize, Deserializer, Serialize};

use crate::quantity::deserialize_lenient;

/// Structured ingredient as produced by the ingredient text parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub raw_text: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_unit")]
    pub unit: Option<String>,
    pub name: String,
    #[serde(default)]
    pub modifiers: Option<String>,
}

impl ParsedIngredient {
    pub fn new(raw_text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            quantity: None,
            unit: None,
            name: name.into(),
            modifiers: None,
        }
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        self.unit = (!unit.trim().is_empty()).then_some(unit);
        self
    }

    pub fn modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = Some(modifiers.into());
        self
    }
}

/// A recipe as seen by the shopping list engine
///
/// Ingestion also produces servings, timing, image and instructions; those
/// fields are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeContext {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<ParsedIngredient>,
}

impl RecipeContext {
    pub fn new(title: impl Into<String>, ingredients: Vec<ParsedIngredient>) -> Self {
        Self {
            title: title.into(),
            ingredients,
        }
    }
}

/// One (recipe, ingredient) pair filed under a canonical name
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceEntry {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub raw_text: String,
    pub recipe_title: String,
}

impl OccurrenceEntry {
    pub fn from_ingredient(ingredient: &ParsedIngredient, recipe_title: &str) -> Self {
        Self {
            quantity: ingredient.quantity,
            unit: ingredient.unit.clone(),
            raw_text: ingredient.raw_text.clone(),
            recipe_title: recipe_title.to_string(),
        }
    }

    /// Quantity and lowercased unit, when both are usable
    pub fn measured(&self) -> Option<(f64, String)> {
        let quantity = self.quantity.filter(|q| q.is_finite() && *q >= 0.0)?;
        let unit = self.unit.as_deref()?.trim().to_lowercase();

        if unit.is_empty() {
            return None;
        }

        Some((quantity, unit))
    }
}

fn deserialize_unit<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let unit = Option::<String>::deserialize(deserializer)?;

    Ok(unit.filter(|u| !u.trim().is_empty()))
}
