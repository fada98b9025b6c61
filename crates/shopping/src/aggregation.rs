use std::collections::{BTreeMap, BTreeSet};

use crate::ingredient::OccurrenceEntry;
use crate::quantity::round_up;
use crate::units::{self, ITEMS, OUNCE};

/// Combined quantity for one bucket of occurrences
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedQuantity {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub recipes: BTreeSet<String>,
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that converts every occurrence of one canonical
/// ingredient into a base unit and sums the quantities:
/// - "flour 2 cups" + "flour 1 cup" = "flour 3 cup"
/// - "butter 1 cup" + "butter 4 oz" = "butter 12 ounce" (weight bridge)
/// - "garlic 2 cloves" + "garlic 1 tsp" = one of the two, whichever unit has
///   more occurrences (incompatible units are not summed)
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate all occurrences of `canonical_name`
    ///
    /// The reporting unit is the base unit with the most contributing
    /// entries; equal counts go to the lexicographically smallest unit name so
    /// the result does not depend on input order.
    pub fn aggregate(canonical_name: &str, entries: &[OccurrenceEntry]) -> AggregatedQuantity {
        let recipes: BTreeSet<String> = entries.iter().map(|e| e.recipe_title.clone()).collect();

        let measured: Vec<(f64, String)> =
            entries.iter().filter_map(OccurrenceEntry::measured).collect();

        let bridge = Self::weight_bridge(canonical_name, &measured);
        let mut by_base_unit: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for (quantity, unit) in measured {
            let (base_unit, converted) = match (bridge, units::conversion_for(&unit)) {
                (Some(cups_to_oz), _) if units::is_cup(&unit) => {
                    tracing::debug!(
                        ingredient = canonical_name,
                        cups = quantity,
                        ounces = quantity * cups_to_oz,
                        "converting cups to ounces"
                    );
                    (OUNCE.to_string(), quantity * cups_to_oz)
                }
                (_, Some(rule)) => (rule.base_unit.to_string(), quantity * rule.factor),
                // Unknown units are kept verbatim
                (_, None) => (unit, quantity),
            };

            by_base_unit.entry(base_unit).or_default().push(converted);
        }

        // max_by_key keeps the last maximum, so walking in reverse lets the
        // smallest unit name win a tie
        let reporting = by_base_unit
            .into_iter()
            .rev()
            .max_by_key(|(_, quantities)| quantities.len());

        let (quantity, unit) = match reporting {
            Some((unit, quantities)) => (Some(round_up(Self::sum(quantities))), Some(unit)),
            None if entries.is_empty() => (None, None),
            None => (Some(entries.len() as f64), Some(ITEMS.to_string())),
        };

        AggregatedQuantity {
            quantity,
            unit,
            recipes,
        }
    }

    /// Cups → ounces factor when the bucket mixes cups with ounces/pounds
    fn weight_bridge(canonical_name: &str, measured: &[(f64, String)]) -> Option<f64> {
        let factor = units::cups_to_ounces(canonical_name)?;

        let has_cup = measured.iter().any(|(_, unit)| units::is_cup(unit));
        let has_weight = measured.iter().any(|(_, unit)| units::is_ounce_family(unit));

        (has_cup && has_weight).then_some(factor)
    }

    /// Order-independent sum
    fn sum(mut quantities: Vec<f64>) -> f64 {
        quantities.sort_by(f64::total_cmp);
        quantities.into_iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: Option<f64>, unit: Option<&str>, recipe: &str) -> OccurrenceEntry {
        OccurrenceEntry {
            quantity,
            unit: unit.map(str::to_string),
            raw_text: format!(
                "{} {}",
                quantity.map(|q| q.to_string()).unwrap_or_default(),
                unit.unwrap_or_default()
            ),
            recipe_title: recipe.to_string(),
        }
    }

    #[test]
    fn test_aggregate_same_unit() {
        let entries = vec![
            entry(Some(2.0), Some("cups"), "Bread"),
            entry(Some(1.0), Some("cup"), "Cake"),
        ];

        let result = IngredientAggregationService::aggregate("flour", &entries);

        assert_eq!(result.quantity, Some(3.0));
        assert_eq!(result.unit.as_deref(), Some("cup"));
        assert_eq!(result.recipes.len(), 2);
    }

    #[test]
    fn test_aggregate_converts_within_family() {
        let entries = vec![
            entry(Some(1.0), Some("pint"), "Soup"),
            entry(Some(1.0), Some("cup"), "Stew"),
        ];

        let result = IngredientAggregationService::aggregate("stock", &entries);

        assert_eq!(result.quantity, Some(3.0));
        assert_eq!(result.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_aggregate_weight_bridge() {
        let entries = vec![
            entry(Some(1.0), Some("cup"), "Cookies"),
            entry(Some(4.0), Some("oz"), "Cake"),
        ];

        let result = IngredientAggregationService::aggregate("butter", &entries);

        assert_eq!(result.quantity, Some(12.0));
        assert_eq!(result.unit.as_deref(), Some("ounce"));
    }

    #[test]
    fn test_weight_bridge_counts_pounds() {
        let entries = vec![
            entry(Some(2.0), Some("cups"), "Bread"),
            entry(Some(1.0), Some("lb"), "Pizza"),
        ];

        let result = IngredientAggregationService::aggregate("flour", &entries);

        // 2 * 4.5 + 16
        assert_eq!(result.quantity, Some(25.0));
        assert_eq!(result.unit.as_deref(), Some("ounce"));
    }

    #[test]
    fn test_no_bridge_without_weight_entry() {
        let entries = vec![
            entry(Some(2.0), Some("cups"), "Bread"),
            entry(Some(0.5), Some("cup"), "Cake"),
        ];

        let result = IngredientAggregationService::aggregate("flour", &entries);

        assert_eq!(result.quantity, Some(3.0));
        assert_eq!(result.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_no_bridge_for_unregistered_ingredient() {
        let entries = vec![
            entry(Some(1.0), Some("cup"), "Soup"),
            entry(Some(4.0), Some("oz"), "Salad"),
        ];

        let result = IngredientAggregationService::aggregate("cheese", &entries);

        // one entry each: tie resolved to "cup" < "ounce"
        assert_eq!(result.quantity, Some(1.0));
        assert_eq!(result.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_reporting_unit_is_most_entries_not_largest_total() {
        let entries = vec![
            entry(Some(1.0), Some("tsp"), "A"),
            entry(Some(1.0), Some("tsp"), "B"),
            entry(Some(3.0), Some("cups"), "C"),
        ];

        let result = IngredientAggregationService::aggregate("cumin", &entries);

        assert_eq!(result.quantity, Some(2.0));
        assert_eq!(result.unit.as_deref(), Some("teaspoon"));
    }

    #[test]
    fn test_tie_break_ignores_input_order() {
        let forward = vec![
            entry(Some(2.0), Some("tbsp"), "A"),
            entry(Some(1.0), Some("tsp"), "B"),
        ];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();

        let a = IngredientAggregationService::aggregate("garlic", &forward);
        let b = IngredientAggregationService::aggregate("garlic", &backward);

        assert_eq!(a, b);
        assert_eq!(a.unit.as_deref(), Some("tablespoon"));
    }

    #[test]
    fn test_unknown_unit_kept_verbatim() {
        let entries = vec![
            entry(Some(2.0), Some("Cloves"), "A"),
            entry(Some(1.0), Some("clove"), "B"),
            entry(Some(1.0), Some("cloves"), "C"),
        ];

        let result = IngredientAggregationService::aggregate("garlic", &entries);

        assert_eq!(result.quantity, Some(3.0));
        assert_eq!(result.unit.as_deref(), Some("cloves"));
    }

    #[test]
    fn test_missing_quantities_counted_as_items() {
        let entries = vec![
            entry(None, None, "A"),
            entry(None, Some("pinch"), "B"),
            entry(Some(2.0), None, "A"),
        ];

        let result = IngredientAggregationService::aggregate("salt", &entries);

        assert_eq!(result.quantity, Some(3.0));
        assert_eq!(result.unit.as_deref(), Some("items"));
        assert_eq!(result.recipes.len(), 2);
    }

    #[test]
    fn test_measured_entries_win_over_missing() {
        let entries = vec![
            entry(None, None, "A"),
            entry(Some(1.0), Some("tbsp"), "B"),
        ];

        let result = IngredientAggregationService::aggregate("olive oil", &entries);

        assert_eq!(result.quantity, Some(1.0));
        assert_eq!(result.unit.as_deref(), Some("tablespoon"));
        assert!(result.recipes.contains("A"));
    }

    #[test]
    fn test_empty_bucket() {
        let result = IngredientAggregationService::aggregate("anything", &[]);

        assert_eq!(result.quantity, None);
        assert_eq!(result.unit, None);
        assert!(result.recipes.is_empty());
    }

    #[test]
    fn test_small_quantities_round_to_two_decimals() {
        let entries = vec![
            entry(Some(1.0 / 3.0), Some("cup"), "A"),
            entry(Some(1.0 / 3.0), Some("cup"), "B"),
        ];

        let result = IngredientAggregationService::aggregate("sugar", &entries);

        assert_eq!(result.quantity, Some(0.67));
    }
}
