/// Conversion of a unit alias into its family's base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversionRule {
    pub base_unit: &'static str,
    pub factor: f64,
}

const fn rule(base_unit: &'static str, factor: f64) -> UnitConversionRule {
    UnitConversionRule { base_unit, factor }
}

pub const TEASPOON: &str = "teaspoon";
pub const TABLESPOON: &str = "tablespoon";
pub const CUP: &str = "cup";
pub const MILLILITER: &str = "ml";
pub const OUNCE: &str = "ounce";
pub const GRAM: &str = "gram";

/// Reporting unit used when a bucket has nothing measurable
pub const ITEMS: &str = "items";

/// Unit alias table (alias → base unit, factor)
///
/// Volume and weight families never mix here; see [`INGREDIENT_WEIGHT_RULES`].
pub static UNIT_CONVERSIONS: &[(&str, UnitConversionRule)] = &[
    // Volume
    ("teaspoon", rule(TEASPOON, 1.0)),
    ("tsp", rule(TEASPOON, 1.0)),
    ("tablespoon", rule(TABLESPOON, 1.0)),
    ("tbsp", rule(TABLESPOON, 1.0)),
    ("cup", rule(CUP, 1.0)),
    ("cups", rule(CUP, 1.0)),
    ("pint", rule(CUP, 2.0)),
    ("pints", rule(CUP, 2.0)),
    ("quart", rule(CUP, 4.0)),
    ("quarts", rule(CUP, 4.0)),
    ("gallon", rule(CUP, 16.0)),
    ("gallons", rule(CUP, 16.0)),
    ("ml", rule(MILLILITER, 1.0)),
    ("milliliter", rule(MILLILITER, 1.0)),
    ("milliliters", rule(MILLILITER, 1.0)),
    ("l", rule(MILLILITER, 1000.0)),
    ("liter", rule(MILLILITER, 1000.0)),
    ("liters", rule(MILLILITER, 1000.0)),
    // Weight
    ("ounce", rule(OUNCE, 1.0)),
    ("ounces", rule(OUNCE, 1.0)),
    ("oz", rule(OUNCE, 1.0)),
    ("pound", rule(OUNCE, 16.0)),
    ("pounds", rule(OUNCE, 16.0)),
    ("lb", rule(OUNCE, 16.0)),
    ("lbs", rule(OUNCE, 16.0)),
    ("gram", rule(GRAM, 1.0)),
    ("grams", rule(GRAM, 1.0)),
    ("g", rule(GRAM, 1.0)),
    ("kilogram", rule(GRAM, 1000.0)),
    ("kilograms", rule(GRAM, 1000.0)),
    ("kg", rule(GRAM, 1000.0)),
];

/// Cups → ounces for ingredients whose recipes mix volume and weight
pub static INGREDIENT_WEIGHT_RULES: &[(&str, f64)] = &[
    ("flour", 4.5),
    ("sugar", 7.0),
    // 2 sticks
    ("butter", 8.0),
];

/// Look up an alias; `unit` must already be trimmed and lowercased
pub fn conversion_for(unit: &str) -> Option<UnitConversionRule> {
    UNIT_CONVERSIONS
        .iter()
        .find(|(alias, _)| *alias == unit)
        .map(|(_, rule)| *rule)
}

/// Cups → ounces factor for a canonical ingredient name
pub fn cups_to_ounces(canonical_name: &str) -> Option<f64> {
    INGREDIENT_WEIGHT_RULES
        .iter()
        .find(|(name, _)| *name == canonical_name)
        .map(|(_, factor)| *factor)
}

pub fn is_cup(unit: &str) -> bool {
    matches!(unit, "cup" | "cups")
}

/// Ounce and pound aliases
pub fn is_ounce_family(unit: &str) -> bool {
    conversion_for(unit).is_some_and(|rule| rule.base_unit == OUNCE)
}
