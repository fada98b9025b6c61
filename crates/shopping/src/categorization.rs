use serde::{Deserialize, Serialize};

/// Category for grocery store organization
///
/// Declaration order is the taxonomy order: it decides which category wins
/// when a name matches keywords of several, and how a list is printed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Pantry,
    Spices,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Meat => "meat",
            Category::Seafood => "seafood",
            Category::Dairy => "dairy",
            Category::Pantry => "pantry",
            Category::Spices => "spices",
            Category::Other => "other",
        }
    }
}

/// Keyword substrings per category, in taxonomy order
pub static CATEGORY_TAXONOMY: &[(Category, &[&str])] = &[
    (
        Category::Produce,
        &[
            "onion",
            "garlic",
            "tomato",
            "potato",
            "carrot",
            "celery",
            "bell pepper",
            "pepper",
            "lettuce",
            "spinach",
            "kale",
            "broccoli",
            "cauliflower",
            "zucchini",
            "cucumber",
            "lemon",
            "lime",
            "apple",
            "banana",
            "avocado",
            "ginger",
            "cilantro",
            "parsley",
            "basil",
            "thyme",
            "rosemary",
            "mushroom",
        ],
    ),
    (
        Category::Meat,
        &[
            "chicken",
            "beef",
            "pork",
            "lamb",
            "turkey",
            "bacon",
            "sausage",
            "ground beef",
            "ground turkey",
            "steak",
        ],
    ),
    (
        Category::Seafood,
        &[
            "fish", "salmon", "tuna", "shrimp", "cod", "tilapia", "mussels", "clams", "crab",
        ],
    ),
    (
        Category::Dairy,
        &[
            "milk",
            "cream",
            "butter",
            "cheese",
            "yogurt",
            "sour cream",
            "cheddar",
            "mozzarella",
            "parmesan",
            "feta",
            "eggs",
        ],
    ),
    (
        Category::Pantry,
        &[
            "flour",
            "sugar",
            "salt",
            "pepper",
            "oil",
            "olive oil",
            "vegetable oil",
            "vinegar",
            "soy sauce",
            "rice",
            "pasta",
            "beans",
            "lentils",
            "stock",
            "broth",
            "tomato paste",
            "tomato sauce",
            "baking powder",
            "baking soda",
            "vanilla",
        ],
    ),
    (
        Category::Spices,
        &[
            "cumin",
            "paprika",
            "chili powder",
            "cayenne",
            "cinnamon",
            "nutmeg",
            "oregano",
            "basil",
            "thyme",
            "bay leaf",
        ],
    ),
];

/// Categorization Service
///
/// Stateless domain service that maps canonical ingredient names to grocery
/// store categories by keyword substring. The first category in
/// [`CATEGORY_TAXONOMY`] with a matching keyword wins; nothing matching
/// yields [`Category::Other`].
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(ingredient_name: &str) -> Category {
        let normalized = ingredient_name.trim().to_lowercase();

        CATEGORY_TAXONOMY
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}
