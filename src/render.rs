//! Plain-text rendering of a shopping list.

use std::fmt;

use larder_shopping::quantity::Quantity;
use larder_shopping::{ShoppingList, ShoppingListItem};

/// Category headings in uppercase, one line per item
///
/// ```text
/// DAIRY
///   12 ounce butter  (Cake, Cookies)
/// ```
pub fn render_text(list: &ShoppingList) -> String {
    TextList(list).to_string()
}

/// Plain-text view of a whole list
pub struct TextList<'a>(pub &'a ShoppingList);

impl fmt::Display for TextList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (category, items)) in self.0.categories().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", category.as_str().to_uppercase())?;

            for item in items {
                writeln!(f, "  {}", TextItem(item))?;
            }
        }

        Ok(())
    }
}

struct TextItem<'a>(&'a ShoppingListItem);

impl fmt::Display for TextItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = self.0;

        if let Some(quantity) = item.quantity {
            write!(f, "{} ", Quantity(quantity))?;
        }
        if let Some(unit) = &item.unit {
            write!(f, "{unit} ")?;
        }
        f.write_str(&item.name)?;

        if !item.recipes.is_empty() {
            let recipes: Vec<&str> = item.recipes.iter().map(String::as_str).collect();
            write!(f, "  ({})", recipes.join(", "))?;
        }

        Ok(())
    }
}
