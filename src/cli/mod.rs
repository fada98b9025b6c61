pub mod normalize;
pub mod shopping_list;
