//! Shopping list aggregation, scaling, rounding and store split.

pub mod aggregate;
pub mod split;

pub use aggregate::{generate_shopping_list, round_amount, write_csv, ShoppingItem, ShoppingList};
pub use split::{split_shopping_list, SplitShoppingList, FALLBACK_BUCKET, SHOP_BUCKET};
