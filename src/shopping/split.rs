use serde::{Deserialize, Serialize};

use crate::availability::ShopAvailability;
use crate::shopping::aggregate::{ShoppingItem, ShoppingList};

pub const SHOP_BUCKET: &str = "Hofladen";
pub const FALLBACK_BUCKET: &str = "Supermarkt";

/// The shopping list partitioned by where each item can be bought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitShoppingList {
    /// Items the designated farm shop carries.
    pub shop_items: Vec<ShoppingItem>,
    /// Everything else.
    pub other_items: Vec<ShoppingItem>,
}

impl SplitShoppingList {
    pub fn total_items(&self) -> usize {
        self.shop_items.len() + self.other_items.len()
    }
}

/// Partition an aggregated list against the shop's product range.
///
/// An item lands in the shop bucket when its name matches a catalog entry
/// directly, via the synonym table, or by substring containment in either
/// direction.
pub fn split_shopping_list(list: &ShoppingList, shop: &ShopAvailability) -> SplitShoppingList {
    let (shop_items, other_items): (Vec<ShoppingItem>, Vec<ShoppingItem>) = list
        .items
        .iter()
        .cloned()
        .partition(|item| shop.matches(&item.name));
    SplitShoppingList {
        shop_items,
        other_items,
    }
}
