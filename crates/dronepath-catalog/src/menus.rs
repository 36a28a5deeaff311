//! Shop menus and item pricing.

use serde::{Deserialize, Serialize};

/// Flat charge added to every order, in pence.
pub const DELIVERY_CHARGE_PENCE: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    /// Location label of the shop
    pub location: String,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub item: String,
    pub pence: u32,
}

/// Price and pickup locations for a set of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuote {
    /// Items plus the delivery charge, in pence
    pub cost: u32,
    /// Shop location labels, unique, in first-seen order
    pub pickup_labels: Vec<String>,
}

/// Every shop's menu as served by the catalog.
#[derive(Debug, Clone, Default)]
pub struct Menus {
    shops: Vec<Shop>,
}

impl Menus {
    pub fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// First shop (in menu order) selling `item`.
    pub fn find(&self, item: &str) -> Option<(&Shop, &MenuItem)> {
        self.shops.iter().find_map(|shop| {
            shop.menu
                .iter()
                .find(|entry| entry.item == item)
                .map(|entry| (shop, entry))
        })
    }

    /// Price a basket of item names. Unknown items are skipped.
    pub fn quote<S: AsRef<str>>(&self, items: &[S]) -> ItemQuote {
        let mut cost = DELIVERY_CHARGE_PENCE;
        let mut pickup_labels: Vec<String> = Vec::new();
        for item in items {
            let item = item.as_ref();
            let Some((shop, entry)) = self.find(item) else {
                tracing::warn!(item, "Item not found on any menu, skipping");
                continue;
            };
            cost += entry.pence;
            if !pickup_labels.iter().any(|label| label == &shop.location) {
                pickup_labels.push(shop.location.clone());
            }
        }
        ItemQuote {
            cost,
            pickup_labels,
        }
    }
}
