use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RestaurantId);
id_newtype!(MenuItemId);

/// Identifies one running order session in logs and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub cuisine: String,
}

impl Restaurant {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        address: impl Into<String>,
        cuisine: impl Into<String>,
    ) -> Self {
        Self {
            id: RestaurantId(id),
            name: name.into(),
            address: address.into(),
            cuisine: cuisine.into(),
        }
    }
}

/// Catalog entry. `price` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl MenuItem {
    /// Negative prices are floored at zero.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: MenuItemId(id),
            name: name.into(),
            description: description.into(),
            price: price.max(Decimal::ZERO),
        }
    }
}

/// One aggregated cart row, keyed by the originating menu item id.
///
/// `price` is a copy taken when the line was first created and is not
/// re-synced with the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub customization: String,
}

impl CartLine {
    pub fn from_menu_item(item: &MenuItem, quantity: u32, customization: String) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.max(Decimal::ZERO),
            quantity: quantity.max(1),
            customization,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
