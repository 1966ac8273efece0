//! Cart aggregation: one line per menu item id, merged on repeat adds.

use rust_decimal::Decimal;
use shared::domain::{CartLine, MenuItem, MenuItemId};
use tokio::sync::watch;
use tracing::debug;

pub const DEFAULT_QUANTITY: u32 = 1;

/// Coerces dialog input into a usable quantity. Anything that is not a
/// positive integer becomes [`DEFAULT_QUANTITY`].
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) => clamp_quantity(value),
        Err(_) => DEFAULT_QUANTITY,
    }
}

pub fn clamp_quantity(value: i64) -> u32 {
    if value < 1 {
        return DEFAULT_QUANTITY;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Owns the cart lines and publishes a fresh snapshot after every mutation.
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLine>,
    contents_tx: watch::Sender<Vec<CartLine>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (contents_tx, _) = watch::channel(Vec::new());
        Self {
            lines: Vec::new(),
            contents_tx,
        }
    }

    /// Merges into an existing line with the same id (quantity summed,
    /// customization replaced) or appends a new one.
    pub fn add_to_cart(&mut self, item: &MenuItem, quantity: i64, customization: &str) {
        let quantity = clamp_quantity(quantity);

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.customization = customization.to_string();
            debug!(
                item_id = item.id.0,
                added = quantity,
                quantity = line.quantity,
                "merged cart line"
            );
        } else {
            self.lines.push(CartLine::from_menu_item(
                item,
                quantity,
                customization.to_string(),
            ));
            debug!(item_id = item.id.0, quantity, "added cart line");
        }

        self.publish();
    }

    /// Returns whether a line was removed. Absent ids leave the cart untouched
    /// and publish nothing.
    pub fn remove_from_cart(&mut self, line_id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != line_id);
        if self.lines.len() == before {
            debug!(item_id = line_id.0, "ignored removal of absent cart line");
            return false;
        }

        debug!(item_id = line_id.0, "removed cart line");
        self.publish();
        true
    }

    pub fn cart_contents(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    pub fn line(&self, line_id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    pub fn cart_total(&self) -> Decimal {
        cart_total_of(&self.lines)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.contents_tx.subscribe()
    }

    fn publish(&self) {
        self.contents_tx.send_replace(self.lines.clone());
    }
}

/// Total for an arbitrary snapshot, e.g. one received from [`CartStore::subscribe`].
pub fn cart_total_of(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
