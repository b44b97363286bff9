// 🛒 Cart - Per-session product selection
// Never persisted; holds the same handles as the catalog store

use crate::item::{Item, ItemRef};
use tracing::debug;

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<ItemRef>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Append `item` and return the notification for the user
    pub fn add(&mut self, item: ItemRef) -> String {
        let notice = format!("Added {} to cart.", item.borrow().name);
        debug!(id = %item.borrow().id, size = self.items.len() + 1, "item added to cart");
        self.items.push(item);
        notice
    }

    /// Sum of prices; 0.0 for an empty cart
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.borrow().price).sum()
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Owned copies of the current contents
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.iter().map(|item| item.borrow().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), 0.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_sums_prices() {
        let mut cart = Cart::new();
        cart.add(Item::new("1", "Pen", "Office", 1.5).into_ref());
        cart.add(Item::new("2", "Mug", "Kitchen", 5.0).into_ref());
        cart.add(Item::new("1", "Pen", "Office", 1.5).into_ref());

        assert_eq!(cart.total(), 8.0);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_add_returns_notice_and_keeps_order() {
        let mut cart = Cart::new();
        let notice = cart.add(Item::new("2", "Mug", "Kitchen", 5.0).into_ref());
        cart.add(Item::new("1", "Pen", "Office", 1.5).into_ref());

        assert_eq!(notice, "Added Mug to cart.");
        let names: Vec<String> = cart.snapshot().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Mug", "Pen"]);
    }

    #[test]
    fn test_total_follows_edits_to_shared_item() {
        let handle = Item::new("1", "Pen", "Office", 1.5).into_ref();
        let mut cart = Cart::new();
        cart.add(handle.clone());

        handle.borrow_mut().price = 4.0;

        assert_eq!(cart.total(), 4.0);
    }
}
