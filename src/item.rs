// 📦 Item - One catalog entry
// Maps 1:1 to a row of the backing CSV file (id, Product, Category, Price)

use serde::{Deserialize, Deserializer, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to an item
///
/// The store and the cart hold clones of the same handle, so an edit made
/// through the store is visible from the cart.
pub type ItemRef = Rc<RefCell<Item>>;

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Caller-supplied identity. Never rewritten after creation.
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "Product")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Price", deserialize_with = "price_from_text")]
    pub price: f64,
}

/// Price as it arrives: a number (JSON, clean CSV) or text (" 1.50")
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceCell {
    Number(f64),
    Text(String),
}

/// Parse the Price cell, tolerating surrounding whitespace.
/// The text columns are kept exactly as written.
fn price_from_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match PriceCell::deserialize(deserializer)? {
        PriceCell::Number(price) => Ok(price),
        PriceCell::Text(raw) => raw.trim().parse::<f64>().map_err(|e| {
            serde::de::Error::custom(format!("invalid price '{}': {}", raw, e))
        }),
    }
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> ItemRef {
        Rc::new(RefCell::new(self))
    }

    /// Case-insensitive category comparison
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // {:?} keeps a decimal point on whole prices ("5.0", not "5")
        write!(
            f,
            "ID: {}, Product: {}, Category: {}, Price: {:?}",
            self.id, self.name, self.category, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let item = Item::new("1", "Pen", "Office", 1.5);
        assert_eq!(item.to_string(), "ID: 1, Product: Pen, Category: Office, Price: 1.5");

        let item = Item::new("2", "Mug", "Kitchen", 5.0);
        assert_eq!(item.to_string(), "ID: 2, Product: Mug, Category: Kitchen, Price: 5.0");
    }

    #[test]
    fn test_matches_category_case_insensitive() {
        let item = Item::new("1", "Pen", "Office", 1.5);
        assert!(item.matches_category("office"));
        assert!(item.matches_category("OFFICE"));
        assert!(!item.matches_category("Kitchen"));
    }

    #[test]
    fn test_price_from_json_number_or_padded_text() {
        let item: Item =
            serde_json::from_str(r#"{"id":"1","Product":"Pen","Category":"Office","Price":1.5}"#)
                .unwrap();
        assert_eq!(item.price, 1.5);

        let item: Item =
            serde_json::from_str(r#"{"id":"1","Product":"Pen","Category":"Office","Price":" 2.25 "}"#)
                .unwrap();
        assert_eq!(item.price, 2.25);

        let bad = serde_json::from_str::<Item>(
            r#"{"id":"1","Product":"Pen","Category":"Office","Price":"cheap"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_shared_handle_sees_edits() {
        let handle = Item::new("1", "Pen", "Office", 1.5).into_ref();
        let other = Rc::clone(&handle);

        handle.borrow_mut().price = 2.0;

        assert_eq!(other.borrow().price, 2.0);
    }
}
