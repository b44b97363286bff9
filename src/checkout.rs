// 🧾 Checkout - read-only pass over the cart plus contact collection
// Contact fields are passed through as typed; nothing is validated or stored

use crate::cart::Cart;
use crate::console::Console;
use crate::item::Item;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Free-text details the buyer typed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub address: String,
    pub country: String,
    pub email: String,
}

/// Completed checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub placed_at: DateTime<Utc>,
    /// Items as they were at checkout time
    pub items: Vec<Item>,
    pub total: f64,
    pub contact: ContactDetails,
}

impl Order {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize order")
    }
}

pub struct Checkout;

impl Checkout {
    /// Run checkout for `cart`
    ///
    /// # Returns
    /// * `Ok(None)` - cart was empty; nothing was asked
    /// * `Ok(Some(order))` - summary shown and contact details collected
    pub fn process(cart: &Cart, console: &mut dyn Console) -> Result<Option<Order>> {
        if cart.is_empty() {
            console.say("Your cart is empty!")?;
            return Ok(None);
        }

        console.say("Cart Summary:")?;
        let total = cart.total();
        let items = cart.snapshot();
        for item in &items {
            console.say(&item.to_string())?;
        }
        console.say(&format!("Total: {:.2}", total))?;

        console.say("\nPlease fill out your checkout details:")?;
        let contact = ContactDetails {
            name: console.ask("Name: ")?,
            address: console.ask("Direction: ")?,
            country: console.ask("Country: ")?,
            email: console.ask("Email: ")?,
        };

        console.say("\nCheckout Details:")?;
        console.say(&format!(
            "Name: {}, Direction: {}, Country: {}, Email: {}",
            contact.name, contact.address, contact.country, contact.email
        ))?;
        console.say("Thank you for your purchase!")?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            placed_at: Utc::now(),
            items,
            total,
            contact,
        };
        info!(order_id = %order.id, order = %order.to_json()?, "order placed");

        Ok(Some(order))
    }
}
