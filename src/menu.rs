// 📋 Menu Session - the numbered-options loop
// Owns the store, the cart and the role's product manager for one run

use crate::cart::Cart;
use crate::checkout::{Checkout, Order};
use crate::config::Config;
use crate::console::{Console, InputClosed};
use crate::error::CatalogError;
use crate::roles::{Confirmation, ProductManager, Role};
use crate::store::CatalogStore;
use anyhow::Result;
use tracing::debug;

const MENU: [&str; 9] = [
    "1. List all products",
    "2. List products by category",
    "3. Add product to cart",
    "4. View cart",
    "5. Checkout",
    "6. Add a new product",
    "7. Remove a product",
    "8. Edit a product",
    "9. Quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Ask for the role until the answer is "client" or "manager"
pub fn choose_role(console: &mut dyn Console) -> Result<Role> {
    loop {
        let answer = console.ask("Are you a Client or Manager? ")?;
        match Role::parse(&answer) {
            Some(role) => return Ok(role),
            None => console.say("Invalid user type. Please enter 'Client' or 'Manager'.")?,
        }
    }
}

/// Load the catalog, pick a role and run the menu until quit or end of input
pub fn start(config: &Config, console: &mut dyn Console) -> Result<Session> {
    let store = CatalogStore::open(&config.catalog_path);
    if let Some(issue) = store.load_issue() {
        console.say(&issue.to_string())?;
    }

    let role = match choose_role(console) {
        Ok(role) => role,
        // Nobody picked a role; nothing can have changed
        Err(err) if err.is::<InputClosed>() => {
            return Ok(Session::new(store, Role::Viewer.manager(config.save_policy)))
        }
        Err(err) => return Err(err),
    };
    console.say(&format!("You have selected: {}", role.display_name()))?;

    let mut session = Session::new(store, role.manager(config.save_policy));
    session.run(console)?;
    Ok(session)
}

pub struct Session {
    store: CatalogStore,
    cart: Cart,
    manager: Box<dyn ProductManager>,
    last_order: Option<Order>,
}

impl Session {
    pub fn new(store: CatalogStore, manager: Box<dyn ProductManager>) -> Self {
        Session {
            store,
            cart: Cart::new(),
            manager,
            last_order: None,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn role(&self) -> Role {
        self.manager.role()
    }

    /// Most recent completed checkout in this session
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    /// Loop until the user quits. Running out of input ends the loop too.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            match self.step(console) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(err) if err.is::<InputClosed>() => {
                    debug!("input closed, leaving menu");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self, console: &mut dyn Console) -> Result<Flow> {
        console.say("\nMenu:")?;
        for line in MENU {
            console.say(line)?;
        }

        let choice = console.ask("Please select an option: ")?;
        match choice.trim() {
            "1" => self.list_all(console)?,
            "2" => self.list_by_category(console)?,
            "3" => self.add_to_cart(console)?,
            "4" => self.view_cart(console)?,
            "5" => {
                if let Some(order) = Checkout::process(&self.cart, console)? {
                    self.last_order = Some(order);
                }
            }
            "6" => self.add_product(console)?,
            "7" => self.remove_product(console)?,
            "8" => self.edit_product(console)?,
            "9" => return self.confirm_quit(console),
            _ => console.say("Invalid choice. Please try again.")?,
        }

        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------------
    // Browsing and cart
    // ------------------------------------------------------------------------

    fn list_all(&self, console: &mut dyn Console) -> Result<()> {
        console.say("\nList of all products:")?;
        for item in self.store.list_all() {
            console.say(&item.borrow().to_string())?;
        }
        Ok(())
    }

    fn list_by_category(&self, console: &mut dyn Console) -> Result<()> {
        let category = console.ask("\nEnter category name: ")?;
        let items = self.store.list_by_category(&category);

        if items.is_empty() {
            return console.say(&format!("No products found in category '{}'.", category));
        }

        console.say(&format!("\nList of products in category '{}':", category))?;
        for item in items {
            console.say(&item.borrow().to_string())?;
        }
        Ok(())
    }

    fn add_to_cart(&mut self, console: &mut dyn Console) -> Result<()> {
        let id = console.ask("\nEnter product ID to add to cart: ")?;
        match self.store.find_by_id(&id) {
            Some(item) => {
                let notice = self.cart.add(item);
                console.say(&notice)
            }
            None => console.say(&format!("No product found with ID: {}", id)),
        }
    }

    fn view_cart(&self, console: &mut dyn Console) -> Result<()> {
        if self.cart.is_empty() {
            return console.say("\nYour cart is empty.");
        }

        console.say("\nItems in your cart:")?;
        for item in self.cart.items() {
            console.say(&item.borrow().to_string())?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Catalog edits (gated by role)
    // ------------------------------------------------------------------------

    fn add_product(&mut self, console: &mut dyn Console) -> Result<()> {
        let id = console.ask("Enter product ID: ")?;
        let name = console.ask("Enter product name: ")?;
        let category = console.ask("Enter product category: ")?;
        let Some(price) = ask_price(console, "Enter product price: ")? else {
            return Ok(());
        };

        let outcome = self
            .manager
            .add_product(&mut self.store, &id, &name, &category, price);
        report(console, outcome)
    }

    fn remove_product(&mut self, console: &mut dyn Console) -> Result<()> {
        let id = console.ask("Enter product ID to remove: ")?;
        let outcome = self.manager.remove_product(&mut self.store, &id);
        report(console, outcome)
    }

    fn edit_product(&mut self, console: &mut dyn Console) -> Result<()> {
        let id = console.ask("Enter product ID to edit: ")?;
        let name = console.ask("Enter new product name: ")?;
        let category = console.ask("Enter new product category: ")?;
        let Some(price) = ask_price(console, "Enter new product price: ")? else {
            return Ok(());
        };

        let outcome = self
            .manager
            .edit_product(&mut self.store, &id, &name, &category, price);
        report(console, outcome)
    }

    fn confirm_quit(&self, console: &mut dyn Console) -> Result<Flow> {
        let answer = console.ask("Are you sure you want to exit? (y/n): ")?;
        if answer.trim().eq_ignore_ascii_case("y") {
            console.say("Exiting the program. Goodbye!")?;
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }
}

/// Read a price. `None` (after telling the user) when it is not a number.
fn ask_price(console: &mut dyn Console, prompt: &str) -> Result<Option<f64>> {
    let raw = console.ask(prompt)?;
    match raw.trim().parse::<f64>() {
        Ok(price) => Ok(Some(price)),
        Err(_) => {
            console.say(&format!("Invalid price '{}'. Please enter a number.", raw.trim()))?;
            Ok(None)
        }
    }
}

/// Confirmations and denials both end up on the console.
/// A save that failed behind a confirmation is shown before it.
fn report(console: &mut dyn Console, outcome: Result<Confirmation, CatalogError>) -> Result<()> {
    match outcome {
        Ok(Confirmation { message, save_error }) => {
            if let Some(err) = save_error {
                console.say(&err.to_string())?;
            }
            console.say(&message)
        }
        Err(err) => console.say(&err.to_string()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SavePolicy;
    use crate::console::LineConsole;
    use crate::item::Item;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn pen_catalog(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("products.csv");
        fs::write(&path, "id,Product,Category,Price\n1,Pen,Office,1.50\n").unwrap();
        path
    }

    fn run_script(path: &PathBuf, script: &str) -> (Session, String) {
        let config = Config {
            catalog_path: path.clone(),
            save_policy: SavePolicy::Lenient,
        };
        let mut console = LineConsole::new(Cursor::new(script.to_string()), Vec::new());
        let session = start(&config, &mut console).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (session, output)
    }

    #[test]
    fn test_role_prompt_repeats_until_valid() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, output) = run_script(&path, "admin\nMANAGER\n9\ny\n");

        assert_eq!(session.role(), Role::Editor);
        assert!(output.contains("Invalid user type. Please enter 'Client' or 'Manager'."));
        assert!(output.contains("You have selected: Manager"));
        assert!(output.contains("Exiting the program. Goodbye!"));
    }

    #[test]
    fn test_category_lookup_and_editor_add() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, output) =
            run_script(&path, "manager\n2\noffice\n6\n2\nMug\nKitchen\n5.00\n1\n9\ny\n");

        assert!(output.contains("List of products in category 'office':\nID: 1, Product: Pen"));
        assert!(output.contains("Product 'Mug' with id '2' added successfully."));
        assert_eq!(
            session.store().snapshot(),
            vec![
                Item::new("1", "Pen", "Office", 1.5),
                Item::new("2", "Mug", "Kitchen", 5.0),
            ]
        );
        assert_eq!(CatalogStore::open(&path).snapshot(), session.store().snapshot());
    }

    #[test]
    fn test_client_is_denied_and_catalog_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, output) = run_script(&path, "client\n7\n1\n8\n1\nInk\nOffice\n2\n9\ny\n");

        assert!(output.contains("Permission denied: Client cannot remove products."));
        assert!(output.contains("Permission denied: Client cannot edit products."));
        assert_eq!(session.store().len(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,Product,Category,Price\n1,Pen,Office,1.50\n"
        );
    }

    #[test]
    fn test_cart_and_empty_checkout() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, output) = run_script(&path, "client\n5\n4\n3\n42\n3\n1\n4\n9\ny\n");

        assert!(output.contains("Your cart is empty!"));
        assert!(output.contains("Your cart is empty."));
        assert!(output.contains("No product found with ID: 42"));
        assert!(output.contains("Added Pen to cart."));
        assert!(output.contains("Items in your cart:\nID: 1, Product: Pen"));
        assert_eq!(session.cart().total(), 1.5);
    }

    #[test]
    fn test_checkout_after_edit_uses_new_price() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (_, output) = run_script(
            &path,
            "manager\n3\n1\n8\n1\nPen\nOffice\n2.25\n5\nAda\nSt\nCO\na@b.c\n9\ny\n",
        );

        assert!(output.contains("Product 'Pen' with id '1' edited successfully"));
        assert!(output.contains("Total: 2.25"));
    }

    #[test]
    fn test_invalid_price_and_choice() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, output) = run_script(&path, "manager\n6\n2\nMug\nKitchen\nfive\n0\n9\nn\n");

        assert!(output.contains("Invalid price 'five'. Please enter a number."));
        assert!(output.contains("Invalid choice. Please try again."));
        assert!(!output.contains("Goodbye"));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_missing_catalog_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");

        let (session, output) = run_script(&path, "client\n1\n");

        assert!(output.starts_with("Error: The file '"));
        assert!(output.contains("was not found."));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_failed_save_shown_before_confirmation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("products.csv");

        let (session, output) = run_script(&path, "manager\n6\n2\nMug\nKitchen\n5\n9\ny\n");

        let error_at = output.find("Error saving products to file").unwrap();
        let confirm_at = output.find("Product 'Mug' with id '2' added successfully.").unwrap();
        assert!(error_at < confirm_at);
        assert_eq!(session.store().len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_checkout_keeps_last_order() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, _) = run_script(&path, "client\n5\n3\n1\n5\nAda\nSt\nCO\na@b.c\n9\ny\n");

        let order = session.last_order().unwrap();
        assert_eq!(order.total, 1.5);
        assert_eq!(order.items, vec![Item::new("1", "Pen", "Office", 1.5)]);
        assert_eq!(order.contact.name, "Ada");
    }

    #[test]
    fn test_empty_checkout_records_no_order() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (session, _) = run_script(&path, "client\n5\n9\ny\n");

        assert!(session.last_order().is_none());
    }

    #[test]
    fn test_edit_unknown_id_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let path = pen_catalog(&dir);

        let (_, output) = run_script(&path, "manager\n8\n7\nInk\nOffice\n2\n");

        assert!(output.contains("Product with ID 7 not found."));
    }
}
