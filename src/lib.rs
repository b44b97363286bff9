// Catalog Cart - Core Library
// Exposes the catalog, cart, role and checkout modules for the CLI and tests

pub mod cart;
pub mod checkout;
pub mod config;
pub mod console;
pub mod error;
pub mod item;
pub mod menu;
pub mod roles;
pub mod store;

// Re-export commonly used types
pub use cart::Cart;
pub use checkout::{Checkout, ContactDetails, Order};
pub use config::{Config, SavePolicy, DEFAULT_CATALOG_PATH};
pub use console::{Console, InputClosed, LineConsole};
pub use error::CatalogError;
pub use item::{Item, ItemRef};
pub use menu::{choose_role, start, Session};
pub use roles::{Confirmation, Editor, ProductManager, Role, Viewer};
pub use store::{load_items, write_items, CatalogStore, LoadReport, CSV_HEADER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
